use crate::application::{App, AppMode};
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Style},
    widgets::{Block, Borders, Clear, List, ListItem, Paragraph},
    Frame,
};

pub fn render_ui(f: &mut Frame, app: &App) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1),
            Constraint::Min(0),
            Constraint::Length(3),
            Constraint::Length(3),
        ])
        .split(f.area());

    render_header(f, app, chunks[0]);
    render_history(f, app, chunks[1]);
    render_input(f, app, chunks[2]);
    render_status_bar(f, app, chunks[3]);

    if matches!(app.mode, AppMode::Help) {
        render_help_popup(f, app);
    }
}

fn render_header(f: &mut Frame, app: &App, area: Rect) {
    let header = Paragraph::new(format!(
        "tcalc - Terminal Calculator | {} entries | {} variables | {} user macros",
        app.history.len(),
        app.calculator.environment().len(),
        app.calculator.macros().user_macros().len(),
    ))
    .style(Style::default().fg(Color::Cyan));
    f.render_widget(header, area);
}

fn render_history(f: &mut Frame, app: &App, area: Rect) {
    let mut lines: Vec<ListItem> = Vec::new();
    for entry in &app.history {
        lines.push(
            ListItem::new(format!("> {}", entry.input))
                .style(Style::default().fg(Color::Yellow)),
        );
        lines.push(ListItem::new(format!("  {}", entry.output)));
    }

    // The newest entry sits at the bottom; scrolling moves the window up.
    let visible = area.height.saturating_sub(2) as usize;
    let max_scroll = lines.len().saturating_sub(visible);
    let scroll = app.history_scroll.min(max_scroll);
    let end = lines.len() - scroll;
    let start = end.saturating_sub(visible);

    let list = List::new(lines[start..end].to_vec())
        .block(Block::default().borders(Borders::ALL).title("History"));
    f.render_widget(list, area);
}

fn render_input(f: &mut Frame, app: &App, area: Rect) {
    let input = Paragraph::new(app.input.as_str())
        .block(Block::default().borders(Borders::ALL).title("Input"))
        .style(Style::default().fg(Color::Green));
    f.render_widget(input, area);
}

fn render_status_bar(f: &mut Frame, app: &App, area: Rect) {
    let status_text = match app.mode {
        AppMode::Normal => {
            if let Some(ref status) = app.status_message {
                status.clone()
            } else {
                let filename = app.filename.as_deref().unwrap_or("unsaved");
                format!("File: {} | Ctrl+S: save | Ctrl+O: load | Ctrl+E: export CSV | Ctrl+Y: copy result | F1: help | Ctrl+Q: quit", filename)
            }
        }
        AppMode::Help => "↑↓/jk: scroll | PgUp/PgDn: fast scroll | Home: top | Esc/q: close help".to_string(),
        AppMode::SaveAs => format!("Save as: {} (Enter to save, Esc to cancel)", app.filename_input),
        AppMode::LoadFile => format!("Load file or URL: {} (Enter to load, Esc to cancel)", app.filename_input),
        AppMode::ExportCsv => format!("Export CSV as: {} (Enter to export, Esc to cancel)", app.filename_input),
    };

    let status = Paragraph::new(status_text)
        .block(Block::default().borders(Borders::ALL).title("Status"))
        .style(match app.mode {
            AppMode::Normal => Style::default(),
            AppMode::Help => Style::default().fg(Color::Cyan),
            AppMode::SaveAs => Style::default().fg(Color::Yellow),
            AppMode::LoadFile => Style::default().fg(Color::Yellow),
            AppMode::ExportCsv => Style::default().fg(Color::Magenta),
        });
    f.render_widget(status, area);
}

fn render_help_popup(f: &mut Frame, app: &App) {
    let area = f.area();
    let popup_area = Rect {
        x: area.width / 10,
        y: area.height / 10,
        width: area.width * 4 / 5,
        height: area.height * 4 / 5,
    };

    f.render_widget(Clear, popup_area);

    let help_text = get_help_text(app);
    let help_lines: Vec<&str> = help_text.lines().collect();
    let visible_height = popup_area.height.saturating_sub(2) as usize;

    let start_line = app.help_scroll.min(help_lines.len().saturating_sub(visible_height));
    let end_line = (start_line + visible_height).min(help_lines.len());

    let visible_text = help_lines[start_line..end_line].join("\n");

    let help_widget = Paragraph::new(visible_text)
        .block(Block::default()
            .borders(Borders::ALL)
            .title(format!("tcalc Formula Language Help (Line {}/{})", start_line + 1, help_lines.len()))
            .style(Style::default().fg(Color::Cyan)))
        .style(Style::default().fg(Color::White));

    f.render_widget(help_widget, popup_area);
}

fn get_help_text(app: &App) -> String {
    let mut text = get_reference_text();

    let user_macros: Vec<_> = app.calculator.macros().definitions()
        .into_iter()
        .filter(|m| !m.is_builtin())
        .collect();
    if !user_macros.is_empty() {
        text.push_str("\n\n=== YOUR MACROS ===\n");
        for definition in user_macros {
            text.push_str(&format!(
                "{}({}) = {}\n",
                definition.name(),
                definition.params().join(", "),
                definition.source(),
            ));
        }
    }

    text
}

fn get_reference_text() -> String {
    r#"TCALC FORMULA LANGUAGE REFERENCE

=== BASIC CONCEPTS ===
• Type an expression and press Enter to evaluate it
• Numbers can be integers or decimals (42, 3.14, -5.5)
• Text literals use double quotes ("FF"); "" escapes a quote
• Names are case insensitive (min(1,2) is MIN(1,2))
• Up/Down recall earlier inputs; PgUp/PgDn scroll the history

=== ARITHMETIC OPERATORS ===
+       Addition                    5+3 → 8
-       Subtraction                 10-3 → 7
*       Multiplication              4*3 → 12
/       Division                    15/3 → 5
%       Modulo (remainder)          10%3 → 1
&       Text join                   "0x" & "FF" → 0xFF

=== COMPARISON OPERATORS ===
<       Less than                   3<5 → 1
>       Greater than                3>5 → 0
<=      Less than or equal          5<=5 → 1
>=      Greater than or equal       4>=5 → 0
<>      Not equal                   5<>4 → 1
=       Equal                       5=5 → 1

Note: Comparisons return 1 for true, 0 for false, and take
part in arithmetic: (X>0) * X

=== VARIABLES AND DEFINITIONS ===
x = 5                 Assign a variable
rate * 2              Use it in any expression
F(X) = X * 2 + 1      Define your own macro
F(10)                 → 21
(x) = 5               Parenthesize to compare instead of assign

=== PRIMITIVE FUNCTIONS ===
LN(x)           Natural logarithm (x > 0)
ANTILN(x)       Natural exponentiation, inverse of LN
SQRT(x)         Square root (x >= 0)
ABS(x)          Absolute value
ROUND(x)        Round to integer, ROUND(x, n) to n places
IF(c,a,b)       a if c is non-zero, else b
AND/OR/NOT      Logic over 0/1 values

=== FORMULA MACROS ===
MIN(A,B)              Smaller of two values
MAX(A,B)              Larger of two values
CLAMP(V,MIN,MAX)      V limited to MAX above; 0 when V <= MIN
POSITIVE_CLAMP(V)     V if positive, else 0
NEGATIVE_CLAMP(V)     V if negative, else 0
RGB(R,G,B)            Pack 0-255 channels into one number
RGBA(R,G,B,A)         RGB plus alpha in the next byte
HEX("FF")             Parse hexadecimal digits → 255
BIN("1010")           Parse binary digits → 10
POW(BASE,EXP)         BASE to the power EXP (BASE > 0)
GAMMA(V)              Gamma-decode with exponent 1/2.2 (V > 0)
SINH/COSH/TANH(X)     Hyperbolic functions
ASINH/ACOSH/ATANH(X)  Inverse hyperbolic functions
PI, E                 3.14159..., 2.71828...

Macros expand into plain arithmetic before evaluation, so
MIN(A,B) is exactly A - (A - B) * (A > B).

=== EXAMPLES ===
CLAMP(volume, 0, 100)
RGB(255, 128, 0)
POW(2, 10)                → 1024
GAMMA(HEX("80") / 255)
TANH(1)

=== FILE OPERATIONS ===
Ctrl+S          Save session to file (JSON)
Ctrl+O          Load session from file or http(s) URL
Ctrl+E          Export history to CSV file
Ctrl+Y          Copy the last result to the clipboard
                Sessions keep variables, user macros, and history

=== KEYS ===
Enter           Evaluate the input line
Up/Down         Recall earlier inputs
PgUp/PgDn       Scroll history
Esc             Clear the input line
Ctrl+U          Clear the input line
F1              Show this help
Ctrl+Q          Quit

=== HELP NAVIGATION ===
↑↓ or j/k       Scroll help text up/down one line
Page Up/Down    Scroll help text up/down 5 lines
Home            Jump to top of help text
Esc/F1/q        Close this help window"#.to_string()
}
