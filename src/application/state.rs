//! Application state management for the terminal calculator.
//!
//! This module contains the main application state and mode management
//! for the terminal user interface.

use crate::domain::{Calculator, HistoryEntry, Session};

/// Represents the current mode of the application.
///
/// The application can be in different modes that determine how user input
/// is interpreted and what UI elements are displayed.
#[derive(Debug)]
pub enum AppMode {
    /// Normal mode - typing into the input line, Enter evaluates
    Normal,
    /// Help screen is displayed
    Help,
    /// Save dialog is open
    SaveAs,
    /// Load dialog is open
    LoadFile,
    /// CSV export dialog is open
    ExportCsv,
}

/// Main application state containing the calculator and UI state.
///
/// This structure holds all the data needed to render the terminal UI
/// and manage user interactions with the calculator.
///
/// # Examples
///
/// ```
/// use tcalc::application::App;
///
/// let app = App::default();
/// assert!(app.history.is_empty());
/// assert_eq!(app.input, "");
/// ```
#[derive(Debug)]
pub struct App {
    /// The calculator engine (environment, macros, primitives)
    pub calculator: Calculator,
    /// Evaluated lines and their outcomes, oldest first
    pub history: Vec<HistoryEntry>,
    /// Current input buffer
    pub input: String,
    /// Cursor position within the input buffer
    pub cursor_position: usize,
    /// Current application mode
    pub mode: AppMode,
    /// Current filename (if the session has been saved/loaded)
    pub filename: Option<String>,
    /// Input buffer for filename entry
    pub filename_input: String,
    /// Temporary status message to display
    pub status_message: Option<String>,
    /// Scroll position in help text
    pub help_scroll: usize,
    /// Lines scrolled up from the bottom of the history pane
    pub history_scroll: usize,
    /// Position while recalling earlier inputs with Up/Down
    pub recall_index: Option<usize>,
    /// Stashed in-progress input while recalling
    pub pending_input: String,
}

impl Default for App {
    fn default() -> Self {
        Self {
            calculator: Calculator::new(),
            history: Vec::new(),
            input: String::new(),
            cursor_position: 0,
            mode: AppMode::Normal,
            filename: None,
            filename_input: String::new(),
            status_message: None,
            help_scroll: 0,
            history_scroll: 0,
            recall_index: None,
            pending_input: String::new(),
        }
    }
}

impl App {
    /// Evaluates the current input line and appends it to the history.
    ///
    /// Errors are recorded in the history too, rendered through
    /// `DomainError`'s display form, so the transcript shows what went
    /// wrong at each line. Empty input is ignored.
    pub fn submit_input(&mut self) {
        if self.input.trim().is_empty() {
            return;
        }

        let input = self.input.clone();
        let output = match self.calculator.evaluate_line(&input) {
            Ok(result) => result,
            Err(error) => error.to_string(),
        };

        self.history.push(HistoryEntry { input, output });
        self.input.clear();
        self.cursor_position = 0;
        self.recall_index = None;
        self.pending_input.clear();
        self.history_scroll = 0;
        self.status_message = None;
    }

    /// Clears the input line without evaluating it.
    pub fn clear_input(&mut self) {
        self.input.clear();
        self.cursor_position = 0;
        self.recall_index = None;
        self.pending_input.clear();
    }

    /// Recalls the previous submitted input into the edit buffer.
    ///
    /// The first recall stashes whatever was being typed; stepping past the
    /// oldest entry stays there.
    pub fn recall_previous(&mut self) {
        if self.history.is_empty() {
            return;
        }

        let index = match self.recall_index {
            None => {
                self.pending_input = self.input.clone();
                self.history.len() - 1
            }
            Some(0) => 0,
            Some(i) => i - 1,
        };

        self.recall_index = Some(index);
        self.input = self.history[index].input.clone();
        self.cursor_position = self.input.len();
    }

    /// Steps forward through recalled inputs, restoring the stashed
    /// in-progress line after the newest entry.
    pub fn recall_next(&mut self) {
        let Some(index) = self.recall_index else {
            return;
        };

        if index + 1 < self.history.len() {
            self.recall_index = Some(index + 1);
            self.input = self.history[index + 1].input.clone();
        } else {
            self.recall_index = None;
            self.input = self.pending_input.clone();
            self.pending_input.clear();
        }
        self.cursor_position = self.input.len();
    }

    /// Scrolls the history pane up (towards older entries).
    pub fn scroll_history_up(&mut self, lines: usize) {
        self.history_scroll += lines;
    }

    /// Scrolls the history pane down (towards the newest entry).
    pub fn scroll_history_down(&mut self, lines: usize) {
        self.history_scroll = self.history_scroll.saturating_sub(lines);
    }

    /// Captures the session for persistence.
    pub fn session(&self) -> Session {
        self.calculator.snapshot(&self.history)
    }

    /// Switches to save-as mode to prompt for a filename.
    pub fn start_save_as(&mut self) {
        self.mode = AppMode::SaveAs;
        self.filename_input = self.filename.clone().unwrap_or_else(|| "session.tcalc".to_string());
        self.cursor_position = self.filename_input.len();
        self.status_message = None;
    }

    /// Switches to load-file mode to prompt for a filename or URL.
    pub fn start_load_file(&mut self) {
        self.mode = AppMode::LoadFile;
        self.filename_input = self.filename.clone().unwrap_or_else(|| "session.tcalc".to_string());
        self.cursor_position = self.filename_input.len();
        self.status_message = None;
    }

    /// Switches to CSV export mode to prompt for a filename.
    pub fn start_csv_export(&mut self) {
        self.mode = AppMode::ExportCsv;
        self.filename_input = self.filename
            .as_ref()
            .map(|f| f.replace(".tcalc", ".csv"))
            .unwrap_or_else(|| "history.csv".to_string());
        self.cursor_position = self.filename_input.len();
        self.status_message = None;
    }

    /// Cancels filename input and returns to normal mode.
    pub fn cancel_filename_input(&mut self) {
        self.mode = AppMode::Normal;
        self.filename_input.clear();
        self.cursor_position = 0;
    }

    /// Gets the filename to use for saving.
    pub fn get_save_filename(&self) -> String {
        if self.filename_input.is_empty() {
            "session.tcalc".to_string()
        } else {
            self.filename_input.clone()
        }
    }

    /// Gets the filename or URL to use for loading.
    pub fn get_load_filename(&self) -> String {
        if self.filename_input.is_empty() {
            "session.tcalc".to_string()
        } else {
            self.filename_input.clone()
        }
    }

    /// Gets the filename to use for CSV export.
    pub fn get_csv_export_filename(&self) -> String {
        if self.filename_input.is_empty() {
            "history.csv".to_string()
        } else {
            self.filename_input.clone()
        }
    }

    /// Processes the result of a save operation.
    pub fn set_save_result(&mut self, result: Result<String, String>) {
        match result {
            Ok(filename) => {
                self.filename = Some(filename.clone());
                self.status_message = Some(format!("Saved to {}", filename));
            }
            Err(error) => {
                self.status_message = Some(format!("Save failed: {}", error));
            }
        }

        self.mode = AppMode::Normal;
        self.filename_input.clear();
        self.cursor_position = 0;
    }

    /// Processes the result of a load operation.
    ///
    /// The loaded session is re-validated through the calculator before it
    /// replaces the current state, so a bad file leaves everything intact.
    pub fn set_load_result(&mut self, result: Result<(Session, String), String>) {
        match result {
            Ok((session, filename)) => match Calculator::from_session(&session) {
                Ok(calculator) => {
                    self.calculator = calculator;
                    self.history = session.history;
                    self.filename = Some(filename.clone());
                    self.history_scroll = 0;
                    self.recall_index = None;
                    self.pending_input.clear();
                    self.status_message = Some(format!("Loaded from {}", filename));
                }
                Err(error) => {
                    self.status_message = Some(format!("Load failed: {}", error));
                }
            },
            Err(error) => {
                self.status_message = Some(format!("Load failed: {}", error));
            }
        }

        self.mode = AppMode::Normal;
        self.filename_input.clear();
        self.cursor_position = 0;
    }

    /// Processes the result of a CSV export operation.
    pub fn set_csv_export_result(&mut self, result: Result<String, String>) {
        match result {
            Ok(filename) => {
                self.status_message = Some(format!("Exported to {}", filename));
            }
            Err(error) => {
                self.status_message = Some(format!("Export failed: {}", error));
            }
        }

        self.mode = AppMode::Normal;
        self.filename_input.clear();
        self.cursor_position = 0;
    }

    /// Copies the most recent result to the system clipboard.
    pub fn copy_result_to_clipboard(&mut self) {
        let Some(entry) = self.history.last() else {
            self.status_message = Some("Nothing to copy".to_string());
            return;
        };

        let text = entry.output.clone();
        match arboard::Clipboard::new().and_then(|mut clipboard| clipboard.set_text(text)) {
            Ok(()) => {
                self.status_message = Some("Result copied to clipboard".to_string());
            }
            Err(error) => {
                self.status_message = Some(format!("Clipboard error: {}", error));
            }
        }
    }
}
