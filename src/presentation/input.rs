use crate::application::{App, AppMode};
use crate::infrastructure::{CsvExporter, FileRepository};
use crossterm::event::{KeyCode, KeyModifiers};

pub struct InputHandler;

impl InputHandler {
    pub fn handle_key_event(app: &mut App, key: KeyCode, modifiers: KeyModifiers) {
        match app.mode {
            AppMode::Normal => Self::handle_normal_mode(app, key, modifiers),
            AppMode::Help => Self::handle_help_mode(app, key),
            AppMode::SaveAs => Self::handle_filename_input_mode(app, key, "save"),
            AppMode::LoadFile => Self::handle_filename_input_mode(app, key, "load"),
            AppMode::ExportCsv => Self::handle_filename_input_mode(app, key, "csv_export"),
        }
    }

    fn handle_normal_mode(app: &mut App, key: KeyCode, modifiers: KeyModifiers) {
        if modifiers.contains(KeyModifiers::CONTROL) {
            match key {
                KeyCode::Char('s') => {
                    app.start_save_as();
                    return;
                }
                KeyCode::Char('o') => {
                    app.start_load_file();
                    return;
                }
                KeyCode::Char('e') => {
                    app.start_csv_export();
                    return;
                }
                KeyCode::Char('y') => {
                    app.copy_result_to_clipboard();
                    return;
                }
                KeyCode::Char('u') => {
                    app.clear_input();
                    return;
                }
                _ => {}
            }
        }

        match key {
            KeyCode::Enter => {
                app.submit_input();
            }
            KeyCode::Up => {
                app.recall_previous();
            }
            KeyCode::Down => {
                app.recall_next();
            }
            KeyCode::PageUp => {
                app.scroll_history_up(5);
            }
            KeyCode::PageDown => {
                app.scroll_history_down(5);
            }
            KeyCode::F(1) => {
                app.mode = AppMode::Help;
                app.help_scroll = 0;
            }
            KeyCode::Esc => {
                app.clear_input();
            }
            KeyCode::Backspace => {
                if app.cursor_position > 0 {
                    app.input.remove(app.cursor_position - 1);
                    app.cursor_position -= 1;
                }
            }
            KeyCode::Delete => {
                if app.cursor_position < app.input.len() {
                    app.input.remove(app.cursor_position);
                }
            }
            KeyCode::Left => {
                if app.cursor_position > 0 {
                    app.cursor_position -= 1;
                }
            }
            KeyCode::Right => {
                if app.cursor_position < app.input.len() {
                    app.cursor_position += 1;
                }
            }
            KeyCode::Home => {
                app.cursor_position = 0;
            }
            KeyCode::End => {
                app.cursor_position = app.input.len();
            }
            KeyCode::Char(c) => {
                app.status_message = None;
                app.input.insert(app.cursor_position, c);
                app.cursor_position += 1;
            }
            _ => {}
        }
    }

    fn handle_help_mode(app: &mut App, key: KeyCode) {
        match key {
            KeyCode::Esc | KeyCode::F(1) | KeyCode::Char('q') => {
                app.mode = AppMode::Normal;
            }
            KeyCode::Up | KeyCode::Char('k') => {
                if app.help_scroll > 0 {
                    app.help_scroll -= 1;
                }
            }
            KeyCode::Down | KeyCode::Char('j') => {
                app.help_scroll += 1;
            }
            KeyCode::PageUp => {
                app.help_scroll = app.help_scroll.saturating_sub(5);
            }
            KeyCode::PageDown => {
                app.help_scroll += 5;
            }
            KeyCode::Home => {
                app.help_scroll = 0;
            }
            _ => {}
        }
    }

    fn handle_filename_input_mode(app: &mut App, key: KeyCode, mode: &str) {
        match key {
            KeyCode::Enter => {
                match mode {
                    "save" => {
                        let filename = app.get_save_filename();
                        let result = FileRepository::save_session(&app.session(), &filename);
                        app.set_save_result(result);
                    }
                    "load" => {
                        let filename = app.get_load_filename();
                        let result = FileRepository::load_session(&filename);
                        app.set_load_result(result);
                    }
                    "csv_export" => {
                        let filename = app.get_csv_export_filename();
                        let result = CsvExporter::export_history(&app.history, &filename);
                        app.set_csv_export_result(result);
                    }
                    _ => {}
                }
            }
            KeyCode::Esc => {
                app.cancel_filename_input();
            }
            KeyCode::Backspace => {
                if app.cursor_position > 0 {
                    app.filename_input.remove(app.cursor_position - 1);
                    app.cursor_position -= 1;
                }
            }
            KeyCode::Delete => {
                if app.cursor_position < app.filename_input.len() {
                    app.filename_input.remove(app.cursor_position);
                }
            }
            KeyCode::Left => {
                if app.cursor_position > 0 {
                    app.cursor_position -= 1;
                }
            }
            KeyCode::Right => {
                if app.cursor_position < app.filename_input.len() {
                    app.cursor_position += 1;
                }
            }
            KeyCode::Home => {
                app.cursor_position = 0;
            }
            KeyCode::End => {
                app.cursor_position = app.filename_input.len();
            }
            KeyCode::Char(c) => {
                app.filename_input.insert(app.cursor_position, c);
                app.cursor_position += 1;
            }
            _ => {}
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::{App, AppMode};

    #[test]
    fn test_typing_and_submitting() {
        let mut app = App::default();

        for c in "1 + 2".chars() {
            InputHandler::handle_key_event(&mut app, KeyCode::Char(c), KeyModifiers::NONE);
        }
        assert_eq!(app.input, "1 + 2");

        InputHandler::handle_key_event(&mut app, KeyCode::Enter, KeyModifiers::NONE);
        assert!(app.input.is_empty());
        assert_eq!(app.history.len(), 1);
        assert_eq!(app.history[0].output, "3");
    }

    #[test]
    fn test_cursor_editing() {
        let mut app = App::default();
        for c in "13".chars() {
            InputHandler::handle_key_event(&mut app, KeyCode::Char(c), KeyModifiers::NONE);
        }

        // Insert a '2' between the '1' and the '3'
        InputHandler::handle_key_event(&mut app, KeyCode::Left, KeyModifiers::NONE);
        InputHandler::handle_key_event(&mut app, KeyCode::Char('2'), KeyModifiers::NONE);
        assert_eq!(app.input, "123");
        assert_eq!(app.cursor_position, 2);

        InputHandler::handle_key_event(&mut app, KeyCode::End, KeyModifiers::NONE);
        InputHandler::handle_key_event(&mut app, KeyCode::Backspace, KeyModifiers::NONE);
        assert_eq!(app.input, "12");

        InputHandler::handle_key_event(&mut app, KeyCode::Home, KeyModifiers::NONE);
        InputHandler::handle_key_event(&mut app, KeyCode::Delete, KeyModifiers::NONE);
        assert_eq!(app.input, "2");
    }

    #[test]
    fn test_save_key_binding() {
        let mut app = App::default();

        assert!(matches!(app.mode, AppMode::Normal));
        InputHandler::handle_key_event(&mut app, KeyCode::Char('s'), KeyModifiers::CONTROL);

        assert!(matches!(app.mode, AppMode::SaveAs));
        assert_eq!(app.filename_input, "session.tcalc");
    }

    #[test]
    fn test_load_key_binding() {
        let mut app = App::default();

        InputHandler::handle_key_event(&mut app, KeyCode::Char('o'), KeyModifiers::CONTROL);

        assert!(matches!(app.mode, AppMode::LoadFile));
        assert_eq!(app.filename_input, "session.tcalc");
    }

    #[test]
    fn test_csv_export_key_binding() {
        let mut app = App::default();

        InputHandler::handle_key_event(&mut app, KeyCode::Char('e'), KeyModifiers::CONTROL);

        assert!(matches!(app.mode, AppMode::ExportCsv));
        assert_eq!(app.filename_input, "history.csv");
    }

    #[test]
    fn test_filename_input_editing() {
        let mut app = App::default();
        app.start_csv_export();

        InputHandler::handle_key_event(&mut app, KeyCode::Char('x'), KeyModifiers::NONE);
        assert_eq!(app.filename_input, "history.csvx");

        InputHandler::handle_key_event(&mut app, KeyCode::Backspace, KeyModifiers::NONE);
        assert_eq!(app.filename_input, "history.csv");

        InputHandler::handle_key_event(&mut app, KeyCode::Esc, KeyModifiers::NONE);
        assert!(matches!(app.mode, AppMode::Normal));
        assert!(app.filename_input.is_empty());
    }

    #[test]
    fn test_plain_s_is_not_a_shortcut() {
        let mut app = App::default();

        InputHandler::handle_key_event(&mut app, KeyCode::Char('s'), KeyModifiers::NONE);
        assert!(matches!(app.mode, AppMode::Normal));
        assert_eq!(app.input, "s");
    }

    #[test]
    fn test_help_mode_keys() {
        let mut app = App::default();

        InputHandler::handle_key_event(&mut app, KeyCode::F(1), KeyModifiers::NONE);
        assert!(matches!(app.mode, AppMode::Help));

        InputHandler::handle_key_event(&mut app, KeyCode::Down, KeyModifiers::NONE);
        InputHandler::handle_key_event(&mut app, KeyCode::Down, KeyModifiers::NONE);
        assert_eq!(app.help_scroll, 2);

        InputHandler::handle_key_event(&mut app, KeyCode::PageDown, KeyModifiers::NONE);
        assert_eq!(app.help_scroll, 7);

        InputHandler::handle_key_event(&mut app, KeyCode::Home, KeyModifiers::NONE);
        assert_eq!(app.help_scroll, 0);

        InputHandler::handle_key_event(&mut app, KeyCode::Esc, KeyModifiers::NONE);
        assert!(matches!(app.mode, AppMode::Normal));
    }

    #[test]
    fn test_arrow_recall() {
        let mut app = App::default();
        app.input = "7 * 6".to_string();
        app.submit_input();

        InputHandler::handle_key_event(&mut app, KeyCode::Up, KeyModifiers::NONE);
        assert_eq!(app.input, "7 * 6");

        InputHandler::handle_key_event(&mut app, KeyCode::Down, KeyModifiers::NONE);
        assert_eq!(app.input, "");
    }

    #[test]
    fn test_escape_clears_input() {
        let mut app = App::default();
        app.input = "half-typed".to_string();
        app.cursor_position = app.input.len();

        InputHandler::handle_key_event(&mut app, KeyCode::Esc, KeyModifiers::NONE);
        assert!(app.input.is_empty());
        assert_eq!(app.cursor_position, 0);
    }
}
