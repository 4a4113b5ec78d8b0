use crate::app::{App, Mode, View};
use crate::input::Command;
use crate::models::TaskStatus;
use crate::ui::form::FormAction;
use crossterm::event::{KeyCode, KeyEvent};

/// Handle keyboard input.
/// Returns false when the application should exit.
pub fn handle_key_input(app: &mut App, key: KeyEvent) -> bool {
    match app.mode {
        Mode::Normal => handle_normal_mode(app, key),
        Mode::Form => handle_form_mode(app, key),
        Mode::ConfirmDelete => handle_confirm_mode(app, key),
        Mode::Help => handle_help_mode(app, key),
        Mode::ThresholdInput => handle_threshold_input_mode(app, key),
    }
}

fn handle_normal_mode(app: &mut App, key: KeyEvent) -> bool {
    if let Some(cmd) = match_key(app.view, key) {
        if cmd == Command::Quit {
            return false;
        }
        execute_command(app, cmd);
    }
    true
}

/// Map a key to a command. The digit keys change meaning per view: on the
/// board they send the selected task to a column, on the matrix they toggle
/// the status filter.
pub fn match_key(view: View, key: KeyEvent) -> Option<Command> {
    match key.code {
        KeyCode::Char('q') => Some(Command::Quit),

        KeyCode::Char('m') => Some(Command::ShowMatrix),
        KeyCode::Char('b') => Some(Command::ShowBoard),
        KeyCode::Tab => Some(Command::ToggleView),

        KeyCode::Char('h') | KeyCode::Left => Some(Command::ColumnLeft),
        KeyCode::Char('l') | KeyCode::Right => Some(Command::ColumnRight),
        KeyCode::Char('k') | KeyCode::Up => Some(Command::RowUp),
        KeyCode::Char('j') | KeyCode::Down => Some(Command::RowDown),

        KeyCode::Char('a') | KeyCode::Char('n') => Some(Command::NewTask),
        KeyCode::Char('e') | KeyCode::Enter => Some(Command::EditTask),
        KeyCode::Char('d') => Some(Command::DeleteTask),
        KeyCode::Char('H') => Some(Command::MoveTaskLeft),
        KeyCode::Char('L') => Some(Command::MoveTaskRight),

        KeyCode::Char('1') if view == View::Board => Some(Command::SendTo(TaskStatus::Todo)),
        KeyCode::Char('2') if view == View::Board => Some(Command::SendTo(TaskStatus::InProgress)),
        KeyCode::Char('3') if view == View::Board => Some(Command::SendTo(TaskStatus::Done)),

        KeyCode::Char('1') if view == View::Matrix => {
            Some(Command::ToggleFilter(TaskStatus::Todo))
        }
        KeyCode::Char('2') if view == View::Matrix => {
            Some(Command::ToggleFilter(TaskStatus::InProgress))
        }
        KeyCode::Char('3') if view == View::Matrix => {
            Some(Command::ToggleFilter(TaskStatus::Done))
        }
        KeyCode::Char('u') if view == View::Matrix => Some(Command::CycleThreshold),
        KeyCode::Char('+') if view == View::Matrix => Some(Command::ThresholdUp),
        KeyCode::Char('-') if view == View::Matrix => Some(Command::ThresholdDown),
        KeyCode::Char('t') if view == View::Matrix => Some(Command::EnterThresholdInput),

        KeyCode::Char('?') => Some(Command::ShowHelp),

        _ => None,
    }
}

/// Execute a command against the app.
fn execute_command(app: &mut App, cmd: Command) {
    match cmd {
        Command::Quit => {}

        Command::ShowMatrix => app.switch_view(View::Matrix),
        Command::ShowBoard => app.switch_view(View::Board),
        Command::ToggleView => app.toggle_view(),

        Command::ColumnLeft => app.select_column(-1),
        Command::ColumnRight => app.select_column(1),
        Command::RowUp => app.select_row(-1),
        Command::RowDown => app.select_row(1),

        Command::NewTask => app.open_new_task_form(),
        Command::EditTask => app.open_edit_form(),
        Command::DeleteTask => app.request_delete(),
        Command::MoveTaskLeft => app.move_selected_by(-1),
        Command::MoveTaskRight => app.move_selected_by(1),
        Command::SendTo(status) => app.move_selected(status),

        Command::ToggleFilter(status) => app.toggle_status_filter(status),
        Command::CycleThreshold => app.cycle_threshold(),
        Command::ThresholdUp => app.adjust_threshold(1),
        Command::ThresholdDown => app.adjust_threshold(-1),
        Command::EnterThresholdInput => {
            app.threshold_input.clear();
            app.mode = Mode::ThresholdInput;
        }

        Command::ShowHelp => app.mode = Mode::Help,
    }
}

fn handle_form_mode(app: &mut App, key: KeyEvent) -> bool {
    let action = match app.form.as_mut() {
        Some(form) => form.handle_key(key),
        None => {
            app.mode = Mode::Normal;
            return true;
        }
    };
    match action {
        FormAction::Submit => app.submit_form(),
        FormAction::Cancel => app.close_form(),
        FormAction::Continue => {}
    }
    true
}

fn handle_confirm_mode(app: &mut App, key: KeyEvent) -> bool {
    match key.code {
        KeyCode::Char('y') | KeyCode::Char('Y') | KeyCode::Enter => app.confirm_delete(),
        KeyCode::Char('n') | KeyCode::Char('N') | KeyCode::Esc => app.cancel_delete(),
        _ => {}
    }
    true
}

fn handle_help_mode(app: &mut App, key: KeyEvent) -> bool {
    match key.code {
        KeyCode::Char('q') | KeyCode::Char('?') | KeyCode::Esc | KeyCode::Enter => {
            app.mode = Mode::Normal;
        }
        _ => {}
    }
    true
}

fn handle_threshold_input_mode(app: &mut App, key: KeyEvent) -> bool {
    match key.code {
        KeyCode::Esc => {
            app.threshold_input.clear();
            app.mode = Mode::Normal;
        }
        KeyCode::Enter => app.submit_threshold_input(),
        KeyCode::Backspace => {
            app.threshold_input.pop();
        }
        // Digits only, mirroring the numeric input box this replaces.
        KeyCode::Char(c) if c.is_ascii_digit() => {
            if app.threshold_input.len() < 4 {
                app.threshold_input.push(c);
            }
        }
        _ => {}
    }
    true
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::KeyModifiers;

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    #[test]
    fn test_digit_keys_depend_on_view() {
        assert_eq!(
            match_key(View::Board, key(KeyCode::Char('2'))),
            Some(Command::SendTo(TaskStatus::InProgress))
        );
        assert_eq!(
            match_key(View::Matrix, key(KeyCode::Char('2'))),
            Some(Command::ToggleFilter(TaskStatus::InProgress))
        );
    }

    #[test]
    fn test_matrix_only_bindings() {
        assert_eq!(
            match_key(View::Matrix, key(KeyCode::Char('u'))),
            Some(Command::CycleThreshold)
        );
        assert_eq!(match_key(View::Board, key(KeyCode::Char('u'))), None);
        assert_eq!(
            match_key(View::Matrix, key(KeyCode::Char('t'))),
            Some(Command::EnterThresholdInput)
        );
    }

    #[test]
    fn test_navigation_keys() {
        assert_eq!(
            match_key(View::Board, key(KeyCode::Char('j'))),
            Some(Command::RowDown)
        );
        assert_eq!(
            match_key(View::Board, key(KeyCode::Left)),
            Some(Command::ColumnLeft)
        );
        assert_eq!(
            match_key(View::Board, key(KeyCode::Char('L'))),
            Some(Command::MoveTaskRight)
        );
        assert_eq!(match_key(View::Board, key(KeyCode::Char('x'))), None);
    }

    #[test]
    fn test_quit_key() {
        assert_eq!(
            match_key(View::Matrix, key(KeyCode::Char('q'))),
            Some(Command::Quit)
        );
    }
}
