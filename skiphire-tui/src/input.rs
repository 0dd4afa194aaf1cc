use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use crate::app::App;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Action {
    None,
    Quit,
    /// Re-run the whole catalog fetch after a failure
    Retry,
    /// Hand the selection over to the permit check step
    Continue,
    Back,
}

pub(crate) fn handle_key_event(key: KeyEvent, app: &mut App) -> Action {
    use KeyCode::{Backspace, Char, Down, Enter, Esc, Left, Right, Up};

    // Global quit shortcuts
    if key.code == Char('c') && key.modifiers.contains(KeyModifiers::CONTROL) {
        return Action::Quit;
    }
    if key.code == Char('q') && key.modifiers.is_empty() {
        return Action::Quit;
    }

    if app.catalog.error().is_some() {
        return match key.code {
            Char('r') | Enter => Action::Retry,
            _ => Action::None,
        };
    }

    if app.catalog.is_loading() {
        return Action::None;
    }

    let summary_open = app.summary_open();
    let mut action = Action::None;

    match key.code {
        Left | Char('h') => app.move_cursor_left(),
        Right | Char('l') => app.move_cursor_right(),
        Up | Char('k') => app.move_cursor_up(),
        Down | Char('j') => app.move_cursor_down(),
        Char(' ') => app.activate_cursor(),
        Enter | Char('c') if summary_open => action = Action::Continue,
        Enter => app.activate_cursor(),
        Backspace | Char('b') if summary_open => action = Action::Back,
        Esc | Char('x') if summary_open => app.dismiss(),
        _ => {}
    }
    action
}
