use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use crate::app::App;

/// Handle a key event: arrows (or vim keys) navigate, `q`/`Ctrl-C` quits.
pub fn handle_key_event(app: &mut App, key: KeyEvent) {
    match key.code {
        KeyCode::Char('q') => app.quit(),
        KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => app.quit(),
        KeyCode::Up | KeyCode::Char('k') => app.navigate_up(),
        KeyCode::Down | KeyCode::Char('j') => app.navigate_down(),
        KeyCode::Right | KeyCode::Char('l') | KeyCode::Enter => app.navigate_into(),
        KeyCode::Left | KeyCode::Char('h') => app.navigate_out(),
        _ => {}
    }
}
