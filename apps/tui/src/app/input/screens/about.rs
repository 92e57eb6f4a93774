use crate::app::state::{App, AppScreen};
use crossterm::event::KeyCode;

pub fn handle_about_input(app: &mut App, key: KeyCode) {
    if matches!(key, KeyCode::Esc | KeyCode::Backspace | KeyCode::Enter) {
        app.screen = AppScreen::Dashboard;
    }
}
