// UI module for the cancer risk dashboard
// Handles all rendering

pub mod screens;
pub mod widgets;

use crate::app::{App, AppScreen};
use ratatui::Frame;

pub fn ui(app: &App, f: &mut Frame<'_>) {
    match app.screen {
        AppScreen::Dashboard => screens::dashboard::render_dashboard(app, f),
        AppScreen::About => screens::about::render_about(f),
    }

    if app.show_help {
        screens::help::render_help_popup(f);
    }
}
