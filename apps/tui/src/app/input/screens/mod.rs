use crate::app::state::{App, AppScreen};
use crossterm::event::KeyCode;

mod about;
mod dashboard;
mod help;

pub fn dispatch_input(app: &mut App, key: KeyCode) {
    if app.searching {
        dashboard::handle_search_input(app, key);
        return;
    }

    if help::handle_help_toggle(app, key) {
        return;
    }

    if handle_global_keys(app, key) {
        return;
    }

    match app.screen {
        AppScreen::Dashboard => dashboard::handle_dashboard_input(app, key),
        AppScreen::About => about::handle_about_input(app, key),
    }
}

fn handle_global_keys(app: &mut App, key: KeyCode) -> bool {
    match key {
        KeyCode::Char('q') => {
            app.running = false;
            true
        }
        KeyCode::Char('a') => {
            app.screen = match app.screen {
                AppScreen::Dashboard => AppScreen::About,
                AppScreen::About => AppScreen::Dashboard,
            };
            true
        }
        KeyCode::Char('r') => {
            app.request_reload();
            true
        }
        _ => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::state::Focus;
    use cancer_risk_dashboard::config::{AppConfig, DataPaths};
    use std::path::PathBuf;

    fn app() -> App {
        App::new(AppConfig {
            data: DataPaths::in_dir("missing"),
            log_file: PathBuf::from("test.log"),
            debug: false,
        })
    }

    #[test]
    fn quit_and_about_are_global() {
        let mut app = app();
        dispatch_input(&mut app, KeyCode::Char('a'));
        assert_eq!(app.screen, AppScreen::About);
        dispatch_input(&mut app, KeyCode::Esc);
        assert_eq!(app.screen, AppScreen::Dashboard);
        dispatch_input(&mut app, KeyCode::Char('q'));
        assert!(!app.running);
    }

    #[test]
    fn help_popup_swallows_keys() {
        let mut app = app();
        dispatch_input(&mut app, KeyCode::Char('?'));
        assert!(app.show_help);
        dispatch_input(&mut app, KeyCode::Char('q'));
        assert!(app.running);
        dispatch_input(&mut app, KeyCode::Esc);
        assert!(!app.show_help);
    }

    #[test]
    fn search_captures_shortcut_letters() {
        let mut app = app();
        dispatch_input(&mut app, KeyCode::Char('/'));
        assert!(app.searching);
        assert_eq!(app.focus, Focus::RiskPicker);

        for ch in "alq".chars() {
            dispatch_input(&mut app, KeyCode::Char(ch));
        }
        assert!(app.running);
        assert_eq!(app.search_query, "alq");

        dispatch_input(&mut app, KeyCode::Esc);
        assert!(!app.searching);
        assert!(app.search_query.is_empty());
    }

    #[test]
    fn tab_cycles_focus() {
        let mut app = app();
        dispatch_input(&mut app, KeyCode::Tab);
        assert_eq!(app.focus, Focus::RiskPicker);
        dispatch_input(&mut app, KeyCode::Tab);
        dispatch_input(&mut app, KeyCode::Tab);
        assert_eq!(app.focus, Focus::Heatmap);
    }
}
