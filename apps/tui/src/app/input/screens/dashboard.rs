use crate::app::input::helpers::{wrap_decrement, wrap_increment};
use crate::app::state::{App, Focus};
use cancer_risk_dashboard::RiskCategory;
use crossterm::event::KeyCode;

pub fn handle_dashboard_input(app: &mut App, key: KeyCode) {
    match key {
        KeyCode::Tab => app.focus = app.focus.next(),
        KeyCode::Char('e') => app.select_category(RiskCategory::Environmental),
        KeyCode::Char('b') => app.select_category(RiskCategory::Behavioral),
        KeyCode::Char('m') => app.select_category(RiskCategory::Metabolic),
        KeyCode::Char('t') => app.toggle_time_mode(),
        KeyCode::Char('/') => {
            app.focus = Focus::RiskPicker;
            app.searching = true;
            app.search_query.clear();
            app.risk_cursor = 0;
        }
        _ => match app.focus {
            Focus::Heatmap => handle_heatmap_input(app, key),
            Focus::RiskPicker => handle_risk_picker_input(app, key),
            Focus::TimePicker => handle_time_picker_input(app, key),
        },
    }
}

fn handle_heatmap_input(app: &mut App, key: KeyCode) {
    match key {
        KeyCode::Up => app.move_heatmap_cursor(-1, 0),
        KeyCode::Down => app.move_heatmap_cursor(1, 0),
        KeyCode::Left => app.move_heatmap_cursor(0, -1),
        KeyCode::Right => app.move_heatmap_cursor(0, 1),
        KeyCode::Enter | KeyCode::Char(' ') => app.click_heatmap_cell(),
        _ => {}
    }
}

fn handle_risk_picker_input(app: &mut App, key: KeyCode) {
    let len = app.risk_picker_entries().len();
    match key {
        KeyCode::Up => app.risk_cursor = wrap_decrement(app.risk_cursor, len),
        KeyCode::Down => app.risk_cursor = wrap_increment(app.risk_cursor, len),
        KeyCode::Enter | KeyCode::Char(' ') => app.toggle_risk_at_cursor(),
        KeyCode::Esc => {
            app.search_query.clear();
            app.risk_cursor = 0;
        }
        _ => {}
    }
}

fn handle_time_picker_input(app: &mut App, key: KeyCode) {
    match key {
        KeyCode::Left => app.move_time(-1),
        KeyCode::Right => app.move_time(1),
        KeyCode::Up | KeyCode::Down if app.is_range_mode() => app.switch_handle(),
        _ => {}
    }
}

/// Keys while the risk picker search box is open. Letters go to the query.
pub fn handle_search_input(app: &mut App, key: KeyCode) {
    match key {
        KeyCode::Esc => {
            app.searching = false;
            app.search_query.clear();
        }
        KeyCode::Enter => app.searching = false,
        KeyCode::Backspace => {
            app.search_query.pop();
        }
        KeyCode::Char(ch) => app.search_query.push(ch),
        KeyCode::Up | KeyCode::Down => {
            handle_risk_picker_input(app, key);
            return;
        }
        _ => return,
    }
    app.risk_cursor = 0;
}
