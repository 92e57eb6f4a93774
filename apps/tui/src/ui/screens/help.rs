use crate::ui::widgets::popup::{centered_rect, render_popup};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line as TextLine, Span};
use ratatui::Frame;

const SHORTCUTS: &[(&str, &[(&str, &str)])] = &[
    (
        "General",
        &[
            ("Tab", "Cycle focus: heatmap, risk factors, time period"),
            ("? / F1", "Toggle this help"),
            ("a", "Toggle the About page"),
            ("r", "Reload the data files"),
            ("q", "Quit"),
        ],
    ),
    (
        "Risk factors",
        &[
            ("e / b / m", "Select every Environmental / Behavioral / Metabolic factor"),
            ("Up / Down", "Move through the list"),
            ("Space / Enter", "Toggle the factor under the cursor"),
            ("/", "Fuzzy search (Enter keeps the filter, Esc clears it)"),
        ],
    ),
    (
        "Time period",
        &[
            ("t", "Switch between a single year and a year range"),
            ("Left / Right", "Move the year, or the active range handle"),
            ("Up / Down", "Switch between the start and end handle"),
        ],
    ),
    (
        "Heatmap",
        &[
            ("Arrows", "Move the cell cursor"),
            ("Enter", "Show the map and trend for the cancer in that row"),
        ],
    ),
];

fn build_help_lines() -> Vec<TextLine<'static>> {
    let mut lines = Vec::new();
    for (section, keys) in SHORTCUTS {
        lines.push(TextLine::from(Span::styled(
            *section,
            Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
        )));
        for (key, action) in *keys {
            lines.push(TextLine::from(vec![
                Span::styled(format!("  {key:<14}"), Style::default().fg(Color::Yellow)),
                Span::raw(*action),
            ]));
        }
        lines.push(TextLine::from(""));
    }
    lines
}

pub fn render_help_popup(f: &mut Frame<'_>) {
    let area = centered_rect(70, 80, f.area());
    render_popup(f, area, "Help & Keyboard Shortcuts", build_help_lines());
}
