use cancer_risk_dashboard::DashboardError;
use ratatui::layout::{Alignment, Rect};
use ratatui::style::{Color, Style};
use ratatui::text::{Line as TextLine, Span, Text};
use ratatui::widgets::{Block, Borders, Paragraph, Wrap};
use ratatui::Frame;

/// Color for the guidance that replaces a view.
pub const fn notice_color(error: &DashboardError) -> Color {
    match error {
        DashboardError::DataUnavailable { .. } => Color::Red,
        DashboardError::NoMatchingData { .. } | DashboardError::EmptyRiskSelection => {
            Color::Yellow
        }
        DashboardError::InvalidSelection { .. } => Color::Gray,
    }
}

/// Draws guidance in place of a view that has nothing to show.
pub fn render_notice(f: &mut Frame<'_>, area: Rect, title: &str, error: &DashboardError) {
    let color = notice_color(error);
    let block = Block::default()
        .title(format!(" {title} "))
        .borders(Borders::ALL)
        .border_style(Style::default().fg(color));

    let text = Text::from(vec![
        TextLine::from(""),
        TextLine::from(Span::styled(error.guidance(), Style::default().fg(color))),
    ]);

    let paragraph = Paragraph::new(text)
        .block(block)
        .alignment(Alignment::Center)
        .wrap(Wrap { trim: true });
    f.render_widget(paragraph, area);
}
