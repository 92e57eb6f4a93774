use crate::cli::CliArgs;
use crate::ui::widgets::palette::category_color;
use cancer_risk_dashboard::RiskCategory;
use ratatui::layout::{Constraint, Layout, Margin};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line as TextLine, Span, Text};
use ratatui::widgets::{Block, Borders, Paragraph, Wrap};
use ratatui::Frame;

const DESCRIPTION: &str = "This dashboard explores how environmental, behavioral, and metabolic \
     risk factors contribute to cancer burden across the United States over time. Values are \
     DALY rates (Disability-Adjusted Life Years per 100k), a measure of overall disease burden.";

const CITATION: &[&str] = &[
    "Global Burden of Disease Collaborative Network.",
    "Global Burden of Disease Study 2023 (GBD 2023) Results.",
    "Seattle, United States: Institute for Health Metrics and Evaluation (IHME), 2024.",
    "Available from https://vizhub.healthdata.org/gbd-results/.",
];

fn heading(text: &'static str) -> TextLine<'static> {
    TextLine::from(Span::styled(
        text,
        Style::default()
            .fg(Color::Cyan)
            .add_modifier(Modifier::BOLD),
    ))
}

fn about_lines() -> Vec<TextLine<'static>> {
    let mut lines = vec![
        heading("Project Description"),
        TextLine::from(DESCRIPTION),
        TextLine::from(""),
        heading("Data Source"),
    ];
    lines.extend(CITATION.iter().map(|line| {
        TextLine::from(Span::styled(
            format!("  {line}"),
            Style::default().fg(Color::Gray),
        ))
    }));
    lines.push(TextLine::from(""));

    lines.push(heading("Risk Factor Categories"));
    for category in RiskCategory::ALL {
        lines.push(TextLine::from(Span::styled(
            category.label(),
            Style::default()
                .fg(category_color(category))
                .add_modifier(Modifier::BOLD),
        )));
        lines.push(TextLine::from(format!("  {}", category.factors().join(", "))));
    }
    lines.push(TextLine::from(""));

    lines.push(heading("How to Use"));
    lines.extend(
        [
            "1. Pick risk factors in the sidebar, or a whole category with e/b/m.",
            "2. Choose a single year or a year range in the time picker.",
            "3. Move over the heatmap and press Enter on a cancer type.",
            "4. Read the state map and the trend chart for that cancer.",
        ]
        .into_iter()
        .map(TextLine::from),
    );
    lines
}

pub fn render_about(f: &mut Frame<'_>) {
    let area = f.area().inner(Margin::new(2, 1));
    let [about_area, usage_area, hint_area] = Layout::vertical([
        Constraint::Min(10),
        Constraint::Percentage(35),
        Constraint::Length(1),
    ])
    .areas(area);

    let about = Paragraph::new(Text::from(about_lines()))
        .block(
            Block::default()
                .title(" About This Project ")
                .borders(Borders::ALL)
                .border_style(Style::default().fg(Color::Cyan)),
        )
        .wrap(Wrap { trim: false });
    f.render_widget(about, about_area);

    let usage = Paragraph::new(CliArgs::help_text())
        .block(
            Block::default()
                .title(" Command Line ")
                .borders(Borders::ALL)
                .border_style(Style::default().fg(Color::Gray)),
        )
        .style(Style::default().fg(Color::Gray));
    f.render_widget(usage, usage_area);

    f.render_widget(
        Paragraph::new(Span::styled(
            "Esc or a: back to the dashboard | q: quit",
            Style::default().fg(Color::DarkGray),
        )),
        hint_area,
    );
}
