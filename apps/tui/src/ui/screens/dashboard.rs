use crate::app::{App, Focus};
use crate::ui::widgets::choropleth::render_choropleth;
use crate::ui::widgets::filters::{render_category_caption, render_risk_picker, render_time_picker};
use crate::ui::widgets::heatmap::render_heatmap;
use crate::ui::widgets::notice::render_notice;
use crate::ui::widgets::trend::render_trend;
use ratatui::layout::{Alignment, Constraint, Direction, Layout, Margin, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line as TextLine, Span, Text};
use ratatui::widgets::{Block, Borders, Paragraph, Wrap};
use ratatui::Frame;

pub fn render_dashboard(app: &App, f: &mut Frame<'_>) {
    let layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // Title
            Constraint::Length(1), // Filter summary
            Constraint::Min(12),   // Sidebar and charts
            Constraint::Length(1), // Data information
            Constraint::Length(3), // Status
            Constraint::Length(1), // Shortcuts hint
        ])
        .split(f.area().inner(Margin::new(1, 0)));

    render_title_section(f, layout[0]);
    render_info_line(app, f, layout[1]);

    let body = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Length(40), Constraint::Min(40)])
        .split(layout[2]);
    render_sidebar(app, f, body[0]);
    render_views(app, f, body[1]);

    render_data_info(app, f, layout[3]);
    render_status_section(app, f, layout[4]);
    render_shortcuts(f, layout[5]);
}

fn render_title_section(f: &mut Frame<'_>, area: Rect) {
    let title_block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Cyan));

    let title = Paragraph::new(TextLine::from(vec![
        Span::styled(
            "Cancer Risk Factors ",
            Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
        ),
        Span::styled(
            "Dashboard",
            Style::default()
                .fg(Color::White)
                .add_modifier(Modifier::BOLD),
        ),
        Span::styled(
            "  environmental, behavioral and metabolic risks across states and time",
            Style::default().fg(Color::Gray),
        ),
    ]))
    .block(title_block);
    f.render_widget(title, area);
}

fn render_info_line(app: &App, f: &mut Frame<'_>, area: Rect) {
    let Some(pass) = app.pass.as_ref() else {
        return;
    };

    let mut spans = vec![Span::styled(
        pass.info_line(),
        Style::default()
            .fg(Color::LightBlue)
            .add_modifier(Modifier::BOLD),
    )];
    if let Some(cancer) = pass.selected_cancer() {
        spans.push(Span::raw(" | "));
        spans.push(Span::styled(
            format!("Cancer: {cancer}"),
            Style::default().fg(Color::Cyan),
        ));
    }
    f.render_widget(Paragraph::new(TextLine::from(spans)), area);
}

fn render_sidebar(app: &App, f: &mut Frame<'_>, area: Rect) {
    let sidebar = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Min(6),
            Constraint::Length(2),
            Constraint::Length(6),
        ])
        .split(area);

    render_risk_picker(app, f, sidebar[0]);
    render_category_caption(app, f, sidebar[1]);
    render_time_picker(app, f, sidebar[2]);
}

fn render_views(app: &App, f: &mut Frame<'_>, area: Rect) {
    if let Some(error) = app.load_error.as_ref() {
        render_notice(f, area, "Error loading data", error);
        return;
    }

    if app.pass.is_none() {
        let loading = Paragraph::new("Loading data...")
            .block(Block::default().borders(Borders::ALL))
            .alignment(Alignment::Center);
        f.render_widget(loading, area);
        return;
    }

    let views = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
        .split(area);
    render_heatmap(app, f, views[0], app.focus == Focus::Heatmap);

    let details = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
        .split(views[1]);
    render_choropleth(app, f, details[0]);
    render_trend(app, f, details[1]);
}

fn render_data_info(app: &App, f: &mut Frame<'_>, area: Rect) {
    let Some(summary) = app.summary else {
        return;
    };

    let deaths = summary
        .deaths_rows
        .map_or_else(String::new, |rows| format!(" | Deaths rows: {rows}"));
    let line = format!(
        "Risk rows: {}{deaths} | Risk factors: {} | Cancer types: {} | States: {}",
        summary.risk_rows, summary.risk_factors, summary.cancer_types, summary.states
    );
    f.render_widget(
        Paragraph::new(Span::styled(line, Style::default().fg(Color::Gray))),
        area,
    );
}

fn render_status_section(app: &App, f: &mut Frame<'_>, area: Rect) {
    let status_block = Block::default()
        .title(format!(" Status | Focus: {} ", app.focus.label()))
        .title_style(Style::default().fg(Color::Yellow))
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Yellow));

    let style = if app.status_message.starts_with("Error") {
        Style::default().fg(Color::Red)
    } else {
        Style::default().fg(Color::Green)
    };

    let status_paragraph = Paragraph::new(Text::from(Span::styled(
        app.status_message.as_str(),
        style,
    )))
    .block(status_block)
    .wrap(Wrap { trim: true });
    f.render_widget(status_paragraph, area);
}

fn render_shortcuts(f: &mut Frame<'_>, area: Rect) {
    let key = Style::default().fg(Color::Yellow);
    let text = Style::default().fg(Color::Gray);
    let shortcuts = [
        ("Tab", "focus"),
        ("Enter", "select"),
        ("/", "search"),
        ("t", "year/range"),
        ("r", "reload"),
        ("a", "about"),
        ("?", "help"),
        ("q", "quit"),
    ];

    let spans = shortcuts
        .iter()
        .flat_map(|(k, action)| {
            [
                Span::styled(*k, key),
                Span::styled(format!(" {action}  "), text),
            ]
        })
        .collect::<Vec<_>>();

    f.render_widget(
        Paragraph::new(TextLine::from(spans)).alignment(Alignment::Center),
        area,
    );
}
