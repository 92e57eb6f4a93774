use crate::app::{App, Focus, TimeHandle};
use crate::ui::widgets::palette::category_color;
use crate::ui::widgets::tables::visible_rows;
use cancer_risk_dashboard::domain::{categories_for, AVAILABLE_YEARS};
use cancer_risk_dashboard::{RiskCategory, TimeSelection};
use ratatui::layout::Rect;
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line as TextLine, Span, Text};
use ratatui::widgets::{Block, Borders, Paragraph, Wrap};
use ratatui::Frame;

fn panel(title: &str, focused: bool) -> Block<'static> {
    let color = if focused { Color::Cyan } else { Color::Gray };
    Block::default()
        .title(format!(" {title} "))
        .borders(Borders::ALL)
        .border_style(Style::default().fg(color))
}

pub fn render_risk_picker(app: &App, f: &mut Frame<'_>, area: Rect) {
    let focused = app.focus == Focus::RiskPicker;
    let entries = app.risk_picker_entries();
    let mut lines = Vec::new();

    if app.searching || !app.search_query.is_empty() {
        let cursor = if app.searching { "_" } else { "" };
        lines.push(TextLine::from(vec![
            Span::styled("/ ", Style::default().fg(Color::Yellow)),
            Span::styled(
                format!("{}{cursor}", app.search_query),
                Style::default().fg(Color::White),
            ),
        ]));
    }

    let visible = usize::from(area.height.saturating_sub(2))
        .saturating_sub(lines.len())
        .max(1);
    let window = visible_rows(entries.len(), visible, app.risk_cursor);

    for index in window {
        let risk = entries[index];
        let checked = app.selected_risks().contains(risk);
        let color = RiskCategory::of(risk).map_or(Color::White, category_color);
        let mut style = Style::default().fg(color);
        if focused && index == app.risk_cursor {
            style = style.add_modifier(Modifier::REVERSED);
        }
        lines.push(TextLine::from(vec![
            Span::raw(if checked { "[x] " } else { "[ ] " }),
            Span::styled(risk, style),
        ]));
    }

    if entries.is_empty() {
        lines.push(TextLine::from(Span::styled(
            "No risk factor matches",
            Style::default().fg(Color::Gray),
        )));
    }

    let title = format!("Risk Factors ({} selected)", app.selected_risks().len());
    f.render_widget(Paragraph::new(lines).block(panel(&title, focused)), area);
}

/// "Categories: Environmental, Behavioral" caption under the picker.
pub fn render_category_caption(app: &App, f: &mut Frame<'_>, area: Rect) {
    let categories = categories_for(app.selected_risks());
    let mut spans = vec![Span::styled("Categories: ", Style::default().fg(Color::Gray))];
    if categories.is_empty() {
        spans.push(Span::styled("none", Style::default().fg(Color::Gray)));
    }
    for (i, category) in categories.into_iter().enumerate() {
        if i > 0 {
            spans.push(Span::raw(", "));
        }
        spans.push(Span::styled(
            category.label(),
            Style::default().fg(category_color(category)),
        ));
    }

    let hint = TextLine::from(Span::styled(
        "e/b/m select a whole category",
        Style::default().fg(Color::DarkGray),
    ));
    let paragraph = Paragraph::new(Text::from(vec![TextLine::from(spans), hint]))
        .wrap(Wrap { trim: true });
    f.render_widget(paragraph, area);
}

pub fn render_time_picker(app: &App, f: &mut Frame<'_>, area: Rect) {
    let focused = app.focus == Focus::TimePicker;
    let time = app.time_selection();

    let mode = if time.is_range() {
        "Mode: Year range (t: single year)"
    } else {
        "Mode: Single year (t: year range)"
    };

    let years = AVAILABLE_YEARS
        .iter()
        .flat_map(|year| [year_span(app, time, *year), Span::raw(" ")])
        .collect::<Vec<_>>();

    let mut lines = vec![
        TextLine::from(Span::styled(mode, Style::default().fg(Color::Gray))),
        TextLine::from(years),
        TextLine::from(Span::styled(
            time.label(),
            Style::default()
                .fg(Color::White)
                .add_modifier(Modifier::BOLD),
        )),
    ];
    if time.is_range() {
        let handle = match app.active_handle {
            TimeHandle::Start => "start",
            TimeHandle::End => "end",
        };
        lines.push(TextLine::from(Span::styled(
            format!("Moving {handle} year (Up/Down to switch)"),
            Style::default().fg(Color::DarkGray),
        )));
    }

    f.render_widget(
        Paragraph::new(lines)
            .block(panel("Time Period", focused))
            .wrap(Wrap { trim: true }),
        area,
    );
}

fn year_span(app: &App, time: TimeSelection, year: i32) -> Span<'static> {
    let short = format!("'{:02}", year % 100);
    let active = match time {
        TimeSelection::Year { year: selected } => year == selected,
        TimeSelection::Range { start, end } => match app.active_handle {
            TimeHandle::Start => year == start,
            TimeHandle::End => year == end,
        },
    };

    let mut style = if time.contains(year) {
        Style::default().fg(Color::Black).bg(Color::Cyan)
    } else {
        Style::default().fg(Color::Gray)
    };
    if active {
        style = style.add_modifier(Modifier::BOLD | Modifier::UNDERLINED);
    }
    Span::styled(short, style)
}
