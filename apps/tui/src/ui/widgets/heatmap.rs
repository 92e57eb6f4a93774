use crate::app::App;
use crate::ui::widgets::notice::render_notice;
use crate::ui::widgets::palette::{scale_color, text_color, NO_DATA};
use crate::ui::widgets::tables::{truncate, visible_rows};
use cancer_risk_dashboard::charts::HeatmapChart;
use ratatui::layout::{Constraint, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::Span;
use ratatui::widgets::{Block, Borders, Cell, Row, Table};
use ratatui::Frame;

const TITLE: &str = "Cancer Types vs Risk Factors";
const VALUE_WIDTH: u16 = 9;

pub fn render_heatmap(app: &App, f: &mut Frame<'_>, area: Rect, focused: bool) {
    match app.pass.as_ref().map(|pass| &pass.heatmap) {
        Some(Ok(chart)) => render_grid(app, chart, f, area, focused),
        Some(Err(e)) => render_notice(f, area, TITLE, e),
        None => {}
    }
}

fn render_grid(app: &App, chart: &HeatmapChart, f: &mut Frame<'_>, area: Rect, focused: bool) {
    let border = if focused { Color::Cyan } else { Color::Gray };
    let block = Block::default()
        .title(format!(" {TITLE} (Enter on a cell to inspect a cancer) "))
        .borders(Borders::ALL)
        .border_style(Style::default().fg(border));

    let name_width = chart
        .cancers
        .iter()
        .map(|cancer| cancer.chars().count())
        .max()
        .unwrap_or(0)
        .clamp(12, 28);

    // Header, borders, and one spare line
    let visible = usize::from(area.height.saturating_sub(4)).max(1);
    let rows_window = visible_rows(chart.cancers.len(), visible, app.heatmap_row);

    #[allow(clippy::cast_possible_truncation)]
    let columns_fit =
        usize::from(area.width.saturating_sub(name_width as u16 + 4) / (VALUE_WIDTH + 1)).max(1);
    let columns_window = visible_rows(chart.risk_factors.len(), columns_fit, app.heatmap_column);

    let header = Row::new(
        std::iter::once(Cell::from(chart.y_title)).chain(
            chart.risk_factors[columns_window.clone()]
                .iter()
                .map(|risk| Cell::from(truncate(risk, usize::from(VALUE_WIDTH)))),
        ),
    )
    .style(
        Style::default()
            .fg(Color::Yellow)
            .add_modifier(Modifier::BOLD),
    );

    let rows = chart.cancers[rows_window.clone()]
        .iter()
        .enumerate()
        .map(|(offset, cancer)| {
            let row_index = rows_window.start + offset;
            let selected = chart.selected_cancer.as_deref() == Some(cancer.as_str());
            let marker = if selected { "> " } else { "  " };
            let name_style = if selected {
                Style::default()
                    .fg(Color::Cyan)
                    .add_modifier(Modifier::BOLD)
            } else {
                Style::default().fg(Color::White)
            };

            let name = Cell::from(Span::styled(
                format!("{marker}{}", truncate(cancer, name_width)),
                name_style,
            ));

            let values = columns_window.clone().map(|column| {
                let risk = &chart.risk_factors[column];
                let under_cursor =
                    focused && row_index == app.heatmap_row && column == app.heatmap_column;
                value_cell(chart, cancer, risk, under_cursor)
            });

            Row::new(std::iter::once(name).chain(values))
        });

    #[allow(clippy::cast_possible_truncation)]
    let widths = std::iter::once(Constraint::Length(name_width as u16 + 2))
        .chain(std::iter::repeat(Constraint::Length(VALUE_WIDTH)).take(columns_window.len()));

    let table = Table::new(rows, widths)
        .header(header)
        .block(block)
        .column_spacing(1);
    f.render_widget(table, area);
}

fn value_cell<'a>(chart: &HeatmapChart, cancer: &str, risk: &str, under_cursor: bool) -> Cell<'a> {
    let (text, mut style) = match (chart.value(cancer, risk), chart.domain.as_ref()) {
        (Some(val), Some(domain)) => (
            format!("{val:>8.2}"),
            Style::default()
                .bg(scale_color(domain, val))
                .fg(text_color(domain, val)),
        ),
        _ => ("       -".to_string(), Style::default().fg(NO_DATA)),
    };

    if under_cursor {
        style = style.add_modifier(Modifier::REVERSED | Modifier::BOLD);
    }
    Cell::from(text).style(style)
}
