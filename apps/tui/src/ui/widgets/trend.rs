use crate::app::App;
use crate::ui::widgets::notice::render_notice;
use crate::ui::widgets::palette::SERIES_COLORS;
use cancer_risk_dashboard::charts::TrendChart;
use ratatui::layout::{Alignment, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::symbols::Marker;
use ratatui::text::Span;
use ratatui::widgets::{Axis, Block, Borders, Chart, Dataset, GraphType, LegendPosition};
use ratatui::Frame;

const TITLE: &str = "Temporal Distribution";

pub fn render_trend(app: &App, f: &mut Frame<'_>, area: Rect) {
    match app.pass.as_ref().map(|pass| &pass.trend) {
        Some(Ok(chart)) => render_lines(chart, f, area),
        Some(Err(e)) => render_notice(f, area, TITLE, e),
        None => {}
    }
}

fn render_lines(chart: &TrendChart, f: &mut Frame<'_>, area: Rect) {
    // A lone year has nothing to connect
    let graph_type = if chart.series.iter().all(|series| series.points.len() < 2) {
        GraphType::Scatter
    } else {
        GraphType::Line
    };

    let datasets = chart
        .series
        .iter()
        .zip(SERIES_COLORS.iter().cycle())
        .map(|(series, color)| {
            Dataset::default()
                .name(series.rei_name.clone())
                .marker(Marker::Braille)
                .graph_type(graph_type)
                .style(Style::default().fg(*color))
                .data(&series.points)
        })
        .collect::<Vec<_>>();

    let x_labels = chart
        .year_labels()
        .into_iter()
        .map(|year| Span::raw(year.to_string()))
        .collect::<Vec<_>>();

    let [low, high] = chart.val_bounds;
    let y_labels = vec![
        Span::raw(format!("{low:.1}")),
        Span::raw(format!("{:.1}", (low + high) / 2.0)),
        Span::raw(format!("{high:.1}")),
    ];

    let title = chart.title.replace('\n', " | ");
    let block = Block::default()
        .title(Span::styled(
            format!(" {title} "),
            Style::default()
                .fg(Color::Magenta)
                .add_modifier(Modifier::BOLD),
        ))
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Magenta));

    let widget = Chart::new(datasets)
        .block(block)
        .legend_position(Some(LegendPosition::TopRight))
        .x_axis(
            Axis::default()
                .title("Year")
                .style(Style::default().fg(Color::Gray))
                .bounds(chart.year_bounds)
                .labels(x_labels)
                .labels_alignment(Alignment::Center),
        )
        .y_axis(
            Axis::default()
                .title(chart.y_title)
                .style(Style::default().fg(Color::Gray))
                .bounds(chart.val_bounds)
                .labels(y_labels),
        );

    f.render_widget(widget, area);
}
