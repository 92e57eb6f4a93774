use crate::app::App;
use crate::ui::widgets::notice::render_notice;
use crate::ui::widgets::palette::{scale_color, text_color, NO_DATA};
use cancer_risk_dashboard::charts::{ChoroplethChart, ValueDomain};
use cancer_risk_dashboard::geo::{StateTile, GRID_COLUMNS, GRID_ROWS, US_TILES};
use ratatui::layout::{Alignment, Constraint, Layout, Rect};
use ratatui::style::{Color, Style};
use ratatui::text::{Line as TextLine, Span};
use ratatui::widgets::{Block, Borders, Paragraph};
use ratatui::Frame;

const TITLE: &str = "Geographic Distribution";

pub fn render_choropleth(app: &App, f: &mut Frame<'_>, area: Rect) {
    match app.pass.as_ref().map(|pass| &pass.map) {
        Some(Ok(chart)) => render_tiles(chart, f, area),
        Some(Err(e)) => render_notice(f, area, TITLE, e),
        None => {}
    }
}

fn render_tiles(chart: &ChoroplethChart, f: &mut Frame<'_>, area: Rect) {
    let unplaced = chart.states.iter().filter(|state| state.tile.is_none()).count();
    let mut title = format!(" {TITLE}: {} ", chart.cancer);
    if unplaced > 0 {
        title.push_str(&format!("({unplaced} not on map) "));
    }

    let block = Block::default()
        .title(title)
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Green));
    let inner = block.inner(area);
    f.render_widget(block, area);

    let [grid_area, legend_area] =
        Layout::vertical([Constraint::Min(GRID_ROWS), Constraint::Length(1)]).areas(inner);

    let tile_width = (grid_area.width / GRID_COLUMNS).max(1);
    let tile_height = (grid_area.height / GRID_ROWS).max(1);

    for tile in &US_TILES {
        let rect = Rect {
            x: grid_area.x + tile.column * tile_width,
            y: grid_area.y + tile.row * tile_height,
            width: tile_width.saturating_sub(1).max(1),
            height: tile_height,
        };
        if rect.right() > grid_area.right() || rect.bottom() > grid_area.bottom() {
            continue;
        }
        render_tile(chart, tile, f, rect);
    }

    f.render_widget(legend(chart.legend_title, chart.domain.as_ref()), legend_area);
}

fn render_tile(chart: &ChoroplethChart, tile: &StateTile, f: &mut Frame<'_>, rect: Rect) {
    let value = chart.state_for_tile(tile.fips).map(|state| state.val);
    let style = match (value, chart.domain.as_ref()) {
        (Some(val), Some(domain)) => Style::default()
            .bg(scale_color(domain, val))
            .fg(text_color(domain, val)),
        _ => Style::default().bg(NO_DATA).fg(Color::Gray),
    };

    let mut lines = vec![TextLine::from(tile.abbreviation)];
    if rect.height > 1 {
        lines.push(TextLine::from(
            value.map_or_else(|| "-".to_string(), |val| format!("{val:.1}")),
        ));
    }

    let paragraph = Paragraph::new(lines)
        .style(style)
        .alignment(Alignment::Center);
    f.render_widget(paragraph, rect);
}

fn legend(title: &'static str, domain: Option<&ValueDomain>) -> Paragraph<'static> {
    let Some(domain) = domain else {
        return Paragraph::new(Span::styled(
            "No mappable states for the current filters",
            Style::default().fg(Color::Yellow),
        ));
    };

    let swatch = |val: f64| Span::styled("  ", Style::default().bg(scale_color(domain, val)));
    Paragraph::new(TextLine::from(vec![
        Span::raw(format!("{title}: ")),
        swatch(domain.min),
        Span::raw(format!(" {:.1}  ", domain.min)),
        swatch(domain.mid),
        Span::raw(format!(" {:.1}  ", domain.mid)),
        swatch(domain.max),
        Span::raw(format!(" {:.1}", domain.max)),
        Span::styled("  no data ", Style::default().fg(Color::Gray)),
        Span::styled("  ", Style::default().bg(NO_DATA)),
    ]))
}
