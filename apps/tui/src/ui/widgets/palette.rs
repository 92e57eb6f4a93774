use cancer_risk_dashboard::charts::ValueDomain;
use cancer_risk_dashboard::RiskCategory;
use ratatui::style::Color;

const BLUE: (u8, u8, u8) = (19, 75, 133);
const NEUTRAL: (u8, u8, u8) = (241, 241, 241);
const ORANGE: (u8, u8, u8) = (171, 78, 4);

/// Line colors for trend series, cycled in order.
pub const SERIES_COLORS: [Color; 8] = [
    Color::Cyan,
    Color::LightRed,
    Color::LightGreen,
    Color::Yellow,
    Color::LightMagenta,
    Color::LightBlue,
    Color::Rgb(255, 165, 0),
    Color::White,
];

pub const NO_DATA: Color = Color::DarkGray;

#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
fn mix(from: (u8, u8, u8), to: (u8, u8, u8), t: f64) -> Color {
    let channel = |a: u8, b: u8| {
        let value = f64::from(a) + (f64::from(b) - f64::from(a)) * t;
        value.round().clamp(0.0, 255.0) as u8
    };
    Color::Rgb(
        channel(from.0, to.0),
        channel(from.1, to.1),
        channel(from.2, to.2),
    )
}

/// Diverging blue-orange fill for `val`, neutral at the domain midpoint.
pub fn scale_color(domain: &ValueDomain, val: f64) -> Color {
    let position = domain.position(val);
    if position < 0.0 {
        mix(NEUTRAL, BLUE, -position)
    } else {
        mix(NEUTRAL, ORANGE, position)
    }
}

/// Readable text color on top of [`scale_color`].
pub fn text_color(domain: &ValueDomain, val: f64) -> Color {
    if domain.position(val).abs() > 0.5 {
        Color::White
    } else {
        Color::Black
    }
}

pub const fn category_color(category: RiskCategory) -> Color {
    match category {
        RiskCategory::Environmental => Color::Green,
        RiskCategory::Behavioral => Color::Yellow,
        RiskCategory::Metabolic => Color::Magenta,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn scale_runs_blue_to_orange_through_neutral() {
        let domain = ValueDomain {
            min: 0.0,
            max: 20.0,
            mid: 10.0,
        };
        assert_eq!(scale_color(&domain, 0.0), Color::Rgb(19, 75, 133));
        assert_eq!(scale_color(&domain, 10.0), Color::Rgb(241, 241, 241));
        assert_eq!(scale_color(&domain, 20.0), Color::Rgb(171, 78, 4));
        assert_eq!(text_color(&domain, 10.0), Color::Black);
        assert_eq!(text_color(&domain, 20.0), Color::White);
    }
}
