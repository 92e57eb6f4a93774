//! Chart descriptions for the three linked views.
//!
//! These are pure functions of aggregated data. The terminal UI draws them
//! and headless mode prints them as JSON.

use crate::analysis::{HeatmapCell, StateMean, TrendPoint};
use crate::domain::{TimeSelection, AVAILABLE_YEARS};
use crate::geo::{tile_for, StateTile};
use serde::Serialize;
use std::collections::BTreeSet;

/// Midpoint of the diverging color scale.
pub const COLOR_DOMAIN_MID: f64 = 10.0;

/// Observed value range of a view plus the diverging midpoint.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ValueDomain {
    pub min: f64,
    pub max: f64,
    pub mid: f64,
}

impl ValueDomain {
    pub fn from_values(values: impl IntoIterator<Item = f64>) -> Option<Self> {
        let (min, max) = values.into_iter().fold(None, |acc, val| match acc {
            None => Some((val, val)),
            Some((min, max)) => Some((f64::min(min, val), f64::max(max, val))),
        })?;

        Some(Self {
            min,
            max,
            mid: COLOR_DOMAIN_MID.clamp(min, max),
        })
    }

    /// Position on the diverging scale: `-1.0` at the minimum, `0.0` at the
    /// midpoint, `1.0` at the maximum.
    pub fn position(&self, val: f64) -> f64 {
        let position = if val <= self.mid {
            let span = self.mid - self.min;
            if span > 0.0 {
                -(self.mid - val) / span
            } else {
                0.0
            }
        } else {
            let span = self.max - self.mid;
            if span > 0.0 {
                (val - self.mid) / span
            } else {
                0.0
            }
        };
        position.clamp(-1.0, 1.0)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct HeatmapChart {
    pub x_title: &'static str,
    pub y_title: &'static str,
    pub risk_factors: Vec<String>,
    pub cancers: Vec<String>,
    pub cells: Vec<HeatmapCell>,
    pub domain: Option<ValueDomain>,
    pub selected_cancer: Option<String>,
}

impl HeatmapChart {
    pub fn build(cells: Vec<HeatmapCell>, selected_cancer: Option<&str>) -> Self {
        let risk_factors: BTreeSet<_> = cells.iter().map(|cell| cell.rei_name.clone()).collect();
        let cancers: BTreeSet<_> = cells.iter().map(|cell| cell.cause_name.clone()).collect();
        let domain = ValueDomain::from_values(cells.iter().map(|cell| cell.val));

        Self {
            x_title: "Risk Factors",
            y_title: "Cancer Type",
            risk_factors: risk_factors.into_iter().collect(),
            cancers: cancers.into_iter().collect(),
            cells,
            domain,
            selected_cancer: selected_cancer.map(str::to_string),
        }
    }

    /// Mean for a grid position; `None` renders as "no data".
    pub fn value(&self, cancer: &str, risk: &str) -> Option<f64> {
        self.cells
            .iter()
            .find(|cell| cell.cause_name == cancer && cell.rei_name == risk)
            .map(|cell| cell.val)
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MapState {
    pub location_name: String,
    pub map_id: u32,
    pub val: f64,
    pub count: usize,
    pub tile: Option<StateTile>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChoroplethChart {
    pub cancer: String,
    pub legend_title: &'static str,
    pub states: Vec<MapState>,
    pub domain: Option<ValueDomain>,
}

impl ChoroplethChart {
    pub fn build(cancer: &str, means: Vec<StateMean>) -> Self {
        let domain = ValueDomain::from_values(means.iter().map(|state| state.val));
        let states = means
            .into_iter()
            .map(|state| MapState {
                tile: tile_for(state.map_id),
                location_name: state.location_name,
                map_id: state.map_id,
                val: state.val,
                count: state.count,
            })
            .collect();

        Self {
            cancer: cancer.to_string(),
            legend_title: "Avg. DALYs Rate (per 100k)",
            states,
            domain,
        }
    }

    pub fn state_for_tile(&self, fips: u32) -> Option<&MapState> {
        self.states.iter().find(|state| state.map_id == fips)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TrendSeries {
    pub rei_name: String,
    pub points: Vec<(f64, f64)>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TrendChart {
    pub cancer: String,
    pub title: String,
    pub y_title: &'static str,
    pub series: Vec<TrendSeries>,
    pub year_bounds: [f64; 2],
    pub val_bounds: [f64; 2],
}

impl TrendChart {
    /// Groups sorted points into one series per risk factor.
    pub fn build(cancer: &str, time: TimeSelection, points: Vec<TrendPoint>) -> Self {
        let mut series: Vec<TrendSeries> = Vec::new();
        for point in points {
            let xy = (f64::from(point.year), point.val);
            match series.last_mut() {
                Some(last) if last.rei_name == point.rei_name => last.points.push(xy),
                _ => series.push(TrendSeries {
                    rei_name: point.rei_name,
                    points: vec![xy],
                }),
            }
        }

        let year_bounds = match time {
            TimeSelection::Year { year } => [f64::from(year) - 1.0, f64::from(year) + 1.0],
            TimeSelection::Range { start, end } if start == end => {
                [f64::from(start) - 1.0, f64::from(end) + 1.0]
            }
            TimeSelection::Range { start, end } => [f64::from(start), f64::from(end)],
        };

        let values = series
            .iter()
            .flat_map(|series| series.points.iter().map(|(_, val)| *val));
        let val_bounds = ValueDomain::from_values(values).map_or([0.0, 1.0], |domain| {
            let pad = ((domain.max - domain.min) * 0.1).max(1.0);
            let lower = if domain.min >= 0.0 { 0.0 } else { domain.min - pad };
            [lower, domain.max + pad]
        });

        Self {
            cancer: cancer.to_string(),
            title: format!("Temporal trends for {cancer}\n{}", time.label()),
            y_title: "Avg. DALYs Rate (per 100k)",
            series,
            year_bounds,
            val_bounds,
        }
    }

    /// Sampled years that fall inside the x bounds, for axis labels.
    pub fn year_labels(&self) -> Vec<i32> {
        AVAILABLE_YEARS
            .iter()
            .copied()
            .filter(|year| {
                let year = f64::from(*year);
                year >= self.year_bounds[0] && year <= self.year_bounds[1]
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cell(cause: &str, risk: &str, val: f64) -> HeatmapCell {
        HeatmapCell {
            cause_name: cause.to_string(),
            rei_name: risk.to_string(),
            val,
        }
    }

    #[test]
    fn domain_positions_diverge_around_mid() -> Result<(), String> {
        let domain =
            ValueDomain::from_values([0.0, 10.0, 30.0]).ok_or_else(|| "no domain".to_string())?;
        assert!((domain.position(0.0) + 1.0).abs() < 1e-9);
        assert!(domain.position(10.0).abs() < 1e-9);
        assert!((domain.position(20.0) - 0.5).abs() < 1e-9);
        assert!((domain.position(30.0) - 1.0).abs() < 1e-9);
        Ok(())
    }

    #[test]
    fn mid_is_clamped_into_observed_range() -> Result<(), String> {
        let domain =
            ValueDomain::from_values([1.0, 4.0]).ok_or_else(|| "no domain".to_string())?;
        assert!((domain.mid - 4.0).abs() < 1e-9);
        assert!(ValueDomain::from_values(std::iter::empty()).is_none());
        Ok(())
    }

    #[test]
    fn heatmap_axes_and_missing_cells() {
        let chart = HeatmapChart::build(
            vec![cell("Lung", "Tobacco", 15.0), cell("Breast", "Air pollution", 3.0)],
            Some("Lung"),
        );

        assert_eq!(chart.cancers, vec!["Breast", "Lung"]);
        assert_eq!(chart.risk_factors, vec!["Air pollution", "Tobacco"]);
        assert_eq!(chart.value("Lung", "Tobacco"), Some(15.0));
        assert_eq!(chart.value("Lung", "Air pollution"), None);
        assert_eq!(chart.selected_cancer.as_deref(), Some("Lung"));
    }

    #[test]
    fn choropleth_attaches_tiles() {
        let chart = ChoroplethChart::build(
            "Lung",
            vec![
                StateMean {
                    location_name: "Ohio".to_string(),
                    map_id: 39,
                    val: 6.0,
                    count: 2,
                },
                StateMean {
                    location_name: "Puerto Rico".to_string(),
                    map_id: 72,
                    val: 1.0,
                    count: 1,
                },
            ],
        );

        assert_eq!(
            chart.state_for_tile(39).and_then(|state| state.tile).map(|t| t.abbreviation),
            Some("OH")
        );
        assert_eq!(chart.state_for_tile(72).and_then(|state| state.tile), None);
    }

    #[test]
    fn trend_series_split_by_risk() {
        let points = vec![
            TrendPoint {
                year: 1995,
                rei_name: "Air pollution".to_string(),
                val: 1.0,
            },
            TrendPoint {
                year: 2000,
                rei_name: "Air pollution".to_string(),
                val: 2.0,
            },
            TrendPoint {
                year: 1995,
                rei_name: "Tobacco".to_string(),
                val: 8.0,
            },
        ];
        let chart = TrendChart::build("Lung", TimeSelection::range(1995, 2015), points);

        assert_eq!(chart.series.len(), 2);
        assert_eq!(chart.series[0].points, vec![(1995.0, 1.0), (2000.0, 2.0)]);
        assert_eq!(chart.title, "Temporal trends for Lung\nYears: 1995 - 2015");
        assert_eq!(chart.year_labels(), vec![1995, 2000, 2005, 2010, 2015]);
        assert!(chart.val_bounds[0] <= 0.0);
        assert!(chart.val_bounds[1] > 8.0);
    }
}
