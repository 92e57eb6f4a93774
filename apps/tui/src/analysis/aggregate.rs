use crate::data::ExposureRecord;
use crate::error::{DashboardError, View};
use serde::Serialize;
use std::collections::{BTreeMap, BTreeSet};

/// Measure excluded from the trend view when the source mixes measures.
pub const DEATHS_MEASURE: &str = "Deaths";

/// Mean value for one (cancer, risk factor) pair.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct HeatmapCell {
    pub cause_name: String,
    pub rei_name: String,
    pub val: f64,
}

/// Mean value for one state.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StateMean {
    pub location_name: String,
    pub map_id: u32,
    pub val: f64,
    pub count: usize,
}

/// Mean value for one (year, risk factor) pair.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TrendPoint {
    pub year: i32,
    pub rei_name: String,
    pub val: f64,
}

/// Collects the valid values of a group. Missing values never count.
#[derive(Debug, Default)]
struct Mean {
    values: Vec<f64>,
}

impl Mean {
    fn push(&mut self, val: Option<f64>) {
        if let Some(val) = val {
            self.values.push(val);
        }
    }

    const fn count(&self) -> usize {
        self.values.len()
    }

    /// Summed in sorted order so the result does not depend on row order.
    fn value(mut self) -> Option<f64> {
        if self.values.is_empty() {
            return None;
        }
        self.values.sort_by(f64::total_cmp);
        let sum: f64 = self.values.iter().sum();
        #[allow(clippy::cast_precision_loss)]
        Some(sum / self.values.len() as f64)
    }
}

/// Mean per (cause, risk factor). Groups without a single valid value are
/// left out. Sorted by cause, then risk factor.
pub fn heatmap_means(rows: &[&ExposureRecord]) -> Vec<HeatmapCell> {
    let mut groups: BTreeMap<(&str, &str), Mean> = BTreeMap::new();
    for row in rows {
        groups
            .entry((row.cause_name.as_str(), row.rei_name.as_str()))
            .or_default()
            .push(row.val);
    }

    groups
        .into_iter()
        .filter_map(|((cause_name, rei_name), mean)| {
            mean.value().map(|val| HeatmapCell {
                cause_name: cause_name.to_string(),
                rei_name: rei_name.to_string(),
                val,
            })
        })
        .collect()
}

/// Mean per state for `cancer`. Rows without a map id cannot be drawn and are
/// dropped before grouping; states whose values are all missing are left out.
///
/// Returns [`DashboardError::NoMatchingData`] when nothing drawable remains.
pub fn state_means(
    rows: &[&ExposureRecord],
    cancer: &str,
) -> Result<Vec<StateMean>, DashboardError> {
    let mut groups: BTreeMap<(&str, u32), Mean> = BTreeMap::new();
    for row in rows.iter().filter(|row| row.cause_name == cancer) {
        let Some(map_id) = row.map_id else {
            continue;
        };
        groups
            .entry((row.location_name.as_str(), map_id))
            .or_default()
            .push(row.val);
    }

    let states: Vec<_> = groups
        .into_iter()
        .filter_map(|((location_name, map_id), mean)| {
            let count = mean.count();
            mean.value().map(|val| StateMean {
                location_name: location_name.to_string(),
                map_id,
                val,
                count,
            })
        })
        .collect();

    if states.is_empty() {
        return Err(DashboardError::NoMatchingData {
            view: View::Map,
            cancer: cancer.to_string(),
        });
    }
    Ok(states)
}

/// Mean per (year, risk factor) for `cancer` and the selected risk factors.
/// With `exclude_deaths`, rows measured as deaths are dropped first. Years
/// without data simply have no point. Sorted by risk factor, then year.
pub fn trend_means(
    rows: &[&ExposureRecord],
    cancer: &str,
    selected_risks: &BTreeSet<String>,
    exclude_deaths: bool,
) -> Result<Vec<TrendPoint>, DashboardError> {
    let restricted: Vec<_> = rows
        .iter()
        .filter(|row| row.cause_name == cancer)
        .filter(|row| selected_risks.contains(&row.rei_name))
        .filter(|row| !(exclude_deaths && row.measure_name.as_deref() == Some(DEATHS_MEASURE)))
        .collect();

    if restricted.is_empty() {
        return Err(DashboardError::NoMatchingData {
            view: View::Trend,
            cancer: cancer.to_string(),
        });
    }

    let mut groups: BTreeMap<(&str, i32), Mean> = BTreeMap::new();
    for row in restricted {
        let Some(year) = row.year else {
            continue;
        };
        groups
            .entry((row.rei_name.as_str(), year))
            .or_default()
            .push(row.val);
    }

    Ok(groups
        .into_iter()
        .filter_map(|((rei_name, year), mean)| {
            mean.value().map(|val| TrendPoint {
                year,
                rei_name: rei_name.to_string(),
                val,
            })
        })
        .collect())
}
