//! One refresh pass of the dashboard and the events that drive it.
//!
//! The [`Session`] is the only mutable state. Events go through
//! [`dispatch`], and [`run_pass`] turns a dataset plus a session into the
//! three chart descriptions.

use crate::analysis::{filter, heatmap_means, state_means, trend_means};
use crate::charts::{ChoroplethChart, HeatmapChart, TrendChart};
use crate::data::ExposureDataset;
use crate::domain::{default_risks, TimeSelection};
use crate::error::{DashboardError, View};
use crate::selection::{SelectionEvent, SelectionState};
use serde::Serialize;
use std::collections::BTreeSet;
use tracing::debug;

/// Stand-in cancer name for guidance when no cancer can be bound.
const ANY_CANCER: &str = "any cancer type";

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FilterState {
    pub selected_risks: BTreeSet<String>,
    pub time: TimeSelection,
}

impl Default for FilterState {
    fn default() -> Self {
        Self {
            selected_risks: default_risks(),
            time: TimeSelection::default(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
pub struct Session {
    pub filters: FilterState,
    pub selection: SelectionState,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DashboardEvent {
    FilterChanged {
        selected_risks: BTreeSet<String>,
        time: TimeSelection,
    },
    CellClicked {
        cause_name: String,
    },
    DatasetAvailable,
}

/// Applies one event to the session.
#[must_use]
pub fn dispatch(session: Session, event: DashboardEvent, cancers: &BTreeSet<String>) -> Session {
    let Session { filters, selection } = session;
    match event {
        DashboardEvent::FilterChanged {
            selected_risks,
            time,
        } => Session {
            filters: FilterState {
                selected_risks,
                time,
            },
            selection,
        },
        DashboardEvent::CellClicked { cause_name } => Session {
            filters,
            selection: selection.reduce(SelectionEvent::CellClicked(&cause_name)),
        },
        DashboardEvent::DatasetAvailable => Session {
            filters,
            selection: selection.reduce(SelectionEvent::DatasetAvailable(cancers)),
        },
    }
}

impl Session {
    #[must_use]
    pub fn on_filter_change(self, selected_risks: BTreeSet<String>, time: TimeSelection) -> Self {
        dispatch(
            self,
            DashboardEvent::FilterChanged {
                selected_risks,
                time,
            },
            &BTreeSet::new(),
        )
    }

    #[must_use]
    pub fn on_heatmap_cell_click(self, cause_name: &str) -> Self {
        dispatch(
            self,
            DashboardEvent::CellClicked {
                cause_name: cause_name.to_string(),
            },
            &BTreeSet::new(),
        )
    }

    /// Writes the selection a pass resolved back into the session.
    pub fn commit(&mut self, pass: &DashboardPass) {
        if self.selection != pass.selection {
            debug!(selection = ?pass.selection, "selection updated");
        }
        self.selection = pass.selection.clone();
    }
}

/// Everything one refresh produces. Each view fails on its own.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DashboardPass {
    pub filters: FilterState,
    pub time_label: String,
    pub selection: SelectionState,
    pub matched_rows: usize,
    pub heatmap: Result<HeatmapChart, DashboardError>,
    pub map: Result<ChoroplethChart, DashboardError>,
    pub trend: Result<TrendChart, DashboardError>,
}

impl DashboardPass {
    pub fn selected_cancer(&self) -> Option<&str> {
        self.selection.bound()
    }

    /// "Analyzing N risk factor(s) | Year: 2010"
    pub fn info_line(&self) -> String {
        format!(
            "Analyzing {} risk factor(s) | {}",
            self.filters.selected_risks.len(),
            self.time_label
        )
    }
}

/// Filters, aggregates and describes all three views for `session`.
///
/// The session is not modified; the resolved selection is returned in the
/// pass for the caller to [`Session::commit`] once the pass is done.
pub fn run_pass(dataset: &ExposureDataset, session: &Session) -> DashboardPass {
    let filters = session.filters.clone();
    let cancers = dataset.cancer_types();
    let selection = session.selection.clone().resolve(&cancers);
    let time_label = filters.time.label();

    if filters.selected_risks.is_empty() {
        return DashboardPass {
            filters,
            time_label,
            selection,
            matched_rows: 0,
            heatmap: Err(DashboardError::EmptyRiskSelection),
            map: Err(DashboardError::EmptyRiskSelection),
            trend: Err(DashboardError::EmptyRiskSelection),
        };
    }

    let rows = filter(dataset, &filters.selected_risks, filters.time);
    debug!(rows = rows.len(), time = %time_label, "filtered dataset");

    let cells = heatmap_means(&rows);
    let heatmap = if cells.is_empty() {
        Err(DashboardError::NoMatchingData {
            view: View::Heatmap,
            cancer: ANY_CANCER.to_string(),
        })
    } else {
        Ok(HeatmapChart::build(cells, selection.bound()))
    };

    let (map, trend) = match selection.bound() {
        Some(cancer) => (
            state_means(&rows, cancer).map(|means| ChoroplethChart::build(cancer, means)),
            trend_means(
                &rows,
                cancer,
                &filters.selected_risks,
                dataset.has_measure_column(),
            )
            .map(|points| TrendChart::build(cancer, filters.time, points)),
        ),
        None => (
            Err(DashboardError::NoMatchingData {
                view: View::Map,
                cancer: ANY_CANCER.to_string(),
            }),
            Err(DashboardError::NoMatchingData {
                view: View::Trend,
                cancer: ANY_CANCER.to_string(),
            }),
        ),
    };

    DashboardPass {
        filters,
        time_label,
        selection,
        matched_rows: rows.len(),
        heatmap,
        map,
        trend,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::ExposureRecord;

    fn dataset() -> ExposureDataset {
        let mut records = Vec::new();
        for (cause, base) in [("Bladder", 1.0), ("Breast", 2.0), ("Lung", 10.0)] {
            for year in [1995, 2010] {
                records.push(ExposureRecord::new(
                    cause,
                    "Tobacco",
                    "Ohio",
                    Some(39),
                    year,
                    Some(base * 2.0),
                ));
                records.push(ExposureRecord::new(
                    cause,
                    "Air pollution",
                    "Iowa",
                    Some(19),
                    year,
                    Some(base),
                ));
            }
        }
        ExposureDataset::new(records, false)
    }

    fn risks(names: &[&str]) -> BTreeSet<String> {
        names.iter().map(|name| (*name).to_string()).collect()
    }

    #[test]
    fn first_pass_binds_default_cancer() {
        let dataset = dataset();
        let mut session = Session::default();
        let pass = run_pass(&dataset, &session);

        assert_eq!(pass.selected_cancer(), Some("Breast"));
        assert_eq!(session.selection, SelectionState::Uninitialized);

        session.commit(&pass);
        assert_eq!(session.selection.bound(), Some("Breast"));
        assert_eq!(pass.info_line(), "Analyzing 3 risk factor(s) | Year: 2010");
    }

    #[test]
    fn click_rebinds_detail_views() -> Result<(), DashboardError> {
        let dataset = dataset();
        let session = Session::default().on_heatmap_cell_click("Lung");
        let pass = run_pass(&dataset, &session);

        assert_eq!(pass.map.clone()?.cancer, "Lung");
        let trend = pass.trend?;
        assert_eq!(trend.cancer, "Lung");
        assert!(trend.title.starts_with("Temporal trends for Lung"));
        assert_eq!(pass.heatmap?.selected_cancer.as_deref(), Some("Lung"));
        Ok(())
    }

    #[test]
    fn empty_risk_selection_guides_every_view() {
        let dataset = dataset();
        let session = Session::default().on_filter_change(BTreeSet::new(), TimeSelection::default());
        let pass = run_pass(&dataset, &session);

        assert_eq!(pass.heatmap, Err(DashboardError::EmptyRiskSelection));
        assert_eq!(pass.map, Err(DashboardError::EmptyRiskSelection));
        assert_eq!(pass.trend, Err(DashboardError::EmptyRiskSelection));
    }

    #[test]
    fn views_fail_independently() -> Result<(), DashboardError> {
        let dataset = ExposureDataset::new(
            vec![
                ExposureRecord::new("Bladder", "Tobacco", "Ohio", Some(39), 2010, Some(3.0)),
                ExposureRecord::new("Lung", "Tobacco", "Ohio", Some(39), 1990, Some(5.0)),
            ],
            false,
        );
        let session = Session::default();
        let pass = run_pass(&dataset, &session);

        assert_eq!(pass.selected_cancer(), Some("Lung"));
        assert_eq!(pass.heatmap?.cells.len(), 1);
        assert!(matches!(
            pass.map,
            Err(DashboardError::NoMatchingData { view: View::Map, .. })
        ));
        assert!(matches!(
            pass.trend,
            Err(DashboardError::NoMatchingData { view: View::Trend, .. })
        ));
        Ok(())
    }

    #[test]
    fn range_filter_feeds_trend_series() -> Result<(), DashboardError> {
        let dataset = dataset();
        let session = Session::default()
            .on_filter_change(risks(&["Tobacco"]), TimeSelection::range(1995, 2015));
        let pass = run_pass(&dataset, &session);
        let trend = pass.trend?;

        assert_eq!(pass.time_label, "Years: 1995 - 2015");
        assert_eq!(trend.series.len(), 1);
        assert_eq!(trend.series[0].points, vec![(1995.0, 4.0), (2010.0, 4.0)]);
        Ok(())
    }

    #[test]
    fn dataset_change_re_defaults_stale_selection() {
        let session = Session::default().on_heatmap_cell_click("Lung");
        let reloaded = risks(&["Colon", "Kidney"]);
        let session = dispatch(session, DashboardEvent::DatasetAvailable, &reloaded);

        assert_eq!(session.selection.bound(), Some("Kidney"));
    }

    #[test]
    fn repeated_passes_serialize_identically() -> Result<(), serde_json::Error> {
        let dataset = dataset();
        let session = Session::default();

        let first = serde_json::to_string(&run_pass(&dataset, &session))?;
        let second = serde_json::to_string(&run_pass(&dataset, &session))?;
        assert_eq!(first, second);
        Ok(())
    }
}
