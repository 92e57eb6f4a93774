use serde::Serialize;
use std::fmt;
use std::path::PathBuf;
use thiserror::Error;

/// Detail view a [`DashboardError::NoMatchingData`] refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum View {
    Heatmap,
    Map,
    Trend,
}

impl fmt::Display for View {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Heatmap => write!(f, "heatmap"),
            Self::Map => write!(f, "map"),
            Self::Trend => write!(f, "trend"),
        }
    }
}

/// Every failure a refresh pass can run into. None of them is fatal: a pass
/// isolates each one to the view it affects.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DashboardError {
    #[error("data unavailable ({path}): {reason}")]
    DataUnavailable { path: PathBuf, reason: String },

    #[error("no {view} data for {cancer} with the selected risk factors and time period")]
    NoMatchingData { view: View, cancer: String },

    #[error("selected cancer {cancer} is not present in the loaded dataset")]
    InvalidSelection { cancer: String },

    #[error("no risk factors selected")]
    EmptyRiskSelection,
}

impl DashboardError {
    pub fn data_unavailable(path: impl Into<PathBuf>, reason: impl fmt::Display) -> Self {
        Self::DataUnavailable {
            path: path.into(),
            reason: reason.to_string(),
        }
    }

    /// Message shown in place of a view that could not be drawn.
    pub fn guidance(&self) -> String {
        match self {
            Self::DataUnavailable { .. } => {
                "Make sure RateDALY.csv and stateCodes.csv are in the data folder".to_string()
            }
            Self::NoMatchingData { cancer, .. } => format!(
                "No data available for {cancer} with the selected risk factors and time period. \
                 Try different risk factors, a different time period, or a different cancer type."
            ),
            Self::InvalidSelection { .. } => "Selecting a default cancer type".to_string(),
            Self::EmptyRiskSelection => {
                "Please select at least one risk factor to begin analysis".to_string()
            }
        }
    }
}

impl Serialize for DashboardError {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_string())
    }
}
