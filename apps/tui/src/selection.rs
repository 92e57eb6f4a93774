use crate::error::DashboardError;
use serde::Serialize;
use std::collections::BTreeSet;
use tracing::debug;

/// Which cancer type drives the map and trend views.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
#[serde(tag = "state", content = "cancer", rename_all = "snake_case")]
pub enum SelectionState {
    #[default]
    Uninitialized,
    DefaultPending,
    Bound(String),
}

/// Inputs to the selection reducer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SelectionEvent<'a> {
    /// The session read the selection for the first time.
    Accessed,
    /// A dataset with these distinct cancer types is loaded.
    DatasetAvailable(&'a BTreeSet<String>),
    /// A heatmap cell carrying this cancer type was clicked.
    CellClicked(&'a str),
}

/// Second cancer type in lexicographic order, the first when there is only
/// one, nothing when there are none.
pub fn default_cancer(cancers: &BTreeSet<String>) -> Option<String> {
    cancers.iter().nth(1).or_else(|| cancers.iter().next()).cloned()
}

impl SelectionState {
    /// Pure transition function.
    #[must_use]
    pub fn reduce(self, event: SelectionEvent<'_>) -> Self {
        match (self, event) {
            (_, SelectionEvent::CellClicked(cancer)) => Self::Bound(cancer.to_string()),
            (Self::Uninitialized, SelectionEvent::Accessed) => Self::DefaultPending,
            (state, SelectionEvent::Accessed) => state,
            (Self::Uninitialized | Self::DefaultPending, SelectionEvent::DatasetAvailable(cancers)) => {
                Self::bind_default(cancers)
            }
            (Self::Bound(cancer), SelectionEvent::DatasetAvailable(cancers)) => {
                match Self::validate(cancer, cancers) {
                    Ok(bound) => bound,
                    Err(e) => {
                        debug!("{e}, falling back to the default");
                        Self::DefaultPending.reduce(SelectionEvent::DatasetAvailable(cancers))
                    }
                }
            }
        }
    }

    fn bind_default(cancers: &BTreeSet<String>) -> Self {
        default_cancer(cancers).map_or(Self::DefaultPending, Self::Bound)
    }

    fn validate(cancer: String, cancers: &BTreeSet<String>) -> Result<Self, DashboardError> {
        if cancers.contains(&cancer) {
            Ok(Self::Bound(cancer))
        } else {
            Err(DashboardError::InvalidSelection { cancer })
        }
    }

    pub fn bound(&self) -> Option<&str> {
        match self {
            Self::Bound(cancer) => Some(cancer),
            Self::Uninitialized | Self::DefaultPending => None,
        }
    }

    /// Access followed by dataset availability: the selection every pass
    /// renders its detail views with.
    #[must_use]
    pub fn resolve(self, cancers: &BTreeSet<String>) -> Self {
        self.reduce(SelectionEvent::Accessed)
            .reduce(SelectionEvent::DatasetAvailable(cancers))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cancers(names: &[&str]) -> BTreeSet<String> {
        names.iter().map(|name| (*name).to_string()).collect()
    }

    #[test]
    fn default_is_second_sorted_cancer() {
        assert_eq!(
            default_cancer(&cancers(&["Lung", "Bladder", "Breast"])),
            Some("Breast".to_string())
        );
        assert_eq!(
            default_cancer(&cancers(&["Bladder"])),
            Some("Bladder".to_string())
        );
        assert_eq!(default_cancer(&cancers(&[])), None);
    }

    #[test]
    fn first_access_then_dataset_binds_default() {
        let set = cancers(&["Bladder", "Breast", "Lung"]);
        let pending = SelectionState::Uninitialized.reduce(SelectionEvent::Accessed);
        assert_eq!(pending, SelectionState::DefaultPending);

        let bound = pending.reduce(SelectionEvent::DatasetAvailable(&set));
        assert_eq!(bound, SelectionState::Bound("Breast".to_string()));
    }

    #[test]
    fn empty_dataset_stays_pending() {
        let set = cancers(&[]);
        let state = SelectionState::Uninitialized.resolve(&set);
        assert_eq!(state, SelectionState::DefaultPending);
        assert_eq!(state.bound(), None);
    }

    #[test]
    fn click_always_wins() {
        let state = SelectionState::Bound("Breast".to_string())
            .reduce(SelectionEvent::CellClicked("Lung"));
        assert_eq!(state, SelectionState::Bound("Lung".to_string()));

        let from_pending = SelectionState::DefaultPending.reduce(SelectionEvent::CellClicked("Lung"));
        assert_eq!(from_pending.bound(), Some("Lung"));
    }

    #[test]
    fn valid_binding_survives_reload() {
        let set = cancers(&["Bladder", "Breast", "Lung"]);
        let state = SelectionState::Bound("Lung".to_string()).resolve(&set);
        assert_eq!(state.bound(), Some("Lung"));
    }

    #[test]
    fn stale_binding_falls_back_to_new_default() {
        let reloaded = cancers(&["Colon", "Kidney", "Liver"]);
        let state = SelectionState::Bound("Lung".to_string())
            .reduce(SelectionEvent::DatasetAvailable(&reloaded));
        assert_eq!(state, SelectionState::Bound("Kidney".to_string()));
    }
}
