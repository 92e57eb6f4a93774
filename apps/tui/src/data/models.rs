use serde::Serialize;
use std::collections::BTreeSet;

/// One row of the exposure table after the state lookup join.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ExposureRecord {
    pub cause_name: String,
    pub rei_name: String,
    pub location_name: String,
    pub map_id: Option<u32>,
    pub year: Option<i32>,
    pub val: Option<f64>,
    pub measure_name: Option<String>,
}

impl ExposureRecord {
    /// Convenience constructor for a joined row with every field present.
    pub fn new(
        cause_name: impl Into<String>,
        rei_name: impl Into<String>,
        location_name: impl Into<String>,
        map_id: Option<u32>,
        year: i32,
        val: Option<f64>,
    ) -> Self {
        Self {
            cause_name: cause_name.into(),
            rei_name: rei_name.into(),
            location_name: location_name.into(),
            map_id,
            year: Some(year),
            val,
            measure_name: None,
        }
    }

    #[must_use]
    pub fn with_measure(mut self, measure: impl Into<String>) -> Self {
        self.measure_name = Some(measure.into());
        self
    }
}

/// The joined, type-coerced exposure table. Read-only once loaded.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ExposureDataset {
    records: Vec<ExposureRecord>,
    has_measure_column: bool,
    deaths_rows: Option<usize>,
}

impl ExposureDataset {
    pub const fn new(records: Vec<ExposureRecord>, has_measure_column: bool) -> Self {
        Self {
            records,
            has_measure_column,
            deaths_rows: None,
        }
    }

    #[must_use]
    pub const fn with_deaths_rows(mut self, deaths_rows: Option<usize>) -> Self {
        self.deaths_rows = deaths_rows;
        self
    }

    pub fn records(&self) -> &[ExposureRecord] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Whether the source carried a `measure_name` column.
    pub const fn has_measure_column(&self) -> bool {
        self.has_measure_column
    }

    pub const fn deaths_rows(&self) -> Option<usize> {
        self.deaths_rows
    }

    /// Distinct cancer types in lexicographic order.
    pub fn cancer_types(&self) -> BTreeSet<String> {
        self.records
            .iter()
            .map(|record| record.cause_name.clone())
            .collect()
    }

    pub fn risk_factors(&self) -> BTreeSet<String> {
        self.records
            .iter()
            .map(|record| record.rei_name.clone())
            .collect()
    }

    pub fn states(&self) -> BTreeSet<String> {
        self.records
            .iter()
            .map(|record| record.location_name.clone())
            .collect()
    }

    pub fn summary(&self) -> DatasetSummary {
        DatasetSummary {
            risk_rows: self.len(),
            deaths_rows: self.deaths_rows,
            risk_factors: self.risk_factors().len(),
            cancer_types: self.cancer_types().len(),
            states: self.states().len(),
        }
    }
}

/// Counts shown in the "data information" panel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct DatasetSummary {
    pub risk_rows: usize,
    pub deaths_rows: Option<usize>,
    pub risk_factors: usize,
    pub cancer_types: usize,
    pub states: usize,
}
