use serde::Serialize;
use std::collections::BTreeSet;

/// Years sampled in the source data, in ascending order.
pub const AVAILABLE_YEARS: [i32; 7] = [1990, 1995, 2000, 2005, 2010, 2015, 2020];

pub const DEFAULT_YEAR: i32 = 2010;
pub const DEFAULT_YEAR_RANGE: (i32, i32) = (1995, 2015);

/// Risk factors selected when a session starts.
pub const DEFAULT_RISKS: [&str; 3] = ["Tobacco", "High alcohol use", "Air pollution"];

/// Header token that leaks into the risk factor column when a CSV export
/// re-embeds its header row.
pub const RISK_HEADER_TOKEN: &str = "rei_name";

const ENVIRONMENTAL: &[&str] = &[
    "Occupational risks",
    "Unsafe water, sanitation, and handwashing",
    "Air pollution",
    "Non-optimal temperature",
    "Other environmental risks",
];

const BEHAVIORAL: &[&str] = &[
    "Tobacco",
    "High alcohol use",
    "Drug use",
    "Dietary risks",
    "Unsafe sex",
    "Low physical activity",
    "Intimate partner violence",
    "Sexual violence against children and bullying",
    "Child and maternal malnutrition",
];

const METABOLIC: &[&str] = &[
    "High fasting plasma glucose",
    "High LDL cholesterol",
    "High systolic blood pressure",
    "High body-mass index",
    "Low bone mineral density",
    "Kidney dysfunction",
];

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub enum RiskCategory {
    Environmental,
    Behavioral,
    Metabolic,
}

impl RiskCategory {
    pub const ALL: [Self; 3] = [Self::Environmental, Self::Behavioral, Self::Metabolic];

    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_lowercase().as_str() {
            "environmental" => Some(Self::Environmental),
            "behavioral" | "behavioural" => Some(Self::Behavioral),
            "metabolic" => Some(Self::Metabolic),
            _ => None,
        }
    }

    pub const fn label(self) -> &'static str {
        match self {
            Self::Environmental => "Environmental",
            Self::Behavioral => "Behavioral",
            Self::Metabolic => "Metabolic",
        }
    }

    pub const fn factors(self) -> &'static [&'static str] {
        match self {
            Self::Environmental => ENVIRONMENTAL,
            Self::Behavioral => BEHAVIORAL,
            Self::Metabolic => METABOLIC,
        }
    }

    /// Category a risk factor belongs to, if it is part of the taxonomy.
    pub fn of(risk: &str) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|category| category.factors().contains(&risk))
    }
}

/// Every risk factor in taxonomy order (Environmental, Behavioral, Metabolic).
pub fn all_risk_factors() -> impl Iterator<Item = &'static str> {
    RiskCategory::ALL
        .into_iter()
        .flat_map(|category| category.factors().iter().copied())
}

pub fn default_risks() -> BTreeSet<String> {
    DEFAULT_RISKS.iter().map(|risk| (*risk).to_string()).collect()
}

/// Categories touched by a risk selection, in taxonomy order.
pub fn categories_for(selected: &BTreeSet<String>) -> Vec<RiskCategory> {
    RiskCategory::ALL
        .into_iter()
        .filter(|category| {
            category
                .factors()
                .iter()
                .any(|risk| selected.contains(*risk))
        })
        .collect()
}

/// Time constraint applied by the filter engine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "mode", rename_all = "snake_case")]
pub enum TimeSelection {
    Year { year: i32 },
    Range { start: i32, end: i32 },
}

impl TimeSelection {
    pub const fn year(year: i32) -> Self {
        Self::Year { year }
    }

    /// Builds an inclusive range, swapping the bounds if given out of order.
    pub const fn range(start: i32, end: i32) -> Self {
        if start <= end {
            Self::Range { start, end }
        } else {
            Self::Range {
                start: end,
                end: start,
            }
        }
    }

    pub const fn contains(self, year: i32) -> bool {
        match self {
            Self::Year { year: selected } => year == selected,
            Self::Range { start, end } => start <= year && year <= end,
        }
    }

    pub fn label(self) -> String {
        match self {
            Self::Year { year } => format!("Year: {year}"),
            Self::Range { start, end } => format!("Years: {start} - {end}"),
        }
    }

    pub const fn is_range(self) -> bool {
        matches!(self, Self::Range { .. })
    }
}

impl Default for TimeSelection {
    fn default() -> Self {
        Self::year(DEFAULT_YEAR)
    }
}

/// Position of a year in [`AVAILABLE_YEARS`], falling back to the nearest
/// earlier sample.
pub fn year_index(year: i32) -> usize {
    AVAILABLE_YEARS
        .iter()
        .rposition(|sample| *sample <= year)
        .unwrap_or(0)
}
