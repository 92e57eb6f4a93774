use crate::data::{ExposureDataset, ExposureRecord};
use crate::domain::TimeSelection;
use std::collections::BTreeSet;

/// Rows whose risk factor is selected and whose year satisfies `time`.
///
/// An empty risk selection selects nothing. Rows without a usable year never
/// match. The dataset itself is left untouched; the result borrows from it.
pub fn filter<'a>(
    dataset: &'a ExposureDataset,
    selected_risks: &BTreeSet<String>,
    time: TimeSelection,
) -> Vec<&'a ExposureRecord> {
    if selected_risks.is_empty() {
        return Vec::new();
    }

    dataset
        .records()
        .iter()
        .filter(|record| selected_risks.contains(&record.rei_name))
        .filter(|record| record.year.is_some_and(|year| time.contains(year)))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::AVAILABLE_YEARS;

    fn dataset() -> ExposureDataset {
        let risks = ["Tobacco", "Air pollution", "Drug use"];
        let mut records = Vec::new();
        for (i, year) in AVAILABLE_YEARS.iter().enumerate() {
            for risk in risks {
                #[allow(clippy::cast_precision_loss)]
                let val = Some(i as f64);
                records.push(ExposureRecord::new("Lung", risk, "Ohio", Some(39), *year, val));
            }
        }
        let mut no_year = ExposureRecord::new("Lung", "Tobacco", "Ohio", Some(39), 0, None);
        no_year.year = None;
        records.push(no_year);
        ExposureDataset::new(records, false)
    }

    fn risks(names: &[&str]) -> BTreeSet<String> {
        names.iter().map(|name| (*name).to_string()).collect()
    }

    #[test]
    fn rows_satisfy_risk_and_time_predicates() {
        let dataset = dataset();
        let selected = risks(&["Tobacco", "Drug use"]);
        let time_selections = [
            TimeSelection::year(2010),
            TimeSelection::range(1995, 2015),
            TimeSelection::range(1990, 2020),
            TimeSelection::year(1991),
        ];

        for time in time_selections {
            let rows = filter(&dataset, &selected, time);
            assert!(rows.iter().all(|row| selected.contains(&row.rei_name)));
            assert!(rows
                .iter()
                .all(|row| row.year.is_some_and(|year| time.contains(year))));
        }
    }

    #[test]
    fn range_bounds_are_inclusive() {
        let dataset = dataset();
        let rows = filter(&dataset, &risks(&["Tobacco"]), TimeSelection::range(1995, 2015));
        let years: BTreeSet<_> = rows.iter().filter_map(|row| row.year).collect();
        assert_eq!(
            years.into_iter().collect::<Vec<_>>(),
            vec![1995, 2000, 2005, 2010, 2015]
        );
    }

    #[test]
    fn single_year_is_exact() {
        let dataset = dataset();
        let rows = filter(
            &dataset,
            &risks(&["Tobacco", "Air pollution"]),
            TimeSelection::year(2010),
        );
        assert_eq!(rows.len(), 2);
    }

    #[test]
    fn empty_selection_is_empty() {
        let dataset = dataset();
        assert!(filter(&dataset, &BTreeSet::new(), TimeSelection::range(1990, 2020)).is_empty());
    }

    #[test]
    fn source_is_not_mutated() {
        let dataset = dataset();
        let before = dataset.clone();
        let _ = filter(&dataset, &risks(&["Tobacco"]), TimeSelection::year(2010));
        assert_eq!(dataset, before);
    }
}
