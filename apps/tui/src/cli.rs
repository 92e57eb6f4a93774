use cancer_risk_dashboard::domain::{default_risks, RiskCategory, AVAILABLE_YEARS, DEFAULT_YEAR};
use cancer_risk_dashboard::{FilterState, TimeSelection};
use clap::{CommandFactory, Parser};
use std::collections::BTreeSet;

#[derive(Debug, Parser)]
#[command(
    name = "cancer-dashboard",
    version,
    about = "Cancer burden and risk factor exposure across US states"
)]
pub struct CliArgs {
    /// Print a single pass and exit
    #[arg(long)]
    pub headless: bool,

    /// Print the headless pass as JSON
    #[arg(long)]
    pub json: bool,

    /// Enable debug logging
    #[arg(long)]
    pub debug: bool,

    /// Directory holding the CSV files
    #[arg(long = "data-dir", value_name = "PATH")]
    pub data_dir: Option<String>,

    /// Override the exposure table file
    #[arg(long = "risks-file", value_name = "FILE")]
    pub risks_file: Option<String>,

    /// Override the state code lookup file
    #[arg(long = "state-codes-file", value_name = "FILE")]
    pub state_codes_file: Option<String>,

    /// Override the deaths table file
    #[arg(long = "deaths-file", value_name = "FILE")]
    pub deaths_file: Option<String>,

    /// Override the log file used by the interactive UI
    #[arg(long = "log-file", value_name = "PATH")]
    pub log_file: Option<String>,

    /// Risk factor to include (repeatable)
    #[arg(long = "risk", value_name = "NAME")]
    pub risks: Vec<String>,

    /// Include every risk factor of a category (environmental, behavioral, metabolic)
    #[arg(long = "category", value_name = "NAME")]
    pub categories: Vec<String>,

    /// Single year to analyze
    #[arg(long, value_name = "YEAR", conflicts_with_all = ["from", "to"])]
    pub year: Option<i32>,

    /// First year of a range
    #[arg(long, value_name = "YEAR")]
    pub from: Option<i32>,

    /// Last year of a range
    #[arg(long, value_name = "YEAR")]
    pub to: Option<i32>,

    /// Cancer type to inspect, as if its heatmap cell was clicked
    #[arg(long, value_name = "NAME")]
    pub cancer: Option<String>,
}

impl CliArgs {
    pub fn apply_env_overrides(&self) {
        if let Some(dir) = &self.data_dir {
            std::env::set_var("DATA_DIR", dir);
        }
        if let Some(file) = &self.risks_file {
            std::env::set_var("RISKS_FILE", file);
        }
        if let Some(file) = &self.state_codes_file {
            std::env::set_var("STATE_CODES_FILE", file);
        }
        if let Some(file) = &self.deaths_file {
            std::env::set_var("DEATHS_FILE", file);
        }
        if let Some(file) = &self.log_file {
            std::env::set_var("LOG_FILE", file);
        }
        if self.debug {
            std::env::set_var("DEBUG", "1");
        }
    }

    /// Filters requested on the command line. Without any risk or category
    /// flag the session defaults apply.
    pub fn filter_state(&self) -> Result<FilterState, String> {
        let mut selected_risks: BTreeSet<String> = self.risks.iter().cloned().collect();
        for name in &self.categories {
            let category = RiskCategory::parse(name)
                .ok_or_else(|| format!("unknown risk category: {name}"))?;
            selected_risks.extend(category.factors().iter().map(|risk| (*risk).to_string()));
        }
        if self.risks.is_empty() && self.categories.is_empty() {
            selected_risks = default_risks();
        }

        let first = AVAILABLE_YEARS[0];
        let last = AVAILABLE_YEARS[AVAILABLE_YEARS.len() - 1];
        let time = match (self.year, self.from, self.to) {
            (_, None, None) => TimeSelection::year(self.year.unwrap_or(DEFAULT_YEAR)),
            (_, from, to) => TimeSelection::range(from.unwrap_or(first), to.unwrap_or(last)),
        };

        Ok(FilterState {
            selected_risks,
            time,
        })
    }

    pub fn help_text() -> String {
        let mut command = Self::command();
        let mut buffer = Vec::new();
        command.write_help(&mut buffer).ok();
        String::from_utf8_lossy(&buffer).to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(args: &[&str]) -> CliArgs {
        let mut argv = vec!["cancer-dashboard"];
        argv.extend_from_slice(args);
        match CliArgs::try_parse_from(argv) {
            Ok(args) => args,
            Err(e) => panic!("arguments should parse: {e}"),
        }
    }

    #[test]
    fn no_flags_use_session_defaults() -> Result<(), String> {
        let filters = parse(&["--headless"]).filter_state()?;
        assert_eq!(filters, FilterState::default());
        Ok(())
    }

    #[test]
    fn risks_and_categories_are_merged() -> Result<(), String> {
        let filters =
            parse(&["--risk", "Tobacco", "--category", "metabolic"]).filter_state()?;
        assert!(filters.selected_risks.contains("Tobacco"));
        assert!(filters.selected_risks.contains("High body-mass index"));
        assert_eq!(filters.selected_risks.len(), 7);
        Ok(())
    }

    #[test]
    fn open_range_extends_to_sampled_bounds() -> Result<(), String> {
        let filters = parse(&["--from", "2005"]).filter_state()?;
        assert_eq!(filters.time, TimeSelection::range(2005, 2020));
        Ok(())
    }

    #[test]
    fn unknown_category_is_rejected() {
        assert!(parse(&["--category", "cosmic"]).filter_state().is_err());
    }

    #[test]
    fn year_conflicts_with_range() {
        assert!(CliArgs::try_parse_from(["cancer-dashboard", "--year", "2010", "--to", "2015"])
            .is_err());
    }

    #[test]
    fn help_mentions_headless() {
        assert!(CliArgs::help_text().contains("--headless"));
    }
}
