use cancer_risk_dashboard::config::AppConfig;
use cancer_risk_dashboard::data::{DataLoader, DatasetCache, DatasetSummary, ExposureDataset};
use cancer_risk_dashboard::domain::{
    all_risk_factors, year_index, RiskCategory, AVAILABLE_YEARS, DEFAULT_YEAR, DEFAULT_YEAR_RANGE,
};
use cancer_risk_dashboard::pipeline::{dispatch, run_pass, DashboardEvent, DashboardPass, Session};
use cancer_risk_dashboard::{DashboardError, TimeSelection};
use fuzzy_matcher::skim::SkimMatcherV2;
use fuzzy_matcher::FuzzyMatcher;
use std::collections::BTreeSet;
use std::sync::Arc;
use tracing::{debug, info};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppScreen {
    Dashboard,
    About,
}

/// Dashboard panel receiving key presses.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Focus {
    Heatmap,
    RiskPicker,
    TimePicker,
}

impl Focus {
    pub const fn next(self) -> Self {
        match self {
            Self::Heatmap => Self::RiskPicker,
            Self::RiskPicker => Self::TimePicker,
            Self::TimePicker => Self::Heatmap,
        }
    }

    pub const fn label(self) -> &'static str {
        match self {
            Self::Heatmap => "Heatmap",
            Self::RiskPicker => "Risk factors",
            Self::TimePicker => "Time period",
        }
    }
}

/// Range slider handle moved by Left/Right.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimeHandle {
    Start,
    End,
}

#[derive(Debug)]
pub struct App {
    pub running: bool,
    pub screen: AppScreen,
    pub focus: Focus,
    pub show_help: bool,
    pub status_message: String,
    pub config: AppConfig,
    pub cache: DatasetCache,
    pub dataset: Option<Arc<ExposureDataset>>,
    pub summary: Option<DatasetSummary>,
    pub load_error: Option<DashboardError>,
    pub reload_requested: bool,
    pub session: Session,
    pub pass: Option<DashboardPass>,
    pub risk_cursor: usize,
    pub searching: bool,
    pub search_query: String,
    pub single_year: i32,
    pub year_range: (i32, i32),
    pub active_handle: TimeHandle,
    pub heatmap_row: usize,
    pub heatmap_column: usize,
}

impl App {
    pub fn new(config: AppConfig) -> Self {
        Self {
            running: true,
            screen: AppScreen::Dashboard,
            focus: Focus::Heatmap,
            show_help: false,
            status_message: String::new(),
            config,
            cache: DatasetCache::new(),
            dataset: None,
            summary: None,
            load_error: None,
            reload_requested: true,
            session: Session::default(),
            pass: None,
            risk_cursor: 0,
            searching: false,
            search_query: String::new(),
            single_year: DEFAULT_YEAR,
            year_range: DEFAULT_YEAR_RANGE,
            active_handle: TimeHandle::Start,
            heatmap_row: 0,
            heatmap_column: 0,
        }
    }

    pub fn loader(&self) -> DataLoader {
        DataLoader::new(self.config.data.clone())
    }

    /// Loads (or reuses) the dataset, then refreshes every view.
    pub async fn load_dataset(&mut self) -> Result<DatasetSummary, DashboardError> {
        let summary = self.attach_dataset().await?;
        self.refresh();
        Ok(summary)
    }

    /// Loads (or reuses) the dataset and re-validates the selection against
    /// it without running a pass.
    pub async fn attach_dataset(&mut self) -> Result<DatasetSummary, DashboardError> {
        match self.cache.get_or_load_async(self.loader()).await {
            Ok(dataset) => {
                let summary = dataset.summary();
                let cancers = dataset.cancer_types();
                self.session = dispatch(
                    std::mem::take(&mut self.session),
                    DashboardEvent::DatasetAvailable,
                    &cancers,
                );
                self.dataset = Some(dataset);
                self.summary = Some(summary);
                self.load_error = None;
                Ok(summary)
            }
            Err(e) => {
                self.dataset = None;
                self.summary = None;
                self.pass = None;
                self.load_error = Some(e.clone());
                Err(e)
            }
        }
    }

    /// Drops the cached dataset and asks the event loop to read the files
    /// again.
    pub fn request_reload(&mut self) {
        info!("reload requested");
        self.cache.invalidate();
        self.reload_requested = true;
    }

    /// Runs one pass over the loaded dataset and commits the resolved
    /// selection at its end.
    pub fn refresh(&mut self) {
        let Some(dataset) = self.dataset.as_deref() else {
            return;
        };
        let pass = run_pass(dataset, &self.session);
        self.session.commit(&pass);
        self.pass = Some(pass);
        self.clamp_heatmap_cursor();
    }

    pub fn time_selection(&self) -> TimeSelection {
        self.session.filters.time
    }

    pub fn is_range_mode(&self) -> bool {
        self.time_selection().is_range()
    }

    fn set_filters(&mut self, selected_risks: BTreeSet<String>, time: TimeSelection) {
        debug!(risks = selected_risks.len(), time = %time.label(), "filters changed");
        self.session = std::mem::take(&mut self.session).on_filter_change(selected_risks, time);
        self.refresh();
    }

    pub fn selected_risks(&self) -> &BTreeSet<String> {
        &self.session.filters.selected_risks
    }

    /// Risk factors listed in the picker: taxonomy order, or best fuzzy
    /// matches first while a search query is active.
    pub fn risk_picker_entries(&self) -> Vec<&'static str> {
        let query = self.search_query.trim();
        if query.is_empty() {
            return all_risk_factors().collect();
        }

        let matcher = SkimMatcherV2::default();
        let mut scored: Vec<(i64, &'static str)> = all_risk_factors()
            .filter_map(|risk| matcher.fuzzy_match(risk, query).map(|score| (score, risk)))
            .collect();
        scored.sort_by(|a, b| b.0.cmp(&a.0).then_with(|| a.1.cmp(b.1)));
        scored.into_iter().map(|(_, risk)| risk).collect()
    }

    pub fn toggle_risk_at_cursor(&mut self) {
        let entries = self.risk_picker_entries();
        let Some(risk) = entries.get(self.risk_cursor).copied() else {
            return;
        };

        let mut selected = self.selected_risks().clone();
        if !selected.remove(risk) {
            selected.insert(risk.to_string());
        }
        self.status_message = format!("{} risk factor(s) selected", selected.len());
        self.set_filters(selected, self.time_selection());
    }

    /// Replaces the selection with every factor of `category`.
    pub fn select_category(&mut self, category: RiskCategory) {
        let selected = category
            .factors()
            .iter()
            .map(|risk| (*risk).to_string())
            .collect();
        self.status_message = format!("Selected all {} risk factors", category.label());
        self.set_filters(selected, self.time_selection());
    }

    pub fn toggle_time_mode(&mut self) {
        let time = if self.is_range_mode() {
            TimeSelection::year(self.single_year)
        } else {
            TimeSelection::range(self.year_range.0, self.year_range.1)
        };
        self.set_filters(self.selected_risks().clone(), time);
    }

    pub fn switch_handle(&mut self) {
        self.active_handle = match self.active_handle {
            TimeHandle::Start => TimeHandle::End,
            TimeHandle::End => TimeHandle::Start,
        };
    }

    /// Moves the single year, or the active range handle, by `step` sampled
    /// years. The range start never passes its end.
    pub fn move_time(&mut self, step: isize) {
        let shift = |year: i32| {
            let index = year_index(year).saturating_add_signed(step);
            AVAILABLE_YEARS[index.min(AVAILABLE_YEARS.len() - 1)]
        };

        let time = if self.is_range_mode() {
            let (start, end) = self.year_range;
            self.year_range = match self.active_handle {
                TimeHandle::Start => (shift(start).min(end), end),
                TimeHandle::End => (start, shift(end).max(start)),
            };
            TimeSelection::range(self.year_range.0, self.year_range.1)
        } else {
            self.single_year = shift(self.single_year);
            TimeSelection::year(self.single_year)
        };

        if time != self.time_selection() {
            self.set_filters(self.selected_risks().clone(), time);
        }
    }

    /// Cancer types and risk factors currently on the heatmap axes.
    pub fn heatmap_axes(&self) -> (&[String], &[String]) {
        match self.pass.as_ref().map(|pass| &pass.heatmap) {
            Some(Ok(chart)) => (chart.cancers.as_slice(), chart.risk_factors.as_slice()),
            _ => (&[], &[]),
        }
    }

    pub fn move_heatmap_cursor(&mut self, rows: isize, columns: isize) {
        self.heatmap_row = self.heatmap_row.saturating_add_signed(rows);
        self.heatmap_column = self.heatmap_column.saturating_add_signed(columns);
        self.clamp_heatmap_cursor();
    }

    fn clamp_heatmap_cursor(&mut self) {
        let (cancers, risks) = self.heatmap_axes();
        let (rows, columns) = (cancers.len(), risks.len());
        self.heatmap_row = self.heatmap_row.min(rows.saturating_sub(1));
        self.heatmap_column = self.heatmap_column.min(columns.saturating_sub(1));
    }

    /// Clicks the heatmap cell under the cursor.
    pub fn click_heatmap_cell(&mut self) {
        let Some(cancer) = self.heatmap_axes().0.get(self.heatmap_row).cloned() else {
            return;
        };
        self.session = std::mem::take(&mut self.session).on_heatmap_cell_click(&cancer);
        self.status_message = format!("Showing details for {cancer}");
        self.refresh();
    }
}
