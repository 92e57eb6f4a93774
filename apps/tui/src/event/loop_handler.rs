use cancer_risk_dashboard::data::DatasetSummary;
use cancer_risk_dashboard::pipeline::{run_pass, DashboardPass, FilterState, Session};
use cancer_risk_dashboard::DashboardError;
use color_eyre::Result;
use crossterm::event::{self, Event, KeyEventKind};
use ratatui::backend::CrosstermBackend;
use ratatui::Terminal;
use std::convert::TryFrom;
use std::fmt;
use std::io::Stdout;
use tracing::{error, info, warn};

use crate::app::{handle_input, App};
use crate::ui;

// States of a dataset load
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum LoadState {
    Idle,
    Loading,
    Ready,
    Failed,
}

impl fmt::Display for LoadState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Idle => write!(f, "Idle"),
            Self::Loading => write!(f, "Loading"),
            Self::Ready => write!(f, "Ready"),
            Self::Failed => write!(f, "Failed"),
        }
    }
}

#[derive(Clone, Debug)]
pub enum LoadEvent {
    Start,
    Loaded(DatasetSummary),
    Failed(DashboardError),
    Reset,
}

impl fmt::Display for LoadEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Start => write!(f, "Start"),
            Self::Loaded(summary) => write!(f, "Loaded({} rows)", summary.risk_rows),
            Self::Failed(e) => write!(f, "Failed({e})"),
            Self::Reset => write!(f, "Reset"),
        }
    }
}

#[derive(Debug)]
pub struct StateTransitionError {
    from: LoadState,
    event: LoadEvent,
}

impl fmt::Display for StateTransitionError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Invalid transition from {} with event {}",
            self.from, self.event
        )
    }
}

impl std::error::Error for StateTransitionError {}

/// Drives the status line through a dataset load.
pub struct LoadMachine {
    state: LoadState,
}

impl LoadMachine {
    pub const fn new(initial_state: LoadState) -> Self {
        Self {
            state: initial_state,
        }
    }

    pub const fn state(&self) -> LoadState {
        self.state
    }

    pub fn process_event(
        &mut self,
        event: &LoadEvent,
        app: &mut App,
    ) -> std::result::Result<(), StateTransitionError> {
        let next_state = NextState::try_from((self.state, event, app))?;
        self.state = next_state.0;
        Ok(())
    }
}

struct NextState(LoadState);

impl TryFrom<(LoadState, &LoadEvent, &mut App)> for NextState {
    type Error = StateTransitionError;

    fn try_from(
        value: (LoadState, &LoadEvent, &mut App),
    ) -> std::result::Result<Self, Self::Error> {
        let (current_state, event, app) = value;

        match (current_state, event) {
            (LoadState::Idle, LoadEvent::Start) => {
                app.status_message = "Loading data...".to_string();
                Ok(Self(LoadState::Loading))
            }
            (LoadState::Loading, LoadEvent::Loaded(summary)) => {
                app.status_message = format!(
                    "Loaded {} rows covering {} cancer types",
                    summary.risk_rows, summary.cancer_types
                );
                app.reload_requested = false;
                Ok(Self(LoadState::Ready))
            }
            (LoadState::Loading, LoadEvent::Failed(e)) => {
                app.status_message = format!("Error: {}", e.guidance());
                app.reload_requested = false;
                Ok(Self(LoadState::Failed))
            }
            (LoadState::Ready | LoadState::Failed, LoadEvent::Reset) => Ok(Self(LoadState::Idle)),
            _ => Err(StateTransitionError {
                from: current_state,
                event: event.clone(),
            }),
        }
    }
}

/// Loads the dataset once, walking the machine through its states.
async fn load_with_machine(machine: &mut LoadMachine, app: &mut App) {
    if let Err(e) = machine.process_event(&LoadEvent::Start, app) {
        warn!("{e}");
        return;
    }

    let outcome = match app.load_dataset().await {
        Ok(summary) => LoadEvent::Loaded(summary),
        Err(e) => {
            error!("dataset load failed: {e}");
            LoadEvent::Failed(e)
        }
    };

    for event in [outcome, LoadEvent::Reset] {
        if let Err(e) = machine.process_event(&event, app) {
            warn!("{e}");
        }
    }
}

/// Run the application in headless mode (no UI)
pub async fn run_headless(
    app: &mut App,
    filters: FilterState,
    cancer: Option<String>,
    json: bool,
) -> Result<()> {
    let summary = match app.attach_dataset().await {
        Ok(summary) => summary,
        Err(e) => {
            error!("dataset load failed: {e}");
            if json {
                let report = serde_json::json!({ "error": e, "guidance": e.guidance() });
                println!("{}", serde_json::to_string_pretty(&report)?);
            } else {
                println!("Data unavailable: {e}");
                println!("{}", e.guidance());
            }
            return Ok(());
        }
    };

    let Some(dataset) = app.dataset.clone() else {
        return Ok(());
    };

    let mut session = Session {
        filters,
        selection: app.session.selection.clone(),
    };
    if let Some(cancer) = cancer {
        session = session.on_heatmap_cell_click(&cancer);
    }

    let pass = run_pass(&dataset, &session);
    info!(rows = pass.matched_rows, "headless pass finished");

    if json {
        render_headless_json(summary, &pass)
    } else {
        render_headless_stats(summary, &pass);
        Ok(())
    }
}

fn render_headless_stats(summary: DatasetSummary, pass: &DashboardPass) {
    println!("\nCancer Risk Dashboard");
    println!("=====================");
    println!("Generated: {}", chrono::Local::now().format("%Y-%m-%d %H:%M"));
    println!("Risk rows: {}", summary.risk_rows);
    if let Some(deaths) = summary.deaths_rows {
        println!("Deaths rows: {deaths}");
    }
    println!(
        "Risk factors: {} | Cancer types: {} | States: {}",
        summary.risk_factors, summary.cancer_types, summary.states
    );
    println!("\n{}", pass.info_line());
    println!("Matched rows: {}", pass.matched_rows);
    println!(
        "Selected cancer: {}",
        pass.selected_cancer().unwrap_or("(none)")
    );

    println!("\nHeatmap:");
    match &pass.heatmap {
        Ok(chart) => {
            for cell in &chart.cells {
                println!("- {} | {} | {:.2}", cell.cause_name, cell.rei_name, cell.val);
            }
        }
        Err(e) => println!("  {}", e.guidance()),
    }

    println!("\nStates:");
    match &pass.map {
        Ok(chart) => {
            for state in &chart.states {
                println!(
                    "- {} ({}) | {:.2} over {} rows",
                    state.location_name, state.map_id, state.val, state.count
                );
            }
        }
        Err(e) => println!("  {}", e.guidance()),
    }

    println!("\nTrend:");
    match &pass.trend {
        Ok(chart) => {
            println!("  {}", chart.title.replace('\n', " | "));
            for series in &chart.series {
                let points = series
                    .points
                    .iter()
                    .map(|(year, val)| format!("{year:.0}: {val:.2}"))
                    .collect::<Vec<_>>()
                    .join(", ");
                println!("- {}: {points}", series.rei_name);
            }
        }
        Err(e) => println!("  {}", e.guidance()),
    }
}

fn render_headless_json(summary: DatasetSummary, pass: &DashboardPass) -> Result<()> {
    let report = HeadlessReport {
        generated_at: chrono::Local::now().to_rfc3339(),
        data: summary,
        pass,
    };
    let json = serde_json::to_string_pretty(&report)?;
    println!("{json}");
    Ok(())
}

#[derive(serde::Serialize)]
struct HeadlessReport<'a> {
    generated_at: String,
    data: DatasetSummary,
    pass: &'a DashboardPass,
}

/// Run the main application event loop
pub async fn run(terminal: &mut Terminal<CrosstermBackend<Stdout>>, app: &mut App) -> Result<()> {
    // Configure event poll timeout (ms)
    const EVENT_POLL_TIMEOUT: u64 = 50;

    let mut load_machine = LoadMachine::new(LoadState::Idle);

    loop {
        if let Err(e) = terminal.draw(|f| ui::ui(app, f)) {
            return Err(color_eyre::eyre::eyre!("Terminal draw error: {e}"));
        }

        if app.reload_requested && load_machine.state() == LoadState::Idle {
            load_with_machine(&mut load_machine, app).await;
            continue;
        }

        if matches!(
            event::poll(std::time::Duration::from_millis(EVENT_POLL_TIMEOUT)),
            Ok(true)
        ) {
            match event::read() {
                Ok(Event::Key(key)) if key.kind != KeyEventKind::Release => {
                    handle_input(app, key.code);
                    if !app.running {
                        break;
                    }
                }
                Ok(Event::Resize(_, _)) => {
                    // Redrawn at the top of the loop
                }
                Ok(_) | Err(_) => {}
            }
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use cancer_risk_dashboard::config::{AppConfig, DataPaths};
    use cancer_risk_dashboard::TimeSelection;
    use std::path::PathBuf;

    fn app() -> App {
        App::new(AppConfig {
            data: DataPaths::in_dir("missing"),
            log_file: PathBuf::from("test.log"),
            debug: false,
        })
    }

    fn summary() -> DatasetSummary {
        DatasetSummary {
            risk_rows: 12,
            deaths_rows: None,
            risk_factors: 2,
            cancer_types: 3,
            states: 2,
        }
    }

    #[test]
    fn successful_load_cycle() -> std::result::Result<(), StateTransitionError> {
        let mut app = app();
        let mut machine = LoadMachine::new(LoadState::Idle);

        machine.process_event(&LoadEvent::Start, &mut app)?;
        assert_eq!(machine.state(), LoadState::Loading);
        assert_eq!(app.status_message, "Loading data...");

        machine.process_event(&LoadEvent::Loaded(summary()), &mut app)?;
        assert_eq!(machine.state(), LoadState::Ready);
        assert!(!app.reload_requested);
        assert!(app.status_message.contains("12 rows"));

        machine.process_event(&LoadEvent::Reset, &mut app)?;
        assert_eq!(machine.state(), LoadState::Idle);
        Ok(())
    }

    #[test]
    fn failed_load_shows_guidance() -> std::result::Result<(), StateTransitionError> {
        let mut app = app();
        let mut machine = LoadMachine::new(LoadState::Idle);
        machine.process_event(&LoadEvent::Start, &mut app)?;

        let failure = DashboardError::data_unavailable("data/RateDALY.csv", "not found");
        machine.process_event(&LoadEvent::Failed(failure), &mut app)?;
        assert_eq!(machine.state(), LoadState::Failed);
        assert!(app.status_message.contains("stateCodes.csv"));
        Ok(())
    }

    #[test]
    fn invalid_transition_is_rejected() {
        let mut app = app();
        let mut machine = LoadMachine::new(LoadState::Idle);

        assert!(machine.process_event(&LoadEvent::Reset, &mut app).is_err());
        assert_eq!(machine.state(), LoadState::Idle);
    }

    #[tokio::test]
    async fn headless_runs_only_the_requested_pass() -> std::result::Result<(), Box<dyn std::error::Error>> {
        let dir = tempfile::tempdir()?;
        let paths = DataPaths::in_dir(dir.path());
        std::fs::write(&paths.state_codes, "state,mapid\nOhio,39\n")?;
        std::fs::write(
            &paths.risks,
            "location_name,cause_name,rei_name,year,val\n\
             Ohio,Bladder,Tobacco,2010,3\n\
             Ohio,Breast,Tobacco,2010,4\n",
        )?;
        let mut app = App::new(AppConfig {
            data: paths,
            log_file: PathBuf::from("test.log"),
            debug: false,
        });

        let filters = FilterState {
            selected_risks: std::iter::once("Tobacco".to_string()).collect(),
            time: TimeSelection::year(2010),
        };
        run_headless(&mut app, filters, Some("Bladder".to_string()), true)
            .await
            .map_err(|e| e.to_string())?;

        assert!(app.pass.is_none());
        assert!(app.summary.is_some());
        assert_eq!(app.session.selection.bound(), Some("Breast"));
        Ok(())
    }

    #[tokio::test]
    async fn missing_files_fail_without_caching() {
        let mut app = app();
        let mut machine = LoadMachine::new(LoadState::Idle);

        load_with_machine(&mut machine, &mut app).await;

        assert_eq!(machine.state(), LoadState::Idle);
        assert!(app.load_error.is_some());
        assert!(app.cache.get().is_none());
        assert!(app.status_message.starts_with("Error"));
    }
}
