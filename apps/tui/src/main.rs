mod app;
mod cli;
mod event;
mod logging;
mod terminal;
mod ui;

use app::App;
use cancer_risk_dashboard::config::init_app_config;
use clap::Parser;
use cli::CliArgs;
use color_eyre::eyre::eyre;
use color_eyre::Result;
use tracing::info;

#[tokio::main]
async fn main() -> Result<()> {
    // Setup error handling
    color_eyre::install()?;

    let args = CliArgs::parse();
    args.apply_env_overrides();

    let config = init_app_config();
    let headless = args.headless || !is_terminal();
    logging::init_logging(&config, headless)?;
    info!(data = %config.data.risks.display(), headless, "starting");

    let mut app = App::new(config);

    if headless {
        let filters = args.filter_state().map_err(|e| eyre!(e))?;
        return event::run_headless(&mut app, filters, args.cancer.clone(), args.json).await;
    }

    let mut terminal = terminal::setup()?;

    let result = event::run(&mut terminal, &mut app).await;

    // Restore terminal
    terminal::cleanup(true, true);

    result
}

// Check if we're running in a terminal
fn is_terminal() -> bool {
    atty::is(atty::Stream::Stdout)
}
