use cancer_risk_dashboard::config::AppConfig;
use color_eyre::eyre::eyre;
use color_eyre::Result;
use std::fs::OpenOptions;
use std::sync::Mutex;
use tracing_subscriber::{fmt, EnvFilter};

/// Installs the global subscriber. `RUST_LOG` takes precedence, falling back
/// to `info`, or `debug` when debugging is on.
///
/// The interactive UI owns the terminal, so it logs to the configured file.
/// Headless runs log to stderr to keep stdout clean for the report.
pub fn init_logging(config: &AppConfig, headless: bool) -> Result<()> {
    let default_level = if config.debug { "debug" } else { "info" };
    let env = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    let installed = if headless {
        fmt()
            .with_env_filter(env)
            .with_target(false)
            .with_writer(std::io::stderr)
            .try_init()
    } else {
        let file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&config.log_file)?;
        fmt()
            .with_env_filter(env)
            .with_ansi(false)
            .with_writer(Mutex::new(file))
            .try_init()
    };

    installed.map_err(|e| eyre!("failed to initialize logging: {e}"))
}
