use dotenv::dotenv;
use std::env;
use std::path::{Path, PathBuf};

pub const DEFAULT_DATA_DIR: &str = "./data";
pub const DEFAULT_RISKS_FILE: &str = "RateDALY.csv";
pub const DEFAULT_STATE_CODES_FILE: &str = "stateCodes.csv";
pub const DEFAULT_DEATHS_FILE: &str = "Deaths.csv";
pub const DEFAULT_LOG_FILE: &str = "cancer-dashboard.log";

/// Locations of the three input tables.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DataPaths {
    pub risks: PathBuf,
    pub state_codes: PathBuf,
    pub deaths: PathBuf,
}

impl DataPaths {
    /// Default file names inside `dir`.
    pub fn in_dir(dir: impl AsRef<Path>) -> Self {
        let dir = dir.as_ref();
        Self {
            risks: dir.join(DEFAULT_RISKS_FILE),
            state_codes: dir.join(DEFAULT_STATE_CODES_FILE),
            deaths: dir.join(DEFAULT_DEATHS_FILE),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppConfig {
    pub data: DataPaths,
    pub log_file: PathBuf,
    pub debug: bool,
}

/// Initializes the application configuration from `.env` and the process
/// environment.
pub fn init_app_config() -> AppConfig {
    // Load environment variables from .env file
    dotenv().ok();

    config_from(|key| env::var(key).ok())
}

/// Builds the configuration from an arbitrary variable source.
pub fn config_from(var: impl Fn(&str) -> Option<String>) -> AppConfig {
    let data_dir = var("DATA_DIR")
        .filter(|value| !value.trim().is_empty())
        .map_or_else(|| PathBuf::from(DEFAULT_DATA_DIR), PathBuf::from);

    let file = |key: &str, default: &str| {
        let name = var(key).filter(|value| !value.trim().is_empty());
        resolve_data_file(&data_dir, name.as_deref().unwrap_or(default))
    };

    let data = DataPaths {
        risks: file("RISKS_FILE", DEFAULT_RISKS_FILE),
        state_codes: file("STATE_CODES_FILE", DEFAULT_STATE_CODES_FILE),
        deaths: file("DEATHS_FILE", DEFAULT_DEATHS_FILE),
    };

    let log_file = var("LOG_FILE").map_or_else(|| PathBuf::from(DEFAULT_LOG_FILE), PathBuf::from);
    let debug = var("DEBUG").is_some_and(|value| is_truthy(&value));

    AppConfig {
        data,
        log_file,
        debug,
    }
}

/// Relative names live under the data directory; absolute paths are kept.
pub fn resolve_data_file(data_dir: &Path, name: &str) -> PathBuf {
    let path = Path::new(name);
    if path.is_absolute() {
        path.to_path_buf()
    } else {
        data_dir.join(path)
    }
}

fn is_truthy(value: &str) -> bool {
    matches!(
        value.trim().to_lowercase().as_str(),
        "1" | "true" | "yes" | "on"
    )
}
