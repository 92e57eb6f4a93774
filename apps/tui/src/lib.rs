// Export our modules for use in binaries and tests
pub mod analysis;
pub mod charts;
pub mod config;
pub mod data;
pub mod domain;
pub mod error;
pub mod geo;
pub mod pipeline;
pub mod selection;

pub use domain::{RiskCategory, TimeSelection};
pub use error::DashboardError;
pub use pipeline::{dispatch, run_pass, DashboardEvent, DashboardPass, FilterState, Session};
