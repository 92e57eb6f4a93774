// Analysis module for the dashboard
// Filtering and per-view aggregation over the loaded dataset

pub mod aggregate;
pub mod filter;

pub use aggregate::{heatmap_means, state_means, trend_means, HeatmapCell, StateMean, TrendPoint};
pub use filter::filter;
