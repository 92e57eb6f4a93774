// Data module for the dashboard
// Loads, joins and caches the exposure tables

pub mod cache;
pub mod loader;
pub mod models;

pub use cache::DatasetCache;
pub use loader::DataLoader;
pub use models::{DatasetSummary, ExposureDataset, ExposureRecord};
