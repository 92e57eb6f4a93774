pub mod choropleth;
pub mod filters;
pub mod heatmap;
pub mod notice;
pub mod palette;
pub mod popup;
pub mod tables;
pub mod trend;
