pub mod about;
pub mod dashboard;
pub mod help;
