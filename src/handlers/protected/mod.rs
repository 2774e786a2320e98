pub mod dashboard;
pub mod properties;
