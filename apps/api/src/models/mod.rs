pub mod analytics;
pub mod submission;
