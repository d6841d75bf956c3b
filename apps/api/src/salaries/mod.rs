// Salary submissions: intake, synthetic seed data and aggregate analytics.

pub mod analytics;
pub mod handlers;
pub mod sample;
pub mod submission;
