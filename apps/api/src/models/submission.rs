use chrono::{DateTime, Utc};

/// A validated submission ready for insert. `id` is assigned on write;
/// `created_at` falls back to the database clock when `None`.
#[derive(Debug, Clone, PartialEq)]
pub struct NewSubmission {
    pub job_title: String,
    pub industry: String,
    pub years_experience: i32,
    pub salary: f64,
    pub location: String,
    pub gender: Option<String>,
    pub ethnicity: Option<String>,
    pub education_level: Option<String>,
    pub company_size: Option<String>,
    pub company_name: Option<String>,
    pub remote_status: Option<String>,
    pub created_at: Option<DateTime<Utc>>,
}
