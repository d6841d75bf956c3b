use serde::Deserialize;
use sqlx::{postgres::PgArguments, query::Query, PgPool, Postgres};
use tracing::info;
use uuid::Uuid;

use crate::errors::AppError;
use crate::models::submission::NewSubmission;

pub const MAX_YEARS_EXPERIENCE: i32 = 70;

/// Body of `POST /api/salary/submit`.
#[derive(Debug, Clone, Deserialize)]
pub struct SubmitRequest {
    pub job_title: String,
    pub industry: String,
    pub years_experience: i32,
    pub salary: f64,
    pub location: String,
    #[serde(default)]
    pub gender: Option<String>,
    #[serde(default)]
    pub ethnicity: Option<String>,
    #[serde(default)]
    pub education_level: Option<String>,
    #[serde(default)]
    pub company_size: Option<String>,
    #[serde(default)]
    pub company_name: Option<String>,
    #[serde(default)]
    pub remote_status: Option<String>,
}

impl SubmitRequest {
    /// Trims text fields, drops blank optionals and rejects out-of-range numbers.
    pub fn validate(self) -> Result<NewSubmission, AppError> {
        let job_title = required("job_title", self.job_title)?;
        let industry = required("industry", self.industry)?;
        let location = required("location", self.location)?;

        if !self.salary.is_finite() || self.salary <= 0.0 {
            return Err(AppError::Validation("salary must be a positive number".to_string()));
        }
        if !(0..=MAX_YEARS_EXPERIENCE).contains(&self.years_experience) {
            return Err(AppError::Validation(format!(
                "years_experience must be between 0 and {MAX_YEARS_EXPERIENCE}"
            )));
        }

        Ok(NewSubmission {
            job_title,
            industry,
            years_experience: self.years_experience,
            salary: self.salary,
            location,
            gender: optional(self.gender),
            ethnicity: optional(self.ethnicity),
            education_level: optional(self.education_level),
            company_size: optional(self.company_size),
            company_name: optional(self.company_name),
            remote_status: optional(self.remote_status),
            created_at: None,
        })
    }
}

fn required(field: &str, value: String) -> Result<String, AppError> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(AppError::Validation(format!("{field} cannot be empty")));
    }
    Ok(trimmed.to_string())
}

fn optional(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

/// Opaque 32-char hex identifier for an anonymous submission.
pub fn new_submission_id() -> String {
    Uuid::new_v4().simple().to_string()
}

fn insert_query<'a>(id: &'a str, s: &'a NewSubmission) -> Query<'a, Postgres, PgArguments> {
    sqlx::query(
        r#"
        INSERT INTO salary_submissions
            (id, job_title, industry, years_experience, salary, location, gender,
             ethnicity, education_level, company_size, company_name, remote_status, created_at)
        VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, COALESCE($13, NOW()))
        "#,
    )
    .bind(id)
    .bind(&s.job_title)
    .bind(&s.industry)
    .bind(s.years_experience)
    .bind(s.salary)
    .bind(&s.location)
    .bind(s.gender.as_deref())
    .bind(s.ethnicity.as_deref())
    .bind(s.education_level.as_deref())
    .bind(s.company_size.as_deref())
    .bind(s.company_name.as_deref())
    .bind(s.remote_status.as_deref())
    .bind(s.created_at)
}

pub async fn insert_submission(pool: &PgPool, submission: &NewSubmission) -> Result<String, sqlx::Error> {
    let id = new_submission_id();
    insert_query(&id, submission).execute(pool).await?;
    Ok(id)
}

/// Inserts every submission in one transaction. Returns the number written.
pub async fn insert_many(pool: &PgPool, submissions: &[NewSubmission]) -> Result<usize, sqlx::Error> {
    let mut tx = pool.begin().await?;
    for submission in submissions {
        let id = new_submission_id();
        insert_query(&id, submission).execute(&mut *tx).await?;
    }
    tx.commit().await?;

    info!("Inserted {} salary submissions", submissions.len());
    Ok(submissions.len())
}

pub async fn count_submissions(pool: &PgPool) -> Result<i64, sqlx::Error> {
    sqlx::query_scalar("SELECT COUNT(*) FROM salary_submissions")
        .fetch_one(pool)
        .await
}

pub async fn delete_all(pool: &PgPool) -> Result<u64, sqlx::Error> {
    let result = sqlx::query("DELETE FROM salary_submissions")
        .execute(pool)
        .await?;
    Ok(result.rows_affected())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn request() -> SubmitRequest {
        SubmitRequest {
            job_title: "  Data Analyst ".to_string(),
            industry: "Finance".to_string(),
            years_experience: 4,
            salary: 82_000.0,
            location: "Chicago, IL".to_string(),
            gender: Some("Female".to_string()),
            ethnicity: Some("   ".to_string()),
            education_level: None,
            company_size: None,
            company_name: Some(" Stripe ".to_string()),
            remote_status: None,
        }
    }

    #[test]
    fn test_validate_trims_and_drops_blank_optionals() {
        let submission = request().validate().unwrap();
        assert_eq!(submission.job_title, "Data Analyst");
        assert_eq!(submission.gender.as_deref(), Some("Female"));
        assert_eq!(submission.ethnicity, None);
        assert_eq!(submission.company_name.as_deref(), Some("Stripe"));
        assert_eq!(submission.created_at, None);
    }

    #[test]
    fn test_validate_rejects_blank_required_field() {
        let mut req = request();
        req.location = " ".to_string();
        assert!(matches!(req.validate(), Err(AppError::Validation(msg)) if msg.contains("location")));
    }

    #[test]
    fn test_validate_rejects_bad_salary() {
        for salary in [0.0, -5_000.0, f64::NAN, f64::INFINITY] {
            let mut req = request();
            req.salary = salary;
            assert!(matches!(req.validate(), Err(AppError::Validation(_))));
        }
    }

    #[test]
    fn test_validate_rejects_bad_experience() {
        for years in [-1, 71] {
            let mut req = request();
            req.years_experience = years;
            assert!(matches!(req.validate(), Err(AppError::Validation(_))));
        }
    }

    #[test]
    fn test_submission_ids_are_unique_hex() {
        let a = new_submission_id();
        let b = new_submission_id();
        assert_eq!(a.len(), 32);
        assert!(a.chars().all(|c| c.is_ascii_hexdigit()));
        assert_ne!(a, b);
    }
}
