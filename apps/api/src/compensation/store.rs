//! Distribution lookups against `salary_submissions`.
//!
//! Aggregation happens in PostgreSQL; this module only narrows or widens the
//! peer group until enough rows match.

use sqlx::PgPool;
use tracing::{debug, info};

use crate::compensation::distribution::{DistributionRow, DistributionSummary};
use crate::config::EngineSettings;
use crate::errors::AppError;

/// Peer-group filter. `None` fields are unconstrained.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct DistributionFilter<'a> {
    pub industry: Option<&'a str>,
    /// Inclusive `(min, max)` years of experience.
    pub experience: Option<(i32, i32)>,
    pub location: Option<&'a str>,
}

impl<'a> DistributionFilter<'a> {
    pub fn around_experience(years: i32, window: i32) -> Self {
        Self {
            experience: Some((years.saturating_sub(window), years.saturating_add(window))),
            ..Self::default()
        }
    }

    pub fn industry(mut self, industry: &'a str) -> Self {
        self.industry = Some(industry);
        self
    }

    pub fn location(mut self, location: &'a str) -> Self {
        self.location = Some(location);
        self
    }
}

pub async fn fetch_distribution(
    pool: &PgPool,
    filter: &DistributionFilter<'_>,
) -> Result<DistributionRow, sqlx::Error> {
    sqlx::query_as::<_, DistributionRow>(
        r#"
        SELECT
            COUNT(*) AS sample_size,
            AVG(salary) AS mean,
            percentile_cont(0.50) WITHIN GROUP (ORDER BY salary) AS median,
            percentile_cont(0.25) WITHIN GROUP (ORDER BY salary) AS p25,
            percentile_cont(0.75) WITHIN GROUP (ORDER BY salary) AS p75,
            percentile_cont(0.90) WITHIN GROUP (ORDER BY salary) AS p90,
            MIN(salary) AS min_salary,
            MAX(salary) AS max_salary,
            STDDEV(salary) AS stddev
        FROM salary_submissions
        WHERE ($1::TEXT IS NULL OR LOWER(industry) = LOWER($1))
          AND ($2::INT IS NULL OR years_experience BETWEEN $2 AND $3)
          AND ($4::TEXT IS NULL OR location = $4)
        "#,
    )
    .bind(filter.industry)
    .bind(filter.experience.map(|(min, _)| min))
    .bind(filter.experience.map(|(_, max)| max))
    .bind(filter.location)
    .fetch_one(pool)
    .await
}

/// Converts an aggregation row, treating an empty peer group as `None`.
pub fn summarize(row: DistributionRow) -> Result<Option<DistributionSummary>, AppError> {
    if row.sample_size <= 0 {
        return Ok(None);
    }
    Ok(Some(DistributionSummary::try_from(row)?))
}

/// Comparison peer groups, narrowest first: industry within the experience
/// window, then every industry within the broader window.
pub fn comparison_candidates<'a>(
    settings: &EngineSettings,
    industry: &'a str,
    years_experience: i32,
) -> [DistributionFilter<'a>; 2] {
    [
        DistributionFilter::around_experience(years_experience, settings.experience_window)
            .industry(industry),
        DistributionFilter::around_experience(years_experience, settings.broad_experience_window),
    ]
}

/// Script peer groups narrowed by industry: with location (skipped when
/// empty), then industry alone. The unfiltered group is the final fallback.
pub fn script_candidates<'a>(industry: &'a str, location: &'a str) -> Vec<DistributionFilter<'a>> {
    let by_industry = DistributionFilter::default().industry(industry);
    let mut candidates = Vec::with_capacity(2);
    if !location.is_empty() {
        candidates.push(by_industry.location(location));
    }
    candidates.push(by_industry);
    candidates
}

pub fn meets_minimum(row: &DistributionRow, min_sample: i64) -> bool {
    row.sample_size > 0 && row.sample_size >= min_sample
}

pub async fn market_for_comparison(
    pool: &PgPool,
    settings: &EngineSettings,
    industry: &str,
    years_experience: i32,
) -> Result<DistributionSummary, AppError> {
    for filter in comparison_candidates(settings, industry, years_experience) {
        if let Some(dist) = summarize(fetch_distribution(pool, &filter).await?)? {
            return Ok(dist);
        }
        info!(industry, years_experience, ?filter, "No comparison peers, widening");
    }
    Err(AppError::InsufficientData { sample_size: 0 })
}

/// Narrow script groups need `min_script_sample` rows; the unfiltered group
/// accepts any non-empty result. Anchors are rounded to whole units.
pub async fn market_for_script(
    pool: &PgPool,
    settings: &EngineSettings,
    industry: &str,
    location: &str,
) -> Result<DistributionSummary, AppError> {
    for filter in script_candidates(industry, location) {
        let row = fetch_distribution(pool, &filter).await?;
        if meets_minimum(&row, settings.min_script_sample) {
            if let Some(dist) = summarize(row)? {
                return Ok(dist.rounded());
            }
        }
        debug!(?filter, "Script peer group too small, widening");
    }

    summarize(fetch_distribution(pool, &DistributionFilter::default()).await?)?
        .map(|dist| dist.rounded())
        .ok_or(AppError::InsufficientData { sample_size: 0 })
}

/// Share of the peer group earning strictly less than `salary`, as a percentage.
pub async fn empirical_rank(
    pool: &PgPool,
    salary: f64,
    filter: &DistributionFilter<'_>,
) -> Result<Option<f64>, sqlx::Error> {
    sqlx::query_scalar::<_, Option<f64>>(
        r#"
        SELECT (COUNT(*) FILTER (WHERE salary < $1) * 100.0 / NULLIF(COUNT(*), 0))::FLOAT8
        FROM salary_submissions
        WHERE ($2::TEXT IS NULL OR LOWER(industry) = LOWER($2))
          AND ($3::INT IS NULL OR years_experience BETWEEN $3 AND $4)
          AND ($5::TEXT IS NULL OR location = $5)
        "#,
    )
    .bind(salary)
    .bind(filter.industry)
    .bind(filter.experience.map(|(min, _)| min))
    .bind(filter.experience.map(|(_, max)| max))
    .bind(filter.location)
    .fetch_one(pool)
    .await
}
