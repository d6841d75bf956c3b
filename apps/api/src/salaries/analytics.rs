use serde::Serialize;
use sqlx::PgPool;

use crate::compensation::format::round_to;
use crate::models::analytics::{
    CompanyPayRow, GroupLabel, GroupPay, GroupPayRow, IndustryPayRow, LocationPayRow,
};

/// Groups smaller than this are left out of demographic and industry breakdowns.
pub const MIN_GROUP_SIZE: i64 = 5;
const MIN_LOCATION_SIZE: i64 = 3;
const MIN_COMPANY_MATCH_SIZE: i64 = 2;
const MIN_TOP_COMPANY_SIZE: i64 = 3;

#[derive(Debug, Clone, Copy)]
pub enum Demographic {
    Gender,
    Ethnicity,
}

impl Demographic {
    fn column(self) -> &'static str {
        match self {
            Demographic::Gender => "gender",
            Demographic::Ethnicity => "ethnicity",
        }
    }

    fn label(self, name: String) -> GroupLabel {
        match self {
            Demographic::Gender => GroupLabel::Gender(name),
            Demographic::Ethnicity => GroupLabel::Ethnicity(name),
        }
    }

    fn group_pay(self, row: GroupPayRow) -> GroupPay {
        GroupPay {
            group: self.label(row.group_name),
            count: row.count,
            avg_salary: row.avg_salary,
            median_salary: row.median_salary,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct GapSummary {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub gender_gap_percentage: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub female_cents_per_dollar: Option<f64>,
}

/// Gender pay gap from the group averages. Empty when either the `Male` or
/// `Female` group is missing or averages zero.
pub fn gap_summary(gender_breakdown: &[GroupPay]) -> GapSummary {
    let average_of = |name: &str| {
        gender_breakdown
            .iter()
            .find(|row| matches!(&row.group, GroupLabel::Gender(gender) if gender == name))
            .map(|row| row.avg_salary)
            .filter(|avg| *avg > 0.0)
    };

    match (average_of("Male"), average_of("Female")) {
        (Some(male), Some(female)) => GapSummary {
            gender_gap_percentage: Some(round_to((male - female) / male * 100.0, 1)),
            female_cents_per_dollar: Some((female / male * 100.0).round()),
        },
        _ => GapSummary::default(),
    }
}

pub async fn pay_by_group(pool: &PgPool, demographic: Demographic) -> Result<Vec<GroupPay>, sqlx::Error> {
    let column = demographic.column();
    let sql = format!(
        r#"
        SELECT
            {column} AS group_name,
            COUNT(*) AS count,
            AVG(salary) AS avg_salary,
            percentile_cont(0.5) WITHIN GROUP (ORDER BY salary) AS median_salary
        FROM salary_submissions
        WHERE {column} IS NOT NULL
        GROUP BY {column}
        HAVING COUNT(*) >= $1
        ORDER BY avg_salary DESC
        "#
    );
    let rows = sqlx::query_as::<_, GroupPayRow>(&sql)
        .bind(MIN_GROUP_SIZE)
        .fetch_all(pool)
        .await?;
    Ok(rows.into_iter().map(|row| demographic.group_pay(row)).collect())
}

pub async fn industry_comparison(pool: &PgPool) -> Result<Vec<IndustryPayRow>, sqlx::Error> {
    sqlx::query_as::<_, IndustryPayRow>(
        r#"
        SELECT
            industry,
            COUNT(*) AS sample_size,
            AVG(salary) AS avg_salary,
            percentile_cont(0.50) WITHIN GROUP (ORDER BY salary) AS median_salary,
            percentile_cont(0.25) WITHIN GROUP (ORDER BY salary) AS p25,
            percentile_cont(0.75) WITHIN GROUP (ORDER BY salary) AS p75,
            percentile_cont(0.90) WITHIN GROUP (ORDER BY salary) AS p90
        FROM salary_submissions
        GROUP BY industry
        HAVING COUNT(*) >= $1
        ORDER BY median_salary DESC
        "#,
    )
    .bind(MIN_GROUP_SIZE)
    .fetch_all(pool)
    .await
}

pub async fn location_comparison(pool: &PgPool) -> Result<Vec<LocationPayRow>, sqlx::Error> {
    sqlx::query_as::<_, LocationPayRow>(
        r#"
        SELECT
            location,
            COUNT(*) AS sample_size,
            AVG(salary) AS avg_salary,
            percentile_cont(0.5) WITHIN GROUP (ORDER BY salary) AS median_salary,
            MIN(salary) AS min_salary,
            MAX(salary) AS max_salary
        FROM salary_submissions
        GROUP BY location
        HAVING COUNT(*) >= $1
        ORDER BY median_salary DESC
        LIMIT 20
        "#,
    )
    .bind(MIN_LOCATION_SIZE)
    .fetch_all(pool)
    .await
}

/// Employers whose name contains `company` (case-insensitive), or the most
/// reported employers when `company` is `None`.
pub async fn company_comparison(
    pool: &PgPool,
    company: Option<&str>,
) -> Result<Vec<CompanyPayRow>, sqlx::Error> {
    match company {
        Some(needle) => {
            sqlx::query_as::<_, CompanyPayRow>(
                r#"
                SELECT
                    company_name,
                    COUNT(*) AS sample_size,
                    AVG(salary) AS avg_salary,
                    percentile_cont(0.50) WITHIN GROUP (ORDER BY salary) AS median_salary,
                    percentile_cont(0.25) WITHIN GROUP (ORDER BY salary) AS p25,
                    percentile_cont(0.75) WITHIN GROUP (ORDER BY salary) AS p75,
                    MIN(salary) AS min_salary,
                    MAX(salary) AS max_salary
                FROM salary_submissions
                WHERE company_name IS NOT NULL
                  AND company_name <> ''
                  AND STRPOS(LOWER(company_name), LOWER($1)) > 0
                GROUP BY company_name
                HAVING COUNT(*) >= $2
                ORDER BY sample_size DESC
                LIMIT 10
                "#,
            )
            .bind(needle)
            .bind(MIN_COMPANY_MATCH_SIZE)
            .fetch_all(pool)
            .await
        }
        None => {
            sqlx::query_as::<_, CompanyPayRow>(
                r#"
                SELECT
                    company_name,
                    COUNT(*) AS sample_size,
                    AVG(salary) AS avg_salary,
                    percentile_cont(0.50) WITHIN GROUP (ORDER BY salary) AS median_salary,
                    percentile_cont(0.25) WITHIN GROUP (ORDER BY salary) AS p25,
                    percentile_cont(0.75) WITHIN GROUP (ORDER BY salary) AS p75,
                    NULL::FLOAT8 AS min_salary,
                    NULL::FLOAT8 AS max_salary
                FROM salary_submissions
                WHERE company_name IS NOT NULL
                  AND company_name <> ''
                GROUP BY company_name
                HAVING COUNT(*) >= $1
                ORDER BY sample_size DESC
                LIMIT 20
                "#,
            )
            .bind(MIN_TOP_COMPANY_SIZE)
            .fetch_all(pool)
            .await
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn group(name: &str, avg_salary: f64) -> GroupPay {
        Demographic::Gender.group_pay(GroupPayRow {
            group_name: name.to_string(),
            count: 40,
            avg_salary,
            median_salary: avg_salary,
        })
    }

    #[test]
    fn test_gap_summary_from_averages() {
        let summary = gap_summary(&[group("Male", 100_000.0), group("Female", 87_000.0)]);
        assert_eq!(summary.gender_gap_percentage, Some(13.0));
        assert_eq!(summary.female_cents_per_dollar, Some(87.0));
    }

    #[test]
    fn test_gap_summary_rounding() {
        let summary = gap_summary(&[group("Female", 81_234.0), group("Male", 97_500.0)]);
        // (97500 - 81234) / 97500 = 16.683%
        assert_eq!(summary.gender_gap_percentage, Some(16.7));
        assert_eq!(summary.female_cents_per_dollar, Some(83.0));
    }

    #[test]
    fn test_gap_summary_missing_group_is_empty() {
        let summary = gap_summary(&[group("Male", 100_000.0), group("Non-binary", 91_000.0)]);
        assert_eq!(summary, GapSummary::default());
        assert_eq!(serde_json::to_value(&summary).unwrap(), serde_json::json!({}));
    }

    #[test]
    fn test_gap_summary_zero_average_is_empty() {
        let summary = gap_summary(&[group("Male", 0.0), group("Female", 50_000.0)]);
        assert_eq!(summary, GapSummary::default());
    }

    #[test]
    fn test_group_pay_keyed_by_demographic() {
        let value = serde_json::to_value(group("Female", 87_000.0)).unwrap();
        assert_eq!(value["gender"], "Female");
        assert_eq!(value["count"], 40);
        assert_eq!(value["avg_salary"], 87_000.0);
        assert!(value.get("group_name").is_none());

        let row = GroupPayRow {
            group_name: "Asian".to_string(),
            count: 12,
            avg_salary: 95_000.0,
            median_salary: 93_000.0,
        };
        let value = serde_json::to_value(Demographic::Ethnicity.group_pay(row)).unwrap();
        assert_eq!(value["ethnicity"], "Asian");
        assert!(value.get("gender").is_none());
    }

    #[test]
    fn test_gap_summary_ignores_other_demographics() {
        let breakdown = [
            group("Male", 100_000.0),
            Demographic::Ethnicity.group_pay(GroupPayRow {
                group_name: "Female".to_string(),
                count: 40,
                avg_salary: 50_000.0,
                median_salary: 50_000.0,
            }),
        ];
        assert_eq!(gap_summary(&breakdown), GapSummary::default());
    }

    #[test]
    fn test_demographic_columns() {
        assert_eq!(Demographic::Gender.column(), "gender");
        assert_eq!(Demographic::Ethnicity.column(), "ethnicity");
    }
}
