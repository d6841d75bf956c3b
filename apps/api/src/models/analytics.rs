use serde::Serialize;
use sqlx::FromRow;

/// Average and median pay for one demographic group, as aggregated.
#[derive(Debug, Clone, FromRow)]
pub struct GroupPayRow {
    pub group_name: String,
    pub count: i64,
    pub avg_salary: f64,
    pub median_salary: f64,
}

/// Group value keyed by its demographic, e.g. `"gender": "Female"`.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum GroupLabel {
    Gender(String),
    Ethnicity(String),
}

#[derive(Debug, Clone, Serialize)]
pub struct GroupPay {
    #[serde(flatten)]
    pub group: GroupLabel,
    pub count: i64,
    pub avg_salary: f64,
    pub median_salary: f64,
}

#[derive(Debug, Clone, Serialize, FromRow)]
pub struct IndustryPayRow {
    pub industry: String,
    pub sample_size: i64,
    pub avg_salary: f64,
    pub median_salary: f64,
    pub p25: f64,
    pub p75: f64,
    pub p90: f64,
}

#[derive(Debug, Clone, Serialize, FromRow)]
pub struct LocationPayRow {
    pub location: String,
    pub sample_size: i64,
    pub avg_salary: f64,
    pub median_salary: f64,
    pub min_salary: f64,
    pub max_salary: f64,
}

#[derive(Debug, Clone, Serialize, FromRow)]
pub struct CompanyPayRow {
    pub company_name: String,
    pub sample_size: i64,
    pub avg_salary: f64,
    pub median_salary: f64,
    pub p25: f64,
    pub p75: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub min_salary: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_salary: Option<f64>,
}
