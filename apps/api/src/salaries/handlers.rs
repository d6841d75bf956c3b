use axum::{
    extract::{Query, State},
    http::StatusCode,
    Json,
};
use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use crate::errors::AppError;
use crate::models::analytics::{CompanyPayRow, GroupPay, IndustryPayRow, LocationPayRow};
use crate::salaries::analytics::{
    company_comparison, gap_summary, industry_comparison, location_comparison, pay_by_group,
    Demographic, GapSummary,
};
use crate::salaries::sample::seed_sample_data;
use crate::salaries::submission::{delete_all, insert_submission, SubmitRequest};
use crate::state::AppState;

#[derive(Serialize)]
pub struct SubmitResponse {
    pub message: &'static str,
    pub id: String,
}

#[derive(Serialize)]
pub struct PayGapResponse {
    pub gender_breakdown: Vec<GroupPay>,
    pub ethnicity_breakdown: Vec<GroupPay>,
    pub gap_summary: GapSummary,
}

#[derive(Serialize)]
pub struct IndustryComparisonResponse {
    pub industries: Vec<IndustryPayRow>,
}

#[derive(Serialize)]
pub struct LocationComparisonResponse {
    pub locations: Vec<LocationPayRow>,
}

#[derive(Deserialize)]
pub struct CompanyQuery {
    #[serde(default)]
    pub company: Option<String>,
}

#[derive(Serialize)]
pub struct CompanyComparisonResponse {
    pub companies: Vec<CompanyPayRow>,
}

#[derive(Serialize)]
pub struct ResetResponse {
    pub message: String,
    pub records_created: usize,
}

/// POST /api/salary/submit
pub async fn handle_submit(
    State(state): State<AppState>,
    Json(req): Json<SubmitRequest>,
) -> Result<(StatusCode, Json<SubmitResponse>), AppError> {
    let submission = req.validate()?;
    let id = insert_submission(&state.db, &submission).await?;
    info!(%id, industry = %submission.industry, "Salary submission stored");
    Ok((
        StatusCode::CREATED,
        Json(SubmitResponse {
            message: "Salary data submitted successfully",
            id,
        }),
    ))
}

/// GET /api/analytics/pay-gap
pub async fn handle_pay_gap(State(state): State<AppState>) -> Result<Json<PayGapResponse>, AppError> {
    let (gender_breakdown, ethnicity_breakdown) = tokio::try_join!(
        pay_by_group(&state.db, Demographic::Gender),
        pay_by_group(&state.db, Demographic::Ethnicity),
    )?;
    let gap_summary = gap_summary(&gender_breakdown);
    Ok(Json(PayGapResponse {
        gender_breakdown,
        ethnicity_breakdown,
        gap_summary,
    }))
}

/// GET /api/analytics/industry-comparison
pub async fn handle_industry_comparison(
    State(state): State<AppState>,
) -> Result<Json<IndustryComparisonResponse>, AppError> {
    let industries = industry_comparison(&state.db).await?;
    Ok(Json(IndustryComparisonResponse { industries }))
}

/// GET /api/analytics/location-comparison
pub async fn handle_location_comparison(
    State(state): State<AppState>,
) -> Result<Json<LocationComparisonResponse>, AppError> {
    let locations = location_comparison(&state.db).await?;
    Ok(Json(LocationComparisonResponse { locations }))
}

/// GET /api/analytics/company-comparison?company=
pub async fn handle_company_comparison(
    State(state): State<AppState>,
    Query(params): Query<CompanyQuery>,
) -> Result<Json<CompanyComparisonResponse>, AppError> {
    let needle = params
        .company
        .as_deref()
        .map(str::trim)
        .filter(|c| !c.is_empty());
    let companies = company_comparison(&state.db, needle).await?;
    Ok(Json(CompanyComparisonResponse { companies }))
}

/// POST /api/admin/reset-data
/// Deletes every submission and regenerates the sample data set.
pub async fn handle_reset_data(State(state): State<AppState>) -> Result<Json<ResetResponse>, AppError> {
    let deleted = delete_all(&state.db).await?;
    warn!(deleted, "All salary submissions deleted");

    let records_created = seed_sample_data(&state.db, &state.config.sample).await?;
    Ok(Json(ResetResponse {
        message: format!("Data reset complete. Created {records_created} sample records."),
        records_created,
    }))
}
