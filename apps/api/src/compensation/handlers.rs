//! Axum route handlers for comparison, negotiation and advice.

use axum::{extract::State, Json};
use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use crate::compensation::advice::{rule_based_advice, AdviceContext, GeneratedAdvice, FALLBACK_MODEL};
use crate::compensation::company::lookup_company;
use crate::compensation::comparison::{compare, Comparison};
use crate::compensation::script::{build_script, increase_percent, NegotiationScript, ScriptRequest};
use crate::compensation::store::{
    empirical_rank, market_for_comparison, market_for_script, DistributionFilter,
};
use crate::errors::AppError;
use crate::salaries::submission::MAX_YEARS_EXPERIENCE;
use crate::state::AppState;

// ────────────────────────────────────────────────────────────────────────────
// Request / Response types
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Deserialize)]
pub struct CompareRequest {
    pub job_title: String,
    pub industry: String,
    pub years_experience: i32,
    pub salary: f64,
    pub location: String,
    #[serde(default)]
    pub company_name: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct CompareResponse {
    pub comparison: Comparison,
}

#[derive(Debug, Deserialize)]
pub struct NegotiationScriptRequest {
    pub current_salary: f64,
    pub target_salary: f64,
    pub job_title: String,
    #[serde(default)]
    pub achievements: Vec<String>,
    #[serde(default = "default_industry")]
    pub industry: String,
    #[serde(default)]
    pub location: String,
}

fn default_industry() -> String {
    "Technology".to_string()
}

#[derive(Debug, Serialize)]
pub struct NegotiationScriptResponse {
    pub script: NegotiationScript,
}

#[derive(Debug, Serialize)]
pub struct AdviceResponse {
    #[serde(flatten)]
    pub advice: GeneratedAdvice,
    pub powered_by: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl AdviceResponse {
    fn new(advice: GeneratedAdvice, error: Option<String>) -> Self {
        let powered_by = if advice.model == FALLBACK_MODEL {
            "CounterMarket"
        } else {
            "CounterMarket AI + knowledge base"
        };
        Self {
            advice,
            powered_by,
            error,
        }
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Handlers
// ────────────────────────────────────────────────────────────────────────────

/// POST /api/salary/compare
///
/// Positions a salary against its peer group, optionally re-scaled to an employer.
pub async fn handle_compare(
    State(state): State<AppState>,
    Json(request): Json<CompareRequest>,
) -> Result<Json<CompareResponse>, AppError> {
    if !request.salary.is_finite() || request.salary <= 0.0 {
        return Err(AppError::Validation("salary must be a positive number".to_string()));
    }
    if !(0..=MAX_YEARS_EXPERIENCE).contains(&request.years_experience) {
        return Err(AppError::Validation(format!(
            "years_experience must be between 0 and {MAX_YEARS_EXPERIENCE}"
        )));
    }
    if request.industry.trim().is_empty() {
        return Err(AppError::Validation("industry cannot be empty".to_string()));
    }

    let settings = &state.config.engine;
    let market = market_for_comparison(
        &state.db,
        settings,
        &request.industry,
        request.years_experience,
    )
    .await?;

    let company = request.company_name.as_deref().and_then(lookup_company);
    if let (Some(name), None) = (request.company_name.as_deref(), company) {
        if !name.trim().is_empty() {
            info!(company = name, "No pay overlay for company, using market rates");
        }
    }

    let peer_filter =
        DistributionFilter::around_experience(request.years_experience, settings.experience_window)
            .industry(&request.industry);
    let empirical = empirical_rank(&state.db, request.salary, &peer_filter).await?;

    let comparison = compare(request.salary, &market, company, empirical);
    debug!(
        percentile = comparison.percentile_rank,
        band = comparison.band.as_str(),
        sample_size = comparison.sample_size,
        "Salary compared"
    );

    Ok(Json(CompareResponse { comparison }))
}

/// POST /api/negotiation/script
///
/// Builds a data-backed negotiation script from the requester's peer market.
pub async fn handle_negotiation_script(
    State(state): State<AppState>,
    Json(request): Json<NegotiationScriptRequest>,
) -> Result<Json<NegotiationScriptResponse>, AppError> {
    // Reject before touching the database.
    increase_percent(request.current_salary, request.target_salary)?;
    if !request.target_salary.is_finite() {
        return Err(AppError::Validation("target_salary must be a number".to_string()));
    }

    let market = market_for_script(
        &state.db,
        &state.config.engine,
        &request.industry,
        &request.location,
    )
    .await?;

    let script = build_script(
        &ScriptRequest {
            job_title: &request.job_title,
            current_salary: request.current_salary,
            target_salary: request.target_salary,
            achievements: &request.achievements,
            industry: &request.industry,
            location: &request.location,
        },
        &market,
    )?;

    Ok(Json(NegotiationScriptResponse { script }))
}

/// POST /api/chatbot/advice
///
/// Never fails on generator errors: the rule-based advice is returned instead.
pub async fn handle_advice(
    State(state): State<AppState>,
    Json(context): Json<AdviceContext>,
) -> Json<AdviceResponse> {
    match state.advisor.generate(&context).await {
        Ok(advice) => Json(AdviceResponse::new(advice, None)),
        Err(e) => {
            warn!("Advice generator failed, serving rule-based advice: {e}");
            Json(AdviceResponse::new(
                rule_based_advice(&context),
                Some(e.to_string()),
            ))
        }
    }
}
