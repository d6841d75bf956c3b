use axum::{extract::State, http::StatusCode, Json};
use serde_json::{json, Value};
use tracing::error;

use crate::salaries::submission::count_submissions;
use crate::state::AppState;

/// GET /
/// Service descriptor.
pub async fn index_handler() -> Json<Value> {
    Json(json!({
        "name": "CounterMarket API",
        "version": env!("CARGO_PKG_VERSION"),
        "description": "Salary transparency and negotiation backed by peer pay distributions",
        "features": [
            "Percentile positioning against industry and experience peers",
            "Employer-adjusted pay comparison",
            "Pay gap analytics by gender and ethnicity",
            "Data-backed negotiation scripts",
            "Knowledge-grounded negotiation advice"
        ]
    }))
}

/// GET /api/health
/// Reports database reachability and the number of stored submissions.
pub async fn health_handler(State(state): State<AppState>) -> (StatusCode, Json<Value>) {
    let timestamp = chrono::Utc::now().to_rfc3339();
    match count_submissions(&state.db).await {
        Ok(count) => (
            StatusCode::OK,
            Json(json!({
                "status": "healthy",
                "database": "postgresql",
                "data_points": count,
                "timestamp": timestamp
            })),
        ),
        Err(e) => {
            error!("Health check failed: {e}");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(json!({
                    "status": "error",
                    "error": "database unavailable",
                    "timestamp": timestamp
                })),
            )
        }
    }
}
