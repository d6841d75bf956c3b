use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

use crate::compensation::distribution::PositioningError;

/// Application-level error type.
/// Implements `IntoResponse` so Axum handlers can return `Result<T, AppError>`.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Insufficient data: {sample_size} matching submissions")]
    InsufficientData { sample_size: u64 },

    #[error("Invalid distribution: {0}")]
    InvalidDistribution(String),

    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("LLM error: {0}")]
    Llm(String),

    #[error("Internal server error: {0}")]
    Internal(#[from] anyhow::Error),
}

impl From<PositioningError> for AppError {
    fn from(err: PositioningError) -> Self {
        match &err {
            PositioningError::InsufficientData { sample_size } => AppError::InsufficientData {
                sample_size: *sample_size,
            },
            PositioningError::NonMonotonicAnchors { .. } => {
                AppError::InvalidDistribution(err.to_string())
            }
            PositioningError::InvalidInput(msg) => AppError::Validation(msg.clone()),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, code, message) = match &self {
            AppError::Validation(msg) => (StatusCode::BAD_REQUEST, "VALIDATION_ERROR", msg.clone()),
            AppError::InsufficientData { sample_size } => (
                StatusCode::NOT_FOUND,
                "INSUFFICIENT_DATA",
                format!("Not enough salary data for this comparison (sample size {sample_size})"),
            ),
            AppError::InvalidDistribution(msg) => {
                tracing::warn!("Rejected distribution: {msg}");
                (
                    StatusCode::UNPROCESSABLE_ENTITY,
                    "INVALID_DISTRIBUTION",
                    msg.clone(),
                )
            }
            AppError::Database(e) => {
                tracing::error!("Database error: {e}");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "DATABASE_ERROR",
                    "A database error occurred".to_string(),
                )
            }
            AppError::Llm(msg) => {
                tracing::error!("LLM error: {msg}");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "LLM_ERROR",
                    "An AI processing error occurred".to_string(),
                )
            }
            AppError::Internal(e) => {
                tracing::error!("Internal error: {e:?}");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "INTERNAL_ERROR",
                    "An internal server error occurred".to_string(),
                )
            }
        };

        let body = Json(json!({
            "error": {
                "code": code,
                "message": message
            }
        }));

        (status, body).into_response()
    }
}
