use std::sync::Arc;

use sqlx::PgPool;

use crate::compensation::advice::AdviceGenerator;
use crate::config::Config;

/// Shared application state injected into all route handlers via Axum extractors.
#[derive(Clone)]
pub struct AppState {
    pub db: PgPool,
    pub config: Config,
    /// LLM-backed when an API key is configured, rule-based otherwise.
    pub advisor: Arc<dyn AdviceGenerator>,
}
