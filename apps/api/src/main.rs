mod compensation;
mod config;
mod db;
mod errors;
mod knowledge;
mod llm_client;
mod models;
mod routes;
mod salaries;
mod state;

use anyhow::Result;
use std::net::SocketAddr;
use std::sync::Arc;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::compensation::advice::{AdviceGenerator, LlmAdvisor, RuleBasedAdvisor};
use crate::config::Config;
use crate::db::{create_pool, init_schema};
use crate::knowledge::KnowledgeBase;
use crate::llm_client::LlmClient;
use crate::routes::build_router;
use crate::salaries::sample::seed_sample_data;
use crate::salaries::submission::count_submissions;
use crate::state::AppState;

#[tokio::main]
async fn main() -> Result<()> {
    // Load configuration first (fails on missing required env vars)
    let config = Config::from_env()?;

    // Initialize structured logging
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new(format!("{}={}", env!("CARGO_PKG_NAME"), &config.rust_log))
        }))
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting CounterMarket API v{}", env!("CARGO_PKG_VERSION"));

    // Initialize PostgreSQL
    let db = create_pool(&config.database_url).await?;
    init_schema(&db).await?;

    let existing = count_submissions(&db).await?;
    if existing == 0 && config.sample.seed_on_startup {
        let created = seed_sample_data(&db, &config.sample).await?;
        info!("Seeded {created} sample salary records");
    } else {
        info!("Found {existing} existing salary records");
    }

    let advisor = build_advisor(&config)?;

    // Build app state
    let state = AppState {
        db,
        config: config.clone(),
        advisor,
    };

    // Build router
    let app = build_router(state)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive());

    let addr: SocketAddr = format!("0.0.0.0:{}", config.port).parse()?;
    info!("Listening on {addr}");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

/// LLM advisor when an API key is configured, rule-based advice otherwise.
fn build_advisor(config: &Config) -> Result<Arc<dyn AdviceGenerator>> {
    let Some(api_key) = config.anthropic_api_key.clone() else {
        warn!("ANTHROPIC_API_KEY not set, using rule-based advice");
        return Ok(Arc::new(RuleBasedAdvisor));
    };

    let llm = LlmClient::new(api_key)?;
    let knowledge = KnowledgeBase::default();
    info!(
        "LLM advisor initialized (model: {}, {} knowledge articles, top_k {})",
        llm_client::MODEL,
        knowledge.len(),
        config.engine.knowledge_top_k
    );
    Ok(Arc::new(LlmAdvisor::new(
        llm,
        knowledge,
        config.engine.knowledge_top_k,
    )))
}
