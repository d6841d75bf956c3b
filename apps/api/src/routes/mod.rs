pub mod health;

use axum::{
    routing::{get, post},
    Router,
};

use crate::compensation::handlers as compensation;
use crate::salaries::handlers as salaries;
use crate::state::AppState;

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/", get(health::index_handler))
        .route("/api/health", get(health::health_handler))
        // Submissions
        .route("/api/salary/submit", post(salaries::handle_submit))
        .route("/api/salary/compare", post(compensation::handle_compare))
        // Analytics
        .route("/api/analytics/pay-gap", get(salaries::handle_pay_gap))
        .route(
            "/api/analytics/industry-comparison",
            get(salaries::handle_industry_comparison),
        )
        .route(
            "/api/analytics/location-comparison",
            get(salaries::handle_location_comparison),
        )
        .route(
            "/api/analytics/company-comparison",
            get(salaries::handle_company_comparison),
        )
        // Negotiation
        .route(
            "/api/negotiation/script",
            post(compensation::handle_negotiation_script),
        )
        .route("/api/chatbot/advice", post(compensation::handle_advice))
        // Admin
        .route("/api/admin/reset-data", post(salaries::handle_reset_data))
        .with_state(state)
}
