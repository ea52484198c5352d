pub mod health;

use axum::{
    routing::{get, post},
    Router,
};

use crate::analysis::handlers;
use crate::state::AppState;

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health::health_handler))
        // Individual tools
        .route("/api/v1/seo", post(handlers::handle_seo_audit))
        .route("/api/v1/competitors", post(handlers::handle_competitor_watch))
        .route("/api/v1/posts", post(handlers::handle_post_creator))
        .route(
            "/api/v1/email-campaigns",
            post(handlers::handle_email_campaign),
        )
        // Composite report
        .route(
            "/api/v1/reports",
            post(handlers::handle_comprehensive_report),
        )
        .with_state(state)
}
