//! Router configuration for the HTTP API.
//!
//! This module sets up all routes, middleware (CORS, compression, tracing),
//! and creates the axum router ready for serving.

use axum::{
    extract::DefaultBodyLimit,
    routing::{delete, get, post, put},
    Router,
};
use tower_http::{
    compression::CompressionLayer,
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};

use super::handlers;
use super::state::AppState;

/// Create the main application router with all routes and middleware.
pub fn create_router(state: AppState) -> Router {
    // CORS configuration - permissive for development, should be restricted in production
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    // Build the API router with versioned endpoints
    let api_v1 = Router::new()
        // Session configuration
        .route("/sessions/{date}", get(handlers::get_session))
        .route("/sessions/{session_id}/goal", put(handlers::update_goal))
        .route("/sessions/{session_id}/hours", put(handlers::update_hours))
        .route(
            "/sessions/{session_id}/weights",
            get(handlers::get_weights).put(handlers::put_weights),
        )
        // Roster
        .route(
            "/sessions/{session_id}/advisors",
            get(handlers::list_advisors).post(handlers::create_advisor),
        )
        .route("/advisors/{advisor_id}", delete(handlers::delete_advisor))
        // Availability
        .route(
            "/advisors/{advisor_id}/availability",
            get(handlers::get_advisor_availability).put(handlers::update_availability),
        )
        .route(
            "/sessions/{session_id}/availability",
            get(handlers::get_session_availability),
        )
        // Store metrics
        .route(
            "/sessions/{session_id}/metrics",
            get(handlers::get_metrics).put(handlers::put_metrics),
        )
        .route(
            "/sessions/{session_id}/metrics-table",
            get(handlers::get_metrics_table),
        )
        // Dashboard & reports
        .route("/sessions/{session_id}/dashboard", get(handlers::get_dashboard))
        .route("/sessions/{session_id}/report", get(handlers::get_admin_report))
        // Templates
        .route("/templates", get(handlers::list_templates))
        .route("/templates/{template_id}", delete(handlers::delete_template))
        .route("/sessions/{session_id}/template", post(handlers::save_as_template))
        .route(
            "/sessions/{session_id}/apply-template",
            post(handlers::apply_template),
        )
        // Advisor self-service, addressed by token only
        .route("/advisor/{token}", get(handlers::get_advisor_view))
        .route("/advisor/{token}/sales", put(handlers::update_sales));

    // Combine all routes
    Router::new()
        .route("/health", get(handlers::health_check))
        .nest("/v1", api_v1)
        .layer(DefaultBodyLimit::max(1024 * 1024))
        .layer(CompressionLayer::new())
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(state)
}
