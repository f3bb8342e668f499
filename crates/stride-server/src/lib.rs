//! stride-server
//!
//! HTTP API for session discovery, report generation and report file
//! management, plus the account endpoints that guard it.

use axum::extract::DefaultBodyLimit;
use axum::middleware as axum_mw;
use axum::routing::{delete, get, post};
use axum::Router;
use tower_http::cors::{Any, CorsLayer};

pub mod config;
pub mod error;
pub mod middleware;
pub mod routes;
pub mod service;
pub mod state;

use state::AppState;

/// Request bodies larger than this are rejected.
pub const BODY_LIMIT: usize = 10 * 1024 * 1024;

/// Build the full application router.
pub fn app(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    // Everything here requires a valid bearer token.
    let protected = Router::new()
        .route("/api/auth/profile", get(routes::auth::profile))
        .route("/api/auth/verify", post(routes::auth::verify))
        .route("/api/reports/sessions", get(routes::reports::list_sessions))
        .route(
            "/api/reports/generate",
            post(routes::reports::generate_from_body),
        )
        .route(
            "/api/reports/generate/{session_id}",
            get(routes::reports::generate_from_path),
        )
        .route("/api/reports/list", get(routes::reports::list_reports))
        .route(
            "/api/reports/download/{filename}",
            get(routes::reports::download_report),
        )
        .route(
            "/api/reports/config/{assessment_id}",
            get(routes::reports::get_config),
        )
        .route(
            "/api/reports/{filename}",
            delete(routes::reports::delete_report),
        )
        .route_layer(axum_mw::from_fn_with_state(
            state.clone(),
            middleware::auth::require_auth,
        ));

    let router = Router::new()
        .route("/api/health", get(routes::health::health_check))
        .route("/api/auth/register", post(routes::auth::register))
        .route("/api/auth/login", post(routes::auth::login))
        .merge(protected)
        .layer(axum_mw::from_fn_with_state(
            state.clone(),
            middleware::rate_limit::rate_limit,
        ))
        .layer(axum_mw::from_fn(middleware::audit::audit_log))
        .layer(DefaultBodyLimit::max(BODY_LIMIT));

    middleware::security::with_security_headers(router)
        .layer(cors)
        .with_state(state)
}
