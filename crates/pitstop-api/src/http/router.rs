//! Axum router configuration with middleware.
//!
//! Admin routes are under `/api/v1/` and require a token from
//! `/api/v1/auth/login`; the bot webhook and health check are public.
//! Middleware: CORS (covers the admin panel's preflight requests),
//! request tracing.

use axum::routing::{get, post};
use axum::Router;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use crate::http::handlers;
use crate::state::AppState;

/// Build the complete API router with all routes and middleware.
pub fn build_router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let api_routes = Router::new()
        // Admin auth
        .route("/auth/login", post(handlers::auth::login))
        // Mechanics roster
        .route(
            "/mechanics",
            get(handlers::mechanic::list_mechanics).post(handlers::mechanic::create_mechanic),
        )
        .route(
            "/mechanics/{id}",
            axum::routing::delete(handlers::mechanic::delete_mechanic),
        )
        // Diagnostics
        .route(
            "/diagnostics",
            get(handlers::diagnostic::list_diagnostics)
                .post(handlers::diagnostic::create_diagnostic),
        )
        .route(
            "/diagnostics/{id}",
            get(handlers::diagnostic::get_diagnostic)
                .delete(handlers::diagnostic::delete_diagnostic),
        );

    Router::new()
        .nest("/api/v1", api_routes)
        // Bot webhook (authenticated by webhook URL secrecy, not tokens)
        .route("/webhook", post(handlers::webhook::receive_update))
        .route("/health", get(health_check))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// GET /health - Simple health check endpoint (no auth required).
async fn health_check() -> axum::Json<serde_json::Value> {
    axum::Json(serde_json::json!({
        "status": "ok",
        "version": env!("CARGO_PKG_VERSION"),
    }))
}
