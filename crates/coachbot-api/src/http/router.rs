//! Axum router configuration with middleware.
//!
//! API routes live under `/api/v1/`; the form page is served at `/`.
//! Middleware: CORS, tracing.

use axum::Router;
use axum::response::Html;
use axum::routing::{get, post};
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use crate::http::handlers;
use crate::state::AppState;

/// The single-page form.
const INDEX_HTML: &str = include_str!("../../assets/index.html");

/// Build the complete router with all routes and middleware.
pub fn build_router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let api_routes = Router::new()
        // Catalog
        .route("/features", get(handlers::catalog::list_features))
        .route("/profile/options", get(handlers::catalog::profile_options))
        .route("/prompts/preview", post(handlers::catalog::preview_prompt))
        // Sessions
        .route("/sessions", post(handlers::session::create_session))
        .route(
            "/sessions/{id}",
            get(handlers::session::get_session).delete(handlers::session::delete_session),
        )
        // Settings panel
        .route(
            "/sessions/{id}/settings",
            get(handlers::settings::get_settings).put(handlers::settings::update_settings),
        )
        .route(
            "/sessions/{id}/settings/verify",
            post(handlers::settings::verify_settings),
        )
        // Generation
        .route(
            "/sessions/{id}/generate",
            post(handlers::generate::generate),
        )
        // History
        .route(
            "/sessions/{id}/history",
            get(handlers::history::list_history).delete(handlers::history::clear_history),
        )
        .route(
            "/sessions/{id}/history/{entry}/download",
            get(handlers::history::download_entry),
        )
        .route(
            "/sessions/{id}/result/download",
            get(handlers::history::download_last_result),
        );

    Router::new()
        .nest("/api/v1", api_routes)
        .route("/", get(index))
        .route("/health", get(health_check))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// GET / - The CoachBot form.
async fn index() -> Html<&'static str> {
    Html(INDEX_HTML)
}

/// GET /health - Simple health check endpoint.
async fn health_check() -> axum::Json<serde_json::Value> {
    axum::Json(serde_json::json!({
        "status": "ok",
        "version": env!("CARGO_PKG_VERSION"),
    }))
}
