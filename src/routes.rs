// Route path constants - single source of truth for all API paths

use axum::{
    Router,
    routing::{get, post},
};
use tower_http::trace::TraceLayer;

use crate::handlers;
use crate::state::AppState;

pub const SHORTEN: &str = "/shorten";
pub const RESOLVE: &str = "/{short_code}";
pub const ROOT: &str = "/";
// Operational routes start with '_', which never appears in a generated code
pub const HEALTH: &str = "/_health";
pub const OPENAPI: &str = "/_docs/openapi.json";

/// Build the application router.
///
/// Wrong methods on known paths and unknown paths all land on the same
/// invalid-request fallback, so axum's own 404/405 responses never escape.
pub fn router(state: AppState) -> Router {
    let invalid = handlers::invalid_request_handler;

    // axum answers HEAD with the GET handler unless a HEAD handler is set,
    // so every GET route names one explicitly.
    Router::new()
        .route(SHORTEN, post(handlers::shorten_handler).fallback(invalid))
        .route(ROOT, get(handlers::missing_short_code_handler).head(invalid).fallback(invalid))
        .route(RESOLVE, get(handlers::resolve_handler).head(invalid).fallback(invalid))
        .route(HEALTH, get(handlers::health_handler).head(invalid).fallback(invalid))
        .route(OPENAPI, get(handlers::openapi_handler).head(invalid).fallback(invalid))
        .fallback(invalid)
        .with_state(state)
        .layer(TraceLayer::new_for_http())
}
