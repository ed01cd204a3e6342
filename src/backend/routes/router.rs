/**
 * Router Configuration
 *
 * This module provides the main router creation function that combines
 * all route configurations into a single Axum router.
 *
 * # Layout
 *
 * 1. `GET /health` - liveness check, no authentication
 * 2. `/api/v1/...` - the API (see `api_routes`)
 * 3. Fallback - JSON 404 for anything else
 *
 * Every request is traced with `TraceLayer`, and CORS is open so browser
 * clients on other origins can call the API.
 */

use axum::{routing::get, Json, Router};
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

use crate::backend::error::ApiError;
use crate::backend::routes::api_routes::configure_api_routes;
use crate::backend::server::state::AppState;
use crate::shared::MessageResponse;

/// API mount point
pub const API_PREFIX: &str = "/api/v1";

async fn health() -> Json<MessageResponse> {
    Json(MessageResponse::ok("ok"))
}

async fn not_found() -> ApiError {
    ApiError::not_found("Not Found", "Route not found")
}

/// Create the Axum router with all routes configured
///
/// # Arguments
///
/// * `app_state` - stores, token service and hasher shared by all handlers
pub fn create_router(app_state: AppState) -> Router<()> {
    Router::new()
        .route("/health", get(health))
        .nest(API_PREFIX, configure_api_routes(app_state.clone()))
        .fallback(not_found)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(app_state)
}
