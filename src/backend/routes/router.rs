/**
 * Router Configuration
 *
 * Assembles the API under `/api`, adds per-request tracing and answers
 * unknown paths with a 404 error envelope.
 */

use axum::Router;
use tower_http::trace::TraceLayer;

use crate::backend::error::BackendError;
use crate::backend::routes::api_routes::configure_api_routes;
use crate::backend::server::state::AppState;

/// Create the Axum router with all routes configured
pub fn create_router(app_state: AppState) -> Router<()> {
    let api = configure_api_routes(app_state.clone());

    Router::new()
        .nest("/api", api)
        .fallback(not_found)
        .layer(TraceLayer::new_for_http())
        .with_state(app_state)
}

async fn not_found() -> BackendError {
    BackendError::NotFound("Route not found".to_string())
}
