/**
 * Server Initialization
 *
 * 1. Connect the gateway named by the configuration (migrations included)
 * 2. Build `AppState` around it
 * 3. Create the router
 */

use axum::Router;

use crate::backend::error::BackendResult;
use crate::backend::gateway::SharedGateway;
use crate::backend::routes::router::create_router;
use crate::backend::server::config::load_gateway;
use crate::backend::server::state::AppState;
use crate::shared::AppConfig;

/// Create and configure the Axum application
pub async fn create_app(config: AppConfig) -> BackendResult<Router<()>> {
    tracing::info!("Initializing socialnet backend");
    let gateway = load_gateway(&config).await?;
    Ok(create_app_with_gateway(gateway, config))
}

/// Build the application over an already connected gateway
pub fn create_app_with_gateway(gateway: SharedGateway, config: AppConfig) -> Router<()> {
    let app_state = AppState::new(gateway, config);
    let app = create_router(app_state);
    tracing::info!("Router configured");
    app
}
