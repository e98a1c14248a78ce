/**
 * Server Configuration
 *
 * Opens the persistence gateway named by `DATABASE_URL`. There is no
 * in-memory fallback: a database that cannot be reached or migrated stops
 * startup.
 */

use std::sync::Arc;

use crate::backend::error::BackendResult;
use crate::backend::gateway::{PgGateway, SharedGateway, SqliteGateway};
use crate::shared::AppConfig;

/// Connect the gateway for the configured database and run its migrations
pub async fn load_gateway(config: &AppConfig) -> BackendResult<SharedGateway> {
    let gateway: SharedGateway = if config.uses_sqlite() {
        Arc::new(SqliteGateway::connect(&config.database_url).await?)
    } else {
        Arc::new(PgGateway::connect(&config.database_url).await?)
    };

    tracing::info!("Persistence gateway ready ({})", gateway.backend_name());
    Ok(gateway)
}
