/**
 * Application State Management
 *
 * `AppState` is cloned into every handler. It holds no mutable data of its
 * own: relationship state lives in the database and is only reached
 * through the gateway.
 *
 * # State Extraction
 *
 * The `FromRef` implementations let handlers extract just the part they
 * need, e.g. `State(gateway): State<SharedGateway>`.
 */

use axum::extract::FromRef;
use std::sync::Arc;

use crate::backend::friends::FriendManager;
use crate::backend::gateway::SharedGateway;
use crate::shared::AppConfig;

/// Application state shared by all handlers
#[derive(Clone)]
pub struct AppState {
    /// Persistence gateway (PostgreSQL or SQLite)
    pub gateway: SharedGateway,

    /// Validated configuration
    pub config: Arc<AppConfig>,

    /// Friend relationship manager over the same gateway
    pub friends: FriendManager,
}

impl AppState {
    pub fn new(gateway: SharedGateway, config: AppConfig) -> Self {
        let friends = FriendManager::new(gateway.clone(), config.max_transaction_retries);
        Self {
            gateway,
            config: Arc::new(config),
            friends,
        }
    }
}

impl FromRef<AppState> for SharedGateway {
    fn from_ref(app_state: &AppState) -> Self {
        app_state.gateway.clone()
    }
}

impl FromRef<AppState> for Arc<AppConfig> {
    fn from_ref(app_state: &AppState) -> Self {
        app_state.config.clone()
    }
}

impl FromRef<AppState> for FriendManager {
    fn from_ref(app_state: &AppState) -> Self {
        app_state.friends.clone()
    }
}
