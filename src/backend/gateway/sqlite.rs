//! SQLite gateway
//!
//! The pool holds exactly one connection that never expires. An in-memory
//! database lives only as long as its connection, and a single connection
//! also means transactions run one after another, which is what keeps pair
//! transitions linearizable on this backend.

use async_trait::async_trait;
use sqlx::sqlite::{SqliteConnectOptions, SqlitePool, SqlitePoolOptions};
use sqlx::{Sqlite, Transaction};
use std::str::FromStr;

use super::{impl_gateway_tx, Gateway, GatewayTx};
use crate::backend::error::BackendResult;

/// Transactions are serialized by the pool, so the lock is a plain read
const LOCK_USERS: &str = concat!(
    "SELECT u.id, u.first_name, u.last_name, u.email, u.password_hash, u.profile_image, ",
    "u.cover_image, u.status, u.created_at, u.updated_at ",
    "FROM users u WHERE u.id = $1 OR u.id = $2 ORDER BY u.id"
);

/// Gateway over a single-connection SQLite pool
#[derive(Clone)]
pub struct SqliteGateway {
    pool: SqlitePool,
}

impl SqliteGateway {
    /// Open (creating if needed) the database and run migrations
    pub async fn connect(database_url: &str) -> BackendResult<Self> {
        tracing::info!("Opening SQLite database {}", database_url);
        let options = SqliteConnectOptions::from_str(database_url)?
            .create_if_missing(true)
            .foreign_keys(true);

        let pool = SqlitePoolOptions::new()
            .max_connections(1)
            .min_connections(1)
            .idle_timeout(None)
            .max_lifetime(None)
            .connect_with(options)
            .await?;

        let gateway = Self { pool };
        gateway.migrate().await?;
        Ok(gateway)
    }

    /// Fresh private in-memory database
    pub async fn in_memory() -> BackendResult<Self> {
        Self::connect("sqlite::memory:").await
    }

    pub async fn migrate(&self) -> BackendResult<()> {
        tracing::debug!("Running SQLite migrations...");
        sqlx::migrate!("./migrations/sqlite")
            .run(&self.pool)
            .await
            .map_err(|e| sqlx::Error::Migrate(Box::new(e)))?;
        Ok(())
    }

    pub fn pool(&self) -> &SqlitePool {
        &self.pool
    }
}

#[async_trait]
impl Gateway for SqliteGateway {
    async fn begin(&self) -> BackendResult<Box<dyn GatewayTx>> {
        let tx = self.pool.begin().await?;
        Ok(Box::new(SqliteTx { tx }))
    }

    fn backend_name(&self) -> &'static str {
        "sqlite"
    }
}

/// Open SQLite transaction
pub struct SqliteTx {
    tx: Transaction<'static, Sqlite>,
}

impl_gateway_tx!(SqliteTx, lock_users = LOCK_USERS);
