//! PostgreSQL gateway
//!
//! Every transaction runs at `SERIALIZABLE`. Pair transitions additionally
//! lock both user rows in id order, so two transitions on the same pair
//! queue behind each other instead of failing at commit.

use async_trait::async_trait;
use sqlx::postgres::{PgPool, PgPoolOptions};
use sqlx::{Postgres, Transaction};

use super::{impl_gateway_tx, Gateway, GatewayTx};
use crate::backend::error::BackendResult;

const LOCK_USERS: &str = concat!(
    "SELECT u.id, u.first_name, u.last_name, u.email, u.password_hash, u.profile_image, ",
    "u.cover_image, u.status, u.created_at, u.updated_at ",
    "FROM users u WHERE u.id = $1 OR u.id = $2 ORDER BY u.id FOR UPDATE"
);

/// Gateway over a PostgreSQL pool
#[derive(Clone)]
pub struct PgGateway {
    pool: PgPool,
}

impl PgGateway {
    /// Connect and bring the schema up to date
    pub async fn connect(database_url: &str) -> BackendResult<Self> {
        tracing::info!("Connecting to PostgreSQL...");
        let pool = PgPoolOptions::new()
            .max_connections(10)
            .connect(database_url)
            .await?;
        tracing::info!("PostgreSQL connection pool created");

        let gateway = Self::from_pool(pool);
        gateway.migrate().await?;
        Ok(gateway)
    }

    /// Wrap an existing pool without running migrations
    pub fn from_pool(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn migrate(&self) -> BackendResult<()> {
        tracing::info!("Running PostgreSQL migrations...");
        sqlx::migrate!("./migrations/postgres")
            .run(&self.pool)
            .await
            .map_err(|e| sqlx::Error::Migrate(Box::new(e)))?;
        tracing::info!("PostgreSQL migrations completed");
        Ok(())
    }

    pub fn pool(&self) -> &PgPool {
        &self.pool
    }
}

#[async_trait]
impl Gateway for PgGateway {
    async fn begin(&self) -> BackendResult<Box<dyn GatewayTx>> {
        let mut tx = self.pool.begin().await?;
        sqlx::query("SET TRANSACTION ISOLATION LEVEL SERIALIZABLE")
            .execute(&mut *tx)
            .await?;
        Ok(Box::new(PgTx { tx }))
    }

    fn backend_name(&self) -> &'static str {
        "postgres"
    }
}

/// Open PostgreSQL transaction
pub struct PgTx {
    tx: Transaction<'static, Postgres>,
}

impl_gateway_tx!(PgTx, lock_users = LOCK_USERS);
