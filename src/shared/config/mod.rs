//! Application configuration module
//!
//! Configuration is read from the environment (optionally seeded from a
//! `.env` file) or assembled with [`AppConfigBuilder`] in tests.
//!
//! | Variable         | Default               |
//! |------------------|-----------------------|
//! | `DATABASE_URL`   | `sqlite::memory:`     |
//! | `SERVER_HOST`    | `0.0.0.0`             |
//! | `SERVER_PORT`    | `3000`                |
//! | `JWT_SECRET`     | development secret    |
//! | `TOKEN_TTL_SECS` | `43200` (12 hours)    |
//! | `BCRYPT_COST`    | `bcrypt::DEFAULT_COST`|
//! | `MAX_TX_RETRIES` | `3`                   |

use std::str::FromStr;
use thiserror::Error;

/// Secret used when `JWT_SECRET` is not set. Only suitable for local runs.
pub const DEVELOPMENT_JWT_SECRET: &str = "socialnet-development-secret-change-me";

/// Application configuration
#[derive(Debug, Clone)]
pub struct AppConfig {
    /// Database connection URL (`postgres://...` or `sqlite:...`)
    pub database_url: String,
    /// Interface the HTTP server binds to
    pub host: String,
    /// Port the HTTP server binds to
    pub port: u16,
    /// HMAC secret for session tokens
    pub jwt_secret: String,
    /// Session token lifetime in seconds
    pub token_ttl_secs: u64,
    /// bcrypt work factor for password hashes
    pub bcrypt_cost: u32,
    /// How many times a transition is retried after a storage conflict
    pub max_transaction_retries: u32,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            database_url: "sqlite::memory:".to_string(),
            host: "0.0.0.0".to_string(),
            port: 3000,
            jwt_secret: DEVELOPMENT_JWT_SECRET.to_string(),
            token_ttl_secs: 12 * 60 * 60,
            bcrypt_cost: bcrypt::DEFAULT_COST,
            max_transaction_retries: 3,
        }
    }
}

impl AppConfig {
    /// Create a new AppConfigBuilder
    pub fn builder() -> AppConfigBuilder {
        AppConfigBuilder::default()
    }

    /// Load configuration from environment variables, falling back to defaults
    pub fn from_env() -> Result<Self, ConfigError> {
        let defaults = Self::default();

        let jwt_secret = match std::env::var("JWT_SECRET") {
            Ok(secret) => secret,
            Err(_) => {
                tracing::warn!("JWT_SECRET not set, using the development secret");
                defaults.jwt_secret
            }
        };

        let config = Self {
            database_url: std::env::var("DATABASE_URL").unwrap_or(defaults.database_url),
            host: std::env::var("SERVER_HOST").unwrap_or(defaults.host),
            port: env_or("SERVER_PORT", defaults.port)?,
            jwt_secret,
            token_ttl_secs: env_or("TOKEN_TTL_SECS", defaults.token_ttl_secs)?,
            bcrypt_cost: env_or("BCRYPT_COST", defaults.bcrypt_cost)?,
            max_transaction_retries: env_or("MAX_TX_RETRIES", defaults.max_transaction_retries)?,
        };

        config.validate()?;
        Ok(config)
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<(), ConfigError> {
        let scheme = self
            .database_url
            .split(':')
            .next()
            .unwrap_or_default();
        if !matches!(scheme, "postgres" | "postgresql" | "sqlite") {
            return Err(ConfigError::InvalidUrl(self.database_url.clone()));
        }
        if self.port == 0 {
            return Err(ConfigError::InvalidValue {
                key: "SERVER_PORT",
                value: "0".to_string(),
            });
        }
        if self.jwt_secret.is_empty() {
            return Err(ConfigError::MissingValue("JWT_SECRET"));
        }
        if !(4..=31).contains(&self.bcrypt_cost) {
            return Err(ConfigError::InvalidValue {
                key: "BCRYPT_COST",
                value: self.bcrypt_cost.to_string(),
            });
        }
        if self.token_ttl_secs == 0 {
            return Err(ConfigError::InvalidValue {
                key: "TOKEN_TTL_SECS",
                value: "0".to_string(),
            });
        }
        Ok(())
    }

    /// Address the server listens on
    pub fn server_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    /// Whether the database URL points at SQLite
    pub fn uses_sqlite(&self) -> bool {
        self.database_url.starts_with("sqlite:")
    }
}

fn env_or<T: FromStr>(key: &'static str, default: T) -> Result<T, ConfigError> {
    match std::env::var(key) {
        Ok(value) => value
            .parse()
            .map_err(|_| ConfigError::InvalidValue { key, value }),
        Err(_) => Ok(default),
    }
}

/// Builder for AppConfig
#[derive(Debug, Default)]
pub struct AppConfigBuilder {
    database_url: Option<String>,
    host: Option<String>,
    port: Option<u16>,
    jwt_secret: Option<String>,
    token_ttl_secs: Option<u64>,
    bcrypt_cost: Option<u32>,
    max_transaction_retries: Option<u32>,
}

impl AppConfigBuilder {
    /// Set the database URL
    pub fn database_url(mut self, url: impl Into<String>) -> Self {
        self.database_url = Some(url.into());
        self
    }

    /// Set the bind host
    pub fn host(mut self, host: impl Into<String>) -> Self {
        self.host = Some(host.into());
        self
    }

    /// Set the bind port
    pub fn port(mut self, port: u16) -> Self {
        self.port = Some(port);
        self
    }

    /// Set the session token secret
    pub fn jwt_secret(mut self, secret: impl Into<String>) -> Self {
        self.jwt_secret = Some(secret.into());
        self
    }

    /// Set the session token lifetime
    pub fn token_ttl_secs(mut self, secs: u64) -> Self {
        self.token_ttl_secs = Some(secs);
        self
    }

    /// Set the bcrypt cost
    pub fn bcrypt_cost(mut self, cost: u32) -> Self {
        self.bcrypt_cost = Some(cost);
        self
    }

    /// Set the retry budget for conflicting transactions
    pub fn max_transaction_retries(mut self, retries: u32) -> Self {
        self.max_transaction_retries = Some(retries);
        self
    }

    /// Build and validate the configuration
    pub fn build(self) -> Result<AppConfig, ConfigError> {
        let defaults = AppConfig::default();
        let config = AppConfig {
            database_url: self.database_url.unwrap_or(defaults.database_url),
            host: self.host.unwrap_or(defaults.host),
            port: self.port.unwrap_or(defaults.port),
            jwt_secret: self.jwt_secret.unwrap_or(defaults.jwt_secret),
            token_ttl_secs: self.token_ttl_secs.unwrap_or(defaults.token_ttl_secs),
            bcrypt_cost: self.bcrypt_cost.unwrap_or(defaults.bcrypt_cost),
            max_transaction_retries: self
                .max_transaction_retries
                .unwrap_or(defaults.max_transaction_retries),
        };
        config.validate()?;
        Ok(config)
    }
}

/// Configuration errors
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("invalid database URL: {0}")]
    InvalidUrl(String),
    #[error("missing value: {0}")]
    MissingValue(&'static str),
    #[error("invalid value for {key}: {value}")]
    InvalidValue { key: &'static str, value: String },
}
