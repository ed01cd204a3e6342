/**
 * Server Configuration
 *
 * This module handles loading and validation of server configuration and
 * the optional PostgreSQL connection.
 *
 * # Configuration Sources
 *
 * Configuration is read from environment variables (after `.env` has been
 * loaded by the binary) or assembled in code with [`AppConfigBuilder`]:
 *
 * | Variable       | Required | Default |
 * |----------------|----------|---------|
 * | `JWT_SECRET`   | yes      |         |
 * | `DATABASE_URL` | no       | in-memory store |
 * | `SERVER_PORT`  | no       | 3000    |
 * | `BCRYPT_COST`  | no       | 10      |
 *
 * # Error Handling
 *
 * A missing secret or an unparsable value is a [`ConfigError`] and stops
 * start-up. Database problems are logged and the server falls back to the
 * in-memory store.
 */

use std::env;

use sqlx::PgPool;
use thiserror::Error;

use crate::backend::auth::password::DEFAULT_PASSWORD_COST;

pub const DEFAULT_PORT: u16 = 3000;

const MIN_BCRYPT_COST: u32 = 4;
const MAX_BCRYPT_COST: u32 = 31;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ConfigError {
    #[error("missing required configuration value: {0}")]
    MissingValue(&'static str),

    #[error("invalid value for {key}: {message}")]
    InvalidValue { key: &'static str, message: String },
}

/// Validated server configuration
#[derive(Clone, PartialEq, Eq)]
pub struct AppConfig {
    pub jwt_secret: String,
    pub database_url: Option<String>,
    pub port: u16,
    pub bcrypt_cost: u32,
}

impl std::fmt::Debug for AppConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppConfig")
            .field("jwt_secret", &"<redacted>")
            .field("database_url", &self.database_url.as_ref().map(|_| "<set>"))
            .field("port", &self.port)
            .field("bcrypt_cost", &self.bcrypt_cost)
            .finish()
    }
}

impl AppConfig {
    pub fn builder() -> AppConfigBuilder {
        AppConfigBuilder::default()
    }

    /// Read configuration from the process environment
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Read configuration through an arbitrary key lookup
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut builder = Self::builder();

        if let Some(secret) = lookup("JWT_SECRET") {
            builder = builder.jwt_secret(secret);
        }
        if let Some(url) = lookup("DATABASE_URL").filter(|url| !url.trim().is_empty()) {
            builder = builder.database_url(url);
        }
        if let Some(port) = lookup("SERVER_PORT") {
            let port = port.trim().parse::<u16>().map_err(|e| ConfigError::InvalidValue {
                key: "SERVER_PORT",
                message: e.to_string(),
            })?;
            builder = builder.port(port);
        }
        if let Some(cost) = lookup("BCRYPT_COST") {
            let cost = cost.trim().parse::<u32>().map_err(|e| ConfigError::InvalidValue {
                key: "BCRYPT_COST",
                message: e.to_string(),
            })?;
            builder = builder.bcrypt_cost(cost);
        }

        builder.build()
    }
}

#[derive(Debug, Default, Clone)]
pub struct AppConfigBuilder {
    jwt_secret: Option<String>,
    database_url: Option<String>,
    port: Option<u16>,
    bcrypt_cost: Option<u32>,
}

impl AppConfigBuilder {
    pub fn jwt_secret(mut self, secret: impl Into<String>) -> Self {
        self.jwt_secret = Some(secret.into());
        self
    }

    pub fn database_url(mut self, url: impl Into<String>) -> Self {
        self.database_url = Some(url.into());
        self
    }

    pub fn port(mut self, port: u16) -> Self {
        self.port = Some(port);
        self
    }

    pub fn bcrypt_cost(mut self, cost: u32) -> Self {
        self.bcrypt_cost = Some(cost);
        self
    }

    pub fn build(self) -> Result<AppConfig, ConfigError> {
        let jwt_secret = self
            .jwt_secret
            .filter(|secret| !secret.is_empty())
            .ok_or(ConfigError::MissingValue("JWT_SECRET"))?;

        let bcrypt_cost = self.bcrypt_cost.unwrap_or(DEFAULT_PASSWORD_COST);
        if !(MIN_BCRYPT_COST..=MAX_BCRYPT_COST).contains(&bcrypt_cost) {
            return Err(ConfigError::InvalidValue {
                key: "BCRYPT_COST",
                message: format!(
                    "{} is outside {}..={}",
                    bcrypt_cost, MIN_BCRYPT_COST, MAX_BCRYPT_COST
                ),
            });
        }

        Ok(AppConfig {
            jwt_secret,
            database_url: self.database_url,
            port: self.port.unwrap_or(DEFAULT_PORT),
            bcrypt_cost,
        })
    }
}

/// Database configuration result
///
/// Contains the connection pool if successfully configured, or `None` if
/// the database is not available.
pub type DatabaseConfig = Option<PgPool>;

/// Connect to PostgreSQL and run migrations
///
/// # Returns
///
/// - `Some(PgPool)` if the database is reachable
/// - `None` if no URL is configured or the connection fails
///
/// Migration failures are logged but do not prevent start-up.
pub async fn load_database(database_url: Option<&str>) -> DatabaseConfig {
    let Some(database_url) = database_url else {
        tracing::warn!("DATABASE_URL not set. Using the in-memory store.");
        return None;
    };

    tracing::info!("Connecting to database...");

    let pool = match PgPool::connect(database_url).await {
        Ok(pool) => pool,
        Err(e) => {
            tracing::error!("Failed to create database connection pool: {:?}", e);
            tracing::warn!("Falling back to the in-memory store.");
            return None;
        }
    };

    tracing::info!("Database connection pool created successfully");

    tracing::info!("Running database migrations...");
    match sqlx::migrate!().run(&pool).await {
        Ok(_) => {
            tracing::info!("Database migrations completed successfully");
        }
        Err(e) => {
            tracing::error!("Failed to run database migrations: {}", e);
            tracing::warn!("Continuing without migrations - database might not be up to date");
        }
    }

    Some(pool)
}
