//! Configuración de base de datos
//!
//! Tamaño y tiempos del pool de PostgreSQL. Los valores por defecto se
//! pueden ajustar con `DB_MAX_CONNECTIONS`, `DB_MIN_CONNECTIONS` y
//! `DB_ACQUIRE_TIMEOUT_SECS`.

use sqlx::postgres::{PgPool, PgPoolOptions};
use std::time::Duration;

use crate::config::environment::{parse_or, ConfigError};

#[derive(Debug, Clone)]
pub struct DatabaseConfig {
    pub url: String,
    pub max_connections: u32,
    pub min_connections: u32,
    pub acquire_timeout: Duration,
    pub idle_timeout: Duration,
    pub max_lifetime: Duration,
}

impl DatabaseConfig {
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            max_connections: 20,
            min_connections: 2,
            acquire_timeout: Duration::from_secs(30),
            idle_timeout: Duration::from_secs(300),
            max_lifetime: Duration::from_secs(3600),
        }
    }

    /// Pool para `url` con los overrides del entorno
    pub fn from_env(url: impl Into<String>) -> Result<Self, ConfigError> {
        let defaults = Self::new(url);
        let max_connections = parse_or("DB_MAX_CONNECTIONS", defaults.max_connections)?;
        let min_connections =
            parse_or("DB_MIN_CONNECTIONS", defaults.min_connections)?.min(max_connections);
        let acquire_secs = parse_or("DB_ACQUIRE_TIMEOUT_SECS", defaults.acquire_timeout.as_secs())?;

        Ok(Self {
            max_connections,
            min_connections,
            acquire_timeout: Duration::from_secs(acquire_secs),
            ..defaults
        })
    }

    pub async fn create_pool(&self) -> Result<PgPool, sqlx::Error> {
        PgPoolOptions::new()
            .max_connections(self.max_connections)
            .min_connections(self.min_connections)
            .acquire_timeout(self.acquire_timeout)
            .idle_timeout(self.idle_timeout)
            .max_lifetime(self.max_lifetime)
            .connect(&self.url)
            .await
    }
}
