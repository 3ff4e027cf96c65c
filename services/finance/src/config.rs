//! Service configuration
//!
//! Settings are layered with the `config` crate: built-in defaults first, then
//! `FINANCE_*` environment variables. Database settings come from
//! [`DatabaseConfig::from_env`].

use anyhow::{Context, Result};
use common::database::DatabaseConfig;
use config::{Config, Environment};
use serde::Deserialize;

/// Settings owned by the finance service itself
#[derive(Debug, Clone, Deserialize)]
pub struct ServiceSettings {
    /// `tracing` filter directive (`FINANCE_LOG`)
    pub log: String,
    /// Apply embedded migrations at startup (`FINANCE_RUN_MIGRATIONS`)
    pub run_migrations: bool,
}

/// Complete configuration for the service binary
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub settings: ServiceSettings,
    pub database: DatabaseConfig,
}

impl AppConfig {
    pub fn from_env() -> Result<Self> {
        let settings = Config::builder()
            .set_default("log", "info")?
            .set_default("run_migrations", true)?
            .add_source(Environment::with_prefix("FINANCE"))
            .build()
            .context("Failed to read service settings")?
            .try_deserialize::<ServiceSettings>()
            .context("Invalid service settings")?;

        let database = DatabaseConfig::from_env()?;

        Ok(Self { settings, database })
    }
}
