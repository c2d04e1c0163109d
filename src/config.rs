//! Configuration management for the toolcrib engine

use config::{Config, ConfigError, Environment, File};
use serde::Deserialize;
use std::env;

#[derive(Debug, Deserialize, Clone)]
pub struct CheckoutConfig {
    /// Loan duration applied when a request carries no explicit due date
    pub default_loan_days: i64,
    /// Upper bound on units per checkout record
    pub max_quantity: i32,
}

#[derive(Debug, Deserialize, Clone)]
pub struct BlacklistConfig {
    /// Tolerance subtracted from "now" before an open loan counts as overdue
    pub grace_window_seconds: i64,
    /// Maximum accepted length for a blacklist reason
    pub reason_max_length: usize,
}

#[derive(Debug, Deserialize, Clone)]
pub struct SweepConfig {
    pub enabled: bool,
    pub interval_seconds: u64,
}

#[derive(Debug, Deserialize, Clone)]
pub struct LockConfig {
    /// How long a mutating operation waits for its per-entity lock
    pub acquire_timeout_ms: u64,
}

#[derive(Debug, Deserialize, Clone, Default)]
pub struct CoreConfig {
    #[serde(default)]
    pub checkout: CheckoutConfig,
    #[serde(default)]
    pub blacklist: BlacklistConfig,
    #[serde(default)]
    pub sweep: SweepConfig,
    #[serde(default)]
    pub locks: LockConfig,
}

impl CoreConfig {
    /// Load configuration from files and environment variables
    pub fn load() -> Result<Self, ConfigError> {
        let run_mode = env::var("RUN_MODE").unwrap_or_else(|_| "development".into());

        let config = Config::builder()
            // Start with default configuration
            .add_source(File::with_name("config/default").required(false))
            // Layer on the environment-specific file
            .add_source(File::with_name(&format!("config/{}", run_mode)).required(false))
            // Add environment variables (with prefix TOOLCRIB_)
            .add_source(
                Environment::with_prefix("TOOLCRIB")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?;

        config.try_deserialize()
    }
}

impl Default for CheckoutConfig {
    fn default() -> Self {
        Self {
            default_loan_days: 7,
            max_quantity: 100,
        }
    }
}

impl Default for BlacklistConfig {
    fn default() -> Self {
        Self {
            grace_window_seconds: 0,
            reason_max_length: 500,
        }
    }
}

impl Default for SweepConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            interval_seconds: 300,
        }
    }
}

impl Default for LockConfig {
    fn default() -> Self {
        Self {
            acquire_timeout_ms: 5_000,
        }
    }
}
