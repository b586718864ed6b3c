// ABOUTME: Environment-only server configuration loading
// ABOUTME: Reads DATABASE_URL, pool knobs, and the deployment environment from process env
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Wellspring Contributors

//! Environment-based configuration. There is no configuration file; every
//! knob is an environment variable with a sensible default.

use std::env;

use serde::{Deserialize, Serialize};
use tracing::info;

use super::database::{DatabaseConfig, DatabaseUrl, PoolConfig};
use crate::errors::{AppError, AppResult};

/// Top-level server configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    /// Deployment environment (development, staging, production)
    pub environment: String,
    /// Log level for the application target
    pub log_level: String,
    /// Database configuration
    pub database: DatabaseConfig,
}

impl ServerConfig {
    /// Load configuration from environment variables
    ///
    /// # Errors
    ///
    /// Returns an error if a variable is present but unparseable
    pub fn from_env() -> AppResult<Self> {
        info!("Loading configuration from environment variables");

        let environment = env::var("ENVIRONMENT").unwrap_or_else(|_| "development".into());
        let is_production = environment == "production";

        let database_url = env_var_or("DATABASE_URL", "sqlite:data/wellspring.db");
        let require_tls = match env::var("DATABASE_SSL") {
            Ok(v) => parse_bool("DATABASE_SSL", &v)?,
            Err(_) => is_production,
        };

        Ok(Self {
            environment,
            log_level: env_var_or("LOG_LEVEL", "info"),
            database: DatabaseConfig {
                url: DatabaseUrl::parse_url(&database_url)?,
                pool: PoolConfig {
                    max_connections: parse_u32(
                        "DATABASE_MAX_CONNECTIONS",
                        &env_var_or("DATABASE_MAX_CONNECTIONS", "10"),
                    )?,
                    acquire_timeout_secs: u64::from(parse_u32(
                        "DATABASE_ACQUIRE_TIMEOUT",
                        &env_var_or("DATABASE_ACQUIRE_TIMEOUT", "30"),
                    )?),
                },
                require_tls,
            },
        })
    }
}

/// Get environment variable or default value
fn env_var_or(key: &str, default: &str) -> String {
    env::var(key).unwrap_or_else(|_| default.to_string())
}

fn parse_bool(key: &str, value: &str) -> AppResult<bool> {
    match value {
        "true" | "1" => Ok(true),
        "false" | "0" => Ok(false),
        other => Err(AppError::config(format!(
            "invalid boolean for {key}: {other}"
        ))),
    }
}

fn parse_u32(key: &str, value: &str) -> AppResult<u32> {
    value
        .parse()
        .map_err(|_| AppError::config(format!("invalid integer for {key}: {value}")))
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]
    use super::*;

    #[test]
    fn test_parse_bool_accepts_common_forms() {
        assert!(parse_bool("X", "true").unwrap());
        assert!(parse_bool("X", "1").unwrap());
        assert!(!parse_bool("X", "false").unwrap());
        assert!(parse_bool("X", "yes").is_err());
    }

    #[test]
    fn test_parse_u32_rejects_garbage() {
        assert_eq!(parse_u32("X", "42").unwrap(), 42);
        assert!(parse_u32("X", "forty").is_err());
    }
}
