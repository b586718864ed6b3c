// ABOUTME: Database configuration types for SQLite and PostgreSQL connections
// ABOUTME: Handles connection-string parsing, pool sizing, and the TLS toggle
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Wellspring Contributors

use crate::errors::{AppError, AppResult};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Type-safe database connection target
#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum DatabaseUrl {
    /// `SQLite` database with file path
    SQLite {
        /// Path to `SQLite` database file
        path: PathBuf,
    },
    /// `PostgreSQL` connection
    PostgreSQL {
        /// `PostgreSQL` connection string
        connection_string: String,
    },
    /// In-memory `SQLite` (for testing)
    Memory,
}

impl DatabaseUrl {
    /// Parse from string with validation
    ///
    /// # Errors
    ///
    /// Returns an error if the database URL is empty
    pub fn parse_url(s: &str) -> AppResult<Self> {
        if s.is_empty() {
            return Err(AppError::config("DATABASE_URL must not be empty"));
        }
        if let Some(path_str) = s.strip_prefix("sqlite:") {
            if path_str == ":memory:" {
                Ok(Self::Memory)
            } else {
                Ok(Self::SQLite {
                    path: PathBuf::from(path_str),
                })
            }
        } else if s.starts_with("postgresql://") || s.starts_with("postgres://") {
            Ok(Self::PostgreSQL {
                connection_string: s.to_owned(),
            })
        } else {
            // Fallback: treat as SQLite file path
            Ok(Self::SQLite {
                path: PathBuf::from(s),
            })
        }
    }

    /// Convert to connection string. When `require_tls` is set, PostgreSQL
    /// strings without an explicit `sslmode` get `sslmode=require` appended;
    /// SQLite targets are unaffected.
    #[must_use]
    pub fn to_connection_string(&self, require_tls: bool) -> String {
        match self {
            Self::SQLite { path } => format!("sqlite:{}", path.display()),
            Self::PostgreSQL { connection_string } => {
                if require_tls && !connection_string.contains("sslmode=") {
                    let sep = if connection_string.contains('?') { '&' } else { '?' };
                    format!("{connection_string}{sep}sslmode=require")
                } else {
                    connection_string.clone()
                }
            }
            Self::Memory => "sqlite::memory:".into(),
        }
    }

    /// Check if this is an in-memory database
    #[must_use]
    pub const fn is_memory(&self) -> bool {
        matches!(self, Self::Memory)
    }

    /// Check if this is a `SQLite` database
    #[must_use]
    pub const fn is_sqlite(&self) -> bool {
        matches!(self, Self::SQLite { .. } | Self::Memory)
    }
}

impl Default for DatabaseUrl {
    fn default() -> Self {
        Self::SQLite {
            path: PathBuf::from("data/wellspring.db"),
        }
    }
}

/// Connection pool sizing and acquisition limits
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PoolConfig {
    /// Maximum number of pooled connections
    pub max_connections: u32,
    /// Seconds to wait for a free connection before erroring
    pub acquire_timeout_secs: u64,
}

impl Default for PoolConfig {
    fn default() -> Self {
        Self {
            max_connections: 10,
            acquire_timeout_secs: 30,
        }
    }
}

/// Full database configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DatabaseConfig {
    /// Connection target
    pub url: DatabaseUrl,
    /// Pool limits
    pub pool: PoolConfig,
    /// Require transport security (production PostgreSQL)
    pub require_tls: bool,
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            url: DatabaseUrl::default(),
            pool: PoolConfig::default(),
            require_tls: false,
        }
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]
    use super::*;

    #[test]
    fn test_parse_sqlite_path() {
        let url = DatabaseUrl::parse_url("sqlite:data/app.db").unwrap();
        assert!(url.is_sqlite());
        assert!(!url.is_memory());
        assert_eq!(url.to_connection_string(false), "sqlite:data/app.db");
    }

    #[test]
    fn test_parse_memory() {
        let url = DatabaseUrl::parse_url("sqlite::memory:").unwrap();
        assert!(url.is_memory());
        assert_eq!(url.to_connection_string(true), "sqlite::memory:");
    }

    #[test]
    fn test_parse_postgres_with_tls_toggle() {
        let url = DatabaseUrl::parse_url("postgresql://app@db/wellspring").unwrap();
        assert!(!url.is_sqlite());
        assert_eq!(
            url.to_connection_string(true),
            "postgresql://app@db/wellspring?sslmode=require"
        );
        assert_eq!(
            url.to_connection_string(false),
            "postgresql://app@db/wellspring"
        );
    }

    #[test]
    fn test_bare_path_falls_back_to_sqlite() {
        let url = DatabaseUrl::parse_url("wellspring.db").unwrap();
        assert!(url.is_sqlite());
    }

    #[test]
    fn test_empty_url_rejected() {
        assert!(DatabaseUrl::parse_url("").is_err());
    }
}
