// ABOUTME: Database handle managing the SQLite connection pool lifecycle
// ABOUTME: Connects, migrates on startup, and drains the pool on shutdown
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Wellspring Contributors

//! # Database Management
//!
//! This module provides the pooled database handle for the multi-tenant
//! Wellspring backend. The handle is cheaply cloneable and injected into
//! callers; there is no process-global instance. Schema bootstrap runs from
//! [`Database::new`] and any failure there aborts startup.

use std::time::Duration;

use sqlx::sqlite::SqlitePoolOptions;
use sqlx::{Pool, Sqlite};
use tracing::info;

use crate::config::PoolConfig;
use crate::entities::EntityKind;
use crate::errors::{AppError, AppResult};

mod records;
mod schema;
/// In-memory database helpers for tests
pub mod test_utils;

pub use records::{Record, DEFAULT_RECENT_POSTS_LIMIT};

/// Database manager for multi-tenant record storage
#[derive(Clone)]
pub struct Database {
    pool: Pool<Sqlite>,
}

impl Database {
    /// Create a new database connection pool and run schema bootstrap
    ///
    /// # Errors
    ///
    /// Returns an error if the URL is not a `SQLite` target, the pool cannot
    /// be established, or schema creation fails
    pub async fn new(database_url: &str, pool_config: &PoolConfig) -> AppResult<Self> {
        if database_url.starts_with("postgres") {
            return Err(AppError::config(
                "the PostgreSQL backend is not available in this build",
            ));
        }

        // Ensure SQLite creates the database file if it doesn't exist
        let connection_options = if database_url.starts_with("sqlite:") {
            format!("{database_url}?mode=rwc")
        } else {
            database_url.to_string()
        };

        let pool = SqlitePoolOptions::new()
            .max_connections(pool_config.max_connections)
            .acquire_timeout(Duration::from_secs(pool_config.acquire_timeout_secs))
            .connect(&connection_options)
            .await?;

        let db = Self { pool };

        db.migrate().await?;
        info!("database schema ready ({} tables)", EntityKind::ALL.len());

        Ok(db)
    }

    /// Access the underlying pool
    #[must_use]
    pub const fn pool(&self) -> &Pool<Sqlite> {
        &self.pool
    }

    /// Drain and close the connection pool. In-flight operations finish or
    /// fail cleanly; call on graceful shutdown.
    pub async fn close(&self) {
        info!("closing database connection pool");
        self.pool.close().await;
    }

    /// Row counts per entity table, in schema order
    ///
    /// # Errors
    ///
    /// Returns an error if a count query fails
    pub async fn table_counts(&self) -> AppResult<Vec<(&'static str, i64)>> {
        let mut counts = Vec::with_capacity(EntityKind::ALL.len());
        for kind in EntityKind::ALL {
            let sql = format!("SELECT COUNT(*) FROM {}", kind.table());
            let count: i64 = sqlx::query_scalar(&sql).fetch_one(&self.pool).await?;
            counts.push((kind.table(), count));
        }
        Ok(counts)
    }
}
