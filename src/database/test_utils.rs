// ABOUTME: Test utilities for database operations and in-memory test database creation
// ABOUTME: Provides helper functions for creating isolated test database instances
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Wellspring Contributors

use super::Database;
use crate::config::PoolConfig;
use crate::errors::AppResult;

/// Create a test database instance
///
/// # Errors
///
/// Returns an error if database initialization fails
pub async fn create_test_db() -> AppResult<Database> {
    // In-memory SQLite is per-connection; a single-connection pool keeps the
    // schema visible to every operation in the test.
    let pool = PoolConfig {
        max_connections: 1,
        ..PoolConfig::default()
    };
    Database::new("sqlite::memory:", &pool).await
}
