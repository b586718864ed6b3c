// ABOUTME: Shared test utilities and setup functions for integration tests
// ABOUTME: Provides common database and record creation helpers
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Wellspring Contributors

#![allow(dead_code, clippy::unwrap_used, clippy::expect_used)]

//! Shared test utilities for `wellspring` integration tests.

use std::sync::Once;

use serde_json::{json, Map, Value};
use wellspring::database::{test_utils, Database, Record};
use wellspring::entities::EntityKind;

static INIT_LOGGER: Once = Once::new();

/// Initialize quiet logging for tests (call once per test process)
pub fn init_test_logging() {
    INIT_LOGGER.call_once(|| {
        let log_level = match std::env::var("TEST_LOG").as_deref() {
            Ok("TRACE") => tracing::Level::TRACE,
            Ok("DEBUG") => tracing::Level::DEBUG,
            Ok("INFO") => tracing::Level::INFO,
            _ => tracing::Level::WARN,
        };

        tracing_subscriber::fmt()
            .with_max_level(log_level)
            .with_test_writer()
            .init();
    });
}

/// Standard test database setup
pub async fn create_test_database() -> Database {
    init_test_logging();
    test_utils::create_test_db()
        .await
        .expect("test database setup failed")
}

/// Turn a `json!` object literal into a record field map
pub fn fields(value: Value) -> Record {
    value.as_object().cloned().unwrap_or_else(Map::new)
}

/// Create an owner row so seeded records reference an existing tenant
pub async fn create_test_user(db: &Database, user_id: &str) -> Record {
    db.create_record(
        EntityKind::Users,
        &fields(json!({
            "user_id": user_id,
            "name": format!("Test user {user_id}"),
        })),
    )
    .await
    .expect("user creation failed")
}

/// Create a goal with the given public id and owner
pub async fn create_test_goal(db: &Database, goal_id: &str, user_id: &str) -> Record {
    db.create_record(
        EntityKind::Goals,
        &fields(json!({
            "goal_id": goal_id,
            "user_id": user_id,
            "title": "Pass exam",
            "category": "academic",
        })),
    )
    .await
    .expect("goal creation failed")
}
