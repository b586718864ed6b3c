// ABOUTME: Integration tests for idempotent schema bootstrap and pool lifecycle
// ABOUTME: Verifies repeated migration, table inventory, and clean shutdown
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Wellspring Contributors

#![allow(clippy::unwrap_used, clippy::expect_used)]

mod common;

use common::{create_test_database, create_test_user, fields};
use serde_json::json;
use wellspring::config::PoolConfig;
use wellspring::database::Database;
use wellspring::entities::EntityKind;

#[tokio::test]
async fn test_migrate_is_idempotent_on_a_shared_database() {
    common::init_test_logging();
    let dir = tempfile::tempdir().unwrap();
    let url = format!("sqlite:{}", dir.path().join("wellspring.db").display());
    let pool = PoolConfig::default();

    // First startup creates the schema and some data.
    let db = Database::new(&url, &pool).await.expect("first startup");
    create_test_user(&db, "u1").await;
    db.create_record(
        EntityKind::Goals,
        &fields(json!({"goal_id": "g1", "user_id": "u1", "title": "Keep data"})),
    )
    .await
    .unwrap();
    db.close().await;

    // Second startup against the same file must not error or destroy rows.
    let db = Database::new(&url, &pool).await.expect("second startup");
    let goal = db
        .find_one(EntityKind::Goals, "g1", "u1")
        .await
        .unwrap()
        .expect("existing rows must survive re-migration");
    assert_eq!(goal["title"], "Keep data");

    // And an explicit re-run of the bootstrap is equally safe.
    db.migrate().await.expect("explicit re-migration");
    db.close().await;
}

#[tokio::test]
async fn test_all_eleven_tables_exist() {
    let db = create_test_database().await;

    let counts = db.table_counts().await.unwrap();
    assert_eq!(counts.len(), 11);
    assert!(counts.iter().all(|(_, count)| *count == 0));

    let tables: Vec<&str> = counts.iter().map(|(table, _)| *table).collect();
    assert!(tables.contains(&"users"));
    assert!(tables.contains(&"stress_logs"));
    assert!(tables.contains(&"journal_entries"));
}

#[tokio::test]
async fn test_feed_table_has_recency_index() {
    let db = create_test_database().await;

    let rows = db
        .raw_query(
            "SELECT name FROM sqlite_master WHERE type = 'index' AND tbl_name = ?1",
            &[json!("hobby_posts")],
        )
        .await
        .unwrap();
    let names: Vec<&str> = rows
        .iter()
        .filter_map(|r| r["name"].as_str())
        .collect();
    assert!(names.contains(&"idx_hobby_posts_created_at"));
}

#[tokio::test]
async fn test_owner_indexes_exist() {
    let db = create_test_database().await;

    let rows = db
        .raw_query(
            "SELECT name FROM sqlite_master WHERE type = 'index' AND name LIKE 'idx_%_user_id'",
            &[],
        )
        .await
        .unwrap();
    // Every non-feed, non-owner table carries an owner index.
    assert_eq!(rows.len(), 9);
}

#[tokio::test]
async fn test_operations_fail_cleanly_after_close() {
    let db = create_test_database().await;
    db.close().await;

    let result = db.list_by_owner(EntityKind::Goals, "u1").await;
    assert!(result.is_err(), "a drained pool must surface an error");
}

#[tokio::test]
async fn test_postgres_url_is_rejected_by_this_build() {
    common::init_test_logging();
    let result = Database::new(
        "postgresql://app@db/wellspring",
        &PoolConfig::default(),
    )
    .await;
    assert!(result.is_err());
}
