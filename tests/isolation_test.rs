// ABOUTME: Integration tests for the tenant-isolation boundary
// ABOUTME: Verifies owner-scoped reads, updates, and deletes never cross tenants
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Wellspring Contributors

#![allow(clippy::unwrap_used, clippy::expect_used)]

mod common;

use common::{create_test_database, create_test_goal, create_test_user, fields};
use serde_json::json;
use wellspring::entities::EntityKind;

#[tokio::test]
async fn test_find_one_never_crosses_owners() {
    let db = create_test_database().await;
    create_test_user(&db, "alice").await;
    create_test_user(&db, "mallory").await;
    create_test_goal(&db, "g-alice", "alice").await;

    // Mallory knows Alice's valid public identifier; scoping still hides it.
    assert!(db
        .find_one(EntityKind::Goals, "g-alice", "mallory")
        .await
        .unwrap()
        .is_none());
}

#[tokio::test]
async fn test_update_against_foreign_row_matches_nothing() {
    let db = create_test_database().await;
    create_test_user(&db, "alice").await;
    create_test_goal(&db, "g-alice", "alice").await;

    let result = db
        .update_record(
            EntityKind::Goals,
            "g-alice",
            &fields(json!({"status": "completed"})),
            "mallory",
        )
        .await
        .unwrap();
    assert!(result.is_none(), "cross-tenant update must match zero rows");

    // The real row is untouched.
    let goal = db
        .find_one(EntityKind::Goals, "g-alice", "alice")
        .await
        .unwrap()
        .expect("alice's goal must survive");
    assert_eq!(goal["status"], "active");
}

#[tokio::test]
async fn test_delete_against_foreign_row_matches_nothing() {
    let db = create_test_database().await;
    create_test_user(&db, "alice").await;
    create_test_goal(&db, "g-alice", "alice").await;

    let deleted = db
        .delete_record(EntityKind::Goals, "g-alice", "mallory")
        .await
        .unwrap();
    assert!(!deleted);
    assert!(db
        .find_one(EntityKind::Goals, "g-alice", "alice")
        .await
        .unwrap()
        .is_some());
}

#[tokio::test]
async fn test_list_by_owner_partitions_tenants() {
    let db = create_test_database().await;
    create_test_user(&db, "alice").await;
    create_test_user(&db, "bob").await;
    create_test_goal(&db, "g1", "alice").await;
    create_test_goal(&db, "g2", "alice").await;
    create_test_goal(&db, "g3", "bob").await;

    let alice_goals = db.list_by_owner(EntityKind::Goals, "alice").await.unwrap();
    assert_eq!(alice_goals.len(), 2);
    assert!(alice_goals.iter().all(|g| g["user_id"] == "alice"));

    let bob_goals = db.list_by_owner(EntityKind::Goals, "bob").await.unwrap();
    assert_eq!(bob_goals.len(), 1);
    assert_eq!(bob_goals[0]["goal_id"], "g3");
}

#[tokio::test]
async fn test_daily_log_lookup_is_owner_scoped() {
    let db = create_test_database().await;
    create_test_user(&db, "alice").await;
    create_test_user(&db, "bob").await;

    db.create_record(
        EntityKind::Reflections,
        &fields(json!({
            "reflection_id": "r1",
            "user_id": "alice",
            "reflection_date": "2025-06-01",
            "content": "Calm day",
        })),
    )
    .await
    .unwrap();

    let date = chrono::NaiveDate::from_ymd_opt(2025, 6, 1).unwrap();
    assert!(db
        .find_one_by_date(EntityKind::Reflections, "alice", date)
        .await
        .unwrap()
        .is_some());
    assert!(db
        .find_one_by_date(EntityKind::Reflections, "bob", date)
        .await
        .unwrap()
        .is_none());
}
