// ABOUTME: Main library entry point for the Wellspring tracking backend
// ABOUTME: Provides the multi-tenant generic record service and schema bootstrap
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Wellspring Contributors

#![deny(unsafe_code)]

//! # Wellspring
//!
//! A multi-tenant CRUD backend for personal productivity and wellness
//! tracking: goals, habits, tasks, mood/stress logs, expenses, hobby posts,
//! reflections, routines, journal entries, and focus sessions.
//!
//! The core is a generic, table-agnostic record service over a fixed set of
//! entity kinds. Every record is keyed by an external per-user identifier
//! (the owner) and an opaque public identifier; tenant isolation comes from
//! the owner predicate on every read, update, and delete.
//!
//! ## Architecture
//!
//! - **Entities**: the closed set of entity kinds and their table metadata
//! - **Database**: pooled `SQLite` access, idempotent schema bootstrap, and
//!   the generic record operations
//! - **Config**: environment-only configuration with typed database URLs
//! - **Errors**: unified error codes shared by all layers
//!
//! ## Example
//!
//! ```rust,no_run
//! use serde_json::json;
//! use wellspring::config::PoolConfig;
//! use wellspring::database::Database;
//! use wellspring::entities::EntityKind;
//! use wellspring::errors::AppResult;
//!
//! #[tokio::main]
//! async fn main() -> AppResult<()> {
//!     let db = Database::new("sqlite:data/wellspring.db", &PoolConfig::default()).await?;
//!
//!     let fields = json!({
//!         "goal_id": "g1",
//!         "user_id": "u1",
//!         "title": "Pass exam",
//!         "category": "academic",
//!     });
//!     let goal = db
//!         .create_record(EntityKind::Goals, fields.as_object().unwrap())
//!         .await?;
//!     println!("created goal with status {}", goal["status"]);
//!
//!     db.close().await;
//!     Ok(())
//! }
//! ```

/// Configuration management (environment variables, database URLs, pools)
pub mod config;
/// Pooled database access, schema bootstrap, and the generic record service
pub mod database;
/// The closed set of tracked entity kinds and their table metadata
pub mod entities;
/// Unified error types and codes
pub mod errors;
/// Structured logging setup
pub mod logging;
