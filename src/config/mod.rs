// ABOUTME: Configuration module grouping database and environment config
// ABOUTME: Re-exports the commonly used configuration types
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Wellspring Contributors

//! Configuration management

/// Database connection and pool configuration
pub mod database;
/// Environment-variable configuration loading
pub mod environment;

pub use database::{DatabaseConfig, DatabaseUrl, PoolConfig};
pub use environment::ServerConfig;
