// ABOUTME: Operational CLI for the Wellspring backend
// ABOUTME: Bootstraps the schema and reports per-table row counts
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Wellspring Contributors

//! Wellspring operations CLI.
//!
//! Usage:
//! ```bash
//! # Create or update the schema (idempotent)
//! cargo run --bin wellspring-cli -- migrate
//!
//! # Show per-table row counts
//! cargo run --bin wellspring-cli -- status --database-url sqlite:data/wellspring.db
//! ```

use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing::info;

use wellspring::config::environment::ServerConfig;
use wellspring::database::Database;
use wellspring::logging::LoggingConfig;

#[derive(Parser)]
#[command(name = "wellspring-cli", about = "Wellspring backend operations")]
struct Cli {
    /// Database URL override (defaults to DATABASE_URL)
    #[arg(long, global = true)]
    database_url: Option<String>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Create tables and indexes (safe to re-run)
    Migrate,
    /// Print per-table row counts
    Status,
}

#[tokio::main]
async fn main() -> Result<()> {
    LoggingConfig::from_env().init()?;

    let cli = Cli::parse();
    let config = ServerConfig::from_env()?;

    let database_url = cli.database_url.unwrap_or_else(|| {
        config
            .database
            .url
            .to_connection_string(config.database.require_tls)
    });

    let db = Database::new(&database_url, &config.database.pool).await?;

    match cli.command {
        Command::Migrate => {
            // Database::new already ran the bootstrap; reaching here means it succeeded.
            info!("schema bootstrap complete");
        }
        Command::Status => {
            for (table, count) in db.table_counts().await? {
                println!("{table:<16} {count}");
            }
        }
    }

    db.close().await;
    Ok(())
}
