// ABOUTME: Demo data seeder for the Wellspring backend
// ABOUTME: Generates realistic goals, habits, tasks, logs, and posts for a demo user
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Wellspring Contributors

//! Demo data seeder.
//!
//! Populates the database with a demo user and a few weeks of realistic
//! tracking data, all through the generic record service.
//!
//! Usage:
//! ```bash
//! # Seed with default settings
//! cargo run --bin seed-demo-data
//!
//! # Seed a specific user id with 30 days of logs
//! cargo run --bin seed-demo-data -- --user demo --days 30
//! ```

use anyhow::Result;
use chrono::{Duration, Utc};
use clap::Parser;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde_json::{json, Map, Value};
use tracing::info;
use uuid::Uuid;

use wellspring::config::environment::ServerConfig;
use wellspring::database::Database;
use wellspring::entities::EntityKind;
use wellspring::logging::LoggingConfig;

/// Fixed seed so repeated runs against a fresh database produce the same data
const DEMO_SEED: u64 = 42;

#[derive(Parser)]
#[command(name = "seed-demo-data", about = "Wellspring demo data seeder")]
struct SeedArgs {
    /// Database URL override
    #[arg(long)]
    database_url: Option<String>,

    /// Owner id for the seeded records
    #[arg(long, default_value = "demo")]
    user: String,

    /// Days of daily logs to generate
    #[arg(long, default_value_t = 14)]
    days: i64,
}

fn obj(value: Value) -> Map<String, Value> {
    value.as_object().cloned().unwrap_or_default()
}

#[tokio::main]
async fn main() -> Result<()> {
    LoggingConfig::from_env().init()?;

    let args = SeedArgs::parse();
    let config = ServerConfig::from_env()?;
    let database_url = args.database_url.unwrap_or_else(|| {
        config
            .database
            .url
            .to_connection_string(config.database.require_tls)
    });

    let db = Database::new(&database_url, &config.database.pool).await?;
    let mut rng = StdRng::seed_from_u64(DEMO_SEED);
    let owner = args.user.as_str();
    let today = Utc::now().date_naive();

    if db.find_one(EntityKind::Users, owner, owner).await?.is_none() {
        db.create_record(
            EntityKind::Users,
            &obj(json!({
                "user_id": owner,
                "name": "Demo User",
                "email": "demo@example.com",
            })),
        )
        .await?;
        info!("created demo user {owner}");
    }

    for (title, category, subjects) in [
        ("Pass the statistics exam", "academic", json!(["statistics", "probability"])),
        ("Run a 10k", "fitness", json!(["running"])),
        ("Read 12 books this year", "personal", json!([])),
    ] {
        db.create_record(
            EntityKind::Goals,
            &obj(json!({
                "goal_id": Uuid::new_v4().to_string(),
                "user_id": owner,
                "title": title,
                "category": category,
                "subjects": subjects,
            })),
        )
        .await?;
    }
    info!("seeded goals");

    for (name, frequency) in [("Morning stretch", "daily"), ("Weekly review", "weekly")] {
        db.create_record(
            EntityKind::Habits,
            &obj(json!({
                "habit_id": Uuid::new_v4().to_string(),
                "user_id": owner,
                "name": name,
                "frequency": frequency,
                "streak": rng.gen_range(0..21),
            })),
        )
        .await?;
    }
    info!("seeded habits");

    for (title, priority) in [
        ("Book dentist appointment", "high"),
        ("Refill transit card", "medium"),
        ("Sort photo library", "low"),
    ] {
        db.create_record(
            EntityKind::Tasks,
            &obj(json!({
                "task_id": Uuid::new_v4().to_string(),
                "user_id": owner,
                "title": title,
                "priority": priority,
                "due_date": (today + Duration::days(rng.gen_range(1..14))).to_string(),
            })),
        )
        .await?;
    }
    info!("seeded tasks");

    for day in 0..args.days {
        let date = (today - Duration::days(day)).to_string();
        db.create_record(
            EntityKind::StressLogs,
            &obj(json!({
                "stress_log_id": Uuid::new_v4().to_string(),
                "user_id": owner,
                "log_date": date,
                "mood": rng.gen_range(1..=5),
                "stress_level": rng.gen_range(1..=10),
                "triggers": json!(["work"]),
            })),
        )
        .await?;

        db.create_record(
            EntityKind::JournalEntries,
            &obj(json!({
                "entry_id": Uuid::new_v4().to_string(),
                "user_id": owner,
                "entry_date": date,
                "body": "Logged by the demo seeder.",
                "tags": json!(["demo"]),
            })),
        )
        .await?;
    }
    info!("seeded {} days of logs", args.days);

    for (category, amount) in [("groceries", 42.50), ("transport", 12.0), ("books", 18.99)] {
        db.create_record(
            EntityKind::Expenses,
            &obj(json!({
                "expense_id": Uuid::new_v4().to_string(),
                "user_id": owner,
                "amount": amount,
                "category": category,
                "expense_date": today.to_string(),
            })),
        )
        .await?;
    }

    for (hobby, caption) in [
        ("photography", "Golden hour by the river"),
        ("baking", "First attempt at sourdough"),
    ] {
        db.create_record(
            EntityKind::HobbyPosts,
            &obj(json!({
                "post_id": Uuid::new_v4().to_string(),
                "user_id": owner,
                "hobby": hobby,
                "caption": caption,
                "tags": json!([hobby]),
            })),
        )
        .await?;
    }

    db.create_record(
        EntityKind::Routines,
        &obj(json!({
            "routine_id": Uuid::new_v4().to_string(),
            "user_id": owner,
            "name": "Morning startup",
            "steps": json!(["stretch", "water", "plan the day"]),
        })),
    )
    .await?;

    db.create_record(
        EntityKind::Reflections,
        &obj(json!({
            "reflection_id": Uuid::new_v4().to_string(),
            "user_id": owner,
            "reflection_date": today.to_string(),
            "content": "Good week overall; sleep needs work.",
            "highlights": json!(["finished the draft"]),
        })),
    )
    .await?;

    db.create_record(
        EntityKind::FocusSessions,
        &obj(json!({
            "session_id": Uuid::new_v4().to_string(),
            "user_id": owner,
            "session_date": today.to_string(),
            "duration_minutes": 50,
            "completed": true,
        })),
    )
    .await?;

    for (table, count) in db.table_counts().await? {
        info!("{table}: {count} rows");
    }

    db.close().await;
    Ok(())
}
