// ABOUTME: Idempotent schema bootstrap for all eleven entity tables
// ABOUTME: Creates tables, defaults, CHECK constraints, and secondary indexes
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Wellspring Contributors

//! Schema initializer. Safe to run on every process start: all statements use
//! `IF NOT EXISTS` forms and nothing here is destructive. Any error aborts
//! startup; the process must not continue partially initialized.

use tracing::error;

use super::Database;
use crate::errors::{AppError, AppResult};

impl Database {
    /// Create all entity tables and secondary indexes (idempotent)
    ///
    /// # Errors
    ///
    /// Returns an error if any table or index creation fails
    pub async fn migrate(&self) -> AppResult<()> {
        let result: Result<(), sqlx::Error> = self.create_schema().await;
        result.map_err(|e| {
            error!("schema bootstrap failed: {e}");
            AppError::from(e)
        })
    }

    async fn create_schema(&self) -> Result<(), sqlx::Error> {
        // Owner table: user_id doubles as the public identifier
        sqlx::query(
            r"
            CREATE TABLE IF NOT EXISTS users (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                user_id TEXT UNIQUE NOT NULL,
                name TEXT NOT NULL,
                email TEXT,
                created_at DATETIME DEFAULT CURRENT_TIMESTAMP,
                updated_at DATETIME DEFAULT CURRENT_TIMESTAMP
            )
            ",
        )
        .execute(&self.pool)
        .await?;

        sqlx::query(
            r"
            CREATE TABLE IF NOT EXISTS goals (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                goal_id TEXT UNIQUE NOT NULL,
                user_id TEXT NOT NULL,
                title TEXT NOT NULL,
                description TEXT,
                category TEXT,
                target_date DATE,
                status TEXT NOT NULL DEFAULT 'active',
                subjects TEXT NOT NULL DEFAULT '[]',
                progress INTEGER NOT NULL DEFAULT 0,
                created_at DATETIME DEFAULT CURRENT_TIMESTAMP,
                updated_at DATETIME DEFAULT CURRENT_TIMESTAMP
            )
            ",
        )
        .execute(&self.pool)
        .await?;

        sqlx::query(
            r"
            CREATE TABLE IF NOT EXISTS habits (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                habit_id TEXT UNIQUE NOT NULL,
                user_id TEXT NOT NULL,
                name TEXT NOT NULL,
                description TEXT,
                frequency TEXT NOT NULL DEFAULT 'daily',
                streak INTEGER NOT NULL DEFAULT 0,
                completed_dates TEXT NOT NULL DEFAULT '[]',
                created_at DATETIME DEFAULT CURRENT_TIMESTAMP,
                updated_at DATETIME DEFAULT CURRENT_TIMESTAMP
            )
            ",
        )
        .execute(&self.pool)
        .await?;

        sqlx::query(
            r"
            CREATE TABLE IF NOT EXISTS tasks (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                task_id TEXT UNIQUE NOT NULL,
                user_id TEXT NOT NULL,
                title TEXT NOT NULL,
                description TEXT,
                due_date DATE,
                priority TEXT NOT NULL DEFAULT 'medium',
                completed BOOLEAN NOT NULL DEFAULT 0,
                created_at DATETIME DEFAULT CURRENT_TIMESTAMP,
                updated_at DATETIME DEFAULT CURRENT_TIMESTAMP
            )
            ",
        )
        .execute(&self.pool)
        .await?;

        // One row per (user_id, log_date) at the application level; the
        // schema does not enforce that uniqueness.
        sqlx::query(
            r"
            CREATE TABLE IF NOT EXISTS stress_logs (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                stress_log_id TEXT UNIQUE NOT NULL,
                user_id TEXT NOT NULL,
                log_date DATE NOT NULL,
                mood INTEGER CHECK (mood BETWEEN 1 AND 5),
                stress_level INTEGER CHECK (stress_level BETWEEN 1 AND 10),
                triggers TEXT NOT NULL DEFAULT '[]',
                notes TEXT,
                created_at DATETIME DEFAULT CURRENT_TIMESTAMP,
                updated_at DATETIME DEFAULT CURRENT_TIMESTAMP
            )
            ",
        )
        .execute(&self.pool)
        .await?;

        sqlx::query(
            r"
            CREATE TABLE IF NOT EXISTS expenses (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                expense_id TEXT UNIQUE NOT NULL,
                user_id TEXT NOT NULL,
                amount REAL NOT NULL,
                category TEXT,
                description TEXT,
                expense_date DATE,
                created_at DATETIME DEFAULT CURRENT_TIMESTAMP,
                updated_at DATETIME DEFAULT CURRENT_TIMESTAMP
            )
            ",
        )
        .execute(&self.pool)
        .await?;

        sqlx::query(
            r"
            CREATE TABLE IF NOT EXISTS hobby_posts (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                post_id TEXT UNIQUE NOT NULL,
                user_id TEXT NOT NULL,
                hobby TEXT NOT NULL,
                caption TEXT,
                media_url TEXT,
                tags TEXT NOT NULL DEFAULT '[]',
                created_at DATETIME DEFAULT CURRENT_TIMESTAMP,
                updated_at DATETIME DEFAULT CURRENT_TIMESTAMP
            )
            ",
        )
        .execute(&self.pool)
        .await?;

        sqlx::query(
            r"
            CREATE TABLE IF NOT EXISTS reflections (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                reflection_id TEXT UNIQUE NOT NULL,
                user_id TEXT NOT NULL,
                reflection_date DATE NOT NULL,
                content TEXT NOT NULL,
                highlights TEXT NOT NULL DEFAULT '[]',
                gratitude TEXT NOT NULL DEFAULT '[]',
                created_at DATETIME DEFAULT CURRENT_TIMESTAMP,
                updated_at DATETIME DEFAULT CURRENT_TIMESTAMP
            )
            ",
        )
        .execute(&self.pool)
        .await?;

        sqlx::query(
            r"
            CREATE TABLE IF NOT EXISTS routines (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                routine_id TEXT UNIQUE NOT NULL,
                user_id TEXT NOT NULL,
                name TEXT NOT NULL,
                time_of_day TEXT NOT NULL DEFAULT 'morning',
                steps TEXT NOT NULL DEFAULT '[]',
                active BOOLEAN NOT NULL DEFAULT 1,
                created_at DATETIME DEFAULT CURRENT_TIMESTAMP,
                updated_at DATETIME DEFAULT CURRENT_TIMESTAMP
            )
            ",
        )
        .execute(&self.pool)
        .await?;

        sqlx::query(
            r"
            CREATE TABLE IF NOT EXISTS journal_entries (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                entry_id TEXT UNIQUE NOT NULL,
                user_id TEXT NOT NULL,
                entry_date DATE NOT NULL,
                title TEXT,
                body TEXT NOT NULL,
                tags TEXT NOT NULL DEFAULT '[]',
                created_at DATETIME DEFAULT CURRENT_TIMESTAMP,
                updated_at DATETIME DEFAULT CURRENT_TIMESTAMP
            )
            ",
        )
        .execute(&self.pool)
        .await?;

        sqlx::query(
            r"
            CREATE TABLE IF NOT EXISTS focus_sessions (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                session_id TEXT UNIQUE NOT NULL,
                user_id TEXT NOT NULL,
                session_date DATE,
                duration_minutes INTEGER,
                task_ref TEXT,
                completed BOOLEAN NOT NULL DEFAULT 0,
                notes TEXT,
                created_at DATETIME DEFAULT CURRENT_TIMESTAMP,
                updated_at DATETIME DEFAULT CURRENT_TIMESTAMP
            )
            ",
        )
        .execute(&self.pool)
        .await?;

        // One owner index per table; the feed table is indexed on recency
        // instead to support the global recent-posts query.
        for index in [
            "CREATE INDEX IF NOT EXISTS idx_goals_user_id ON goals(user_id)",
            "CREATE INDEX IF NOT EXISTS idx_habits_user_id ON habits(user_id)",
            "CREATE INDEX IF NOT EXISTS idx_tasks_user_id ON tasks(user_id)",
            "CREATE INDEX IF NOT EXISTS idx_stress_logs_user_id ON stress_logs(user_id)",
            "CREATE INDEX IF NOT EXISTS idx_expenses_user_id ON expenses(user_id)",
            "CREATE INDEX IF NOT EXISTS idx_hobby_posts_created_at ON hobby_posts(created_at DESC)",
            "CREATE INDEX IF NOT EXISTS idx_reflections_user_id ON reflections(user_id)",
            "CREATE INDEX IF NOT EXISTS idx_routines_user_id ON routines(user_id)",
            "CREATE INDEX IF NOT EXISTS idx_journal_entries_user_id ON journal_entries(user_id)",
            "CREATE INDEX IF NOT EXISTS idx_focus_sessions_user_id ON focus_sessions(user_id)",
        ] {
            sqlx::query(index).execute(&self.pool).await?;
        }

        Ok(())
    }
}
