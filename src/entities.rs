// ABOUTME: Closed set of tracked entity kinds and their table/column metadata
// ABOUTME: Maps each kind to its table name, public-id column, date column, and field allow-list
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Wellspring Contributors

//! # Entity Kinds
//!
//! Every table the record service can touch is described here as a variant of
//! [`EntityKind`]. Table names, public-identifier columns, and writable fields
//! come exclusively from this closed mapping; no SQL identifier is ever
//! derived from runtime input. Irregular singulars (`journal_entries` ->
//! `entry_id`) are decided explicitly rather than by suffix stripping.

use std::fmt;
use std::str::FromStr;

use crate::errors::AppError;

/// Storage type of a writable entity field.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldType {
    /// Free-form text
    Text,
    /// 64-bit integer
    Integer,
    /// Floating-point number
    Real,
    /// Boolean flag
    Boolean,
    /// Calendar date, stored as `YYYY-MM-DD` text
    Date,
    /// JSON sequence, stored as serialized text (`DEFAULT '[]'`)
    JsonList,
}

/// A writable field on an entity table.
#[derive(Debug, Clone, Copy)]
pub struct FieldSpec {
    /// Column name
    pub name: &'static str,
    /// Storage type used for binding and decoding
    pub ty: FieldType,
}

const fn field(name: &'static str, ty: FieldType) -> FieldSpec {
    FieldSpec { name, ty }
}

const USER_FIELDS: &[FieldSpec] = &[
    field("name", FieldType::Text),
    field("email", FieldType::Text),
];

const GOAL_FIELDS: &[FieldSpec] = &[
    field("title", FieldType::Text),
    field("description", FieldType::Text),
    field("category", FieldType::Text),
    field("target_date", FieldType::Date),
    field("status", FieldType::Text),
    field("subjects", FieldType::JsonList),
    field("progress", FieldType::Integer),
];

const HABIT_FIELDS: &[FieldSpec] = &[
    field("name", FieldType::Text),
    field("description", FieldType::Text),
    field("frequency", FieldType::Text),
    field("streak", FieldType::Integer),
    field("completed_dates", FieldType::JsonList),
];

const TASK_FIELDS: &[FieldSpec] = &[
    field("title", FieldType::Text),
    field("description", FieldType::Text),
    field("due_date", FieldType::Date),
    field("priority", FieldType::Text),
    field("completed", FieldType::Boolean),
];

const STRESS_LOG_FIELDS: &[FieldSpec] = &[
    field("log_date", FieldType::Date),
    field("mood", FieldType::Integer),
    field("stress_level", FieldType::Integer),
    field("triggers", FieldType::JsonList),
    field("notes", FieldType::Text),
];

const EXPENSE_FIELDS: &[FieldSpec] = &[
    field("amount", FieldType::Real),
    field("category", FieldType::Text),
    field("description", FieldType::Text),
    field("expense_date", FieldType::Date),
];

const HOBBY_POST_FIELDS: &[FieldSpec] = &[
    field("hobby", FieldType::Text),
    field("caption", FieldType::Text),
    field("media_url", FieldType::Text),
    field("tags", FieldType::JsonList),
];

const REFLECTION_FIELDS: &[FieldSpec] = &[
    field("reflection_date", FieldType::Date),
    field("content", FieldType::Text),
    field("highlights", FieldType::JsonList),
    field("gratitude", FieldType::JsonList),
];

const ROUTINE_FIELDS: &[FieldSpec] = &[
    field("name", FieldType::Text),
    field("time_of_day", FieldType::Text),
    field("steps", FieldType::JsonList),
    field("active", FieldType::Boolean),
];

const JOURNAL_ENTRY_FIELDS: &[FieldSpec] = &[
    field("entry_date", FieldType::Date),
    field("title", FieldType::Text),
    field("body", FieldType::Text),
    field("tags", FieldType::JsonList),
];

const FOCUS_SESSION_FIELDS: &[FieldSpec] = &[
    field("session_date", FieldType::Date),
    field("duration_minutes", FieldType::Integer),
    field("task_ref", FieldType::Text),
    field("completed", FieldType::Boolean),
    field("notes", FieldType::Text),
];

/// The fixed set of tracked record types.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EntityKind {
    /// Tenant owner table; its public id column is the owner column itself
    Users,
    /// Long-running goals with status and subject tags
    Goals,
    /// Recurring habits with streaks and completion dates
    Habits,
    /// One-off tasks with priority and completion flag
    Tasks,
    /// Daily mood/stress log, one row per owner and date
    StressLogs,
    /// Expense entries
    Expenses,
    /// Hobby feed posts, queried globally by recency
    HobbyPosts,
    /// Daily reflections
    Reflections,
    /// Named routines (morning/evening checklists)
    Routines,
    /// Daily journal entries
    JournalEntries,
    /// Timed focus sessions, optionally linked to a task
    FocusSessions,
}

impl EntityKind {
    /// All entity kinds, in schema-creation order.
    pub const ALL: [Self; 11] = [
        Self::Users,
        Self::Goals,
        Self::Habits,
        Self::Tasks,
        Self::StressLogs,
        Self::Expenses,
        Self::HobbyPosts,
        Self::Reflections,
        Self::Routines,
        Self::JournalEntries,
        Self::FocusSessions,
    ];

    /// Table name backing this kind.
    #[must_use]
    pub const fn table(self) -> &'static str {
        match self {
            Self::Users => "users",
            Self::Goals => "goals",
            Self::Habits => "habits",
            Self::Tasks => "tasks",
            Self::StressLogs => "stress_logs",
            Self::Expenses => "expenses",
            Self::HobbyPosts => "hobby_posts",
            Self::Reflections => "reflections",
            Self::Routines => "routines",
            Self::JournalEntries => "journal_entries",
            Self::FocusSessions => "focus_sessions",
        }
    }

    /// Public-identifier column. For [`EntityKind::Users`] this is the owner
    /// column itself.
    #[must_use]
    pub const fn id_column(self) -> &'static str {
        match self {
            Self::Users => "user_id",
            Self::Goals => "goal_id",
            Self::Habits => "habit_id",
            Self::Tasks => "task_id",
            Self::StressLogs => "stress_log_id",
            Self::Expenses => "expense_id",
            Self::HobbyPosts => "post_id",
            Self::Reflections => "reflection_id",
            Self::Routines => "routine_id",
            Self::JournalEntries => "entry_id",
            Self::FocusSessions => "session_id",
        }
    }

    /// Date column for daily-log kinds, if any. Kinds with a date column
    /// support owner-and-date lookups and hold at most one row per
    /// (owner, date) at the application level.
    #[must_use]
    pub const fn date_column(self) -> Option<&'static str> {
        match self {
            Self::StressLogs => Some("log_date"),
            Self::Reflections => Some("reflection_date"),
            Self::JournalEntries => Some("entry_date"),
            Self::FocusSessions => Some("session_date"),
            _ => None,
        }
    }

    /// Writable domain fields for this kind. The public-identifier and owner
    /// columns are implicit and not listed here.
    #[must_use]
    pub const fn fields(self) -> &'static [FieldSpec] {
        match self {
            Self::Users => USER_FIELDS,
            Self::Goals => GOAL_FIELDS,
            Self::Habits => HABIT_FIELDS,
            Self::Tasks => TASK_FIELDS,
            Self::StressLogs => STRESS_LOG_FIELDS,
            Self::Expenses => EXPENSE_FIELDS,
            Self::HobbyPosts => HOBBY_POST_FIELDS,
            Self::Reflections => REFLECTION_FIELDS,
            Self::Routines => ROUTINE_FIELDS,
            Self::JournalEntries => JOURNAL_ENTRY_FIELDS,
            Self::FocusSessions => FOCUS_SESSION_FIELDS,
        }
    }

    /// Look up a writable field spec by column name.
    #[must_use]
    pub fn field(self, name: &str) -> Option<&'static FieldSpec> {
        self.fields().iter().find(|f| f.name == name)
    }
}

impl fmt::Display for EntityKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.table())
    }
}

impl FromStr for EntityKind {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|kind| kind.table() == s)
            .ok_or_else(|| AppError::invalid_input(format!("unknown entity kind: {s}")))
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]
    use super::*;

    #[test]
    fn test_eleven_kinds_with_unique_tables() {
        let mut tables: Vec<_> = EntityKind::ALL.iter().map(|k| k.table()).collect();
        tables.sort_unstable();
        tables.dedup();
        assert_eq!(tables.len(), 11);
    }

    #[test]
    fn test_irregular_id_columns_use_explicit_mapping() {
        // Suffix-stripping would produce "journal_entrie_id" here.
        assert_eq!(EntityKind::JournalEntries.id_column(), "entry_id");
        assert_eq!(EntityKind::FocusSessions.id_column(), "session_id");
        assert_eq!(EntityKind::HobbyPosts.id_column(), "post_id");
        // The owner table's public id is the owner column itself.
        assert_eq!(EntityKind::Users.id_column(), "user_id");
    }

    #[test]
    fn test_regular_id_columns() {
        assert_eq!(EntityKind::Goals.id_column(), "goal_id");
        assert_eq!(EntityKind::StressLogs.id_column(), "stress_log_id");
    }

    #[test]
    fn test_daily_log_kinds_have_date_columns() {
        assert_eq!(EntityKind::StressLogs.date_column(), Some("log_date"));
        assert_eq!(
            EntityKind::Reflections.date_column(),
            Some("reflection_date")
        );
        assert_eq!(EntityKind::Goals.date_column(), None);
    }

    #[test]
    fn test_parse_kind_from_table_name() {
        assert_eq!(
            "journal_entries".parse::<EntityKind>().unwrap(),
            EntityKind::JournalEntries
        );
        assert!("sessions".parse::<EntityKind>().is_err());
    }

    #[test]
    fn test_field_lookup() {
        let spec = EntityKind::StressLogs.field("mood").unwrap();
        assert_eq!(spec.ty, FieldType::Integer);
        assert!(EntityKind::StressLogs.field("user_id").is_none());
    }
}
