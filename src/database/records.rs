// ABOUTME: Generic table-agnostic CRUD operations over the entity-kind allow-list
// ABOUTME: Builds bound-parameter statements from EntityKind metadata, never from caller strings
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Wellspring Contributors

//! # Generic Record Service
//!
//! Table-agnostic create/read/update/delete keyed by owner and public
//! identifier. Every statement is parameter-bound; table and column names
//! come only from [`EntityKind`] metadata. Tenant isolation is enforced by
//! the owner predicate on every read, update, and delete.

use chrono::NaiveDate;
use serde_json::{json, Map, Value};
use sqlx::query::Query;
use sqlx::sqlite::{SqliteArguments, SqliteRow};
use sqlx::{Column, Row, Sqlite, TypeInfo, ValueRef};

use super::Database;
use crate::entities::{EntityKind, FieldType};
use crate::errors::{AppError, AppResult};

/// Default bound for the global recent-posts feed query
pub const DEFAULT_RECENT_POSTS_LIMIT: u32 = 20;

/// A record row as returned to callers: column name -> JSON value, with the
/// internal storage key stripped and JSON-list columns parsed back to arrays.
pub type Record = Map<String, Value>;

impl Database {
    /// Execute an arbitrary bound-parameter statement and return its rows.
    ///
    /// A connection is acquired from the pool for the duration of the call
    /// and released on every exit path, including errors.
    ///
    /// # Errors
    ///
    /// Returns an error if acquisition, execution, or decoding fails
    pub async fn raw_query(&self, sql: &str, params: &[Value]) -> AppResult<Vec<Record>> {
        let mut query = sqlx::query(sql);
        for param in params {
            query = bind_json(query, param)?;
        }

        // PoolConnection releases back to the pool on drop.
        let mut conn = self.pool().acquire().await?;
        let rows = query.fetch_all(&mut *conn).await?;

        rows.iter().map(decode_dynamic_row).collect()
    }

    /// Insert one record using exactly the supplied fields and return the
    /// fully populated row, including schema defaults and timestamps.
    ///
    /// # Errors
    ///
    /// Returns an error on unknown/ill-typed fields, a missing public
    /// identifier or owner, or a storage constraint violation (duplicate
    /// identifier, CHECK range)
    pub async fn create_record(&self, kind: EntityKind, fields: &Record) -> AppResult<Record> {
        let id_column = kind.id_column();

        let public_id = require_string(fields, id_column, kind)?;
        let owner_id = require_string(fields, "user_id", kind)?;

        let mut columns = Vec::with_capacity(fields.len());
        let mut placeholders = Vec::with_capacity(fields.len());
        let mut bindings = Vec::with_capacity(fields.len());

        for (name, value) in fields {
            let ty = writable_field_type(kind, name)?;
            columns.push(name.as_str());
            placeholders.push(format!("?{}", columns.len()));
            bindings.push((name.as_str(), ty, value));
        }

        let sql = format!(
            "INSERT INTO {} ({}) VALUES ({})",
            kind.table(),
            columns.join(", "),
            placeholders.join(", ")
        );

        let mut query = sqlx::query(&sql);
        for (name, ty, value) in bindings {
            query = bind_field(query, kind, name, ty, value)?;
        }
        query.execute(self.pool()).await?;

        self.find_one(kind, &public_id, &owner_id)
            .await?
            .ok_or_else(|| AppError::internal("created record could not be read back"))
    }

    /// All records for an owner, newest first. An unknown owner yields an
    /// empty list, not an error.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails
    pub async fn list_by_owner(&self, kind: EntityKind, owner_id: &str) -> AppResult<Vec<Record>> {
        let sql = format!(
            "SELECT {} FROM {} WHERE user_id = ?1 ORDER BY created_at DESC, id DESC",
            select_columns(kind),
            kind.table()
        );
        let rows = sqlx::query(&sql)
            .bind(owner_id)
            .fetch_all(self.pool())
            .await?;

        rows.iter().map(|row| decode_record(kind, row)).collect()
    }

    /// Look up a single record scoped to both its public identifier and its
    /// owner. For [`EntityKind::Users`] the identifier column is the owner
    /// column itself.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails
    pub async fn find_one(
        &self,
        kind: EntityKind,
        public_id: &str,
        owner_id: &str,
    ) -> AppResult<Option<Record>> {
        let sql = format!(
            "SELECT {} FROM {} WHERE {} = ?1 AND user_id = ?2 LIMIT 1",
            select_columns(kind),
            kind.table(),
            kind.id_column()
        );
        let row = sqlx::query(&sql)
            .bind(public_id)
            .bind(owner_id)
            .fetch_optional(self.pool())
            .await?;

        row.as_ref().map(|r| decode_record(kind, r)).transpose()
    }

    /// Daily-log lookup scoped to owner and exact date. The service assumes
    /// at most one row per (owner, date) for these kinds.
    ///
    /// # Errors
    ///
    /// Returns an error if the kind has no date column or the query fails
    pub async fn find_one_by_date(
        &self,
        kind: EntityKind,
        owner_id: &str,
        date: NaiveDate,
    ) -> AppResult<Option<Record>> {
        let date_column = kind.date_column().ok_or_else(|| {
            AppError::invalid_input(format!("{kind} records are not keyed by date"))
        })?;

        let sql = format!(
            "SELECT {} FROM {} WHERE user_id = ?1 AND {} = ?2 LIMIT 1",
            select_columns(kind),
            kind.table(),
            date_column
        );
        let row = sqlx::query(&sql)
            .bind(owner_id)
            .bind(date.format("%Y-%m-%d").to_string())
            .fetch_optional(self.pool())
            .await?;

        row.as_ref().map(|r| decode_record(kind, r)).transpose()
    }

    /// Update exactly the supplied fields and refresh `updated_at`, scoped by
    /// identifier and owner. A cross-tenant update matches zero rows and
    /// returns `None`; an empty field map is a caller error.
    ///
    /// # Errors
    ///
    /// Returns an error on an empty or invalid field map, or a storage
    /// constraint violation
    pub async fn update_record(
        &self,
        kind: EntityKind,
        public_id: &str,
        fields: &Record,
        owner_id: &str,
    ) -> AppResult<Option<Record>> {
        if fields.is_empty() {
            return Err(AppError::invalid_input(
                "update requires at least one field",
            ));
        }

        let mut assignments = Vec::with_capacity(fields.len() + 1);
        let mut bindings = Vec::with_capacity(fields.len());

        for (name, value) in fields {
            let spec = kind.field(name).ok_or_else(|| {
                AppError::invalid_input(format!("unknown field for {kind}: {name}"))
            })?;
            assignments.push(format!("{} = ?{}", name, assignments.len() + 1));
            bindings.push((name.as_str(), spec.ty, value));
        }
        assignments.push("updated_at = CURRENT_TIMESTAMP".into());

        let sql = format!(
            "UPDATE {} SET {} WHERE {} = ?{} AND user_id = ?{}",
            kind.table(),
            assignments.join(", "),
            kind.id_column(),
            bindings.len() + 1,
            bindings.len() + 2
        );

        let mut query = sqlx::query(&sql);
        for (name, ty, value) in bindings {
            query = bind_field(query, kind, name, ty, value)?;
        }
        let result = query
            .bind(public_id)
            .bind(owner_id)
            .execute(self.pool())
            .await?;

        if result.rows_affected() == 0 {
            return Ok(None);
        }
        self.find_one(kind, public_id, owner_id).await
    }

    /// Delete the record scoped by identifier and owner. Returns whether a
    /// row was actually removed; `false` means nothing matched.
    ///
    /// # Errors
    ///
    /// Returns an error if the statement fails
    pub async fn delete_record(
        &self,
        kind: EntityKind,
        public_id: &str,
        owner_id: &str,
    ) -> AppResult<bool> {
        let sql = format!(
            "DELETE FROM {} WHERE {} = ?1 AND user_id = ?2",
            kind.table(),
            kind.id_column()
        );
        let result = sqlx::query(&sql)
            .bind(public_id)
            .bind(owner_id)
            .execute(self.pool())
            .await?;

        Ok(result.rows_affected() > 0)
    }

    /// Global cross-owner feed query over hobby posts, newest first.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails
    pub async fn list_recent_posts(&self, limit: Option<u32>) -> AppResult<Vec<Record>> {
        let kind = EntityKind::HobbyPosts;
        let sql = format!(
            "SELECT {} FROM {} ORDER BY created_at DESC, id DESC LIMIT ?1",
            select_columns(kind),
            kind.table()
        );
        let rows = sqlx::query(&sql)
            .bind(i64::from(limit.unwrap_or(DEFAULT_RECENT_POSTS_LIMIT)))
            .fetch_all(self.pool())
            .await?;

        rows.iter().map(|row| decode_record(kind, row)).collect()
    }
}

/// Column list for reads: public id, owner, domain fields, timestamps. The
/// internal `id` key is never selected.
fn select_columns(kind: EntityKind) -> String {
    let mut columns = vec![kind.id_column()];
    if kind != EntityKind::Users {
        columns.push("user_id");
    }
    columns.extend(kind.fields().iter().map(|f| f.name));
    columns.push("created_at");
    columns.push("updated_at");
    columns.join(", ")
}

/// Resolve the storage type for a column supplied to `create_record`. The
/// public identifier and owner columns are implicitly text; everything else
/// must appear in the kind's field allow-list.
fn writable_field_type(kind: EntityKind, name: &str) -> AppResult<FieldType> {
    if name == kind.id_column() || name == "user_id" {
        return Ok(FieldType::Text);
    }
    kind.field(name)
        .map(|spec| spec.ty)
        .ok_or_else(|| AppError::invalid_input(format!("unknown field for {kind}: {name}")))
}

fn require_string(fields: &Record, column: &str, kind: EntityKind) -> AppResult<String> {
    match fields.get(column) {
        Some(Value::String(s)) if !s.is_empty() => Ok(s.clone()),
        Some(_) => Err(AppError::invalid_input(format!(
            "{column} for {kind} must be a non-empty string"
        ))),
        None => Err(AppError::new(
            crate::errors::ErrorCode::MissingRequiredField,
            format!("{column} is required to create a {kind} record"),
        )),
    }
}

type SqliteQuery<'q> = Query<'q, Sqlite, SqliteArguments<'q>>;

/// Bind one allow-listed field value according to its declared type.
fn bind_field<'q>(
    query: SqliteQuery<'q>,
    kind: EntityKind,
    name: &str,
    ty: FieldType,
    value: &Value,
) -> AppResult<SqliteQuery<'q>> {
    let mismatch =
        || AppError::invalid_input(format!("field {name} for {kind} has the wrong type"));

    if value.is_null() {
        return Ok(query.bind(Option::<String>::None));
    }

    let query = match ty {
        FieldType::Text => query.bind(value.as_str().ok_or_else(mismatch)?.to_owned()),
        FieldType::Date => {
            let text = value.as_str().ok_or_else(mismatch)?;
            let date: NaiveDate = text.parse().map_err(|_| {
                AppError::invalid_input(format!(
                    "field {name} for {kind} must be a YYYY-MM-DD date"
                ))
            })?;
            query.bind(date.format("%Y-%m-%d").to_string())
        }
        FieldType::Integer => query.bind(value.as_i64().ok_or_else(mismatch)?),
        FieldType::Real => query.bind(value.as_f64().ok_or_else(mismatch)?),
        FieldType::Boolean => query.bind(value.as_bool().ok_or_else(mismatch)?),
        FieldType::JsonList => {
            if !value.is_array() {
                return Err(AppError::invalid_input(format!(
                    "field {name} for {kind} must be a JSON list"
                )));
            }
            query.bind(serde_json::to_string(value)?)
        }
    };
    Ok(query)
}

/// Bind a raw-query parameter from its JSON representation.
fn bind_json<'q>(query: SqliteQuery<'q>, value: &Value) -> AppResult<SqliteQuery<'q>> {
    let query = match value {
        Value::Null => query.bind(Option::<String>::None),
        Value::Bool(b) => query.bind(*b),
        Value::Number(n) => {
            if let Some(i) = n.as_i64() {
                query.bind(i)
            } else if let Some(f) = n.as_f64() {
                query.bind(f)
            } else {
                return Err(AppError::invalid_input(format!(
                    "unsupported numeric parameter: {n}"
                )));
            }
        }
        Value::String(s) => query.bind(s.clone()),
        Value::Array(_) | Value::Object(_) => query.bind(serde_json::to_string(value)?),
    };
    Ok(query)
}

/// Decode a row of a known entity kind using its declared column types.
fn decode_record(kind: EntityKind, row: &SqliteRow) -> AppResult<Record> {
    let mut record = Record::new();

    let public_id: String = row.try_get(kind.id_column())?;
    record.insert(kind.id_column().to_owned(), Value::String(public_id));

    if kind != EntityKind::Users {
        let owner: String = row.try_get("user_id")?;
        record.insert("user_id".to_owned(), Value::String(owner));
    }

    for spec in kind.fields() {
        let value = match spec.ty {
            FieldType::Text | FieldType::Date => row
                .try_get::<Option<String>, _>(spec.name)?
                .map_or(Value::Null, Value::String),
            FieldType::Integer => row
                .try_get::<Option<i64>, _>(spec.name)?
                .map_or(Value::Null, Value::from),
            FieldType::Real => row
                .try_get::<Option<f64>, _>(spec.name)?
                .map_or(Value::Null, Value::from),
            FieldType::Boolean => row
                .try_get::<Option<bool>, _>(spec.name)?
                .map_or(Value::Null, Value::Bool),
            FieldType::JsonList => match row.try_get::<Option<String>, _>(spec.name)? {
                Some(text) => serde_json::from_str(&text)?,
                None => json!([]),
            },
        };
        record.insert(spec.name.to_owned(), value);
    }

    let created_at: String = row.try_get("created_at")?;
    let updated_at: String = row.try_get("updated_at")?;
    record.insert("created_at".to_owned(), Value::String(created_at));
    record.insert("updated_at".to_owned(), Value::String(updated_at));

    Ok(record)
}

/// Best-effort decode for raw queries, driven by the runtime storage class of
/// each value rather than a declared column type.
fn decode_dynamic_row(row: &SqliteRow) -> AppResult<Record> {
    let mut record = Record::new();
    for (index, column) in row.columns().iter().enumerate() {
        let raw = row.try_get_raw(index)?;
        let value = if raw.is_null() {
            Value::Null
        } else {
            match raw.type_info().name() {
                "INTEGER" => Value::from(row.try_get::<i64, _>(index)?),
                "REAL" => Value::from(row.try_get::<f64, _>(index)?),
                _ => Value::String(row.try_get::<String, _>(index)?),
            }
        };
        record.insert(column.name().to_owned(), value);
    }
    Ok(record)
}
