// ABOUTME: Unified error types for the Wellspring backend
// ABOUTME: Defines error codes, the AppError type, and storage-error classification
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Wellspring Contributors

//! # Unified Error Handling
//!
//! Central error types used across the crate. Storage errors are classified
//! into the small taxonomy the record service exposes to callers: constraint
//! violations are rejected inputs, zero-rows-matched is never an error, and
//! everything else propagates.

use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

/// Standard error codes used throughout the application
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ErrorCode {
    /// Input failed validation (unknown field, wrong type, empty update)
    #[serde(rename = "INVALID_INPUT")]
    InvalidInput,
    /// A required field was not supplied
    #[serde(rename = "MISSING_REQUIRED_FIELD")]
    MissingRequiredField,
    /// A value violated a storage CHECK constraint (e.g. mood outside 1-5)
    #[serde(rename = "VALUE_OUT_OF_RANGE")]
    ValueOutOfRange,
    /// Referenced record does not exist
    #[serde(rename = "RESOURCE_NOT_FOUND")]
    ResourceNotFound,
    /// Uniqueness constraint violated (duplicate public identifier)
    #[serde(rename = "RESOURCE_ALREADY_EXISTS")]
    ResourceAlreadyExists,
    /// Configuration is missing or invalid
    #[serde(rename = "CONFIG_ERROR")]
    ConfigError,
    /// Underlying storage / connection pool failure
    #[serde(rename = "DATABASE_ERROR")]
    DatabaseError,
    /// Unexpected internal failure
    #[serde(rename = "INTERNAL_ERROR")]
    InternalError,
}

impl ErrorCode {
    /// Human-readable description of the error category
    #[must_use]
    pub const fn description(&self) -> &'static str {
        match self {
            Self::InvalidInput => "Invalid input",
            Self::MissingRequiredField => "Missing required field",
            Self::ValueOutOfRange => "Value out of range",
            Self::ResourceNotFound => "Resource not found",
            Self::ResourceAlreadyExists => "Resource already exists",
            Self::ConfigError => "Configuration error",
            Self::DatabaseError => "Database error",
            Self::InternalError => "Internal error",
        }
    }
}

/// Application error with code, message, and optional source
#[derive(Debug, Error)]
pub struct AppError {
    /// Error code
    pub code: ErrorCode,
    /// Human-readable error message
    pub message: String,
    /// Source error for error chaining
    #[source]
    pub source: Option<Box<dyn std::error::Error + Send + Sync>>,
}

impl AppError {
    /// Create a new error with the given code and message
    pub fn new(code: ErrorCode, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
            source: None,
        }
    }

    /// Attach a source error for chaining
    #[must_use]
    pub fn with_source(mut self, source: impl std::error::Error + Send + Sync + 'static) -> Self {
        self.source = Some(Box::new(source));
        self
    }

    /// Invalid input error
    pub fn invalid_input(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::InvalidInput, message)
    }

    /// Resource not found error
    pub fn not_found(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::ResourceNotFound, message)
    }

    /// Resource already exists error
    pub fn already_exists(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::ResourceAlreadyExists, message)
    }

    /// Configuration error
    pub fn config(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::ConfigError, message)
    }

    /// Internal error
    pub fn internal(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::InternalError, message)
    }
}

impl fmt::Display for AppError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.code.description(), self.message)
    }
}

impl From<sqlx::Error> for AppError {
    fn from(err: sqlx::Error) -> Self {
        let code = match &err {
            sqlx::Error::Database(db_err) => {
                if db_err.is_unique_violation() {
                    ErrorCode::ResourceAlreadyExists
                } else if db_err.is_check_violation() {
                    ErrorCode::ValueOutOfRange
                } else {
                    use sqlx::error::ErrorKind;
                    match db_err.kind() {
                        ErrorKind::NotNullViolation => ErrorCode::MissingRequiredField,
                        _ => ErrorCode::DatabaseError,
                    }
                }
            }
            sqlx::Error::RowNotFound => ErrorCode::ResourceNotFound,
            _ => ErrorCode::DatabaseError,
        };
        Self::new(code, err.to_string()).with_source(err)
    }
}

impl From<serde_json::Error> for AppError {
    fn from(err: serde_json::Error) -> Self {
        Self::new(ErrorCode::InternalError, err.to_string()).with_source(err)
    }
}

/// Convenient result type alias using `AppError`
pub type AppResult<T> = Result<T, AppError>;
