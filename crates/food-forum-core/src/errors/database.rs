// ABOUTME: Structured error types for database operations
// ABOUTME: Classifies sqlx failures and converts them into AppError codes
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Food Forum contributors

use thiserror::Error;

use super::{AppError, ErrorCode};

/// Database operation errors with context
#[non_exhaustive]
#[derive(Debug, Error)]
pub enum DatabaseError {
    /// A uniqueness constraint rejected the write
    #[error("Unique constraint violated: {constraint}")]
    UniqueViolation {
        /// Constraint or column list reported by the driver
        constraint: String,
    },

    /// A foreign key constraint rejected the write or delete
    #[error("Foreign key constraint violated: {message}")]
    ForeignKeyViolation {
        /// Driver message
        message: String,
    },

    /// Query execution failed
    #[error("Query failed during {operation}: {source}")]
    QueryFailed {
        /// Operation being performed
        operation: &'static str,
        /// Underlying driver error
        #[source]
        source: sqlx::Error,
    },

    /// Stored value could not be decoded into a domain type
    #[error("Invalid stored value in column {column}: {value}")]
    InvalidData {
        /// Column name
        column: &'static str,
        /// Offending raw value
        value: String,
    },
}

impl DatabaseError {
    /// Classify a driver error raised while performing `operation`
    #[must_use]
    pub fn from_sqlx(operation: &'static str, error: sqlx::Error) -> Self {
        if let sqlx::Error::Database(db_error) = &error {
            if db_error.is_unique_violation() {
                return Self::UniqueViolation {
                    constraint: db_error.message().to_owned(),
                };
            }
            if db_error.is_foreign_key_violation() {
                return Self::ForeignKeyViolation {
                    message: db_error.message().to_owned(),
                };
            }
        }
        Self::QueryFailed {
            operation,
            source: error,
        }
    }
}

impl From<DatabaseError> for AppError {
    fn from(error: DatabaseError) -> Self {
        let code = match &error {
            DatabaseError::UniqueViolation { .. } => ErrorCode::ResourceAlreadyExists,
            DatabaseError::ForeignKeyViolation { .. } => ErrorCode::ResourceLocked,
            DatabaseError::QueryFailed { .. } | DatabaseError::InvalidData { .. } => {
                ErrorCode::DatabaseError
            }
        };
        Self::new(code, error.to_string()).with_source(error)
    }
}

impl From<sqlx::Error> for AppError {
    fn from(error: sqlx::Error) -> Self {
        DatabaseError::from_sqlx("query", error).into()
    }
}
