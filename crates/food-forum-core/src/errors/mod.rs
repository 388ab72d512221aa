// ABOUTME: Unified error handling with standard error codes and structured context
// ABOUTME: Defines AppError, ErrorCode, and the AppResult alias shared by every crate
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Food Forum contributors

//! # Unified Error Handling System
//!
//! Every fallible operation outside the pure computation core returns
//! [`AppResult`]. Domain-specific errors (unit conversion, database) live in
//! submodules and convert into [`AppError`] so callers see one error type with
//! a stable [`ErrorCode`].

/// Unit conversion errors raised by the nutrition engine
pub mod conversion;

/// Database errors with sqlx conversion
#[cfg(feature = "database-errors")]
pub mod database;

use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;
use uuid::Uuid;

pub use conversion::{ConversionError, ConversionFactor};

/// Standard error codes used throughout the application
#[non_exhaustive]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ErrorCode {
    // Authentication & Authorization (1000-1999)
    #[serde(rename = "AUTH_REQUIRED")]
    AuthRequired = 1000,
    #[serde(rename = "PERMISSION_DENIED")]
    PermissionDenied = 1004,

    // Validation (3000-3999)
    #[serde(rename = "INVALID_INPUT")]
    InvalidInput = 3000,
    #[serde(rename = "MISSING_REQUIRED_FIELD")]
    MissingRequiredField = 3001,
    #[serde(rename = "VALUE_OUT_OF_RANGE")]
    ValueOutOfRange = 3003,
    #[serde(rename = "MISSING_CONVERSION_FACTOR")]
    MissingConversionFactor = 3100,

    // Resource Management (4000-4999)
    #[serde(rename = "RESOURCE_NOT_FOUND")]
    ResourceNotFound = 4000,
    #[serde(rename = "RESOURCE_ALREADY_EXISTS")]
    ResourceAlreadyExists = 4001,
    #[serde(rename = "RESOURCE_LOCKED")]
    ResourceLocked = 4002,

    // Configuration (6000-6999)
    #[serde(rename = "CONFIG_ERROR")]
    ConfigError = 6000,
    #[serde(rename = "CONFIG_MISSING")]
    ConfigMissing = 6001,
    #[serde(rename = "CONFIG_INVALID")]
    ConfigInvalid = 6002,

    // Internal Errors (9000-9999)
    #[serde(rename = "INTERNAL_ERROR")]
    InternalError = 9000,
    #[serde(rename = "DATABASE_ERROR")]
    DatabaseError = 9001,
    #[serde(rename = "SERIALIZATION_ERROR")]
    SerializationError = 9003,
}

impl ErrorCode {
    /// Get the HTTP status code a presentation layer should use for this error
    #[must_use]
    pub const fn http_status(&self) -> u16 {
        match self {
            Self::InvalidInput | Self::MissingRequiredField | Self::ValueOutOfRange => 400,
            Self::AuthRequired => 401,
            Self::PermissionDenied => 403,
            Self::ResourceNotFound => 404,
            Self::ResourceAlreadyExists | Self::ResourceLocked => 409,
            Self::MissingConversionFactor => 422,
            Self::InternalError
            | Self::DatabaseError
            | Self::SerializationError
            | Self::ConfigError
            | Self::ConfigMissing
            | Self::ConfigInvalid => 500,
        }
    }

    /// Get a user-friendly description of this error
    #[must_use]
    pub const fn description(&self) -> &'static str {
        match self {
            Self::AuthRequired => "Authentication is required to perform this action",
            Self::PermissionDenied => "You do not have permission to perform this action",
            Self::InvalidInput => "The provided input is invalid",
            Self::MissingRequiredField => "A required field is missing",
            Self::ValueOutOfRange => "The provided value is outside the acceptable range",
            Self::MissingConversionFactor => {
                "A product is missing the density or piece weight needed for conversion"
            }
            Self::ResourceNotFound => "The requested resource was not found",
            Self::ResourceAlreadyExists => "A resource with this identifier already exists",
            Self::ResourceLocked => "The resource is still referenced and cannot be modified",
            Self::ConfigError => "Configuration error encountered",
            Self::ConfigMissing => "Required configuration is missing",
            Self::ConfigInvalid => "Configuration is invalid",
            Self::InternalError => "An internal error occurred",
            Self::DatabaseError => "Database operation failed",
            Self::SerializationError => "Data serialization/deserialization failed",
        }
    }
}

/// Additional context that can be attached to errors
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorContext {
    /// Request ID for tracing
    pub request_id: Option<Uuid>,
    /// Acting user, if known
    pub user_id: Option<i64>,
    /// Resource ID if applicable
    pub resource_id: Option<String>,
    /// Additional key-value context
    pub details: serde_json::Value,
}

impl Default for ErrorContext {
    fn default() -> Self {
        Self {
            request_id: None,
            user_id: None,
            resource_id: None,
            details: serde_json::Value::Object(serde_json::Map::new()),
        }
    }
}

/// Unified error type for the application
#[derive(Debug, Error)]
pub struct AppError {
    /// Error code
    pub code: ErrorCode,
    /// Human-readable error message
    pub message: String,
    /// Additional context
    pub context: ErrorContext,
    /// Source error for error chaining
    #[source]
    pub source: Option<Box<dyn std::error::Error + Send + Sync>>,
}

impl AppError {
    /// Create a new `AppError` with the given code and message
    pub fn new(code: ErrorCode, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
            context: ErrorContext::default(),
            source: None,
        }
    }

    /// Add a request ID to the error context
    #[must_use]
    pub fn with_request_id(mut self, request_id: Uuid) -> Self {
        self.context.request_id = Some(request_id);
        self
    }

    /// Add a user ID to the error context
    #[must_use]
    pub fn with_user_id(mut self, user_id: i64) -> Self {
        self.context.user_id = Some(user_id);
        self
    }

    /// Add a resource ID to the error context
    #[must_use]
    pub fn with_resource_id(mut self, resource_id: impl Into<String>) -> Self {
        self.context.resource_id = Some(resource_id.into());
        self
    }

    /// Add details to the error context
    #[must_use]
    pub fn with_details(mut self, details: serde_json::Value) -> Self {
        self.context.details = details;
        self
    }

    /// Add a source error for error chaining
    #[must_use]
    pub fn with_source(mut self, source: impl std::error::Error + Send + Sync + 'static) -> Self {
        self.source = Some(Box::new(source));
        self
    }

    /// Get the HTTP status code for this error
    #[must_use]
    pub const fn http_status(&self) -> u16 {
        self.code.http_status()
    }
}

impl fmt::Display for AppError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.code.description(), self.message)
    }
}

/// Result type alias for convenience
pub type AppResult<T> = Result<T, AppError>;

/// Serializable error payload for presentation layers
#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorResponse {
    /// Error body
    pub error: ErrorResponseDetails,
}

/// Body of an [`ErrorResponse`]
#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorResponseDetails {
    /// Stable error code
    pub code: ErrorCode,
    /// Human-readable message
    pub message: String,
    /// Request ID, when the error was raised inside a request
    #[serde(skip_serializing_if = "Option::is_none")]
    pub request_id: Option<Uuid>,
    /// Extra structured details
    #[serde(skip_serializing_if = "serde_json::Value::is_null")]
    pub details: serde_json::Value,
}

impl From<AppError> for ErrorResponse {
    fn from(error: AppError) -> Self {
        Self {
            error: ErrorResponseDetails {
                code: error.code,
                message: error.message,
                request_id: error.context.request_id,
                details: error.context.details,
            },
        }
    }
}

/// Convenience functions for creating common errors
impl AppError {
    /// Authentication required
    #[must_use]
    pub fn auth_required() -> Self {
        Self::new(ErrorCode::AuthRequired, "Authentication required")
    }

    /// Permission denied
    pub fn permission_denied(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::PermissionDenied, message)
    }

    /// Resource not found
    pub fn not_found(resource: impl Into<String>) -> Self {
        Self::new(
            ErrorCode::ResourceNotFound,
            format!("{} not found", resource.into()),
        )
    }

    /// Resource already exists
    pub fn already_exists(resource: impl Into<String>) -> Self {
        Self::new(
            ErrorCode::ResourceAlreadyExists,
            format!("{} already exists", resource.into()),
        )
    }

    /// Resource is referenced elsewhere and cannot be changed
    pub fn resource_locked(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::ResourceLocked, message)
    }

    /// Invalid input
    pub fn invalid_input(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::InvalidInput, message)
    }

    /// Numeric value outside its stored precision
    pub fn value_out_of_range(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::ValueOutOfRange, message)
    }

    /// Internal error
    pub fn internal(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::InternalError, message)
    }

    /// Database error
    pub fn database(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::DatabaseError, message)
    }

    /// Configuration error
    pub fn config(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::ConfigError, message)
    }

    /// Invalid configuration value
    pub fn config_invalid(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::ConfigInvalid, message)
    }
}

impl From<ConversionError> for AppError {
    fn from(error: ConversionError) -> Self {
        let (code, details) = match &error {
            ConversionError::MissingConversionFactor { product, factor } => (
                ErrorCode::MissingConversionFactor,
                serde_json::json!({ "product": product, "factor": factor.as_str() }),
            ),
            ConversionError::ValueOverflow { product } => (
                ErrorCode::ValueOutOfRange,
                serde_json::json!({ "product": product }),
            ),
        };
        Self::new(code, error.to_string())
            .with_details(details)
            .with_source(error)
    }
}

impl From<serde_json::Error> for AppError {
    fn from(error: serde_json::Error) -> Self {
        Self::new(ErrorCode::SerializationError, error.to_string()).with_source(error)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_code_http_status() {
        assert_eq!(ErrorCode::AuthRequired.http_status(), 401);
        assert_eq!(ErrorCode::ResourceNotFound.http_status(), 404);
        assert_eq!(ErrorCode::ResourceLocked.http_status(), 409);
        assert_eq!(ErrorCode::MissingConversionFactor.http_status(), 422);
        assert_eq!(ErrorCode::InternalError.http_status(), 500);
    }

    #[test]
    fn test_app_error_creation() {
        let error = AppError::auth_required()
            .with_request_id(Uuid::new_v4())
            .with_user_id(7);

        assert_eq!(error.code, ErrorCode::AuthRequired);
        assert!(error.context.request_id.is_some());
        assert_eq!(error.context.user_id, Some(7));
    }

    #[test]
    fn test_conversion_error_maps_to_app_error() {
        let error: AppError = ConversionError::MissingConversionFactor {
            product: "Egg".to_owned(),
            factor: ConversionFactor::PieceWeight,
        }
        .into();

        assert_eq!(error.code, ErrorCode::MissingConversionFactor);
        assert_eq!(error.context.details["product"], "Egg");
        assert_eq!(error.context.details["factor"], "grams_per_piece");

        let overflow: AppError = ConversionError::ValueOverflow {
            product: "Salt".to_owned(),
        }
        .into();
        assert_eq!(overflow.code, ErrorCode::ValueOutOfRange);
        assert_eq!(overflow.context.details["product"], "Salt");
    }

    #[test]
    fn test_error_response_serialization() {
        let response = ErrorResponse::from(AppError::not_found("Recipe 42"));
        let json = serde_json::to_string(&response).unwrap();
        assert!(json.contains("RESOURCE_NOT_FOUND"));
        assert!(json.contains("Recipe 42 not found"));
    }
}
