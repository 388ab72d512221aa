// ABOUTME: Error handling re-exports for the Food Forum library
// ABOUTME: All fallible operations return AppResult built on the core crate's AppError
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Food Forum contributors

//! Unified error handling
//!
//! The error types live in `food-forum-core` so that models and the
//! persistence layer share one [`AppError`] with stable [`ErrorCode`]s.

pub use food_forum_core::errors::database::DatabaseError;
pub use food_forum_core::errors::{
    AppError, AppResult, ConversionError, ConversionFactor, ErrorCode, ErrorContext,
    ErrorResponse, ErrorResponseDetails,
};
