// ABOUTME: Core types and constants for the Food Forum recipe platform
// ABOUTME: Foundation crate with domain models, error handling, pagination, and constants
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Food Forum contributors

#![deny(unsafe_code)]

//! # Food Forum Core
//!
//! Foundation crate providing shared types for the Food Forum recipe platform.
//! It holds no I/O: the persistence and computation layers in the main crate
//! build on these definitions.
//!
//! ## Modules
//!
//! - **errors**: Unified error handling with `AppError`, `ErrorCode`, and domain-specific errors
//! - **models**: Products, recipes, ingredients, reactions, saved recipes, and users
//! - **constants**: Application-wide limits, defaults, and environment variable names
//! - **pagination**: Cursor-based pagination for catalog listings

/// Unified error handling system with standard error codes
pub mod errors;

/// Application constants organized by domain
pub mod constants;

/// Cursor-based pagination for efficient data traversal
pub mod pagination;

/// Core data models (Product, Recipe, Reaction, User, ...)
pub mod models;
