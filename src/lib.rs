// ABOUTME: Main library entry point for the Food Forum recipe platform
// ABOUTME: Nutrition, rating, and pantry computations over a SQLite recipe store
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Food Forum contributors

#![deny(unsafe_code)]

//! # Food Forum
//!
//! Core of a recipe-sharing application. Users publish recipes built from
//! weighed or measured products, vote on them, and bookmark favorites. This
//! crate computes what the presentation layer shows about those recipes:
//!
//! - **Nutrition**: per-ingredient, per-recipe, and per-serving macros with
//!   exact decimal arithmetic and explicit unit conversion
//! - **Ratings**: vote sums with like and dislike counts
//! - **Pantry matching**: recipes ranked by how many products are missing
//! - **Catalog**: top rated, search, per-author, and saved listings
//!
//! ## Architecture
//!
//! - [`intelligence`]: pure synchronous computation over loaded values
//! - [`database`]: SQLite schema, table managers, and the [`database::RecipeStore`] trait
//! - [`services`]: [`services::RecipeService`], which joins the two and takes
//!   the acting user through [`context::RequestContext`]
//! - [`config`], [`logging`], [`errors`]: environment configuration,
//!   structured logging, and the unified error type
//!
//! ## Example Usage
//!
//! ```rust,no_run
//! use std::sync::Arc;
//! use food_forum::config::AppConfig;
//! use food_forum::database::{Database, SqliteRecipeStore};
//! use food_forum::errors::AppResult;
//! use food_forum::services::RecipeService;
//!
//! #[tokio::main]
//! async fn main() -> AppResult<()> {
//!     let config = AppConfig::from_env()?;
//!     let database = Database::new(&config.database).await?;
//!     let store = Arc::new(SqliteRecipeStore::new(database));
//!     let service = RecipeService::from_config(store, &config);
//!
//!     for rated in service.top_rated().await? {
//!         println!("{} ({})", rated.recipe.title, rated.rating.score);
//!     }
//!     Ok(())
//! }
//! ```

/// Environment-driven configuration
pub mod config;

/// Per-request acting user and request id
pub mod context;

/// SQLite persistence and the repository trait
pub mod database;

/// Unified error handling
pub mod errors;

/// Nutrition, rating, and pantry computation
pub mod intelligence;

/// Structured logging setup
pub mod logging;

/// Domain services for presentation layers
pub mod services;

/// Validation limits, defaults, and environment variable names
pub use food_forum_core::constants;

/// Domain models
pub use food_forum_core::models;

/// Cursor-based pagination
pub use food_forum_core::pagination;
