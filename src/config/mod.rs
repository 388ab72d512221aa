// ABOUTME: Configuration management module for environment-driven settings
// ABOUTME: Exposes database, nutrition policy, and catalog listing configuration
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Food Forum contributors

//! Configuration is read from environment variables only. Every section has
//! a `from_env` constructor and a `Default` matching the documented defaults.

/// Database location and pool settings
pub mod database;
/// Deployment environment and the assembled application configuration
pub mod environment;
/// Nutrition engine settings
pub mod nutrition;

pub use database::{DatabaseConfig, DatabaseUrl};
pub use environment::{AppConfig, CatalogConfig, Environment};
pub use nutrition::{MissingFactorPolicy, NutritionConfig};
