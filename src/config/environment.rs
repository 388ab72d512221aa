// ABOUTME: Application configuration assembled from environment variables
// ABOUTME: Combines deployment environment, database, nutrition, and catalog listing settings
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Food Forum contributors

use super::database::{env_var_or, DatabaseConfig};
use super::nutrition::NutritionConfig;
use crate::constants::limits::MAX_PAGE_SIZE;
use crate::constants::{defaults, env_vars};
use crate::errors::{AppError, AppResult};
use serde::{Deserialize, Serialize};
use std::fmt::{self, Display, Formatter};
use tracing::info;

/// Environment type for security and logging defaults
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Environment {
    /// Local development
    #[default]
    Development,
    /// Production deployment
    Production,
    /// Automated tests
    Testing,
}

impl Environment {
    /// Parse from string with fallback
    #[must_use]
    pub fn from_str_or_default(s: &str) -> Self {
        match s.to_lowercase().as_str() {
            "production" | "prod" => Self::Production,
            "testing" | "test" => Self::Testing,
            _ => Self::Development,
        }
    }

    /// Check if this is a production environment
    #[must_use]
    pub const fn is_production(self) -> bool {
        matches!(self, Self::Production)
    }

    /// Check if this is a testing environment
    #[must_use]
    pub const fn is_testing(self) -> bool {
        matches!(self, Self::Testing)
    }
}

impl Display for Environment {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            Self::Development => write!(f, "development"),
            Self::Production => write!(f, "production"),
            Self::Testing => write!(f, "testing"),
        }
    }
}

/// Sizes of the catalog listings
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CatalogConfig {
    /// Recipes on the top-rated listing
    pub top_rated_limit: usize,
    /// Page size of catalog search
    pub catalog_page_size: usize,
    /// Page size of an author's recipe list
    pub author_page_size: usize,
}

impl Default for CatalogConfig {
    fn default() -> Self {
        Self {
            top_rated_limit: defaults::TOP_RATED_LIMIT,
            catalog_page_size: defaults::CATALOG_PAGE_SIZE,
            author_page_size: defaults::AUTHOR_PAGE_SIZE,
        }
    }
}

impl CatalogConfig {
    /// Load listing sizes from environment
    ///
    /// # Errors
    ///
    /// Returns `ConfigInvalid` when a size is not an integer in `1..=100`
    pub fn from_env() -> AppResult<Self> {
        Ok(Self {
            top_rated_limit: listing_size(env_vars::TOP_RATED_LIMIT, defaults::TOP_RATED_LIMIT)?,
            catalog_page_size: listing_size(
                env_vars::CATALOG_PAGE_SIZE,
                defaults::CATALOG_PAGE_SIZE,
            )?,
            author_page_size: listing_size(
                env_vars::AUTHOR_PAGE_SIZE,
                defaults::AUTHOR_PAGE_SIZE,
            )?,
        })
    }
}

fn listing_size(key: &str, default: usize) -> AppResult<usize> {
    let raw = env_var_or(key, &default.to_string());
    raw.trim()
        .parse::<usize>()
        .ok()
        .filter(|n| (1..=MAX_PAGE_SIZE).contains(n))
        .ok_or_else(|| {
            AppError::config_invalid(format!(
                "{key} must be an integer between 1 and {MAX_PAGE_SIZE}, got '{raw}'"
            ))
        })
}

/// Complete application configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    /// Deployment environment
    pub environment: Environment,
    /// Database settings
    pub database: DatabaseConfig,
    /// Nutrition engine settings
    pub nutrition: NutritionConfig,
    /// Listing sizes
    pub catalog: CatalogConfig,
}

impl AppConfig {
    /// Load configuration from environment variables
    ///
    /// # Errors
    ///
    /// Returns an error if any variable holds an invalid value
    pub fn from_env() -> AppResult<Self> {
        let environment =
            Environment::from_str_or_default(&env_var_or(env_vars::ENVIRONMENT, "development"));
        let config = Self {
            environment,
            database: DatabaseConfig::from_env()?,
            nutrition: NutritionConfig::from_env()?,
            catalog: CatalogConfig::from_env()?,
        };
        info!(
            environment = %config.environment,
            database = %config.database.url,
            missing_factor_policy = %config.nutrition.missing_factor_policy,
            "Configuration loaded"
        );
        Ok(config)
    }

    /// Configuration for tests: in-memory database and default listings
    #[must_use]
    pub fn for_testing() -> Self {
        Self {
            environment: Environment::Testing,
            database: DatabaseConfig::in_memory(),
            nutrition: NutritionConfig::default(),
            catalog: CatalogConfig::default(),
        }
    }
}
