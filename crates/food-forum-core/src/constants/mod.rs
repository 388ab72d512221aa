// ABOUTME: Application constants for the Food Forum platform
// ABOUTME: Validation limits, listing defaults, and environment variable names
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Food Forum contributors

//! # Constants Module
//!
//! Hardcoded limits mirror the column constraints of the relational schema;
//! defaults are the values used when the matching environment variable is unset.

/// Field length limits enforced before writes
pub mod limits {
    /// Maximum product name length
    pub const PRODUCT_NAME_MAX_LEN: usize = 255;
    /// Maximum recipe title length
    pub const RECIPE_TITLE_MAX_LEN: usize = 255;
    /// Maximum ingredient note length
    pub const INGREDIENT_NOTE_MAX_LEN: usize = 255;
    /// Minimum nickname length
    pub const NICKNAME_MIN_LEN: usize = 2;
    /// Maximum nickname length
    pub const NICKNAME_MAX_LEN: usize = 30;
    /// Decimal places kept for stored amounts and macros
    pub const STORED_DECIMAL_PLACES: u32 = 2;
    /// Total digits of an ingredient amount
    pub const AMOUNT_MAX_DIGITS: u32 = 10;
    /// Total digits of a per-100 g macro or a piece weight
    pub const NUTRIENT_MAX_DIGITS: u32 = 6;
    /// Total digits of a density in g/ml
    pub const DENSITY_MAX_DIGITS: u32 = 5;
    /// Largest page size accepted from callers
    pub const MAX_PAGE_SIZE: usize = 100;
}

/// Default values for configurable behavior
pub mod defaults {
    /// Number of recipes on the top-rated home listing
    pub const TOP_RATED_LIMIT: usize = 6;
    /// Page size of the full catalog listing
    pub const CATALOG_PAGE_SIZE: usize = 12;
    /// Page size of a single author's recipe listing
    pub const AUTHOR_PAGE_SIZE: usize = 10;
    /// Default database location
    pub const DATABASE_URL: &str = "sqlite:./data/food_forum.db";
    /// Default connection pool size
    pub const DATABASE_MAX_CONNECTIONS: u32 = 5;
    /// Points granted by a bare reputation increment
    pub const REPUTATION_POINTS: u32 = 1;
}

/// Nutrition computation constants
pub mod nutrition {
    /// Macro values on a product are expressed per this many grams
    pub const REFERENCE_MASS_GRAMS: i64 = 100;
    /// Decimal places of reported nutrition values
    pub const REPORT_DECIMAL_PLACES: u32 = 2;
}

/// Environment variable names read by the configuration layer
pub mod env_vars {
    /// Database connection URL
    pub const DATABASE_URL: &str = "DATABASE_URL";
    /// Pool size
    pub const DATABASE_MAX_CONNECTIONS: &str = "DATABASE_MAX_CONNECTIONS";
    /// Run migrations on startup
    pub const DATABASE_AUTO_MIGRATE: &str = "DATABASE_AUTO_MIGRATE";
    /// Deployment environment
    pub const ENVIRONMENT: &str = "ENVIRONMENT";
    /// Missing conversion factor policy (`skip` or `abort`)
    pub const MISSING_FACTOR_POLICY: &str = "FOOD_FORUM_MISSING_FACTOR_POLICY";
    /// Top-rated listing size
    pub const TOP_RATED_LIMIT: &str = "FOOD_FORUM_TOP_RATED_LIMIT";
    /// Catalog page size
    pub const CATALOG_PAGE_SIZE: &str = "FOOD_FORUM_CATALOG_PAGE_SIZE";
    /// Author listing page size
    pub const AUTHOR_PAGE_SIZE: &str = "FOOD_FORUM_AUTHOR_PAGE_SIZE";
}

/// Service identity used in structured logs
pub mod service_names {
    /// Library/service name
    pub const FOOD_FORUM: &str = "food-forum";
}
