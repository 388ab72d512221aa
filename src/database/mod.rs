// ABOUTME: SQLite database connection, schema migrations, and table managers
// ABOUTME: Products, recipes with ingredients, reactions, saved recipes, and users
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Food Forum contributors

//! # Database Management
//!
//! [`Database`] owns the connection pool and the schema. Each table group has
//! a manager wrapping a clone of the pool; [`repositories::SqliteRecipeStore`]
//! exposes them behind the [`repositories::RecipeStore`] trait.

mod mappers;

/// Product catalog operations
pub mod products;
/// Reaction upserts and rating aggregates
pub mod reactions;
/// Recipe, ingredient, and catalog listing operations
pub mod recipes;
/// Repository trait and its SQLite implementation
pub mod repositories;
/// Saved recipe bookmarks
pub mod saved_recipes;
/// User accounts, reputation, and profile counters
pub mod users;

pub use products::ProductManager;
pub use reactions::ReactionManager;
pub use recipes::{CatalogQuery, RatedRecipe, RecipeManager};
pub use repositories::{RecipeStore, SqliteRecipeStore};
pub use saved_recipes::{SavedRecipeEntry, SavedRecipeManager};
pub use users::UserManager;

use std::str::FromStr;

use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};
use sqlx::SqlitePool;
use tracing::{debug, info};

use crate::config::DatabaseConfig;
use crate::errors::{AppError, AppResult};

/// Connection pool plus schema management
#[derive(Clone)]
pub struct Database {
    pool: SqlitePool,
}

impl Database {
    /// Connect using the given configuration, migrating if configured to
    ///
    /// # Errors
    ///
    /// Returns an error if the connection or migration fails
    pub async fn new(config: &DatabaseConfig) -> AppResult<Self> {
        let options = SqliteConnectOptions::from_str(&config.url.to_connection_string())
            .map_err(|e| AppError::config_invalid(format!("Invalid database URL: {e}")))?
            .create_if_missing(true)
            .foreign_keys(true);

        let mut pool_options = SqlitePoolOptions::new().max_connections(config.max_connections);
        if config.url.is_memory() {
            // An in-memory database lives only as long as its connection
            pool_options = pool_options
                .max_connections(1)
                .min_connections(1)
                .idle_timeout(None)
                .max_lifetime(None);
        }

        let pool = pool_options
            .connect_with(options)
            .await
            .map_err(|e| AppError::database(format!("Failed to connect to {}: {e}", config.url)))?;

        let db = Self { pool };
        if config.auto_migrate {
            db.migrate().await?;
        }
        info!(database = %config.url, "Database connected");
        Ok(db)
    }

    /// Fresh in-memory database with the schema applied
    ///
    /// # Errors
    ///
    /// Returns an error if the connection or migration fails
    pub async fn in_memory() -> AppResult<Self> {
        Self::new(&DatabaseConfig::in_memory()).await
    }

    /// Get a reference to the database pool
    #[must_use]
    pub const fn pool(&self) -> &SqlitePool {
        &self.pool
    }

    /// Product manager over this pool
    #[must_use]
    pub fn products(&self) -> ProductManager {
        ProductManager::new(self.pool.clone())
    }

    /// Recipe manager over this pool
    #[must_use]
    pub fn recipes(&self) -> RecipeManager {
        RecipeManager::new(self.pool.clone())
    }

    /// Reaction manager over this pool
    #[must_use]
    pub fn reactions(&self) -> ReactionManager {
        ReactionManager::new(self.pool.clone())
    }

    /// Saved recipe manager over this pool
    #[must_use]
    pub fn saved_recipes(&self) -> SavedRecipeManager {
        SavedRecipeManager::new(self.pool.clone())
    }

    /// User manager over this pool
    #[must_use]
    pub fn users(&self) -> UserManager {
        UserManager::new(self.pool.clone())
    }

    /// Create tables and indexes if they do not exist
    ///
    /// # Errors
    ///
    /// Returns an error if any statement fails
    pub async fn migrate(&self) -> AppResult<()> {
        for statement in SCHEMA {
            sqlx::query(statement)
                .execute(&self.pool)
                .await
                .map_err(|e| AppError::database(format!("Failed to run migration: {e}")))?;
        }
        debug!(statements = SCHEMA.len(), "Schema migrated");
        Ok(())
    }
}

const SCHEMA: &[&str] = &[
    r"
    CREATE TABLE IF NOT EXISTS users (
        id INTEGER PRIMARY KEY AUTOINCREMENT,
        username TEXT NOT NULL UNIQUE,
        nickname TEXT NOT NULL UNIQUE,
        bio TEXT NOT NULL DEFAULT '',
        avatar TEXT,
        reputation INTEGER NOT NULL DEFAULT 0 CHECK (reputation >= 0),
        is_active_contributor BOOLEAN NOT NULL DEFAULT 1,
        created_at TEXT NOT NULL
    )
    ",
    r"
    CREATE TABLE IF NOT EXISTS products (
        id INTEGER PRIMARY KEY AUTOINCREMENT,
        name TEXT NOT NULL UNIQUE,
        unit TEXT NOT NULL DEFAULT 'g',
        calories_per_100 TEXT NOT NULL DEFAULT '0',
        protein_per_100 TEXT NOT NULL DEFAULT '0',
        fat_per_100 TEXT NOT NULL DEFAULT '0',
        carbs_per_100 TEXT NOT NULL DEFAULT '0',
        density_g_per_ml TEXT,
        grams_per_piece TEXT
    )
    ",
    r"
    CREATE TABLE IF NOT EXISTS recipes (
        id INTEGER PRIMARY KEY AUTOINCREMENT,
        author_id INTEGER NOT NULL REFERENCES users(id) ON DELETE CASCADE,
        title TEXT NOT NULL,
        description TEXT NOT NULL DEFAULT '',
        recipe_text TEXT NOT NULL,
        image TEXT,
        time_minutes INTEGER NOT NULL DEFAULT 0 CHECK (time_minutes >= 0),
        servings INTEGER NOT NULL DEFAULT 1 CHECK (servings >= 0),
        is_published BOOLEAN NOT NULL DEFAULT 1,
        created_at TEXT NOT NULL,
        updated_at TEXT NOT NULL
    )
    ",
    r"
    CREATE TABLE IF NOT EXISTS recipe_ingredients (
        id INTEGER PRIMARY KEY AUTOINCREMENT,
        recipe_id INTEGER NOT NULL REFERENCES recipes(id) ON DELETE CASCADE,
        product_id INTEGER NOT NULL REFERENCES products(id) ON DELETE RESTRICT,
        amount TEXT NOT NULL,
        unit TEXT NOT NULL DEFAULT 'g',
        note TEXT NOT NULL DEFAULT '',
        UNIQUE (recipe_id, product_id)
    )
    ",
    r"
    CREATE TABLE IF NOT EXISTS reactions (
        id INTEGER PRIMARY KEY AUTOINCREMENT,
        user_id INTEGER NOT NULL REFERENCES users(id) ON DELETE CASCADE,
        recipe_id INTEGER NOT NULL REFERENCES recipes(id) ON DELETE CASCADE,
        value INTEGER NOT NULL CHECK (value IN (1, -1)),
        created_at TEXT NOT NULL,
        updated_at TEXT NOT NULL,
        UNIQUE (user_id, recipe_id)
    )
    ",
    r"
    CREATE TABLE IF NOT EXISTS saved_recipes (
        user_id INTEGER NOT NULL REFERENCES users(id) ON DELETE CASCADE,
        recipe_id INTEGER NOT NULL REFERENCES recipes(id) ON DELETE CASCADE,
        saved_at TEXT NOT NULL,
        PRIMARY KEY (user_id, recipe_id)
    )
    ",
    "CREATE INDEX IF NOT EXISTS idx_recipes_title ON recipes(title)",
    "CREATE INDEX IF NOT EXISTS idx_recipes_created ON recipes(created_at, id)",
    "CREATE INDEX IF NOT EXISTS idx_recipes_author ON recipes(author_id)",
    "CREATE INDEX IF NOT EXISTS idx_recipe_ingredients_recipe_product ON recipe_ingredients(recipe_id, product_id)",
    "CREATE INDEX IF NOT EXISTS idx_recipe_ingredients_product ON recipe_ingredients(product_id)",
    "CREATE INDEX IF NOT EXISTS idx_reactions_recipe ON reactions(recipe_id)",
    "CREATE INDEX IF NOT EXISTS idx_reactions_user ON reactions(user_id)",
    "CREATE INDEX IF NOT EXISTS idx_saved_recipes_user_saved ON saved_recipes(user_id, saved_at)",
];
