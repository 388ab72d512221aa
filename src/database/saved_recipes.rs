// ABOUTME: Database operations for saved recipe bookmarks
// ABOUTME: Toggling runs in one transaction; listings are ordered newest saved first
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Food Forum contributors

use std::collections::HashSet;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::{Row, SqlitePool};
use tracing::debug;

use super::mappers::{column_count, format_timestamp, now, row_to_recipe, RECIPE_COLUMNS};
use crate::errors::{AppError, AppResult, DatabaseError};
use crate::models::{Recipe, RecipeId, SaveState, UserId};

/// A bookmarked recipe with the time it was saved
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SavedRecipeEntry {
    /// The saved recipe
    pub recipe: Recipe,
    /// When the bookmark was created
    pub saved_at: DateTime<Utc>,
}

/// Database manager for saved recipes
pub struct SavedRecipeManager {
    pool: SqlitePool,
}

impl SavedRecipeManager {
    /// Create a new saved recipe manager
    #[must_use]
    pub const fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// Save the recipe if it is not saved, otherwise remove the bookmark
    ///
    /// # Errors
    ///
    /// Returns `ResourceNotFound` for an unknown user or recipe, or a
    /// database error
    pub async fn toggle(&self, user: UserId, recipe: RecipeId) -> AppResult<SaveState> {
        let mut tx = self
            .pool
            .begin()
            .await
            .map_err(|e| AppError::database(format!("Failed to begin transaction: {e}")))?;

        let removed = sqlx::query("DELETE FROM saved_recipes WHERE user_id = $1 AND recipe_id = $2")
            .bind(user.get())
            .bind(recipe.get())
            .execute(&mut *tx)
            .await
            .map_err(|e| AppError::database(format!("Failed to remove saved recipe: {e}")))?;

        let state = if removed.rows_affected() > 0 {
            SaveState::Removed
        } else {
            sqlx::query("INSERT INTO saved_recipes (user_id, recipe_id, saved_at) VALUES ($1, $2, $3)")
                .bind(user.get())
                .bind(recipe.get())
                .bind(format_timestamp(now()))
                .execute(&mut *tx)
                .await
                .map_err(|e| match DatabaseError::from_sqlx("save recipe", e) {
                    DatabaseError::ForeignKeyViolation { .. } => {
                        AppError::not_found(format!("User {user} or recipe {recipe}"))
                    }
                    other => other.into(),
                })?;
            SaveState::Saved
        };

        tx.commit()
            .await
            .map_err(|e| AppError::database(format!("Failed to commit saved recipe toggle: {e}")))?;

        debug!(user_id = %user, recipe_id = %recipe, state = ?state, "Saved recipe toggled");
        Ok(state)
    }

    /// Whether the user has saved the recipe
    ///
    /// # Errors
    ///
    /// Returns an error if the database operation fails
    pub async fn is_saved(&self, user: UserId, recipe: RecipeId) -> AppResult<bool> {
        let row = sqlx::query(
            "SELECT EXISTS (SELECT 1 FROM saved_recipes WHERE user_id = $1 AND recipe_id = $2) AS saved",
        )
        .bind(user.get())
        .bind(recipe.get())
        .fetch_one(&self.pool)
        .await
        .map_err(|e| AppError::database(format!("Failed to check saved recipe: {e}")))?;

        Ok(row.try_get("saved")?)
    }

    /// Saved recipes of a user, most recently saved first
    ///
    /// # Errors
    ///
    /// Returns an error if the database operation fails
    pub async fn list_for_user(&self, user: UserId) -> AppResult<Vec<SavedRecipeEntry>> {
        let rows = sqlx::query(&format!(
            r"
            SELECT {RECIPE_COLUMNS}, s.saved_at AS saved_at
            FROM saved_recipes s
            JOIN recipes r ON r.id = s.recipe_id
            WHERE s.user_id = $1
            ORDER BY s.saved_at DESC, s.rowid DESC
            "
        ))
        .bind(user.get())
        .fetch_all(&self.pool)
        .await
        .map_err(|e| AppError::database(format!("Failed to list saved recipes: {e}")))?;

        rows.iter()
            .map(|row| -> AppResult<SavedRecipeEntry> {
                let saved_at: String = row.try_get("saved_at")?;
                let saved_at = DateTime::parse_from_rfc3339(&saved_at)
                    .map_err(|_| DatabaseError::InvalidData {
                        column: "saved_at",
                        value: saved_at.clone(),
                    })
                    .map_err(AppError::from)?
                    .with_timezone(&Utc);
                Ok(SavedRecipeEntry {
                    recipe: row_to_recipe(row)?,
                    saved_at,
                })
            })
            .collect()
    }

    /// Ids of every recipe the user has saved
    ///
    /// # Errors
    ///
    /// Returns an error if the database operation fails
    pub async fn ids_for_user(&self, user: UserId) -> AppResult<HashSet<RecipeId>> {
        let rows = sqlx::query("SELECT recipe_id FROM saved_recipes WHERE user_id = $1")
            .bind(user.get())
            .fetch_all(&self.pool)
            .await
            .map_err(|e| AppError::database(format!("Failed to list saved recipe ids: {e}")))?;

        rows.iter()
            .map(|row| -> AppResult<RecipeId> {
                Ok(RecipeId::new(row.try_get("recipe_id")?))
            })
            .collect()
    }

    /// Number of recipes the user has saved
    ///
    /// # Errors
    ///
    /// Returns an error if the database operation fails
    pub async fn count_for_user(&self, user: UserId) -> AppResult<u64> {
        let row = sqlx::query("SELECT COUNT(*) AS total FROM saved_recipes WHERE user_id = $1")
            .bind(user.get())
            .fetch_one(&self.pool)
            .await
            .map_err(|e| AppError::database(format!("Failed to count saved recipes: {e}")))?;

        column_count(&row, "total")
    }
}
