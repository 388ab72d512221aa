// ABOUTME: Database operations for like and dislike reactions
// ABOUTME: Votes are upserted atomically per user and recipe; aggregates are computed in SQL
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Food Forum contributors

use sqlx::{Row, SqlitePool};
use tracing::debug;

use super::mappers::{column_count, format_timestamp, now, row_to_reaction};
use crate::errors::{AppError, AppResult, DatabaseError};
use crate::intelligence::RatingSummary;
use crate::models::{Reaction, ReactionValue, RecipeId, UserId};

const REACTION_COLUMNS: &str = "id, user_id, recipe_id, value, created_at, updated_at";

/// Database manager for reactions
pub struct ReactionManager {
    pool: SqlitePool,
}

impl ReactionManager {
    /// Create a new reaction manager
    #[must_use]
    pub const fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// Record a vote, replacing any earlier vote by the same user
    ///
    /// # Errors
    ///
    /// Returns `ResourceNotFound` for an unknown user or recipe, or a
    /// database error
    pub async fn upsert(
        &self,
        user: UserId,
        recipe: RecipeId,
        value: ReactionValue,
    ) -> AppResult<Reaction> {
        let stamp = format_timestamp(now());
        let row = sqlx::query(&format!(
            r"
            INSERT INTO reactions (user_id, recipe_id, value, created_at, updated_at)
            VALUES ($1, $2, $3, $4, $4)
            ON CONFLICT (user_id, recipe_id)
            DO UPDATE SET value = excluded.value, updated_at = excluded.updated_at
            RETURNING {REACTION_COLUMNS}
            "
        ))
        .bind(user.get())
        .bind(recipe.get())
        .bind(value.as_i64())
        .bind(&stamp)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| match DatabaseError::from_sqlx("upsert reaction", e) {
            DatabaseError::ForeignKeyViolation { .. } => {
                AppError::not_found(format!("User {user} or recipe {recipe}"))
            }
            other => other.into(),
        })?;

        debug!(user_id = %user, recipe_id = %recipe, value = value.as_i64(), "Reaction recorded");
        row_to_reaction(&row)
    }

    /// The vote of one user on one recipe
    ///
    /// # Errors
    ///
    /// Returns an error if the database operation fails
    pub async fn get(&self, user: UserId, recipe: RecipeId) -> AppResult<Option<Reaction>> {
        let row = sqlx::query(&format!(
            "SELECT {REACTION_COLUMNS} FROM reactions WHERE user_id = $1 AND recipe_id = $2"
        ))
        .bind(user.get())
        .bind(recipe.get())
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| AppError::database(format!("Failed to get reaction: {e}")))?;

        row.map(|r| row_to_reaction(&r)).transpose()
    }

    /// Every vote on a recipe, oldest first
    ///
    /// # Errors
    ///
    /// Returns an error if the database operation fails
    pub async fn for_recipe(&self, recipe: RecipeId) -> AppResult<Vec<Reaction>> {
        let rows = sqlx::query(&format!(
            "SELECT {REACTION_COLUMNS} FROM reactions WHERE recipe_id = $1 ORDER BY id ASC"
        ))
        .bind(recipe.get())
        .fetch_all(&self.pool)
        .await
        .map_err(|e| AppError::database(format!("Failed to list reactions: {e}")))?;

        rows.iter().map(row_to_reaction).collect()
    }

    /// Score, likes, and dislikes of a recipe computed by the database
    ///
    /// # Errors
    ///
    /// Returns an error if the database operation fails
    pub async fn summary(&self, recipe: RecipeId) -> AppResult<RatingSummary> {
        let row = sqlx::query(
            r"
            SELECT COALESCE(SUM(value), 0) AS score,
                   COUNT(CASE WHEN value = 1 THEN 1 END) AS likes,
                   COUNT(CASE WHEN value = -1 THEN 1 END) AS dislikes
            FROM reactions
            WHERE recipe_id = $1
            ",
        )
        .bind(recipe.get())
        .fetch_one(&self.pool)
        .await
        .map_err(|e| AppError::database(format!("Failed to aggregate reactions: {e}")))?;

        Ok(RatingSummary {
            score: row.try_get("score")?,
            likes: column_count(&row, "likes")?,
            dislikes: column_count(&row, "dislikes")?,
        })
    }
}
