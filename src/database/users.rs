// ABOUTME: Database operations for forum user accounts
// ABOUTME: Handles registration, profile edits, reputation changes clamped at zero, and profile counters
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Food Forum contributors

use sqlx::{Row, SqlitePool};
use tracing::debug;

use super::mappers::{column_count, format_timestamp, now, row_to_user};
use crate::errors::{AppError, AppResult, DatabaseError};
use crate::models::{FoodForumUser, NewUser, ProfileStats, ProfileUpdate, UserId};

const USER_COLUMNS: &str =
    "id, username, nickname, bio, avatar, reputation, is_active_contributor, created_at";

/// Database manager for users
pub struct UserManager {
    pool: SqlitePool,
}

impl UserManager {
    /// Create a new user manager
    #[must_use]
    pub const fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// Register a user with zero reputation
    ///
    /// # Errors
    ///
    /// Returns `InvalidInput` for invalid fields, `ResourceAlreadyExists` for
    /// a taken username or nickname, or a database error
    pub async fn create(&self, user: &NewUser) -> AppResult<FoodForumUser> {
        user.validate()?;
        let created_at = now();
        let username = user.username.trim();

        let result = sqlx::query(
            r"
            INSERT INTO users (username, nickname, bio, reputation, is_active_contributor, created_at)
            VALUES ($1, $2, $3, 0, 1, $4)
            ",
        )
        .bind(username)
        .bind(&user.nickname)
        .bind(&user.bio)
        .bind(format_timestamp(created_at))
        .execute(&self.pool)
        .await
        .map_err(|e| {
            let error = DatabaseError::from_sqlx("create user", e);
            unique_field_error(error, username, &user.nickname)
        })?;

        let id = UserId::new(result.last_insert_rowid());
        debug!(user_id = %id, username, "User created");

        Ok(FoodForumUser {
            id,
            username: username.to_owned(),
            nickname: user.nickname.clone(),
            bio: user.bio.clone(),
            avatar: None,
            reputation: 0,
            is_active_contributor: true,
            created_at,
        })
    }

    /// Get a user by ID
    ///
    /// # Errors
    ///
    /// Returns an error if the database operation fails
    pub async fn get(&self, id: UserId) -> AppResult<Option<FoodForumUser>> {
        let row = sqlx::query(&format!("SELECT {USER_COLUMNS} FROM users WHERE id = $1"))
            .bind(id.get())
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| AppError::database(format!("Failed to get user: {e}")))?;

        row.map(|r| row_to_user(&r)).transpose()
    }

    /// Get a user by login name
    ///
    /// # Errors
    ///
    /// Returns an error if the database operation fails
    pub async fn get_by_username(&self, username: &str) -> AppResult<Option<FoodForumUser>> {
        let row = sqlx::query(&format!("SELECT {USER_COLUMNS} FROM users WHERE username = $1"))
            .bind(username.trim())
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| AppError::database(format!("Failed to get user by username: {e}")))?;

        row.map(|r| row_to_user(&r)).transpose()
    }

    /// Replace nickname, bio, and avatar
    ///
    /// # Errors
    ///
    /// Returns `InvalidInput`, `ResourceAlreadyExists` for a taken nickname,
    /// `ResourceNotFound` for an unknown user, or a database error
    pub async fn update_profile(
        &self,
        id: UserId,
        update: &ProfileUpdate,
    ) -> AppResult<FoodForumUser> {
        update.validate()?;
        let row = sqlx::query(&format!(
            "UPDATE users SET nickname = $1, bio = $2, avatar = $3 WHERE id = $4 RETURNING {USER_COLUMNS}"
        ))
        .bind(&update.nickname)
        .bind(&update.bio)
        .bind(update.avatar.as_deref())
        .bind(id.get())
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| {
            let error = DatabaseError::from_sqlx("update profile", e);
            unique_field_error(error, "", &update.nickname)
        })?
        .ok_or_else(|| AppError::not_found(format!("User {id}")))?;

        row_to_user(&row)
    }

    /// Add reputation points, returning the new total
    ///
    /// # Errors
    ///
    /// Returns `ResourceNotFound` for an unknown user or a database error
    pub async fn increment_reputation(&self, id: UserId, points: u32) -> AppResult<u32> {
        self.adjust_reputation(
            id,
            "UPDATE users SET reputation = reputation + $1 WHERE id = $2 RETURNING reputation",
            points,
        )
        .await
    }

    /// Remove reputation points without going below zero, returning the new total
    ///
    /// # Errors
    ///
    /// Returns `ResourceNotFound` for an unknown user or a database error
    pub async fn decrement_reputation(&self, id: UserId, points: u32) -> AppResult<u32> {
        self.adjust_reputation(
            id,
            "UPDATE users SET reputation = MAX(0, reputation - $1) WHERE id = $2 RETURNING reputation",
            points,
        )
        .await
    }

    async fn adjust_reputation(&self, id: UserId, statement: &str, points: u32) -> AppResult<u32> {
        let row = sqlx::query(statement)
            .bind(i64::from(points))
            .bind(id.get())
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| AppError::database(format!("Failed to update reputation: {e}")))?
            .ok_or_else(|| AppError::not_found(format!("User {id}")))?;

        let reputation: i64 = row.try_get("reputation")?;
        let reputation = u32::try_from(reputation).map_err(|_| {
            AppError::from(DatabaseError::InvalidData {
                column: "reputation",
                value: reputation.to_string(),
            })
        })?;
        debug!(user_id = %id, reputation, "Reputation updated");
        Ok(reputation)
    }

    /// Saved and authored recipe counts for a profile page
    ///
    /// # Errors
    ///
    /// Returns an error if the database operation fails
    pub async fn profile_stats(&self, id: UserId) -> AppResult<ProfileStats> {
        let row = sqlx::query(
            r"
            SELECT (SELECT COUNT(*) FROM saved_recipes WHERE user_id = $1) AS saved,
                   (SELECT COUNT(*) FROM recipes WHERE author_id = $1) AS authored
            ",
        )
        .bind(id.get())
        .fetch_one(&self.pool)
        .await
        .map_err(|e| AppError::database(format!("Failed to load profile stats: {e}")))?;

        Ok(ProfileStats {
            saved_recipes_count: column_count(&row, "saved")?,
            my_recipes_count: column_count(&row, "authored")?,
        })
    }
}

/// Name the clashing field of a unique violation on `users`
fn unique_field_error(error: DatabaseError, username: &str, nickname: &str) -> AppError {
    match error {
        DatabaseError::UniqueViolation { constraint } if constraint.contains("nickname") => {
            AppError::already_exists(format!("Nickname '{nickname}'"))
        }
        DatabaseError::UniqueViolation { .. } => {
            AppError::already_exists(format!("Username '{username}'"))
        }
        other => other.into(),
    }
}
