// ABOUTME: Reaction (like/dislike) and saved-recipe bookmark models
// ABOUTME: ReactionValue restricts votes to +1 and -1
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Food Forum contributors

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::{RecipeId, UserId};
use crate::errors::AppError;

/// Signed vote on a recipe
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(into = "i64", try_from = "i64")]
pub enum ReactionValue {
    /// +1
    Like,
    /// -1
    Dislike,
}

impl ReactionValue {
    /// Signed numeric value stored in the reactions table
    #[must_use]
    pub const fn as_i64(self) -> i64 {
        match self {
            Self::Like => 1,
            Self::Dislike => -1,
        }
    }
}

impl From<ReactionValue> for i64 {
    fn from(value: ReactionValue) -> Self {
        value.as_i64()
    }
}

impl TryFrom<i64> for ReactionValue {
    type Error = AppError;

    fn try_from(value: i64) -> Result<Self, Self::Error> {
        match value {
            1 => Ok(Self::Like),
            -1 => Ok(Self::Dislike),
            other => Err(AppError::invalid_input(format!(
                "Reaction value must be 1 or -1, got {other}"
            ))),
        }
    }
}

/// One user's vote on one recipe
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Reaction {
    /// Row id
    pub id: i64,
    /// Voter
    pub user_id: UserId,
    /// Recipe voted on
    pub recipe_id: RecipeId,
    /// Vote
    pub value: ReactionValue,
    /// First vote time
    pub created_at: DateTime<Utc>,
    /// Last change time
    pub updated_at: DateTime<Utc>,
}

/// Bookmark of a recipe by a user
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SavedRecipe {
    /// User who saved
    pub user_id: UserId,
    /// Saved recipe
    pub recipe_id: RecipeId,
    /// When it was saved
    pub saved_at: DateTime<Utc>,
}

/// Outcome of toggling a bookmark
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SaveState {
    /// The recipe is now saved
    Saved,
    /// The bookmark was removed
    Removed,
}
