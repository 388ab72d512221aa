// ABOUTME: Forum user account model with nickname and reputation
// ABOUTME: Reputation only changes through explicit increment and decrement operations
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Food Forum contributors

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt::{self, Display, Formatter};

use super::UserId;
use crate::constants::limits::{NICKNAME_MAX_LEN, NICKNAME_MIN_LEN};
use crate::errors::{AppError, AppResult};

/// Registered forum member
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FoodForumUser {
    /// Row id
    pub id: UserId,
    /// Login name
    pub username: String,
    /// Public display name
    pub nickname: String,
    /// Profile text
    pub bio: String,
    /// Stored avatar path
    pub avatar: Option<String>,
    /// Reputation points, never negative
    pub reputation: u32,
    /// Whether the user may publish
    pub is_active_contributor: bool,
    /// Registration time
    pub created_at: DateTime<Utc>,
}

impl Display for FoodForumUser {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        if self.nickname.is_empty() {
            f.write_str(&self.username)
        } else {
            write!(f, "{} ({})", self.nickname, self.username)
        }
    }
}

/// Fields required to register a user
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewUser {
    /// Login name
    pub username: String,
    /// Public display name
    pub nickname: String,
    /// Profile text
    pub bio: String,
}

impl NewUser {
    /// User with an empty bio
    pub fn new(username: impl Into<String>, nickname: impl Into<String>) -> Self {
        Self {
            username: username.into(),
            nickname: nickname.into(),
            bio: String::new(),
        }
    }

    /// Validate field constraints before insertion
    ///
    /// # Errors
    ///
    /// Returns `InvalidInput` for an empty username or a nickname outside
    /// the allowed length range.
    pub fn validate(&self) -> AppResult<()> {
        if self.username.trim().is_empty() {
            return Err(AppError::invalid_input("Username is required"));
        }
        validate_nickname(&self.nickname)
    }
}

/// Editable profile fields; every field replaces the stored value
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProfileUpdate {
    /// Public display name
    pub nickname: String,
    /// Profile text
    pub bio: String,
    /// Stored avatar path
    pub avatar: Option<String>,
}

impl ProfileUpdate {
    /// Validate field constraints before the update
    ///
    /// # Errors
    ///
    /// Returns `InvalidInput` for a nickname outside the allowed length range
    pub fn validate(&self) -> AppResult<()> {
        validate_nickname(&self.nickname)
    }
}

fn validate_nickname(nickname: &str) -> AppResult<()> {
    let len = nickname.chars().count();
    if !(NICKNAME_MIN_LEN..=NICKNAME_MAX_LEN).contains(&len) {
        return Err(AppError::invalid_input(format!(
            "Nickname must be {NICKNAME_MIN_LEN}-{NICKNAME_MAX_LEN} characters"
        )));
    }
    Ok(())
}

/// Counters shown on a profile page
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProfileStats {
    /// Recipes the user has bookmarked
    pub saved_recipes_count: u64,
    /// Recipes the user has authored
    pub my_recipes_count: u64,
}
