// ABOUTME: Recipe rating aggregation from like and dislike reactions
// ABOUTME: Score is the signed vote sum, always equal to likes minus dislikes
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Food Forum contributors

use serde::{Deserialize, Serialize};

use crate::models::{Reaction, ReactionValue};

/// Sum of vote values; zero when nobody voted
#[must_use]
pub fn rating(reactions: &[Reaction]) -> i64 {
    reactions.iter().map(|r| r.value.as_i64()).sum()
}

/// Number of likes
#[must_use]
pub fn likes_count(reactions: &[Reaction]) -> u64 {
    count_of(reactions, ReactionValue::Like)
}

/// Number of dislikes
#[must_use]
pub fn dislikes_count(reactions: &[Reaction]) -> u64 {
    count_of(reactions, ReactionValue::Dislike)
}

fn count_of(reactions: &[Reaction], value: ReactionValue) -> u64 {
    reactions.iter().filter(|r| r.value == value).count() as u64
}

/// Score with its like and dislike breakdown
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct RatingSummary {
    /// Likes minus dislikes
    pub score: i64,
    /// Like votes
    pub likes: u64,
    /// Dislike votes
    pub dislikes: u64,
}

impl RatingSummary {
    /// Summary from counts; the score is derived
    #[must_use]
    pub fn from_counts(likes: u64, dislikes: u64) -> Self {
        let signed = |n: u64| i64::try_from(n).unwrap_or(i64::MAX);
        Self {
            score: signed(likes).saturating_sub(signed(dislikes)),
            likes,
            dislikes,
        }
    }

    /// Summary of loaded reactions
    #[must_use]
    pub fn from_reactions(reactions: &[Reaction]) -> Self {
        Self::from_counts(likes_count(reactions), dislikes_count(reactions))
    }
}
