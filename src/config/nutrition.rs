// ABOUTME: Nutrition engine configuration covering missing conversion factors
// ABOUTME: Selects whether unconvertible ingredients are skipped and flagged or abort the total
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Food Forum contributors

use crate::constants::env_vars;
use crate::errors::{AppError, AppResult};
use serde::{Deserialize, Serialize};
use std::env;
use std::fmt::{self, Display, Formatter};
use std::str::FromStr;

/// What a recipe total does with an ingredient whose product lacks the
/// density or piece weight its unit requires
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MissingFactorPolicy {
    /// Leave the ingredient out and report it next to the totals
    #[default]
    SkipAndFlag,
    /// Fail the whole computation with the first conversion error
    Abort,
}

impl MissingFactorPolicy {
    /// Configuration string for this policy
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::SkipAndFlag => "skip",
            Self::Abort => "abort",
        }
    }
}

impl FromStr for MissingFactorPolicy {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "skip" | "skip_and_flag" | "flag" => Ok(Self::SkipAndFlag),
            "abort" | "strict" | "error" => Ok(Self::Abort),
            other => Err(AppError::config_invalid(format!(
                "Invalid {} value '{other}': expected 'skip' or 'abort'",
                env_vars::MISSING_FACTOR_POLICY
            ))),
        }
    }
}

impl Display for MissingFactorPolicy {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Nutrition computation settings
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct NutritionConfig {
    /// Handling of missing conversion factors
    pub missing_factor_policy: MissingFactorPolicy,
}

impl NutritionConfig {
    /// Configuration with an explicit policy
    #[must_use]
    pub const fn with_policy(missing_factor_policy: MissingFactorPolicy) -> Self {
        Self {
            missing_factor_policy,
        }
    }

    /// Load from `FOOD_FORUM_MISSING_FACTOR_POLICY`
    ///
    /// # Errors
    ///
    /// Returns `ConfigInvalid` when the variable holds an unknown policy name
    pub fn from_env() -> AppResult<Self> {
        let missing_factor_policy = match env::var(env_vars::MISSING_FACTOR_POLICY) {
            Ok(value) => value.parse()?,
            Err(_) => MissingFactorPolicy::default(),
        };
        Ok(Self {
            missing_factor_policy,
        })
    }
}
