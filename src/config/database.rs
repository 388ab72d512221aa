// ABOUTME: Database configuration types for SQLite connections
// ABOUTME: Parses DATABASE_URL into a typed location and pool settings
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Food Forum contributors

use crate::constants::{defaults, env_vars};
use crate::errors::{AppError, AppResult};
use serde::{Deserialize, Serialize};
use std::env;
use std::fmt::{Display, Formatter, Result as FmtResult};
use std::path::PathBuf;

/// Type-safe database location
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum DatabaseUrl {
    /// `SQLite` database with file path
    SQLite {
        /// Path to `SQLite` database file
        path: PathBuf,
    },
    /// In-memory `SQLite` (for testing)
    Memory,
}

impl DatabaseUrl {
    /// Parse from string with validation
    ///
    /// # Errors
    ///
    /// Returns an error for empty URLs and for schemes other than `sqlite:`
    pub fn parse_url(s: &str) -> AppResult<Self> {
        let s = s.trim();
        if s.is_empty() {
            return Err(AppError::config_invalid("DATABASE_URL must not be empty"));
        }
        if let Some(path_str) = s.strip_prefix("sqlite:") {
            let path_str = path_str.trim_start_matches("//");
            if path_str == ":memory:" || path_str.is_empty() {
                return Ok(Self::Memory);
            }
            return Ok(Self::SQLite {
                path: PathBuf::from(path_str),
            });
        }
        if s.contains("://") {
            return Err(AppError::config_invalid(format!(
                "Unsupported database URL scheme: {s}"
            )));
        }
        // Fallback: treat as SQLite file path
        Ok(Self::SQLite {
            path: PathBuf::from(s),
        })
    }

    /// Convert to connection string
    #[must_use]
    pub fn to_connection_string(&self) -> String {
        match self {
            Self::SQLite { path } => format!("sqlite:{}", path.display()),
            Self::Memory => "sqlite::memory:".into(),
        }
    }

    /// Check if this is an in-memory database
    #[must_use]
    pub const fn is_memory(&self) -> bool {
        matches!(self, Self::Memory)
    }
}

impl Default for DatabaseUrl {
    fn default() -> Self {
        Self::SQLite {
            path: PathBuf::from("./data/food_forum.db"),
        }
    }
}

impl Display for DatabaseUrl {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        write!(f, "{}", self.to_connection_string())
    }
}

/// Database connection and management configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DatabaseConfig {
    /// Database location
    pub url: DatabaseUrl,
    /// Run schema migrations when connecting
    pub auto_migrate: bool,
    /// Maximum pooled connections
    pub max_connections: u32,
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            url: DatabaseUrl::default(),
            auto_migrate: true,
            max_connections: defaults::DATABASE_MAX_CONNECTIONS,
        }
    }
}

impl DatabaseConfig {
    /// Configuration for a private in-memory database
    #[must_use]
    pub fn in_memory() -> Self {
        Self {
            url: DatabaseUrl::Memory,
            auto_migrate: true,
            // Every in-memory connection is a separate database
            max_connections: 1,
        }
    }

    /// Load database configuration from environment
    ///
    /// # Errors
    ///
    /// Returns an error if database environment variables are invalid
    pub fn from_env() -> AppResult<Self> {
        let url = DatabaseUrl::parse_url(&env_var_or(
            env_vars::DATABASE_URL,
            defaults::DATABASE_URL,
        ))?;
        let auto_migrate = env_var_or(env_vars::DATABASE_AUTO_MIGRATE, "true")
            .parse()
            .map_err(|e| {
                AppError::config_invalid(format!(
                    "Invalid {} value: {e}",
                    env_vars::DATABASE_AUTO_MIGRATE
                ))
            })?;
        let max_connections = if url.is_memory() {
            1
        } else {
            env_var_or(
                env_vars::DATABASE_MAX_CONNECTIONS,
                &defaults::DATABASE_MAX_CONNECTIONS.to_string(),
            )
            .parse::<u32>()
            .ok()
            .filter(|n| *n > 0)
            .ok_or_else(|| {
                AppError::config_invalid(format!(
                    "{} must be a positive integer",
                    env_vars::DATABASE_MAX_CONNECTIONS
                ))
            })?
        };

        Ok(Self {
            url,
            auto_migrate,
            max_connections,
        })
    }
}

/// Get environment variable or default value
pub(crate) fn env_var_or(key: &str, default: &str) -> String {
    env::var(key).unwrap_or_else(|_| default.to_owned())
}
