// ABOUTME: Cursor-based pagination for recipe catalog listings
// ABOUTME: Provides opaque cursor encoding over (created_at, id) keyset positions
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Food Forum contributors

use std::fmt::{self, Display, Formatter};

use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::constants::limits::MAX_PAGE_SIZE;

/// Opaque pagination cursor containing encoded position information
///
/// Listings are ordered newest first (`created_at DESC, id DESC`), so a cursor
/// holds the creation time and id of the last item already returned.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Cursor(String);

impl Cursor {
    /// Create a new cursor from timestamp and ID
    #[must_use]
    pub fn new(timestamp: DateTime<Utc>, id: i64) -> Self {
        let cursor_data = format!("{}:{id}", timestamp.timestamp_millis());
        let encoded = base64::Engine::encode(&URL_SAFE_NO_PAD, cursor_data.as_bytes());
        Self(encoded)
    }

    /// Decode cursor into timestamp and ID components
    ///
    /// Returns `None` if cursor is invalid or malformed
    #[must_use]
    pub fn decode(&self) -> Option<(DateTime<Utc>, i64)> {
        let decoded = base64::Engine::decode(&URL_SAFE_NO_PAD, &self.0).ok()?;
        let decoded_str = String::from_utf8(decoded).ok()?;
        let (timestamp_str, id_str) = decoded_str.split_once(':')?;

        let timestamp_millis = timestamp_str.parse::<i64>().ok()?;
        let datetime = DateTime::from_timestamp_millis(timestamp_millis)?;
        let id = id_str.parse::<i64>().ok()?;

        Some((datetime, id))
    }

    /// Get the raw cursor string
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Create cursor from raw string (for deserialization)
    #[must_use]
    pub const fn from_string(s: String) -> Self {
        Self(s)
    }
}

impl Display for Cursor {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Paginated response containing items and pagination metadata
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CursorPage<T> {
    /// The items in this page
    pub items: Vec<T>,

    /// Cursor pointing to the next page (if available)
    pub next_cursor: Option<Cursor>,

    /// Whether there are more items after this page
    pub has_more: bool,

    /// Total number of items in this page
    pub count: usize,
}

impl<T> CursorPage<T> {
    /// Create a new cursor page
    #[must_use]
    pub fn new(items: Vec<T>, next_cursor: Option<Cursor>, has_more: bool) -> Self {
        let count = items.len();
        Self {
            items,
            next_cursor,
            has_more,
            count,
        }
    }

    /// Create an empty page
    #[must_use]
    pub const fn empty() -> Self {
        Self {
            items: Vec::new(),
            next_cursor: None,
            has_more: false,
            count: 0,
        }
    }

    /// Build a page from `limit + 1` fetched rows
    ///
    /// The extra row only signals that another page exists; it is dropped and
    /// the cursor is taken from the last kept item.
    pub fn from_overfetch<F>(mut items: Vec<T>, limit: usize, cursor_of: F) -> Self
    where
        F: Fn(&T) -> Cursor,
    {
        let has_more = items.len() > limit;
        items.truncate(limit);
        let next_cursor = if has_more {
            items.last().map(cursor_of)
        } else {
            None
        };
        Self::new(items, next_cursor, has_more)
    }
}

/// Pagination parameters for cursor-based queries
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct PageRequest {
    /// Cursor to start after (exclusive)
    pub cursor: Option<Cursor>,

    /// Maximum number of items to return
    pub limit: usize,
}

impl PageRequest {
    /// First page with the given size
    #[must_use]
    pub const fn first(limit: usize) -> Self {
        Self {
            cursor: None,
            limit,
        }
    }

    /// Page continuing after `cursor`
    #[must_use]
    pub const fn after(cursor: Cursor, limit: usize) -> Self {
        Self {
            cursor: Some(cursor),
            limit,
        }
    }

    /// Limit clamped to `1..=MAX_PAGE_SIZE`
    #[must_use]
    pub fn effective_limit(&self) -> usize {
        self.limit.clamp(1, MAX_PAGE_SIZE)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cursor_roundtrip_preserves_position() {
        let ts = DateTime::from_timestamp_millis(1_735_689_600_123).unwrap();
        let cursor = Cursor::new(ts, 42);
        assert_eq!(cursor.decode(), Some((ts, 42)));
    }

    #[test]
    fn test_malformed_cursor_decodes_to_none() {
        assert!(Cursor::from_string("not-base64!".to_owned()).decode().is_none());
        let no_id = base64::Engine::encode(&URL_SAFE_NO_PAD, b"1735689600123:abc");
        assert!(Cursor::from_string(no_id).decode().is_none());
    }

    #[test]
    fn test_from_overfetch_sets_cursor_only_when_more() {
        let ts = Utc::now();
        let page = CursorPage::from_overfetch(vec![1_i64, 2, 3], 2, |id| Cursor::new(ts, *id));
        assert!(page.has_more);
        assert_eq!(page.items, vec![1, 2]);
        assert_eq!(page.next_cursor.and_then(|c| c.decode()).map(|(_, id)| id), Some(2));

        let last = CursorPage::from_overfetch(vec![1_i64], 2, |id| Cursor::new(ts, *id));
        assert!(!last.has_more);
        assert!(last.next_cursor.is_none());
    }

    #[test]
    fn test_effective_limit_is_clamped() {
        assert_eq!(PageRequest::first(0).effective_limit(), 1);
        assert_eq!(PageRequest::first(10_000).effective_limit(), MAX_PAGE_SIZE);
    }
}
