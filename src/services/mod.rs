// ABOUTME: Domain service layer exposing computed recipe values to presentation layers
// ABOUTME: Services combine repository reads with the pure computation engine
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Food Forum contributors

//! Domain service layer
//!
//! Services hold no per-user state; the acting user arrives in a
//! [`RequestContext`](crate::context::RequestContext) on each call.

/// Recipe nutrition, rating, bookmarks, pantry ranking, and catalog listings
pub mod recipes;

pub use recipes::{RecipeDetail, RecipeService};
