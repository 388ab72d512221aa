// ABOUTME: Pure computation engine over join-fetched recipe data
// ABOUTME: Unit conversion, nutrition totals, rating aggregation, and pantry ranking
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Food Forum contributors

//! # Intelligence Module
//!
//! Synchronous functions with no storage access. The persistence layer
//! hands over [`RecipeWithIngredients`](crate::models::RecipeWithIngredients)
//! and reaction rows; everything here is derived from those values.

/// Ingredient amount to grams
pub mod conversion;
/// Per-ingredient, per-recipe, and per-serving macros
pub mod nutrition_calculator;
/// Recipe ranking against available products
pub mod pantry_matcher;
/// Vote aggregation
pub mod rating;

pub use conversion::{grams, to_grams};
pub use nutrition_calculator::{
    nutrition, nutrition_per_serving, nutrition_total, per_serving, Macros, RecipeNutrition,
    SkippedIngredient,
};
pub use pantry_matcher::{match_recipe, rank_by_pantry, PantryMatch, PantryQuery};
pub use rating::{dislikes_count, likes_count, rating, RatingSummary};
