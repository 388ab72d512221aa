// ABOUTME: Domain models for the Food Forum recipe platform
// ABOUTME: Products, recipes, ingredient lines, reactions, saved recipes, and users
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Food Forum contributors

//! Core data models.
//!
//! Models are plain data: they carry no storage handles and no lazily loaded
//! relations. Joined shapes such as [`IngredientLine`] and
//! [`RecipeWithIngredients`] are what the persistence layer hands to the
//! computation engine.

mod bounds;
mod ids;
mod product;
mod reaction;
mod recipe;
mod user;

pub use ids::{ProductId, RecipeId, UserId};
pub use product::{IngredientUnit, NewProduct, Product};
pub use reaction::{Reaction, ReactionValue, SaveState, SavedRecipe};
pub use recipe::{
    IngredientLine, NewRecipe, NewRecipeIngredient, Recipe, RecipeIngredient,
    RecipeWithIngredients,
};
pub use user::{FoodForumUser, NewUser, ProfileStats, ProfileUpdate};
