// ABOUTME: Repository trait for everything the recipe services read and write
// ABOUTME: Decouples the service layer from the SQLite managers
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Food Forum contributors

//! Repository pattern over the database managers
//!
//! Services depend on [`RecipeStore`] only. [`SqliteRecipeStore`] is the
//! implementation backed by [`Database`](super::Database).

mod recipe_store;

pub use recipe_store::SqliteRecipeStore;

use std::collections::HashSet;

use async_trait::async_trait;

use super::recipes::{CatalogQuery, RatedRecipe};
use super::saved_recipes::SavedRecipeEntry;
use crate::errors::AppResult;
use crate::intelligence::{PantryQuery, RatingSummary};
use crate::models::{
    FoodForumUser, IngredientLine, NewProduct, NewRecipe, NewRecipeIngredient, NewUser, Product,
    ProductId, ProfileStats, ProfileUpdate, Reaction, ReactionValue, Recipe, RecipeId,
    RecipeIngredient, RecipeWithIngredients, SaveState, UserId,
};
use crate::pagination::{CursorPage, PageRequest};

/// Typed access to users, products, recipes, reactions, and bookmarks
#[async_trait]
pub trait RecipeStore: Send + Sync {
    // ------------------------------------------------------------------
    // Users
    // ------------------------------------------------------------------

    /// Register a user
    async fn create_user(&self, user: &NewUser) -> AppResult<FoodForumUser>;

    /// Get a user by ID
    async fn get_user(&self, id: UserId) -> AppResult<Option<FoodForumUser>>;

    /// Get a user by login name
    async fn get_user_by_username(&self, username: &str) -> AppResult<Option<FoodForumUser>>;

    /// Replace editable profile fields
    async fn update_profile(&self, id: UserId, update: &ProfileUpdate)
        -> AppResult<FoodForumUser>;

    /// Add reputation points
    async fn increment_reputation(&self, id: UserId, points: u32) -> AppResult<u32>;

    /// Remove reputation points, clamped at zero
    async fn decrement_reputation(&self, id: UserId, points: u32) -> AppResult<u32>;

    /// Saved and authored counts
    async fn profile_stats(&self, id: UserId) -> AppResult<ProfileStats>;

    // ------------------------------------------------------------------
    // Products
    // ------------------------------------------------------------------

    /// Add a product to the catalog
    async fn create_product(&self, product: &NewProduct) -> AppResult<Product>;

    /// Get a product by ID
    async fn get_product(&self, id: ProductId) -> AppResult<Option<Product>>;

    /// All products by name
    async fn list_products(&self) -> AppResult<Vec<Product>>;

    /// Delete an unreferenced product
    async fn delete_product(&self, id: ProductId) -> AppResult<()>;

    // ------------------------------------------------------------------
    // Recipes and ingredients
    // ------------------------------------------------------------------

    /// Create a recipe
    async fn create_recipe(&self, author: UserId, recipe: &NewRecipe) -> AppResult<Recipe>;

    /// Get a recipe row
    async fn get_recipe(&self, id: RecipeId) -> AppResult<Option<Recipe>>;

    /// Delete a recipe and everything attached to it
    async fn delete_recipe(&self, id: RecipeId) -> AppResult<()>;

    /// Add an ingredient line
    async fn add_ingredient(
        &self,
        recipe: RecipeId,
        ingredient: &NewRecipeIngredient,
    ) -> AppResult<RecipeIngredient>;

    /// Ingredient lines of a recipe with their products
    async fn ingredients_with_products(&self, recipe: RecipeId) -> AppResult<Vec<IngredientLine>>;

    /// A recipe with its ingredient lines
    async fn recipe_with_ingredients(
        &self,
        id: RecipeId,
    ) -> AppResult<Option<RecipeWithIngredients>>;

    /// Recipes to rank against a pantry
    async fn pantry_candidates(&self, query: &PantryQuery)
        -> AppResult<Vec<RecipeWithIngredients>>;

    // ------------------------------------------------------------------
    // Catalog listings
    // ------------------------------------------------------------------

    /// Highest rated published recipes
    async fn top_rated(&self, limit: usize) -> AppResult<Vec<RatedRecipe>>;

    /// Catalog search
    async fn search_recipes(
        &self,
        query: &CatalogQuery,
        page: &PageRequest,
    ) -> AppResult<CursorPage<Recipe>>;

    /// Published recipes of an author
    async fn recipes_by_author(
        &self,
        author: UserId,
        page: &PageRequest,
    ) -> AppResult<CursorPage<Recipe>>;

    // ------------------------------------------------------------------
    // Reactions
    // ------------------------------------------------------------------

    /// Insert or replace a user's vote
    async fn upsert_reaction(
        &self,
        user: UserId,
        recipe: RecipeId,
        value: ReactionValue,
    ) -> AppResult<Reaction>;

    /// A user's vote on a recipe
    async fn get_reaction(&self, user: UserId, recipe: RecipeId) -> AppResult<Option<Reaction>>;

    /// Every vote on a recipe
    async fn reactions_for_recipe(&self, recipe: RecipeId) -> AppResult<Vec<Reaction>>;

    /// Vote aggregates computed by the store
    async fn rating_summary(&self, recipe: RecipeId) -> AppResult<RatingSummary>;

    // ------------------------------------------------------------------
    // Saved recipes
    // ------------------------------------------------------------------

    /// Save or unsave a recipe
    async fn toggle_saved(&self, user: UserId, recipe: RecipeId) -> AppResult<SaveState>;

    /// Whether a user saved a recipe
    async fn is_saved(&self, user: UserId, recipe: RecipeId) -> AppResult<bool>;

    /// A user's saved recipes, newest first
    async fn saved_recipes(&self, user: UserId) -> AppResult<Vec<SavedRecipeEntry>>;

    /// Ids of a user's saved recipes
    async fn saved_recipe_ids(&self, user: UserId) -> AppResult<HashSet<RecipeId>>;
}
