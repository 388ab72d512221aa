// ABOUTME: SQLite implementation of the RecipeStore repository
// ABOUTME: Delegates each operation to the table manager that owns it
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Food Forum contributors

use std::collections::HashSet;

use async_trait::async_trait;

use super::RecipeStore;
use crate::database::recipes::{CatalogQuery, RatedRecipe};
use crate::database::saved_recipes::SavedRecipeEntry;
use crate::database::Database;
use crate::errors::AppResult;
use crate::intelligence::{PantryQuery, RatingSummary};
use crate::models::{
    FoodForumUser, IngredientLine, NewProduct, NewRecipe, NewRecipeIngredient, NewUser, Product,
    ProductId, ProfileStats, ProfileUpdate, Reaction, ReactionValue, Recipe, RecipeId,
    RecipeIngredient, RecipeWithIngredients, SaveState, UserId,
};
use crate::pagination::{CursorPage, PageRequest};

/// SQLite implementation of `RecipeStore`
#[derive(Clone)]
pub struct SqliteRecipeStore {
    db: Database,
}

impl SqliteRecipeStore {
    /// Create a store over the given database
    #[must_use]
    pub const fn new(db: Database) -> Self {
        Self { db }
    }

    /// The underlying database
    #[must_use]
    pub const fn database(&self) -> &Database {
        &self.db
    }
}

#[async_trait]
impl RecipeStore for SqliteRecipeStore {
    async fn create_user(&self, user: &NewUser) -> AppResult<FoodForumUser> {
        self.db.users().create(user).await
    }

    async fn get_user(&self, id: UserId) -> AppResult<Option<FoodForumUser>> {
        self.db.users().get(id).await
    }

    async fn get_user_by_username(&self, username: &str) -> AppResult<Option<FoodForumUser>> {
        self.db.users().get_by_username(username).await
    }

    async fn update_profile(
        &self,
        id: UserId,
        update: &ProfileUpdate,
    ) -> AppResult<FoodForumUser> {
        self.db.users().update_profile(id, update).await
    }

    async fn increment_reputation(&self, id: UserId, points: u32) -> AppResult<u32> {
        self.db.users().increment_reputation(id, points).await
    }

    async fn decrement_reputation(&self, id: UserId, points: u32) -> AppResult<u32> {
        self.db.users().decrement_reputation(id, points).await
    }

    async fn profile_stats(&self, id: UserId) -> AppResult<ProfileStats> {
        self.db.users().profile_stats(id).await
    }

    async fn create_product(&self, product: &NewProduct) -> AppResult<Product> {
        self.db.products().create(product).await
    }

    async fn get_product(&self, id: ProductId) -> AppResult<Option<Product>> {
        self.db.products().get(id).await
    }

    async fn list_products(&self) -> AppResult<Vec<Product>> {
        self.db.products().list().await
    }

    async fn delete_product(&self, id: ProductId) -> AppResult<()> {
        self.db.products().delete(id).await
    }

    async fn create_recipe(&self, author: UserId, recipe: &NewRecipe) -> AppResult<Recipe> {
        self.db.recipes().create(author, recipe).await
    }

    async fn get_recipe(&self, id: RecipeId) -> AppResult<Option<Recipe>> {
        self.db.recipes().get(id).await
    }

    async fn delete_recipe(&self, id: RecipeId) -> AppResult<()> {
        self.db.recipes().delete(id).await
    }

    async fn add_ingredient(
        &self,
        recipe: RecipeId,
        ingredient: &NewRecipeIngredient,
    ) -> AppResult<RecipeIngredient> {
        self.db.recipes().add_ingredient(recipe, ingredient).await
    }

    async fn ingredients_with_products(&self, recipe: RecipeId) -> AppResult<Vec<IngredientLine>> {
        self.db.recipes().ingredients_with_products(recipe).await
    }

    async fn recipe_with_ingredients(
        &self,
        id: RecipeId,
    ) -> AppResult<Option<RecipeWithIngredients>> {
        self.db.recipes().with_ingredients(id).await
    }

    async fn pantry_candidates(
        &self,
        query: &PantryQuery,
    ) -> AppResult<Vec<RecipeWithIngredients>> {
        self.db.recipes().pantry_candidates(query).await
    }

    async fn top_rated(&self, limit: usize) -> AppResult<Vec<RatedRecipe>> {
        self.db.recipes().top_rated(limit).await
    }

    async fn search_recipes(
        &self,
        query: &CatalogQuery,
        page: &PageRequest,
    ) -> AppResult<CursorPage<Recipe>> {
        self.db.recipes().search(query, page).await
    }

    async fn recipes_by_author(
        &self,
        author: UserId,
        page: &PageRequest,
    ) -> AppResult<CursorPage<Recipe>> {
        self.db.recipes().by_author(author, page).await
    }

    async fn upsert_reaction(
        &self,
        user: UserId,
        recipe: RecipeId,
        value: ReactionValue,
    ) -> AppResult<Reaction> {
        self.db.reactions().upsert(user, recipe, value).await
    }

    async fn get_reaction(&self, user: UserId, recipe: RecipeId) -> AppResult<Option<Reaction>> {
        self.db.reactions().get(user, recipe).await
    }

    async fn reactions_for_recipe(&self, recipe: RecipeId) -> AppResult<Vec<Reaction>> {
        self.db.reactions().for_recipe(recipe).await
    }

    async fn rating_summary(&self, recipe: RecipeId) -> AppResult<RatingSummary> {
        self.db.reactions().summary(recipe).await
    }

    async fn toggle_saved(&self, user: UserId, recipe: RecipeId) -> AppResult<SaveState> {
        self.db.saved_recipes().toggle(user, recipe).await
    }

    async fn is_saved(&self, user: UserId, recipe: RecipeId) -> AppResult<bool> {
        self.db.saved_recipes().is_saved(user, recipe).await
    }

    async fn saved_recipes(&self, user: UserId) -> AppResult<Vec<SavedRecipeEntry>> {
        self.db.saved_recipes().list_for_user(user).await
    }

    async fn saved_recipe_ids(&self, user: UserId) -> AppResult<HashSet<RecipeId>> {
        self.db.saved_recipes().ids_for_user(user).await
    }
}
