// ABOUTME: Recipe domain service combining store reads with the nutrition, rating, and pantry engine
// ABOUTME: Every user-facing operation takes an explicit RequestContext for the acting user
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Food Forum contributors

use std::collections::HashSet;
use std::sync::Arc;

use serde::Serialize;
use tracing::{debug, info, instrument};

use crate::config::{AppConfig, CatalogConfig, NutritionConfig};
use crate::context::RequestContext;
use crate::database::{CatalogQuery, RatedRecipe, RecipeStore, SavedRecipeEntry};
use crate::errors::{AppError, AppResult};
use crate::intelligence::{
    nutrition_per_serving, nutrition_total, per_serving, rank_by_pantry, Macros, PantryMatch,
    PantryQuery, RatingSummary, RecipeNutrition,
};
use crate::models::{
    FoodForumUser, NewProduct, NewRecipe, NewRecipeIngredient, NewUser, Product, ProductId,
    ProfileStats, ProfileUpdate, Reaction, ReactionValue, Recipe, RecipeId, RecipeIngredient,
    RecipeWithIngredients, SaveState, UserId,
};
use crate::pagination::{Cursor, CursorPage, PageRequest};

/// Everything a recipe page shows
#[derive(Debug, Clone, Serialize)]
pub struct RecipeDetail {
    /// Recipe with ingredient lines
    pub recipe: RecipeWithIngredients,
    /// Whole-recipe nutrition
    pub totals: Macros,
    /// Nutrition of one serving
    pub per_serving: Macros,
    /// Product names left out of the totals
    pub skipped_products: Vec<String>,
    /// Vote aggregates
    pub rating: RatingSummary,
    /// Whether the acting user saved the recipe
    pub is_saved: bool,
}

/// Recipe operations exposed to presentation layers
#[derive(Clone)]
pub struct RecipeService {
    store: Arc<dyn RecipeStore>,
    nutrition: NutritionConfig,
    catalog: CatalogConfig,
}

impl RecipeService {
    /// Create a service over a store
    #[must_use]
    pub fn new(
        store: Arc<dyn RecipeStore>,
        nutrition: NutritionConfig,
        catalog: CatalogConfig,
    ) -> Self {
        Self {
            store,
            nutrition,
            catalog,
        }
    }

    /// Create a service using the nutrition and catalog sections of `config`
    #[must_use]
    pub fn from_config(store: Arc<dyn RecipeStore>, config: &AppConfig) -> Self {
        Self::new(store, config.nutrition, config.catalog)
    }

    /// The backing store
    #[must_use]
    pub fn store(&self) -> &dyn RecipeStore {
        self.store.as_ref()
    }

    // ========================================================================
    // Computed values
    // ========================================================================

    /// Whole-recipe nutrition under the configured missing-factor policy
    ///
    /// # Errors
    ///
    /// Returns `ResourceNotFound` for an unknown recipe, or
    /// `MissingConversionFactor` or `ValueOutOfRange` when the policy is to abort
    pub async fn nutrition_total(&self, id: RecipeId) -> AppResult<RecipeNutrition> {
        let recipe = self.load_recipe(id).await?;
        Ok(nutrition_total(&recipe, self.nutrition.missing_factor_policy)?)
    }

    /// Per-serving nutrition under the configured missing-factor policy
    ///
    /// # Errors
    ///
    /// Same as [`Self::nutrition_total`]
    pub async fn nutrition_per_serving(&self, id: RecipeId) -> AppResult<RecipeNutrition> {
        let recipe = self.load_recipe(id).await?;
        Ok(nutrition_per_serving(
            &recipe,
            self.nutrition.missing_factor_policy,
        )?)
    }

    /// Vote sum of a recipe
    ///
    /// # Errors
    ///
    /// Returns an error if the store fails
    pub async fn rating(&self, id: RecipeId) -> AppResult<i64> {
        Ok(self.store.rating_summary(id).await?.score)
    }

    /// Like votes of a recipe
    ///
    /// # Errors
    ///
    /// Returns an error if the store fails
    pub async fn likes_count(&self, id: RecipeId) -> AppResult<u64> {
        Ok(self.store.rating_summary(id).await?.likes)
    }

    /// Dislike votes of a recipe
    ///
    /// # Errors
    ///
    /// Returns an error if the store fails
    pub async fn dislikes_count(&self, id: RecipeId) -> AppResult<u64> {
        Ok(self.store.rating_summary(id).await?.dislikes)
    }

    /// Score, likes, and dislikes together
    ///
    /// # Errors
    ///
    /// Returns an error if the store fails
    pub async fn rating_summary(&self, id: RecipeId) -> AppResult<RatingSummary> {
        self.store.rating_summary(id).await
    }

    /// Whether the acting user saved the recipe; always false when anonymous
    ///
    /// # Errors
    ///
    /// Returns an error if the store fails
    pub async fn is_saved_by(&self, ctx: &RequestContext, id: RecipeId) -> AppResult<bool> {
        match ctx.current_user() {
            Some(user) => self.store.is_saved(user, id).await,
            None => Ok(false),
        }
    }

    /// Recipe page data: ingredients, nutrition, rating, and saved flag
    ///
    /// # Errors
    ///
    /// Returns `ResourceNotFound` for an unknown recipe, or
    /// `MissingConversionFactor` or `ValueOutOfRange` when the policy is to abort
    #[instrument(skip(self, ctx), fields(request_id = %ctx.request_id()))]
    pub async fn recipe_detail(
        &self,
        ctx: &RequestContext,
        id: RecipeId,
    ) -> AppResult<RecipeDetail> {
        let recipe = self.load_recipe(id).await?;
        let nutrition = nutrition_total(&recipe, self.nutrition.missing_factor_policy)
            .map_err(|e| AppError::from(e).with_request_id(ctx.request_id()))?;
        let rating = self.store.rating_summary(id).await?;
        let is_saved = self.is_saved_by(ctx, id).await?;

        Ok(RecipeDetail {
            per_serving: per_serving(nutrition.totals, recipe.recipe.servings),
            totals: nutrition.totals,
            skipped_products: nutrition.skipped.into_iter().map(|s| s.product).collect(),
            rating,
            is_saved,
            recipe,
        })
    }

    /// Rank recipes by how completely the pantry covers them
    ///
    /// # Errors
    ///
    /// Returns an error if the store fails
    pub async fn rank_pantry(&self, query: &PantryQuery) -> AppResult<Vec<PantryMatch>> {
        let candidates = self.store.pantry_candidates(query).await?;
        let mut ranked = rank_by_pantry(candidates, &query.available);
        if let Some(limit) = query.limit {
            ranked.truncate(limit);
        }
        debug!(
            available = query.available.len(),
            results = ranked.len(),
            "Pantry ranking computed"
        );
        Ok(ranked)
    }

    // ========================================================================
    // Writes by the acting user
    // ========================================================================

    /// Record the acting user's vote; `value` must be 1 or -1
    ///
    /// # Errors
    ///
    /// Returns `AuthRequired` when anonymous, `InvalidInput` for other values,
    /// or `ResourceNotFound` for an unknown recipe
    #[instrument(skip(self, ctx), fields(request_id = %ctx.request_id()))]
    pub async fn react(
        &self,
        ctx: &RequestContext,
        id: RecipeId,
        value: i64,
    ) -> AppResult<Reaction> {
        let user = ctx.require_user()?;
        let value = ReactionValue::try_from(value)
            .map_err(|e| e.with_request_id(ctx.request_id()).with_user_id(user.get()))?;
        self.require_recipe(ctx, id).await?;
        self.store.upsert_reaction(user, id, value).await
    }

    /// Save or unsave a recipe for the acting user
    ///
    /// # Errors
    ///
    /// Returns `AuthRequired` when anonymous or `ResourceNotFound` for an
    /// unknown recipe
    #[instrument(skip(self, ctx), fields(request_id = %ctx.request_id()))]
    pub async fn toggle_saved(&self, ctx: &RequestContext, id: RecipeId) -> AppResult<SaveState> {
        let user = ctx.require_user()?;
        self.require_recipe(ctx, id).await?;
        self.store.toggle_saved(user, id).await
    }

    /// Publish a recipe as the acting user
    ///
    /// # Errors
    ///
    /// Returns `AuthRequired` when anonymous or `InvalidInput` for invalid fields
    pub async fn create_recipe(
        &self,
        ctx: &RequestContext,
        recipe: &NewRecipe,
    ) -> AppResult<Recipe> {
        let author = ctx.require_user()?;
        let created = self.store.create_recipe(author, recipe).await?;
        info!(
            recipe_id = %created.id,
            author_id = %author,
            request_id = %ctx.request_id(),
            "Recipe created"
        );
        Ok(created)
    }

    /// Add an ingredient line to one of the acting user's recipes
    ///
    /// # Errors
    ///
    /// Returns `AuthRequired`, `PermissionDenied` for another author's recipe,
    /// `ResourceNotFound`, `ValueOutOfRange` for an amount beyond its stored
    /// precision, or `ResourceAlreadyExists` if the product is already used
    pub async fn add_ingredient(
        &self,
        ctx: &RequestContext,
        id: RecipeId,
        ingredient: &NewRecipeIngredient,
    ) -> AppResult<RecipeIngredient> {
        self.require_author(ctx, id).await?;
        self.store.add_ingredient(id, ingredient).await
    }

    /// Delete one of the acting user's recipes
    ///
    /// # Errors
    ///
    /// Returns `AuthRequired`, `PermissionDenied`, or `ResourceNotFound`
    pub async fn delete_recipe(&self, ctx: &RequestContext, id: RecipeId) -> AppResult<()> {
        self.require_author(ctx, id).await?;
        self.store.delete_recipe(id).await
    }

    /// Add a product to the catalog
    ///
    /// # Errors
    ///
    /// Returns `AuthRequired`, `InvalidInput`, `ValueOutOfRange` for a value
    /// beyond its stored precision, or `ResourceAlreadyExists`
    pub async fn create_product(
        &self,
        ctx: &RequestContext,
        product: &NewProduct,
    ) -> AppResult<Product> {
        ctx.require_user()?;
        self.store.create_product(product).await
    }

    /// Remove a product no recipe uses
    ///
    /// # Errors
    ///
    /// Returns `AuthRequired`, `ResourceLocked` while referenced, or `ResourceNotFound`
    pub async fn delete_product(&self, ctx: &RequestContext, id: ProductId) -> AppResult<()> {
        ctx.require_user()?;
        self.store
            .delete_product(id)
            .await
            .map_err(|e| e.with_request_id(ctx.request_id()))
    }

    /// Replace the acting user's nickname, bio, and avatar
    ///
    /// # Errors
    ///
    /// Returns `AuthRequired`, `InvalidInput`, or `ResourceAlreadyExists`
    pub async fn update_profile(
        &self,
        ctx: &RequestContext,
        update: &ProfileUpdate,
    ) -> AppResult<FoodForumUser> {
        let user = ctx.require_user()?;
        self.store.update_profile(user, update).await
    }

    // ========================================================================
    // Accounts and reputation
    // ========================================================================

    /// Register a new user
    ///
    /// # Errors
    ///
    /// Returns `InvalidInput` or `ResourceAlreadyExists`
    pub async fn register(&self, user: &NewUser) -> AppResult<FoodForumUser> {
        self.store.create_user(user).await
    }

    /// Add reputation points to a user
    ///
    /// # Errors
    ///
    /// Returns `ResourceNotFound` for an unknown user
    pub async fn increment_reputation(&self, user: UserId, points: u32) -> AppResult<u32> {
        self.store.increment_reputation(user, points).await
    }

    /// Remove reputation points from a user, stopping at zero
    ///
    /// # Errors
    ///
    /// Returns `ResourceNotFound` for an unknown user
    pub async fn decrement_reputation(&self, user: UserId, points: u32) -> AppResult<u32> {
        self.store.decrement_reputation(user, points).await
    }

    /// Saved and authored counts of the acting user
    ///
    /// # Errors
    ///
    /// Returns `AuthRequired` when anonymous
    pub async fn profile_stats(&self, ctx: &RequestContext) -> AppResult<ProfileStats> {
        let user = ctx.require_user()?;
        self.store.profile_stats(user).await
    }

    // ========================================================================
    // Catalog listings
    // ========================================================================

    /// Highest rated published recipes
    ///
    /// # Errors
    ///
    /// Returns an error if the store fails
    pub async fn top_rated(&self) -> AppResult<Vec<RatedRecipe>> {
        self.store.top_rated(self.catalog.top_rated_limit).await
    }

    /// Catalog search, one page at a time
    ///
    /// # Errors
    ///
    /// Returns `InvalidInput` for a malformed cursor
    pub async fn search(
        &self,
        query: &CatalogQuery,
        cursor: Option<Cursor>,
    ) -> AppResult<CursorPage<Recipe>> {
        let page = page_request(cursor, self.catalog.catalog_page_size);
        self.store.search_recipes(query, &page).await
    }

    /// Published recipes of one author, one page at a time
    ///
    /// # Errors
    ///
    /// Returns `InvalidInput` for a malformed cursor
    pub async fn recipes_by_author(
        &self,
        author: UserId,
        cursor: Option<Cursor>,
    ) -> AppResult<CursorPage<Recipe>> {
        let page = page_request(cursor, self.catalog.author_page_size);
        self.store.recipes_by_author(author, &page).await
    }

    /// The acting user's published recipes
    ///
    /// # Errors
    ///
    /// Returns `AuthRequired` when anonymous
    pub async fn my_recipes(
        &self,
        ctx: &RequestContext,
        cursor: Option<Cursor>,
    ) -> AppResult<CursorPage<Recipe>> {
        let user = ctx.require_user()?;
        self.recipes_by_author(user, cursor).await
    }

    /// The acting user's saved recipes, newest saved first
    ///
    /// # Errors
    ///
    /// Returns `AuthRequired` when anonymous
    pub async fn saved_recipes(&self, ctx: &RequestContext) -> AppResult<Vec<SavedRecipeEntry>> {
        let user = ctx.require_user()?;
        self.store.saved_recipes(user).await
    }

    /// Ids of the acting user's saved recipes; empty when anonymous
    ///
    /// # Errors
    ///
    /// Returns an error if the store fails
    pub async fn saved_recipe_ids(&self, ctx: &RequestContext) -> AppResult<HashSet<RecipeId>> {
        match ctx.current_user() {
            Some(user) => self.store.saved_recipe_ids(user).await,
            None => Ok(HashSet::new()),
        }
    }

    // ========================================================================
    // Helpers
    // ========================================================================

    async fn load_recipe(&self, id: RecipeId) -> AppResult<RecipeWithIngredients> {
        self.store
            .recipe_with_ingredients(id)
            .await?
            .ok_or_else(|| AppError::not_found(format!("Recipe {id}")))
    }

    async fn require_recipe(&self, ctx: &RequestContext, id: RecipeId) -> AppResult<Recipe> {
        self.store.get_recipe(id).await?.ok_or_else(|| {
            AppError::not_found(format!("Recipe {id}")).with_request_id(ctx.request_id())
        })
    }

    async fn require_author(&self, ctx: &RequestContext, id: RecipeId) -> AppResult<Recipe> {
        let user = ctx.require_user()?;
        let recipe = self.require_recipe(ctx, id).await?;
        if recipe.author_id != user {
            return Err(AppError::permission_denied(format!(
                "Recipe {id} belongs to another author"
            ))
            .with_request_id(ctx.request_id())
            .with_user_id(user.get()));
        }
        Ok(recipe)
    }
}

fn page_request(cursor: Option<Cursor>, limit: usize) -> PageRequest {
    match cursor {
        Some(cursor) => PageRequest::after(cursor, limit),
        None => PageRequest::first(limit),
    }
}
