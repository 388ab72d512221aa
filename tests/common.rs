// ABOUTME: Shared test utilities and setup functions for integration tests
// ABOUTME: Provides in-memory database, service, and recipe fixture helpers
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Food Forum contributors
#![allow(
    dead_code,
    clippy::missing_errors_doc,
    clippy::missing_panics_doc,
    clippy::must_use_candidate,
    clippy::unwrap_used,
    clippy::expect_used
)]
//! Shared test utilities for `food_forum`

use std::sync::{Arc, Once};

use anyhow::Result;
use chrono::Utc;
use food_forum::config::{CatalogConfig, MissingFactorPolicy, NutritionConfig};
use food_forum::context::RequestContext;
use food_forum::database::{Database, RecipeStore, SqliteRecipeStore};
use food_forum::models::{
    FoodForumUser, IngredientLine, IngredientUnit, NewProduct, NewRecipe, NewRecipeIngredient,
    NewUser, Product, ProductId, Recipe, RecipeId, RecipeIngredient, RecipeWithIngredients,
    UserId,
};
use food_forum::services::RecipeService;
use rust_decimal::Decimal;

static INIT_LOGGER: Once = Once::new();

/// Initialize quiet logging for tests (call once per test process)
pub fn init_test_logging() {
    INIT_LOGGER.call_once(|| {
        let log_level = match std::env::var("TEST_LOG").as_deref() {
            Ok("TRACE") => tracing::Level::TRACE,
            Ok("DEBUG") => tracing::Level::DEBUG,
            Ok("INFO") => tracing::Level::INFO,
            _ => tracing::Level::WARN,
        };

        let _ = tracing_subscriber::fmt()
            .with_max_level(log_level)
            .with_test_writer()
            .try_init();
    });
}

pub fn dec(value: &str) -> Decimal {
    value.parse().unwrap()
}

/// Fresh in-memory database with the schema applied
pub async fn create_test_database() -> Result<Database> {
    init_test_logging();
    Ok(Database::in_memory().await?)
}

/// In-memory store behind the repository trait
pub async fn create_test_store() -> Result<Arc<SqliteRecipeStore>> {
    Ok(Arc::new(SqliteRecipeStore::new(create_test_database().await?)))
}

/// Service over a fresh store with the given missing-factor policy
pub fn service_with_policy(
    store: Arc<SqliteRecipeStore>,
    policy: MissingFactorPolicy,
) -> RecipeService {
    RecipeService::new(
        store,
        NutritionConfig::with_policy(policy),
        CatalogConfig::default(),
    )
}

/// Service over a fresh in-memory store with default configuration
pub async fn create_test_service() -> Result<(RecipeService, Arc<SqliteRecipeStore>)> {
    let store = create_test_store().await?;
    let service = service_with_policy(store.clone(), MissingFactorPolicy::SkipAndFlag);
    Ok((service, store))
}

pub async fn create_user(store: &dyn RecipeStore, username: &str) -> Result<FoodForumUser> {
    Ok(store
        .create_user(&NewUser::new(username, format!("{username} nick")))
        .await?)
}

/// Macros are per 100 g in the order kcal, protein, fat, carbs
pub async fn create_product(
    store: &dyn RecipeStore,
    name: &str,
    unit: IngredientUnit,
    macros: [&str; 4],
) -> Result<Product> {
    let [kcal, protein, fat, carbs] = macros;
    Ok(store
        .create_product(&NewProduct::new(
            name,
            unit,
            dec(kcal),
            dec(protein),
            dec(fat),
            dec(carbs),
        ))
        .await?)
}

pub async fn create_recipe(
    store: &dyn RecipeStore,
    author: UserId,
    title: &str,
    servings: u32,
) -> Result<Recipe> {
    let mut recipe = NewRecipe::new(title, format!("How to make {title}"));
    recipe.servings = servings;
    Ok(store.create_recipe(author, &recipe).await?)
}

pub async fn add_ingredient(
    store: &dyn RecipeStore,
    recipe: RecipeId,
    product: ProductId,
    amount: &str,
    unit: IngredientUnit,
) -> Result<RecipeIngredient> {
    Ok(store
        .add_ingredient(recipe, &NewRecipeIngredient::new(product, dec(amount), unit))
        .await?)
}

pub fn ctx(user: &FoodForumUser) -> RequestContext {
    RequestContext::for_user(user.id)
}

// ============================================================================
// Detached fixtures for the pure computation tests
// ============================================================================

pub fn product(id: i64, name: &str, macros: [&str; 4]) -> Product {
    let [kcal, protein, fat, carbs] = macros;
    Product {
        id: ProductId::new(id),
        name: name.to_owned(),
        unit: IngredientUnit::Grams,
        calories_per_100: dec(kcal),
        protein_per_100: dec(protein),
        fat_per_100: dec(fat),
        carbs_per_100: dec(carbs),
        density_g_per_ml: None,
        grams_per_piece: None,
    }
}

pub fn line(product: &Product, amount: &str, unit: IngredientUnit) -> IngredientLine {
    IngredientLine {
        ingredient: RecipeIngredient {
            id: product.id.get(),
            recipe_id: RecipeId::new(1),
            product_id: product.id,
            amount: dec(amount),
            unit,
            note: String::new(),
        },
        product: product.clone(),
    }
}

pub fn recipe(id: i64, servings: u32, ingredients: Vec<IngredientLine>) -> RecipeWithIngredients {
    let now = Utc::now();
    RecipeWithIngredients {
        recipe: Recipe {
            id: RecipeId::new(id),
            author_id: UserId::new(1),
            title: format!("Recipe {id}"),
            description: String::new(),
            recipe_text: "Cook it".to_owned(),
            image: None,
            time_minutes: 10,
            servings,
            is_published: true,
            created_at: now,
            updated_at: now,
        },
        ingredients,
    }
}
