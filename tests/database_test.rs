// ABOUTME: Integration tests for the SQLite recipe store
// ABOUTME: Covers constraints, vote upserts, bookmarks, reputation, search, and cursor paging
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Food Forum contributors
#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]

mod common;

use std::collections::HashSet;

use anyhow::Result;
use common::{add_ingredient, create_product, create_recipe, create_test_store, create_user, dec};
use food_forum::config::{DatabaseConfig, DatabaseUrl};
use food_forum::database::{CatalogQuery, Database, RecipeStore, SqliteRecipeStore};
use food_forum::errors::ErrorCode;
use food_forum::intelligence::{PantryQuery, RatingSummary};
use food_forum::models::{
    IngredientUnit, NewRecipe, NewUser, ProductId, ProfileUpdate, ReactionValue, RecipeId,
    SaveState,
};
use food_forum::pagination::{Cursor, PageRequest};

// ============================================================================
// Connection
// ============================================================================

#[tokio::test]
async fn test_file_database_persists_across_connections() -> Result<()> {
    common::init_test_logging();
    let dir = tempfile::tempdir()?;
    let config = DatabaseConfig {
        url: DatabaseUrl::SQLite {
            path: dir.path().join("food_forum.db"),
        },
        ..DatabaseConfig::default()
    };

    let first = SqliteRecipeStore::new(Database::new(&config).await?);
    let author = create_user(&first, "olena").await?;
    let dish = create_recipe(&first, author.id, "Borscht", 4).await?;
    first.database().pool().close().await;

    // Migrations are idempotent on an existing file
    let second = SqliteRecipeStore::new(Database::new(&config).await?);
    assert_eq!(second.get_recipe(dish.id).await?, Some(dish));
    assert_eq!(
        second.get_user_by_username("olena").await?.map(|u| u.id),
        Some(author.id)
    );
    Ok(())
}

// ============================================================================
// Products and ingredients
// ============================================================================

#[tokio::test]
async fn test_product_roundtrip_keeps_decimals() -> Result<()> {
    let store = create_test_store().await?;
    let milk = create_product(
        store.as_ref(),
        "Milk",
        IngredientUnit::Milliliters,
        ["64", "3.2", "3.6", "4.8"],
    )
    .await?;

    let loaded = store.get_product(milk.id).await?.unwrap();
    assert_eq!(loaded, milk);
    assert_eq!(loaded.protein_per_100, dec("3.2"));
    assert_eq!(loaded.unit, IngredientUnit::Milliliters);
    assert!(loaded.density_g_per_ml.is_none());
    Ok(())
}

#[tokio::test]
async fn test_duplicate_product_name_rejected() -> Result<()> {
    let store = create_test_store().await?;
    create_product(store.as_ref(), "Rice", IngredientUnit::Grams, ["130", "2.7", "0.3", "28"])
        .await?;
    let error = create_product(store.as_ref(), "Rice", IngredientUnit::Grams, ["1", "1", "1", "1"])
        .await
        .unwrap_err();
    let error = error.downcast::<food_forum::errors::AppError>()?;
    assert_eq!(error.code, ErrorCode::ResourceAlreadyExists);
    Ok(())
}

#[tokio::test]
async fn test_product_in_use_cannot_be_deleted() -> Result<()> {
    let store = create_test_store().await?;
    let author = create_user(store.as_ref(), "olena").await?;
    let rice =
        create_product(store.as_ref(), "Rice", IngredientUnit::Grams, ["130", "2.7", "0.3", "28"])
            .await?;
    let salt = create_product(store.as_ref(), "Salt", IngredientUnit::Grams, ["0", "0", "0", "0"])
        .await?;
    let pilaf = create_recipe(store.as_ref(), author.id, "Pilaf", 2).await?;
    add_ingredient(store.as_ref(), pilaf.id, rice.id, "200", IngredientUnit::Grams).await?;

    let locked = store.delete_product(rice.id).await.unwrap_err();
    assert_eq!(locked.code, ErrorCode::ResourceLocked);

    store.delete_product(salt.id).await?;
    assert!(store.get_product(salt.id).await?.is_none());

    let missing = store.delete_product(salt.id).await.unwrap_err();
    assert_eq!(missing.code, ErrorCode::ResourceNotFound);
    Ok(())
}

#[tokio::test]
async fn test_product_listed_once_per_recipe() -> Result<()> {
    let store = create_test_store().await?;
    let author = create_user(store.as_ref(), "olena").await?;
    let rice =
        create_product(store.as_ref(), "Rice", IngredientUnit::Grams, ["130", "2.7", "0.3", "28"])
            .await?;
    let pilaf = create_recipe(store.as_ref(), author.id, "Pilaf", 2).await?;

    add_ingredient(store.as_ref(), pilaf.id, rice.id, "200", IngredientUnit::Grams).await?;
    let error = add_ingredient(store.as_ref(), pilaf.id, rice.id, "50", IngredientUnit::Grams)
        .await
        .unwrap_err()
        .downcast::<food_forum::errors::AppError>()?;
    assert_eq!(error.code, ErrorCode::ResourceAlreadyExists);
    Ok(())
}

#[tokio::test]
async fn test_recipe_with_ingredients_joins_products() -> Result<()> {
    let store = create_test_store().await?;
    let author = create_user(store.as_ref(), "olena").await?;
    let rice =
        create_product(store.as_ref(), "Rice", IngredientUnit::Grams, ["130", "2.7", "0.3", "28"])
            .await?;
    let egg =
        create_product(store.as_ref(), "Egg", IngredientUnit::Pieces, ["143", "12.6", "9.5", "0.7"])
            .await?;
    let dish = create_recipe(store.as_ref(), author.id, "Fried Rice", 2).await?;
    add_ingredient(store.as_ref(), dish.id, rice.id, "250.5", IngredientUnit::Grams).await?;
    add_ingredient(store.as_ref(), dish.id, egg.id, "2", IngredientUnit::Pieces).await?;

    let loaded = store.recipe_with_ingredients(dish.id).await?.unwrap();
    assert_eq!(loaded.recipe, dish);
    assert_eq!(loaded.ingredients.len(), 2);
    let rice_line = loaded
        .ingredients
        .iter()
        .find(|line| line.product.id == rice.id)
        .unwrap();
    assert_eq!(rice_line.ingredient.amount, dec("250.5"));
    assert_eq!(rice_line.product.name, "Rice");

    assert!(store.recipe_with_ingredients(RecipeId::new(999)).await?.is_none());
    Ok(())
}

#[tokio::test]
async fn test_deleting_recipe_removes_votes_and_bookmarks() -> Result<()> {
    let store = create_test_store().await?;
    let author = create_user(store.as_ref(), "olena").await?;
    let fan = create_user(store.as_ref(), "taras").await?;
    let dish = create_recipe(store.as_ref(), author.id, "Borscht", 4).await?;
    store.upsert_reaction(fan.id, dish.id, ReactionValue::Like).await?;
    store.toggle_saved(fan.id, dish.id).await?;

    store.delete_recipe(dish.id).await?;
    assert!(store.get_recipe(dish.id).await?.is_none());
    assert!(store.reactions_for_recipe(dish.id).await?.is_empty());
    assert!(store.saved_recipes(fan.id).await?.is_empty());
    Ok(())
}

// ============================================================================
// Reactions
// ============================================================================

#[tokio::test]
async fn test_upsert_reaction_keeps_one_row_per_user() -> Result<()> {
    let store = create_test_store().await?;
    let author = create_user(store.as_ref(), "olena").await?;
    let voter = create_user(store.as_ref(), "taras").await?;
    let dish = create_recipe(store.as_ref(), author.id, "Borscht", 4).await?;

    let first = store.upsert_reaction(voter.id, dish.id, ReactionValue::Like).await?;
    let second = store.upsert_reaction(voter.id, dish.id, ReactionValue::Dislike).await?;

    assert_eq!(first.id, second.id);
    assert_eq!(first.created_at, second.created_at);
    assert_eq!(second.value, ReactionValue::Dislike);

    let all = store.reactions_for_recipe(dish.id).await?;
    assert_eq!(all.len(), 1);
    assert_eq!(
        store.get_reaction(voter.id, dish.id).await?.map(|r| r.value),
        Some(ReactionValue::Dislike)
    );
    Ok(())
}

#[tokio::test]
async fn test_store_rating_matches_computed_rating() -> Result<()> {
    let store = create_test_store().await?;
    let author = create_user(store.as_ref(), "olena").await?;
    let dish = create_recipe(store.as_ref(), author.id, "Borscht", 4).await?;
    for (name, value) in [
        ("anna", ReactionValue::Like),
        ("bohdan", ReactionValue::Like),
        ("dmytro", ReactionValue::Like),
        ("halyna", ReactionValue::Dislike),
    ] {
        let voter = create_user(store.as_ref(), name).await?;
        store.upsert_reaction(voter.id, dish.id, value).await?;
    }

    let from_store = store.rating_summary(dish.id).await?;
    let computed = RatingSummary::from_reactions(&store.reactions_for_recipe(dish.id).await?);
    assert_eq!(from_store, computed);
    assert_eq!(from_store, RatingSummary { score: 2, likes: 3, dislikes: 1 });

    let unvoted = create_recipe(store.as_ref(), author.id, "Kasha", 1).await?;
    assert_eq!(store.rating_summary(unvoted.id).await?, RatingSummary::default());
    Ok(())
}

#[tokio::test]
async fn test_reaction_on_unknown_recipe_not_found() -> Result<()> {
    let store = create_test_store().await?;
    let voter = create_user(store.as_ref(), "taras").await?;
    let error = store
        .upsert_reaction(voter.id, RecipeId::new(404), ReactionValue::Like)
        .await
        .unwrap_err();
    assert_eq!(error.code, ErrorCode::ResourceNotFound);
    Ok(())
}

// ============================================================================
// Saved recipes
// ============================================================================

#[tokio::test]
async fn test_toggle_saved_alternates() -> Result<()> {
    let store = create_test_store().await?;
    let author = create_user(store.as_ref(), "olena").await?;
    let reader = create_user(store.as_ref(), "taras").await?;
    let dish = create_recipe(store.as_ref(), author.id, "Borscht", 4).await?;

    assert_eq!(store.toggle_saved(reader.id, dish.id).await?, SaveState::Saved);
    assert!(store.is_saved(reader.id, dish.id).await?);
    assert_eq!(store.saved_recipe_ids(reader.id).await?, HashSet::from([dish.id]));

    assert_eq!(store.toggle_saved(reader.id, dish.id).await?, SaveState::Removed);
    assert!(!store.is_saved(reader.id, dish.id).await?);
    assert!(store.saved_recipe_ids(reader.id).await?.is_empty());
    Ok(())
}

#[tokio::test]
async fn test_saved_list_newest_first() -> Result<()> {
    let store = create_test_store().await?;
    let author = create_user(store.as_ref(), "olena").await?;
    let reader = create_user(store.as_ref(), "taras").await?;
    let first = create_recipe(store.as_ref(), author.id, "Borscht", 4).await?;
    let second = create_recipe(store.as_ref(), author.id, "Varenyky", 4).await?;

    store.toggle_saved(reader.id, first.id).await?;
    store.toggle_saved(reader.id, second.id).await?;

    let saved = store.saved_recipes(reader.id).await?;
    let titles: Vec<&str> = saved.iter().map(|e| e.recipe.title.as_str()).collect();
    assert_eq!(titles, vec!["Varenyky", "Borscht"]);
    Ok(())
}

// ============================================================================
// Users
// ============================================================================

#[tokio::test]
async fn test_reputation_never_goes_negative() -> Result<()> {
    let store = create_test_store().await?;
    let user = create_user(store.as_ref(), "olena").await?;
    assert_eq!(user.reputation, 0);

    assert_eq!(store.increment_reputation(user.id, 3).await?, 3);
    assert_eq!(store.decrement_reputation(user.id, 5).await?, 0);
    assert_eq!(store.get_user(user.id).await?.unwrap().reputation, 0);
    Ok(())
}

#[tokio::test]
async fn test_duplicate_nickname_rejected() -> Result<()> {
    let store = create_test_store().await?;
    store.create_user(&NewUser::new("olena", "Chef")).await?;
    let error = store
        .create_user(&NewUser::new("olena2", "Chef"))
        .await
        .unwrap_err();
    assert_eq!(error.code, ErrorCode::ResourceAlreadyExists);
    assert!(error.message.contains("Nickname"));
    Ok(())
}

#[tokio::test]
async fn test_profile_update_and_stats() -> Result<()> {
    let store = create_test_store().await?;
    let user = create_user(store.as_ref(), "olena").await?;
    let other = create_user(store.as_ref(), "taras").await?;

    let updated = store
        .update_profile(
            user.id,
            &ProfileUpdate {
                nickname: "Chef Olena".to_owned(),
                bio: "Soups and pastries".to_owned(),
                avatar: Some("avatars/olena.png".to_owned()),
            },
        )
        .await?;
    assert_eq!(updated.nickname, "Chef Olena");
    assert_eq!(updated.avatar.as_deref(), Some("avatars/olena.png"));

    let published = create_recipe(store.as_ref(), user.id, "Borscht", 4).await?;
    let mut draft = NewRecipe::new("Draft", "Not ready");
    draft.is_published = false;
    store.create_recipe(user.id, &draft).await?;
    let foreign = create_recipe(store.as_ref(), other.id, "Kasha", 1).await?;
    store.toggle_saved(user.id, foreign.id).await?;
    store.toggle_saved(user.id, published.id).await?;

    let stats = store.profile_stats(user.id).await?;
    assert_eq!(stats.my_recipes_count, 2);
    assert_eq!(stats.saved_recipes_count, 2);
    Ok(())
}

// ============================================================================
// Catalog listings
// ============================================================================

#[tokio::test]
async fn test_search_by_title_and_products() -> Result<()> {
    let store = create_test_store().await?;
    let author = create_user(store.as_ref(), "olena").await?;
    let beet =
        create_product(store.as_ref(), "Beetroot", IngredientUnit::Grams, ["43", "1.6", "0.2", "10"])
            .await?;
    let borscht = create_recipe(store.as_ref(), author.id, "Red Borscht", 6).await?;
    let salad = create_recipe(store.as_ref(), author.id, "Vinegret", 4).await?;
    let pie = create_recipe(store.as_ref(), author.id, "Apple Pie", 8).await?;
    add_ingredient(store.as_ref(), salad.id, beet.id, "300", IngredientUnit::Grams).await?;

    let mut draft = NewRecipe::new("Green Borscht", "Not ready");
    draft.is_published = false;
    store.create_recipe(author.id, &draft).await?;

    let page = PageRequest::first(20);
    let by_title = store.search_recipes(&CatalogQuery::text("borscht"), &page).await?;
    let ids: Vec<RecipeId> = by_title.items.iter().map(|r| r.id).collect();
    assert_eq!(ids, vec![borscht.id]);

    let either = CatalogQuery {
        text: Some("BORSCHT".to_owned()),
        product_ids: vec![beet.id],
    };
    let found: HashSet<RecipeId> = store
        .search_recipes(&either, &page)
        .await?
        .items
        .iter()
        .map(|r| r.id)
        .collect();
    assert_eq!(found, HashSet::from([borscht.id, salad.id]));

    let everything = store.search_recipes(&CatalogQuery::default(), &page).await?;
    assert_eq!(everything.count, 3);
    assert!(everything.items.iter().any(|r| r.id == pie.id));
    Ok(())
}

#[tokio::test]
async fn test_search_treats_wildcards_literally() -> Result<()> {
    let store = create_test_store().await?;
    let author = create_user(store.as_ref(), "olena").await?;
    create_recipe(store.as_ref(), author.id, "100% Rye Bread", 8).await?;
    create_recipe(store.as_ref(), author.id, "Wheat Bread", 8).await?;

    let found = store
        .search_recipes(&CatalogQuery::text("100%"), &PageRequest::first(10))
        .await?;
    assert_eq!(found.count, 1);
    assert_eq!(found.items[0].title, "100% Rye Bread");
    Ok(())
}

#[tokio::test]
async fn test_author_listing_pages_with_cursor() -> Result<()> {
    let store = create_test_store().await?;
    let author = create_user(store.as_ref(), "olena").await?;
    let mut created = Vec::new();
    for i in 0..5 {
        created.push(create_recipe(store.as_ref(), author.id, &format!("Recipe {i}"), 1).await?);
    }

    let mut seen = Vec::new();
    let mut page = PageRequest::first(2);
    let mut sizes = Vec::new();
    loop {
        let result = store.recipes_by_author(author.id, &page).await?;
        sizes.push(result.count);
        seen.extend(result.items.iter().map(|r| r.id));
        match result.next_cursor {
            Some(cursor) => page = PageRequest::after(cursor, 2),
            None => {
                assert!(!result.has_more);
                break;
            }
        }
    }

    assert_eq!(sizes, vec![2, 2, 1]);
    let expected: Vec<RecipeId> = created.iter().rev().map(|r| r.id).collect();
    assert_eq!(seen, expected);
    Ok(())
}

#[tokio::test]
async fn test_malformed_cursor_rejected() -> Result<()> {
    let store = create_test_store().await?;
    let author = create_user(store.as_ref(), "olena").await?;
    let page = PageRequest::after(Cursor::from_string("garbage!".to_owned()), 2);
    let error = store.recipes_by_author(author.id, &page).await.unwrap_err();
    assert_eq!(error.code, ErrorCode::InvalidInput);
    Ok(())
}

#[tokio::test]
async fn test_top_rated_orders_by_score() -> Result<()> {
    let store = create_test_store().await?;
    let author = create_user(store.as_ref(), "olena").await?;
    let fan = create_user(store.as_ref(), "taras").await?;
    let critic = create_user(store.as_ref(), "iryna").await?;

    let liked = create_recipe(store.as_ref(), author.id, "Liked", 1).await?;
    let disliked = create_recipe(store.as_ref(), author.id, "Disliked", 1).await?;
    let unrated = create_recipe(store.as_ref(), author.id, "Unrated", 1).await?;
    let mut draft = NewRecipe::new("Draft", "Hidden");
    draft.is_published = false;
    let hidden = store.create_recipe(author.id, &draft).await?;

    store.upsert_reaction(fan.id, liked.id, ReactionValue::Like).await?;
    store.upsert_reaction(critic.id, liked.id, ReactionValue::Like).await?;
    store.upsert_reaction(critic.id, disliked.id, ReactionValue::Dislike).await?;
    store.upsert_reaction(fan.id, hidden.id, ReactionValue::Like).await?;
    store.upsert_reaction(critic.id, hidden.id, ReactionValue::Like).await?;

    let top = store.top_rated(6).await?;
    let ids: Vec<RecipeId> = top.iter().map(|r| r.recipe.id).collect();
    assert_eq!(ids, vec![liked.id, unrated.id, disliked.id]);
    assert_eq!(top[0].rating, RatingSummary { score: 2, likes: 2, dislikes: 0 });
    assert_eq!(top[2].rating.score, -1);

    assert_eq!(store.top_rated(1).await?.len(), 1);
    Ok(())
}

#[tokio::test]
async fn test_pantry_candidates_require_overlap() -> Result<()> {
    let store = create_test_store().await?;
    let author = create_user(store.as_ref(), "olena").await?;
    let rice =
        create_product(store.as_ref(), "Rice", IngredientUnit::Grams, ["130", "2.7", "0.3", "28"])
            .await?;
    let flour =
        create_product(store.as_ref(), "Flour", IngredientUnit::Grams, ["364", "10", "1", "76"])
            .await?;
    let pilaf = create_recipe(store.as_ref(), author.id, "Pilaf", 2).await?;
    let bread = create_recipe(store.as_ref(), author.id, "Bread", 8).await?;
    add_ingredient(store.as_ref(), pilaf.id, rice.id, "200", IngredientUnit::Grams).await?;
    add_ingredient(store.as_ref(), bread.id, flour.id, "500", IngredientUnit::Grams).await?;

    let all = store.pantry_candidates(&PantryQuery::new([rice.id])).await?;
    assert_eq!(all.len(), 2);

    let overlapping = store
        .pantry_candidates(&PantryQuery::new([rice.id]).require_overlap())
        .await?;
    assert_eq!(overlapping.len(), 1);
    assert_eq!(overlapping[0].recipe.id, pilaf.id);
    assert_eq!(overlapping[0].ingredients.len(), 1);

    let empty = store
        .pantry_candidates(&PantryQuery::new(Vec::<ProductId>::new()).require_overlap())
        .await?;
    assert!(empty.is_empty());
    Ok(())
}

#[tokio::test]
async fn test_pantry_candidates_load_catalog_larger_than_bind_limit() -> Result<()> {
    const GENERATED: i64 = 33_000;

    let store = create_test_store().await?;
    let author = create_user(store.as_ref(), "olena").await?;
    let rice =
        create_product(store.as_ref(), "Rice", IngredientUnit::Grams, ["130", "2.7", "0.3", "28"])
            .await?;
    let pilaf = create_recipe(store.as_ref(), author.id, "Pilaf", 2).await?;
    add_ingredient(store.as_ref(), pilaf.id, rice.id, "200", IngredientUnit::Grams).await?;

    sqlx::query(
        r"
        WITH RECURSIVE n(i) AS (SELECT 1 UNION ALL SELECT i + 1 FROM n WHERE i < $1)
        INSERT INTO recipes (author_id, title, recipe_text, created_at, updated_at)
        SELECT $2, 'Dish ' || i, 'Cook.', '2025-01-01T00:00:00.000Z', '2025-01-01T00:00:00.000Z'
        FROM n
        ",
    )
    .bind(GENERATED)
    .bind(author.id.get())
    .execute(store.database().pool())
    .await?;
    let last = RecipeId::new(pilaf.id.get() + GENERATED);
    add_ingredient(store.as_ref(), last, rice.id, "50", IngredientUnit::Grams).await?;

    let all = store.pantry_candidates(&PantryQuery::new([rice.id])).await?;
    assert_eq!(all.len(), 33_001);
    assert_eq!(all[0].recipe.id, pilaf.id);
    assert_eq!(all[0].ingredients.len(), 1);
    assert!(all[1].ingredients.is_empty());
    assert_eq!(all[33_000].recipe.id, last);
    assert_eq!(all[33_000].ingredients[0].ingredient.amount, dec("50"));

    // More pantry ids than fit in one IN list
    let pantry = (1_000..2_200).map(ProductId::new).chain([rice.id]);
    let overlapping = store
        .pantry_candidates(&PantryQuery::new(pantry).require_overlap())
        .await?;
    let ids: Vec<RecipeId> = overlapping.iter().map(|r| r.recipe.id).collect();
    assert_eq!(ids, vec![pilaf.id, last]);
    Ok(())
}
