// ABOUTME: Row mapping helpers between SQLite rows and domain models
// ABOUTME: Decimals are stored as TEXT and timestamps as millisecond RFC3339 strings
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Food Forum contributors

use std::str::FromStr;

use chrono::{DateTime, SecondsFormat, Utc};
use rust_decimal::Decimal;
use sqlx::{sqlite::SqliteRow, Row};

use crate::errors::{AppResult, DatabaseError};
use crate::models::{
    FoodForumUser, IngredientLine, IngredientUnit, Product, ProductId, Reaction, ReactionValue,
    Recipe, RecipeId, RecipeIngredient, UserId,
};

/// Column list selected for recipe rows, qualified with alias `r`
pub(crate) const RECIPE_COLUMNS: &str = "r.id, r.author_id, r.title, r.description, \
     r.recipe_text, r.image, r.time_minutes, r.servings, r.is_published, r.created_at, \
     r.updated_at";

/// Column list selected for product rows, qualified with alias `p`
pub(crate) const PRODUCT_COLUMNS: &str = "p.id, p.name, p.unit, p.calories_per_100, \
     p.protein_per_100, p.fat_per_100, p.carbs_per_100, p.density_g_per_ml, p.grams_per_piece";

/// Current time truncated to what the timestamp columns keep
pub(crate) fn now() -> DateTime<Utc> {
    let now = Utc::now();
    DateTime::from_timestamp_millis(now.timestamp_millis()).unwrap_or(now)
}

/// Sortable text form of a timestamp
pub(crate) fn format_timestamp(ts: DateTime<Utc>) -> String {
    ts.to_rfc3339_opts(SecondsFormat::Millis, true)
}

fn parse_timestamp(row: &SqliteRow, column: &'static str) -> AppResult<DateTime<Utc>> {
    let raw: String = row.try_get(column)?;
    DateTime::parse_from_rfc3339(&raw)
        .map(|ts| ts.with_timezone(&Utc))
        .map_err(|_| DatabaseError::InvalidData { column, value: raw }.into())
}

fn parse_decimal(row: &SqliteRow, column: &'static str) -> AppResult<Decimal> {
    let raw: String = row.try_get(column)?;
    Decimal::from_str(&raw).map_err(|_| DatabaseError::InvalidData { column, value: raw }.into())
}

fn parse_optional_decimal(row: &SqliteRow, column: &'static str) -> AppResult<Option<Decimal>> {
    let raw: Option<String> = row.try_get(column)?;
    raw.map(|value| {
        Decimal::from_str(&value).map_err(|_| DatabaseError::InvalidData { column, value }.into())
    })
    .transpose()
}

fn parse_u32(row: &SqliteRow, column: &'static str) -> AppResult<u32> {
    let raw: i64 = row.try_get(column)?;
    u32::try_from(raw).map_err(|_| {
        DatabaseError::InvalidData {
            column,
            value: raw.to_string(),
        }
        .into()
    })
}

/// Read a `COUNT(*)`-style column as `u64`
pub(crate) fn column_count(row: &SqliteRow, column: &'static str) -> AppResult<u64> {
    let raw: i64 = row.try_get(column)?;
    u64::try_from(raw).map_err(|_| {
        DatabaseError::InvalidData {
            column,
            value: raw.to_string(),
        }
        .into()
    })
}

/// Convert a database row to a `Product`
pub(crate) fn row_to_product(row: &SqliteRow) -> AppResult<Product> {
    let unit: String = row.try_get("unit")?;
    Ok(Product {
        id: ProductId::new(row.try_get("id")?),
        name: row.try_get("name")?,
        unit: IngredientUnit::parse(&unit),
        calories_per_100: parse_decimal(row, "calories_per_100")?,
        protein_per_100: parse_decimal(row, "protein_per_100")?,
        fat_per_100: parse_decimal(row, "fat_per_100")?,
        carbs_per_100: parse_decimal(row, "carbs_per_100")?,
        density_g_per_ml: parse_optional_decimal(row, "density_g_per_ml")?,
        grams_per_piece: parse_optional_decimal(row, "grams_per_piece")?,
    })
}

/// Convert a database row to a `Recipe`
pub(crate) fn row_to_recipe(row: &SqliteRow) -> AppResult<Recipe> {
    Ok(Recipe {
        id: RecipeId::new(row.try_get("id")?),
        author_id: UserId::new(row.try_get("author_id")?),
        title: row.try_get("title")?,
        description: row.try_get("description")?,
        recipe_text: row.try_get("recipe_text")?,
        image: row.try_get("image")?,
        time_minutes: parse_u32(row, "time_minutes")?,
        servings: parse_u32(row, "servings")?,
        is_published: row.try_get("is_published")?,
        created_at: parse_timestamp(row, "created_at")?,
        updated_at: parse_timestamp(row, "updated_at")?,
    })
}

/// Convert a joined ingredient + product row to an `IngredientLine`
///
/// Ingredient columns are expected under `ri_` aliases, product columns
/// under their plain names.
pub(crate) fn row_to_ingredient_line(row: &SqliteRow) -> AppResult<IngredientLine> {
    let unit: String = row.try_get("ri_unit")?;
    let product = row_to_product(row)?;
    Ok(IngredientLine {
        ingredient: RecipeIngredient {
            id: row.try_get("ri_id")?,
            recipe_id: RecipeId::new(row.try_get("ri_recipe_id")?),
            product_id: product.id,
            amount: parse_decimal(row, "ri_amount")?,
            unit: IngredientUnit::parse(&unit),
            note: row.try_get("ri_note")?,
        },
        product,
    })
}

/// Convert a database row to a `Reaction`
pub(crate) fn row_to_reaction(row: &SqliteRow) -> AppResult<Reaction> {
    let value: i64 = row.try_get("value")?;
    Ok(Reaction {
        id: row.try_get("id")?,
        user_id: UserId::new(row.try_get("user_id")?),
        recipe_id: RecipeId::new(row.try_get("recipe_id")?),
        value: ReactionValue::try_from(value)?,
        created_at: parse_timestamp(row, "created_at")?,
        updated_at: parse_timestamp(row, "updated_at")?,
    })
}

/// Convert a database row to a `FoodForumUser`
pub(crate) fn row_to_user(row: &SqliteRow) -> AppResult<FoodForumUser> {
    Ok(FoodForumUser {
        id: UserId::new(row.try_get("id")?),
        username: row.try_get("username")?,
        nickname: row.try_get("nickname")?,
        bio: row.try_get("bio")?,
        avatar: row.try_get("avatar")?,
        reputation: parse_u32(row, "reputation")?,
        is_active_contributor: row.try_get("is_active_contributor")?,
        created_at: parse_timestamp(row, "created_at")?,
    })
}
