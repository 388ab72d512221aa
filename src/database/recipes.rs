// ABOUTME: Database operations for recipes, their ingredient lines, and catalog listings
// ABOUTME: Join-fetches ingredients with products and pushes filters and keyset paging into SQL
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Food Forum contributors

use std::collections::{BTreeMap, HashMap};

use serde::{Deserialize, Serialize};
use sqlx::{sqlite::SqliteRow, QueryBuilder, Row, Sqlite, SqlitePool};
use tracing::debug;

use super::mappers::{
    column_count, format_timestamp, now, row_to_ingredient_line, row_to_recipe, PRODUCT_COLUMNS,
    RECIPE_COLUMNS,
};
use crate::errors::{AppError, AppResult, DatabaseError};
use crate::intelligence::{PantryQuery, RatingSummary};
use crate::models::{
    IngredientLine, NewRecipe, NewRecipeIngredient, ProductId, Recipe, RecipeId,
    RecipeIngredient, RecipeWithIngredients, UserId,
};
use crate::pagination::{Cursor, CursorPage, PageRequest};

/// Ids bound into one `IN (...)` list; SQLite caps host parameters per statement
const ID_BATCH_SIZE: usize = 500;

const INGREDIENT_LINE_SELECT: &str = "SELECT ri.id AS ri_id, ri.recipe_id AS ri_recipe_id, \
     ri.amount AS ri_amount, ri.unit AS ri_unit, ri.note AS ri_note, ";

/// Catalog search criteria
///
/// A recipe matches when its title contains `text` (ASCII case-insensitive)
/// or it uses any of `product_ids`. With neither criterion every published
/// recipe matches.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CatalogQuery {
    /// Title substring
    pub text: Option<String>,
    /// Products of interest
    pub product_ids: Vec<ProductId>,
}

impl CatalogQuery {
    /// Search by title substring
    pub fn text(text: impl Into<String>) -> Self {
        Self {
            text: Some(text.into()),
            product_ids: Vec::new(),
        }
    }

    /// Search by used products
    pub fn products(product_ids: impl IntoIterator<Item = ProductId>) -> Self {
        Self {
            text: None,
            product_ids: product_ids.into_iter().collect(),
        }
    }

    fn search_text(&self) -> Option<&str> {
        self.text.as_deref().map(str::trim).filter(|t| !t.is_empty())
    }
}

/// A recipe with its vote aggregates
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RatedRecipe {
    /// The recipe
    pub recipe: Recipe,
    /// Aggregated votes
    pub rating: RatingSummary,
}

/// Database manager for recipes and ingredient lines
pub struct RecipeManager {
    pool: SqlitePool,
}

impl RecipeManager {
    /// Create a new recipe manager
    #[must_use]
    pub const fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    // ========================================================================
    // Recipe Rows
    // ========================================================================

    /// Insert a recipe authored by `author`
    ///
    /// # Errors
    ///
    /// Returns `InvalidInput` for invalid fields, `ResourceNotFound` for an
    /// unknown author, or a database error
    pub async fn create(&self, author: UserId, recipe: &NewRecipe) -> AppResult<Recipe> {
        recipe.validate()?;
        let created_at = now();
        let stamp = format_timestamp(created_at);
        let title = recipe.title.trim();

        let result = sqlx::query(
            r"
            INSERT INTO recipes (author_id, title, description, recipe_text, image,
                                 time_minutes, servings, is_published, created_at, updated_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $9)
            ",
        )
        .bind(author.get())
        .bind(title)
        .bind(&recipe.description)
        .bind(&recipe.recipe_text)
        .bind(recipe.image.as_deref())
        .bind(i64::from(recipe.time_minutes))
        .bind(i64::from(recipe.servings))
        .bind(recipe.is_published)
        .bind(&stamp)
        .execute(&self.pool)
        .await
        .map_err(|e| match DatabaseError::from_sqlx("create recipe", e) {
            DatabaseError::ForeignKeyViolation { .. } => {
                AppError::not_found(format!("User {author}"))
            }
            other => other.into(),
        })?;

        let id = RecipeId::new(result.last_insert_rowid());
        debug!(recipe_id = %id, author_id = %author, "Recipe created");

        Ok(Recipe {
            id,
            author_id: author,
            title: title.to_owned(),
            description: recipe.description.clone(),
            recipe_text: recipe.recipe_text.clone(),
            image: recipe.image.clone(),
            time_minutes: recipe.time_minutes,
            servings: recipe.servings,
            is_published: recipe.is_published,
            created_at,
            updated_at: created_at,
        })
    }

    /// Get a recipe by ID
    ///
    /// # Errors
    ///
    /// Returns an error if the database operation fails
    pub async fn get(&self, id: RecipeId) -> AppResult<Option<Recipe>> {
        let row = sqlx::query(&format!("SELECT {RECIPE_COLUMNS} FROM recipes r WHERE r.id = $1"))
            .bind(id.get())
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| AppError::database(format!("Failed to get recipe: {e}")))?;

        row.map(|r| row_to_recipe(&r)).transpose()
    }

    /// Delete a recipe together with its ingredients, reactions, and bookmarks
    ///
    /// # Errors
    ///
    /// Returns `ResourceNotFound` if the recipe does not exist
    pub async fn delete(&self, id: RecipeId) -> AppResult<()> {
        let result = sqlx::query("DELETE FROM recipes WHERE id = $1")
            .bind(id.get())
            .execute(&self.pool)
            .await
            .map_err(|e| AppError::from(DatabaseError::from_sqlx("delete recipe", e)))?;

        if result.rows_affected() == 0 {
            return Err(AppError::not_found(format!("Recipe {id}")));
        }
        debug!(recipe_id = %id, "Recipe deleted");
        Ok(())
    }

    /// Number of recipes written by `author`, drafts included
    ///
    /// # Errors
    ///
    /// Returns an error if the database operation fails
    pub async fn count_by_author(&self, author: UserId) -> AppResult<u64> {
        let row = sqlx::query("SELECT COUNT(*) AS total FROM recipes WHERE author_id = $1")
            .bind(author.get())
            .fetch_one(&self.pool)
            .await
            .map_err(|e| AppError::database(format!("Failed to count recipes: {e}")))?;

        column_count(&row, "total")
    }

    // ========================================================================
    // Ingredient Lines
    // ========================================================================

    /// Add an ingredient line to a recipe
    ///
    /// # Errors
    ///
    /// Returns `ResourceAlreadyExists` if the recipe already uses the product,
    /// `ResourceNotFound` for an unknown recipe or product, or `InvalidInput`
    pub async fn add_ingredient(
        &self,
        recipe_id: RecipeId,
        ingredient: &NewRecipeIngredient,
    ) -> AppResult<RecipeIngredient> {
        ingredient.validate()?;
        let product_id = ingredient.product_id;

        let result = sqlx::query(
            r"
            INSERT INTO recipe_ingredients (recipe_id, product_id, amount, unit, note)
            VALUES ($1, $2, $3, $4, $5)
            ",
        )
        .bind(recipe_id.get())
        .bind(product_id.get())
        .bind(ingredient.amount.to_string())
        .bind(ingredient.unit.code())
        .bind(&ingredient.note)
        .execute(&self.pool)
        .await
        .map_err(|e| match DatabaseError::from_sqlx("add ingredient", e) {
            DatabaseError::UniqueViolation { .. } => AppError::already_exists(format!(
                "Product {product_id} in recipe {recipe_id}"
            )),
            DatabaseError::ForeignKeyViolation { .. } => AppError::not_found(format!(
                "Recipe {recipe_id} or product {product_id}"
            )),
            other => other.into(),
        })?;

        Ok(RecipeIngredient {
            id: result.last_insert_rowid(),
            recipe_id,
            product_id,
            amount: ingredient.amount,
            unit: ingredient.unit.clone(),
            note: ingredient.note.clone(),
        })
    }

    /// Ingredient lines of one recipe, each joined with its product
    ///
    /// # Errors
    ///
    /// Returns an error if the database operation fails
    pub async fn ingredients_with_products(
        &self,
        recipe_id: RecipeId,
    ) -> AppResult<Vec<IngredientLine>> {
        let rows = sqlx::query(&format!(
            "{INGREDIENT_LINE_SELECT}{PRODUCT_COLUMNS} \
             FROM recipe_ingredients ri JOIN products p ON p.id = ri.product_id \
             WHERE ri.recipe_id = $1 ORDER BY ri.id ASC"
        ))
        .bind(recipe_id.get())
        .fetch_all(&self.pool)
        .await
        .map_err(|e| AppError::database(format!("Failed to get recipe ingredients: {e}")))?;

        rows.iter().map(row_to_ingredient_line).collect()
    }

    /// A recipe with every ingredient line join-fetched
    ///
    /// # Errors
    ///
    /// Returns an error if the database operation fails
    pub async fn with_ingredients(&self, id: RecipeId) -> AppResult<Option<RecipeWithIngredients>> {
        let Some(recipe) = self.get(id).await? else {
            return Ok(None);
        };
        let ingredients = self.ingredients_with_products(id).await?;
        Ok(Some(RecipeWithIngredients {
            recipe,
            ingredients,
        }))
    }

    /// Attach ingredient lines to many recipes, one query per id batch
    ///
    /// # Errors
    ///
    /// Returns an error if the database operation fails
    pub async fn attach_ingredients(
        &self,
        recipes: Vec<Recipe>,
    ) -> AppResult<Vec<RecipeWithIngredients>> {
        let ids: Vec<i64> = recipes.iter().map(|recipe| recipe.id.get()).collect();
        let mut by_recipe: HashMap<RecipeId, Vec<IngredientLine>> = HashMap::new();

        for batch in ids.chunks(ID_BATCH_SIZE) {
            let mut qb = QueryBuilder::<Sqlite>::new(format!(
                "{INGREDIENT_LINE_SELECT}{PRODUCT_COLUMNS} \
                 FROM recipe_ingredients ri JOIN products p ON p.id = ri.product_id \
                 WHERE ri.recipe_id IN ("
            ));
            {
                let mut bound = qb.separated(", ");
                for id in batch {
                    bound.push_bind(*id);
                }
            }
            qb.push(") ORDER BY ri.recipe_id ASC, ri.id ASC");

            let rows = qb.build().fetch_all(&self.pool).await.map_err(|e| {
                AppError::database(format!("Failed to load recipe ingredients: {e}"))
            })?;
            for row in &rows {
                let line = row_to_ingredient_line(row)?;
                by_recipe
                    .entry(line.ingredient.recipe_id)
                    .or_default()
                    .push(line);
            }
        }
        debug!(recipes = ids.len(), "Attached ingredient lines");

        Ok(recipes
            .into_iter()
            .map(|recipe| RecipeWithIngredients {
                ingredients: by_recipe.remove(&recipe.id).unwrap_or_default(),
                recipe,
            })
            .collect())
    }

    /// Recipes to rank against a pantry, ordered by id
    ///
    /// With `require_overlap` only recipes using at least one available
    /// product are loaded.
    ///
    /// # Errors
    ///
    /// Returns an error if the database operation fails
    pub async fn pantry_candidates(
        &self,
        query: &PantryQuery,
    ) -> AppResult<Vec<RecipeWithIngredients>> {
        if query.require_overlap && query.available.is_empty() {
            return Ok(Vec::new());
        }

        let recipes = if query.require_overlap {
            let mut available: Vec<i64> = query.available.iter().map(|id| id.get()).collect();
            available.sort_unstable();
            // A recipe can overlap several batches
            let mut found: BTreeMap<RecipeId, Recipe> = BTreeMap::new();
            for batch in available.chunks(ID_BATCH_SIZE) {
                let mut qb = candidate_select(query.published_only);
                qb.push(" AND");
                push_uses_any_product(&mut qb, batch);
                for recipe in self.fetch_candidates(qb).await? {
                    found.insert(recipe.id, recipe);
                }
            }
            found.into_values().collect()
        } else {
            self.fetch_candidates(candidate_select(query.published_only)).await?
        };

        self.attach_ingredients(recipes).await
    }

    async fn fetch_candidates(&self, mut qb: QueryBuilder<'_, Sqlite>) -> AppResult<Vec<Recipe>> {
        qb.push(" ORDER BY r.id ASC");
        let rows = qb
            .build()
            .fetch_all(&self.pool)
            .await
            .map_err(|e| AppError::database(format!("Failed to load pantry candidates: {e}")))?;
        rows.iter().map(row_to_recipe).collect()
    }

    // ========================================================================
    // Catalog Listings
    // ========================================================================

    /// Published recipes with the highest rating, newest first on ties
    ///
    /// # Errors
    ///
    /// Returns an error if the database operation fails
    pub async fn top_rated(&self, limit: usize) -> AppResult<Vec<RatedRecipe>> {
        let rows = sqlx::query(&format!(
            r"
            SELECT {RECIPE_COLUMNS},
                   COALESCE(SUM(x.value), 0) AS score,
                   COUNT(CASE WHEN x.value = 1 THEN 1 END) AS likes,
                   COUNT(CASE WHEN x.value = -1 THEN 1 END) AS dislikes
            FROM recipes r
            LEFT JOIN reactions x ON x.recipe_id = r.id
            WHERE r.is_published = 1
            GROUP BY r.id
            ORDER BY score DESC, r.created_at DESC, r.id DESC
            LIMIT $1
            "
        ))
        .bind(sql_limit(limit))
        .fetch_all(&self.pool)
        .await
        .map_err(|e| AppError::database(format!("Failed to list top rated recipes: {e}")))?;

        rows.iter()
            .map(|row| -> AppResult<RatedRecipe> {
                Ok(RatedRecipe {
                    recipe: row_to_recipe(row)?,
                    rating: rating_columns(row)?,
                })
            })
            .collect()
    }

    /// Published recipes matching a catalog query, newest first
    ///
    /// # Errors
    ///
    /// Returns `InvalidInput` for a malformed cursor or a database error
    pub async fn search(
        &self,
        query: &CatalogQuery,
        page: &PageRequest,
    ) -> AppResult<CursorPage<Recipe>> {
        let mut qb = QueryBuilder::<Sqlite>::new(format!(
            "SELECT {RECIPE_COLUMNS} FROM recipes r WHERE r.is_published = 1"
        ));

        let text = query.search_text();
        if text.is_some() || !query.product_ids.is_empty() {
            qb.push(" AND (");
            if let Some(text) = text {
                qb.push("r.title LIKE ")
                    .push_bind(like_pattern(text))
                    .push(" ESCAPE '\\'");
            }
            if !query.product_ids.is_empty() {
                if text.is_some() {
                    qb.push(" OR");
                }
                let ids: Vec<i64> = query.product_ids.iter().map(|id| id.get()).collect();
                push_uses_any_product(&mut qb, &ids);
            }
            qb.push(")");
        }

        self.fetch_page(qb, page, "search recipes").await
    }

    /// Published recipes of one author, newest first
    ///
    /// # Errors
    ///
    /// Returns `InvalidInput` for a malformed cursor or a database error
    pub async fn by_author(
        &self,
        author: UserId,
        page: &PageRequest,
    ) -> AppResult<CursorPage<Recipe>> {
        let mut qb = QueryBuilder::<Sqlite>::new(format!(
            "SELECT {RECIPE_COLUMNS} FROM recipes r WHERE r.is_published = 1 AND r.author_id = "
        ));
        qb.push_bind(author.get());

        self.fetch_page(qb, page, "list author recipes").await
    }

    /// Apply the keyset cursor, order, and over-fetch limit, then run
    async fn fetch_page(
        &self,
        mut qb: QueryBuilder<'_, Sqlite>,
        page: &PageRequest,
        operation: &str,
    ) -> AppResult<CursorPage<Recipe>> {
        let limit = page.effective_limit();

        if let Some(cursor) = &page.cursor {
            let (created_at, id) = cursor
                .decode()
                .ok_or_else(|| AppError::invalid_input("Invalid pagination cursor"))?;
            let stamp = format_timestamp(created_at);
            qb.push(" AND (r.created_at < ")
                .push_bind(stamp.clone())
                .push(" OR (r.created_at = ")
                .push_bind(stamp)
                .push(" AND r.id < ")
                .push_bind(id)
                .push("))");
        }
        qb.push(" ORDER BY r.created_at DESC, r.id DESC LIMIT ")
            .push_bind(sql_limit(limit + 1));

        let rows = qb
            .build()
            .fetch_all(&self.pool)
            .await
            .map_err(|e| AppError::database(format!("Failed to {operation}: {e}")))?;
        let recipes = rows.iter().map(row_to_recipe).collect::<AppResult<Vec<_>>>()?;

        Ok(CursorPage::from_overfetch(recipes, limit, |recipe| {
            Cursor::new(recipe.created_at, recipe.id.get())
        }))
    }
}

/// Recipe select for pantry ranking, optionally limited to published rows
fn candidate_select(published_only: bool) -> QueryBuilder<'static, Sqlite> {
    let mut qb =
        QueryBuilder::<Sqlite>::new(format!("SELECT {RECIPE_COLUMNS} FROM recipes r WHERE 1 = 1"));
    if published_only {
        qb.push(" AND r.is_published = 1");
    }
    qb
}

/// Condition matching recipes that use any of `product_ids`
fn push_uses_any_product(qb: &mut QueryBuilder<'_, Sqlite>, product_ids: &[i64]) {
    qb.push(
        " EXISTS (SELECT 1 FROM recipe_ingredients ri \
         WHERE ri.recipe_id = r.id AND ri.product_id IN (",
    );
    {
        let mut ids = qb.separated(", ");
        for id in product_ids {
            ids.push_bind(*id);
        }
    }
    qb.push("))");
}

/// `%text%` with LIKE wildcards escaped
fn like_pattern(text: &str) -> String {
    let escaped = text
        .replace('\\', "\\\\")
        .replace('%', "\\%")
        .replace('_', "\\_");
    format!("%{escaped}%")
}

fn sql_limit(limit: usize) -> i64 {
    i64::try_from(limit).unwrap_or(i64::MAX)
}

fn rating_columns(row: &SqliteRow) -> AppResult<RatingSummary> {
    Ok(RatingSummary {
        score: row.try_get("score")?,
        likes: column_count(row, "likes")?,
        dislikes: column_count(row, "dislikes")?,
    })
}
