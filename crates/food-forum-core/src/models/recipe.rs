// ABOUTME: Recipe and recipe ingredient models with join shapes for computation
// ABOUTME: IngredientLine pairs an ingredient with its product; RecipeWithIngredients groups lines
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Food Forum contributors

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt::{self, Display, Formatter};

use super::bounds::check_stored_decimal;
use super::{IngredientUnit, Product, ProductId, RecipeId, UserId};
use crate::constants::limits::{AMOUNT_MAX_DIGITS, INGREDIENT_NOTE_MAX_LEN, RECIPE_TITLE_MAX_LEN};
use crate::errors::{AppError, AppResult};

/// A published or draft recipe
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Recipe {
    /// Row id
    pub id: RecipeId,
    /// Author
    pub author_id: UserId,
    /// Title
    pub title: String,
    /// Short description
    pub description: String,
    /// Full preparation text
    pub recipe_text: String,
    /// Optional stored image path
    pub image: Option<String>,
    /// Total time in minutes
    pub time_minutes: u32,
    /// Number of servings; zero is tolerated on read and treated as one
    pub servings: u32,
    /// Whether the recipe appears in public listings
    pub is_published: bool,
    /// Creation timestamp
    pub created_at: DateTime<Utc>,
    /// Last update timestamp
    pub updated_at: DateTime<Utc>,
}

impl Display for Recipe {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.write_str(&self.title)
    }
}

/// Fields required to create a [`Recipe`]
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewRecipe {
    /// Title
    pub title: String,
    /// Short description
    pub description: String,
    /// Full preparation text
    pub recipe_text: String,
    /// Optional stored image path
    pub image: Option<String>,
    /// Total time in minutes
    pub time_minutes: u32,
    /// Number of servings
    pub servings: u32,
    /// Publish immediately
    pub is_published: bool,
}

impl NewRecipe {
    /// Published recipe with one serving and no description
    pub fn new(title: impl Into<String>, recipe_text: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            description: String::new(),
            recipe_text: recipe_text.into(),
            image: None,
            time_minutes: 0,
            servings: 1,
            is_published: true,
        }
    }

    /// Validate field constraints before insertion
    ///
    /// # Errors
    ///
    /// Returns `InvalidInput` for an empty or overlong title, empty recipe
    /// text, or fewer than one serving.
    pub fn validate(&self) -> AppResult<()> {
        let title = self.title.trim();
        if title.is_empty() || title.chars().count() > RECIPE_TITLE_MAX_LEN {
            return Err(AppError::invalid_input(format!(
                "Recipe title must be 1-{RECIPE_TITLE_MAX_LEN} characters"
            )));
        }
        if self.recipe_text.trim().is_empty() {
            return Err(AppError::invalid_input("Recipe text is required"));
        }
        if self.servings < 1 {
            return Err(AppError::invalid_input("Servings must be at least 1"));
        }
        Ok(())
    }
}

/// A quantified use of one product within one recipe
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecipeIngredient {
    /// Row id
    pub id: i64,
    /// Owning recipe
    pub recipe_id: RecipeId,
    /// Referenced product
    pub product_id: ProductId,
    /// Quantity in `unit`
    pub amount: Decimal,
    /// Unit of `amount`
    pub unit: IngredientUnit,
    /// Free-text note such as "chopped"
    pub note: String,
}

/// Fields required to add an ingredient to a recipe
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewRecipeIngredient {
    /// Referenced product
    pub product_id: ProductId,
    /// Quantity in `unit`
    pub amount: Decimal,
    /// Unit of `amount`
    pub unit: IngredientUnit,
    /// Free-text note
    pub note: String,
}

impl NewRecipeIngredient {
    /// Ingredient line without a note
    #[must_use]
    pub const fn new(product_id: ProductId, amount: Decimal, unit: IngredientUnit) -> Self {
        Self {
            product_id,
            amount,
            unit,
            note: String::new(),
        }
    }

    /// Attach a note
    #[must_use]
    pub fn with_note(mut self, note: impl Into<String>) -> Self {
        self.note = note.into();
        self
    }

    /// Validate field constraints before insertion
    ///
    /// # Errors
    ///
    /// Returns `InvalidInput` for a negative amount, an unknown unit code, or
    /// an overlong note, and `ValueOutOfRange` for an amount beyond 8 integer
    /// digits or 2 decimal places.
    pub fn validate(&self) -> AppResult<()> {
        check_stored_decimal("amount", self.amount, AMOUNT_MAX_DIGITS)?;
        if let IngredientUnit::Other(code) = &self.unit {
            return Err(AppError::invalid_input(format!(
                "Unsupported ingredient unit '{code}'"
            )));
        }
        if self.note.chars().count() > INGREDIENT_NOTE_MAX_LEN {
            return Err(AppError::invalid_input(format!(
                "Ingredient note must be at most {INGREDIENT_NOTE_MAX_LEN} characters"
            )));
        }
        Ok(())
    }
}

/// An ingredient joined with its product, the unit of nutrition computation
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IngredientLine {
    /// The ingredient row
    pub ingredient: RecipeIngredient,
    /// The referenced product
    pub product: Product,
}

impl Display for IngredientLine {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}: {} {}",
            self.product.name, self.ingredient.amount, self.ingredient.unit
        )
    }
}

/// A recipe with every ingredient line join-fetched
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecipeWithIngredients {
    /// The recipe row
    pub recipe: Recipe,
    /// Its ingredient lines
    pub ingredients: Vec<IngredientLine>,
}

impl RecipeWithIngredients {
    /// Ids of all products the recipe uses
    pub fn product_ids(&self) -> impl Iterator<Item = ProductId> + '_ {
        self.ingredients.iter().map(|line| line.product.id)
    }
}
