// ABOUTME: Nutrition computation for ingredient lines, recipe totals, and servings
// ABOUTME: Sums unrounded per-ingredient macros and rounds totals once to two decimal places
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Food Forum contributors

//! # Nutrition Calculator
//!
//! Product macros are stored per 100 g. An ingredient contributes
//! `per_100 × grams / 100` of each macro. Recipe totals add the exact
//! contributions and round each component once, with banker's rounding, to
//! two decimal places. Per-serving values divide the rounded totals by the
//! serving count (at least one) and round again.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use tracing::warn;

use super::conversion::{grams, overflow};
use crate::config::MissingFactorPolicy;
use crate::constants::nutrition::{REFERENCE_MASS_GRAMS, REPORT_DECIMAL_PLACES};
use crate::errors::ConversionError;
use crate::models::{IngredientLine, ProductId, RecipeWithIngredients};

/// Protein, fat, carbohydrate grams and kilocalories
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Macros {
    /// Protein in grams
    pub protein: Decimal,
    /// Fat in grams
    pub fat: Decimal,
    /// Carbohydrates in grams
    pub carbs: Decimal,
    /// Energy in kilocalories
    pub kcal: Decimal,
}

impl Macros {
    /// All components zero
    pub const ZERO: Self = Self {
        protein: Decimal::ZERO,
        fat: Decimal::ZERO,
        carbs: Decimal::ZERO,
        kcal: Decimal::ZERO,
    };

    /// Each component rounded half-to-even to `dp` places
    #[must_use]
    pub fn round_dp(self, dp: u32) -> Self {
        Self {
            protein: self.protein.round_dp(dp),
            fat: self.fat.round_dp(dp),
            carbs: self.carbs.round_dp(dp),
            kcal: self.kcal.round_dp(dp),
        }
    }

    /// Component-wise sum, or `None` if any component overflows
    #[must_use]
    pub fn checked_add(self, rhs: Self) -> Option<Self> {
        Some(Self {
            protein: self.protein.checked_add(rhs.protein)?,
            fat: self.fat.checked_add(rhs.fat)?,
            carbs: self.carbs.checked_add(rhs.carbs)?,
            kcal: self.kcal.checked_add(rhs.kcal)?,
        })
    }

    /// Each component divided by `divisor`
    #[must_use]
    pub fn divide(self, divisor: Decimal) -> Self {
        Self {
            protein: self.protein / divisor,
            fat: self.fat / divisor,
            carbs: self.carbs / divisor,
            kcal: self.kcal / divisor,
        }
    }
}

/// An ingredient left out of a total because it could not be converted
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SkippedIngredient {
    /// Product of the skipped line
    pub product_id: ProductId,
    /// Product name
    pub product: String,
    /// Why it was skipped
    pub error: ConversionError,
}

/// Recipe nutrition together with the ingredients that were left out
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecipeNutrition {
    /// Rounded values
    pub totals: Macros,
    /// Ingredients excluded from `totals`
    pub skipped: Vec<SkippedIngredient>,
}

impl RecipeNutrition {
    /// Whether every ingredient contributed
    #[must_use]
    pub fn is_complete(&self) -> bool {
        self.skipped.is_empty()
    }
}

/// Unrounded macros contributed by one ingredient line
///
/// # Errors
///
/// Returns a conversion error when the line cannot be expressed in grams or
/// a contribution overflows the decimal range.
pub fn nutrition(line: &IngredientLine) -> Result<Macros, ConversionError> {
    let mass = grams(line)?;
    let product = &line.product;
    let per_reference = |per_100: Decimal| {
        per_100
            .checked_mul(mass)
            .map(|scaled| scaled / Decimal::from(REFERENCE_MASS_GRAMS))
            .ok_or_else(|| overflow(product))
    };
    Ok(Macros {
        protein: per_reference(product.protein_per_100)?,
        fat: per_reference(product.fat_per_100)?,
        carbs: per_reference(product.carbs_per_100)?,
        kcal: per_reference(product.calories_per_100)?,
    })
}

/// Whole-recipe nutrition, rounded once after summation
///
/// # Errors
///
/// With [`MissingFactorPolicy::Abort`], returns the first conversion error.
/// With [`MissingFactorPolicy::SkipAndFlag`] this never fails; unconvertible
/// lines, and lines that would push a total past the decimal range, are
/// listed in [`RecipeNutrition::skipped`].
pub fn nutrition_total(
    recipe: &RecipeWithIngredients,
    policy: MissingFactorPolicy,
) -> Result<RecipeNutrition, ConversionError> {
    let mut sum = Macros::ZERO;
    let mut skipped = Vec::new();

    for line in &recipe.ingredients {
        let added = nutrition(line)
            .and_then(|macros| sum.checked_add(macros).ok_or_else(|| overflow(&line.product)));
        match added {
            Ok(next) => sum = next,
            Err(error) => match policy {
                MissingFactorPolicy::Abort => return Err(error),
                MissingFactorPolicy::SkipAndFlag => {
                    warn!(
                        recipe_id = %recipe.recipe.id,
                        product_id = %line.product.id,
                        error = %error,
                        "Skipping ingredient in nutrition total"
                    );
                    skipped.push(SkippedIngredient {
                        product_id: line.product.id,
                        product: line.product.name.clone(),
                        error,
                    });
                }
            },
        }
    }

    Ok(RecipeNutrition {
        totals: sum.round_dp(REPORT_DECIMAL_PLACES),
        skipped,
    })
}

/// Rounded totals divided by `max(servings, 1)`, rounded again
#[must_use]
pub fn per_serving(totals: Macros, servings: u32) -> Macros {
    totals
        .divide(Decimal::from(servings.max(1)))
        .round_dp(REPORT_DECIMAL_PLACES)
}

/// Per-serving nutrition of a recipe
///
/// # Errors
///
/// Same as [`nutrition_total`].
pub fn nutrition_per_serving(
    recipe: &RecipeWithIngredients,
    policy: MissingFactorPolicy,
) -> Result<RecipeNutrition, ConversionError> {
    let total = nutrition_total(recipe, policy)?;
    Ok(RecipeNutrition {
        totals: per_serving(total.totals, recipe.recipe.servings),
        skipped: total.skipped,
    })
}
