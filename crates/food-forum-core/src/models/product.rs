// ABOUTME: Product catalog model with per-100g macros and conversion factors
// ABOUTME: Defines IngredientUnit codes shared by products and recipe ingredient lines
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Food Forum contributors

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt::{self, Display, Formatter};

use super::bounds::check_stored_decimal;
use super::ProductId;
use crate::constants::limits::{DENSITY_MAX_DIGITS, NUTRIENT_MAX_DIGITS, PRODUCT_NAME_MAX_LEN};
use crate::errors::{AppError, AppResult};

/// Measurement unit of an amount
///
/// Stored as the short codes `g`, `ml` and `pcs`. Any other stored code is
/// kept verbatim in [`IngredientUnit::Other`] so that it round-trips and can
/// fall back to a plain pass-through during conversion.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(from = "String", into = "String")]
pub enum IngredientUnit {
    /// Mass in grams (base unit)
    #[default]
    Grams,
    /// Volume in milliliters
    Milliliters,
    /// Count of whole items
    Pieces,
    /// Unrecognized stored code
    Other(String),
}

impl IngredientUnit {
    /// Parse a stored unit code
    #[must_use]
    pub fn parse(code: &str) -> Self {
        match code {
            "g" => Self::Grams,
            "ml" => Self::Milliliters,
            "pcs" => Self::Pieces,
            other => Self::Other(other.to_owned()),
        }
    }

    /// Stored unit code
    #[must_use]
    pub fn code(&self) -> &str {
        match self {
            Self::Grams => "g",
            Self::Milliliters => "ml",
            Self::Pieces => "pcs",
            Self::Other(code) => code,
        }
    }

    /// Human-readable label
    #[must_use]
    pub fn label(&self) -> &str {
        match self {
            Self::Grams => "grams",
            Self::Milliliters => "milliliters",
            Self::Pieces => "pieces",
            Self::Other(code) => code,
        }
    }

    /// Check if this unit is a mass measurement
    #[must_use]
    pub const fn is_mass(&self) -> bool {
        matches!(self, Self::Grams)
    }

    /// Check if this unit is a volume measurement
    #[must_use]
    pub const fn is_volume(&self) -> bool {
        matches!(self, Self::Milliliters)
    }

    /// Check if this unit is a count
    #[must_use]
    pub const fn is_count(&self) -> bool {
        matches!(self, Self::Pieces)
    }
}

impl From<String> for IngredientUnit {
    fn from(code: String) -> Self {
        Self::parse(&code)
    }
}

impl From<IngredientUnit> for String {
    fn from(unit: IngredientUnit) -> Self {
        unit.code().to_owned()
    }
}

impl Display for IngredientUnit {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

/// A named ingredient type with nutrition facts
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Product {
    /// Row id
    pub id: ProductId,
    /// Unique display name
    pub name: String,
    /// Unit the product is usually measured in
    pub unit: IngredientUnit,
    /// Kilocalories per 100 g
    pub calories_per_100: Decimal,
    /// Protein grams per 100 g
    pub protein_per_100: Decimal,
    /// Fat grams per 100 g
    pub fat_per_100: Decimal,
    /// Carbohydrate grams per 100 g
    pub carbs_per_100: Decimal,
    /// Grams per milliliter, needed for volume amounts
    pub density_g_per_ml: Option<Decimal>,
    /// Grams per piece, needed for count amounts
    pub grams_per_piece: Option<Decimal>,
}

impl Display for Product {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.name, self.unit)
    }
}

/// Fields required to create a [`Product`]
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewProduct {
    /// Unique display name
    pub name: String,
    /// Unit the product is usually measured in
    pub unit: IngredientUnit,
    /// Kilocalories per 100 g
    pub calories_per_100: Decimal,
    /// Protein grams per 100 g
    pub protein_per_100: Decimal,
    /// Fat grams per 100 g
    pub fat_per_100: Decimal,
    /// Carbohydrate grams per 100 g
    pub carbs_per_100: Decimal,
    /// Grams per milliliter
    pub density_g_per_ml: Option<Decimal>,
    /// Grams per piece
    pub grams_per_piece: Option<Decimal>,
}

impl NewProduct {
    /// Product with macros only; conversion factors can be added with the builders
    pub fn new(
        name: impl Into<String>,
        unit: IngredientUnit,
        calories_per_100: Decimal,
        protein_per_100: Decimal,
        fat_per_100: Decimal,
        carbs_per_100: Decimal,
    ) -> Self {
        Self {
            name: name.into(),
            unit,
            calories_per_100,
            protein_per_100,
            fat_per_100,
            carbs_per_100,
            density_g_per_ml: None,
            grams_per_piece: None,
        }
    }

    /// Set the density used for volume amounts
    #[must_use]
    pub fn with_density(mut self, grams_per_ml: Decimal) -> Self {
        self.density_g_per_ml = Some(grams_per_ml);
        self
    }

    /// Set the piece weight used for count amounts
    #[must_use]
    pub fn with_piece_weight(mut self, grams_per_piece: Decimal) -> Self {
        self.grams_per_piece = Some(grams_per_piece);
        self
    }

    /// Validate field constraints before insertion
    ///
    /// # Errors
    ///
    /// Returns `InvalidInput` for an empty or overlong name, an unknown unit
    /// code, or any negative macro or conversion factor. Returns
    /// `ValueOutOfRange` when a value exceeds its stored precision: macros
    /// and piece weight allow 4 integer digits, density 3, all with 2 places.
    pub fn validate(&self) -> AppResult<()> {
        let name = self.name.trim();
        if name.is_empty() || name.chars().count() > PRODUCT_NAME_MAX_LEN {
            return Err(AppError::invalid_input(format!(
                "Product name must be 1-{PRODUCT_NAME_MAX_LEN} characters"
            )));
        }
        if let IngredientUnit::Other(code) = &self.unit {
            return Err(AppError::invalid_input(format!(
                "Unsupported product unit '{code}'"
            )));
        }

        let facts = [
            ("calories_per_100", Some(self.calories_per_100), NUTRIENT_MAX_DIGITS),
            ("protein_per_100", Some(self.protein_per_100), NUTRIENT_MAX_DIGITS),
            ("fat_per_100", Some(self.fat_per_100), NUTRIENT_MAX_DIGITS),
            ("carbs_per_100", Some(self.carbs_per_100), NUTRIENT_MAX_DIGITS),
            ("density_g_per_ml", self.density_g_per_ml, DENSITY_MAX_DIGITS),
            ("grams_per_piece", self.grams_per_piece, NUTRIENT_MAX_DIGITS),
        ];
        for (field, value, max_digits) in facts {
            if let Some(value) = value {
                check_stored_decimal(field, value, max_digits)?;
            }
        }
        Ok(())
    }
}
