// ABOUTME: Unit conversion error types for ingredient-to-grams computation
// ABOUTME: Raised for a missing conversion factor or a value beyond decimal range
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Food Forum contributors

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Product fact needed to turn a non-mass amount into grams
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ConversionFactor {
    /// Grams per milliliter, used for volume units
    Density,
    /// Grams per piece, used for count units
    PieceWeight,
}

impl ConversionFactor {
    /// Column name of the factor on the product record
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Density => "density_g_per_ml",
            Self::PieceWeight => "grams_per_piece",
        }
    }
}

/// Conversion error types
#[non_exhaustive]
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConversionError {
    /// The product has no value for the factor the ingredient's unit needs
    #[error("Product '{product}' missing '{}' value", factor.as_str())]
    MissingConversionFactor {
        /// Product name
        product: String,
        /// Which factor is absent
        factor: ConversionFactor,
    },

    /// Converted mass or a macro contribution does not fit a decimal
    #[error("Nutrition of product '{product}' is out of range")]
    ValueOverflow {
        /// Product name
        product: String,
    },
}
