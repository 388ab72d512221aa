// ABOUTME: Unit conversion of recipe ingredient amounts into grams
// ABOUTME: Uses the product's density for volumes and piece weight for counts
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Food Forum contributors

use rust_decimal::Decimal;

use crate::errors::{ConversionError, ConversionFactor};
use crate::models::{IngredientLine, IngredientUnit, Product};

/// Convert an ingredient line's amount to grams
///
/// - `g`: the amount unchanged
/// - `ml`: amount × the product's density
/// - `pcs`: amount × the product's piece weight
/// - any unrecognized stored unit: the raw amount unchanged
///
/// # Errors
///
/// Returns [`ConversionError::MissingConversionFactor`] when a volume or
/// count line references a product without the matching factor, and
/// [`ConversionError::ValueOverflow`] when the product exceeds the decimal range.
pub fn grams(line: &IngredientLine) -> Result<Decimal, ConversionError> {
    to_grams(line.ingredient.amount, &line.ingredient.unit, &line.product)
}

/// Convert an amount in `unit` of `product` to grams
///
/// # Errors
///
/// See [`grams`].
pub fn to_grams(
    amount: Decimal,
    unit: &IngredientUnit,
    product: &Product,
) -> Result<Decimal, ConversionError> {
    let factor = match unit {
        IngredientUnit::Grams | IngredientUnit::Other(_) => return Ok(amount),
        IngredientUnit::Milliliters => product
            .density_g_per_ml
            .ok_or_else(|| missing(product, ConversionFactor::Density))?,
        IngredientUnit::Pieces => product
            .grams_per_piece
            .ok_or_else(|| missing(product, ConversionFactor::PieceWeight))?,
    };
    amount.checked_mul(factor).ok_or_else(|| overflow(product))
}

fn missing(product: &Product, factor: ConversionFactor) -> ConversionError {
    ConversionError::MissingConversionFactor {
        product: product.name.clone(),
        factor,
    }
}

pub(super) fn overflow(product: &Product) -> ConversionError {
    ConversionError::ValueOverflow {
        product: product.name.clone(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::ProductId;

    fn dec(s: &str) -> Decimal {
        s.parse().unwrap()
    }

    fn product(density: Option<&str>, piece: Option<&str>) -> Product {
        Product {
            id: ProductId::new(1),
            name: "Egg".to_owned(),
            unit: IngredientUnit::Pieces,
            calories_per_100: dec("143"),
            protein_per_100: dec("12.6"),
            fat_per_100: dec("9.5"),
            carbs_per_100: dec("0.7"),
            density_g_per_ml: density.map(dec),
            grams_per_piece: piece.map(dec),
        }
    }

    #[test]
    fn test_other_unit_passes_amount_through() {
        let p = product(None, None);
        let unit = IngredientUnit::parse("tbsp");
        assert_eq!(to_grams(dec("3"), &unit, &p).unwrap(), dec("3"));
    }

    #[test]
    fn test_missing_density_reports_product_and_factor() {
        let p = product(None, Some("50"));
        let error = to_grams(dec("10"), &IngredientUnit::Milliliters, &p).unwrap_err();
        assert_eq!(
            error,
            ConversionError::MissingConversionFactor {
                product: "Egg".to_owned(),
                factor: ConversionFactor::Density,
            }
        );
    }

    #[test]
    fn test_oversized_volume_reports_overflow() {
        let mut p = product(None, None);
        p.density_g_per_ml = Some(Decimal::MAX);
        let error = to_grams(dec("2"), &IngredientUnit::Milliliters, &p).unwrap_err();
        assert!(matches!(error, ConversionError::ValueOverflow { .. }));
    }

    #[test]
    fn test_piece_weight_multiplies() {
        let p = product(None, Some("50"));
        assert_eq!(to_grams(dec("2"), &IngredientUnit::Pieces, &p).unwrap(), dec("100"));
    }
}
