// ABOUTME: Precision checks for decimal fields before they are stored
// ABOUTME: Bounds mirror the NUMERIC(digits, 2) columns of the relational schema
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Food Forum contributors

use rust_decimal::Decimal;

use crate::constants::limits::STORED_DECIMAL_PLACES;
use crate::errors::{AppError, AppResult};

/// Reject negative values and values that do not fit `max_digits` total
/// digits with [`STORED_DECIMAL_PLACES`] after the point
pub(super) fn check_stored_decimal(field: &str, value: Decimal, max_digits: u32) -> AppResult<()> {
    if value < Decimal::ZERO {
        return Err(AppError::invalid_input(format!("{field} must not be negative")));
    }
    // Trailing zeros such as "1.500" do not count as extra places
    if value.normalize().scale() > STORED_DECIMAL_PLACES {
        return Err(AppError::value_out_of_range(format!(
            "{field} allows at most {STORED_DECIMAL_PLACES} decimal places"
        )));
    }
    let integer_digits = max_digits - STORED_DECIMAL_PLACES;
    if value >= Decimal::from(10_i64.pow(integer_digits)) {
        return Err(AppError::value_out_of_range(format!(
            "{field} allows at most {integer_digits} digits before the decimal point"
        )));
    }
    Ok(())
}
