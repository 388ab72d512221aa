// ABOUTME: Ranks recipes by how completely a pantry of products covers their ingredients
// ABOUTME: Full matches first, then fewest missing products, ties by recipe id
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Food Forum contributors

use std::collections::HashSet;

use serde::{Deserialize, Serialize};

use crate::models::{ProductId, RecipeWithIngredients};

/// What a pantry lacks for one recipe
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PantryMatch {
    /// The recipe
    pub recipe: RecipeWithIngredients,
    /// Names of products the pantry lacks, one per product, in ingredient order
    pub missing_products: Vec<String>,
    /// `missing_products.len()`
    pub missing_count: usize,
    /// Every ingredient is available
    pub full_match: bool,
}

/// Pantry lookup parameters
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PantryQuery {
    /// Products on hand
    pub available: HashSet<ProductId>,
    /// Only consider published recipes
    pub published_only: bool,
    /// Skip recipes that use none of the available products
    pub require_overlap: bool,
    /// Keep at most this many ranked results
    pub limit: Option<usize>,
}

impl PantryQuery {
    /// Query over every recipe with the given products on hand
    pub fn new(available: impl IntoIterator<Item = ProductId>) -> Self {
        Self {
            available: available.into_iter().collect(),
            ..Self::default()
        }
    }

    /// Restrict to published recipes
    #[must_use]
    pub fn published_only(mut self) -> Self {
        self.published_only = true;
        self
    }

    /// Restrict to recipes sharing at least one product with the pantry
    #[must_use]
    pub fn require_overlap(mut self) -> Self {
        self.require_overlap = true;
        self
    }

    /// Truncate the ranking
    #[must_use]
    pub fn with_limit(mut self, limit: usize) -> Self {
        self.limit = Some(limit);
        self
    }
}

/// Missing products of one recipe against `available`
#[must_use]
pub fn match_recipe(recipe: RecipeWithIngredients, available: &HashSet<ProductId>) -> PantryMatch {
    // Ingredient order, a product listed twice is reported once
    let mut seen = HashSet::new();
    let missing_products: Vec<String> = recipe
        .ingredients
        .iter()
        .filter(|line| !available.contains(&line.product.id) && seen.insert(line.product.id))
        .map(|line| line.product.name.clone())
        .collect();
    let missing_count = missing_products.len();

    PantryMatch {
        recipe,
        missing_products,
        missing_count,
        full_match: missing_count == 0,
    }
}

/// Rank recipes by pantry coverage
///
/// Full matches come first, then recipes with fewer missing products; equal
/// entries are ordered by ascending recipe id.
#[must_use]
pub fn rank_by_pantry(
    recipes: Vec<RecipeWithIngredients>,
    available: &HashSet<ProductId>,
) -> Vec<PantryMatch> {
    let mut matches: Vec<PantryMatch> = recipes
        .into_iter()
        .map(|recipe| match_recipe(recipe, available))
        .collect();
    matches.sort_by(|a, b| {
        b.full_match
            .cmp(&a.full_match)
            .then(a.missing_count.cmp(&b.missing_count))
            .then(a.recipe.recipe.id.cmp(&b.recipe.recipe.id))
    });
    matches
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_query_builders() {
        let query = PantryQuery::new([ProductId::new(1), ProductId::new(1)])
            .published_only()
            .with_limit(3);
        assert_eq!(query.available.len(), 1);
        assert!(query.published_only);
        assert!(!query.require_overlap);
        assert_eq!(query.limit, Some(3));
    }
}
