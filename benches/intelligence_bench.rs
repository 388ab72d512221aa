// ABOUTME: Criterion benchmarks for nutrition and pantry computation
// ABOUTME: Measures recipe totals and pantry ranking over generated catalogs
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Food Forum contributors

//! Criterion benchmarks for the computation engine.
//!
//! Recipes are generated in memory, so these measure decimal arithmetic and
//! ranking only, not storage.

#![allow(clippy::missing_docs_in_private_items, missing_docs)]

use std::collections::HashSet;

use chrono::Utc;
use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use food_forum::config::MissingFactorPolicy;
use food_forum::intelligence::{nutrition_total, rank_by_pantry};
use food_forum::models::{
    IngredientLine, IngredientUnit, Product, ProductId, Recipe, RecipeId, RecipeIngredient,
    RecipeWithIngredients, UserId,
};
use rust_decimal::Decimal;

const CATALOG_SIZE: i64 = 200;

fn generate_product(id: i64) -> Product {
    let unit = match id % 3 {
        0 => IngredientUnit::Grams,
        1 => IngredientUnit::Milliliters,
        _ => IngredientUnit::Pieces,
    };
    Product {
        id: ProductId::new(id),
        name: format!("Product {id}"),
        calories_per_100: Decimal::new(50 + (id * 37) % 400, 0),
        protein_per_100: Decimal::new((id * 13) % 300, 1),
        fat_per_100: Decimal::new((id * 7) % 200, 1),
        carbs_per_100: Decimal::new((id * 11) % 800, 1),
        density_g_per_ml: matches!(unit, IngredientUnit::Milliliters).then(|| Decimal::new(103, 2)),
        // Every fifth counted product lacks a piece weight and is skipped
        grams_per_piece: (matches!(unit, IngredientUnit::Pieces) && id % 5 != 0)
            .then(|| Decimal::new(50, 0)),
        unit,
    }
}

fn generate_recipe(id: i64, ingredient_count: i64) -> RecipeWithIngredients {
    let now = Utc::now();
    let ingredients = (0..ingredient_count)
        .map(|i| {
            let product = generate_product((id * 7 + i * 13) % CATALOG_SIZE);
            IngredientLine {
                ingredient: RecipeIngredient {
                    id: id * 100 + i,
                    recipe_id: RecipeId::new(id),
                    product_id: product.id,
                    amount: Decimal::new(25 + (i * 45) % 500, 0),
                    unit: product.unit.clone(),
                    note: String::new(),
                },
                product,
            }
        })
        .collect();

    RecipeWithIngredients {
        recipe: Recipe {
            id: RecipeId::new(id),
            author_id: UserId::new(1),
            title: format!("Recipe {id}"),
            description: String::new(),
            recipe_text: String::new(),
            image: None,
            time_minutes: 30,
            servings: 4,
            is_published: true,
            created_at: now,
            updated_at: now,
        },
        ingredients,
    }
}

/// Benchmark whole-recipe totals by ingredient count
fn bench_nutrition_total(c: &mut Criterion) {
    let mut group = c.benchmark_group("nutrition_total");

    for count in [5_i64, 20, 80] {
        let recipe = generate_recipe(1, count);
        group.throughput(Throughput::Elements(count.unsigned_abs()));
        group.bench_with_input(BenchmarkId::new("skip_and_flag", count), &recipe, |b, recipe| {
            b.iter(|| nutrition_total(black_box(recipe), MissingFactorPolicy::SkipAndFlag));
        });
    }

    group.finish();
}

/// Benchmark pantry ranking by catalog size
fn bench_pantry_ranking(c: &mut Criterion) {
    let mut group = c.benchmark_group("pantry_ranking");
    let pantry: HashSet<ProductId> = (0..CATALOG_SIZE).step_by(3).map(ProductId::new).collect();

    for count in [10_i64, 100, 1000] {
        let recipes: Vec<RecipeWithIngredients> =
            (0..count).map(|id| generate_recipe(id, 8)).collect();
        group.throughput(Throughput::Elements(count.unsigned_abs()));
        group.bench_with_input(BenchmarkId::new("rank_by_pantry", count), &recipes, |b, recipes| {
            b.iter(|| rank_by_pantry(black_box(recipes.clone()), black_box(&pantry)));
        });
    }

    group.finish();
}

criterion_group!(benches, bench_nutrition_total, bench_pantry_ranking);
criterion_main!(benches);
