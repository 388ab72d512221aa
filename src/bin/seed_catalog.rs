// ABOUTME: Catalog seeding utility for the Food Forum recipe platform
// ABOUTME: Seeds demo users, products, recipes, and votes, then reports nutrition and ratings
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Food Forum contributors

//! Demo catalog seeder.
//!
//! Creates a few users, a product catalog (including one product without a
//! piece weight, to exercise skipped ingredients), several recipes, and some
//! votes. Each recipe's nutrition and rating are logged afterwards.
//!
//! Usage:
//! ```bash
//! # Seed (uses DATABASE_URL from environment)
//! cargo run --bin seed-catalog
//!
//! # Override database URL
//! cargo run --bin seed-catalog -- --database-url sqlite:./data/food_forum.db
//!
//! # Remove existing data first
//! cargo run --bin seed-catalog -- --force -v
//! ```

use std::collections::HashMap;
use std::sync::Arc;

use anyhow::{anyhow, Result};
use clap::Parser;
use rust_decimal::Decimal;
use tracing::{info, warn};

use food_forum::config::{AppConfig, DatabaseUrl};
use food_forum::constants::defaults::REPUTATION_POINTS;
use food_forum::context::RequestContext;
use food_forum::database::{Database, RecipeStore, SqliteRecipeStore};
use food_forum::logging::{LogFormat, LoggingConfig};
use food_forum::models::{
    IngredientUnit, NewProduct, NewRecipe, NewRecipeIngredient, NewUser, ProductId, UserId,
};
use food_forum::services::RecipeService;

#[derive(Parser)]
#[command(
    name = "seed-catalog",
    about = "Food Forum Demo Catalog Seeder",
    long_about = "Create demo users, products, recipes, and votes for the Food Forum recipe platform"
)]
struct SeedArgs {
    /// Database URL override
    #[arg(long)]
    database_url: Option<String>,

    /// Delete existing data before seeding
    #[arg(long)]
    force: bool,

    /// Enable verbose logging
    #[arg(long, short = 'v')]
    verbose: bool,
}

// ============================================================================
// Seed Data
// ============================================================================

/// Name, unit, per-100 g macros (kcal, protein, fat, carbs), density, piece weight
type ProductRow = (
    &'static str,
    &'static str,
    [&'static str; 4],
    Option<&'static str>,
    Option<&'static str>,
);

#[rustfmt::skip]
const PRODUCTS: &[ProductRow] = &[
    ("Rice",       "g",   ["130", "2.7",  "0.3", "28"],  None,         None),
    ("Milk",       "ml",  ["64",  "3.2",  "3.6", "4.8"], Some("1.03"), None),
    ("Egg",        "pcs", ["143", "12.6", "9.5", "0.7"], None,         Some("50")),
    ("Sugar",      "g",   ["387", "0",    "0",   "100"], None,         None),
    ("Butter",     "g",   ["717", "0.9",  "81",  "0.1"], None,         None),
    ("Beetroot",   "g",   ["43",  "1.6",  "0.2", "10"],  None,         None),
    ("Potato",     "g",   ["77",  "2",    "0.1", "17"],  None,         None),
    ("Cabbage",    "g",   ["25",  "1.3",  "0.1", "5.8"], None,         None),
    ("Sour cream", "ml",  ["193", "2.4",  "20",  "3.4"], Some("1.01"), None),
    // No piece weight: counts of onions are skipped in nutrition totals
    ("Onion",      "pcs", ["40",  "1.1",  "0.1", "9.3"], None,         None),
];

struct RecipeData {
    author: &'static str,
    title: &'static str,
    description: &'static str,
    text: &'static str,
    time_minutes: u32,
    servings: u32,
    ingredients: &'static [(&'static str, &'static str, &'static str)],
}

const RECIPES: &[RecipeData] = &[
    RecipeData {
        author: "olena",
        title: "Rice Pudding",
        description: "Creamy baked rice with milk and eggs",
        text: "Simmer the rice in milk, whisk in eggs and sugar, bake for 30 minutes.",
        time_minutes: 50,
        servings: 4,
        ingredients: &[
            ("Rice", "200", "g"),
            ("Milk", "500", "ml"),
            ("Egg", "2", "pcs"),
            ("Sugar", "60", "g"),
        ],
    },
    RecipeData {
        author: "olena",
        title: "Borscht",
        description: "Beetroot soup with cabbage and potatoes",
        text: "Cook the beetroot, add potatoes and cabbage, finish with onion and sour cream.",
        time_minutes: 90,
        servings: 6,
        ingredients: &[
            ("Beetroot", "400", "g"),
            ("Potato", "300", "g"),
            ("Cabbage", "250", "g"),
            ("Onion", "1", "pcs"),
            ("Sour cream", "100", "ml"),
        ],
    },
    RecipeData {
        author: "taras",
        title: "Buttered Potatoes",
        description: "Boiled potatoes with butter",
        text: "Boil the potatoes until tender and toss with butter.",
        time_minutes: 25,
        servings: 2,
        ingredients: &[("Potato", "500", "g"), ("Butter", "30", "g")],
    },
    RecipeData {
        author: "taras",
        title: "Scrambled Eggs",
        description: "Soft eggs cooked in butter",
        text: "Whisk the eggs with milk and cook slowly in butter.",
        time_minutes: 10,
        servings: 1,
        ingredients: &[("Egg", "3", "pcs"), ("Milk", "30", "ml"), ("Butter", "10", "g")],
    },
];

const USERS: &[(&str, &str)] = &[("olena", "Chef Olena"), ("taras", "Taras"), ("iryna", "Iryna")];

const VOTES: &[(&str, &str, i64)] = &[
    ("taras", "Rice Pudding", 1),
    ("iryna", "Rice Pudding", 1),
    ("iryna", "Borscht", 1),
    ("olena", "Buttered Potatoes", -1),
    ("iryna", "Scrambled Eggs", 1),
];

fn dec(value: &str) -> Result<Decimal> {
    value
        .parse()
        .map_err(|e| anyhow!("Invalid decimal '{value}' in seed data: {e}"))
}

// ============================================================================
// Seeding
// ============================================================================

async fn clear(database: &Database) -> Result<()> {
    // Children first so foreign keys never block a delete
    let tables = [
        "saved_recipes",
        "reactions",
        "recipe_ingredients",
        "recipes",
        "products",
        "users",
    ];
    for table in tables {
        sqlx::query(&format!("DELETE FROM {table}"))
            .execute(database.pool())
            .await?;
    }
    info!("Existing catalog data removed");
    Ok(())
}

async fn seed_products(store: &dyn RecipeStore) -> Result<HashMap<&'static str, ProductId>> {
    let mut ids = HashMap::new();
    for (name, unit, [kcal, protein, fat, carbs], density, piece_weight) in PRODUCTS {
        let mut product = NewProduct::new(
            *name,
            IngredientUnit::parse(unit),
            dec(kcal)?,
            dec(protein)?,
            dec(fat)?,
            dec(carbs)?,
        );
        if let Some(density) = density {
            product = product.with_density(dec(density)?);
        }
        if let Some(weight) = piece_weight {
            product = product.with_piece_weight(dec(weight)?);
        }
        let created = store.create_product(&product).await?;
        ids.insert(*name, created.id);
    }
    info!("Seeded {} products", ids.len());
    Ok(ids)
}

async fn seed_users(store: &dyn RecipeStore) -> Result<HashMap<&'static str, UserId>> {
    let mut ids = HashMap::new();
    for (username, nickname) in USERS {
        let user = store.create_user(&NewUser::new(*username, *nickname)).await?;
        ids.insert(*username, user.id);
    }
    info!("Seeded {} users", ids.len());
    Ok(ids)
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = SeedArgs::parse();

    LoggingConfig {
        level: if args.verbose { "debug" } else { "info" }.into(),
        format: LogFormat::Compact,
        ..LoggingConfig::default()
    }
    .init()?;

    info!("=== Food Forum Catalog Seeder ===");

    let mut config = AppConfig::from_env()?;
    if let Some(url) = args.database_url.as_deref() {
        config.database.url = DatabaseUrl::parse_url(url)?;
    }
    let database = Database::new(&config.database).await?;

    let existing: (i64,) = sqlx::query_as("SELECT COUNT(*) FROM recipes")
        .fetch_one(database.pool())
        .await?;
    if existing.0 > 0 {
        if !args.force {
            info!(
                "Catalog already seeded ({} recipes). Use --force to re-seed.",
                existing.0
            );
            return Ok(());
        }
        clear(&database).await?;
    }

    let store = Arc::new(SqliteRecipeStore::new(database));
    let service = RecipeService::from_config(store.clone(), &config);

    let products = seed_products(store.as_ref()).await?;
    let users = seed_users(store.as_ref()).await?;

    let mut recipes = HashMap::new();
    for data in RECIPES {
        let author = users
            .get(data.author)
            .copied()
            .ok_or_else(|| anyhow!("Unknown seed author {}", data.author))?;
        let ctx = RequestContext::for_user(author);

        let mut new_recipe = NewRecipe::new(data.title, data.text);
        new_recipe.description = data.description.to_owned();
        new_recipe.time_minutes = data.time_minutes;
        new_recipe.servings = data.servings;
        let recipe = service.create_recipe(&ctx, &new_recipe).await?;

        for (product, amount, unit) in data.ingredients {
            let product_id = products
                .get(product)
                .copied()
                .ok_or_else(|| anyhow!("Unknown seed product {product}"))?;
            let line =
                NewRecipeIngredient::new(product_id, dec(amount)?, IngredientUnit::parse(unit));
            service.add_ingredient(&ctx, recipe.id, &line).await?;
        }
        recipes.insert(data.title, recipe.id);
    }
    info!("Seeded {} recipes", recipes.len());

    for (username, title, value) in VOTES {
        let (Some(user), Some(recipe)) = (users.get(username), recipes.get(title)) else {
            continue;
        };
        service
            .react(&RequestContext::for_user(*user), *recipe, *value)
            .await?;
        if *value > 0 {
            let author = store.get_recipe(*recipe).await?.map(|r| r.author_id);
            if let Some(author) = author {
                service.increment_reputation(author, REPUTATION_POINTS).await?;
            }
        }
    }

    let anonymous = RequestContext::anonymous();
    for title in RECIPES.iter().map(|r| r.title) {
        let Some(id) = recipes.get(title).copied() else {
            continue;
        };
        let detail = service.recipe_detail(&anonymous, id).await?;
        info!(
            recipe = title,
            kcal = %detail.totals.kcal,
            protein = %detail.totals.protein,
            fat = %detail.totals.fat,
            carbs = %detail.totals.carbs,
            kcal_per_serving = %detail.per_serving.kcal,
            rating = detail.rating.score,
            "Recipe summary"
        );
        if !detail.skipped_products.is_empty() {
            warn!(recipe = title, skipped = ?detail.skipped_products, "Nutrition is incomplete");
        }
    }

    info!("=== Seeding complete ===");
    Ok(())
}
