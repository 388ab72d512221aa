// ABOUTME: Database operations for the product catalog
// ABOUTME: Product deletion is refused while any recipe ingredient references the product
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Food Forum contributors

use sqlx::SqlitePool;
use tracing::debug;

use super::mappers::{column_count, row_to_product, PRODUCT_COLUMNS};
use crate::errors::{AppError, AppResult, DatabaseError};
use crate::models::{NewProduct, Product, ProductId};

/// Database manager for products
pub struct ProductManager {
    pool: SqlitePool,
}

impl ProductManager {
    /// Create a new product manager
    #[must_use]
    pub const fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// Insert a product
    ///
    /// # Errors
    ///
    /// Returns `InvalidInput` for invalid fields, `ResourceAlreadyExists` for
    /// a duplicate name, or a database error
    pub async fn create(&self, product: &NewProduct) -> AppResult<Product> {
        product.validate()?;
        let name = product.name.trim();

        let result = sqlx::query(
            r"
            INSERT INTO products (name, unit, calories_per_100, protein_per_100, fat_per_100,
                                  carbs_per_100, density_g_per_ml, grams_per_piece)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
            ",
        )
        .bind(name)
        .bind(product.unit.code())
        .bind(product.calories_per_100.to_string())
        .bind(product.protein_per_100.to_string())
        .bind(product.fat_per_100.to_string())
        .bind(product.carbs_per_100.to_string())
        .bind(product.density_g_per_ml.map(|d| d.to_string()))
        .bind(product.grams_per_piece.map(|g| g.to_string()))
        .execute(&self.pool)
        .await
        .map_err(|e| match DatabaseError::from_sqlx("create product", e) {
            DatabaseError::UniqueViolation { .. } => {
                AppError::already_exists(format!("Product '{name}'"))
            }
            other => other.into(),
        })?;

        let id = ProductId::new(result.last_insert_rowid());
        debug!(product_id = %id, name, "Product created");

        Ok(Product {
            id,
            name: name.to_owned(),
            unit: product.unit.clone(),
            calories_per_100: product.calories_per_100,
            protein_per_100: product.protein_per_100,
            fat_per_100: product.fat_per_100,
            carbs_per_100: product.carbs_per_100,
            density_g_per_ml: product.density_g_per_ml,
            grams_per_piece: product.grams_per_piece,
        })
    }

    /// Get a product by ID
    ///
    /// # Errors
    ///
    /// Returns an error if the database operation fails
    pub async fn get(&self, id: ProductId) -> AppResult<Option<Product>> {
        let row = sqlx::query(&format!("SELECT {PRODUCT_COLUMNS} FROM products p WHERE p.id = $1"))
            .bind(id.get())
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| AppError::database(format!("Failed to get product: {e}")))?;

        row.map(|r| row_to_product(&r)).transpose()
    }

    /// Get a product by its unique name
    ///
    /// # Errors
    ///
    /// Returns an error if the database operation fails
    pub async fn get_by_name(&self, name: &str) -> AppResult<Option<Product>> {
        let row =
            sqlx::query(&format!("SELECT {PRODUCT_COLUMNS} FROM products p WHERE p.name = $1"))
                .bind(name.trim())
                .fetch_optional(&self.pool)
                .await
                .map_err(|e| AppError::database(format!("Failed to get product: {e}")))?;

        row.map(|r| row_to_product(&r)).transpose()
    }

    /// List all products ordered by name
    ///
    /// # Errors
    ///
    /// Returns an error if the database operation fails
    pub async fn list(&self) -> AppResult<Vec<Product>> {
        let rows = sqlx::query(&format!(
            "SELECT {PRODUCT_COLUMNS} FROM products p ORDER BY p.name ASC"
        ))
        .fetch_all(&self.pool)
        .await
        .map_err(|e| AppError::database(format!("Failed to list products: {e}")))?;

        rows.iter().map(row_to_product).collect()
    }

    /// Number of recipe ingredient lines referencing a product
    ///
    /// # Errors
    ///
    /// Returns an error if the database operation fails
    pub async fn usage_count(&self, id: ProductId) -> AppResult<u64> {
        let row = sqlx::query(
            "SELECT COUNT(*) AS uses FROM recipe_ingredients WHERE product_id = $1",
        )
        .bind(id.get())
        .fetch_one(&self.pool)
        .await
        .map_err(|e| AppError::database(format!("Failed to count product usage: {e}")))?;

        column_count(&row, "uses")
    }

    /// Delete a product that no recipe uses
    ///
    /// # Errors
    ///
    /// Returns `ResourceLocked` while ingredients reference the product,
    /// `ResourceNotFound` if it does not exist, or a database error
    pub async fn delete(&self, id: ProductId) -> AppResult<()> {
        let uses = self.usage_count(id).await?;
        if uses > 0 {
            return Err(AppError::resource_locked(format!(
                "Product {id} is used by {uses} recipe ingredient(s)"
            ))
            .with_resource_id(id.to_string()));
        }

        let result = sqlx::query("DELETE FROM products WHERE id = $1")
            .bind(id.get())
            .execute(&self.pool)
            .await
            .map_err(|e| AppError::from(DatabaseError::from_sqlx("delete product", e)))?;

        if result.rows_affected() == 0 {
            return Err(AppError::not_found(format!("Product {id}")));
        }
        debug!(product_id = %id, "Product deleted");
        Ok(())
    }
}
