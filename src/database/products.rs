use rust_decimal::Decimal;
use sqlx::PgPool;
use uuid::Uuid;

use crate::database::models::product::Product;
use crate::database::StoreError;
use crate::query::{self, ProductQueryOptions};

/// The product catalog: owns product rows and exposes the base sequence the
/// query pipeline runs over. Input validation happens at the DTO boundary;
/// this repository enforces existence and persistence only.
pub struct ProductRepository {
    pool: PgPool,
}

impl ProductRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Fetch the catalog and run it through the query pipeline.
    pub async fn list(&self, options: &ProductQueryOptions) -> Result<Vec<Product>, StoreError> {
        let products =
            sqlx::query_as::<_, Product>("SELECT id, name, price FROM products")
                .fetch_all(&self.pool)
                .await?;

        Ok(query::apply(products, options))
    }

    pub async fn find_by_id(&self, id: Uuid) -> Result<Option<Product>, StoreError> {
        let product =
            sqlx::query_as::<_, Product>("SELECT id, name, price FROM products WHERE id = $1")
                .bind(id)
                .fetch_optional(&self.pool)
                .await?;

        Ok(product)
    }

    /// Returns only the subset of `ids` that exists; unknown ids are dropped
    /// silently, and duplicates collapse to one row.
    pub async fn find_by_id_set(&self, ids: &[Uuid]) -> Result<Vec<Product>, StoreError> {
        if ids.is_empty() {
            return Ok(vec![]);
        }

        let products = sqlx::query_as::<_, Product>(
            "SELECT id, name, price FROM products WHERE id = ANY($1)",
        )
        .bind(ids)
        .fetch_all(&self.pool)
        .await?;

        Ok(products)
    }

    pub async fn create(&self, name: &str, price: Decimal) -> Result<Product, StoreError> {
        let product = Product {
            id: Uuid::new_v4(),
            name: name.to_string(),
            price,
        };

        sqlx::query("INSERT INTO products (id, name, price) VALUES ($1, $2, $3)")
            .bind(product.id)
            .bind(&product.name)
            .bind(product.price)
            .execute(&self.pool)
            .await?;

        tracing::info!(product_id = %product.id, "Product created");
        Ok(product)
    }

    /// Full-field overwrite. Fails with NotFound when the id is absent.
    pub async fn update(&self, id: Uuid, name: &str, price: Decimal) -> Result<(), StoreError> {
        let result = sqlx::query("UPDATE products SET name = $2, price = $3 WHERE id = $1")
            .bind(id)
            .bind(name)
            .bind(price)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(StoreError::NotFound(format!(
                "Product with an id of {} not found.",
                id
            )));
        }

        Ok(())
    }

    pub async fn delete(&self, id: Uuid) -> Result<(), StoreError> {
        let result = sqlx::query("DELETE FROM products WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(StoreError::NotFound(format!(
                "Product with an id of {} not found.",
                id
            )));
        }

        tracing::info!(product_id = %id, "Product deleted");
        Ok(())
    }
}
