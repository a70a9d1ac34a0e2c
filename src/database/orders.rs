use std::collections::HashMap;

use sqlx::{PgPool, Row};
use uuid::Uuid;

use crate::database::models::order::{Order, OrderRow};
use crate::database::models::product::Product;
use crate::database::products::ProductRepository;
use crate::database::StoreError;

/// Builds and reads order aggregates. Creation resolves the requested
/// product ids against the catalog and persists the order row together with
/// its association rows in one transaction; readers never observe a partial
/// order.
pub struct OrderRepository {
    pool: PgPool,
    products: ProductRepository,
}

impl OrderRepository {
    pub fn new(pool: PgPool) -> Self {
        Self {
            products: ProductRepository::new(pool.clone()),
            pool,
        }
    }

    /// Create an order for `owner` from the requested product ids.
    ///
    /// Unknown ids are dropped, not reported. If nothing resolves the order
    /// is rejected with `EmptyOrder` and nothing is written.
    pub async fn create_order(
        &self,
        product_ids: &[Uuid],
        owner: Uuid,
    ) -> Result<Order, StoreError> {
        let products = self.products.find_by_id_set(product_ids).await?;

        if products.is_empty() {
            return Err(StoreError::EmptyOrder);
        }

        let order_id = Uuid::new_v4();
        let mut tx = self.pool.begin().await?;

        let row = sqlx::query_as::<_, OrderRow>(
            "INSERT INTO orders (id, user_id) VALUES ($1, $2) RETURNING id, user_id, created_at",
        )
        .bind(order_id)
        .bind(owner)
        .fetch_one(&mut *tx)
        .await?;

        for product in &products {
            sqlx::query("INSERT INTO order_products (order_id, product_id) VALUES ($1, $2)")
                .bind(order_id)
                .bind(product.id)
                .execute(&mut *tx)
                .await?;
        }

        tx.commit().await?;

        tracing::info!(
            order_id = %row.id,
            owner = %owner,
            product_count = products.len(),
            "Order created"
        );

        Ok(Order::from_row(row, products))
    }

    pub async fn get_by_id(&self, id: Uuid) -> Result<Option<Order>, StoreError> {
        let row = sqlx::query_as::<_, OrderRow>(
            "SELECT id, user_id, created_at FROM orders WHERE id = $1",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        let Some(row) = row else {
            return Ok(None);
        };

        let mut by_order = self.products_of(&[row.id]).await?;
        let products = by_order.remove(&row.id).unwrap_or_default();

        Ok(Some(Order::from_row(row, products)))
    }

    pub async fn list_all(&self) -> Result<Vec<Order>, StoreError> {
        let rows = sqlx::query_as::<_, OrderRow>(
            "SELECT id, user_id, created_at FROM orders ORDER BY created_at",
        )
        .fetch_all(&self.pool)
        .await?;

        self.assemble(rows).await
    }

    /// Checked variant: an unknown owner fails with NotFound instead of
    /// returning an empty list, so callers can tell a bad id from a user
    /// with no orders.
    pub async fn list_by_owner(&self, owner: Uuid) -> Result<Vec<Order>, StoreError> {
        let owner_exists =
            sqlx::query_scalar::<_, bool>("SELECT EXISTS (SELECT 1 FROM users WHERE id = $1)")
                .bind(owner)
                .fetch_one(&self.pool)
                .await?;

        if !owner_exists {
            return Err(StoreError::NotFound(format!(
                "User with an id of {} not found.",
                owner
            )));
        }

        let rows = sqlx::query_as::<_, OrderRow>(
            "SELECT id, user_id, created_at FROM orders WHERE user_id = $1 ORDER BY created_at",
        )
        .bind(owner)
        .fetch_all(&self.pool)
        .await?;

        self.assemble(rows).await
    }

    async fn assemble(&self, rows: Vec<OrderRow>) -> Result<Vec<Order>, StoreError> {
        let ids: Vec<Uuid> = rows.iter().map(|r| r.id).collect();
        let mut by_order = self.products_of(&ids).await?;

        Ok(rows
            .into_iter()
            .map(|row| {
                let products = by_order.remove(&row.id).unwrap_or_default();
                Order::from_row(row, products)
            })
            .collect())
    }

    /// Load the product sets for a batch of orders in one query.
    async fn products_of(
        &self,
        order_ids: &[Uuid],
    ) -> Result<HashMap<Uuid, Vec<Product>>, StoreError> {
        if order_ids.is_empty() {
            return Ok(HashMap::new());
        }

        let rows = sqlx::query(
            "SELECT op.order_id, p.id, p.name, p.price
             FROM order_products op
             JOIN products p ON p.id = op.product_id
             WHERE op.order_id = ANY($1)",
        )
        .bind(order_ids)
        .fetch_all(&self.pool)
        .await?;

        let mut by_order: HashMap<Uuid, Vec<Product>> = HashMap::new();
        for row in rows {
            let order_id: Uuid = row.try_get("order_id")?;
            let product = Product {
                id: row.try_get("id")?,
                name: row.try_get("name")?,
                price: row.try_get("price")?,
            };
            by_order.entry(order_id).or_default().push(product);
        }

        Ok(by_order)
    }
}
