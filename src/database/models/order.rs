use chrono::{DateTime, Utc};
use sqlx::FromRow;
use uuid::Uuid;

use super::product::Product;

/// The order row as stored; product associations live in `order_products`.
#[derive(Debug, Clone, FromRow)]
pub struct OrderRow {
    pub id: Uuid,
    pub user_id: Uuid,
    pub created_at: DateTime<Utc>,
}

/// An order aggregate: the row plus the products it references. Immutable
/// once created.
#[derive(Debug, Clone)]
pub struct Order {
    pub id: Uuid,
    pub user_id: Uuid,
    pub created_at: DateTime<Utc>,
    pub products: Vec<Product>,
}

impl Order {
    pub(crate) fn from_row(row: OrderRow, products: Vec<Product>) -> Self {
        Self {
            id: row.id,
            user_id: row.user_id,
            created_at: row.created_at,
            products,
        }
    }
}
