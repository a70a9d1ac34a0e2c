use axum::{
    extract::{Query, State},
    Extension, Json,
};
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use uuid::Uuid;

use crate::database::models::order::Order;
use crate::database::orders::OrderRepository;
use crate::error::ApiError;
use crate::handlers::products::ReadProductDto;
use crate::handlers::STAFF_ROLES;
use crate::middleware::AuthUser;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderRequest {
    pub product_ids: Vec<Uuid>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ReadOrderDto {
    pub id: Uuid,
    pub buyer: Uuid,
    pub products_ordered: Vec<ReadProductDto>,
}

impl From<Order> for ReadOrderDto {
    fn from(order: Order) -> Self {
        Self {
            id: order.id,
            buyer: order.user_id,
            products_ordered: order.products.into_iter().map(Into::into).collect(),
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct OrderByIdQuery {
    pub id: Uuid,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrdersByUserQuery {
    pub user_id: Uuid,
}

/// POST /api/orders - create an order for the caller
pub async fn create_order(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthUser>,
    Json(request): Json<OrderRequest>,
) -> Result<Json<Value>, ApiError> {
    let order = OrderRepository::new(state.pool.clone())
        .create_order(&request.product_ids, auth.user_id)
        .await?;

    Ok(Json(json!({
        "message": "Order created.",
        "orderId": order.id
    })))
}

/// GET /api/orders/all-orders - staff only
pub async fn all_orders(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthUser>,
) -> Result<Json<Vec<ReadOrderDto>>, ApiError> {
    auth.require_any(STAFF_ROLES)?;

    let orders = OrderRepository::new(state.pool.clone()).list_all().await?;

    tracing::info!(user_id = %auth.user_id, "Fetched all order records");
    Ok(Json(orders.into_iter().map(Into::into).collect()))
}

/// GET /api/orders/order-by-id?id= - staff only
pub async fn order_by_id(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthUser>,
    Query(query): Query<OrderByIdQuery>,
) -> Result<Json<ReadOrderDto>, ApiError> {
    auth.require_any(STAFF_ROLES)?;

    let order = OrderRepository::new(state.pool.clone())
        .get_by_id(query.id)
        .await?
        .ok_or_else(|| {
            ApiError::not_found(format!("Order with an id of {} is not found.", query.id))
        })?;

    Ok(Json(order.into()))
}

/// GET /api/orders/orders-by-user-id?userId= - staff only
pub async fn orders_by_user_id(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthUser>,
    Query(query): Query<OrdersByUserQuery>,
) -> Result<Json<Vec<ReadOrderDto>>, ApiError> {
    auth.require_any(STAFF_ROLES)?;

    let orders = OrderRepository::new(state.pool.clone())
        .list_by_owner(query.user_id)
        .await?;

    tracing::info!(
        user_id = %auth.user_id,
        owner_id = %query.user_id,
        "Fetched orders on behalf of a user"
    );
    Ok(Json(orders.into_iter().map(Into::into).collect()))
}

/// GET /api/orders/orders-by-token - the caller's own orders
pub async fn orders_by_token(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthUser>,
) -> Result<Json<Vec<ReadOrderDto>>, ApiError> {
    let orders = OrderRepository::new(state.pool.clone())
        .list_by_owner(auth.user_id)
        .await?;

    Ok(Json(orders.into_iter().map(Into::into).collect()))
}
