use std::collections::HashMap;

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Extension, Json,
};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use uuid::Uuid;

use crate::database::models::product::Product;
use crate::database::products::ProductRepository;
use crate::error::ApiError;
use crate::handlers::STAFF_ROLES;
use crate::middleware::AuthUser;
use crate::query::ProductQueryOptions;
use crate::state::AppState;

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ReadProductDto {
    pub id: Uuid,
    pub name: String,
    pub price: Decimal,
}

impl From<Product> for ReadProductDto {
    fn from(product: Product) -> Self {
        Self {
            id: product.id,
            name: product.name,
            price: product.price,
        }
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WriteProductRequest {
    pub name: String,
    pub price: Decimal,
}

impl WriteProductRequest {
    /// Boundary validation; the catalog itself assumes valid input.
    pub fn validate(&self) -> Result<(), ApiError> {
        let mut field_errors = HashMap::new();

        if self.name.is_empty() {
            field_errors.insert("name".to_string(), "Name is required.".to_string());
        } else if self.name.chars().count() > 50 {
            field_errors.insert(
                "name".to_string(),
                "Name cannot exceed 50 characters.".to_string(),
            );
        }

        if self.price <= Decimal::ZERO {
            field_errors.insert(
                "price".to_string(),
                "Price must be greater than zero.".to_string(),
            );
        }

        if field_errors.is_empty() {
            Ok(())
        } else {
            Err(ApiError::validation_error(
                "Invalid product data.",
                Some(field_errors),
            ))
        }
    }
}

/// GET /api/products - list the catalog through the query pipeline
pub async fn list_products(
    State(state): State<AppState>,
    Query(options): Query<ProductQueryOptions>,
) -> Result<Json<Vec<ReadProductDto>>, ApiError> {
    let products = ProductRepository::new(state.pool.clone())
        .list(&options)
        .await?;

    Ok(Json(products.into_iter().map(Into::into).collect()))
}

/// GET /api/products/:id
pub async fn get_product(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<ReadProductDto>, ApiError> {
    let product = ProductRepository::new(state.pool.clone())
        .find_by_id(id)
        .await?
        .ok_or_else(|| ApiError::not_found("Id not found."))?;

    Ok(Json(product.into()))
}

/// POST /api/products - staff only
pub async fn create_product(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthUser>,
    Json(request): Json<WriteProductRequest>,
) -> Result<(StatusCode, Json<ReadProductDto>), ApiError> {
    auth.require_any(STAFF_ROLES)?;
    request.validate()?;

    let product = ProductRepository::new(state.pool.clone())
        .create(&request.name, request.price)
        .await?;

    Ok((StatusCode::CREATED, Json(product.into())))
}

/// PUT /api/products/:id - staff only
pub async fn update_product(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthUser>,
    Path(id): Path<Uuid>,
    Json(request): Json<WriteProductRequest>,
) -> Result<Json<Value>, ApiError> {
    auth.require_any(STAFF_ROLES)?;
    request.validate()?;

    ProductRepository::new(state.pool.clone())
        .update(id, &request.name, request.price)
        .await?;

    Ok(Json(json!({
        "message": "Product operation completed successfully."
    })))
}

/// DELETE /api/products/:id - staff only
pub async fn delete_product(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthUser>,
    Path(id): Path<Uuid>,
) -> Result<Json<Value>, ApiError> {
    auth.require_any(STAFF_ROLES)?;

    ProductRepository::new(state.pool.clone()).delete(id).await?;

    Ok(Json(json!({ "message": "Product deleted." })))
}
