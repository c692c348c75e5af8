//! Product API Handlers

use axum::{
    extract::{Path, State},
    Extension, Json,
};
use shared::models::{Product, ProductCreate, ProductUpdate};
use validator::Validate;

use crate::auth::middleware::check_permission;
use crate::auth::{permissions, CurrentUser};
use crate::core::ServerState;
use crate::utils::{AppError, AppResult};

/// GET /api/products - 获取所有商品
pub async fn list(State(state): State<ServerState>) -> AppResult<Json<Vec<Product>>> {
    Ok(Json(state.catalog.list()))
}

/// GET /api/products/:id - 获取单个商品
pub async fn get_by_id(
    State(state): State<ServerState>,
    Path(id): Path<String>,
) -> AppResult<Json<Product>> {
    let product = state
        .catalog
        .get(&id)
        .ok_or_else(|| AppError::NotFound(format!("Product {}", id)))?;
    Ok(Json(product))
}

/// POST /api/products - 创建商品
pub async fn create(
    State(state): State<ServerState>,
    Extension(user): Extension<CurrentUser>,
    Json(payload): Json<ProductCreate>,
) -> AppResult<Json<Product>> {
    check_permission(&user, permissions::INVENTORY_MANAGE)?;
    payload.validate()?;

    let product = state.catalog.create(payload);
    tracing::info!(product_id = %product.id, name = %product.name, "Product created");
    Ok(Json(product))
}

/// PUT /api/products/:id - 更新商品 (整体替换)
pub async fn update(
    State(state): State<ServerState>,
    Extension(user): Extension<CurrentUser>,
    Path(id): Path<String>,
    Json(payload): Json<ProductUpdate>,
) -> AppResult<Json<Product>> {
    check_permission(&user, permissions::INVENTORY_MANAGE)?;
    payload.validate()?;

    let product = state.catalog.update(&id, payload)?;
    tracing::info!(product_id = %id, "Product updated");
    Ok(Json(product))
}

/// DELETE /api/products/:id - 删除商品
pub async fn delete(
    State(state): State<ServerState>,
    Extension(user): Extension<CurrentUser>,
    Path(id): Path<String>,
) -> AppResult<Json<bool>> {
    check_permission(&user, permissions::INVENTORY_MANAGE)?;

    state.catalog.delete(&id)?;
    tracing::info!(product_id = %id, "Product deleted");
    Ok(Json(true))
}
