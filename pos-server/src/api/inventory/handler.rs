//! Inventory API Handlers
//!
//! Every read response carries a `status` field derived from the current
//! quantity. Clients never send a status; a persisted status would go
//! stale the moment the quantity changes.

use axum::{
    Json,
    extract::{Path, State},
};
use serde::Serialize;

use crate::core::ServerState;
use crate::db::repository::inventory;
use crate::utils::validation::{MAX_NAME_LEN, validate_optional_text, validate_required_text};
use crate::utils::{AppError, AppResult};
use shared::models::{InventoryAdjust, InventoryItem, InventoryItemCreate, InventoryItemUpdate, StockStatus};

/// Inventory item with its derived stock status
#[derive(Debug, Clone, Serialize)]
pub struct InventoryItemResponse {
    #[serde(flatten)]
    pub item: InventoryItem,
    pub status: StockStatus,
}

impl From<InventoryItem> for InventoryItemResponse {
    fn from(item: InventoryItem) -> Self {
        let status = item.status();
        Self { item, status }
    }
}

/// GET /api/inventory - list all items with derived status
pub async fn list(
    State(state): State<ServerState>,
) -> AppResult<Json<Vec<InventoryItemResponse>>> {
    let items = inventory::find_all(&state.pool).await?;
    Ok(Json(items.into_iter().map(Into::into).collect()))
}

/// GET /api/inventory/:id - fetch a single item with derived status
pub async fn get_by_id(
    State(state): State<ServerState>,
    Path(id): Path<i64>,
) -> AppResult<Json<InventoryItemResponse>> {
    let item = inventory::find_by_id(&state.pool, id)
        .await?
        .ok_or_else(|| AppError::not_found(format!("Inventory item {} not found", id)))?;
    Ok(Json(item.into()))
}

/// POST /api/inventory - create an item
pub async fn create(
    State(state): State<ServerState>,
    Json(payload): Json<InventoryItemCreate>,
) -> AppResult<Json<InventoryItemResponse>> {
    validate_required_text(&payload.name, "name", MAX_NAME_LEN)?;

    let item = inventory::create(&state.pool, payload).await?;
    Ok(Json(item.into()))
}

/// PUT /api/inventory/:id - update name and/or quantity
pub async fn update(
    State(state): State<ServerState>,
    Path(id): Path<i64>,
    Json(payload): Json<InventoryItemUpdate>,
) -> AppResult<Json<InventoryItemResponse>> {
    validate_optional_text(&payload.name, "name", MAX_NAME_LEN)?;

    let item = inventory::update(&state.pool, id, payload).await?;
    Ok(Json(item.into()))
}

/// POST /api/inventory/:id/adjust - apply a signed quantity delta
pub async fn adjust(
    State(state): State<ServerState>,
    Path(id): Path<i64>,
    Json(payload): Json<InventoryAdjust>,
) -> AppResult<Json<InventoryItemResponse>> {
    let item = inventory::adjust(&state.pool, id, payload.delta).await?;
    tracing::debug!(
        item_id = id,
        delta = payload.delta,
        quantity = item.quantity,
        "Inventory adjusted"
    );
    Ok(Json(item.into()))
}

/// DELETE /api/inventory/:id
pub async fn delete(
    State(state): State<ServerState>,
    Path(id): Path<i64>,
) -> AppResult<Json<bool>> {
    let deleted = inventory::delete(&state.pool, id).await?;
    if !deleted {
        return Err(AppError::not_found(format!(
            "Inventory item {} not found",
            id
        )));
    }
    Ok(Json(true))
}
