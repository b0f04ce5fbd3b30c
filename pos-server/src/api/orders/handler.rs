//! Order API Handlers

use axum::{
    Json,
    extract::{Path, Query, State},
};
use serde::Deserialize;

use crate::core::ServerState;
use crate::db::repository::order;
use crate::utils::validation::{MAX_NOTE_LEN, validate_amount, validate_optional_text};
use crate::utils::{AppError, AppResult};
use crate::utils::time;
use shared::models::{Order, OrderCreate};

/// Query params for listing orders
#[derive(Debug, Deserialize)]
pub struct ListQuery {
    #[serde(default = "default_limit")]
    pub limit: i32,
    #[serde(default)]
    pub offset: i32,
    pub start_date: Option<String>,
    pub end_date: Option<String>,
}

fn default_limit() -> i32 {
    50
}

/// GET /api/orders - list orders, newest first
pub async fn list(
    State(state): State<ServerState>,
    Query(query): Query<ListQuery>,
) -> AppResult<Json<Vec<Order>>> {
    let tz = state.config.timezone;
    let orders = if let (Some(start), Some(end)) = (query.start_date, query.end_date) {
        let start_date = time::parse_date(&start)?;
        let end_date = time::parse_date(&end)?;
        order::find_by_time_range(
            &state.pool,
            time::day_start_millis(start_date, tz),
            time::day_end_millis(end_date, tz),
        )
        .await
    } else {
        order::find_all(&state.pool, query.limit, query.offset).await
    }?;

    Ok(Json(orders))
}

/// GET /api/orders/:id - fetch a single order
pub async fn get_by_id(
    State(state): State<ServerState>,
    Path(id): Path<i64>,
) -> AppResult<Json<Order>> {
    let order = order::find_by_id(&state.pool, id)
        .await?
        .ok_or_else(|| AppError::not_found(format!("Order {} not found", id)))?;
    Ok(Json(order))
}

/// POST /api/orders - checkout: append one transaction to the ledger
pub async fn create(
    State(state): State<ServerState>,
    Json(payload): Json<OrderCreate>,
) -> AppResult<Json<Order>> {
    validate_amount(payload.total_amount, "total_amount")?;
    validate_optional_text(&payload.note, "note", MAX_NOTE_LEN)?;

    let order = order::create(&state.pool, payload).await?;
    tracing::debug!(order_id = order.id, total = order.total_amount, "Order recorded");
    Ok(Json(order))
}
