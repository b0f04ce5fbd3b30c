//! Daily Report API Handlers
//!
//! The closing state machine is consulted through the `reporting` module
//! everywhere; no handler re-derives open/closed state on its own.

use axum::{
    Json,
    extract::{Path, Query, State},
};
use serde::Deserialize;

use crate::core::ServerState;
use crate::db::repository::daily_report;
use crate::reporting::{self, ClosingStatus, XReport};
use crate::utils::time;
use crate::utils::{AppError, AppResult};
use shared::models::DailyReport;

/// Query params for listing reports
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

/// GET /api/daily-reports - list finalized reports
pub async fn list(
    State(state): State<ServerState>,
    Query(query): Query<ListQuery>,
) -> AppResult<Json<Vec<DailyReport>>> {
    let reports = if let (Some(start), Some(end)) = (query.start_date, query.end_date) {
        // Validate date formats before hitting the store
        time::parse_date(&start)?;
        time::parse_date(&end)?;
        daily_report::find_by_date_range(&state.pool, &start, &end).await
    } else {
        daily_report::find_all(&state.pool, query.limit, query.offset).await
    }?;

    Ok(Json(reports))
}

/// GET /api/daily-reports/date/:date - fetch one report by business date
pub async fn get_by_date(
    State(state): State<ServerState>,
    Path(date): Path<String>,
) -> AppResult<Json<DailyReport>> {
    time::parse_date(&date)?;
    let report = daily_report::find_by_date(&state.pool, &date)
        .await?
        .ok_or_else(|| AppError::not_found(format!("Daily report for {} not found", date)))?;
    Ok(Json(report))
}

/// GET /api/daily-reports/status - today's closing status
pub async fn status(State(state): State<ServerState>) -> AppResult<Json<ClosingStatus>> {
    let today = time::today(state.config.timezone);
    let status = reporting::closing_status(&state.pool, today).await?;
    Ok(Json(status))
}

/// GET /api/daily-reports/x-report - today's hourly sales (24 buckets)
pub async fn x_report(State(state): State<ServerState>) -> AppResult<Json<XReport>> {
    let report = reporting::build_x_report(
        &state.pool,
        state.config.timezone,
        state.config.report_query_timeout(),
    )
    .await?;
    Ok(Json(report))
}

/// POST /api/daily-reports/close - run the Z-Report for today
///
/// Returns 409 when today is already closed; the caller must reset
/// explicitly before closing again.
pub async fn close(State(state): State<ServerState>) -> AppResult<Json<DailyReport>> {
    let today = time::today(state.config.timezone);
    let report = reporting::close_day(&state.pool, today, state.config.timezone).await?;
    Ok(Json(report))
}

/// POST /api/daily-reports/reset - administrative reset for today
pub async fn reset(State(state): State<ServerState>) -> AppResult<Json<bool>> {
    let today = time::today(state.config.timezone);
    reporting::reopen_day(&state.pool, today).await?;
    Ok(Json(true))
}
