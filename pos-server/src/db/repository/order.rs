//! Order Repository
//!
//! The orders table is the append-only ledger: checkout inserts rows,
//! reporting reads them. Nothing here updates or deletes.

use super::RepoResult;
use shared::models::{Order, OrderCreate};
use sqlx::SqlitePool;

/// Count + sum over a time range
#[derive(Debug, Clone, Copy, sqlx::FromRow)]
pub struct SalesTotals {
    pub order_count: i64,
    pub total_sales: f64,
}

/// One non-empty hour bucket; `bucket_start` is the hour-truncated
/// Unix millis of the orders it aggregates
#[derive(Debug, Clone, Copy, sqlx::FromRow)]
pub struct HourBucketRow {
    pub bucket_start: i64,
    pub amount: f64,
}

pub async fn create(pool: &SqlitePool, data: OrderCreate) -> RepoResult<Order> {
    let id = shared::util::snowflake_id();
    let now = shared::util::now_millis();

    let order = sqlx::query_as::<_, Order>(
        "INSERT INTO orders (id, created_at, total_amount, note) VALUES (?1, ?2, ?3, ?4) RETURNING id, created_at, total_amount, note",
    )
    .bind(id)
    .bind(now)
    .bind(data.total_amount)
    .bind(data.note)
    .fetch_one(pool)
    .await?;
    Ok(order)
}

pub async fn find_by_id(pool: &SqlitePool, id: i64) -> RepoResult<Option<Order>> {
    let order = sqlx::query_as::<_, Order>(
        "SELECT id, created_at, total_amount, note FROM orders WHERE id = ?",
    )
    .bind(id)
    .fetch_optional(pool)
    .await?;
    Ok(order)
}

pub async fn find_all(pool: &SqlitePool, limit: i32, offset: i32) -> RepoResult<Vec<Order>> {
    let orders = sqlx::query_as::<_, Order>(
        "SELECT id, created_at, total_amount, note FROM orders ORDER BY created_at DESC LIMIT ? OFFSET ?",
    )
    .bind(limit)
    .bind(offset)
    .fetch_all(pool)
    .await?;
    Ok(orders)
}

pub async fn find_by_time_range(
    pool: &SqlitePool,
    start_millis: i64,
    end_millis: i64,
) -> RepoResult<Vec<Order>> {
    let orders = sqlx::query_as::<_, Order>(
        "SELECT id, created_at, total_amount, note FROM orders WHERE created_at >= ? AND created_at < ? ORDER BY created_at DESC",
    )
    .bind(start_millis)
    .bind(end_millis)
    .fetch_all(pool)
    .await?;
    Ok(orders)
}

/// Count and sum orders with `created_at` in `[start, end)`.
///
/// An inverted range simply matches no rows and yields zeros.
pub async fn aggregate_range(
    pool: &SqlitePool,
    start_millis: i64,
    end_millis: i64,
) -> RepoResult<SalesTotals> {
    let totals = sqlx::query_as::<_, SalesTotals>(
        "SELECT COUNT(id) AS order_count, COALESCE(SUM(total_amount), 0.0) AS total_sales FROM orders WHERE created_at >= ? AND created_at < ?",
    )
    .bind(start_millis)
    .bind(end_millis)
    .fetch_one(pool)
    .await?;
    Ok(totals)
}

/// Per-hour sums over `[start, end)`, ascending, one row per hour that
/// has at least one order. Hours with no orders produce no row; callers
/// that need a dense series fill the gaps themselves.
pub async fn hourly_buckets(
    pool: &SqlitePool,
    start_millis: i64,
    end_millis: i64,
) -> RepoResult<Vec<HourBucketRow>> {
    let rows = sqlx::query_as::<_, HourBucketRow>(
        "SELECT (created_at / 3600000) * 3600000 AS bucket_start, SUM(total_amount) AS amount FROM orders WHERE created_at >= ? AND created_at < ? GROUP BY bucket_start ORDER BY bucket_start ASC",
    )
    .bind(start_millis)
    .bind(end_millis)
    .fetch_all(pool)
    .await?;
    Ok(rows)
}
