//! Daily sales reconciliation engine
//!
//! Composes the order ledger and the daily-report state machine into the
//! reporting surfaces:
//!
//! - **sales summary**: count/sum over an arbitrary range plus a sparse
//!   hourly series (only hours that had orders)
//! - **X-Report**: today's fixed 24-bucket hourly series; all zeros once
//!   the day is closed
//! - **Z-Report**: the once-per-day closing that freezes today's totals
//!
//! The two series keep different fill policies on purpose: the range
//! chart carries only populated hours, the daily timeline always all 24.
//!
//! Every ledger aggregation is bounded by the configured query timeout;
//! a timed-out aggregation fails the whole request instead of silently
//! returning a partial series.

use std::future::Future;
use std::time::Duration;

use chrono::{NaiveDate, TimeZone};
use chrono_tz::Tz;
use serde::{Deserialize, Serialize};
use sqlx::SqlitePool;

use crate::db::repository::order::HourBucketRow;
use crate::db::repository::{RepoResult, daily_report, order};
use crate::utils::time::{self, HOUR_MILLIS};
use crate::utils::{AppError, AppResult};
use shared::models::DailyReport;

/// Hours in the fixed X-Report series
pub const HOURS_PER_DAY: usize = 24;

/// One labeled hour bucket ("09:00" -> summed amount)
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct HourlySales {
    pub hour: String,
    pub amount: f64,
}

/// Today's hourly report (X-Report)
#[derive(Debug, Clone, Serialize)]
pub struct XReport {
    pub business_date: String,
    /// Set when the day is already closed; all buckets are zero then
    pub closed: bool,
    /// Always exactly 24 entries, hours with no orders report zero
    pub hours: Vec<HourlySales>,
    pub message: String,
}

/// Aggregated sales over an arbitrary time range
#[derive(Debug, Clone, Serialize)]
pub struct SalesSummary {
    pub order_count: i64,
    pub total_sales: f64,
    /// Sparse: one entry per hour that had at least one order, ascending
    pub series: Vec<HourlySales>,
}

/// Closing status for a business date
#[derive(Debug, Clone, Serialize)]
pub struct ClosingStatus {
    pub business_date: String,
    pub closed: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub closed_at: Option<i64>,
    /// Frozen order count (0 while the day is open)
    pub total_orders: i64,
    /// Frozen sales total (0 while the day is open)
    pub total_sales: f64,
}

/// Format an hour-of-day label: 9 -> "09:00"
fn hour_label(hour: i64) -> String {
    format!("{:02}:00", hour)
}

/// The all-zero 24-entry series, used for closed days
fn zeroed_day_series() -> Vec<HourlySales> {
    (0..HOURS_PER_DAY as i64)
        .map(|h| HourlySales {
            hour: hour_label(h),
            amount: 0.0,
        })
        .collect()
}

/// Spread sparse bucket rows over a dense 24-entry day series.
///
/// Bucket starts are hour-truncated millis; the hour index is the offset
/// from local midnight. Rows outside 0..24 (possible on DST-shift days)
/// are dropped rather than panicking.
fn fill_day_series(rows: &[HourBucketRow], day_start: i64) -> Vec<HourlySales> {
    let mut series = zeroed_day_series();
    for row in rows {
        let hour = (row.bucket_start - day_start).div_euclid(HOUR_MILLIS);
        if let Ok(idx) = usize::try_from(hour)
            && idx < HOURS_PER_DAY
        {
            series[idx].amount += row.amount;
        }
    }
    series
}

/// Label sparse bucket rows with their local hour, preserving order.
fn sparse_series(rows: &[HourBucketRow], tz: Tz) -> Vec<HourlySales> {
    rows.iter()
        .map(|row| {
            let hour = tz
                .timestamp_millis_opt(row.bucket_start)
                .single()
                .map(|dt| chrono::Timelike::hour(&dt) as i64)
                .unwrap_or(0);
            HourlySales {
                hour: hour_label(hour),
                amount: row.amount,
            }
        })
        .collect()
}

/// Bound an aggregate query by the configured timeout.
async fn bounded<T>(
    limit: Duration,
    fut: impl Future<Output = RepoResult<T>>,
) -> AppResult<T> {
    match tokio::time::timeout(limit, fut).await {
        Ok(result) => Ok(result?),
        Err(_) => Err(AppError::internal(format!(
            "Report query timed out after {}ms",
            limit.as_millis()
        ))),
    }
}

/// Build today's X-Report.
///
/// Consults the closing state machine first: a closed day short-circuits
/// to the zeroed series without touching the ledger. The check and the
/// computation are not one transaction; a close racing an in-flight
/// X-Report may yield either a zero or a last-moment live report, and
/// both are acceptable.
pub async fn build_x_report(
    pool: &SqlitePool,
    tz: Tz,
    query_timeout: Duration,
) -> AppResult<XReport> {
    let date = time::today(tz);
    let date_str = date.format("%Y-%m-%d").to_string();

    let report = daily_report::find_by_date(pool, &date_str).await?;
    if report.is_some_and(|r| r.closed) {
        tracing::debug!(date = %date_str, "X-Report requested for closed day, returning zeros");
        return Ok(XReport {
            business_date: date_str.clone(),
            closed: true,
            hours: zeroed_day_series(),
            message: format!("Day {date_str} is closed; totals are frozen in the Z-Report"),
        });
    }

    let day_start = time::day_start_millis(date, tz);
    let day_end = time::day_end_millis(date, tz);
    let rows = bounded(query_timeout, order::hourly_buckets(pool, day_start, day_end)).await?;

    Ok(XReport {
        business_date: date_str.clone(),
        closed: false,
        hours: fill_day_series(&rows, day_start),
        message: format!("Live hourly sales for {date_str}"),
    })
}

/// Aggregate sales over `[start, end)` with the sparse hourly series.
pub async fn build_sales_summary(
    pool: &SqlitePool,
    start_millis: i64,
    end_millis: i64,
    tz: Tz,
    query_timeout: Duration,
) -> AppResult<SalesSummary> {
    let totals = bounded(
        query_timeout,
        order::aggregate_range(pool, start_millis, end_millis),
    )
    .await?;
    let rows = bounded(
        query_timeout,
        order::hourly_buckets(pool, start_millis, end_millis),
    )
    .await?;

    Ok(SalesSummary {
        order_count: totals.order_count,
        total_sales: totals.total_sales,
        series: sparse_series(&rows, tz),
    })
}

/// Closing status for a date: frozen totals when closed, zeros while open.
pub async fn closing_status(pool: &SqlitePool, date: NaiveDate) -> AppResult<ClosingStatus> {
    let date_str = date.format("%Y-%m-%d").to_string();
    let report = daily_report::find_by_date(pool, &date_str).await?;

    Ok(match report {
        Some(r) if r.closed => ClosingStatus {
            business_date: date_str,
            closed: true,
            closed_at: r.closed_at,
            total_orders: r.total_orders,
            total_sales: r.total_sales,
        },
        _ => ClosingStatus {
            business_date: date_str,
            closed: false,
            closed_at: None,
            total_orders: 0,
            total_sales: 0.0,
        },
    })
}

/// Run the Z-Report for a date: freeze the day's totals.
///
/// Fails with a conflict if the date is already closed.
pub async fn close_day(pool: &SqlitePool, date: NaiveDate, tz: Tz) -> AppResult<DailyReport> {
    let date_str = date.format("%Y-%m-%d").to_string();
    let day_start = time::day_start_millis(date, tz);
    let day_end = time::day_end_millis(date, tz);

    let report = daily_report::close(pool, &date_str, day_start, day_end).await?;
    tracing::info!(
        date = %date_str,
        total_orders = report.total_orders,
        total_sales = report.total_sales,
        "Z-Report finalized"
    );
    Ok(report)
}

/// Administrative reset: reopen a date so it can be closed again.
pub async fn reopen_day(pool: &SqlitePool, date: NaiveDate) -> AppResult<()> {
    let date_str = date.format("%Y-%m-%d").to_string();
    daily_report::clear(pool, &date_str).await?;
    tracing::warn!(date = %date_str, "Daily report cleared (administrative reset)");
    Ok(())
}
