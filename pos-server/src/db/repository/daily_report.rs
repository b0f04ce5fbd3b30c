//! Daily Report Repository
//!
//! The closing state machine for a business date:
//!
//! | Current | Event   | Next             |
//! |---------|---------|------------------|
//! | OPEN    | close() | CLOSED           |
//! | CLOSED  | close() | CLOSED (conflict)|
//! | CLOSED  | clear() | OPEN             |
//! | OPEN    | clear() | OPEN (no-op)     |
//!
//! OPEN means no row exists for the date (or `closed = 0`); CLOSED means
//! the row exists with `closed = 1` and frozen totals. Every call site
//! that needs open/closed state goes through this module rather than
//! re-deriving it.

use super::{RepoError, RepoResult};
use shared::models::DailyReport;
use sqlx::SqlitePool;

const COLUMNS: &str = "id, business_date, closed, closed_at, total_orders, total_sales, created_at";

pub async fn find_by_date(pool: &SqlitePool, date: &str) -> RepoResult<Option<DailyReport>> {
    let report = sqlx::query_as::<_, DailyReport>(&format!(
        "SELECT {COLUMNS} FROM daily_report WHERE business_date = ?"
    ))
    .bind(date)
    .fetch_optional(pool)
    .await?;
    Ok(report)
}

pub async fn find_all(pool: &SqlitePool, limit: i32, offset: i32) -> RepoResult<Vec<DailyReport>> {
    let reports = sqlx::query_as::<_, DailyReport>(&format!(
        "SELECT {COLUMNS} FROM daily_report ORDER BY business_date DESC LIMIT ? OFFSET ?"
    ))
    .bind(limit)
    .bind(offset)
    .fetch_all(pool)
    .await?;
    Ok(reports)
}

pub async fn find_by_date_range(
    pool: &SqlitePool,
    start_date: &str,
    end_date: &str,
) -> RepoResult<Vec<DailyReport>> {
    let reports = sqlx::query_as::<_, DailyReport>(&format!(
        "SELECT {COLUMNS} FROM daily_report WHERE business_date >= ? AND business_date <= ? ORDER BY business_date DESC"
    ))
    .bind(start_date)
    .bind(end_date)
    .fetch_all(pool)
    .await?;
    Ok(reports)
}

/// Close a business date: aggregate the ledger over `[day_start, day_end)`
/// and freeze the totals, all in one statement.
///
/// The INSERT .. SELECT computes the totals and the upsert's
/// `WHERE daily_report.closed = 0` guard makes the OPEN -> CLOSED
/// transition conditional, so two concurrent closers race inside SQLite
/// and exactly one wins. The loser's statement affects zero rows, which
/// surfaces as [`RepoError::Conflict`].
pub async fn close(
    pool: &SqlitePool,
    date: &str,
    day_start: i64,
    day_end: i64,
) -> RepoResult<DailyReport> {
    let now = shared::util::now_millis();

    let rows = sqlx::query(
        r#"
        INSERT INTO daily_report (business_date, closed, closed_at, total_orders, total_sales, created_at)
        SELECT ?1, 1, ?2, COUNT(id), COALESCE(SUM(total_amount), 0.0), ?2
        FROM orders
        WHERE created_at >= ?3 AND created_at < ?4
        ON CONFLICT(business_date) DO UPDATE SET
            closed = 1,
            closed_at = excluded.closed_at,
            total_orders = excluded.total_orders,
            total_sales = excluded.total_sales
        WHERE daily_report.closed = 0
        "#,
    )
    .bind(date)
    .bind(now)
    .bind(day_start)
    .bind(day_end)
    .execute(pool)
    .await?;

    if rows.rows_affected() == 0 {
        return Err(RepoError::Conflict(format!(
            "Daily report for {date} already closed"
        )));
    }

    find_by_date(pool, date)
        .await?
        .ok_or_else(|| RepoError::Database(format!("Failed to close daily report for {date}")))
}

/// Administrative reset: reopen the date by deleting its row.
///
/// "Nothing to clear" is success: the date is OPEN either way.
pub async fn clear(pool: &SqlitePool, date: &str) -> RepoResult<()> {
    sqlx::query("DELETE FROM daily_report WHERE business_date = ?")
        .bind(date)
        .execute(pool)
        .await?;
    Ok(())
}
