//! Reporting engine tests: sales summaries and the X-Report
//!
//! The X-Report tests use the real clock ("today" in UTC) because the
//! bucketer always reports the current business date; orders are
//! inserted at now() so they land inside that day.

use std::sync::atomic::{AtomicI64, Ordering};
use std::time::Duration;

use chrono::NaiveDate;
use pos_server::db::DbService;
use pos_server::reporting;
use pos_server::utils::time;
use sqlx::SqlitePool;

const TZ: chrono_tz::Tz = chrono_tz::UTC;
const QUERY_TIMEOUT: Duration = Duration::from_secs(5);

static NEXT_ID: AtomicI64 = AtomicI64::new(1);

async fn setup() -> (tempfile::TempDir, SqlitePool) {
    let dir = tempfile::tempdir().expect("create temp dir");
    let db_path = dir.path().join("test.db");
    let db = DbService::new(&db_path.to_string_lossy())
        .await
        .expect("open test database");
    (dir, db.pool)
}

async fn insert_order(pool: &SqlitePool, created_at: i64, total: f64) {
    sqlx::query("INSERT INTO orders (id, created_at, total_amount, note) VALUES (?1, ?2, ?3, NULL)")
        .bind(NEXT_ID.fetch_add(1, Ordering::Relaxed))
        .bind(created_at)
        .bind(total)
        .execute(pool)
        .await
        .expect("insert order");
}

#[tokio::test]
async fn sales_summary_emits_sparse_series() {
    let (_dir, pool) = setup().await;
    let date = NaiveDate::from_ymd_opt(2026, 3, 10).unwrap();
    let day_start = time::day_start_millis(date, TZ);

    // Two orders inside hour 09, nothing anywhere else
    insert_order(&pool, day_start + 9 * time::HOUR_MILLIS + 15 * 60_000, 10.0).await;
    insert_order(&pool, day_start + 9 * time::HOUR_MILLIS + 45 * 60_000, 5.0).await;

    // Query 08:00 - 10:00
    let summary = reporting::build_sales_summary(
        &pool,
        day_start + 8 * time::HOUR_MILLIS,
        day_start + 10 * time::HOUR_MILLIS,
        TZ,
        QUERY_TIMEOUT,
    )
    .await
    .expect("summary succeeds");

    assert_eq!(summary.order_count, 2);
    assert!((summary.total_sales - 15.0).abs() < 1e-9);
    // Sparse: one entry for 09:00, no synthesized entry for 08:00
    assert_eq!(summary.series.len(), 1);
    assert_eq!(summary.series[0].hour, "09:00");
    assert!((summary.series[0].amount - 15.0).abs() < 1e-9);
}

#[tokio::test]
async fn sales_summary_of_empty_range_is_zero_not_error() {
    let (_dir, pool) = setup().await;
    let date = NaiveDate::from_ymd_opt(2026, 3, 10).unwrap();
    let day_start = time::day_start_millis(date, TZ);

    let summary = reporting::build_sales_summary(
        &pool,
        day_start,
        day_start + 24 * time::HOUR_MILLIS,
        TZ,
        QUERY_TIMEOUT,
    )
    .await
    .expect("empty range is a zero result, not an error");

    assert_eq!(summary.order_count, 0);
    assert_eq!(summary.total_sales, 0.0);
    assert!(summary.series.is_empty());
}

#[tokio::test]
async fn inverted_range_yields_zero_rows() {
    let (_dir, pool) = setup().await;
    let date = NaiveDate::from_ymd_opt(2026, 3, 10).unwrap();
    let day_start = time::day_start_millis(date, TZ);
    insert_order(&pool, day_start + time::HOUR_MILLIS, 10.0).await;

    let summary = reporting::build_sales_summary(
        &pool,
        day_start + 10 * time::HOUR_MILLIS,
        day_start, // end before start
        TZ,
        QUERY_TIMEOUT,
    )
    .await
    .expect("inverted range still succeeds");
    assert_eq!(summary.order_count, 0);
    assert!(summary.series.is_empty());
}

#[tokio::test]
async fn open_day_x_report_has_24_live_buckets() {
    let (_dir, pool) = setup().await;
    insert_order(&pool, shared::util::now_millis(), 12.5).await;
    insert_order(&pool, shared::util::now_millis(), 7.5).await;

    let report = reporting::build_x_report(&pool, TZ, QUERY_TIMEOUT)
        .await
        .expect("x-report succeeds");

    assert!(!report.closed);
    assert_eq!(report.hours.len(), reporting::HOURS_PER_DAY);
    assert_eq!(report.hours[0].hour, "00:00");
    assert_eq!(report.hours[23].hour, "23:00");
    let total: f64 = report.hours.iter().map(|h| h.amount).sum();
    assert!((total - 20.0).abs() < 1e-9);
}

#[tokio::test]
async fn closed_day_x_report_is_all_zeros() {
    let (_dir, pool) = setup().await;
    insert_order(&pool, shared::util::now_millis(), 42.0).await;

    let today = time::today(TZ);
    reporting::close_day(&pool, today, TZ)
        .await
        .expect("close succeeds");

    let report = reporting::build_x_report(&pool, TZ, QUERY_TIMEOUT)
        .await
        .expect("x-report succeeds after close");

    assert!(report.closed);
    assert_eq!(report.hours.len(), reporting::HOURS_PER_DAY);
    assert!(
        report.hours.iter().all(|h| h.amount == 0.0),
        "closed day must zero every bucket even though the ledger has orders"
    );
}

#[tokio::test]
async fn reset_restores_live_x_report() {
    let (_dir, pool) = setup().await;
    insert_order(&pool, shared::util::now_millis(), 18.0).await;

    let today = time::today(TZ);
    reporting::close_day(&pool, today, TZ)
        .await
        .expect("close succeeds");
    reporting::reopen_day(&pool, today)
        .await
        .expect("reset succeeds");

    let report = reporting::build_x_report(&pool, TZ, QUERY_TIMEOUT)
        .await
        .expect("x-report succeeds after reset");
    assert!(!report.closed);
    let total: f64 = report.hours.iter().map(|h| h.amount).sum();
    assert!((total - 18.0).abs() < 1e-9);
}

#[tokio::test]
async fn closing_status_reports_frozen_totals() {
    let (_dir, pool) = setup().await;
    insert_order(&pool, shared::util::now_millis(), 33.0).await;

    let today = time::today(TZ);
    let open = reporting::closing_status(&pool, today)
        .await
        .expect("status read succeeds");
    assert!(!open.closed);
    assert_eq!(open.total_orders, 0);

    reporting::close_day(&pool, today, TZ)
        .await
        .expect("close succeeds");

    let closed = reporting::closing_status(&pool, today)
        .await
        .expect("status read succeeds");
    assert!(closed.closed);
    assert_eq!(closed.total_orders, 1);
    assert!((closed.total_sales - 33.0).abs() < 1e-9);
    assert!(closed.closed_at.is_some());
}
