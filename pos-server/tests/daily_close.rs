//! End-of-day closing state machine tests
//!
//! Exercises the daily report repository against a real SQLite database:
//! the atomic close upsert, conflict on double-close, and the
//! administrative reset.

use std::sync::atomic::{AtomicI64, Ordering};

use chrono::NaiveDate;
use pos_server::db::DbService;
use pos_server::db::repository::{RepoError, daily_report};
use pos_server::utils::time;
use sqlx::SqlitePool;

const TZ: chrono_tz::Tz = chrono_tz::UTC;

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

fn test_date() -> NaiveDate {
    NaiveDate::from_ymd_opt(2026, 3, 10).unwrap()
}

#[tokio::test]
async fn close_freezes_ledger_totals() {
    let (_dir, pool) = setup().await;
    let date = test_date();
    let day_start = time::day_start_millis(date, TZ);
    let day_end = time::day_end_millis(date, TZ);

    insert_order(&pool, day_start + 9 * time::HOUR_MILLIS, 10.0).await;
    insert_order(&pool, day_start + 12 * time::HOUR_MILLIS, 25.5).await;
    insert_order(&pool, day_start + 21 * time::HOUR_MILLIS, 4.5).await;
    // Previous day: must not count
    insert_order(&pool, day_start - time::HOUR_MILLIS, 99.0).await;

    let report = daily_report::close(&pool, "2026-03-10", day_start, day_end)
        .await
        .expect("close should succeed");

    assert!(report.closed);
    assert_eq!(report.business_date, "2026-03-10");
    assert_eq!(report.total_orders, 3);
    assert!((report.total_sales - 40.0).abs() < 1e-9);
    assert!(report.closed_at.is_some());
}

#[tokio::test]
async fn close_twice_returns_conflict() {
    let (_dir, pool) = setup().await;
    let date = test_date();
    let day_start = time::day_start_millis(date, TZ);
    let day_end = time::day_end_millis(date, TZ);

    daily_report::close(&pool, "2026-03-10", day_start, day_end)
        .await
        .expect("first close succeeds");

    let second = daily_report::close(&pool, "2026-03-10", day_start, day_end).await;
    assert!(matches!(second, Err(RepoError::Conflict(_))));
}

#[tokio::test]
async fn concurrent_closes_have_exactly_one_winner() {
    let (_dir, pool) = setup().await;
    let date = test_date();
    let day_start = time::day_start_millis(date, TZ);
    let day_end = time::day_end_millis(date, TZ);

    insert_order(&pool, day_start + 10 * time::HOUR_MILLIS, 12.0).await;
    insert_order(&pool, day_start + 11 * time::HOUR_MILLIS, 8.0).await;

    const CLOSERS: usize = 8;
    let mut tasks = tokio::task::JoinSet::new();
    for _ in 0..CLOSERS {
        let pool = pool.clone();
        tasks.spawn(async move {
            daily_report::close(&pool, "2026-03-10", day_start, day_end).await
        });
    }

    let mut successes = 0;
    let mut conflicts = 0;
    while let Some(joined) = tasks.join_next().await {
        match joined.expect("closer task must not panic") {
            Ok(report) => {
                successes += 1;
                assert_eq!(report.total_orders, 2);
                assert!((report.total_sales - 20.0).abs() < 1e-9);
            }
            Err(RepoError::Conflict(_)) => conflicts += 1,
            Err(other) => panic!("unexpected close error: {other}"),
        }
    }

    assert_eq!(successes, 1, "exactly one closer may win");
    assert_eq!(conflicts, CLOSERS - 1);
}

#[tokio::test]
async fn closed_totals_ignore_late_ledger_inserts() {
    let (_dir, pool) = setup().await;
    let date = test_date();
    let day_start = time::day_start_millis(date, TZ);
    let day_end = time::day_end_millis(date, TZ);

    insert_order(&pool, day_start + 13 * time::HOUR_MILLIS, 30.0).await;
    let frozen = daily_report::close(&pool, "2026-03-10", day_start, day_end)
        .await
        .expect("close succeeds");

    // A late order lands in the ledger after closing
    insert_order(&pool, day_start + 14 * time::HOUR_MILLIS, 100.0).await;

    let after = daily_report::find_by_date(&pool, "2026-03-10")
        .await
        .expect("status read succeeds")
        .expect("report exists");
    assert_eq!(after.total_orders, frozen.total_orders);
    assert_eq!(after.total_sales, frozen.total_sales);
    assert_eq!(after.closed_at, frozen.closed_at);
}

#[tokio::test]
async fn status_reads_are_idempotent() {
    let (_dir, pool) = setup().await;
    let date = test_date();
    let day_start = time::day_start_millis(date, TZ);
    let day_end = time::day_end_millis(date, TZ);

    // Open day: no record either time
    let open_a = daily_report::find_by_date(&pool, "2026-03-10").await.unwrap();
    let open_b = daily_report::find_by_date(&pool, "2026-03-10").await.unwrap();
    assert!(open_a.is_none());
    assert!(open_b.is_none());

    daily_report::close(&pool, "2026-03-10", day_start, day_end)
        .await
        .expect("close succeeds");

    let closed_a = daily_report::find_by_date(&pool, "2026-03-10").await.unwrap().unwrap();
    let closed_b = daily_report::find_by_date(&pool, "2026-03-10").await.unwrap().unwrap();
    assert_eq!(closed_a.closed, closed_b.closed);
    assert_eq!(closed_a.closed_at, closed_b.closed_at);
    assert_eq!(closed_a.total_orders, closed_b.total_orders);
    assert_eq!(closed_a.total_sales, closed_b.total_sales);
}

#[tokio::test]
async fn clear_reopens_the_day() {
    let (_dir, pool) = setup().await;
    let date = test_date();
    let day_start = time::day_start_millis(date, TZ);
    let day_end = time::day_end_millis(date, TZ);

    daily_report::close(&pool, "2026-03-10", day_start, day_end)
        .await
        .expect("first close succeeds");

    daily_report::clear(&pool, "2026-03-10")
        .await
        .expect("clear succeeds");
    assert!(
        daily_report::find_by_date(&pool, "2026-03-10")
            .await
            .unwrap()
            .is_none()
    );

    // Clearing an already-open day is a no-op, not an error
    daily_report::clear(&pool, "2026-03-10")
        .await
        .expect("clearing an open day succeeds");

    // The day can be closed again after the reset
    let reclosed = daily_report::close(&pool, "2026-03-10", day_start, day_end).await;
    assert!(reclosed.is_ok());
}

#[tokio::test]
async fn close_with_empty_ledger_freezes_zeros() {
    let (_dir, pool) = setup().await;
    let date = test_date();
    let day_start = time::day_start_millis(date, TZ);
    let day_end = time::day_end_millis(date, TZ);

    let report = daily_report::close(&pool, "2026-03-10", day_start, day_end)
        .await
        .expect("closing an empty day succeeds");
    assert!(report.closed);
    assert_eq!(report.total_orders, 0);
    assert_eq!(report.total_sales, 0.0);
}
