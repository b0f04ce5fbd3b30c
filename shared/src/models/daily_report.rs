//! Daily Report Model (end-of-day settlement)

use serde::{Deserialize, Serialize};

/// Daily report - one row per business date.
///
/// `closed` is the Z-Report flag: once set, `closed_at`, `total_orders`
/// and `total_sales` are a frozen snapshot of the ledger at closing time
/// and never change again. The only way back to an open day is the
/// administrative reset, which deletes the row.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "db", derive(sqlx::FromRow))]
pub struct DailyReport {
    pub id: i64,
    /// Business date (YYYY-MM-DD format, natural key)
    pub business_date: String,
    /// Has the Z-Report been run for this date
    pub closed: bool,
    /// When the day was closed (Unix millis, set exactly once)
    pub closed_at: Option<i64>,
    /// Order count as of closing (frozen)
    pub total_orders: i64,
    /// Sales total as of closing (frozen)
    pub total_sales: f64,
    pub created_at: i64,
}
