//! Order Model
//!
//! One row per completed transaction. The orders table is the append-only
//! ledger every report reads from: rows are created by checkout and never
//! mutated or deleted afterwards.

use serde::{Deserialize, Serialize};

/// Order entity (one completed transaction)
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "db", derive(sqlx::FromRow))]
pub struct Order {
    pub id: i64,
    /// Creation instant (Unix millis, immutable)
    pub created_at: i64,
    /// Total cost of the transaction (non-negative)
    pub total_amount: f64,
    pub note: Option<String>,
}

/// Create order payload (kiosk checkout)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OrderCreate {
    pub total_amount: f64,
    pub note: Option<String>,
}
