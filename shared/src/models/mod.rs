//! Data models
//!
//! Shared between pos-server and frontend (via API).
//! DB row types use `#[cfg_attr(feature = "db", derive(sqlx::FromRow))]`.
//! All IDs are `i64` (SQLite INTEGER PRIMARY KEY).

pub mod daily_report;
pub mod inventory_item;
pub mod order;

// Re-exports
pub use daily_report::*;
pub use inventory_item::*;
pub use order::*;
