//! Lotus POS Server - restaurant point-of-sale backend
//!
//! # Architecture overview
//!
//! REST backend for the ordering kiosk and the manager dashboard. The
//! order ledger, daily-report table and inventory table live in embedded
//! SQLite; all cross-request state is in the database, handlers hold no
//! in-process mutable state.
//!
//! # Module structure
//!
//! ```text
//! pos-server/src/
//! ├── core/          # Config, state, server
//! ├── api/           # HTTP routes and handlers
//! ├── db/            # SQLite pool and repositories
//! ├── reporting/     # Daily sales reconciliation engine (X/Z reports)
//! └── utils/         # Errors, time, logging, validation
//! ```

pub mod api;
pub mod core;
pub mod db;
pub mod reporting;
pub mod utils;

// Re-export common types
pub use crate::core::{Config, Server, ServerState};
pub use utils::{AppError, AppResult};

// Re-export logger functions
pub use utils::logger::{init_logger, init_logger_with_file};

/// Startup banner
pub fn print_banner() {
    println!(
        r#"
    __    ____  ________  _______
   / /   / __ \/_  __/ / / / ___/
  / /   / / / / / / / / / /\__ \
 / /___/ /_/ / / / / /_/ /___/ /
/_____/\____/ /_/  \____//____/   POS
    "#
    );
}
