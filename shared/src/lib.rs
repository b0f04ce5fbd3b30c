//! Shared types for the Lotus POS system
//!
//! Domain models used by the server and (via API) the kiosk and manager
//! frontends, plus small ID/time utilities.

pub mod models;
pub mod util;

// Re-exports
pub use serde::{Deserialize, Serialize};
