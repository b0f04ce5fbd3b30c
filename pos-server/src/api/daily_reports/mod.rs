//! Daily Reports API module (X-Report / Z-Report)

mod handler;

use axum::{
    Router,
    routing::{get, post},
};

use crate::core::ServerState;

pub fn router() -> Router<ServerState> {
    Router::new().nest("/api/daily-reports", routes())
}

fn routes() -> Router<ServerState> {
    Router::new()
        .route("/", get(handler::list))
        .route("/status", get(handler::status))
        .route("/x-report", get(handler::x_report))
        .route("/close", post(handler::close))
        .route("/reset", post(handler::reset))
        .route("/date/{date}", get(handler::get_by_date))
}
