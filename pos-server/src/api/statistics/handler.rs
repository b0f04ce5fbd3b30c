//! Statistics API Handlers

use axum::{
    Json,
    extract::{Query, State},
};
use chrono::{Datelike, Duration};
use serde::Deserialize;

use crate::core::ServerState;
use crate::reporting::{self, SalesSummary};
use crate::utils::AppResult;
use crate::utils::time;

// ============================================================================
// Query Parameters
// ============================================================================

#[derive(Debug, Deserialize)]
pub struct StatisticsQuery {
    /// today | week | month | custom (default today)
    #[serde(rename = "timeRange", default = "default_time_range")]
    pub time_range: String,
    #[serde(rename = "startDate")]
    pub start_date: Option<String>,
    #[serde(rename = "endDate")]
    pub end_date: Option<String>,
}

fn default_time_range() -> String {
    "today".to_string()
}

// ============================================================================
// Time Range Calculation
// ============================================================================

/// Resolve the requested range to `(start_millis, end_millis)`, half-open.
///
/// Unknown range names and a custom range with missing bounds both fall
/// back to today's full local day.
fn calculate_time_range(
    time_range: &str,
    custom_start: Option<&str>,
    custom_end: Option<&str>,
    tz: chrono_tz::Tz,
) -> (i64, i64) {
    let today = time::today(tz);
    let today_range = (
        time::day_start_millis(today, tz),
        time::day_end_millis(today, tz),
    );

    match time_range {
        "today" => today_range,
        "week" => {
            let weekday = today.weekday().num_days_from_monday();
            let week_start = today - Duration::days(weekday as i64);
            (
                time::day_start_millis(week_start, tz),
                time::day_end_millis(today, tz),
            )
        }
        "month" => {
            let month_start = today.with_day(1).unwrap_or(today);
            (
                time::day_start_millis(month_start, tz),
                time::day_end_millis(today, tz),
            )
        }
        "custom" => {
            if let (Some(s), Some(e)) = (custom_start, custom_end)
                && let (Ok(start_date), Ok(end_date)) = (time::parse_date(s), time::parse_date(e))
            {
                (
                    time::day_start_millis(start_date, tz),
                    time::day_end_millis(end_date, tz),
                )
            } else {
                today_range
            }
        }
        _ => today_range,
    }
}

// ============================================================================
// Handlers
// ============================================================================

/// GET /api/statistics/sales - sales summary over a time range
pub async fn get_sales_summary(
    State(state): State<ServerState>,
    Query(query): Query<StatisticsQuery>,
) -> AppResult<Json<SalesSummary>> {
    let tz = state.config.timezone;
    let (start, end) = calculate_time_range(
        &query.time_range,
        query.start_date.as_deref(),
        query.end_date.as_deref(),
        tz,
    );

    tracing::debug!(
        time_range = %query.time_range,
        start = start,
        end = end,
        "Fetching sales summary"
    );

    let summary = reporting::build_sales_summary(
        &state.pool,
        start,
        end,
        tz,
        state.config.report_query_timeout(),
    )
    .await?;

    Ok(Json(summary))
}
