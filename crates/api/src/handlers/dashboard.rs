//! Handler for the deadline dashboard.

use axum::extract::{Query, State};
use axum::Json;
use chrono::Utc;
use docket_db::models::dashboard::DashboardSummary;
use docket_db::repositories::DashboardRepo;

use crate::error::AppResult;
use crate::query::{parse_number, DashboardParams};
use crate::response::DataResponse;
use crate::state::AppState;

/// GET /api/v1/dashboard
///
/// Buckets are computed against the current UTC date. `?limit=` overrides
/// the configured recently-completed length.
pub async fn summary(
    State(state): State<AppState>,
    Query(params): Query<DashboardParams>,
) -> AppResult<Json<DataResponse<DashboardSummary>>> {
    let today = Utc::now().date_naive();
    let limit = parse_number(params.limit.as_deref())
        .unwrap_or(state.config.recently_completed_limit);

    let summary = DashboardRepo::summary(&state.pool, today, Some(limit)).await?;
    Ok(Json(DataResponse { data: summary }))
}
