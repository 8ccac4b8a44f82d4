//! Handlers for weekly, monthly and CSV reports.

use axum::extract::{Query, State};
use axum::http::header::{CONTENT_DISPOSITION, CONTENT_TYPE};
use axum::response::IntoResponse;
use axum::Json;
use chrono::Utc;
use docket_core::reports::{resolve_weekly_columns, WEEKLY_FIELD_OPTIONS};
use docket_db::models::report::{MonthlyStats, WeeklyRow};
use docket_db::repositories::ReportRepo;
use serde::Serialize;

use crate::error::AppResult;
use crate::query::{MonthlyReportParams, ProjectListParams, WeeklyReportParams};
use crate::response::{DataResponse, ListResponse};
use crate::state::AppState;

/// Download name for CSV exports.
const EXPORT_FILENAME: &str = "projects_export.csv";

/// GET /api/v1/reports/weekly?fields=a,b,c
pub async fn weekly(
    State(state): State<AppState>,
    Query(params): Query<WeeklyReportParams>,
) -> AppResult<Json<ListResponse<WeeklyRow>>> {
    let columns = resolve_weekly_columns(&params.field_names());
    let rows = ReportRepo::weekly_status(&state.pool, &columns).await?;
    Ok(Json(rows.into()))
}

/// A selectable weekly column.
#[derive(Debug, Serialize)]
pub struct WeeklyFieldOption {
    pub field: &'static str,
    pub label: &'static str,
}

/// GET /api/v1/reports/weekly/fields
pub async fn weekly_fields() -> Json<DataResponse<Vec<WeeklyFieldOption>>> {
    let options = WEEKLY_FIELD_OPTIONS
        .iter()
        .map(|&(field, label)| WeeklyFieldOption { field, label })
        .collect();
    Json(DataResponse { data: options })
}

/// GET /api/v1/reports/monthly?year=YYYY&month=M
pub async fn monthly(
    State(state): State<AppState>,
    Query(params): Query<MonthlyReportParams>,
) -> AppResult<Json<DataResponse<MonthlyStats>>> {
    let (year, month) = params.resolve(Utc::now());
    let stats = ReportRepo::monthly_stats(&state.pool, year, month).await?;
    Ok(Json(DataResponse { data: stats }))
}

/// GET /api/v1/projects/export
///
/// Accepts the same filter parameters as the project list.
pub async fn export_csv(
    State(state): State<AppState>,
    Query(params): Query<ProjectListParams>,
) -> AppResult<impl IntoResponse> {
    let filter = params.into_filter();
    let csv = ReportRepo::export_csv(&state.pool, &filter).await?;

    Ok((
        [
            (CONTENT_TYPE, "text/csv; charset=utf-8".to_string()),
            (
                CONTENT_DISPOSITION,
                format!("attachment; filename={EXPORT_FILENAME}"),
            ),
        ],
        csv,
    ))
}
