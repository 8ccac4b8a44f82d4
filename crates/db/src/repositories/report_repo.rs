//! Weekly, monthly and CSV reports.

use std::collections::BTreeMap;

use docket_core::reports::{average_days_to_completion, month_window, WeeklyColumn};
use docket_core::status::ProjectStatus;
use docket_core::types::{CivilDate, Timestamp};
use sqlx::PgPool;

use crate::models::project::{Project, ProjectFilter};
use crate::models::report::{render_projects_csv, weekly_row, MonthlyStats, WeeklyRow};
use crate::repositories::project_repo::{ProjectRepo, COLUMNS};

/// Error raised while building a report.
#[derive(Debug, thiserror::Error)]
pub enum ReportError {
    #[error(transparent)]
    Core(#[from] docket_core::error::CoreError),

    #[error(transparent)]
    Database(#[from] sqlx::Error),
}

/// Provides report queries.
pub struct ReportRepo;

impl ReportRepo {
    /// One row per live, non-completed project, deadline ascending with
    /// undated projects last.
    pub async fn weekly_status(
        pool: &PgPool,
        columns: &[WeeklyColumn],
    ) -> Result<Vec<WeeklyRow>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM projects \
             WHERE deleted_at IS NULL AND status <> $1 \
             ORDER BY delivery_deadline ASC NULLS LAST, id ASC"
        );
        let projects = sqlx::query_as::<_, Project>(&query)
            .bind(ProjectStatus::Completed.as_str())
            .fetch_all(pool)
            .await?;

        Ok(projects.iter().map(|p| weekly_row(p, columns)).collect())
    }

    /// Opened / completed counts, breakdowns and mean cycle time for one
    /// UTC civil month.
    pub async fn monthly_stats(
        pool: &PgPool,
        year: i32,
        month: u32,
    ) -> Result<MonthlyStats, ReportError> {
        let window = month_window(year, month)?;

        let projects_opened = sqlx::query_scalar::<_, i64>(
            "SELECT COUNT(*)::BIGINT FROM projects \
             WHERE deleted_at IS NULL AND created_at BETWEEN $1 AND $2",
        )
        .bind(window.start)
        .bind(window.end)
        .fetch_one(pool)
        .await?;

        // Any edit inside the window to an already-completed project counts
        // here, since updated_at is the only completion signal stored.
        let completed = sqlx::query_as::<_, (Timestamp, CivilDate)>(
            "SELECT updated_at, date_assigned_to_us FROM projects \
             WHERE deleted_at IS NULL AND status = $1 AND updated_at BETWEEN $2 AND $3",
        )
        .bind(ProjectStatus::Completed.as_str())
        .bind(window.start)
        .bind(window.end)
        .fetch_all(pool)
        .await?;

        let by_department = Self::opened_breakdown(pool, "department", window.start, window.end)
            .await?;
        let by_attorney =
            Self::opened_breakdown(pool, "assigned_attorney", window.start, window.end).await?;

        Ok(MonthlyStats {
            year,
            month,
            projects_opened,
            projects_completed: completed.len() as i64,
            by_department,
            by_attorney,
            avg_days_to_completion: average_days_to_completion(completed),
        })
    }

    /// Render the projects selected by `filter` as CSV.
    pub async fn export_csv(pool: &PgPool, filter: &ProjectFilter) -> Result<String, sqlx::Error> {
        let projects = ProjectRepo::list(pool, filter).await?;
        tracing::debug!(rows = projects.len(), "CSV export rendered");
        Ok(render_projects_csv(&projects))
    }

    async fn opened_breakdown(
        pool: &PgPool,
        column: &str,
        start: Timestamp,
        end: Timestamp,
    ) -> Result<BTreeMap<String, i64>, sqlx::Error> {
        let query = format!(
            "SELECT {column}, COUNT(*)::BIGINT FROM projects \
             WHERE deleted_at IS NULL AND created_at BETWEEN $1 AND $2 \
             GROUP BY {column}"
        );
        let rows = sqlx::query_as::<_, (String, i64)>(&query)
            .bind(start)
            .bind(end)
            .fetch_all(pool)
            .await?;
        Ok(rows.into_iter().collect())
    }
}
