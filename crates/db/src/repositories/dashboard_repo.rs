//! Read-only dashboard queries over live projects.

use docket_core::deadlines::{bucket_for, clamp_recently_completed_limit, DeadlineBucket};
use docket_core::status::ProjectStatus;
use docket_core::types::CivilDate;
use sqlx::PgPool;

use crate::models::dashboard::DashboardSummary;
use crate::models::project::Project;
use crate::repositories::project_repo::COLUMNS;

/// Provides the deadline buckets and the recently-completed list.
pub struct DashboardRepo;

impl DashboardRepo {
    /// Active projects with a deadline strictly before `today`.
    pub async fn overdue(pool: &PgPool, today: CivilDate) -> Result<Vec<Project>, sqlx::Error> {
        Self::bucket(pool, today, DeadlineBucket::Overdue).await
    }

    /// Active projects due in `[today, today + 7 days]`.
    pub async fn due_this_week(
        pool: &PgPool,
        today: CivilDate,
    ) -> Result<Vec<Project>, sqlx::Error> {
        Self::bucket(pool, today, DeadlineBucket::DueThisWeek).await
    }

    /// Active projects due after `today + 7 days`.
    pub async fn longer_deadline(
        pool: &PgPool,
        today: CivilDate,
    ) -> Result<Vec<Project>, sqlx::Error> {
        Self::bucket(pool, today, DeadlineBucket::LongerDeadline).await
    }

    /// Most recently updated completed projects, newest first.
    ///
    /// `limit` is clamped to `1..=100`; `None` uses the default of 10.
    pub async fn recently_completed(
        pool: &PgPool,
        limit: Option<i64>,
    ) -> Result<Vec<Project>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM projects \
             WHERE deleted_at IS NULL AND status = $1 \
             ORDER BY updated_at DESC, id DESC \
             LIMIT $2"
        );
        sqlx::query_as::<_, Project>(&query)
            .bind(ProjectStatus::Completed.as_str())
            .bind(clamp_recently_completed_limit(limit))
            .fetch_all(pool)
            .await
    }

    /// All four lists. The three deadline buckets come from a single scan so
    /// they partition the same snapshot.
    pub async fn summary(
        pool: &PgPool,
        today: CivilDate,
        recently_completed_limit: Option<i64>,
    ) -> Result<DashboardSummary, sqlx::Error> {
        let mut overdue = Vec::new();
        let mut due_this_week = Vec::new();
        let mut longer_deadline = Vec::new();

        for project in Self::active_with_deadline(pool).await? {
            match bucket_for(project.status, project.delivery_deadline, today) {
                Some(DeadlineBucket::Overdue) => overdue.push(project),
                Some(DeadlineBucket::DueThisWeek) => due_this_week.push(project),
                Some(DeadlineBucket::LongerDeadline) => longer_deadline.push(project),
                None => {}
            }
        }

        let recently_completed = Self::recently_completed(pool, recently_completed_limit).await?;

        tracing::debug!(
            %today,
            overdue = overdue.len(),
            due_this_week = due_this_week.len(),
            longer_deadline = longer_deadline.len(),
            "Dashboard summary computed"
        );

        Ok(DashboardSummary {
            today,
            overdue: overdue.into(),
            due_this_week: due_this_week.into(),
            longer_deadline: longer_deadline.into(),
            recently_completed: recently_completed.into(),
        })
    }

    async fn bucket(
        pool: &PgPool,
        today: CivilDate,
        wanted: DeadlineBucket,
    ) -> Result<Vec<Project>, sqlx::Error> {
        let projects = Self::active_with_deadline(pool).await?;
        Ok(projects
            .into_iter()
            .filter(|p| bucket_for(p.status, p.delivery_deadline, today) == Some(wanted))
            .collect())
    }

    /// Live, non-completed projects with a delivery deadline, earliest first.
    async fn active_with_deadline(pool: &PgPool) -> Result<Vec<Project>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM projects \
             WHERE deleted_at IS NULL AND status <> $1 AND delivery_deadline IS NOT NULL \
             ORDER BY delivery_deadline ASC, id ASC"
        );
        sqlx::query_as::<_, Project>(&query)
            .bind(ProjectStatus::Completed.as_str())
            .fetch_all(pool)
            .await
    }
}
