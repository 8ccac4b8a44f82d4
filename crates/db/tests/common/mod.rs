//! Shared fixtures for repository integration tests.

#![allow(dead_code)]

use chrono::{NaiveDate, TimeZone, Utc};
use docket_core::status::ProjectStatus;
use docket_core::types::{CivilDate, DbId, Timestamp};
use docket_db::models::project::{NewProject, Project, ProjectPatch};
use docket_db::repositories::ProjectRepo;
use sqlx::PgPool;

pub fn date(y: i32, m: u32, d: u32) -> CivilDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

pub fn ts(y: i32, m: u32, d: u32, h: u32) -> Timestamp {
    Utc.with_ymd_and_hms(y, m, d, h, 0, 0).unwrap()
}

/// A minimal valid project in the Finance department.
pub fn new_project(name: &str) -> NewProject {
    NewProject {
        project_name: name.to_string(),
        project_group: None,
        department: "Finance".to_string(),
        date_to_client: date(2026, 1, 5),
        date_assigned_to_us: date(2026, 1, 2),
        internal_deadline: None,
        delivery_deadline: None,
        assigned_attorney: "Ada Smith".to_string(),
        qcp_attorney: "Ben Jones".to_string(),
        status: ProjectStatus::InProgress,
        notes: None,
    }
}

pub async fn create(pool: &PgPool, input: NewProject) -> Project {
    ProjectRepo::create(pool, &input).await.unwrap()
}

pub async fn create_due(pool: &PgPool, name: &str, deadline: Option<CivilDate>) -> Project {
    create(
        pool,
        NewProject {
            delivery_deadline: deadline,
            ..new_project(name)
        },
    )
    .await
}

pub async fn set_status(pool: &PgPool, id: DbId, status: ProjectStatus) -> Project {
    let patch = ProjectPatch {
        status: Some(status),
        ..Default::default()
    };
    ProjectRepo::update(pool, id, &patch).await.unwrap().unwrap()
}

/// Backdate a row's timestamps directly (the API never writes them).
pub async fn set_timestamps(pool: &PgPool, id: DbId, created_at: Timestamp, updated_at: Timestamp) {
    sqlx::query("UPDATE projects SET created_at = $2, updated_at = $3 WHERE id = $1")
        .bind(id)
        .bind(created_at)
        .bind(updated_at)
        .execute(pool)
        .await
        .unwrap();
}

pub fn ids(projects: &[Project]) -> Vec<DbId> {
    projects.iter().map(|p| p.id).collect()
}
