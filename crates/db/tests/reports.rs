//! Integration tests for weekly, monthly and CSV reports.

mod common;

use assert_matches::assert_matches;
use common::*;
use docket_core::error::CoreError;
use docket_core::reports::resolve_weekly_columns;
use docket_core::status::ProjectStatus;
use docket_db::models::project::{NewProject, ProjectFilter};
use docket_db::repositories::{ProjectRepo, ReportError, ReportRepo};
use serde_json::Value;
use sqlx::PgPool;

// ---------------------------------------------------------------------------
// Weekly
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_weekly_lists_active_projects_by_deadline(pool: PgPool) {
    create_due(&pool, "Undated", None).await;
    create_due(&pool, "Later", Some(date(2026, 5, 1))).await;
    create_due(&pool, "Sooner", Some(date(2026, 4, 1))).await;
    let done = create_due(&pool, "Done", Some(date(2026, 3, 1))).await;
    set_status(&pool, done.id, ProjectStatus::Completed).await;
    let gone = create_due(&pool, "Gone", Some(date(2026, 3, 1))).await;
    ProjectRepo::soft_delete(&pool, gone.id).await.unwrap();

    let columns = resolve_weekly_columns::<&str>(&[]);
    let rows = ReportRepo::weekly_status(&pool, &columns).await.unwrap();

    let names: Vec<&Value> = rows.iter().map(|r| &r["project_name"]).collect();
    assert_eq!(names, ["Sooner", "Later", "Undated"]);
    assert_eq!(rows[0]["anticipated_completion"], "2026-04-01");
    assert_eq!(rows[2]["anticipated_completion"], Value::Null);
    assert!(rows.iter().all(|r| !r.contains_key("delivery_deadline")));
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_weekly_respects_requested_columns(pool: PgPool) {
    create_due(&pool, "Only", Some(date(2026, 4, 1))).await;

    let columns = resolve_weekly_columns(&["id", "bogus", "date_to_client"]);
    let rows = ReportRepo::weekly_status(&pool, &columns).await.unwrap();

    let keys: Vec<&str> = rows[0].keys().map(String::as_str).collect();
    assert_eq!(keys, ["id", "date_to_client"]);
    assert_eq!(rows[0]["date_to_client"], "2026-01-05");
}

// ---------------------------------------------------------------------------
// Monthly
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_monthly_counts_opened_inside_window(pool: PgPool) {
    let inside = create(&pool, new_project("January")).await;
    let before = create(&pool, new_project("December")).await;
    set_timestamps(&pool, inside.id, ts(2026, 1, 15, 10), ts(2026, 1, 15, 10)).await;
    set_timestamps(&pool, before.id, ts(2025, 12, 31, 23), ts(2025, 12, 31, 23)).await;

    let stats = ReportRepo::monthly_stats(&pool, 2026, 1).await.unwrap();
    assert_eq!(stats.year, 2026);
    assert_eq!(stats.month, 1);
    assert_eq!(stats.projects_opened, 1);
    assert_eq!(stats.by_department.get("Finance"), Some(&1));
    assert_eq!(stats.by_attorney.get("Ada Smith"), Some(&1));
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_monthly_completion_stats(pool: PgPool) {
    let quick = create(
        &pool,
        NewProject {
            date_assigned_to_us: date(2026, 2, 1),
            ..new_project("Quick")
        },
    )
    .await;
    let slow = create(
        &pool,
        NewProject {
            date_assigned_to_us: date(2026, 1, 1),
            assigned_attorney: "Cara Diaz".to_string(),
            ..new_project("Slow")
        },
    )
    .await;
    let open = create(&pool, new_project("Still open")).await;

    set_status(&pool, quick.id, ProjectStatus::Completed).await;
    set_status(&pool, slow.id, ProjectStatus::Completed).await;
    set_timestamps(&pool, quick.id, ts(2026, 2, 1, 9), ts(2026, 2, 4, 9)).await;
    set_timestamps(&pool, slow.id, ts(2026, 1, 1, 9), ts(2026, 2, 28, 23)).await;
    set_timestamps(&pool, open.id, ts(2026, 2, 2, 9), ts(2026, 2, 10, 9)).await;

    let stats = ReportRepo::monthly_stats(&pool, 2026, 2).await.unwrap();
    assert_eq!(stats.projects_opened, 2);
    assert_eq!(stats.projects_completed, 2);
    // (3 + 58) / 2 = 30.5
    assert_eq!(stats.avg_days_to_completion, Some(30.5));
    assert_eq!(stats.by_attorney.get("Cara Diaz"), None);
    assert_eq!(stats.by_attorney.get("Ada Smith"), Some(&2));
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_monthly_empty_month_has_no_average(pool: PgPool) {
    let stats = ReportRepo::monthly_stats(&pool, 2030, 6).await.unwrap();
    assert_eq!(stats.projects_opened, 0);
    assert_eq!(stats.projects_completed, 0);
    assert!(stats.by_department.is_empty());
    assert_eq!(stats.avg_days_to_completion, None);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_monthly_rejects_out_of_range(pool: PgPool) {
    assert_matches!(
        ReportRepo::monthly_stats(&pool, 2026, 13).await,
        Err(ReportError::Core(CoreError::Validation(_)))
    );
    assert_matches!(
        ReportRepo::monthly_stats(&pool, 1899, 1).await,
        Err(ReportError::Core(CoreError::Validation(_)))
    );
}

// ---------------------------------------------------------------------------
// CSV
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_csv_export_uses_filter(pool: PgPool) {
    create(&pool, new_project("One")).await;
    create(&pool, new_project("Two")).await;
    create(
        &pool,
        NewProject {
            department: "Planning".to_string(),
            ..new_project("Three")
        },
    )
    .await;

    let filter = ProjectFilter {
        department: Some("Finance".to_string()),
        ..Default::default()
    };
    let csv = ReportRepo::export_csv(&pool, &filter).await.unwrap();

    let lines: Vec<&str> = csv.split("\r\n").filter(|l| !l.is_empty()).collect();
    assert_eq!(lines.len(), 3);
    assert!(lines[0].starts_with("ID,Project Name,"));
    assert!(lines[1..].iter().all(|l| l.contains(",Finance,")));
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_csv_export_truncates_long_notes(pool: PgPool) {
    let long = format!("[2026-01-02 09:00]: {}", "n".repeat(300));
    create(
        &pool,
        NewProject {
            notes: Some(long.clone()),
            ..new_project("Verbose")
        },
    )
    .await;

    let csv = ReportRepo::export_csv(&pool, &ProjectFilter::default())
        .await
        .unwrap();
    let row = csv.split("\r\n").nth(1).unwrap();
    let notes = row.rsplit(',').next().unwrap();
    assert_eq!(notes.chars().count(), 200);
    assert!(notes.ends_with("..."));
    assert!(long.starts_with(&notes[..197]));
}
