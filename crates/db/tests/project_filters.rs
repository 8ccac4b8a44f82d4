//! Integration tests for the project filter / sort query builder.

mod common;

use common::*;
use docket_core::status::ProjectStatus;
use docket_db::models::project::{NewProject, ProjectFilter};
use docket_db::repositories::ProjectRepo;
use sqlx::PgPool;

async fn list(pool: &PgPool, filter: ProjectFilter) -> Vec<i64> {
    ids(&ProjectRepo::list(pool, &filter).await.unwrap())
}

// ---------------------------------------------------------------------------
// Status
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_completed_hidden_by_default(pool: PgPool) {
    let open = create(&pool, new_project("Open")).await;
    let done = create(&pool, new_project("Done")).await;
    set_status(&pool, done.id, ProjectStatus::Completed).await;

    assert_eq!(list(&pool, ProjectFilter::default()).await, vec![open.id]);

    let everything = list(
        &pool,
        ProjectFilter {
            include_completed: true,
            ..Default::default()
        },
    )
    .await;
    assert_eq!(everything.len(), 2);

    let only_done = list(
        &pool,
        ProjectFilter {
            statuses: Some(vec![ProjectStatus::Completed]),
            ..Default::default()
        },
    )
    .await;
    assert_eq!(only_done, vec![done.id]);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_empty_status_set_matches_nothing(pool: PgPool) {
    create(&pool, new_project("Anything")).await;

    let filter = ProjectFilter {
        statuses: Some(Vec::new()),
        ..Default::default()
    };
    assert!(list(&pool, filter).await.is_empty());
}

// ---------------------------------------------------------------------------
// Exact-match fields
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_department_match_is_case_insensitive(pool: PgPool) {
    let finance = create(&pool, new_project("Budget")).await;
    create(
        &pool,
        NewProject {
            department: "Planning".to_string(),
            qcp_attorney: "Cara Diaz".to_string(),
            ..new_project("Zoning")
        },
    )
    .await;

    let filter = ProjectFilter {
        department: Some("FINANCE".to_string()),
        ..Default::default()
    };
    assert_eq!(list(&pool, filter).await, vec![finance.id]);

    let filter = ProjectFilter {
        qcp_attorney: Some("ben jones".to_string()),
        ..Default::default()
    };
    assert_eq!(list(&pool, filter).await, vec![finance.id]);

    let filter = ProjectFilter {
        assigned_attorney: Some("Nobody".to_string()),
        ..Default::default()
    };
    assert!(list(&pool, filter).await.is_empty());
}

// ---------------------------------------------------------------------------
// Search
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_search_requires_every_term(pool: PgPool) {
    let both = create(
        &pool,
        NewProject {
            project_group: Some("Harbor".to_string()),
            ..new_project("Lease renewal")
        },
    )
    .await;
    let lease_only = create(&pool, new_project("Lease termination")).await;
    let noted = create(
        &pool,
        NewProject {
            notes: Some("[2026-01-02 09:00]: harbor lease question".to_string()),
            ..new_project("Misc")
        },
    )
    .await;

    let filter = ProjectFilter {
        search: Some("lease  HARBOR".to_string()),
        ..Default::default()
    };
    let found = list(&pool, filter).await;
    assert!(found.contains(&both.id));
    assert!(found.contains(&noted.id));
    assert!(!found.contains(&lease_only.id));

    let filter = ProjectFilter {
        search: Some("finance".to_string()),
        ..Default::default()
    };
    assert_eq!(list(&pool, filter).await.len(), 3);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_search_treats_wildcards_literally(pool: PgPool) {
    let percent = create(&pool, new_project("100% owned subsidiary")).await;
    create(&pool, new_project("1000 units")).await;

    let filter = ProjectFilter {
        search: Some("100%".to_string()),
        ..Default::default()
    };
    assert_eq!(list(&pool, filter).await, vec![percent.id]);
}

// ---------------------------------------------------------------------------
// Date ranges
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_deadline_range_is_inclusive(pool: PgPool) {
    let early = create_due(&pool, "Early", Some(date(2026, 3, 1))).await;
    let mid = create_due(&pool, "Mid", Some(date(2026, 3, 15))).await;
    let late = create_due(&pool, "Late", Some(date(2026, 3, 31))).await;
    create_due(&pool, "Undated", None).await;

    let filter = ProjectFilter {
        delivery_deadline_from: Some(date(2026, 3, 1)),
        delivery_deadline_to: Some(date(2026, 3, 15)),
        ..Default::default()
    };
    assert_eq!(list(&pool, filter).await, vec![early.id, mid.id]);

    let filter = ProjectFilter {
        delivery_deadline_from: Some(date(2026, 3, 16)),
        ..Default::default()
    };
    assert_eq!(list(&pool, filter).await, vec![late.id]);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_assigned_range(pool: PgPool) {
    let january = create(&pool, new_project("January")).await;
    let february = create(
        &pool,
        NewProject {
            date_assigned_to_us: date(2026, 2, 1),
            ..new_project("February")
        },
    )
    .await;

    let filter = ProjectFilter {
        date_assigned_from: Some(date(2026, 2, 1)),
        date_assigned_to: Some(date(2026, 2, 1)),
        ..Default::default()
    };
    assert_eq!(list(&pool, filter).await, vec![february.id]);

    let filter = ProjectFilter {
        date_assigned_to: Some(date(2026, 1, 31)),
        ..Default::default()
    };
    assert_eq!(list(&pool, filter).await, vec![january.id]);
}

// ---------------------------------------------------------------------------
// Sorting
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_nulls_sort_last_in_both_directions(pool: PgPool) {
    let undated = create_due(&pool, "Undated", None).await;
    let soon = create_due(&pool, "Soon", Some(date(2026, 4, 1))).await;
    let later = create_due(&pool, "Later", Some(date(2026, 5, 1))).await;

    let asc = list(&pool, ProjectFilter::default()).await;
    assert_eq!(asc, vec![soon.id, later.id, undated.id]);

    let desc = list(
        &pool,
        ProjectFilter {
            sort_dir: Some("desc".to_string()),
            ..Default::default()
        },
    )
    .await;
    assert_eq!(desc, vec![later.id, soon.id, undated.id]);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_unknown_sort_field_falls_back_to_deadline(pool: PgPool) {
    let b = create_due(&pool, "B", Some(date(2026, 6, 1))).await;
    let a = create_due(&pool, "A", Some(date(2026, 7, 1))).await;

    let by_name = list(
        &pool,
        ProjectFilter {
            sort_by: Some("project_name".to_string()),
            ..Default::default()
        },
    )
    .await;
    assert_eq!(by_name, vec![a.id, b.id]);

    let fallback = list(
        &pool,
        ProjectFilter {
            sort_by: Some("shoe_size".to_string()),
            ..Default::default()
        },
    )
    .await;
    assert_eq!(fallback, vec![b.id, a.id]);
}

// ---------------------------------------------------------------------------
// Count
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_count_agrees_with_list(pool: PgPool) {
    create(&pool, new_project("One")).await;
    create(&pool, new_project("Two")).await;
    let done = create(&pool, new_project("Three")).await;
    set_status(&pool, done.id, ProjectStatus::Completed).await;

    let filter = ProjectFilter::default();
    let count = ProjectRepo::count(&pool, &filter).await.unwrap();
    assert_eq!(count, 2);
    assert_eq!(count as usize, list(&pool, filter).await.len());
}
