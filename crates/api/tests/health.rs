//! Integration tests for the health check endpoint and general HTTP behaviour.

mod common;

use axum::http::StatusCode;
use common::{body_json, create_project, delete, get, merge, project_payload};
use serde_json::json;
use sqlx::PgPool;

#[sqlx::test(migrations = "../../db/migrations")]
async fn health_check_returns_ok_with_json(pool: PgPool) {
    let app = common::build_test_app(pool);
    let response = get(app, "/health").await;

    assert_eq!(response.status(), StatusCode::OK);

    let json = body_json(response).await;
    assert_eq!(json["status"], "ok");
    assert_eq!(json["service"], "docket-api");
    assert!(json["version"].is_string());
    assert_eq!(json["database"]["reachable"], true);
    assert!(json["database"]["latency_ms"].is_u64());
    assert_eq!(json["live_projects"], 0);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn health_counts_live_projects_of_every_status(pool: PgPool) {
    create_project(&pool, project_payload("Open")).await;
    create_project(
        &pool,
        merge(project_payload("Closed"), json!({"status": "Completed"})),
    )
    .await;
    let gone = create_project(&pool, project_payload("Gone")).await;
    delete(
        common::build_test_app(pool.clone()),
        &format!("/api/v1/projects/{gone}"),
    )
    .await;

    let json = body_json(get(common::build_test_app(pool), "/health").await).await;
    assert_eq!(json["live_projects"], 2);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn unknown_route_returns_404(pool: PgPool) {
    let app = common::build_test_app(pool);
    let response = get(app, "/this-route-does-not-exist").await;

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn responses_carry_request_id(pool: PgPool) {
    let app = common::build_test_app(pool);
    let response = get(app, "/health").await;

    assert!(response.headers().contains_key("x-request-id"));
}
