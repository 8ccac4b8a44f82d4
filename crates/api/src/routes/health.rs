//! Liveness and readiness for the docket service.

use std::time::Instant;

use axum::extract::State;
use axum::{routing::get, Json, Router};
use docket_db::models::project::ProjectFilter;
use docket_db::repositories::ProjectRepo;
use serde::Serialize;

use crate::state::AppState;

const SERVICE_NAME: &str = "docket-api";

#[derive(Debug, Serialize)]
pub struct DatabaseHealth {
    pub reachable: bool,
    /// Round-trip time of the probe query; absent when unreachable.
    pub latency_ms: Option<u64>,
}

#[derive(Debug, Serialize)]
pub struct HealthResponse {
    /// `ok` when the database answers, `degraded` otherwise.
    pub status: &'static str,
    pub service: &'static str,
    pub version: &'static str,
    pub database: DatabaseHealth,
    /// Live projects of any status; absent when the database is down.
    pub live_projects: Option<i64>,
}

/// GET /health
async fn health_check(State(state): State<AppState>) -> Json<HealthResponse> {
    let started = Instant::now();
    let database = match docket_db::health_check(&state.pool).await {
        Ok(()) => DatabaseHealth {
            reachable: true,
            latency_ms: Some(started.elapsed().as_millis() as u64),
        },
        Err(err) => {
            tracing::warn!(error = %err, "Database health check failed");
            DatabaseHealth {
                reachable: false,
                latency_ms: None,
            }
        }
    };

    let live_projects = if database.reachable {
        let every_status = ProjectFilter {
            include_completed: true,
            ..Default::default()
        };
        ProjectRepo::count(&state.pool, &every_status).await.ok()
    } else {
        None
    };

    Json(HealthResponse {
        status: if database.reachable { "ok" } else { "degraded" },
        service: SERVICE_NAME,
        version: env!("CARGO_PKG_VERSION"),
        database,
        live_projects,
    })
}

/// Mount `/health` at the root, outside `/api/v1`.
pub fn router() -> Router<AppState> {
    Router::new().route("/health", get(health_check))
}
