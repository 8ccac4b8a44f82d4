pub mod dashboard;
pub mod health;
pub mod project;
pub mod reports;

use axum::routing::get;
use axum::Router;

use crate::handlers;
use crate::state::AppState;

/// Build the `/api/v1` route tree.
///
/// Route hierarchy:
///
/// ```text
/// /projects                          list, create
/// /projects/export                   CSV export
/// /projects/{id}                     get, update, delete
/// /projects/{id}/notes               append note (POST)
///
/// /autocomplete/{field}              distinct values
///
/// /dashboard                         deadline buckets
///
/// /reports/weekly                    weekly status rows
/// /reports/weekly/fields             selectable weekly columns
/// /reports/monthly                   monthly statistics
/// ```
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .nest("/projects", project::router())
        .route(
            "/autocomplete/{field}",
            get(handlers::project::autocomplete),
        )
        .nest("/dashboard", dashboard::router())
        .nest("/reports", reports::router())
}
