use axum::routing::get;
use axum::Router;

use crate::handlers::reports;
use crate::state::AppState;

/// Routes mounted at `/reports`.
///
/// ```text
/// GET /weekly           -> weekly
/// GET /weekly/fields    -> weekly_fields
/// GET /monthly          -> monthly
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/weekly", get(reports::weekly))
        .route("/weekly/fields", get(reports::weekly_fields))
        .route("/monthly", get(reports::monthly))
}
