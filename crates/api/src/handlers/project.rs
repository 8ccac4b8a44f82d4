//! Handlers for the `/projects` resource, its notes ledger and the
//! autocomplete lookup.

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::Json;
use chrono::Utc;
use docket_core::error::CoreError;
use docket_core::fields::AutocompleteField;
use docket_core::notes::format_note_entry;
use docket_core::types::DbId;
use docket_db::models::project::{CreateProject, Project, UpdateProject};
use docket_db::repositories::ProjectRepo;
use serde::Deserialize;

use crate::error::{AppError, AppResult};
use crate::query::ProjectListParams;
use crate::response::{DataResponse, ListResponse};
use crate::state::AppState;

fn not_found(id: DbId) -> AppError {
    AppError::Core(CoreError::NotFound {
        entity: "Project",
        id,
    })
}

/// POST /api/v1/projects
pub async fn create(
    State(state): State<AppState>,
    Json(input): Json<CreateProject>,
) -> AppResult<(StatusCode, Json<DataResponse<Project>>)> {
    let new_project = input.into_new_project(Utc::now())?;
    let project = ProjectRepo::create(&state.pool, &new_project).await?;
    tracing::info!(project_id = project.id, "Project created");
    Ok((StatusCode::CREATED, Json(DataResponse { data: project })))
}

/// GET /api/v1/projects
pub async fn list(
    State(state): State<AppState>,
    Query(params): Query<ProjectListParams>,
) -> AppResult<Json<ListResponse<Project>>> {
    let filter = params.into_filter();
    let projects = ProjectRepo::list(&state.pool, &filter).await?;
    Ok(Json(projects.into()))
}

/// GET /api/v1/projects/{id}
pub async fn get_by_id(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<Json<DataResponse<Project>>> {
    let project = ProjectRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or_else(|| not_found(id))?;
    Ok(Json(DataResponse { data: project }))
}

/// PUT /api/v1/projects/{id}
pub async fn update(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    Json(input): Json<UpdateProject>,
) -> AppResult<Json<DataResponse<Project>>> {
    let patch = input.into_patch()?;
    let project = ProjectRepo::update(&state.pool, id, &patch)
        .await?
        .ok_or_else(|| not_found(id))?;
    tracing::info!(project_id = id, "Project updated");
    Ok(Json(DataResponse { data: project }))
}

/// DELETE /api/v1/projects/{id}
pub async fn delete(State(state): State<AppState>, Path(id): Path<DbId>) -> AppResult<StatusCode> {
    let deleted = ProjectRepo::soft_delete(&state.pool, id).await?;
    if deleted {
        tracing::info!(project_id = id, "Project soft-deleted");
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(not_found(id))
    }
}

// ---------------------------------------------------------------------------
// Notes ledger
// ---------------------------------------------------------------------------

#[derive(Debug, Deserialize)]
pub struct AppendNoteRequest {
    #[serde(default)]
    pub note: String,
}

/// POST /api/v1/projects/{id}/notes
///
/// Blank notes are a no-op that still returns the (unchanged) project.
pub async fn append_note(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    Json(input): Json<AppendNoteRequest>,
) -> AppResult<Json<DataResponse<Project>>> {
    let project = match format_note_entry(&input.note, Utc::now()) {
        Some(entry) => {
            let project = ProjectRepo::append_note(&state.pool, id, &entry).await?;
            if project.is_some() {
                tracing::info!(project_id = id, "Note appended");
            }
            project
        }
        None => ProjectRepo::find_by_id(&state.pool, id).await?,
    };
    let project = project.ok_or_else(|| not_found(id))?;
    Ok(Json(DataResponse { data: project }))
}

// ---------------------------------------------------------------------------
// Autocomplete
// ---------------------------------------------------------------------------

/// GET /api/v1/autocomplete/{field}
pub async fn autocomplete(
    State(state): State<AppState>,
    Path(field): Path<String>,
) -> AppResult<Json<DataResponse<Vec<String>>>> {
    let field = AutocompleteField::parse(&field)?;
    let values = ProjectRepo::distinct_values(&state.pool, field).await?;
    Ok(Json(DataResponse { data: values }))
}
