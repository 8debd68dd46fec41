//! Project CRUD handlers.
//!
//! Reads are public; every mutation requires a verified session via the
//! [`RequireAdmin`] extractor, which runs before the body is even
//! deserialized.

use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
};

use atelier_core::ProjectId;

use crate::db::ProjectRepository;
use crate::error::Result;
use crate::middleware::RequireAdmin;
use crate::models::{NewProject, Project, ProjectPatch};
use crate::state::AppState;

/// List all projects in display order.
///
/// GET /api/projects
pub async fn index(State(state): State<AppState>) -> Json<Vec<Project>> {
    Json(ProjectRepository::new(state.projects()).list().await)
}

/// Fetch a single project.
///
/// GET /api/projects/{id}
pub async fn show(State(state): State<AppState>, Path(id): Path<i64>) -> Result<Json<Project>> {
    let project = ProjectRepository::new(state.projects())
        .get(ProjectId::new(id))
        .await?;
    Ok(Json(project))
}

/// Create a project.
///
/// POST /api/projects
pub async fn create(
    State(state): State<AppState>,
    RequireAdmin(claims): RequireAdmin,
    Json(new): Json<NewProject>,
) -> Result<impl IntoResponse> {
    let project = ProjectRepository::new(state.projects()).create(new).await?;
    tracing::info!(id = %project.id, user = claims.username(), "project created");
    Ok((StatusCode::CREATED, Json(project)))
}

/// Partially update a project.
///
/// PUT /api/projects/{id}
pub async fn update(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    RequireAdmin(claims): RequireAdmin,
    Json(patch): Json<ProjectPatch>,
) -> Result<Json<Project>> {
    let project = ProjectRepository::new(state.projects())
        .update(ProjectId::new(id), patch)
        .await?;
    tracing::info!(id = %project.id, user = claims.username(), "project updated");
    Ok(Json(project))
}

/// Delete a project, returning the removed entity.
///
/// DELETE /api/projects/{id}
pub async fn remove(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    RequireAdmin(claims): RequireAdmin,
) -> Result<Json<Project>> {
    let project = ProjectRepository::new(state.projects())
        .delete(ProjectId::new(id))
        .await?;
    tracing::info!(id = %project.id, user = claims.username(), "project deleted");
    Ok(Json(project))
}
