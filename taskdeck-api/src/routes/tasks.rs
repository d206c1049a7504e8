/// Task endpoints
///
/// All routes here sit behind the token middleware, which inserts the
/// caller's [`AuthContext`] into the request. The caller identity is
/// threaded explicitly into every store and policy call.
///
/// # Endpoints
///
/// - `GET /tasks` - list the tasks visible to the caller
/// - `POST /tasks` - create a task (caller becomes the creator)
/// - `PUT /tasks/:id` - merge partial fields into a task
/// - `DELETE /tasks/:id` - delete a task
///
/// Update and delete are not gated on creator or assignee identity; any
/// authenticated caller can hit any id. Listing, in contrast, only shows
/// tasks the caller created or is assigned to.

use crate::{app::AppState, error::ApiResult};
use axum::{
    extract::{Path, State},
    http::StatusCode,
    Extension, Json,
};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use taskdeck_shared::auth::middleware::AuthContext;
use taskdeck_shared::models::task::{CreateTask, Task, UpdateTask};
use taskdeck_shared::policy;
use validator::Validate;

/// Create task request
#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreateTaskRequest {
    /// Short title
    #[serde(default)]
    #[validate(length(min = 1, message = "title is required"))]
    pub title: String,

    /// Longer free-form description
    #[serde(default)]
    #[validate(length(min = 1, message = "description is required"))]
    pub description: String,

    /// Optional assignee; must be a registered user when present
    #[serde(default)]
    pub assigned_to: Option<String>,

    /// Optional assignment timestamp
    #[serde(default)]
    pub assignment_date: Option<DateTime<Utc>>,
}

/// Delete response
#[derive(Debug, Serialize)]
pub struct DeleteResponse {
    /// Confirmation message
    pub message: String,
}

/// List the tasks visible to the caller
///
/// Returns every task the caller created or is assigned to, in store
/// order.
pub async fn list_tasks(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthContext>,
) -> ApiResult<Json<Vec<Task>>> {
    let tasks = state.tasks.list().await?;

    Ok(Json(policy::filter_visible(tasks, &auth.username)))
}

/// Create a task
///
/// The caller becomes the creator. A non-empty assignee must name a
/// registered user.
///
/// # Errors
///
/// - `400 Bad Request`: title or description missing
/// - `404 Not Found`: assignee is not a registered user
pub async fn create_task(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthContext>,
    Json(req): Json<CreateTaskRequest>,
) -> ApiResult<(StatusCode, Json<Task>)> {
    req.validate()?;

    let assigned_to = req.assigned_to.unwrap_or_default();
    policy::validate_assignee(&state.users, &assigned_to).await?;

    let task = state
        .tasks
        .create(
            CreateTask {
                title: req.title,
                description: req.description,
                assigned_to,
                assignment_date: req.assignment_date,
            },
            &auth.username,
        )
        .await?;

    Ok((StatusCode::CREATED, Json(task)))
}

/// Merge partial fields into a task
///
/// Unspecified fields retain their prior values. The assignee is not
/// re-validated here.
///
/// # Errors
///
/// - `404 Not Found`: no task with this id
pub async fn update_task(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    Json(update): Json<UpdateTask>,
) -> ApiResult<Json<Task>> {
    let task = state.tasks.update(id, update).await?;

    Ok(Json(task))
}

/// Delete a task by id
///
/// # Errors
///
/// - `404 Not Found`: no task with this id
pub async fn delete_task(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> ApiResult<Json<DeleteResponse>> {
    state.tasks.delete(id).await?;

    Ok(Json(DeleteResponse {
        message: "Task deleted".to_string(),
    }))
}
