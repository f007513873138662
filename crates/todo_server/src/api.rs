use std::sync::Arc;

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::routing::get;
use axum::{Json, Router};
use serde::Deserialize;
use serde_json::json;
use tokio::sync::Mutex;

use todo_core::error::AppError;
use todo_core::model::{Task, TaskPatch};
use todo_core::service::TaskService;
use todo_core::storage::TaskStore;

/// Shared application state: one service guarded by one lock, so requests
/// are applied to the store one at a time.
pub struct AppState<S: TaskStore> {
    service: Arc<Mutex<TaskService<S>>>,
}

impl<S: TaskStore> AppState<S> {
    pub fn new(service: TaskService<S>) -> Self {
        Self {
            service: Arc::new(Mutex::new(service)),
        }
    }
}

impl<S: TaskStore> Clone for AppState<S> {
    fn clone(&self) -> Self {
        Self {
            service: Arc::clone(&self.service),
        }
    }
}

#[derive(Debug, Deserialize)]
struct CreateTask {
    text: String,
}

/// HTTP rendering of [`AppError`]: 404 carries the fixed body the clients
/// match on, validation failures surface as 400, everything else is a 500.
struct ApiError(AppError);

impl From<AppError> for ApiError {
    fn from(err: AppError) -> Self {
        Self(err)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, message) = match &self.0 {
            AppError::NotFound(_) => (StatusCode::NOT_FOUND, "Task not found".to_string()),
            AppError::Validation(message) => (StatusCode::BAD_REQUEST, message.clone()),
            other => {
                tracing::error!(error = %other, "request failed");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "internal error".to_string(),
                )
            }
        };

        (status, Json(json!({ "message": message }))).into_response()
    }
}

pub fn router<S>(state: AppState<S>) -> Router
where
    S: TaskStore + Send + 'static,
{
    Router::new()
        .route("/tasks", get(list_tasks).post(create_task))
        .route(
            "/tasks/{id}",
            axum::routing::patch(update_task).delete(delete_task),
        )
        .with_state(state)
}

async fn list_tasks<S>(State(state): State<AppState<S>>) -> Result<Json<Vec<Task>>, ApiError>
where
    S: TaskStore + Send + 'static,
{
    let service = state.service.lock().await;
    let tasks = service.list()?;
    tracing::debug!(count = tasks.len(), "list tasks");
    Ok(Json(tasks))
}

async fn create_task<S>(
    State(state): State<AppState<S>>,
    Json(body): Json<CreateTask>,
) -> Result<Json<Task>, ApiError>
where
    S: TaskStore + Send + 'static,
{
    let mut service = state.service.lock().await;
    let task = service.create(&body.text)?;
    tracing::debug!(id = %task.id, "created task");
    Ok(Json(task))
}

async fn update_task<S>(
    State(state): State<AppState<S>>,
    Path(id): Path<String>,
    Json(patch): Json<TaskPatch>,
) -> Result<Json<Task>, ApiError>
where
    S: TaskStore + Send + 'static,
{
    let mut service = state.service.lock().await;
    let task = service.update(&id, &patch)?;
    tracing::debug!(id = %task.id, "patched task");
    Ok(Json(task))
}

async fn delete_task<S>(
    State(state): State<AppState<S>>,
    Path(id): Path<String>,
) -> Result<Json<serde_json::Value>, ApiError>
where
    S: TaskStore + Send + 'static,
{
    let mut service = state.service.lock().await;
    service.delete(&id)?;
    tracing::debug!(%id, "deleted task");
    Ok(Json(json!({ "message": "Deleted successfully" })))
}
