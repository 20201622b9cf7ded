// src/api/http/tasks.rs
// Task CRUD endpoints

use axum::{
    body::Bytes,
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use serde::de::DeserializeOwned;
use std::future::Future;
use tracing::{debug, error};

use crate::api::error::{serde_error, ApiError, ApiResult};
use crate::api::types::{CreateTaskRequest, OkResponse, UpdateTaskRequest};
use crate::state::AppState;
use crate::tasks::{AiComment, TaskResult, TaskView};

/// GET /tasks
pub async fn list_tasks_handler(State(state): State<AppState>) -> ApiResult<Json<Vec<TaskView>>> {
    Ok(Json(state.tasks.list_tasks().await?))
}

/// GET /tasks/{id}/ai-comments
pub async fn list_comments_handler(
    State(state): State<AppState>,
    Path(task_id): Path<i64>,
) -> ApiResult<Json<Vec<AiComment>>> {
    Ok(Json(state.tasks.list_comments(task_id).await?))
}

/// POST /tasks
pub async fn create_task_handler(
    State(state): State<AppState>,
    body: Bytes,
) -> ApiResult<(StatusCode, Json<TaskView>)> {
    let request: CreateTaskRequest = parse_json_body(&body, "create task")?;
    debug!("POST /tasks title={:?}", request.title);

    let tasks = state.tasks.clone();
    let view = run_detached(async move { tasks.create_task(&request.title).await }).await?;

    Ok((StatusCode::CREATED, Json(view)))
}

/// PUT /tasks/{id}
pub async fn update_task_handler(
    State(state): State<AppState>,
    Path(task_id): Path<i64>,
    body: Bytes,
) -> ApiResult<Json<TaskView>> {
    let request: UpdateTaskRequest = parse_json_body(&body, "update task")?;
    let status = request.requested_status();
    debug!(task_id, status = %status, "PUT /tasks");

    let tasks = state.tasks.clone();
    let view = run_detached(async move { tasks.set_status(task_id, status).await }).await?;

    Ok(Json(view))
}

/// DELETE /tasks/{id}
pub async fn delete_task_handler(
    State(state): State<AppState>,
    Path(task_id): Path<i64>,
) -> ApiResult<Json<OkResponse>> {
    state.tasks.delete_task(task_id).await?;
    Ok(Json(OkResponse { ok: true }))
}

/// Empty bodies decode to the default request
fn parse_json_body<T>(body: &Bytes, operation: &str) -> ApiResult<T>
where
    T: DeserializeOwned + Default,
{
    if body.iter().all(u8::is_ascii_whitespace) {
        return Ok(T::default());
    }
    serde_json::from_slice(body).map_err(|e| serde_error(operation, e))
}

/// Spawned so the model call and its insert finish even if the client
/// disconnects and the handler future is dropped.
async fn run_detached<T, F>(work: F) -> ApiResult<T>
where
    F: Future<Output = TaskResult<T>> + Send + 'static,
    T: Send + 'static,
{
    match tokio::spawn(work).await {
        Ok(result) => Ok(result?),
        Err(e) => {
            error!("Request task failed: {}", e);
            Err(ApiError::internal("Internal server error"))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tasks::TaskStatus;

    #[test]
    fn test_parse_empty_body_is_default() {
        let request: UpdateTaskRequest = parse_json_body(&Bytes::new(), "update").unwrap();
        assert_eq!(request.requested_status(), TaskStatus::Done);

        let request: CreateTaskRequest = parse_json_body(&Bytes::from_static(b"  \n"), "create").unwrap();
        assert!(request.title.is_empty());
    }

    #[test]
    fn test_parse_malformed_body_is_bad_request() {
        let err = parse_json_body::<CreateTaskRequest>(&Bytes::from_static(b"{title"), "create task")
            .unwrap_err();
        assert_eq!(err.status_code, StatusCode::BAD_REQUEST);
        assert!(err.message.contains("create task"));
    }
}
