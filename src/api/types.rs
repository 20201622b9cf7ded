// src/api/types.rs
// Request and response bodies for the HTTP API

use serde::{Deserialize, Serialize};

use crate::tasks::TaskStatus;

#[derive(Debug, Default, Clone, Serialize, Deserialize)]
pub struct CreateTaskRequest {
    #[serde(default)]
    pub title: String,
}

/// Body of `PUT /tasks/{id}`. A missing status means "done".
#[derive(Debug, Default, Clone, Serialize, Deserialize)]
pub struct UpdateTaskRequest {
    #[serde(default)]
    pub status: Option<String>,
}

impl UpdateTaskRequest {
    pub fn requested_status(&self) -> TaskStatus {
        self.status
            .as_deref()
            .map(TaskStatus::parse_lossy)
            .unwrap_or(TaskStatus::Done)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OkResponse {
    pub ok: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub database: bool,
    pub commentary: String,
    pub model: String,
}
