// src/tasks/service.rs
// Task lifecycle: validation, status transitions and commentary

use std::sync::Arc;
use thiserror::Error;
use tracing::info;

use super::store::TaskStore;
use super::types::{AiComment, EventType, TaskStatus, TaskView};
use crate::commentary::CommentGenerator;

#[derive(Debug, Error)]
pub enum TaskError {
    #[error("Title is required")]
    EmptyTitle,
    #[error("Not found")]
    NotFound(i64),
    #[error(transparent)]
    Storage(#[from] anyhow::Error),
}

pub type TaskResult<T> = Result<T, TaskError>;

#[derive(Clone)]
pub struct TaskService {
    store: TaskStore,
    comments: Arc<CommentGenerator>,
}

impl TaskService {
    pub fn new(store: TaskStore, comments: Arc<CommentGenerator>) -> Self {
        Self { store, comments }
    }

    pub fn store(&self) -> &TaskStore {
        &self.store
    }

    pub fn comments(&self) -> &CommentGenerator {
        &self.comments
    }

    pub async fn list_tasks(&self) -> TaskResult<Vec<TaskView>> {
        Ok(self.store.list_with_latest_comment().await?)
    }

    pub async fn list_comments(&self, task_id: i64) -> TaskResult<Vec<AiComment>> {
        Ok(self.store.list_comments(task_id).await?)
    }

    /// Create a task from a raw title and attach its `created` comment
    pub async fn create_task(&self, raw_title: &str) -> TaskResult<TaskView> {
        let title = raw_title.trim();
        if title.is_empty() {
            return Err(TaskError::EmptyTitle);
        }

        let task = self.store.create(title).await?;
        info!(task_id = task.id, "Created task: {}", task.title);

        let ai_text = self
            .comments
            .generate(task.id, EventType::Created, &task.title, None)
            .await?;

        Ok(TaskView::new(task, Some(ai_text)))
    }

    /// Set a task's status. Moving to `done` produces a `completed` comment;
    /// anything else returns the latest existing comment untouched.
    pub async fn set_status(&self, task_id: i64, status: TaskStatus) -> TaskResult<TaskView> {
        let mut task = self
            .store
            .get(task_id)
            .await?
            .ok_or(TaskError::NotFound(task_id))?;

        self.store.update_status(task_id, status).await?;
        task.status = status;
        info!(task_id, status = %status, "Updated task status");

        let ai_text = match status {
            TaskStatus::Done => Some(
                self.comments
                    .generate(task.id, EventType::Completed, &task.title, None)
                    .await?,
            ),
            TaskStatus::Todo => self.store.latest_comment_text(task_id).await?,
        };

        Ok(TaskView::new(task, ai_text))
    }

    /// Delete a task and its comments; deleting a missing task is not an error
    pub async fn delete_task(&self, task_id: i64) -> TaskResult<()> {
        if self.store.delete(task_id).await? {
            info!(task_id, "Deleted task");
        }
        Ok(())
    }
}
