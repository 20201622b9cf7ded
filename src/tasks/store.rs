// src/tasks/store.rs
// Database operations for tasks and task_ai_comments

use super::types::{AiComment, EventType, Task, TaskStatus, TaskView};
use anyhow::{Context, Result};
use chrono::{DateTime, SubsecRound, Utc};
use sqlx::sqlite::SqliteRow;
use sqlx::{Row, SqlitePool};

/// Database store for tasks. Cheap to clone; shares the pool.
#[derive(Clone)]
pub struct TaskStore {
    pool: SqlitePool,
}

impl TaskStore {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    pub fn pool(&self) -> &SqlitePool {
        &self.pool
    }

    // =========================================================================
    // Tasks
    // =========================================================================

    /// Insert a new `todo` task
    pub async fn create(&self, title: &str) -> Result<Task> {
        let created_at = now();

        let id = sqlx::query("INSERT INTO tasks (title, status, created_at) VALUES (?, ?, ?)")
            .bind(title)
            .bind(TaskStatus::Todo.as_str())
            .bind(created_at)
            .execute(&self.pool)
            .await
            .context("Failed to insert task")?
            .last_insert_rowid();

        Ok(Task {
            id,
            title: title.to_string(),
            status: TaskStatus::Todo,
            created_at,
        })
    }

    pub async fn get(&self, task_id: i64) -> Result<Option<Task>> {
        let row = sqlx::query("SELECT id, title, status, created_at FROM tasks WHERE id = ?")
            .bind(task_id)
            .fetch_optional(&self.pool)
            .await
            .context("Failed to fetch task")?;

        row.map(|r| row_to_task(&r)).transpose()
    }

    /// All tasks, newest first
    pub async fn list(&self) -> Result<Vec<Task>> {
        let rows = sqlx::query("SELECT id, title, status, created_at FROM tasks ORDER BY id DESC")
            .fetch_all(&self.pool)
            .await
            .context("Failed to list tasks")?;

        rows.iter().map(row_to_task).collect()
    }

    /// All tasks, newest first, each with the text of its latest comment
    pub async fn list_with_latest_comment(&self) -> Result<Vec<TaskView>> {
        let rows = sqlx::query(
            "SELECT id, title, status, created_at,
                    (SELECT ai_text FROM task_ai_comments
                     WHERE task_id = tasks.id ORDER BY id DESC LIMIT 1) AS ai_text
             FROM tasks ORDER BY id DESC",
        )
        .fetch_all(&self.pool)
        .await
        .context("Failed to list tasks")?;

        rows.iter()
            .map(|r| -> Result<TaskView> {
                let task = row_to_task(r)?;
                let ai_text: Option<String> = r.try_get("ai_text")?;
                Ok(TaskView::new(task, ai_text))
            })
            .collect()
    }

    /// Returns false when no row matched
    pub async fn update_status(&self, task_id: i64, status: TaskStatus) -> Result<bool> {
        let result = sqlx::query("UPDATE tasks SET status = ? WHERE id = ?")
            .bind(status.as_str())
            .bind(task_id)
            .execute(&self.pool)
            .await
            .context("Failed to update task status")?;

        Ok(result.rows_affected() > 0)
    }

    /// Delete a task together with its comments. Returns false when the task
    /// did not exist.
    pub async fn delete(&self, task_id: i64) -> Result<bool> {
        let mut tx = self.pool.begin().await.context("Failed to begin transaction")?;

        sqlx::query("DELETE FROM task_ai_comments WHERE task_id = ?")
            .bind(task_id)
            .execute(&mut *tx)
            .await
            .context("Failed to delete task comments")?;

        let result = sqlx::query("DELETE FROM tasks WHERE id = ?")
            .bind(task_id)
            .execute(&mut *tx)
            .await
            .context("Failed to delete task")?;

        tx.commit().await.context("Failed to commit task deletion")?;

        Ok(result.rows_affected() > 0)
    }

    // =========================================================================
    // Comments
    // =========================================================================

    pub async fn insert_comment(
        &self,
        task_id: i64,
        event_type: EventType,
        ai_text: &str,
    ) -> Result<AiComment> {
        let created_at = now();

        let id = sqlx::query(
            "INSERT INTO task_ai_comments (task_id, event_type, ai_text, created_at)
             VALUES (?, ?, ?, ?)",
        )
        .bind(task_id)
        .bind(event_type.as_str())
        .bind(ai_text)
        .bind(created_at)
        .execute(&self.pool)
        .await
        .context("Failed to insert AI comment")?
        .last_insert_rowid();

        Ok(AiComment {
            id,
            task_id,
            event_type,
            ai_text: ai_text.to_string(),
            created_at,
        })
    }

    /// Comment history for a task, oldest first
    pub async fn list_comments(&self, task_id: i64) -> Result<Vec<AiComment>> {
        let rows = sqlx::query(
            "SELECT id, task_id, event_type, ai_text, created_at
             FROM task_ai_comments WHERE task_id = ? ORDER BY id ASC",
        )
        .bind(task_id)
        .fetch_all(&self.pool)
        .await
        .context("Failed to list AI comments")?;

        rows.iter().map(row_to_comment).collect()
    }

    pub async fn latest_comment_text(&self, task_id: i64) -> Result<Option<String>> {
        let row: Option<(String,)> = sqlx::query_as(
            "SELECT ai_text FROM task_ai_comments WHERE task_id = ? ORDER BY id DESC LIMIT 1",
        )
        .bind(task_id)
        .fetch_optional(&self.pool)
        .await
        .context("Failed to fetch latest AI comment")?;

        Ok(row.map(|(text,)| text))
    }
}

// Whole seconds, so what we return matches what a later read decodes
fn now() -> DateTime<Utc> {
    Utc::now().trunc_subsecs(0)
}

fn row_to_task(row: &SqliteRow) -> Result<Task> {
    let status: String = row.try_get("status")?;
    Ok(Task {
        id: row.try_get("id")?,
        title: row.try_get("title")?,
        status: TaskStatus::parse_lossy(&status),
        created_at: row.try_get("created_at")?,
    })
}

fn row_to_comment(row: &SqliteRow) -> Result<AiComment> {
    let event_type: String = row.try_get("event_type")?;
    Ok(AiComment {
        id: row.try_get("id")?,
        task_id: row.try_get("task_id")?,
        event_type: EventType::from_db(&event_type),
        ai_text: row.try_get("ai_text")?,
        created_at: row.try_get("created_at")?,
    })
}
