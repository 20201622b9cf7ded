// src/tasks/types.rs
// Type definitions for tasks and their AI comments

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Lifecycle status of a task
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TaskStatus {
    Todo,
    Done,
}

impl TaskStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Todo => "todo",
            Self::Done => "done",
        }
    }

    /// Anything other than `"done"` means `todo`.
    pub fn parse_lossy(s: &str) -> Self {
        match s {
            "done" => Self::Done,
            _ => Self::Todo,
        }
    }
}

impl fmt::Display for TaskStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// What happened to a task when a comment was generated
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EventType {
    Created,
    Completed,
}

impl EventType {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Created => "created",
            Self::Completed => "completed",
        }
    }

    pub fn from_db(s: &str) -> Self {
        match s {
            "completed" => Self::Completed,
            _ => Self::Created,
        }
    }
}

impl fmt::Display for EventType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Task {
    pub id: i64,
    pub title: String,
    pub status: TaskStatus,
    pub created_at: DateTime<Utc>,
}

/// A task as the API returns it: the row plus its most recent comment text
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TaskView {
    #[serde(flatten)]
    pub task: Task,
    pub ai_text: Option<String>,
}

impl TaskView {
    pub fn new(task: Task, ai_text: Option<String>) -> Self {
        Self { task, ai_text }
    }
}

/// Append-only comment row. `task_id` is not enforced as a foreign key.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AiComment {
    pub id: i64,
    pub task_id: i64,
    pub event_type: EventType,
    pub ai_text: String,
    pub created_at: DateTime<Utc>,
}
