// src/tasks/mod.rs
// Tasks and their AI comment history

pub mod service;
pub mod store;
pub mod types;

pub use service::{TaskError, TaskResult, TaskService};
pub use store::TaskStore;
pub use types::{AiComment, EventType, Task, TaskStatus, TaskView};
