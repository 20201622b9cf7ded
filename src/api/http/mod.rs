// src/api/http/mod.rs

mod handlers;
mod router;
mod tasks;

pub use handlers::health_handler;
pub use router::create_router;
pub use tasks::{
    create_task_handler, delete_task_handler, list_comments_handler, list_tasks_handler,
    update_task_handler,
};
