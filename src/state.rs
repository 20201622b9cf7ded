// src/state.rs
// Shared handler state: everything a request needs, injected explicitly

use anyhow::Result;
use sqlx::SqlitePool;
use std::sync::Arc;

use crate::commentary::CommentGenerator;
use crate::config::AppConfig;
use crate::tasks::{TaskService, TaskStore};

#[derive(Clone)]
pub struct AppState {
    pub tasks: TaskService,
    pub config: Arc<AppConfig>,
}

impl AppState {
    /// Wire the store and a config-driven comment generator onto `pool`
    pub fn new(pool: SqlitePool, config: AppConfig) -> Result<Self> {
        let store = TaskStore::new(pool);
        let comments = CommentGenerator::from_config(store.clone(), &config.gemini)?;
        Ok(Self::with_comments(store, comments, config))
    }

    /// Same as `new` but with a caller-built generator (tests, custom pickers)
    pub fn with_comments(store: TaskStore, comments: CommentGenerator, config: AppConfig) -> Self {
        Self {
            tasks: TaskService::new(store, Arc::new(comments)),
            config: Arc::new(config),
        }
    }
}
