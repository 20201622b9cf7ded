// src/api/http/router.rs
// HTTP router composition: task API, health, and the bundled UI

use axum::{
    http::{header, Method},
    routing::{get, put},
    Router,
};
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use super::{
    handlers::health_handler,
    tasks::{
        create_task_handler, delete_task_handler, list_comments_handler, list_tasks_handler,
        update_task_handler,
    },
};
use crate::state::AppState;
use crate::web;

/// Create the router with all endpoints
pub fn create_router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods([Method::GET, Method::POST, Method::PUT, Method::DELETE, Method::OPTIONS])
        .allow_headers([header::CONTENT_TYPE]);

    Router::new()
        .route("/tasks", get(list_tasks_handler).post(create_task_handler))
        .route("/tasks/{id}", put(update_task_handler).delete(delete_task_handler))
        .route("/tasks/{id}/ai-comments", get(list_comments_handler))
        .route("/health", get(health_handler))
        .merge(web::web_router())
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(state)
}
