// src/api/http/handlers.rs
// Health endpoint

use axum::{extract::State, Json};

use crate::api::types::HealthResponse;
use crate::db;
use crate::state::AppState;

/// GET /health
pub async fn health_handler(State(state): State<AppState>) -> Json<HealthResponse> {
    let database = db::ping(state.tasks.store().pool()).await;
    let commentary = if state.tasks.comments().is_live() {
        "gemini"
    } else {
        "fallback"
    };

    Json(HealthResponse {
        status: if database { "ok" } else { "degraded" }.to_string(),
        database,
        commentary: commentary.to_string(),
        model: state.config.gemini.model.clone(),
    })
}
