//! HTTP API endpoint handlers.

use std::sync::Arc;

use axum::{Json, extract::State};

use crate::{infrastructure::dto::http::LocationRecordDto, ui::state::AppState};

/// Health check endpoint
pub async fn health_check() -> Json<serde_json::Value> {
    Json(serde_json::json!({"status": "ok"}))
}

/// List received locations, oldest first
pub async fn get_locations(State(state): State<Arc<AppState>>) -> Json<Vec<LocationRecordDto>> {
    let locations = state.locations.lock().await;
    Json(locations.records().map(LocationRecordDto::from).collect())
}
