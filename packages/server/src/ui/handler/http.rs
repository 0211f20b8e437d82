//! HTTP API endpoint handlers.

use std::sync::Arc;

use axum::{Json, extract::State};

use crate::{domain::RoomSnapshot, infrastructure::dto::http::RoomSnapshotDto, ui::state::AppState};

/// Debug endpoint to get the raw room state (for testing purposes)
pub async fn debug_room_state(State(state): State<Arc<AppState>>) -> Json<RoomSnapshot> {
    Json(state.get_room_state_usecase.execute().await)
}

/// Health check endpoint
pub async fn health_check() -> Json<serde_json::Value> {
    Json(serde_json::json!({"status": "ok"}))
}

/// Get the playback state and the roster
pub async fn get_room(State(state): State<Arc<AppState>>) -> Json<RoomSnapshotDto> {
    let snapshot = state.get_room_state_usecase.execute().await;

    // Domain Model から DTO への変換
    Json(RoomSnapshotDto::from(&snapshot))
}
