//! HTTP handlers for the read-only REST surface.

use std::sync::Arc;

use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
};
use serde_json::{Value, json};

use crate::{domain::RoomName, infrastructure::dto::websocket::MessageDto};

use super::super::state::AppState;

pub async fn health_check() -> Json<Value> {
    Json(json!({ "status": "ok" }))
}

pub async fn get_rooms(State(state): State<Arc<AppState>>) -> Json<Vec<String>> {
    let rooms = state.get_rooms_usecase.execute().await;
    Json(rooms.into_iter().map(RoomName::into_string).collect())
}

pub async fn get_recent_messages(
    State(state): State<Arc<AppState>>,
    Path(room): Path<String>,
) -> Result<Json<Vec<MessageDto>>, StatusCode> {
    let room = RoomName::new(room).map_err(|e| {
        tracing::warn!("Rejecting message query for invalid room name: {}", e);
        StatusCode::BAD_REQUEST
    })?;

    let messages = state
        .get_recent_messages_usecase
        .execute(room)
        .await
        .map_err(|e| {
            tracing::error!("Failed to load recent messages: {}", e);
            StatusCode::INTERNAL_SERVER_ERROR
        })?;

    Ok(Json(messages.into_iter().map(MessageDto::from).collect()))
}
