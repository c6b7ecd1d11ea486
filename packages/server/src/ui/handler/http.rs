//! HTTP API endpoint handlers.

use std::sync::Arc;

use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
};

use crate::{
    domain::RoomId,
    infrastructure::dto::http::{StatusDto, TranscriptDto, TurnDto},
    ui::state::AppState,
    usecase::GetTranscriptError,
};

/// Health check endpoint, including whether the responder backend is up
pub async fn health_check(State(state): State<Arc<AppState>>) -> Json<serde_json::Value> {
    Json(serde_json::json!({
        "status": "ok",
        "responder_ready": state.responder.is_ready().await,
    }))
}

/// Aggregate counts: distinct active users, active rooms, conversations
pub async fn get_status(State(state): State<Arc<AppState>>) -> Json<StatusDto> {
    let snapshot = state.room_status_usecase.execute().await;
    Json(StatusDto {
        active_users: snapshot.active_users,
        active_rooms: snapshot.active_rooms,
        conversations: snapshot.conversations,
    })
}

/// Get the persisted transcript of a room
pub async fn get_transcript(
    State(state): State<Arc<AppState>>,
    Path(room_id): Path<String>,
) -> Result<Json<TranscriptDto>, StatusCode> {
    let room_id = RoomId::new(room_id).map_err(|_| StatusCode::BAD_REQUEST)?;

    match state.get_transcript_usecase.execute(room_id.clone()).await {
        Ok(turns) => {
            // Domain entity to DTO conversion
            let transcript = TranscriptDto {
                room_id: room_id.into_string(),
                turns: turns.iter().map(TurnDto::from).collect(),
            };
            Ok(Json(transcript))
        }
        Err(GetTranscriptError::RoomNotFound) => Err(StatusCode::NOT_FOUND),
        Err(GetTranscriptError::StorageError(_)) => Err(StatusCode::INTERNAL_SERVER_ERROR),
    }
}
