use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use serde::{Deserialize, Serialize};
use tracing::info;
use wingman_core::domain::chat_room::{ChatRoom, ChatRoomId};
use wingman_core::errors::DomainError;

use crate::error::ApiError;
use crate::routes::UserQuery;
use crate::state::AppState;

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct CreateChatRoomRequest {
    pub user_id: Option<String>,
    pub partner_name: Option<String>,
    pub partner_relationship: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct UpdateChatRoomRequest {
    pub last_message: Option<String>,
    pub message_count: Option<u32>,
}

#[derive(Debug, Serialize)]
pub struct ChatRoomEnvelope {
    pub room: ChatRoom,
}

#[derive(Debug, Serialize)]
pub struct ChatRoomList {
    pub rooms: Vec<ChatRoom>,
}

pub async fn create(
    State(state): State<AppState>,
    Json(body): Json<CreateChatRoomRequest>,
) -> Result<(StatusCode, Json<ChatRoomEnvelope>), ApiError> {
    let user_id = DomainError::require("user_id", body.user_id.as_deref())?;
    let partner_name = DomainError::require("partner_name", body.partner_name.as_deref())?;
    let partner_relationship =
        DomainError::require("partner_relationship", body.partner_relationship.as_deref())?;

    let room = ChatRoom::open(user_id, partner_name, partner_relationship);
    state.chat_rooms.create(room.clone()).await?;

    info!(event_name = "server.chat_rooms.created", room_id = %room.id.0, "chat room created");
    Ok((StatusCode::CREATED, Json(ChatRoomEnvelope { room })))
}

pub async fn list(
    State(state): State<AppState>,
    Query(query): Query<UserQuery>,
) -> Result<Json<ChatRoomList>, ApiError> {
    let user_id = DomainError::require("user_id", query.user_id.as_deref())?;
    let rooms = state.chat_rooms.list_for_user(user_id).await?;
    Ok(Json(ChatRoomList { rooms }))
}

pub async fn update(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(body): Json<UpdateChatRoomRequest>,
) -> Result<Json<ChatRoomEnvelope>, ApiError> {
    let mut room = state
        .chat_rooms
        .find_by_id(&ChatRoomId(id.clone()))
        .await?
        .ok_or_else(|| ApiError::not_found(format!("chat room `{id}`")))?;

    room.record_activity(body.last_message, body.message_count);
    state.chat_rooms.update(room.clone()).await?;

    Ok(Json(ChatRoomEnvelope { room }))
}

pub async fn delete(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<StatusCode, ApiError> {
    state.chat_rooms.delete(&ChatRoomId(id)).await?;
    Ok(StatusCode::NO_CONTENT)
}
