use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use chrono::Utc;
use serde::{Deserialize, Serialize};
use tracing::info;
use wingman_core::domain::conversation::{
    ConversationId, ConversationRecord, Feedback, SessionId,
};
use wingman_core::domain::response::ResponseCandidate;
use wingman_core::errors::DomainError;
use wingman_db::{Page, DEFAULT_PAGE_LIMIT};

use crate::error::ApiError;
use crate::state::AppState;

const MAX_PAGE_LIMIT: usize = 100;

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct SaveConversationRequest {
    pub user_id: Option<String>,
    pub session_id: Option<String>,
    pub partner_name: String,
    pub partner_relationship: String,
    pub context_text: String,
    pub user_message: Option<String>,
    pub responses: Vec<ResponseCandidate>,
    pub feedback: Feedback,
}

#[derive(Debug, Serialize)]
pub struct ConversationSaved {
    pub conversation_id: ConversationId,
    pub session_id: SessionId,
}

#[derive(Debug, Serialize)]
pub struct FeedbackRecorded {
    pub conversation_id: ConversationId,
    pub feedback: Feedback,
}

#[derive(Debug, Default, Deserialize)]
pub struct HistoryQuery {
    pub user_id: Option<String>,
    pub limit: Option<usize>,
    pub offset: Option<usize>,
}

#[derive(Debug, Serialize)]
pub struct ConversationHistory {
    pub conversations: Vec<ConversationRecord>,
    pub total_count: usize,
    pub limit: usize,
    pub offset: usize,
}

pub async fn save(
    State(state): State<AppState>,
    Json(body): Json<SaveConversationRequest>,
) -> Result<(StatusCode, Json<ConversationSaved>), ApiError> {
    let user_id = DomainError::require("user_id", body.user_id.as_deref())?.to_string();
    let user_message = DomainError::require("user_message", body.user_message.as_deref())?.to_string();
    if body.responses.is_empty() {
        return Err(DomainError::MissingField("responses").into());
    }
    validate_feedback(&body.feedback)?;

    let session_id = body
        .session_id
        .filter(|session| !session.trim().is_empty())
        .map(SessionId)
        .unwrap_or_else(SessionId::generate);

    let record = ConversationRecord {
        id: ConversationId::generate(),
        user_id,
        session_id: session_id.clone(),
        partner_name: body.partner_name,
        partner_relationship: body.partner_relationship,
        context_text: body.context_text,
        user_message,
        responses: body.responses,
        feedback: body.feedback,
        created_at: Utc::now(),
    };
    let conversation_id = record.id.clone();
    state.conversations.create(record).await?;

    info!(
        event_name = "server.conversations.saved",
        conversation_id = %conversation_id.0,
        session_id = %session_id.0,
        "conversation saved"
    );

    Ok((StatusCode::CREATED, Json(ConversationSaved { conversation_id, session_id })))
}

pub async fn history(
    State(state): State<AppState>,
    Query(query): Query<HistoryQuery>,
) -> Result<Json<ConversationHistory>, ApiError> {
    let user_id = DomainError::require("user_id", query.user_id.as_deref())?;
    let page = Page {
        limit: query.limit.unwrap_or(DEFAULT_PAGE_LIMIT).clamp(1, MAX_PAGE_LIMIT),
        offset: query.offset.unwrap_or(0),
    };

    let conversations = state.conversations.list_for_user(user_id, page).await?;
    Ok(Json(ConversationHistory {
        total_count: conversations.len(),
        conversations,
        limit: page.limit,
        offset: page.offset,
    }))
}

/// Replaces the feedback of a saved conversation.
pub async fn record_feedback(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(feedback): Json<Feedback>,
) -> Result<Json<FeedbackRecorded>, ApiError> {
    validate_feedback(&feedback)?;

    let conversation_id = ConversationId(id);
    state.conversations.record_feedback(&conversation_id, feedback.clone()).await?;

    info!(
        event_name = "server.conversations.feedback_recorded",
        conversation_id = %conversation_id.0,
        rating = feedback.rating,
        "conversation feedback recorded"
    );

    Ok(Json(FeedbackRecorded { conversation_id, feedback }))
}

fn validate_feedback(feedback: &Feedback) -> Result<(), DomainError> {
    if feedback.rating.is_some_and(|rating| !(1..=5).contains(&rating)) {
        return Err(DomainError::InvalidInput("feedback.rating must be in 1..=5".to_string()));
    }
    Ok(())
}
