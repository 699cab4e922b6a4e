use axum::{extract::State, Json};
use serde::{Deserialize, Serialize};
use tracing::info;
use wingman_agent::{Suggestion, SuggestionInput};
use wingman_core::domain::partner::PartnerInfo;
use wingman_core::emotion::{EmotionAnalysis, EmotionSignal};
use wingman_core::errors::DomainError;
use wingman_core::risk::{RiskAssessment, RiskClassifier};
use wingman_core::style::{StyleAnalyzer, StyleProfile};

use crate::error::ApiError;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct SpeechAnalysisRequest {
    pub messages: Option<Vec<String>>,
}

#[derive(Debug, Serialize)]
pub struct SpeechAnalysisResponse {
    pub speech_profile: StyleProfile,
    pub risk: RiskAssessment,
}

pub async fn analyze_speech(
    Json(body): Json<SpeechAnalysisRequest>,
) -> Result<Json<SpeechAnalysisResponse>, ApiError> {
    let messages = body.messages.ok_or(DomainError::MissingField("messages"))?;

    let speech_profile = StyleAnalyzer::new().analyze(&messages);
    let risk = RiskClassifier::new().classify(&speech_profile, None);

    info!(
        event_name = "server.analyze_speech.completed",
        total_messages = speech_profile.total_messages,
        speech_style = speech_profile.speech_style.as_str(),
        "speech analysis completed"
    );

    Ok(Json(SpeechAnalysisResponse { speech_profile, risk }))
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct AnalyzeRequest {
    pub messages: Vec<String>,
    pub situation: String,
    pub context: String,
    pub partner: Option<PartnerInfo>,
    pub emotion: Option<EmotionSignal>,
}

/// Style → risk → one reply candidate for the computed tier.
pub async fn analyze(
    State(state): State<AppState>,
    Json(body): Json<AnalyzeRequest>,
) -> Result<Json<Suggestion>, ApiError> {
    let emotion = match body.emotion {
        Some(signal) => signal,
        None if !body.situation.trim().is_empty() => {
            state.emotion.analyze(&body.situation).await.signal()
        }
        None => EmotionSignal::default(),
    };

    let suggestion = state
        .generator
        .suggest(SuggestionInput {
            messages: body.messages,
            situation: body.situation,
            context_text: body.context,
            partner: body.partner,
            emotion,
        })
        .await;

    info!(
        event_name = "server.analyze.completed",
        tier = %suggestion.risk.tier,
        risk_tolerance = suggestion.risk.risk_tolerance,
        candidates = suggestion.responses.len(),
        "reply suggestion completed"
    );

    Ok(Json(suggestion))
}

#[derive(Debug, Deserialize)]
pub struct EmotionRequest {
    pub text: Option<String>,
}

pub async fn emotion(
    State(state): State<AppState>,
    Json(body): Json<EmotionRequest>,
) -> Result<Json<EmotionAnalysis>, ApiError> {
    let text = DomainError::require("text", body.text.as_deref())?;
    Ok(Json(state.emotion.analyze(text).await))
}
