pub mod analysis;
pub mod chat_rooms;
pub mod conversations;
pub mod partners;

use axum::{
    routing::{get, post, put},
    Router,
};
use serde::Deserialize;

use crate::health;
use crate::state::AppState;

#[derive(Debug, Default, Deserialize)]
pub struct UserQuery {
    pub user_id: Option<String>,
}

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health::health))
        .route("/analyze-speech", post(analysis::analyze_speech))
        .route("/analyze", post(analysis::analyze))
        .route("/emotion", post(analysis::emotion))
        .route("/partners", post(partners::create).get(partners::list))
        .route(
            "/partners/{id}",
            get(partners::get_one).put(partners::update).delete(partners::delete),
        )
        .route("/chat-rooms", post(chat_rooms::create).get(chat_rooms::list))
        .route("/chat-rooms/{id}", put(chat_rooms::update).delete(chat_rooms::delete))
        .route("/conversations", post(conversations::save).get(conversations::history))
        .route("/conversations/{id}/feedback", post(conversations::record_feedback))
        .with_state(state)
}

#[cfg(test)]
mod tests {
    use std::collections::BTreeMap;
    use std::sync::Arc;

    use anyhow::Result as AnyResult;
    use async_trait::async_trait;
    use axum::body::{to_bytes, Body};
    use axum::http::{Request, StatusCode};
    use axum::Router;
    use serde_json::{json, Value};
    use tower::ServiceExt;
    use wingman_agent::{EmotionAnalyzer, ResponseGenerator, SentimentProvider};
    use wingman_core::emotion::{Sentiment, SentimentReport};

    use super::router;
    use crate::state::AppState;

    fn app() -> Router {
        router(AppState::default())
    }

    async fn send(app: &Router, method: &str, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
        let request = Request::builder()
            .method(method)
            .uri(uri)
            .header("content-type", "application/json")
            .body(body.map_or_else(Body::empty, |value| Body::from(value.to_string())))
            .expect("request");

        let response = app.clone().oneshot(request).await.expect("response");
        let status = response.status();
        let bytes = to_bytes(response.into_body(), usize::MAX).await.expect("body");
        let value = if bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&bytes).expect("json body")
        };
        (status, value)
    }

    struct NegativeProvider;

    #[async_trait]
    impl SentimentProvider for NegativeProvider {
        async fn detect(&self, _text: &str, _language: &str) -> AnyResult<SentimentReport> {
            Ok(SentimentReport {
                sentiment: Sentiment::Negative,
                sentiment_scores: BTreeMap::from([("Negative".to_string(), 0.85)]),
                ..SentimentReport::default()
            })
        }
    }

    #[tokio::test]
    async fn health_is_ready() {
        let (status, body) = send(&app(), "GET", "/health", None).await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["status"], "ready");
        assert_eq!(body["oracle"]["status"], "disabled");
    }

    #[tokio::test]
    async fn analyze_speech_requires_messages_field() {
        let app = app();

        let (status, body) = send(&app, "POST", "/analyze-speech", Some(json!({}))).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error_class"], "bad_request");
        assert_eq!(body["error"], "missing required field `messages`");

        let (status, body) =
            send(&app, "POST", "/analyze-speech", Some(json!({ "messages": [] }))).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["speech_profile"]["formal_ratio"], 0.5);
        assert_eq!(body["speech_profile"]["total_messages"], 0);
        assert_eq!(body["risk"]["tier"], "balanced");
    }

    #[tokio::test]
    async fn analyze_speech_profiles_formal_history() {
        let (status, body) = send(
            &app(),
            "POST",
            "/analyze-speech",
            Some(json!({ "messages": ["밥 먹었어요?"] })),
        )
        .await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["speech_profile"]["formal_ratio"], 1.0);
        assert_eq!(body["speech_profile"]["speech_style"], "formal");
    }

    #[tokio::test]
    async fn analyze_returns_reengagement_fallback_for_no_contact() {
        let body = json!({
            "messages": ["요즘 바빠요?", "넵 맞아요"],
            "situation": "상대방이 연락이 없어",
            "emotion": { "sentiment": "NEGATIVE", "sentiment_confidence": 0.8 }
        });

        let (status, body) = send(&app(), "POST", "/analyze", Some(body)).await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["risk"]["tier"], "balanced");
        let responses = body["responses"].as_array().expect("responses array");
        assert_eq!(responses.len(), 1);
        assert!(responses[0]["message"].as_str().is_some_and(|m| m.starts_with("안녕! 괜찮아?")));
        assert_eq!(responses[0]["confidence"], 0.8);
        assert_eq!(responses[0]["type"], "balanced");
    }

    #[tokio::test]
    async fn analyze_derives_emotion_from_situation_when_absent() {
        let state = AppState::in_memory(
            ResponseGenerator::fallback_only(),
            EmotionAnalyzer::new(Arc::new(NegativeProvider)),
        );
        let body = json!({ "messages": ["넵"], "situation": "이틀째 답장이 없어" });

        let (status, body) = send(&router(state), "POST", "/analyze", Some(body)).await;

        assert_eq!(status, StatusCode::OK);
        let message = body["responses"][0]["message"].as_str().expect("message");
        assert!(message.starts_with("안녕! 괜찮아?"));
    }

    #[tokio::test]
    async fn emotion_rejects_blank_text_and_falls_back_without_provider() {
        let app = app();

        let (status, _) = send(&app, "POST", "/emotion", Some(json!({ "text": "  " }))).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);

        let (status, body) = send(&app, "POST", "/emotion", Some(json!({ "text": "오늘 너무 좋았어" }))).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["sentiment"], "NEUTRAL");
        assert_eq!(body["emotion_category"], "calm");
        assert_eq!(body["analysis_summary"], "감정 분석을 완료할 수 없습니다.");
    }

    #[tokio::test]
    async fn partner_profile_lifecycle() {
        let app = app();

        let (status, _) =
            send(&app, "POST", "/partners", Some(json!({ "user_id": "u1", "name": "지민" }))).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);

        let (status, created) = send(
            &app,
            "POST",
            "/partners",
            Some(json!({
                "user_id": "u1",
                "name": "지민",
                "relationship": "썸",
                "description": "외향적이고 유머러스한 성격",
                "interests": "영화, 카페"
            })),
        )
        .await;
        assert_eq!(status, StatusCode::CREATED);
        assert_eq!(
            created["profile"]["analysis"]["personality_keywords"],
            json!(["outgoing", "humorous"])
        );
        let id = created["profile_id"].as_str().expect("profile id").to_string();

        let (status, listed) = send(&app, "GET", "/partners?user_id=u1", None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(listed["profiles"].as_array().map(Vec::len), Some(1));

        let (status, updated) = send(
            &app,
            "PUT",
            &format!("/partners/{id}"),
            Some(json!({ "description": "내향적이고 조용한 편" })),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(updated["info"]["name"], "지민");
        assert_eq!(updated["analysis"]["personality_keywords"], json!(["introverted"]));

        let (status, _) = send(&app, "DELETE", &format!("/partners/{id}"), None).await;
        assert_eq!(status, StatusCode::NO_CONTENT);

        let (status, body) = send(&app, "GET", &format!("/partners/{id}"), None).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body["error_class"], "not_found");
    }

    #[tokio::test]
    async fn chat_room_lifecycle() {
        let app = app();

        let (status, _) = send(&app, "GET", "/chat-rooms", None).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);

        let (status, created) = send(
            &app,
            "POST",
            "/chat-rooms",
            Some(json!({ "user_id": "u1", "partner_name": "서연", "partner_relationship": "친구" })),
        )
        .await;
        assert_eq!(status, StatusCode::CREATED);
        assert_eq!(created["room"]["name"], "서연와의 대화");
        let id = created["room"]["id"].as_str().expect("room id").to_string();

        let (status, updated) = send(
            &app,
            "PUT",
            &format!("/chat-rooms/{id}"),
            Some(json!({ "last_message": "내일 봐!", "message_count": 2 })),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(updated["room"]["message_count"], 2);

        let (_, listed) = send(&app, "GET", "/chat-rooms?user_id=u1", None).await;
        assert_eq!(listed["rooms"][0]["last_message"], "내일 봐!");

        let (status, _) = send(&app, "DELETE", &format!("/chat-rooms/{id}"), None).await;
        assert_eq!(status, StatusCode::NO_CONTENT);
        let (status, _) = send(&app, "DELETE", &format!("/chat-rooms/{id}"), None).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn conversation_history_round_trip() {
        let app = app();
        let candidate = json!({
            "type": "safe",
            "message": "아 그렇구나! 나도 그런 생각 해본 적 있어",
            "explanation": "무난한 답변",
            "risk_level": 1,
            "confidence": 0.8,
            "source": "fallback"
        });

        let (status, _) = send(
            &app,
            "POST",
            "/conversations",
            Some(json!({ "user_id": "u1", "user_message": "뭐해?", "responses": [] })),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);

        let (status, saved) = send(
            &app,
            "POST",
            "/conversations",
            Some(json!({
                "user_id": "u1",
                "user_message": "뭐해?",
                "responses": [candidate],
                "feedback": { "selected_response_type": "safe", "rating": 5 }
            })),
        )
        .await;
        assert_eq!(status, StatusCode::CREATED);
        assert!(saved["session_id"].as_str().is_some_and(|id| id.starts_with("session_")));

        let (status, history) =
            send(&app, "GET", "/conversations?user_id=u1&limit=5", None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(history["total_count"], 1);
        assert_eq!(history["limit"], 5);
        assert_eq!(history["conversations"][0]["feedback"]["rating"], 5);
    }

    #[tokio::test]
    async fn feedback_can_be_recorded_after_saving() {
        let app = app();
        let (_, saved) = send(
            &app,
            "POST",
            "/conversations",
            Some(json!({
                "user_id": "u1",
                "user_message": "주말에 뭐해?",
                "responses": [{
                    "type": "balanced",
                    "message": "나 아직 계획 없어! 너는?",
                    "explanation": "가볍게 되묻기",
                    "risk_level": 3,
                    "confidence": 0.8
                }]
            })),
        )
        .await;
        let id = saved["conversation_id"].as_str().expect("conversation id").to_string();
        let uri = format!("/conversations/{id}/feedback");

        let (status, _) = send(&app, "POST", &uri, Some(json!({ "rating": 0 }))).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);

        let (status, recorded) = send(
            &app,
            "POST",
            &uri,
            Some(json!({
                "selected_response_type": "balanced",
                "rating": 4,
                "comment": "자연스러웠어요"
            })),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(recorded["feedback"]["rating"], 4);

        let (_, history) = send(&app, "GET", "/conversations?user_id=u1", None).await;
        assert_eq!(history["conversations"][0]["feedback"]["comment"], "자연스러웠어요");
        assert_eq!(history["conversations"][0]["feedback"]["selected_response_type"], "balanced");

        let (status, body) = send(
            &app,
            "POST",
            "/conversations/conv_missing/feedback",
            Some(json!({ "rating": 3 })),
        )
        .await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body["error_class"], "not_found");
    }
}
