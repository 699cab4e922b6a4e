use axum::{extract::State, http::StatusCode, Json};
use chrono::Utc;
use serde::Serialize;

use crate::state::AppState;

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct HealthCheck {
    pub status: &'static str,
    pub detail: String,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub service: HealthCheck,
    pub oracle: HealthCheck,
    pub checked_at: String,
}

/// The service is always ready: without an oracle it serves fallback replies.
pub async fn health(State(state): State<AppState>) -> (StatusCode, Json<HealthResponse>) {
    let oracle = if state.generator.has_oracle() {
        HealthCheck { status: "configured", detail: "generative oracle enabled".to_string() }
    } else {
        HealthCheck { status: "disabled", detail: "replies come from fallback tables".to_string() }
    };

    let payload = HealthResponse {
        status: "ready",
        service: HealthCheck {
            status: "ready",
            detail: "wingman-server runtime initialized".to_string(),
        },
        oracle,
        checked_at: Utc::now().to_rfc3339(),
    };

    (StatusCode::OK, Json(payload))
}

#[cfg(test)]
mod tests {
    use axum::{extract::State, http::StatusCode, Json};

    use crate::health::health;
    use crate::state::AppState;

    #[tokio::test]
    async fn health_reports_ready_with_disabled_oracle() {
        let (status, Json(payload)) = health(State(AppState::default())).await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(payload.status, "ready");
        assert_eq!(payload.service.status, "ready");
        assert_eq!(payload.oracle.status, "disabled");
    }
}
