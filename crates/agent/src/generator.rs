//! Oracle-first reply generation with a deterministic fallback.

use std::sync::Arc;
use std::time::Duration;

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};
use wingman_core::config::LlmConfig;
use wingman_core::domain::partner::PartnerInfo;
use wingman_core::domain::response::ResponseCandidate;
use wingman_core::emotion::EmotionSignal;
use wingman_core::partner::{PartnerContext, PartnerContextBuilder};
use wingman_core::policy::ResponseRequest;
use wingman_core::risk::{RiskAssessment, RiskClassifier};
use wingman_core::style::{StyleAnalyzer, StyleProfile};

use crate::llm::{HttpLlmClient, LlmClient};

const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);
const DEFAULT_MAX_OUTPUT_TOKENS: u32 = 1000;

#[derive(Clone)]
pub struct ResponseGenerator {
    oracle: Option<Arc<dyn LlmClient>>,
    timeout: Duration,
    max_output_tokens: u32,
}

impl Default for ResponseGenerator {
    fn default() -> Self {
        Self::fallback_only()
    }
}

impl ResponseGenerator {
    pub fn new(oracle: Arc<dyn LlmClient>, timeout: Duration, max_output_tokens: u32) -> Self {
        Self { oracle: Some(oracle), timeout, max_output_tokens }
    }

    pub fn fallback_only() -> Self {
        Self { oracle: None, timeout: DEFAULT_TIMEOUT, max_output_tokens: DEFAULT_MAX_OUTPUT_TOKENS }
    }

    pub fn from_config(llm: &LlmConfig) -> anyhow::Result<Self> {
        let oracle = HttpLlmClient::from_config(llm)?
            .map(|client| Arc::new(client) as Arc<dyn LlmClient>);
        Ok(Self {
            oracle,
            timeout: Duration::from_secs(llm.timeout_secs),
            max_output_tokens: llm.max_output_tokens,
        })
    }

    pub fn has_oracle(&self) -> bool {
        self.oracle.is_some()
    }

    /// Exactly one candidate for the request tier. Never fails.
    pub async fn generate(&self, request: &ResponseRequest) -> Vec<ResponseCandidate> {
        let candidate = match self.ask_oracle(request).await {
            Some(candidate) => candidate,
            None => {
                let candidate = request.fallback();
                debug!(
                    event_name = "policy.generate.fallback",
                    tier = %request.tier,
                    "using fallback reply"
                );
                candidate
            }
        };
        vec![candidate]
    }

    async fn ask_oracle(&self, request: &ResponseRequest) -> Option<ResponseCandidate> {
        let oracle = self.oracle.as_ref()?;
        let prompt = request.prompt();

        let raw = match tokio::time::timeout(
            self.timeout,
            oracle.complete(&prompt, self.max_output_tokens),
        )
        .await
        {
            Ok(Ok(raw)) => raw,
            Ok(Err(error)) => {
                warn!(
                    event_name = "policy.generate.oracle_failed",
                    error = %error,
                    "oracle call failed"
                );
                return None;
            }
            Err(_) => {
                warn!(
                    event_name = "policy.generate.oracle_timeout",
                    timeout_secs = self.timeout.as_secs(),
                    "oracle call timed out"
                );
                return None;
            }
        };

        match request.accept(&raw) {
            Ok(candidate) => Some(candidate),
            Err(error) => {
                warn!(
                    event_name = "policy.generate.oracle_rejected",
                    error = %error,
                    "oracle reply rejected"
                );
                None
            }
        }
    }

    /// Full pipeline from raw message history to suggestions.
    pub async fn suggest(&self, input: SuggestionInput) -> Suggestion {
        let style = StyleAnalyzer::new().analyze(&input.messages);
        let risk = RiskClassifier::new().classify(&style, Some(&input.emotion));
        let partner = input
            .partner
            .as_ref()
            .map(|info| PartnerContextBuilder::new().build(info))
            .filter(|context| !context.is_empty());

        let request = ResponseRequest::new(risk.tier, style.clone())
            .with_context(input.context_text)
            .with_situation(input.situation)
            .with_partner(partner.clone())
            .with_emotion(input.emotion);

        let responses = self.generate(&request).await;
        Suggestion { style, risk, partner, responses }
    }
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SuggestionInput {
    pub messages: Vec<String>,
    pub situation: String,
    pub context_text: String,
    pub partner: Option<PartnerInfo>,
    pub emotion: EmotionSignal,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Suggestion {
    pub style: StyleProfile,
    pub risk: RiskAssessment,
    pub partner: Option<PartnerContext>,
    pub responses: Vec<ResponseCandidate>,
}
