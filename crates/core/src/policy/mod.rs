//! Turns a tier plus conversation context into a reply candidate.
//!
//! The generative path lives in `wingman-agent`; this module owns the prompt,
//! the validation of whatever text comes back, and the literal fallback.

pub mod fallback;
pub mod parse;
pub mod prompt;

use serde::{Deserialize, Serialize};

use crate::domain::response::{ResponseCandidate, Tier};
use crate::emotion::EmotionSignal;
use crate::partner::PartnerContext;
use crate::style::StyleProfile;

pub use fallback::{fallback_candidate, is_no_contact, FALLBACK_CONFIDENCE};
pub use parse::{parse_oracle_reply, OracleReplyError, ORACLE_DEFAULT_CONFIDENCE};
pub use prompt::build_prompt;

/// Everything needed to produce one reply for one tier.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ResponseRequest {
    pub tier: Tier,
    #[serde(default)]
    pub context_text: String,
    #[serde(default)]
    pub situation: String,
    #[serde(default)]
    pub partner: Option<PartnerContext>,
    #[serde(default)]
    pub style: StyleProfile,
    #[serde(default)]
    pub emotion: EmotionSignal,
}

impl ResponseRequest {
    pub fn new(tier: Tier, style: StyleProfile) -> Self {
        Self {
            tier,
            context_text: String::new(),
            situation: String::new(),
            partner: None,
            style,
            emotion: EmotionSignal::default(),
        }
    }

    pub fn with_context(mut self, context_text: impl Into<String>) -> Self {
        self.context_text = context_text.into();
        self
    }

    pub fn with_situation(mut self, situation: impl Into<String>) -> Self {
        self.situation = situation.into();
        self
    }

    pub fn with_partner(mut self, partner: Option<PartnerContext>) -> Self {
        self.partner = partner.filter(|context| !context.is_empty());
        self
    }

    pub fn with_emotion(mut self, emotion: EmotionSignal) -> Self {
        self.emotion = emotion;
        self
    }

    pub fn prompt(&self) -> String {
        build_prompt(self)
    }

    /// Validates oracle output against this request's tier.
    pub fn accept(&self, raw: &str) -> Result<ResponseCandidate, OracleReplyError> {
        parse_oracle_reply(raw, self.tier)
    }

    pub fn fallback(&self) -> ResponseCandidate {
        fallback_candidate(self.tier, &self.situation, self.emotion.sentiment)
    }
}
