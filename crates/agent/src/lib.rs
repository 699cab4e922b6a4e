//! Collaborator-facing half of wingman.
//!
//! - `llm`: the generative oracle seam and its HTTP implementation
//! - `generator`: oracle-first reply generation that always falls back
//! - `sentiment`: sentiment provider seam and the degrading emotion analyzer
//!
//! The oracle only phrases replies. Style, risk and tier are computed
//! deterministically by `wingman-core` before any call is made.

pub mod generator;
pub mod llm;
pub mod sentiment;

pub use generator::{ResponseGenerator, Suggestion, SuggestionInput};
pub use llm::{HttpLlmClient, LlmClient};
pub use sentiment::{EmotionAnalyzer, SentimentProvider};
