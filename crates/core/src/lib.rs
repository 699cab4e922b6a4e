pub mod config;
pub mod domain;
pub mod emotion;
pub mod errors;
pub mod partner;
pub mod policy;
pub mod risk;
pub mod style;

pub use domain::chat_room::{ChatRoom, ChatRoomId};
pub use domain::conversation::{ConversationId, ConversationRecord, Feedback, SessionId};
pub use domain::partner::{PartnerInfo, PartnerProfile, PartnerProfileId};
pub use domain::response::{CandidateSource, ResponseCandidate, Tier};
pub use emotion::{EmotionAnalysis, EmotionSignal, Sentiment, SentimentReport};
pub use errors::{ApplicationError, DomainError, InterfaceError};
pub use partner::{PartnerContext, PartnerContextBuilder};
pub use policy::{OracleReplyError, ResponseRequest};
pub use risk::{RiskAssessment, RiskClassifier};
pub use style::{SpeechStyle, StyleAnalyzer, StyleProfile, Tone};
