use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::domain::response::{ResponseCandidate, Tier};

#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ConversationId(pub String);

impl ConversationId {
    pub fn generate() -> Self {
        Self(uuid::Uuid::new_v4().to_string())
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SessionId(pub String);

impl SessionId {
    pub fn generate() -> Self {
        let raw = uuid::Uuid::new_v4().simple().to_string();
        Self(format!("session_{}", &raw[..8]))
    }
}

/// User reaction to a suggested reply.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Feedback {
    pub selected_response_type: Option<Tier>,
    pub selected_response: Option<String>,
    /// 1..=5 when present.
    pub rating: Option<u8>,
    #[serde(default)]
    pub comment: String,
}

/// One suggestion round as emitted to the persistence collaborator.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ConversationRecord {
    pub id: ConversationId,
    pub user_id: String,
    pub session_id: SessionId,
    pub partner_name: String,
    pub partner_relationship: String,
    pub context_text: String,
    pub user_message: String,
    pub responses: Vec<ResponseCandidate>,
    pub feedback: Feedback,
    pub created_at: DateTime<Utc>,
}
