use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::partner::PartnerContext;

#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PartnerProfileId(pub String);

impl PartnerProfileId {
    pub fn generate(user_id: &str) -> Self {
        Self(format!("partner_{user_id}_{}", uuid::Uuid::new_v4().simple()))
    }
}

/// Free-text description of the person the user is talking to.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PartnerInfo {
    pub name: Option<String>,
    pub relationship: Option<String>,
    pub description: Option<String>,
    pub interests: Option<String>,
    pub communication_style: Option<String>,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct PartnerProfile {
    pub id: PartnerProfileId,
    pub user_id: String,
    pub info: PartnerInfo,
    pub analysis: PartnerContext,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}
