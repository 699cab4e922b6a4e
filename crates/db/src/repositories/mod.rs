use async_trait::async_trait;
use thiserror::Error;

use wingman_core::domain::chat_room::{ChatRoom, ChatRoomId};
use wingman_core::domain::conversation::{ConversationId, ConversationRecord, Feedback};
use wingman_core::domain::partner::{PartnerProfile, PartnerProfileId};
use wingman_core::errors::ApplicationError;

pub mod memory;

pub use memory::{
    InMemoryChatRoomRepository, InMemoryConversationRepository, InMemoryPartnerProfileRepository,
};

pub const DEFAULT_PAGE_LIMIT: usize = 20;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum RepositoryError {
    #[error("{entity} `{id}` already exists")]
    Conflict { entity: &'static str, id: String },
    #[error("{entity} `{id}` not found")]
    NotFound { entity: &'static str, id: String },
    #[error("storage error: {0}")]
    Storage(String),
}

impl From<RepositoryError> for ApplicationError {
    fn from(value: RepositoryError) -> Self {
        match value {
            RepositoryError::NotFound { entity, id } => Self::NotFound(format!("{entity} `{id}`")),
            RepositoryError::Conflict { .. } | RepositoryError::Storage(_) => {
                Self::Persistence(value.to_string())
            }
        }
    }
}

/// Window over a newest-first listing.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Page {
    pub limit: usize,
    pub offset: usize,
}

impl Default for Page {
    fn default() -> Self {
        Self { limit: DEFAULT_PAGE_LIMIT, offset: 0 }
    }
}

#[async_trait]
pub trait PartnerProfileRepository: Send + Sync {
    async fn create(&self, profile: PartnerProfile) -> Result<(), RepositoryError>;
    async fn find_by_id(
        &self,
        id: &PartnerProfileId,
    ) -> Result<Option<PartnerProfile>, RepositoryError>;
    /// Most recently updated first.
    async fn list_for_user(&self, user_id: &str) -> Result<Vec<PartnerProfile>, RepositoryError>;
    async fn update(&self, profile: PartnerProfile) -> Result<(), RepositoryError>;
    async fn delete(&self, id: &PartnerProfileId) -> Result<(), RepositoryError>;
}

#[async_trait]
pub trait ChatRoomRepository: Send + Sync {
    async fn create(&self, room: ChatRoom) -> Result<(), RepositoryError>;
    async fn find_by_id(&self, id: &ChatRoomId) -> Result<Option<ChatRoom>, RepositoryError>;
    /// Most recently updated first.
    async fn list_for_user(&self, user_id: &str) -> Result<Vec<ChatRoom>, RepositoryError>;
    async fn update(&self, room: ChatRoom) -> Result<(), RepositoryError>;
    async fn delete(&self, id: &ChatRoomId) -> Result<(), RepositoryError>;
}

#[async_trait]
pub trait ConversationRepository: Send + Sync {
    async fn create(&self, record: ConversationRecord) -> Result<(), RepositoryError>;
    async fn find_by_id(
        &self,
        id: &ConversationId,
    ) -> Result<Option<ConversationRecord>, RepositoryError>;
    /// Newest first.
    async fn list_for_user(
        &self,
        user_id: &str,
        page: Page,
    ) -> Result<Vec<ConversationRecord>, RepositoryError>;
    async fn record_feedback(
        &self,
        id: &ConversationId,
        feedback: Feedback,
    ) -> Result<(), RepositoryError>;
    async fn delete(&self, id: &ConversationId) -> Result<(), RepositoryError>;
}
