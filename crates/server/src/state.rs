use std::sync::Arc;

use wingman_agent::{EmotionAnalyzer, ResponseGenerator};
use wingman_db::{
    ChatRoomRepository, ConversationRepository, InMemoryChatRoomRepository,
    InMemoryConversationRepository, InMemoryPartnerProfileRepository, PartnerProfileRepository,
};

/// Shared handler state; every field is cheap to clone.
#[derive(Clone)]
pub struct AppState {
    pub partners: Arc<dyn PartnerProfileRepository>,
    pub chat_rooms: Arc<dyn ChatRoomRepository>,
    pub conversations: Arc<dyn ConversationRepository>,
    pub generator: ResponseGenerator,
    pub emotion: EmotionAnalyzer,
}

impl AppState {
    pub fn in_memory(generator: ResponseGenerator, emotion: EmotionAnalyzer) -> Self {
        Self {
            partners: Arc::new(InMemoryPartnerProfileRepository::default()),
            chat_rooms: Arc::new(InMemoryChatRoomRepository::default()),
            conversations: Arc::new(InMemoryConversationRepository::default()),
            generator,
            emotion,
        }
    }
}

impl Default for AppState {
    fn default() -> Self {
        Self::in_memory(ResponseGenerator::fallback_only(), EmotionAnalyzer::unconfigured())
    }
}
