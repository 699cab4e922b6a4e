pub mod repositories;

pub use repositories::{
    ChatRoomRepository, ConversationRepository, InMemoryChatRoomRepository,
    InMemoryConversationRepository, InMemoryPartnerProfileRepository, Page,
    PartnerProfileRepository, RepositoryError, DEFAULT_PAGE_LIMIT,
};
