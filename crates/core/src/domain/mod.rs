pub mod chat_room;
pub mod conversation;
pub mod partner;
pub mod response;
