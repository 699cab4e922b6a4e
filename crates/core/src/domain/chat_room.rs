use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ChatRoomId(pub String);

impl ChatRoomId {
    pub fn generate() -> Self {
        Self(format!("room_{}", uuid::Uuid::new_v4().simple()))
    }
}

pub const NEW_ROOM_GREETING: &str = "새로운 대화가 시작되었습니다.";

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatRoom {
    pub id: ChatRoomId,
    pub user_id: String,
    pub name: String,
    pub partner_name: String,
    pub partner_relationship: String,
    pub message_count: u32,
    pub last_message: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl ChatRoom {
    pub fn open(user_id: &str, partner_name: &str, partner_relationship: &str) -> Self {
        let now = Utc::now();
        Self {
            id: ChatRoomId::generate(),
            user_id: user_id.to_string(),
            name: format!("{partner_name}와의 대화"),
            partner_name: partner_name.to_string(),
            partner_relationship: partner_relationship.to_string(),
            message_count: 0,
            last_message: NEW_ROOM_GREETING.to_string(),
            created_at: now,
            updated_at: now,
        }
    }

    pub fn record_activity(&mut self, last_message: Option<String>, message_count: Option<u32>) {
        if let Some(last_message) = last_message {
            self.last_message = last_message;
        }
        if let Some(message_count) = message_count {
            self.message_count = message_count;
        }
        self.updated_at = Utc::now();
    }
}

#[cfg(test)]
mod tests {
    use super::{ChatRoom, NEW_ROOM_GREETING};

    #[test]
    fn opened_room_starts_empty_with_greeting() {
        let room = ChatRoom::open("user-1", "지민", "썸");

        assert!(room.id.0.starts_with("room_"));
        assert_eq!(room.name, "지민와의 대화");
        assert_eq!(room.message_count, 0);
        assert_eq!(room.last_message, NEW_ROOM_GREETING);
        assert_eq!(room.created_at, room.updated_at);
    }

    #[test]
    fn activity_updates_only_given_fields() {
        let mut room = ChatRoom::open("user-1", "지민", "썸");
        room.record_activity(None, Some(4));

        assert_eq!(room.message_count, 4);
        assert_eq!(room.last_message, NEW_ROOM_GREETING);
        assert!(room.updated_at >= room.created_at);
    }
}
