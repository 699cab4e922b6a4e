use std::collections::HashMap;

use tokio::sync::RwLock;

use wingman_core::domain::chat_room::{ChatRoom, ChatRoomId};
use wingman_core::domain::conversation::{ConversationId, ConversationRecord, Feedback};
use wingman_core::domain::partner::{PartnerProfile, PartnerProfileId};

use super::{
    ChatRoomRepository, ConversationRepository, Page, PartnerProfileRepository, RepositoryError,
};

const PARTNER_PROFILE: &str = "partner profile";
const CHAT_ROOM: &str = "chat room";
const CONVERSATION: &str = "conversation";

fn insert_new<V>(
    store: &mut HashMap<String, V>,
    entity: &'static str,
    key: &str,
    value: V,
) -> Result<(), RepositoryError> {
    if store.contains_key(key) {
        return Err(RepositoryError::Conflict { entity, id: key.to_string() });
    }
    store.insert(key.to_string(), value);
    Ok(())
}

fn replace_existing<V>(
    store: &mut HashMap<String, V>,
    entity: &'static str,
    key: &str,
    value: V,
) -> Result<(), RepositoryError> {
    match store.get_mut(key) {
        Some(slot) => {
            *slot = value;
            Ok(())
        }
        None => Err(RepositoryError::NotFound { entity, id: key.to_string() }),
    }
}

fn remove_existing<V>(
    store: &mut HashMap<String, V>,
    entity: &'static str,
    key: &str,
) -> Result<(), RepositoryError> {
    store
        .remove(key)
        .map(|_| ())
        .ok_or_else(|| RepositoryError::NotFound { entity, id: key.to_string() })
}

#[derive(Default)]
pub struct InMemoryPartnerProfileRepository {
    profiles: RwLock<HashMap<String, PartnerProfile>>,
}

#[async_trait::async_trait]
impl PartnerProfileRepository for InMemoryPartnerProfileRepository {
    async fn create(&self, profile: PartnerProfile) -> Result<(), RepositoryError> {
        let mut profiles = self.profiles.write().await;
        let key = profile.id.0.clone();
        insert_new(&mut profiles, PARTNER_PROFILE, &key, profile)
    }

    async fn find_by_id(
        &self,
        id: &PartnerProfileId,
    ) -> Result<Option<PartnerProfile>, RepositoryError> {
        let profiles = self.profiles.read().await;
        Ok(profiles.get(&id.0).cloned())
    }

    async fn list_for_user(&self, user_id: &str) -> Result<Vec<PartnerProfile>, RepositoryError> {
        let profiles = self.profiles.read().await;
        let mut owned = profiles
            .values()
            .filter(|profile| profile.user_id == user_id)
            .cloned()
            .collect::<Vec<_>>();
        owned.sort_by(|left, right| right.updated_at.cmp(&left.updated_at));
        Ok(owned)
    }

    async fn update(&self, profile: PartnerProfile) -> Result<(), RepositoryError> {
        let mut profiles = self.profiles.write().await;
        let key = profile.id.0.clone();
        replace_existing(&mut profiles, PARTNER_PROFILE, &key, profile)
    }

    async fn delete(&self, id: &PartnerProfileId) -> Result<(), RepositoryError> {
        let mut profiles = self.profiles.write().await;
        remove_existing(&mut profiles, PARTNER_PROFILE, &id.0)
    }
}

#[derive(Default)]
pub struct InMemoryChatRoomRepository {
    rooms: RwLock<HashMap<String, ChatRoom>>,
}

#[async_trait::async_trait]
impl ChatRoomRepository for InMemoryChatRoomRepository {
    async fn create(&self, room: ChatRoom) -> Result<(), RepositoryError> {
        let mut rooms = self.rooms.write().await;
        let key = room.id.0.clone();
        insert_new(&mut rooms, CHAT_ROOM, &key, room)
    }

    async fn find_by_id(&self, id: &ChatRoomId) -> Result<Option<ChatRoom>, RepositoryError> {
        let rooms = self.rooms.read().await;
        Ok(rooms.get(&id.0).cloned())
    }

    async fn list_for_user(&self, user_id: &str) -> Result<Vec<ChatRoom>, RepositoryError> {
        let rooms = self.rooms.read().await;
        let mut owned =
            rooms.values().filter(|room| room.user_id == user_id).cloned().collect::<Vec<_>>();
        owned.sort_by(|left, right| right.updated_at.cmp(&left.updated_at));
        Ok(owned)
    }

    async fn update(&self, room: ChatRoom) -> Result<(), RepositoryError> {
        let mut rooms = self.rooms.write().await;
        let key = room.id.0.clone();
        replace_existing(&mut rooms, CHAT_ROOM, &key, room)
    }

    async fn delete(&self, id: &ChatRoomId) -> Result<(), RepositoryError> {
        let mut rooms = self.rooms.write().await;
        remove_existing(&mut rooms, CHAT_ROOM, &id.0)
    }
}

#[derive(Default)]
pub struct InMemoryConversationRepository {
    records: RwLock<HashMap<String, ConversationRecord>>,
}

#[async_trait::async_trait]
impl ConversationRepository for InMemoryConversationRepository {
    async fn create(&self, record: ConversationRecord) -> Result<(), RepositoryError> {
        let mut records = self.records.write().await;
        let key = record.id.0.clone();
        insert_new(&mut records, CONVERSATION, &key, record)
    }

    async fn find_by_id(
        &self,
        id: &ConversationId,
    ) -> Result<Option<ConversationRecord>, RepositoryError> {
        let records = self.records.read().await;
        Ok(records.get(&id.0).cloned())
    }

    async fn list_for_user(
        &self,
        user_id: &str,
        page: Page,
    ) -> Result<Vec<ConversationRecord>, RepositoryError> {
        let records = self.records.read().await;
        let mut owned = records
            .values()
            .filter(|record| record.user_id == user_id)
            .cloned()
            .collect::<Vec<_>>();
        owned.sort_by(|left, right| right.created_at.cmp(&left.created_at));
        Ok(owned.into_iter().skip(page.offset).take(page.limit).collect())
    }

    async fn record_feedback(
        &self,
        id: &ConversationId,
        feedback: Feedback,
    ) -> Result<(), RepositoryError> {
        let mut records = self.records.write().await;
        match records.get_mut(&id.0) {
            Some(record) => {
                record.feedback = feedback;
                Ok(())
            }
            None => Err(RepositoryError::NotFound { entity: CONVERSATION, id: id.0.clone() }),
        }
    }

    async fn delete(&self, id: &ConversationId) -> Result<(), RepositoryError> {
        let mut records = self.records.write().await;
        remove_existing(&mut records, CONVERSATION, &id.0)
    }
}
