use std::sync::Arc;

use async_trait::async_trait;
use bson::{doc, oid::ObjectId, Bson, Document};
use tracing::{debug, info, instrument, warn};
use validator::Validate;

use crate::dto::room_dto::{CreateRoomRequest, UpdateRoomRequest};
use crate::dto::{extension_document, set_document};
use crate::model::room::Room;
use crate::repository::crud_repo::CrudRepository;
use crate::repository::document_store::DocumentStore;
use crate::util::date;
use crate::util::error::ServiceError;
use crate::util::identifier::dual_identity_chain;

pub const ROOMS_COLLECTION: &str = "rooms";

/// Rooms are read and written as raw documents: records carry legacy fields
/// next to the typed core and every one of them must round-trip untouched.
#[async_trait]
pub trait RoomService: Send + Sync {
    async fn list_rooms(&self) -> Result<Vec<Document>, ServiceError>;
    async fn get_room(&self, id: &str) -> Result<Document, ServiceError>;
    async fn create_room(&self, request: CreateRoomRequest) -> Result<Document, ServiceError>;
    async fn update_room(&self, id: &str, request: UpdateRoomRequest) -> Result<Document, ServiceError>;
    async fn delete_room(&self, id: &str) -> Result<(), ServiceError>;
}

pub struct RoomServiceImpl {
    pub room_repo: CrudRepository<Document>,
}

impl RoomServiceImpl {
    pub fn new(store: Arc<dyn DocumentStore>) -> Self {
        RoomServiceImpl { room_repo: CrudRepository::new(store, ROOMS_COLLECTION, "Room") }
    }

    /// Tries the app-level `id`, then `_id` as an ObjectId, then `_id` as a
    /// plain string; the first hit wins.
    async fn resolve(&self, id: &str) -> Result<Document, ServiceError> {
        for filter in dual_identity_chain(id) {
            if let Some(room) = self.room_repo.find_one(filter.clone()).await? {
                debug!(?filter, "Room resolved");
                return Ok(room);
            }
        }
        warn!("No room matched '{}'", id);
        Err(ServiceError::NotFound("Room not found".to_string()))
    }

    fn store_key(room: &Document) -> Result<Document, ServiceError> {
        room.get("_id")
            .cloned()
            .map(|id| doc! { "_id": id })
            .ok_or_else(|| ServiceError::InternalError("Stored room has no _id".to_string()))
    }
}

#[async_trait]
impl RoomService for RoomServiceImpl {
    async fn list_rooms(&self) -> Result<Vec<Document>, ServiceError> {
        Ok(self.room_repo.list(Document::new(), None).await?)
    }

    #[instrument(skip(self))]
    async fn get_room(&self, id: &str) -> Result<Document, ServiceError> {
        self.resolve(id).await
    }

    #[instrument(skip(self, request), fields(title = %request.title))]
    async fn create_room(&self, request: CreateRoomRequest) -> Result<Document, ServiceError> {
        request.validate()?;

        let store_id = ObjectId::new();
        let id = request
            .id
            .map(|id| id.trim().to_string())
            .filter(|id| !id.is_empty())
            .unwrap_or_else(|| store_id.to_hex());
        if self.room_repo.find_one(doc! { "id": id.as_str() }).await?.is_some() {
            return Err(ServiceError::Conflict(format!("A room with id '{}' already exists", id)));
        }

        let now = date::now();
        let room = Room {
            store_id: Some(Bson::ObjectId(store_id)),
            id: Some(id),
            title: request.title,
            description: request.description,
            check_in: request.check_in,
            check_out: request.check_out,
            guests: request.guests,
            size: request.size,
            bed_type: request.bed_type,
            amenities: request.amenities.unwrap_or_default(),
            price_summary: request.price_summary,
            addons: request.addons,
            goibibo_offers: request.goibibo_offers,
            created_at: Some(now),
            updated_at: Some(now),
            extra: extension_document(&request.extra)?,
        };
        let document = bson::to_document(&room)
            .map_err(|e| ServiceError::InternalError(format!("Failed to serialize room: {}", e)))?;

        let created = self.room_repo.create(&document).await?;
        info!("Room created");
        Ok(created)
    }

    #[instrument(skip(self, request))]
    async fn update_room(&self, id: &str, request: UpdateRoomRequest) -> Result<Document, ServiceError> {
        request.validate()?;
        let room = self.resolve(id).await?;
        let set = set_document(&request)?;
        Ok(self.room_repo.update(Self::store_key(&room)?, set).await?)
    }

    #[instrument(skip(self))]
    async fn delete_room(&self, id: &str) -> Result<(), ServiceError> {
        let room = self.resolve(id).await?;
        Ok(self.room_repo.delete(Self::store_key(&room)?).await?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::repository::memory_store::InMemoryDocumentStore;
    use serde_json::json;

    #[tokio::test]
    async fn test_new_room_gets_canonical_id() {
        let service = RoomServiceImpl::new(Arc::new(InMemoryDocumentStore::new()));
        let request: CreateRoomRequest =
            serde_json::from_value(json!({ "title": "Deluxe", "price": 5200, "_id": "forged" })).unwrap();
        let room = service.create_room(request).await.unwrap();
        let store_id = room.get_object_id("_id").unwrap();
        assert_eq!(room.get_str("id").unwrap(), store_id.to_hex());
        assert_eq!(room.get_i64("price").unwrap(), 5200);
        assert!(service.get_room(&store_id.to_hex()).await.is_ok());
    }

    #[tokio::test]
    async fn test_lookup_falls_through_to_string_id() {
        let store = Arc::new(InMemoryDocumentStore::new());
        store.seed(ROOMS_COLLECTION, doc! { "_id": "legacy-7", "title": "Old Wing" }).await;
        let service = RoomServiceImpl::new(store);
        let room = service.get_room("legacy-7").await.unwrap();
        assert_eq!(room.get_str("title").unwrap(), "Old Wing");
    }

    #[tokio::test]
    async fn test_duplicate_app_id_rejected() {
        let service = RoomServiceImpl::new(Arc::new(InMemoryDocumentStore::new()));
        let request = || serde_json::from_value::<CreateRoomRequest>(json!({ "id": "3", "title": "Suite" })).unwrap();
        service.create_room(request()).await.unwrap();
        assert!(matches!(service.create_room(request()).await, Err(ServiceError::Conflict(_))));
    }

    #[tokio::test]
    async fn test_update_keeps_identity_and_created_at() {
        let service = RoomServiceImpl::new(Arc::new(InMemoryDocumentStore::new()));
        let created = service
            .create_room(serde_json::from_value(json!({ "id": "3", "title": "Suite", "size": "40 m2" })).unwrap())
            .await
            .unwrap();
        let update: UpdateRoomRequest =
            serde_json::from_value(json!({ "id": "9", "title": "Grand Suite", "createdAt": "2001-01-01" })).unwrap();
        let updated = service.update_room("3", update).await.unwrap();
        assert_eq!(updated.get_str("id").unwrap(), "3");
        assert_eq!(updated.get_str("title").unwrap(), "Grand Suite");
        assert_eq!(updated.get_str("size").unwrap(), "40 m2");
        assert_eq!(updated.get("createdAt"), created.get("createdAt"));
    }
}
