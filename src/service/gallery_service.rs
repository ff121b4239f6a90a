use std::sync::Arc;

use async_trait::async_trait;
use bson::{doc, Document};
use tracing::{info, instrument};
use validator::Validate;

use crate::dto::gallery_dto::{CreateGalleryImageRequest, UpdateGalleryImageRequest};
use crate::dto::set_document;
use crate::dto::testimonial_dto::ActiveListQuery;
use crate::model::banquet_gallery::BanquetGalleryImage;
use crate::repository::crud_repo::CrudRepository;
use crate::repository::document_store::DocumentStore;
use crate::util::date;
use crate::util::error::ServiceError;
use crate::util::identifier::object_id_filter;

pub const BANQUET_GALLERY_COLLECTION: &str = "banquet_gallery";

#[async_trait]
pub trait GalleryService: Send + Sync {
    async fn list_images(&self, query: ActiveListQuery) -> Result<Vec<BanquetGalleryImage>, ServiceError>;
    async fn get_image(&self, id: &str) -> Result<BanquetGalleryImage, ServiceError>;
    async fn create_image(&self, request: CreateGalleryImageRequest) -> Result<BanquetGalleryImage, ServiceError>;
    async fn update_image(&self, id: &str, request: UpdateGalleryImageRequest) -> Result<(), ServiceError>;
    async fn delete_image(&self, id: &str) -> Result<(), ServiceError>;
}

pub struct GalleryServiceImpl {
    pub gallery_repo: CrudRepository<BanquetGalleryImage>,
}

impl GalleryServiceImpl {
    pub fn new(store: Arc<dyn DocumentStore>) -> Self {
        GalleryServiceImpl { gallery_repo: CrudRepository::new(store, BANQUET_GALLERY_COLLECTION, "Gallery image") }
    }

    fn key(id: &str) -> Result<Document, ServiceError> {
        object_id_filter(id).ok_or_else(|| ServiceError::InvalidInput("Invalid gallery image id".to_string()))
    }
}

#[async_trait]
impl GalleryService for GalleryServiceImpl {
    async fn list_images(&self, query: ActiveListQuery) -> Result<Vec<BanquetGalleryImage>, ServiceError> {
        let filter = match query.active {
            Some(active) => doc! { "isActive": active },
            None => Document::new(),
        };
        Ok(self.gallery_repo.list(filter, Some(doc! { "order": 1 })).await?)
    }

    async fn get_image(&self, id: &str) -> Result<BanquetGalleryImage, ServiceError> {
        Ok(self.gallery_repo.get(Self::key(id)?).await?)
    }

    #[instrument(skip(self, request))]
    async fn create_image(&self, request: CreateGalleryImageRequest) -> Result<BanquetGalleryImage, ServiceError> {
        request.validate()?;

        let order = self.gallery_repo.next_value("order").await?;
        let now = date::now();
        let image = BanquetGalleryImage {
            id: None,
            image: request.image,
            title: request.title.unwrap_or_default(),
            description: request.description.unwrap_or_default(),
            order,
            is_active: request.is_active.unwrap_or(true),
            created_at: Some(now),
            updated_at: Some(now),
        };

        let created = self.gallery_repo.create(&image).await?;
        info!(order, "Gallery image added");
        Ok(created)
    }

    #[instrument(skip(self, request))]
    async fn update_image(&self, id: &str, request: UpdateGalleryImageRequest) -> Result<(), ServiceError> {
        request.validate()?;
        let filter = Self::key(id)?;
        self.gallery_repo.update(filter, set_document(&request)?).await?;
        Ok(())
    }

    #[instrument(skip(self))]
    async fn delete_image(&self, id: &str) -> Result<(), ServiceError> {
        Ok(self.gallery_repo.delete(Self::key(id)?).await?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::repository::memory_store::InMemoryDocumentStore;
    use serde_json::json;

    #[tokio::test]
    async fn test_list_is_ordered_and_filterable() {
        let service = GalleryServiceImpl::new(Arc::new(InMemoryDocumentStore::new()));
        for (image, active) in [("/1.jpg", true), ("/2.jpg", false), ("/3.jpg", true)] {
            let request: CreateGalleryImageRequest =
                serde_json::from_value(json!({ "image": image, "isActive": active })).unwrap();
            service.create_image(request).await.unwrap();
        }
        let all = service.list_images(ActiveListQuery::default()).await.unwrap();
        assert_eq!(all.iter().map(|i| i.order).collect::<Vec<_>>(), vec![1, 2, 3]);
        assert_eq!(all[0].title, "");

        let active = service.list_images(ActiveListQuery { active: Some(true) }).await.unwrap();
        assert_eq!(active.len(), 2);
    }
}
