use std::sync::Arc;

use async_trait::async_trait;
use bson::{doc, Document};
use tracing::{error, info, instrument};
use validator::Validate;

use crate::dto::banner_dto::{BannerListQuery, CreateBannerRequest, UpdateBannerRequest};
use crate::dto::set_document;
use crate::model::banner::Banner;
use crate::repository::crud_repo::CrudRepository;
use crate::repository::document_store::DocumentStore;
use crate::util::date;
use crate::util::error::ServiceError;
use crate::util::identifier::object_id_filter;

pub const BANNERS_COLLECTION: &str = "banners";
const DEFAULT_BUTTON_TEXT: &str = "Learn More";

#[async_trait]
pub trait BannerService: Send + Sync {
    async fn list_banners(&self, query: BannerListQuery) -> Result<Vec<Banner>, ServiceError>;
    async fn get_banner(&self, id: &str) -> Result<Banner, ServiceError>;
    async fn create_banner(&self, request: CreateBannerRequest) -> Result<Banner, ServiceError>;
    async fn update_banner(&self, id: &str, request: UpdateBannerRequest) -> Result<Banner, ServiceError>;
    async fn delete_banner(&self, id: &str) -> Result<(), ServiceError>;
}

pub struct BannerServiceImpl {
    pub banner_repo: CrudRepository<Banner>,
}

impl BannerServiceImpl {
    pub fn new(store: Arc<dyn DocumentStore>) -> Self {
        BannerServiceImpl { banner_repo: CrudRepository::new(store, BANNERS_COLLECTION, "Banner") }
    }

    fn key(id: &str) -> Result<Document, ServiceError> {
        object_id_filter(id).ok_or_else(|| ServiceError::NotFound("Banner not found".to_string()))
    }
}

#[async_trait]
impl BannerService for BannerServiceImpl {
    #[instrument(skip(self))]
    async fn list_banners(&self, query: BannerListQuery) -> Result<Vec<Banner>, ServiceError> {
        let mut filter = Document::new();
        if let Some(page) = query.page {
            filter.insert("page", page.as_str());
        }
        if let Some(active) = query.active {
            filter.insert("isActive", active);
        }
        Ok(self.banner_repo.list(filter, Some(doc! { "order": 1 })).await?)
    }

    #[instrument(skip(self))]
    async fn get_banner(&self, id: &str) -> Result<Banner, ServiceError> {
        Ok(self.banner_repo.get(Self::key(id)?).await?)
    }

    #[instrument(skip(self, request), fields(title = %request.title))]
    async fn create_banner(&self, request: CreateBannerRequest) -> Result<Banner, ServiceError> {
        request.validate()?;
        info!("Creating banner");

        let images = request.images.unwrap_or_default();
        let image = request
            .image
            .filter(|i| !i.trim().is_empty())
            .or_else(|| images.first().cloned())
            .unwrap_or_default();
        let images = if images.is_empty() { vec![image.clone()] } else { images };

        let order = self.banner_repo.next_value("order").await?;
        let now = date::now();
        let banner = Banner {
            id: None,
            title: request.title,
            subtitle: request.subtitle.unwrap_or_default(),
            image,
            images,
            link: request.link,
            button_text: request.button_text.unwrap_or_else(|| DEFAULT_BUTTON_TEXT.to_string()),
            is_active: request.is_active.unwrap_or(true),
            order,
            page: request.page.unwrap_or_default(),
            created_at: Some(now),
            updated_at: Some(now),
        };

        let res = self.banner_repo.create(&banner).await;
        match &res {
            Ok(_) => info!(order, "Banner created"),
            Err(e) => error!("Failed to create banner: {e}"),
        }
        Ok(res?)
    }

    #[instrument(skip(self, request))]
    async fn update_banner(&self, id: &str, request: UpdateBannerRequest) -> Result<Banner, ServiceError> {
        request.validate()?;
        let filter = Self::key(id)?;
        let set = set_document(&request)?;
        Ok(self.banner_repo.update(filter, set).await?)
    }

    #[instrument(skip(self))]
    async fn delete_banner(&self, id: &str) -> Result<(), ServiceError> {
        Ok(self.banner_repo.delete(Self::key(id)?).await?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::banner::BannerPage;
    use crate::repository::memory_store::InMemoryDocumentStore;
    use serde_json::json;

    fn service() -> BannerServiceImpl {
        BannerServiceImpl::new(Arc::new(InMemoryDocumentStore::new()))
    }

    fn create_request(value: serde_json::Value) -> CreateBannerRequest {
        serde_json::from_value(value).unwrap()
    }

    #[tokio::test]
    async fn test_create_fills_defaults() {
        let banner = service()
            .create_banner(create_request(json!({ "title": "Monsoon", "images": ["/a.jpg", "/b.jpg"] })))
            .await
            .unwrap();
        assert!(banner.id.is_some());
        assert_eq!(banner.subtitle, "");
        assert_eq!(banner.image, "/a.jpg");
        assert_eq!(banner.button_text, "Learn More");
        assert!(banner.is_active);
        assert_eq!(banner.page, BannerPage::Home);
        assert_eq!(banner.created_at, banner.updated_at);
    }

    #[tokio::test]
    async fn test_single_image_fills_images() {
        let banner = service()
            .create_banner(create_request(json!({ "title": "Lobby", "image": "/lobby.jpg", "page": "about" })))
            .await
            .unwrap();
        assert_eq!(banner.images, vec!["/lobby.jpg".to_string()]);
        assert_eq!(banner.page, BannerPage::About);
    }

    #[tokio::test]
    async fn test_orders_are_sequential() {
        let service = service();
        for expected in 1..=3 {
            let banner = service
                .create_banner(create_request(json!({ "title": "B", "image": "/b.jpg" })))
                .await
                .unwrap();
            assert_eq!(banner.order, expected);
        }
    }

    #[tokio::test]
    async fn test_order_is_not_reused_after_delete() {
        let service = service();
        for _ in 0..2 {
            service.create_banner(create_request(json!({ "title": "B", "image": "/b.jpg" }))).await.unwrap();
        }
        let last = service.create_banner(create_request(json!({ "title": "B", "image": "/b.jpg" }))).await.unwrap();
        assert_eq!(last.order, 3);
        service.delete_banner(&last.id.unwrap().to_hex()).await.unwrap();

        let next = service.create_banner(create_request(json!({ "title": "C", "image": "/c.jpg" }))).await.unwrap();
        assert_eq!(next.order, 4);
    }

    #[tokio::test]
    async fn test_list_filters_by_page() {
        let service = service();
        service.create_banner(create_request(json!({ "title": "Home", "image": "/h.jpg" }))).await.unwrap();
        service
            .create_banner(create_request(json!({ "title": "Rooms", "image": "/r.jpg", "page": "rooms" })))
            .await
            .unwrap();
        let query = BannerListQuery { page: Some(BannerPage::Rooms), active: None };
        let banners = service.list_banners(query).await.unwrap();
        assert_eq!(banners.len(), 1);
        assert_eq!(banners[0].title, "Rooms");
    }

    #[tokio::test]
    async fn test_unparseable_id_is_not_found() {
        assert!(matches!(service().get_banner("nope").await, Err(ServiceError::NotFound(_))));
    }
}
