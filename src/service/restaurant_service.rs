use std::sync::Arc;

use async_trait::async_trait;
use bson::{doc, Document};
use serde_json::Value;
use tracing::{info, instrument, warn};
use validator::Validate;

use crate::dto::restaurant_dto::{CreateRestaurantRequest, UpdateRestaurantRequest};
use crate::dto::sanitize::sanitize_menu;
use crate::dto::set_document;
use crate::model::restaurant::Restaurant;
use crate::repository::crud_repo::CrudRepository;
use crate::repository::document_store::DocumentStore;
use crate::util::date;
use crate::util::error::ServiceError;
use crate::util::identifier::{slugify, store_id_filter, RestaurantKey};

pub const RESTAURANTS_COLLECTION: &str = "restaurants";

#[async_trait]
pub trait RestaurantService: Send + Sync {
    async fn list_restaurants(&self) -> Result<Vec<Restaurant>, ServiceError>;
    async fn get_restaurant(&self, key: &str) -> Result<Restaurant, ServiceError>;
    async fn create_restaurant(&self, request: CreateRestaurantRequest) -> Result<Restaurant, ServiceError>;
    async fn update_restaurant(&self, key: &str, request: UpdateRestaurantRequest) -> Result<Restaurant, ServiceError>;
    async fn delete_restaurant(&self, key: &str) -> Result<(), ServiceError>;
}

pub struct RestaurantServiceImpl {
    pub restaurant_repo: CrudRepository<Restaurant>,
}

impl RestaurantServiceImpl {
    pub fn new(store: Arc<dyn DocumentStore>) -> Self {
        RestaurantServiceImpl { restaurant_repo: CrudRepository::new(store, RESTAURANTS_COLLECTION, "Restaurant") }
    }

    /// All-digit keys address the numeric `id` (falling back to the store
    /// id); anything else is a slug.
    async fn resolve(&self, key: &str) -> Result<Restaurant, ServiceError> {
        let found = match RestaurantKey::classify(key) {
            RestaurantKey::Numeric(number) => {
                let by_number = match number {
                    Some(n) => self.restaurant_repo.find_one(doc! { "id": n }).await?,
                    None => None,
                };
                match by_number {
                    Some(restaurant) => Some(restaurant),
                    None => self.restaurant_repo.find_one(store_id_filter(key)).await?,
                }
            }
            RestaurantKey::Slug(slug) => self.restaurant_repo.find_one(doc! { "slug": slug }).await?,
        };
        found.ok_or_else(|| {
            warn!("No restaurant matched '{}'", key);
            ServiceError::NotFound("Restaurant not found".to_string())
        })
    }

    fn store_key(restaurant: &Restaurant) -> Result<Document, ServiceError> {
        restaurant
            .store_id
            .clone()
            .map(|id| doc! { "_id": id })
            .ok_or_else(|| ServiceError::InternalError("Stored restaurant has no _id".to_string()))
    }

    async fn ensure_slug_free(&self, slug: &str, owner: Option<&Document>) -> Result<(), ServiceError> {
        let Some(existing) = self.restaurant_repo.find_one(doc! { "slug": slug }).await? else {
            return Ok(());
        };
        let same_owner = owner.is_some_and(|key| existing.store_id.as_ref() == key.get("_id"));
        if same_owner {
            return Ok(());
        }
        Err(ServiceError::Conflict(format!("Restaurant slug '{}' is already in use", slug)))
    }
}

#[async_trait]
impl RestaurantService for RestaurantServiceImpl {
    async fn list_restaurants(&self) -> Result<Vec<Restaurant>, ServiceError> {
        Ok(self.restaurant_repo.list(Document::new(), None).await?)
    }

    #[instrument(skip(self))]
    async fn get_restaurant(&self, key: &str) -> Result<Restaurant, ServiceError> {
        self.resolve(key).await
    }

    #[instrument(skip(self, request), fields(name = %request.name))]
    async fn create_restaurant(&self, request: CreateRestaurantRequest) -> Result<Restaurant, ServiceError> {
        request.validate()?;

        let slug = slugify(request.slug.as_deref().unwrap_or(&request.name));
        if slug.is_empty() {
            return Err(ServiceError::InvalidInput("Restaurant name must contain letters or digits".to_string()));
        }
        self.ensure_slug_free(&slug, None).await?;

        let id = self.restaurant_repo.next_value("id").await?;
        let now = date::now();
        let restaurant = Restaurant {
            store_id: None,
            id,
            name: request.name,
            slug,
            cuisine: request.cuisine,
            description: request.description,
            timings: request.timings,
            image: request.image,
            menu: sanitize_menu(request.menu.as_ref().unwrap_or(&Value::Null)),
            highlights: request.highlights.unwrap_or_default(),
            gallery: request.gallery,
            created_at: Some(now),
            updated_at: Some(now),
        };

        let created = self.restaurant_repo.create(&restaurant).await?;
        info!(id, slug = %created.slug, "Restaurant created");
        Ok(created)
    }

    #[instrument(skip(self, request))]
    async fn update_restaurant(&self, key: &str, request: UpdateRestaurantRequest) -> Result<Restaurant, ServiceError> {
        request.validate()?;
        let restaurant = self.resolve(key).await?;
        let filter = Self::store_key(&restaurant)?;

        let mut set = set_document(&request)?;
        if let Some(slug) = &request.slug {
            let slug = slugify(slug);
            self.ensure_slug_free(&slug, Some(&filter)).await?;
            set.insert("slug", slug);
        }
        if let Some(menu) = &request.menu {
            let menu = bson::to_bson(&sanitize_menu(menu))
                .map_err(|e| ServiceError::InternalError(format!("Failed to serialize menu: {}", e)))?;
            set.insert("menu", menu);
        }

        Ok(self.restaurant_repo.update(filter, set).await?)
    }

    #[instrument(skip(self))]
    async fn delete_restaurant(&self, key: &str) -> Result<(), ServiceError> {
        let restaurant = self.resolve(key).await?;
        Ok(self.restaurant_repo.delete(Self::store_key(&restaurant)?).await?)
    }
}
