use std::sync::Arc;

use async_trait::async_trait;
use bson::{doc, Document};
use tracing::{info, instrument};
use validator::Validate;

use crate::dto::set_document;
use crate::dto::testimonial_dto::{ActiveListQuery, CreateTestimonialRequest, UpdateTestimonialRequest};
use crate::model::testimonial::Testimonial;
use crate::repository::crud_repo::CrudRepository;
use crate::repository::document_store::DocumentStore;
use crate::util::date;
use crate::util::error::ServiceError;
use crate::util::identifier::object_id_filter;

pub const TESTIMONIALS_COLLECTION: &str = "testimonials";
const DEFAULT_RATING: i32 = 5;

#[async_trait]
pub trait TestimonialService: Send + Sync {
    async fn list_testimonials(&self, query: ActiveListQuery) -> Result<Vec<Testimonial>, ServiceError>;
    async fn get_testimonial(&self, id: &str) -> Result<Testimonial, ServiceError>;
    async fn create_testimonial(&self, request: CreateTestimonialRequest) -> Result<Testimonial, ServiceError>;
    async fn update_testimonial(&self, id: &str, request: UpdateTestimonialRequest) -> Result<(), ServiceError>;
    async fn delete_testimonial(&self, id: &str) -> Result<(), ServiceError>;
}

pub struct TestimonialServiceImpl {
    pub testimonial_repo: CrudRepository<Testimonial>,
}

impl TestimonialServiceImpl {
    pub fn new(store: Arc<dyn DocumentStore>) -> Self {
        TestimonialServiceImpl { testimonial_repo: CrudRepository::new(store, TESTIMONIALS_COLLECTION, "Testimonial") }
    }

    /// Malformed ids are rejected outright rather than treated as a miss.
    fn key(id: &str) -> Result<Document, ServiceError> {
        object_id_filter(id).ok_or_else(|| ServiceError::InvalidInput("Invalid testimonial id".to_string()))
    }
}

#[async_trait]
impl TestimonialService for TestimonialServiceImpl {
    async fn list_testimonials(&self, query: ActiveListQuery) -> Result<Vec<Testimonial>, ServiceError> {
        let filter = match query.active {
            Some(active) => doc! { "isActive": active },
            None => Document::new(),
        };
        Ok(self.testimonial_repo.list(filter, Some(doc! { "order": 1 })).await?)
    }

    #[instrument(skip(self))]
    async fn get_testimonial(&self, id: &str) -> Result<Testimonial, ServiceError> {
        Ok(self.testimonial_repo.get(Self::key(id)?).await?)
    }

    #[instrument(skip(self, request), fields(name = %request.name))]
    async fn create_testimonial(&self, request: CreateTestimonialRequest) -> Result<Testimonial, ServiceError> {
        request.validate()?;

        let order = self.testimonial_repo.next_value("order").await?;
        let now = date::now();
        let testimonial = Testimonial {
            id: None,
            name: request.name,
            role: request.role.unwrap_or_default(),
            quote: request.quote,
            rating: request.rating.unwrap_or(DEFAULT_RATING),
            image: request.image,
            is_active: request.is_active.unwrap_or(true),
            order,
            created_at: Some(now),
            updated_at: Some(now),
        };

        let created = self.testimonial_repo.create(&testimonial).await?;
        info!(order, "Testimonial created");
        Ok(created)
    }

    #[instrument(skip(self, request))]
    async fn update_testimonial(&self, id: &str, request: UpdateTestimonialRequest) -> Result<(), ServiceError> {
        request.validate()?;
        let filter = Self::key(id)?;
        self.testimonial_repo.update(filter, set_document(&request)?).await?;
        Ok(())
    }

    #[instrument(skip(self))]
    async fn delete_testimonial(&self, id: &str) -> Result<(), ServiceError> {
        Ok(self.testimonial_repo.delete(Self::key(id)?).await?)
    }
}
