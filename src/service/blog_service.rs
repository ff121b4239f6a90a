use std::sync::Arc;

use async_trait::async_trait;
use bson::{doc, Document};
use serde_json::Value;
use tracing::{info, instrument};
use validator::Validate;

use crate::dto::blog_dto::{BlogListQuery, CreateBlogPostRequest, UpdateBlogPostRequest};
use crate::dto::sanitize::sanitize_sections;
use crate::dto::set_document;
use crate::model::blog_post::BlogPost;
use crate::repository::crud_repo::CrudRepository;
use crate::repository::document_store::DocumentStore;
use crate::util::date;
use crate::util::error::ServiceError;
use crate::util::identifier::object_id_filter;

pub const BLOG_POSTS_COLLECTION: &str = "blog_posts";
const DEFAULT_IMAGE: &str = "/hero.jpg";
const DEFAULT_READ_TIME: &str = "5 min read";

#[async_trait]
pub trait BlogService: Send + Sync {
    async fn list_posts(&self, query: BlogListQuery) -> Result<Vec<BlogPost>, ServiceError>;
    async fn get_post(&self, id: &str) -> Result<BlogPost, ServiceError>;
    async fn create_post(&self, request: CreateBlogPostRequest) -> Result<BlogPost, ServiceError>;
    async fn update_post(&self, id: &str, request: UpdateBlogPostRequest) -> Result<BlogPost, ServiceError>;
    async fn delete_post(&self, id: &str) -> Result<(), ServiceError>;
}

pub struct BlogServiceImpl {
    pub post_repo: CrudRepository<BlogPost>,
}

impl BlogServiceImpl {
    pub fn new(store: Arc<dyn DocumentStore>) -> Self {
        BlogServiceImpl { post_repo: CrudRepository::new(store, BLOG_POSTS_COLLECTION, "Blog post") }
    }

    fn key(id: &str) -> Result<Document, ServiceError> {
        object_id_filter(id).ok_or_else(|| ServiceError::NotFound("Blog post not found".to_string()))
    }
}

#[async_trait]
impl BlogService for BlogServiceImpl {
    #[instrument(skip(self))]
    async fn list_posts(&self, query: BlogListQuery) -> Result<Vec<BlogPost>, ServiceError> {
        let filter = match query.status {
            Some(status) => doc! { "status": status.as_str() },
            None => Document::new(),
        };
        Ok(self.post_repo.list(filter, Some(doc! { "createdAt": -1 })).await?)
    }

    async fn get_post(&self, id: &str) -> Result<BlogPost, ServiceError> {
        Ok(self.post_repo.get(Self::key(id)?).await?)
    }

    #[instrument(skip(self, request), fields(title = %request.title))]
    async fn create_post(&self, request: CreateBlogPostRequest) -> Result<BlogPost, ServiceError> {
        request.validate()?;

        let now = date::now();
        let post = BlogPost {
            id: None,
            title: request.title,
            excerpt: request.excerpt.unwrap_or_default(),
            author: request.author,
            date: request.date.filter(|d| !d.trim().is_empty()).unwrap_or_else(date::today_long_form),
            category: request.category,
            image: request.image.unwrap_or_else(|| DEFAULT_IMAGE.to_string()),
            read_time: request.read_time.unwrap_or_else(|| DEFAULT_READ_TIME.to_string()),
            status: request.status.unwrap_or_default(),
            sections: sanitize_sections(request.sections.as_ref().unwrap_or(&Value::Null)),
            created_at: Some(now),
            updated_at: Some(now),
        };

        let created = self.post_repo.create(&post).await?;
        info!(sections = created.sections.len(), "Blog post created");
        Ok(created)
    }

    #[instrument(skip(self, request))]
    async fn update_post(&self, id: &str, request: UpdateBlogPostRequest) -> Result<BlogPost, ServiceError> {
        request.validate()?;
        let filter = Self::key(id)?;
        let mut set = set_document(&request)?;
        if let Some(sections) = &request.sections {
            let sections = bson::to_bson(&sanitize_sections(sections))
                .map_err(|e| ServiceError::InternalError(format!("Failed to serialize sections: {}", e)))?;
            set.insert("sections", sections);
        }
        Ok(self.post_repo.update(filter, set).await?)
    }

    #[instrument(skip(self))]
    async fn delete_post(&self, id: &str) -> Result<(), ServiceError> {
        Ok(self.post_repo.delete(Self::key(id)?).await?)
    }
}
