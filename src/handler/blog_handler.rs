use std::sync::Arc;

use axum::extract::{Path, State};
use axum::{http::StatusCode, response::IntoResponse, Json};

use crate::dto::blog_dto::{BlogListQuery, CreateBlogPostRequest, UpdateBlogPostRequest};
use crate::dto::MessageResponse;
use crate::service::blog_service::{BlogService, BlogServiceImpl};
use crate::util::error::HandlerError;
use crate::util::extract::{ApiJson, ApiQuery};
use crate::util::json::{to_api_list, to_api_value};

pub async fn list_posts_handler(
    State(service): State<Arc<BlogServiceImpl>>,
    ApiQuery(query): ApiQuery<BlogListQuery>,
) -> Result<impl IntoResponse, HandlerError> {
    let posts = service.list_posts(query).await?;
    Ok(Json(to_api_list(&posts)?))
}

pub async fn get_post_handler(
    State(service): State<Arc<BlogServiceImpl>>,
    Path(id): Path<String>,
) -> Result<impl IntoResponse, HandlerError> {
    let post = service.get_post(&id).await?;
    Ok(Json(to_api_value(&post)?))
}

pub async fn create_post_handler(
    State(service): State<Arc<BlogServiceImpl>>,
    ApiJson(payload): ApiJson<CreateBlogPostRequest>,
) -> Result<impl IntoResponse, HandlerError> {
    let post = service.create_post(payload).await?;
    Ok((StatusCode::CREATED, Json(to_api_value(&post)?)))
}

pub async fn update_post_handler(
    State(service): State<Arc<BlogServiceImpl>>,
    Path(id): Path<String>,
    ApiJson(payload): ApiJson<UpdateBlogPostRequest>,
) -> Result<impl IntoResponse, HandlerError> {
    let post = service.update_post(&id, payload).await?;
    Ok(Json(to_api_value(&post)?))
}

pub async fn delete_post_handler(
    State(service): State<Arc<BlogServiceImpl>>,
    Path(id): Path<String>,
) -> Result<impl IntoResponse, HandlerError> {
    service.delete_post(&id).await?;
    Ok(Json(MessageResponse::ok("Blog post deleted successfully")))
}
