use std::sync::Arc;

use axum::extract::{Path, State};
use axum::{http::StatusCode, response::IntoResponse, Json};

use crate::dto::gallery_dto::{CreateGalleryImageRequest, UpdateGalleryImageRequest};
use crate::dto::testimonial_dto::ActiveListQuery;
use crate::dto::MessageResponse;
use crate::service::gallery_service::{GalleryService, GalleryServiceImpl};
use crate::util::error::HandlerError;
use crate::util::extract::{ApiJson, ApiQuery};
use crate::util::json::{to_api_list, to_api_value};

pub async fn list_gallery_handler(
    State(service): State<Arc<GalleryServiceImpl>>,
    ApiQuery(query): ApiQuery<ActiveListQuery>,
) -> Result<impl IntoResponse, HandlerError> {
    let images = service.list_images(query).await?;
    Ok(Json(to_api_list(&images)?))
}

pub async fn get_gallery_image_handler(
    State(service): State<Arc<GalleryServiceImpl>>,
    Path(id): Path<String>,
) -> Result<impl IntoResponse, HandlerError> {
    let image = service.get_image(&id).await?;
    Ok(Json(to_api_value(&image)?))
}

pub async fn create_gallery_image_handler(
    State(service): State<Arc<GalleryServiceImpl>>,
    ApiJson(payload): ApiJson<CreateGalleryImageRequest>,
) -> Result<impl IntoResponse, HandlerError> {
    let image = service.create_image(payload).await?;
    Ok((StatusCode::CREATED, Json(to_api_value(&image)?)))
}

pub async fn update_gallery_image_handler(
    State(service): State<Arc<GalleryServiceImpl>>,
    Path(id): Path<String>,
    ApiJson(payload): ApiJson<UpdateGalleryImageRequest>,
) -> Result<impl IntoResponse, HandlerError> {
    service.update_image(&id, payload).await?;
    Ok(Json(MessageResponse::ok("Gallery image updated successfully")))
}

pub async fn delete_gallery_image_handler(
    State(service): State<Arc<GalleryServiceImpl>>,
    Path(id): Path<String>,
) -> Result<impl IntoResponse, HandlerError> {
    service.delete_image(&id).await?;
    Ok(Json(MessageResponse::ok("Gallery image deleted successfully")))
}
