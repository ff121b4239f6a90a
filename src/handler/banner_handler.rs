use std::sync::Arc;

use axum::extract::{Path, State};
use axum::{http::StatusCode, response::IntoResponse, Json};

use crate::dto::banner_dto::{BannerListQuery, CreateBannerRequest, UpdateBannerRequest};
use crate::dto::MessageResponse;
use crate::service::banner_service::{BannerService, BannerServiceImpl};
use crate::util::error::HandlerError;
use crate::util::extract::{ApiJson, ApiQuery};
use crate::util::json::{to_api_list, to_api_value};

// Handler: List Banners (public)
pub async fn list_banners_handler(
    State(service): State<Arc<BannerServiceImpl>>,
    ApiQuery(query): ApiQuery<BannerListQuery>,
) -> Result<impl IntoResponse, HandlerError> {
    let banners = service.list_banners(query).await?;
    Ok(Json(to_api_list(&banners)?))
}

// Handler: Get Banner (public)
pub async fn get_banner_handler(
    State(service): State<Arc<BannerServiceImpl>>,
    Path(id): Path<String>,
) -> Result<impl IntoResponse, HandlerError> {
    let banner = service.get_banner(&id).await?;
    Ok(Json(to_api_value(&banner)?))
}

// Handler: Create Banner (admin only)
pub async fn create_banner_handler(
    State(service): State<Arc<BannerServiceImpl>>,
    ApiJson(payload): ApiJson<CreateBannerRequest>,
) -> Result<impl IntoResponse, HandlerError> {
    let banner = service.create_banner(payload).await?;
    Ok((StatusCode::CREATED, Json(to_api_value(&banner)?)))
}

// Handler: Update Banner (admin only)
pub async fn update_banner_handler(
    State(service): State<Arc<BannerServiceImpl>>,
    Path(id): Path<String>,
    ApiJson(payload): ApiJson<UpdateBannerRequest>,
) -> Result<impl IntoResponse, HandlerError> {
    let banner = service.update_banner(&id, payload).await?;
    Ok(Json(to_api_value(&banner)?))
}

// Handler: Delete Banner (admin only)
pub async fn delete_banner_handler(
    State(service): State<Arc<BannerServiceImpl>>,
    Path(id): Path<String>,
) -> Result<impl IntoResponse, HandlerError> {
    service.delete_banner(&id).await?;
    Ok(Json(MessageResponse::ok("Banner deleted successfully")))
}
