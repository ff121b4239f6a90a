use std::sync::Arc;

use axum::extract::{Path, State};
use axum::{http::StatusCode, response::IntoResponse, Json};

use crate::dto::restaurant_dto::{CreateRestaurantRequest, UpdateRestaurantRequest};
use crate::dto::MessageResponse;
use crate::service::restaurant_service::{RestaurantService, RestaurantServiceImpl};
use crate::util::error::HandlerError;
use crate::util::extract::ApiJson;
use crate::util::json::{to_api_list, to_api_value};

pub async fn list_restaurants_handler(
    State(service): State<Arc<RestaurantServiceImpl>>,
) -> Result<impl IntoResponse, HandlerError> {
    let restaurants = service.list_restaurants().await?;
    Ok(Json(to_api_list(&restaurants)?))
}

/// `key` is either the numeric restaurant id or its slug.
pub async fn get_restaurant_handler(
    State(service): State<Arc<RestaurantServiceImpl>>,
    Path(key): Path<String>,
) -> Result<impl IntoResponse, HandlerError> {
    let restaurant = service.get_restaurant(&key).await?;
    Ok(Json(to_api_value(&restaurant)?))
}

pub async fn create_restaurant_handler(
    State(service): State<Arc<RestaurantServiceImpl>>,
    ApiJson(payload): ApiJson<CreateRestaurantRequest>,
) -> Result<impl IntoResponse, HandlerError> {
    let restaurant = service.create_restaurant(payload).await?;
    Ok((StatusCode::CREATED, Json(to_api_value(&restaurant)?)))
}

pub async fn update_restaurant_handler(
    State(service): State<Arc<RestaurantServiceImpl>>,
    Path(key): Path<String>,
    ApiJson(payload): ApiJson<UpdateRestaurantRequest>,
) -> Result<impl IntoResponse, HandlerError> {
    let restaurant = service.update_restaurant(&key, payload).await?;
    Ok(Json(to_api_value(&restaurant)?))
}

pub async fn delete_restaurant_handler(
    State(service): State<Arc<RestaurantServiceImpl>>,
    Path(key): Path<String>,
) -> Result<impl IntoResponse, HandlerError> {
    service.delete_restaurant(&key).await?;
    Ok(Json(MessageResponse::ok("Restaurant deleted successfully")))
}
