use std::sync::Arc;

use axum::extract::{Path, State};
use axum::{http::StatusCode, response::IntoResponse, Json};

use crate::dto::room_dto::{CreateRoomRequest, UpdateRoomRequest};
use crate::dto::MessageResponse;
use crate::service::room_service::{RoomService, RoomServiceImpl};
use crate::util::error::HandlerError;
use crate::util::extract::ApiJson;
use crate::util::json::{to_api_list, to_api_value};

pub async fn list_rooms_handler(State(service): State<Arc<RoomServiceImpl>>) -> Result<impl IntoResponse, HandlerError> {
    let rooms = service.list_rooms().await?;
    Ok(Json(to_api_list(&rooms)?))
}

/// `id` may be the room's app id or its store id.
pub async fn get_room_handler(
    State(service): State<Arc<RoomServiceImpl>>,
    Path(id): Path<String>,
) -> Result<impl IntoResponse, HandlerError> {
    let room = service.get_room(&id).await?;
    Ok(Json(to_api_value(&room)?))
}

pub async fn create_room_handler(
    State(service): State<Arc<RoomServiceImpl>>,
    ApiJson(payload): ApiJson<CreateRoomRequest>,
) -> Result<impl IntoResponse, HandlerError> {
    let room = service.create_room(payload).await?;
    Ok((StatusCode::CREATED, Json(to_api_value(&room)?)))
}

pub async fn update_room_handler(
    State(service): State<Arc<RoomServiceImpl>>,
    Path(id): Path<String>,
    ApiJson(payload): ApiJson<UpdateRoomRequest>,
) -> Result<impl IntoResponse, HandlerError> {
    let room = service.update_room(&id, payload).await?;
    Ok(Json(to_api_value(&room)?))
}

pub async fn delete_room_handler(
    State(service): State<Arc<RoomServiceImpl>>,
    Path(id): Path<String>,
) -> Result<impl IntoResponse, HandlerError> {
    service.delete_room(&id).await?;
    Ok(Json(MessageResponse::ok("Room deleted successfully")))
}
