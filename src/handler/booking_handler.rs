use std::sync::Arc;

use axum::extract::{Path, State};
use axum::{http::StatusCode, response::IntoResponse, Json};

use crate::dto::booking_dto::{
    BookingListQuery, CreateBookingRequest, CreateRestaurantBookingRequest, UpdateBookingRequest,
    UpdateRestaurantBookingRequest,
};
use crate::dto::MessageResponse;
use crate::service::booking_service::{BookingService, BookingServiceImpl};
use crate::util::error::HandlerError;
use crate::util::extract::{ApiJson, ApiQuery};
use crate::util::json::{to_api_list, to_api_value};

// Room bookings

pub async fn list_bookings_handler(
    State(service): State<Arc<BookingServiceImpl>>,
    ApiQuery(query): ApiQuery<BookingListQuery>,
) -> Result<impl IntoResponse, HandlerError> {
    let bookings = service.list_bookings(query).await?;
    Ok(Json(to_api_list(&bookings)?))
}

pub async fn get_booking_handler(
    State(service): State<Arc<BookingServiceImpl>>,
    Path(id): Path<String>,
) -> Result<impl IntoResponse, HandlerError> {
    let booking = service.get_booking(&id).await?;
    Ok(Json(to_api_value(&booking)?))
}

// Public: guests submit bookings from the site
pub async fn create_booking_handler(
    State(service): State<Arc<BookingServiceImpl>>,
    ApiJson(payload): ApiJson<CreateBookingRequest>,
) -> Result<impl IntoResponse, HandlerError> {
    let booking = service.create_booking(payload).await?;
    Ok((StatusCode::CREATED, Json(to_api_value(&booking)?)))
}

pub async fn update_booking_handler(
    State(service): State<Arc<BookingServiceImpl>>,
    Path(id): Path<String>,
    ApiJson(payload): ApiJson<UpdateBookingRequest>,
) -> Result<impl IntoResponse, HandlerError> {
    let booking = service.update_booking(&id, payload).await?;
    Ok(Json(to_api_value(&booking)?))
}

pub async fn delete_booking_handler(
    State(service): State<Arc<BookingServiceImpl>>,
    Path(id): Path<String>,
) -> Result<impl IntoResponse, HandlerError> {
    service.delete_booking(&id).await?;
    Ok(Json(MessageResponse::ok("Booking deleted successfully")))
}

// Restaurant bookings

pub async fn list_restaurant_bookings_handler(
    State(service): State<Arc<BookingServiceImpl>>,
    ApiQuery(query): ApiQuery<BookingListQuery>,
) -> Result<impl IntoResponse, HandlerError> {
    let bookings = service.list_restaurant_bookings(query).await?;
    Ok(Json(to_api_list(&bookings)?))
}

pub async fn get_restaurant_booking_handler(
    State(service): State<Arc<BookingServiceImpl>>,
    Path(id): Path<String>,
) -> Result<impl IntoResponse, HandlerError> {
    let booking = service.get_restaurant_booking(&id).await?;
    Ok(Json(to_api_value(&booking)?))
}

pub async fn create_restaurant_booking_handler(
    State(service): State<Arc<BookingServiceImpl>>,
    ApiJson(payload): ApiJson<CreateRestaurantBookingRequest>,
) -> Result<impl IntoResponse, HandlerError> {
    let booking = service.create_restaurant_booking(payload).await?;
    Ok((StatusCode::CREATED, Json(to_api_value(&booking)?)))
}

pub async fn update_restaurant_booking_handler(
    State(service): State<Arc<BookingServiceImpl>>,
    Path(id): Path<String>,
    ApiJson(payload): ApiJson<UpdateRestaurantBookingRequest>,
) -> Result<impl IntoResponse, HandlerError> {
    service.update_restaurant_booking(&id, payload).await?;
    Ok(Json(MessageResponse::ok("Restaurant booking updated successfully")))
}

pub async fn delete_restaurant_booking_handler(
    State(service): State<Arc<BookingServiceImpl>>,
    Path(id): Path<String>,
) -> Result<impl IntoResponse, HandlerError> {
    service.delete_restaurant_booking(&id).await?;
    Ok(Json(MessageResponse::ok("Restaurant booking deleted successfully")))
}
