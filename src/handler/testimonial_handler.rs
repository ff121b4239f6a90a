use std::sync::Arc;

use axum::extract::{Path, State};
use axum::{http::StatusCode, response::IntoResponse, Json};

use crate::dto::testimonial_dto::{ActiveListQuery, CreateTestimonialRequest, UpdateTestimonialRequest};
use crate::dto::MessageResponse;
use crate::service::testimonial_service::{TestimonialService, TestimonialServiceImpl};
use crate::util::error::HandlerError;
use crate::util::extract::{ApiJson, ApiQuery};
use crate::util::json::{to_api_list, to_api_value};

pub async fn list_testimonials_handler(
    State(service): State<Arc<TestimonialServiceImpl>>,
    ApiQuery(query): ApiQuery<ActiveListQuery>,
) -> Result<impl IntoResponse, HandlerError> {
    let testimonials = service.list_testimonials(query).await?;
    Ok(Json(to_api_list(&testimonials)?))
}

pub async fn get_testimonial_handler(
    State(service): State<Arc<TestimonialServiceImpl>>,
    Path(id): Path<String>,
) -> Result<impl IntoResponse, HandlerError> {
    let testimonial = service.get_testimonial(&id).await?;
    Ok(Json(to_api_value(&testimonial)?))
}

pub async fn create_testimonial_handler(
    State(service): State<Arc<TestimonialServiceImpl>>,
    ApiJson(payload): ApiJson<CreateTestimonialRequest>,
) -> Result<impl IntoResponse, HandlerError> {
    let testimonial = service.create_testimonial(payload).await?;
    Ok((StatusCode::CREATED, Json(to_api_value(&testimonial)?)))
}

// Acknowledges only; the admin list is refetched after edits
pub async fn update_testimonial_handler(
    State(service): State<Arc<TestimonialServiceImpl>>,
    Path(id): Path<String>,
    ApiJson(payload): ApiJson<UpdateTestimonialRequest>,
) -> Result<impl IntoResponse, HandlerError> {
    service.update_testimonial(&id, payload).await?;
    Ok(Json(MessageResponse::ok("Testimonial updated successfully")))
}

pub async fn delete_testimonial_handler(
    State(service): State<Arc<TestimonialServiceImpl>>,
    Path(id): Path<String>,
) -> Result<impl IntoResponse, HandlerError> {
    service.delete_testimonial(&id).await?;
    Ok(Json(MessageResponse::ok("Testimonial deleted successfully")))
}
