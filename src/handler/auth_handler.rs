use std::sync::Arc;

use axum::extract::State;
use axum::http::{header::AUTHORIZATION, HeaderMap};
use axum::{response::IntoResponse, Extension, Json};
use validator::Validate;

use crate::dto::auth_dto::{LoginRequest, RefreshTokenRequest};
use crate::service::auth_service::{AuthService, AuthServiceImpl};
use crate::util::error::HandlerError;
use crate::util::extract::ApiJson;
use crate::util::jwt::Claims;

// Handler: Admin Login
pub async fn login_handler(
    State(service): State<Arc<AuthServiceImpl>>,
    ApiJson(payload): ApiJson<LoginRequest>,
) -> Result<impl IntoResponse, HandlerError> {
    payload
        .validate()
        .map_err(|_| HandlerError::bad_request("Email and password are required"))?;
    let response = service.login(payload.email, payload.password).await?;
    Ok(Json(response))
}

// Handler: Refresh Token
pub async fn refresh_token_handler(
    State(service): State<Arc<AuthServiceImpl>>,
    ApiJson(payload): ApiJson<RefreshTokenRequest>,
) -> Result<impl IntoResponse, HandlerError> {
    payload
        .validate()
        .map_err(|_| HandlerError::bad_request("Refresh token is required"))?;
    let tokens = service.refresh(payload.refresh_token).await?;
    Ok(Json(tokens))
}

// Handler: Logout (admin only); claims are attached by the admin gate
pub async fn logout_handler(
    State(service): State<Arc<AuthServiceImpl>>,
    Extension(claims): Extension<Claims>,
) -> impl IntoResponse {
    Json(service.logout(&claims).await)
}

// Handler: Session check, never fails
pub async fn session_handler(
    State(service): State<Arc<AuthServiceImpl>>,
    headers: HeaderMap,
) -> impl IntoResponse {
    let auth_header = headers.get(AUTHORIZATION).and_then(|v| v.to_str().ok());
    Json(service.session(auth_header).await)
}
