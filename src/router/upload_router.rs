use axum::{extract::DefaultBodyLimit, middleware, routing::post, Router};
use std::sync::Arc;

use crate::handler::upload_handler::upload_image_handler;
use crate::middlewares::admin_middleware::{admin_auth, AdminAuthState};
use crate::service::upload_service::UploadServiceImpl;

/// Multipart overhead allowance on top of the service's own size check, so
/// oversized files reach the service and get its error message.
const BODY_LIMIT_HEADROOM: usize = 16 * 1024 * 1024;

pub fn upload_router(service: Arc<UploadServiceImpl>, admin_auth_state: Arc<AdminAuthState>) -> Router {
    let body_limit = service.max_bytes + BODY_LIMIT_HEADROOM;
    Router::new()
        .route("/api/upload", post(upload_image_handler))
        .layer(DefaultBodyLimit::max(body_limit))
        .route_layer(middleware::from_fn_with_state(admin_auth_state, admin_auth))
        .with_state(service)
}
