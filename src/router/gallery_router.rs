use axum::{middleware, routing::{get, post, put}, Router};
use std::sync::Arc;

use crate::handler::gallery_handler::{
    create_gallery_image_handler, delete_gallery_image_handler, get_gallery_image_handler, list_gallery_handler,
    update_gallery_image_handler,
};
use crate::middlewares::admin_middleware::{admin_auth, AdminAuthState};
use crate::service::gallery_service::GalleryServiceImpl;

pub fn gallery_router(service: Arc<GalleryServiceImpl>, admin_auth_state: Arc<AdminAuthState>) -> Router {
    let public = Router::new()
        .route("/api/banquet-gallery", get(list_gallery_handler))
        .route("/api/banquet-gallery/{id}", get(get_gallery_image_handler));

    let admin = Router::new()
        .route("/api/banquet-gallery", post(create_gallery_image_handler))
        .route(
            "/api/banquet-gallery/{id}",
            put(update_gallery_image_handler).delete(delete_gallery_image_handler),
        )
        .route_layer(middleware::from_fn_with_state(admin_auth_state, admin_auth));

    public.merge(admin).with_state(service)
}
