use axum::{middleware, routing::{get, post, put}, Router};
use std::sync::Arc;

use crate::handler::banner_handler::{
    create_banner_handler, delete_banner_handler, get_banner_handler, list_banners_handler, update_banner_handler,
};
use crate::middlewares::admin_middleware::{admin_auth, AdminAuthState};
use crate::service::banner_service::BannerServiceImpl;

pub fn banner_router(service: Arc<BannerServiceImpl>, admin_auth_state: Arc<AdminAuthState>) -> Router {
    let public = Router::new()
        .route("/api/banners", get(list_banners_handler))
        .route("/api/banners/{id}", get(get_banner_handler));

    let admin = Router::new()
        .route("/api/banners", post(create_banner_handler))
        .route("/api/banners/{id}", put(update_banner_handler).delete(delete_banner_handler))
        .route_layer(middleware::from_fn_with_state(admin_auth_state, admin_auth));

    public.merge(admin).with_state(service)
}
