use axum::{middleware, routing::{get, post, put}, Router};
use std::sync::Arc;

use crate::handler::blog_handler::{
    create_post_handler, delete_post_handler, get_post_handler, list_posts_handler, update_post_handler,
};
use crate::middlewares::admin_middleware::{admin_auth, AdminAuthState};
use crate::service::blog_service::BlogServiceImpl;

pub fn blog_router(service: Arc<BlogServiceImpl>, admin_auth_state: Arc<AdminAuthState>) -> Router {
    let public = Router::new()
        .route("/api/blog", get(list_posts_handler))
        .route("/api/blog/{id}", get(get_post_handler));

    let admin = Router::new()
        .route("/api/blog", post(create_post_handler))
        .route("/api/blog/{id}", put(update_post_handler).delete(delete_post_handler))
        .route_layer(middleware::from_fn_with_state(admin_auth_state, admin_auth));

    public.merge(admin).with_state(service)
}
