use axum::{middleware, routing::{get, post, put}, Router};
use std::sync::Arc;

use crate::handler::testimonial_handler::{
    create_testimonial_handler, delete_testimonial_handler, get_testimonial_handler, list_testimonials_handler,
    update_testimonial_handler,
};
use crate::middlewares::admin_middleware::{admin_auth, AdminAuthState};
use crate::service::testimonial_service::TestimonialServiceImpl;

pub fn testimonial_router(service: Arc<TestimonialServiceImpl>, admin_auth_state: Arc<AdminAuthState>) -> Router {
    let public = Router::new()
        .route("/api/testimonials", get(list_testimonials_handler))
        .route("/api/testimonials/{id}", get(get_testimonial_handler));

    let admin = Router::new()
        .route("/api/testimonials", post(create_testimonial_handler))
        .route("/api/testimonials/{id}", put(update_testimonial_handler).delete(delete_testimonial_handler))
        .route_layer(middleware::from_fn_with_state(admin_auth_state, admin_auth));

    public.merge(admin).with_state(service)
}
