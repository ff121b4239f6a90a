use axum::{middleware, routing::{get, post, put}, Router};
use std::sync::Arc;

use crate::handler::restaurant_handler::{
    create_restaurant_handler, delete_restaurant_handler, get_restaurant_handler, list_restaurants_handler,
    update_restaurant_handler,
};
use crate::middlewares::admin_middleware::{admin_auth, AdminAuthState};
use crate::service::restaurant_service::RestaurantServiceImpl;

pub fn restaurant_router(service: Arc<RestaurantServiceImpl>, admin_auth_state: Arc<AdminAuthState>) -> Router {
    let public = Router::new()
        .route("/api/restaurants", get(list_restaurants_handler))
        .route("/api/restaurants/{key}", get(get_restaurant_handler));

    let admin = Router::new()
        .route("/api/restaurants", post(create_restaurant_handler))
        .route("/api/restaurants/{key}", put(update_restaurant_handler).delete(delete_restaurant_handler))
        .route_layer(middleware::from_fn_with_state(admin_auth_state, admin_auth));

    public.merge(admin).with_state(service)
}
