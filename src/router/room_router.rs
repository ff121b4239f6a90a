use axum::{middleware, routing::{get, post, put}, Router};
use std::sync::Arc;

use crate::handler::room_handler::{
    create_room_handler, delete_room_handler, get_room_handler, list_rooms_handler, update_room_handler,
};
use crate::middlewares::admin_middleware::{admin_auth, AdminAuthState};
use crate::service::room_service::RoomServiceImpl;

pub fn room_router(service: Arc<RoomServiceImpl>, admin_auth_state: Arc<AdminAuthState>) -> Router {
    let public = Router::new()
        .route("/api/rooms", get(list_rooms_handler))
        .route("/api/rooms/{id}", get(get_room_handler));

    let admin = Router::new()
        .route("/api/rooms", post(create_room_handler))
        .route("/api/rooms/{id}", put(update_room_handler).delete(delete_room_handler))
        .route_layer(middleware::from_fn_with_state(admin_auth_state, admin_auth));

    public.merge(admin).with_state(service)
}
