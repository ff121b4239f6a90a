use axum::{middleware, routing::{get, post}, Router};
use std::sync::Arc;

use crate::handler::booking_handler::{
    create_booking_handler, create_restaurant_booking_handler, delete_booking_handler,
    delete_restaurant_booking_handler, get_booking_handler, get_restaurant_booking_handler, list_bookings_handler,
    list_restaurant_bookings_handler, update_booking_handler, update_restaurant_booking_handler,
};
use crate::middlewares::admin_middleware::{admin_auth, AdminAuthState};
use crate::service::booking_service::BookingServiceImpl;

/// Room and restaurant bookings. Guests may only create; reading and
/// managing bookings is admin work.
pub fn booking_router(service: Arc<BookingServiceImpl>, admin_auth_state: Arc<AdminAuthState>) -> Router {
    let public = Router::new()
        .route("/api/bookings", post(create_booking_handler))
        .route("/api/restaurant-bookings", post(create_restaurant_booking_handler));

    let admin = Router::new()
        .route("/api/bookings", get(list_bookings_handler))
        .route(
            "/api/bookings/{id}",
            get(get_booking_handler).put(update_booking_handler).delete(delete_booking_handler),
        )
        .route("/api/restaurant-bookings", get(list_restaurant_bookings_handler))
        .route(
            "/api/restaurant-bookings/{id}",
            get(get_restaurant_booking_handler)
                .put(update_restaurant_booking_handler)
                .delete(delete_restaurant_booking_handler),
        )
        .route_layer(middleware::from_fn_with_state(admin_auth_state, admin_auth));

    public.merge(admin).with_state(service)
}
