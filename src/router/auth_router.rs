use axum::{middleware, routing::{get, post}, Router};
use std::sync::Arc;

use crate::handler::auth_handler::{login_handler, logout_handler, refresh_token_handler, session_handler};
use crate::middlewares::admin_middleware::{admin_auth, AdminAuthState};
use crate::service::auth_service::AuthServiceImpl;

pub fn auth_router(service: Arc<AuthServiceImpl>, admin_auth_state: Arc<AdminAuthState>) -> Router {
    let public = Router::new()
        .route("/api/auth/login", post(login_handler))
        .route("/api/auth/refresh", post(refresh_token_handler))
        .route("/api/auth/session", get(session_handler));

    let admin = Router::new()
        .route("/api/auth/logout", post(logout_handler))
        .route_layer(middleware::from_fn_with_state(admin_auth_state, admin_auth));

    public.merge(admin).with_state(service)
}
