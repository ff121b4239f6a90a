use axum::{body::Body, extract::State, http::{header::AUTHORIZATION, Request}, middleware::Next, response::Response};
use std::sync::Arc;
use tracing::warn;

use crate::service::auth_service::{AuthService, AuthServiceImpl};
use crate::util::error::{HandlerError, HandlerErrorKind};
use crate::util::jwt::{JwtTokenUtils, JwtTokenUtilsImpl, ADMIN_ROLE};

pub struct AdminAuthState {
    pub jwt_utils: Arc<JwtTokenUtilsImpl>,
    pub auth_service: Arc<AuthServiceImpl>,
}

/// Gate for every mutating route: requires a live admin access token and
/// hands its claims to the handler as a request extension.
pub async fn admin_auth(
    State(state): State<Arc<AdminAuthState>>,
    mut req: Request<Body>,
    next: Next,
) -> Result<Response, HandlerError> {
    let auth_header = req
        .headers()
        .get(AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
        .ok_or_else(|| HandlerError::unauthorized("Unauthorized"))?;

    let token = state
        .jwt_utils
        .extract_token_from_header(auth_header)
        .map_err(|_| HandlerError::unauthorized("Unauthorized"))?;
    let claims = state.auth_service.authorize(&token).await.map_err(|e| {
        warn!("Admin gate rejected token: {}", e);
        HandlerError::unauthorized("Unauthorized")
    })?;

    if !state.jwt_utils.check_role_permission(&claims.role, ADMIN_ROLE) {
        return Err(HandlerError::new(HandlerErrorKind::Forbidden, "Forbidden"));
    }

    req.extensions_mut().insert(claims);
    Ok(next.run(req).await)
}
