use axum::{middleware, routing::{get, post}, Router};
use std::sync::Arc;

use crate::handler::proposal_handler::{
    create_proposal_handler, delete_proposal_handler, get_proposal_handler, list_proposals_handler,
    update_proposal_handler,
};
use crate::middlewares::admin_middleware::{admin_auth, AdminAuthState};
use crate::service::proposal_service::ProposalServiceImpl;

pub fn proposal_router(service: Arc<ProposalServiceImpl>, admin_auth_state: Arc<AdminAuthState>) -> Router {
    // Event enquiries come in from the public site
    let public = Router::new().route("/api/proposals", post(create_proposal_handler));

    let admin = Router::new()
        .route("/api/proposals", get(list_proposals_handler))
        .route(
            "/api/proposals/{id}",
            get(get_proposal_handler).put(update_proposal_handler).delete(delete_proposal_handler),
        )
        .route_layer(middleware::from_fn_with_state(admin_auth_state, admin_auth));

    public.merge(admin).with_state(service)
}
