use std::sync::Arc;

use axum::extract::{Path, State};
use axum::{http::StatusCode, response::IntoResponse, Json};

use crate::dto::proposal_dto::{CreateProposalRequest, ProposalListQuery, UpdateProposalRequest};
use crate::dto::MessageResponse;
use crate::service::proposal_service::{ProposalService, ProposalServiceImpl};
use crate::util::error::HandlerError;
use crate::util::extract::{ApiJson, ApiQuery};
use crate::util::json::{to_api_list, to_api_value};

pub async fn list_proposals_handler(
    State(service): State<Arc<ProposalServiceImpl>>,
    ApiQuery(query): ApiQuery<ProposalListQuery>,
) -> Result<impl IntoResponse, HandlerError> {
    let proposals = service.list_proposals(query).await?;
    Ok(Json(to_api_list(&proposals)?))
}

pub async fn get_proposal_handler(
    State(service): State<Arc<ProposalServiceImpl>>,
    Path(id): Path<String>,
) -> Result<impl IntoResponse, HandlerError> {
    let proposal = service.get_proposal(&id).await?;
    Ok(Json(to_api_value(&proposal)?))
}

pub async fn create_proposal_handler(
    State(service): State<Arc<ProposalServiceImpl>>,
    ApiJson(payload): ApiJson<CreateProposalRequest>,
) -> Result<impl IntoResponse, HandlerError> {
    let proposal = service.create_proposal(payload).await?;
    Ok((StatusCode::CREATED, Json(to_api_value(&proposal)?)))
}

pub async fn update_proposal_handler(
    State(service): State<Arc<ProposalServiceImpl>>,
    Path(id): Path<String>,
    ApiJson(payload): ApiJson<UpdateProposalRequest>,
) -> Result<impl IntoResponse, HandlerError> {
    let proposal = service.update_proposal(&id, payload).await?;
    Ok(Json(to_api_value(&proposal)?))
}

pub async fn delete_proposal_handler(
    State(service): State<Arc<ProposalServiceImpl>>,
    Path(id): Path<String>,
) -> Result<impl IntoResponse, HandlerError> {
    service.delete_proposal(&id).await?;
    Ok(Json(MessageResponse::ok("Proposal deleted successfully")))
}
