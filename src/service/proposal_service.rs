use std::sync::Arc;

use async_trait::async_trait;
use bson::{doc, Document};
use tracing::{info, instrument};
use validator::Validate;

use crate::dto::proposal_dto::{CreateProposalRequest, ProposalListQuery, UpdateProposalRequest};
use crate::dto::set_document;
use crate::model::proposal::{Proposal, ProposalStatus};
use crate::repository::crud_repo::CrudRepository;
use crate::repository::document_store::DocumentStore;
use crate::util::date;
use crate::util::error::ServiceError;
use crate::util::identifier::object_id_filter;

pub const PROPOSALS_COLLECTION: &str = "proposals";

#[async_trait]
pub trait ProposalService: Send + Sync {
    async fn list_proposals(&self, query: ProposalListQuery) -> Result<Vec<Proposal>, ServiceError>;
    async fn get_proposal(&self, id: &str) -> Result<Proposal, ServiceError>;
    async fn create_proposal(&self, request: CreateProposalRequest) -> Result<Proposal, ServiceError>;
    async fn update_proposal(&self, id: &str, request: UpdateProposalRequest) -> Result<Proposal, ServiceError>;
    async fn delete_proposal(&self, id: &str) -> Result<(), ServiceError>;
}

pub struct ProposalServiceImpl {
    pub proposal_repo: CrudRepository<Proposal>,
}

impl ProposalServiceImpl {
    pub fn new(store: Arc<dyn DocumentStore>) -> Self {
        ProposalServiceImpl { proposal_repo: CrudRepository::new(store, PROPOSALS_COLLECTION, "Proposal") }
    }

    fn key(id: &str) -> Result<Document, ServiceError> {
        object_id_filter(id).ok_or_else(|| ServiceError::InvalidInput("Invalid proposal id".to_string()))
    }
}

#[async_trait]
impl ProposalService for ProposalServiceImpl {
    #[instrument(skip(self))]
    async fn list_proposals(&self, query: ProposalListQuery) -> Result<Vec<Proposal>, ServiceError> {
        let filter = match query.status {
            Some(status) => doc! { "status": status.as_str() },
            None => Document::new(),
        };
        Ok(self.proposal_repo.list(filter, Some(doc! { "createdAt": -1 })).await?)
    }

    #[instrument(skip(self))]
    async fn get_proposal(&self, id: &str) -> Result<Proposal, ServiceError> {
        Ok(self.proposal_repo.get(Self::key(id)?).await?)
    }

    #[instrument(skip(self, request), fields(event_type = %request.event_type))]
    async fn create_proposal(&self, request: CreateProposalRequest) -> Result<Proposal, ServiceError> {
        request.validate()?;
        info!("Registering event proposal");

        let now = date::now();
        let proposal = Proposal {
            id: None,
            first_name: request.first_name,
            last_name: request.last_name,
            email: request.email,
            phone: request.phone,
            company: request.company,
            event_type: request.event_type,
            event_date: request.event_date,
            guest_count: request.guest_count,
            food_preference: request.food_preference.unwrap_or_default(),
            alcohol_required: request.alcohol_required.unwrap_or_default(),
            rooms_required: request.rooms_required.unwrap_or_default(),
            number_of_rooms: request.number_of_rooms,
            message: request.message,
            status: ProposalStatus::Pending,
            created_at: Some(now),
            updated_at: Some(now),
        };

        Ok(self.proposal_repo.create(&proposal).await?)
    }

    #[instrument(skip(self, request))]
    async fn update_proposal(&self, id: &str, request: UpdateProposalRequest) -> Result<Proposal, ServiceError> {
        request.validate()?;
        let filter = Self::key(id)?;
        Ok(self.proposal_repo.update(filter, set_document(&request)?).await?)
    }

    #[instrument(skip(self))]
    async fn delete_proposal(&self, id: &str) -> Result<(), ServiceError> {
        Ok(self.proposal_repo.delete(Self::key(id)?).await?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::proposal::YesNo;
    use crate::repository::memory_store::InMemoryDocumentStore;
    use serde_json::json;

    #[tokio::test]
    async fn test_partial_update_merges_fields() {
        let service = ProposalServiceImpl::new(Arc::new(InMemoryDocumentStore::new()));
        let request: CreateProposalRequest = serde_json::from_value(json!({
            "firstName": "Kiran", "lastName": "Rao", "email": "kiran@example.com", "phone": "9000",
            "eventType": "Wedding", "guestCount": 250, "roomsRequired": "Yes"
        }))
        .unwrap();
        let created = service.create_proposal(request).await.unwrap();
        assert_eq!(created.status, ProposalStatus::Pending);
        assert_eq!(created.alcohol_required, YesNo::No);

        let update: UpdateProposalRequest = serde_json::from_value(json!({ "status": "contacted", "_id": "x" })).unwrap();
        let updated = service.update_proposal(&created.id.unwrap().to_hex(), update).await.unwrap();
        assert_eq!(updated.status, ProposalStatus::Contacted);
        assert_eq!(updated.guest_count, Some(250));
        assert_eq!(updated.rooms_required, YesNo::Yes);
        assert_eq!(updated.id, created.id);
        assert_eq!(updated.created_at, created.created_at);
    }
}
