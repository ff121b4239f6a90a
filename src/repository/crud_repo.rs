use std::fmt::Debug;
use std::marker::PhantomData;
use std::sync::Arc;

use bson::{doc, Document};
use serde::{de::DeserializeOwned, Serialize};
use tracing::{error, info, instrument};

use crate::repository::document_store::{DocumentStore, FindQuery};
use crate::repository::repository_error::{RepositoryError, RepositoryResult};
use crate::util::json::bson_as_i64;

/// Typed access to one collection. Entities are (de)serialized through BSON;
/// filters and `$set` payloads stay as raw documents so callers control
/// exactly which fields are matched and written.
pub struct CrudRepository<T> {
    store: Arc<dyn DocumentStore>,
    collection: &'static str,
    entity: &'static str,
    _entity: PhantomData<fn() -> T>,
}

impl<T> CrudRepository<T>
where
    T: Serialize + DeserializeOwned + Debug + Send + Sync,
{
    pub fn new(store: Arc<dyn DocumentStore>, collection: &'static str, entity: &'static str) -> Self {
        CrudRepository { store, collection, entity, _entity: PhantomData }
    }

    fn decode(&self, document: Document) -> RepositoryResult<T> {
        bson::from_document(document).map_err(|e| {
            error!("Failed to deserialize {}: {}", self.entity, e);
            RepositoryError::serialization(format!("Failed to deserialize {}: {}", self.entity, e))
        })
    }

    #[instrument(skip(self), fields(collection = %self.collection))]
    pub async fn list(&self, filter: Document, sort: Option<Document>) -> RepositoryResult<Vec<T>> {
        let mut query = FindQuery::new(filter);
        query.sort = sort;
        let documents = self.store.find(self.collection, query).await?;
        info!("Fetched {} {} documents", documents.len(), self.entity);
        documents.into_iter().map(|d| self.decode(d)).collect()
    }

    pub async fn find_one(&self, filter: Document) -> RepositoryResult<Option<T>> {
        self.store
            .find_one(self.collection, filter)
            .await?
            .map(|d| self.decode(d))
            .transpose()
    }

    /// Like `find_one`, but a miss is a `NotFound` error.
    pub async fn get(&self, filter: Document) -> RepositoryResult<T> {
        self.find_one(filter)
            .await?
            .ok_or_else(|| RepositoryError::not_found(format!("{} not found", self.entity)))
    }

    /// Inserts the entity and returns it as stored, including its `_id`.
    #[instrument(skip(self, entity), fields(collection = %self.collection))]
    pub async fn create(&self, entity: &T) -> RepositoryResult<T> {
        let document = bson::to_document(entity)?;
        let id = self.store.insert_one(self.collection, document).await.map_err(|e| {
            error!("Failed to create {}: {}", self.entity, e);
            e
        })?;
        info!(id = %id, "{} created", self.entity);
        self.get(doc! { "_id": id }).await
    }

    /// Applies `set` to the document matched by `filter` and returns the
    /// document re-read through the same filter.
    #[instrument(skip(self, set), fields(collection = %self.collection))]
    pub async fn update(&self, filter: Document, set: Document) -> RepositoryResult<T> {
        let matched = self.store.update_one(self.collection, filter.clone(), set).await?;
        if matched == 0 {
            error!("No {} found to update", self.entity);
            return Err(RepositoryError::not_found(format!("{} not found", self.entity)));
        }
        info!("{} updated", self.entity);
        self.get(filter).await
    }

    #[instrument(skip(self), fields(collection = %self.collection))]
    pub async fn delete(&self, filter: Document) -> RepositoryResult<()> {
        let deleted = self.store.delete_one(self.collection, filter).await?;
        if deleted == 0 {
            error!("No {} found to delete", self.entity);
            return Err(RepositoryError::not_found(format!("{} not found", self.entity)));
        }
        info!("{} deleted", self.entity);
        Ok(())
    }

    /// Current maximum of a numeric field across the collection (0 when empty).
    pub async fn max_of(&self, field: &str) -> RepositoryResult<i64> {
        let query = FindQuery::new(Document::new()).sort(doc! { field: -1 }).limit(1);
        let top = self.store.find(self.collection, query).await?;
        Ok(top
            .first()
            .and_then(|d| d.get(field))
            .and_then(bson_as_i64)
            .unwrap_or(0))
    }

    /// Next value for a sequence field, drawn from the store's atomic counter
    /// and never below `max(field) + 1`. Values freed by a delete are not
    /// reused, so the sequence can have gaps.
    #[instrument(skip(self), fields(collection = %self.collection))]
    pub async fn next_value(&self, field: &str) -> RepositoryResult<i64> {
        let floor = self.max_of(field).await?;
        let key = format!("{}.{}", self.collection, field);
        self.store.next_sequence(&key, floor).await
    }
}
