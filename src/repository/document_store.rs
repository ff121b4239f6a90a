use crate::config::mongo_conf::MongoConfig;
use crate::repository::repository_error::{RepositoryError, RepositoryResult};
use crate::util::json::bson_as_i64;
use async_trait::async_trait;
use bson::{doc, Bson, Document};
use futures::stream::TryStreamExt;
use mongodb::options::{
    ClientOptions, Credential, FindOneAndUpdateOptions, FindOptions, ResolverConfig, ReturnDocument,
    UpdateOptions,
};
use mongodb::{Client, Collection, Database};
use tokio::sync::OnceCell;
use tracing::{debug, error, info, instrument};

/// Collection holding one `{ _id: <key>, seq: <i64> }` document per counter.
pub const COUNTERS_COLLECTION: &str = "counters";

/// Equality filter plus optional sort and limit.
#[derive(Debug, Clone, Default)]
pub struct FindQuery {
    pub filter: Document,
    pub sort: Option<Document>,
    pub limit: Option<i64>,
}

impl FindQuery {
    pub fn new(filter: Document) -> Self {
        FindQuery { filter, sort: None, limit: None }
    }

    pub fn sort(mut self, sort: Document) -> Self {
        self.sort = Some(sort);
        self
    }

    pub fn limit(mut self, limit: i64) -> Self {
        self.limit = Some(limit);
        self
    }
}

/// The operations every resource needs from the document database. All writes
/// are single-document.
#[async_trait]
pub trait DocumentStore: Send + Sync {
    async fn find(&self, collection: &str, query: FindQuery) -> RepositoryResult<Vec<Document>>;
    async fn find_one(&self, collection: &str, filter: Document) -> RepositoryResult<Option<Document>>;
    /// Returns the `_id` of the inserted document.
    async fn insert_one(&self, collection: &str, document: Document) -> RepositoryResult<Bson>;
    /// `$set`s the given fields on the first match; returns the matched count.
    async fn update_one(&self, collection: &str, filter: Document, set: Document) -> RepositoryResult<u64>;
    /// Returns the deleted count.
    async fn delete_one(&self, collection: &str, filter: Document) -> RepositoryResult<u64>;
    async fn count(&self, collection: &str) -> RepositoryResult<u64>;
    /// Atomically raises the counter `key` to at least `floor`, increments it
    /// and returns the incremented value.
    async fn next_sequence(&self, key: &str, floor: i64) -> RepositoryResult<i64>;
}

/// MongoDB-backed store. The client is created on first use and shared by
/// every caller afterwards; concurrent first callers await the same init.
pub struct MongoDocumentStore {
    config: MongoConfig,
    database: OnceCell<Database>,
}

impl MongoDocumentStore {
    pub fn new(config: MongoConfig) -> Self {
        MongoDocumentStore { config, database: OnceCell::new() }
    }

    async fn connect(config: &MongoConfig) -> Result<Database, mongodb::error::Error> {
        info!(database = %config.database, "Connecting to MongoDB");
        let mut client_options = ClientOptions::parse_with_resolver_config(&config.uri, ResolverConfig::cloudflare()).await?;
        client_options.app_name = Some("HotelBackend".to_string());
        client_options.max_pool_size = Some(config.pool_size);
        client_options.connect_timeout = Some(std::time::Duration::from_secs(config.connection_timeout_secs));

        if let (Some(ref username), Some(ref password)) = (&config.username, &config.password) {
            client_options.credential = Some(Credential::builder()
                .username(username.clone())
                .password(password.clone())
                .build());
        }

        let client = Client::with_options(client_options)?;
        Ok(client.database(&config.database))
    }

    async fn database(&self) -> RepositoryResult<&Database> {
        self.database
            .get_or_try_init(|| Self::connect(&self.config))
            .await
            .map_err(|e| {
                error!("Failed to connect to MongoDB: {}", e);
                RepositoryError::connection(format!("Failed to connect to MongoDB: {}", e))
            })
    }

    async fn collection(&self, name: &str) -> RepositoryResult<Collection<Document>> {
        Ok(self.database().await?.collection::<Document>(name))
    }
}

#[async_trait]
impl DocumentStore for MongoDocumentStore {
    #[instrument(skip(self), fields(collection = %collection))]
    async fn find(&self, collection: &str, query: FindQuery) -> RepositoryResult<Vec<Document>> {
        let options = FindOptions::builder().sort(query.sort).limit(query.limit).build();
        let cursor = self.collection(collection).await?.find(query.filter, options).await?;
        let documents: Vec<Document> = cursor.try_collect().await?;
        debug!("Fetched {} documents from {}", documents.len(), collection);
        Ok(documents)
    }

    #[instrument(skip(self), fields(collection = %collection))]
    async fn find_one(&self, collection: &str, filter: Document) -> RepositoryResult<Option<Document>> {
        Ok(self.collection(collection).await?.find_one(filter, None).await?)
    }

    #[instrument(skip(self, document), fields(collection = %collection))]
    async fn insert_one(&self, collection: &str, document: Document) -> RepositoryResult<Bson> {
        let result = self.collection(collection).await?.insert_one(document, None).await?;
        Ok(result.inserted_id)
    }

    #[instrument(skip(self, set), fields(collection = %collection))]
    async fn update_one(&self, collection: &str, filter: Document, set: Document) -> RepositoryResult<u64> {
        let result = self
            .collection(collection)
            .await?
            .update_one(filter, doc! { "$set": set }, None)
            .await?;
        Ok(result.matched_count)
    }

    #[instrument(skip(self), fields(collection = %collection))]
    async fn delete_one(&self, collection: &str, filter: Document) -> RepositoryResult<u64> {
        let result = self.collection(collection).await?.delete_one(filter, None).await?;
        Ok(result.deleted_count)
    }

    async fn count(&self, collection: &str) -> RepositoryResult<u64> {
        Ok(self.collection(collection).await?.count_documents(None, None).await?)
    }

    #[instrument(skip(self))]
    async fn next_sequence(&self, key: &str, floor: i64) -> RepositoryResult<i64> {
        let counters = self.collection(COUNTERS_COLLECTION).await?;
        counters
            .update_one(
                doc! { "_id": key },
                doc! { "$max": { "seq": floor } },
                UpdateOptions::builder().upsert(true).build(),
            )
            .await?;
        let options = FindOneAndUpdateOptions::builder()
            .upsert(true)
            .return_document(ReturnDocument::After)
            .build();
        let counter = counters
            .find_one_and_update(doc! { "_id": key }, doc! { "$inc": { "seq": 1_i64 } }, options)
            .await?;
        counter
            .as_ref()
            .and_then(|c| c.get("seq"))
            .and_then(bson_as_i64)
            .ok_or_else(|| RepositoryError::database(format!("Counter '{}' has no numeric seq", key)))
    }
}
