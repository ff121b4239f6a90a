use std::cmp::Ordering;
use std::collections::HashMap;

use async_trait::async_trait;
use bson::{oid::ObjectId, Bson, Document};
use tokio::sync::{Mutex, RwLock};

use crate::repository::document_store::{DocumentStore, FindQuery};
use crate::repository::repository_error::{RepositoryError, RepositoryResult};
use crate::util::json::bson_as_i64;

/// Process-local store with the same matching rules the service relies on
/// from MongoDB: top-level equality filters (numbers compare across widths),
/// single- or multi-key sorts, and `$set` updates. Used by the test suite and
/// for running the API without a database.
#[derive(Default)]
pub struct InMemoryDocumentStore {
    collections: RwLock<HashMap<String, Vec<Document>>>,
    counters: Mutex<HashMap<String, i64>>,
}

impl InMemoryDocumentStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserts a document as-is, bypassing id generation. Lets tests seed
    /// records shaped the way older writers stored them.
    pub async fn seed(&self, collection: &str, document: Document) {
        self.collections
            .write()
            .await
            .entry(collection.to_string())
            .or_default()
            .push(document);
    }
}

fn values_equal(a: &Bson, b: &Bson) -> bool {
    if type_rank(a) == 1 && type_rank(b) == 1 {
        return as_f64(a) == as_f64(b);
    }
    a == b
}

fn matches(document: &Document, filter: &Document) -> bool {
    filter
        .iter()
        .all(|(key, expected)| document.get(key).is_some_and(|actual| values_equal(actual, expected)))
}

/// Cross-type ordering rank, following MongoDB's BSON comparison order.
fn type_rank(value: &Bson) -> u8 {
    match value {
        Bson::Null | Bson::Undefined => 0,
        Bson::Int32(_) | Bson::Int64(_) | Bson::Double(_) => 1,
        Bson::String(_) => 2,
        Bson::Document(_) => 3,
        Bson::Array(_) => 4,
        Bson::ObjectId(_) => 5,
        Bson::Boolean(_) => 6,
        Bson::DateTime(_) => 7,
        _ => 8,
    }
}

fn as_f64(value: &Bson) -> f64 {
    match value {
        Bson::Int32(i) => f64::from(*i),
        Bson::Int64(i) => *i as f64,
        Bson::Double(f) => *f,
        _ => 0.0,
    }
}

fn compare_values(a: Option<&Bson>, b: Option<&Bson>) -> Ordering {
    let a = a.unwrap_or(&Bson::Null);
    let b = b.unwrap_or(&Bson::Null);
    match type_rank(a).cmp(&type_rank(b)) {
        Ordering::Equal => match (a, b) {
            (Bson::String(x), Bson::String(y)) => x.cmp(y),
            (Bson::ObjectId(x), Bson::ObjectId(y)) => x.bytes().cmp(&y.bytes()),
            (Bson::Boolean(x), Bson::Boolean(y)) => x.cmp(y),
            (Bson::DateTime(x), Bson::DateTime(y)) => x.cmp(y),
            _ if type_rank(a) == 1 => as_f64(a).partial_cmp(&as_f64(b)).unwrap_or(Ordering::Equal),
            _ => Ordering::Equal,
        },
        unequal => unequal,
    }
}

fn compare_documents(a: &Document, b: &Document, sort: &Document) -> Ordering {
    for (key, direction) in sort {
        let ordering = compare_values(a.get(key), b.get(key));
        let ordering = if bson_as_i64(direction).unwrap_or(1) < 0 { ordering.reverse() } else { ordering };
        if ordering != Ordering::Equal {
            return ordering;
        }
    }
    Ordering::Equal
}

#[async_trait]
impl DocumentStore for InMemoryDocumentStore {
    async fn find(&self, collection: &str, query: FindQuery) -> RepositoryResult<Vec<Document>> {
        let collections = self.collections.read().await;
        let mut found: Vec<Document> = collections
            .get(collection)
            .map(|docs| docs.iter().filter(|d| matches(d, &query.filter)).cloned().collect())
            .unwrap_or_default();
        if let Some(sort) = &query.sort {
            // Stable sort keeps insertion order between ties
            found.sort_by(|a, b| compare_documents(a, b, sort));
        }
        if let Some(limit) = query.limit.filter(|l| *l > 0) {
            found.truncate(limit as usize);
        }
        Ok(found)
    }

    async fn find_one(&self, collection: &str, filter: Document) -> RepositoryResult<Option<Document>> {
        let collections = self.collections.read().await;
        Ok(collections
            .get(collection)
            .and_then(|docs| docs.iter().find(|d| matches(d, &filter)).cloned()))
    }

    async fn insert_one(&self, collection: &str, mut document: Document) -> RepositoryResult<Bson> {
        let id = match document.get("_id") {
            Some(id) => id.clone(),
            None => {
                let id = Bson::ObjectId(ObjectId::new());
                document.insert("_id", id.clone());
                id
            }
        };
        let mut collections = self.collections.write().await;
        let docs = collections.entry(collection.to_string()).or_default();
        if docs.iter().any(|d| d.get("_id") == Some(&id)) {
            return Err(RepositoryError::already_exists(format!("Duplicate key: _id {}", id)));
        }
        docs.push(document);
        Ok(id)
    }

    async fn update_one(&self, collection: &str, filter: Document, set: Document) -> RepositoryResult<u64> {
        let mut collections = self.collections.write().await;
        let target = collections
            .get_mut(collection)
            .and_then(|docs| docs.iter_mut().find(|d| matches(d, &filter)));
        match target {
            Some(document) => {
                for (key, value) in set {
                    document.insert(key, value);
                }
                Ok(1)
            }
            None => Ok(0),
        }
    }

    async fn delete_one(&self, collection: &str, filter: Document) -> RepositoryResult<u64> {
        let mut collections = self.collections.write().await;
        let Some(docs) = collections.get_mut(collection) else {
            return Ok(0);
        };
        match docs.iter().position(|d| matches(d, &filter)) {
            Some(index) => {
                docs.remove(index);
                Ok(1)
            }
            None => Ok(0),
        }
    }

    async fn count(&self, collection: &str) -> RepositoryResult<u64> {
        let collections = self.collections.read().await;
        Ok(collections.get(collection).map(|docs| docs.len() as u64).unwrap_or(0))
    }

    async fn next_sequence(&self, key: &str, floor: i64) -> RepositoryResult<i64> {
        let mut counters = self.counters.lock().await;
        let seq = counters.entry(key.to_string()).or_insert(0);
        *seq = (*seq).max(floor) + 1;
        Ok(*seq)
    }
}
