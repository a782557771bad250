//! Document store: the remote key/document service screens read from.

use std::collections::BTreeMap;

use async_trait::async_trait;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use tokio::sync::RwLock;

pub mod firestore;

pub use firestore::FirestoreStore;

/// A stored document: its path and JSON fields.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Document {
    /// Slash-separated path relative to the database root (e.g. `users/abc`)
    pub path: String,
    pub fields: Map<String, Value>,
}

impl Document {
    pub fn new(path: impl Into<String>, fields: Map<String, Value>) -> Self {
        Self {
            path: path.into(),
            fields,
        }
    }

    /// Last path segment
    pub fn id(&self) -> &str {
        self.path.rsplit('/').next().unwrap_or(&self.path)
    }

    pub fn get_str(&self, field: &str) -> Option<&str> {
        self.fields.get(field).and_then(Value::as_str)
    }

    /// Deserialize the fields into a typed payload
    pub fn decode<T: DeserializeOwned>(&self) -> Result<T, StoreError> {
        serde_json::from_value(Value::Object(self.fields.clone()))
            .map_err(|e| StoreError::Decode(format!("{}: {}", self.path, e)))
    }
}

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum StoreError {
    #[error("No user logged in")]
    NotAuthenticated,
    #[error("Permission denied for {0}")]
    PermissionDenied(String),
    #[error("Request failed ({status}): {message}")]
    Http { status: u16, message: String },
    #[error("Network error: {0}")]
    Network(String),
    #[error("Unexpected document format: {0}")]
    Decode(String),
}

/// Read/write access to documents and collections.
#[async_trait]
pub trait DocumentStore: Send + Sync {
    /// Fetch one document. `Ok(None)` when it does not exist.
    async fn get_document(&self, path: &str) -> Result<Option<Document>, StoreError>;

    /// Create or replace a document
    async fn set_document(&self, path: &str, fields: Map<String, Value>)
        -> Result<(), StoreError>;

    /// Documents directly under a collection path, in key order, at most `limit`
    async fn list_documents(
        &self,
        collection: &str,
        limit: usize,
    ) -> Result<Vec<Document>, StoreError>;
}

/// In-memory store for offline mode and tests.
#[derive(Default)]
pub struct MemoryStore {
    documents: RwLock<BTreeMap<String, Map<String, Value>>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn len(&self) -> usize {
        self.documents.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.documents.read().await.is_empty()
    }
}

fn normalize(path: &str) -> String {
    path.trim_matches('/').to_string()
}

#[async_trait]
impl DocumentStore for MemoryStore {
    async fn get_document(&self, path: &str) -> Result<Option<Document>, StoreError> {
        let path = normalize(path);
        let docs = self.documents.read().await;
        Ok(docs.get(&path).map(|f| Document::new(path.clone(), f.clone())))
    }

    async fn set_document(
        &self,
        path: &str,
        fields: Map<String, Value>,
    ) -> Result<(), StoreError> {
        self.documents.write().await.insert(normalize(path), fields);
        Ok(())
    }

    async fn list_documents(
        &self,
        collection: &str,
        limit: usize,
    ) -> Result<Vec<Document>, StoreError> {
        let prefix = format!("{}/", normalize(collection));
        let docs = self.documents.read().await;
        Ok(docs
            .range(prefix.clone()..)
            .take_while(|(path, _)| path.starts_with(&prefix))
            // Direct children only, not documents of nested subcollections
            .filter(|(path, _)| !path[prefix.len()..].contains('/'))
            .take(limit)
            .map(|(path, fields)| Document::new(path.clone(), fields.clone()))
            .collect())
    }
}
