//! Screen data: payload types and the data sources screens fetch from.

use std::marker::PhantomData;
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use serde::de::DeserializeOwned;
use tracing::debug;

use crate::auth::Session;
use crate::store::{DocumentStore, StoreError};

pub mod diet;
pub mod home;
pub mod playlists;
pub mod profile;
pub mod workouts;

/// Why a screen fetch failed. Display text is shown on the screen as-is.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum FetchError {
    #[error("No user logged in")]
    NoSession,
    #[error(transparent)]
    Store(#[from] StoreError),
    #[error("Unexpected data: {0}")]
    Decode(String),
}

/// Async read keyed by the current session.
#[async_trait]
pub trait DataSource<T>: Send + Sync {
    async fn load(&self, session: Option<&Session>) -> Result<T, FetchError>;
}

/// Session uid, or the no-session error
pub fn require_session(session: Option<&Session>) -> Result<&Session, FetchError> {
    session.ok_or(FetchError::NoSession)
}

/// Static data after a simulated delay. Ignores the session.
pub struct PlaceholderSource<T> {
    data: T,
    delay: Duration,
}

impl<T: Clone + Send + Sync> PlaceholderSource<T> {
    pub fn new(data: T, delay: Duration) -> Self {
        Self { data, delay }
    }
}

#[async_trait]
impl<T: Clone + Send + Sync + 'static> DataSource<T> for PlaceholderSource<T> {
    async fn load(&self, _session: Option<&Session>) -> Result<T, FetchError> {
        if !self.delay.is_zero() {
            tokio::time::sleep(self.delay).await;
        }
        Ok(self.data.clone())
    }
}

/// Documents of `users/{uid}/{collection}`, decoded in key order.
pub struct CollectionSource<T> {
    store: Arc<dyn DocumentStore>,
    collection: &'static str,
    limit: usize,
    _item: PhantomData<fn() -> T>,
}

impl<T> CollectionSource<T> {
    pub fn new(store: Arc<dyn DocumentStore>, collection: &'static str, limit: usize) -> Self {
        Self {
            store,
            collection,
            limit,
            _item: PhantomData,
        }
    }

    pub fn path_for(&self, uid: &str) -> String {
        format!("users/{}/{}", uid, self.collection)
    }
}

#[async_trait]
impl<T: DeserializeOwned + Send + 'static> DataSource<Vec<T>> for CollectionSource<T> {
    async fn load(&self, session: Option<&Session>) -> Result<Vec<T>, FetchError> {
        let session = require_session(session)?;
        let path = self.path_for(&session.uid);
        let documents = self.store.list_documents(&path, self.limit).await?;
        debug!("Loaded {} documents from {}", documents.len(), path);
        documents
            .iter()
            .map(|doc| doc.decode::<T>().map_err(|e| FetchError::Decode(e.to_string())))
            .collect()
    }
}
