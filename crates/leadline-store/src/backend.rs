//! The asynchronous persistence seam the lead store talks to.

use crate::error::StoreError;
use crate::Store;
use async_trait::async_trait;
use leadline_core::domain::{Lead, LeadId};
use thiserror::Error;
use tokio::sync::Mutex;
use tracing::debug;

#[derive(Debug, Error)]
pub enum PersistenceError {
    #[error(transparent)]
    Store(#[from] StoreError),
    #[error("persistence unavailable: {0}")]
    Unavailable(String),
}

/// Durable home for leads. Every call either fully succeeds or leaves the
/// persisted records unchanged.
#[async_trait]
pub trait LeadBackend: Send + Sync {
    /// All leads, oldest first.
    async fn list_leads(&self) -> Result<Vec<Lead>, PersistenceError>;

    /// Persists a new record and returns it as stored.
    async fn create_lead(&self, lead: Lead) -> Result<Lead, PersistenceError>;

    async fn update_lead(&self, lead: Lead) -> Result<Lead, PersistenceError>;

    /// Removes a lead together with its positions.
    async fn delete_lead(&self, id: LeadId) -> Result<(), PersistenceError>;

    async fn search_leads(&self, term: &str) -> Result<Vec<Lead>, PersistenceError>;
}

pub struct SqliteBackend {
    store: Mutex<Store>,
}

impl SqliteBackend {
    pub fn new(store: Store) -> Self {
        Self {
            store: Mutex::new(store),
        }
    }

    /// Runs `f` against the underlying store, for work that sits outside the
    /// lead list such as drafts and backups.
    pub async fn with_store<T>(&self, f: impl FnOnce(&Store) -> T) -> T {
        let store = self.store.lock().await;
        f(&store)
    }
}

#[async_trait]
impl LeadBackend for SqliteBackend {
    async fn list_leads(&self) -> Result<Vec<Lead>, PersistenceError> {
        let store = self.store.lock().await;
        let leads = store.leads().list_all()?;
        debug!(count = leads.len(), "loaded leads from sqlite");
        Ok(leads)
    }

    async fn create_lead(&self, lead: Lead) -> Result<Lead, PersistenceError> {
        let store = self.store.lock().await;
        Ok(store.leads().create(&lead)?)
    }

    async fn update_lead(&self, lead: Lead) -> Result<Lead, PersistenceError> {
        let store = self.store.lock().await;
        Ok(store.leads().update(&lead)?)
    }

    async fn delete_lead(&self, id: LeadId) -> Result<(), PersistenceError> {
        let store = self.store.lock().await;
        Ok(store.leads().delete(id)?)
    }

    async fn search_leads(&self, term: &str) -> Result<Vec<Lead>, PersistenceError> {
        let store = self.store.lock().await;
        Ok(store.leads().search(term)?)
    }
}
