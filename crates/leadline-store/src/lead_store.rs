//! Keeps an in-memory lead list in step with a [`LeadBackend`].
//!
//! Every mutation is sent to the backend first; the list only changes once
//! the backend has confirmed, so a failed call leaves it exactly as it was.

use crate::backend::{LeadBackend, PersistenceError};
use chrono::{DateTime, Utc};
use leadline_core::domain::{Lead, LeadDraft, LeadId};
use leadline_core::time::strictly_after;
use leadline_core::{ensure_future, reduce, LeadAction, LeadState, ValidationError};
use std::future::Future;
use std::sync::{Mutex, MutexGuard, PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};
use thiserror::Error;
use tracing::{debug, info, warn};

#[derive(Debug, Error)]
pub enum LeadStoreError {
    #[error(transparent)]
    Validation(#[from] ValidationError),
    #[error("lead not found: {0}")]
    NotFound(LeadId),
    #[error(transparent)]
    Persistence(#[from] PersistenceError),
}

pub struct LeadStore<B> {
    backend: B,
    state: RwLock<LeadState>,
    in_flight: Mutex<usize>,
    last_stamp: Mutex<Option<DateTime<Utc>>>,
}

impl<B: LeadBackend> LeadStore<B> {
    pub fn new(backend: B) -> Self {
        Self {
            backend,
            state: RwLock::new(LeadState::default()),
            in_flight: Mutex::new(0),
            last_stamp: Mutex::new(None),
        }
    }

    pub fn backend(&self) -> &B {
        &self.backend
    }

    pub fn snapshot(&self) -> LeadState {
        read(&self.state).clone()
    }

    pub fn leads(&self) -> Vec<Lead> {
        read(&self.state).leads.clone()
    }

    pub fn is_loading(&self) -> bool {
        read(&self.state).loading
    }

    pub fn last_error(&self) -> Option<String> {
        read(&self.state).error.clone()
    }

    pub fn get_by_id(&self, id: LeadId) -> Option<Lead> {
        read(&self.state).get(id).cloned()
    }

    /// Replaces the list with whatever the backend holds.
    pub async fn load_all(&self) -> Result<usize, LeadStoreError> {
        let leads = self.call("list", self.backend.list_leads()).await?;
        if let Some(latest) = leads.iter().map(|lead| lead.updated_at).max() {
            self.observe_stamp(latest);
        }
        let count = leads.len();
        self.dispatch(LeadAction::Load(leads));
        info!(count, "leads loaded");
        Ok(count)
    }

    pub async fn create(&self, now: DateTime<Utc>, draft: LeadDraft) -> Result<Lead, LeadStoreError> {
        draft.validate()?;
        draft.ensure_followup_in_future(now)?;

        let lead = Lead::from_draft(LeadId::new(), self.next_stamp(now), draft);
        let created = self.call("create", self.backend.create_lead(lead)).await?;
        self.dispatch(LeadAction::Add(created.clone()));
        info!(id = %created.id, "lead created");
        Ok(created)
    }

    /// Saves a changed copy of a known lead. `created_at` always comes from
    /// the record already in the list.
    pub async fn update(&self, now: DateTime<Utc>, mut lead: Lead) -> Result<Lead, LeadStoreError> {
        let previous = self
            .get_by_id(lead.id)
            .ok_or(LeadStoreError::NotFound(lead.id))?;
        lead.validate()?;
        if lead.next_followup != previous.next_followup {
            if let Some(at) = lead.next_followup {
                ensure_future(at, lead.civil_now(now))?;
            }
        }

        lead.created_at = previous.created_at;
        lead.updated_at = self.next_stamp(now);
        let updated = self.call("update", self.backend.update_lead(lead)).await?;
        self.dispatch(LeadAction::Update(updated.clone()));
        debug!(id = %updated.id, "lead updated");
        Ok(updated)
    }

    /// Applies `change` to a copy of the lead and saves it.
    pub async fn modify<F>(
        &self,
        now: DateTime<Utc>,
        id: LeadId,
        change: F,
    ) -> Result<Lead, LeadStoreError>
    where
        F: FnOnce(&mut Lead) -> Result<(), ValidationError>,
    {
        let mut lead = self.get_by_id(id).ok_or(LeadStoreError::NotFound(id))?;
        change(&mut lead)?;
        self.update(now, lead).await
    }

    pub async fn delete(&self, id: LeadId) -> Result<(), LeadStoreError> {
        if !read(&self.state).contains(id) {
            return Err(LeadStoreError::NotFound(id));
        }
        self.call("delete", self.backend.delete_lead(id)).await?;
        self.dispatch(LeadAction::Delete(id));
        info!(%id, "lead deleted");
        Ok(())
    }

    /// A blank term returns the current list without touching the backend.
    pub async fn search(&self, term: &str) -> Result<Vec<Lead>, LeadStoreError> {
        let term = term.trim();
        if term.is_empty() {
            return Ok(self.leads());
        }
        Ok(self.call("search", self.backend.search_leads(term)).await?)
    }

    async fn call<T>(
        &self,
        op: &'static str,
        request: impl Future<Output = Result<T, PersistenceError>>,
    ) -> Result<T, PersistenceError> {
        let _flight = InFlight::begin(&self.in_flight, &self.state);
        debug!(op, "calling lead backend");
        let outcome = request.await;
        match &outcome {
            Ok(_) => self.dispatch(LeadAction::SetError(None)),
            Err(err) => {
                warn!(op, error = %err, "lead backend call failed");
                self.dispatch(LeadAction::SetError(Some(err.to_string())));
            }
        }
        outcome
    }

    fn dispatch(&self, action: LeadAction) {
        reduce(&mut write(&self.state), action);
    }

    fn next_stamp(&self, now: DateTime<Utc>) -> DateTime<Utc> {
        let mut last = lock(&self.last_stamp);
        let stamp = strictly_after(now, *last);
        *last = Some(stamp);
        stamp
    }

    fn observe_stamp(&self, seen: DateTime<Utc>) {
        let mut last = lock(&self.last_stamp);
        if last.map_or(true, |value| value < seen) {
            *last = Some(seen);
        }
    }
}

/// Holds `loading` up while at least one backend call is pending.
struct InFlight<'a> {
    count: &'a Mutex<usize>,
    state: &'a RwLock<LeadState>,
}

impl<'a> InFlight<'a> {
    fn begin(count: &'a Mutex<usize>, state: &'a RwLock<LeadState>) -> Self {
        let mut pending = lock(count);
        *pending += 1;
        if *pending == 1 {
            reduce(&mut write(state), LeadAction::SetLoading(true));
        }
        Self { count, state }
    }
}

impl Drop for InFlight<'_> {
    fn drop(&mut self) {
        let mut pending = lock(self.count);
        *pending = pending.saturating_sub(1);
        if *pending == 0 {
            reduce(&mut write(self.state), LeadAction::SetLoading(false));
        }
    }
}

fn read(state: &RwLock<LeadState>) -> RwLockReadGuard<'_, LeadState> {
    state.read().unwrap_or_else(PoisonError::into_inner)
}

fn write(state: &RwLock<LeadState>) -> RwLockWriteGuard<'_, LeadState> {
    state.write().unwrap_or_else(PoisonError::into_inner)
}

fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(PoisonError::into_inner)
}
