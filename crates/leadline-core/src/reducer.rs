//! In-memory lead list. `reduce` is the only code that mutates a
//! [`LeadState`]; callers apply an action once the persistence layer has
//! confirmed it.

use crate::domain::{Lead, LeadId};
use serde::Serialize;

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct LeadState {
    pub leads: Vec<Lead>,
    pub loading: bool,
    pub error: Option<String>,
}

impl LeadState {
    pub fn get(&self, id: LeadId) -> Option<&Lead> {
        self.leads.iter().find(|lead| lead.id == id)
    }

    pub fn contains(&self, id: LeadId) -> bool {
        self.get(id).is_some()
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LeadAction {
    SetLoading(bool),
    SetError(Option<String>),
    /// Replaces the whole list and clears any error.
    Load(Vec<Lead>),
    Add(Lead),
    /// Replaces the record with the same id; unknown ids are ignored.
    Update(Lead),
    Delete(LeadId),
}

pub fn reduce(state: &mut LeadState, action: LeadAction) {
    match action {
        LeadAction::SetLoading(loading) => state.loading = loading,
        LeadAction::SetError(error) => state.error = error,
        LeadAction::Load(leads) => {
            state.leads = leads;
            state.error = None;
        }
        LeadAction::Add(lead) => state.leads.push(lead),
        LeadAction::Update(lead) => {
            if let Some(slot) = state.leads.iter_mut().find(|slot| slot.id == lead.id) {
                *slot = lead;
            }
        }
        LeadAction::Delete(id) => state.leads.retain(|lead| lead.id != id),
    }
}
