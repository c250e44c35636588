use crate::domain::{format_phone_number, FollowupPriority, Lead, LeadId, Stage};
use crate::followup::{format_for_display, FollowupDisplay};
use crate::format::format_currency_abbreviated;
use crate::rules::{lead_due_state, DueState};
use crate::stats::{position_summary, PositionSummary};
use crate::timezone::current_time_in_zone;
use chrono::{DateTime, Utc};
use serde::Serialize;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LeadListItemDto {
    pub id: LeadId,
    pub business_name: String,
    pub owner_name: String,
    pub phone: String,
    pub stage: Stage,
    pub funding: String,
    pub followup_priority: FollowupPriority,
    pub due_state: DueState,
    pub followup: FollowupDisplay,
}

impl LeadListItemDto {
    pub fn from_lead(lead: &Lead, now: DateTime<Utc>, upcoming_days: i64) -> Self {
        Self {
            id: lead.id,
            business_name: lead.business_name.clone(),
            owner_name: lead.owner_name.clone(),
            phone: format_phone_number(&lead.phone),
            stage: lead.stage,
            funding: format_currency_abbreviated(lead.funding_amount).abbreviated,
            followup_priority: lead.followup_priority,
            due_state: lead_due_state(lead, now, upcoming_days),
            followup: followup_display(lead),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LeadDetailDto {
    #[serde(flatten)]
    pub lead: Lead,
    pub due_state: DueState,
    pub followup: FollowupDisplay,
    pub positions: PositionSummary,
    /// Wall clock in the lead's zone right now, e.g. `2:05 PM CT`.
    pub local_time: String,
}

impl LeadDetailDto {
    pub fn from_lead(lead: Lead, now: DateTime<Utc>, upcoming_days: i64) -> Self {
        let due_state = lead_due_state(&lead, now, upcoming_days);
        let followup = followup_display(&lead);
        let positions = position_summary(&lead);
        let local_time = current_time_in_zone(&lead.client_timezone, now);
        Self {
            lead,
            due_state,
            followup,
            positions,
            local_time,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FollowupItemDto {
    pub lead_id: LeadId,
    pub business_name: String,
    pub owner_name: String,
    pub phone: String,
    pub priority: FollowupPriority,
    pub notes: Option<String>,
    pub due_state: DueState,
    pub scheduled_for: String,
    pub followup: FollowupDisplay,
}

impl FollowupItemDto {
    /// `None` for leads without a follow-up.
    pub fn from_lead(lead: &Lead, now: DateTime<Utc>, upcoming_days: i64) -> Option<Self> {
        let at = lead.next_followup?;
        Some(Self {
            lead_id: lead.id,
            business_name: lead.business_name.clone(),
            owner_name: lead.owner_name.clone(),
            phone: format_phone_number(&lead.phone),
            priority: lead.followup_priority,
            notes: lead.followup_notes.clone(),
            due_state: lead_due_state(lead, now, upcoming_days),
            scheduled_for: at.to_wire(),
            followup: followup_display(lead),
        })
    }
}

pub fn followup_display(lead: &Lead) -> FollowupDisplay {
    let stored = lead
        .next_followup
        .map(|at| at.to_wire())
        .unwrap_or_default();
    format_for_display(&stored, &lead.client_timezone)
}
