use crate::domain::lead::Lead;
use crate::error::CoreError;
use crate::followup::CivilTimestamp;
use chrono::{DateTime, Duration, NaiveDateTime, Utc};
use serde::{Deserialize, Serialize};

pub const MAX_UPCOMING_DAYS: i64 = 365;
pub const DEFAULT_UPCOMING_DAYS: i64 = 7;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DueState {
    Unscheduled,
    /// At or before the current civil time in the lead's zone.
    Overdue,
    Upcoming,
    Later,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DueSelector {
    Overdue,
    Upcoming,
    Any,
    None,
}

impl DueSelector {
    pub fn matches(&self, state: DueState) -> bool {
        match self {
            DueSelector::Overdue => state == DueState::Overdue,
            DueSelector::Upcoming => state == DueState::Upcoming,
            DueSelector::Any => state != DueState::Unscheduled,
            DueSelector::None => state == DueState::Unscheduled,
        }
    }
}

pub fn compute_due_state(
    next_followup: Option<CivilTimestamp>,
    civil_now: NaiveDateTime,
    upcoming_days: i64,
) -> DueState {
    let next = match next_followup {
        Some(value) => value.as_naive(),
        None => return DueState::Unscheduled,
    };

    if next <= civil_now {
        return DueState::Overdue;
    }

    if next <= civil_now + Duration::days(upcoming_days) {
        return DueState::Upcoming;
    }

    DueState::Later
}

/// Reads the follow-up against the wall clock in the lead's own zone.
pub fn lead_due_state(lead: &Lead, now: DateTime<Utc>, upcoming_days: i64) -> DueState {
    compute_due_state(lead.next_followup, lead.civil_now(now), upcoming_days)
}

pub fn validate_upcoming_days(days: i64) -> Result<i64, CoreError> {
    if days <= 0 || days > MAX_UPCOMING_DAYS {
        return Err(CoreError::InvalidUpcomingDays(days));
    }
    Ok(days)
}
