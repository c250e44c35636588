//! Lead form flags shared by `add-lead`, `edit-lead` and `draft save`.

use crate::error::invalid_input;
use crate::util::{non_empty, parse_amount, parse_position};
use anyhow::Result;
use chrono::{DateTime, NaiveTime, Utc};
use clap::Args;
use leadline_core::domain::{
    canonical_business_type, normalize_email, FollowupPriority, LeadDraft, PaybackTime, Stage,
};
use leadline_core::followup::{compose_with_default, decompose};
use leadline_core::timezone::parse_state_code;
use std::str::FromStr;

/// Every flag is optional; an empty string clears an optional text field.
#[derive(Debug, Default, Args)]
pub struct LeadFieldArgs {
    #[arg(long)]
    pub business: Option<String>,
    #[arg(long)]
    pub owner: Option<String>,
    #[arg(long)]
    pub phone: Option<String>,
    #[arg(long)]
    pub email: Option<String>,
    #[arg(long = "type")]
    pub business_type: Option<String>,
    #[arg(long = "type-details")]
    pub business_type_details: Option<String>,
    #[arg(long)]
    pub credit_score: Option<i32>,
    #[arg(long, value_name = "USD")]
    pub funding: Option<String>,
    #[arg(long, value_name = "USD")]
    pub revenue: Option<String>,
    #[arg(long)]
    pub purpose: Option<String>,
    /// 3, 6, 9, 12 or 18 (months)
    #[arg(long)]
    pub payback: Option<String>,
    #[arg(long = "position", value_name = "LENDER:ORIGINAL:BALANCE[:FREQUENCY]")]
    pub positions: Vec<String>,
    #[arg(long, conflicts_with = "positions")]
    pub clear_positions: bool,
    #[arg(long, value_name = "BOOL")]
    pub mca_history: Option<bool>,
    #[arg(long, value_name = "BOOL")]
    pub defaults: Option<bool>,
    #[arg(long)]
    pub default_details: Option<String>,
    #[arg(long)]
    pub stage: Option<String>,
    /// YYYY-MM-DD; empty clears the follow-up
    #[arg(long)]
    pub followup_date: Option<String>,
    /// HH:MM, 24-hour; alone it moves the scheduled follow-up within its day
    #[arg(long)]
    pub followup_time: Option<String>,
    /// Needs a follow-up date
    #[arg(long)]
    pub priority: Option<String>,
    /// Needs a follow-up date
    #[arg(long)]
    pub followup_notes: Option<String>,
    /// Appended to the lead's notes with a timestamp
    #[arg(long)]
    pub notes: Option<String>,
    #[arg(long)]
    pub timezone: Option<String>,
    #[arg(long)]
    pub city: Option<String>,
    /// Two-letter code; also sets the zone unless --timezone is given
    #[arg(long)]
    pub state: Option<String>,
}

impl LeadFieldArgs {
    /// Writes the given flags over `draft`. Returns whether any flag was set.
    pub fn apply(
        self,
        draft: &mut LeadDraft,
        default_time: NaiveTime,
        now: DateTime<Utc>,
    ) -> Result<bool> {
        let mut changed = false;

        if let Some(business) = self.business {
            draft.business_name = business.trim().to_string();
            changed = true;
        }
        if let Some(owner) = self.owner {
            draft.owner_name = owner.trim().to_string();
            changed = true;
        }
        if let Some(phone) = self.phone {
            draft.phone = phone.trim().to_string();
            changed = true;
        }
        if let Some(email) = self.email {
            draft.email = normalize_email(&email);
            changed = true;
        }
        if let Some(business_type) = self.business_type {
            draft.business_type = non_empty(business_type).map(|value| {
                canonical_business_type(&value)
                    .map(str::to_string)
                    .unwrap_or(value)
            });
            changed = true;
        }
        if let Some(details) = self.business_type_details {
            draft.business_type_details = non_empty(details);
            changed = true;
        }
        if let Some(score) = self.credit_score {
            draft.credit_score = Some(score);
            changed = true;
        }
        if let Some(funding) = self.funding {
            draft.funding_amount = parse_amount(&funding)?;
            changed = true;
        }
        if let Some(revenue) = self.revenue {
            draft.monthly_revenue = parse_amount(&revenue)?;
            changed = true;
        }
        if let Some(purpose) = self.purpose {
            draft.funding_purpose = non_empty(purpose);
            changed = true;
        }
        if let Some(payback) = self.payback {
            draft.payback_time = match non_empty(payback) {
                Some(value) => Some(PaybackTime::from_str(&value)?),
                None => None,
            };
            changed = true;
        }
        if self.clear_positions {
            draft.current_positions.clear();
            changed = true;
        } else if !self.positions.is_empty() {
            draft.current_positions = self
                .positions
                .iter()
                .map(|raw| parse_position(raw))
                .collect::<Result<Vec<_>>>()?;
            changed = true;
        }
        if let Some(history) = self.mca_history {
            draft.has_mca_history = history;
            changed = true;
        }
        if let Some(defaults) = self.defaults {
            draft.has_defaults = defaults;
            changed = true;
        }
        if let Some(details) = self.default_details {
            draft.default_details = non_empty(details);
            changed = true;
        }
        if let Some(stage) = self.stage {
            draft.stage = Stage::from_str(&stage)?;
            changed = true;
        }
        if let Some(date) = self.followup_date {
            draft.next_followup =
                compose_with_default(&date, self.followup_time.as_deref(), default_time)?;
            if draft.next_followup.is_none() {
                draft.clear_followup();
            }
            changed = true;
        } else if let Some(time) = self.followup_time {
            let current = draft
                .next_followup
                .ok_or_else(|| invalid_input("--followup-time needs a follow-up date"))?;
            let parts = decompose(&current.to_wire())?;
            draft.next_followup =
                compose_with_default(&parts.date, Some(time.as_str()), default_time)?;
            changed = true;
        }
        if (self.priority.is_some() || self.followup_notes.is_some())
            && draft.next_followup.is_none()
        {
            return Err(invalid_input(
                "follow-up priority and notes need a follow-up date",
            ));
        }
        if let Some(priority) = self.priority {
            draft.followup_priority = FollowupPriority::from_str(&priority)?;
            changed = true;
        }
        if let Some(notes) = self.followup_notes {
            draft.followup_notes = non_empty(notes);
            changed = true;
        }
        if let Some(city) = self.city {
            draft.client_city = non_empty(city);
            changed = true;
        }
        if let Some(state) = self.state {
            draft.client_state = match non_empty(state) {
                Some(code) => Some(parse_state_code(&code)?.code.to_string()),
                None => None,
            };
            if self.timezone.is_none() {
                draft.apply_state_timezone();
            }
            changed = true;
        }
        if let Some(timezone) = self.timezone {
            draft.client_timezone = timezone.trim().to_string();
            changed = true;
        }
        // Stamped last so the entry uses the zone set above.
        if let Some(note) = self.notes.and_then(non_empty) {
            draft.add_note(&note, now);
            changed = true;
        }

        Ok(changed)
    }
}
