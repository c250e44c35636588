use crate::domain::followup::{FollowupKind, FollowupPriority};
use crate::domain::ids::LeadId;
use crate::domain::payback::PaybackTime;
use crate::domain::position::Position;
use crate::domain::stage::Stage;
use crate::error::ValidationError;
use crate::followup::{ensure_future, CivilTimestamp};
use crate::rules::validation::{validate_lead_fields, LeadFields};
use crate::time::{note_date_stamp, note_datetime_stamp};
use crate::timezone::{civil_now_in_zone, zone_for_state, DEFAULT_ZONE};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Everything a caller supplies for a lead. Missing keys deserialize to the
/// add-lead form defaults so partial drafts can be cached.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LeadDraft {
    pub business_name: String,
    pub owner_name: String,
    pub phone: String,
    pub email: Option<String>,
    pub business_type: Option<String>,
    pub business_type_details: Option<String>,
    pub credit_score: Option<i32>,
    pub funding_amount: i64,
    pub monthly_revenue: i64,
    pub funding_purpose: Option<String>,
    pub payback_time: Option<PaybackTime>,
    pub current_positions: Vec<Position>,
    pub has_mca_history: bool,
    pub has_defaults: bool,
    pub default_details: Option<String>,
    pub stage: Stage,
    pub next_followup: Option<CivilTimestamp>,
    pub followup_priority: FollowupPriority,
    pub followup_notes: Option<String>,
    pub internal_notes: String,
    pub client_timezone: String,
    pub client_city: Option<String>,
    pub client_state: Option<String>,
}

impl Default for LeadDraft {
    fn default() -> Self {
        Self {
            business_name: String::new(),
            owner_name: String::new(),
            phone: String::new(),
            email: None,
            business_type: None,
            business_type_details: None,
            credit_score: None,
            funding_amount: 0,
            monthly_revenue: 0,
            funding_purpose: None,
            payback_time: None,
            current_positions: Vec::new(),
            has_mca_history: false,
            has_defaults: false,
            default_details: None,
            stage: Stage::Prospect,
            next_followup: None,
            followup_priority: FollowupPriority::Medium,
            followup_notes: None,
            internal_notes: String::new(),
            client_timezone: DEFAULT_ZONE.to_string(),
            client_city: None,
            client_state: None,
        }
    }
}

impl LeadDraft {
    pub fn validate(&self) -> Result<(), ValidationError> {
        validate_lead_fields(&LeadFields {
            business_name: &self.business_name,
            owner_name: &self.owner_name,
            phone: &self.phone,
            email: self.email.as_deref(),
            credit_score: self.credit_score,
            funding_amount: self.funding_amount,
            monthly_revenue: self.monthly_revenue,
            positions: &self.current_positions,
            client_timezone: &self.client_timezone,
        })
    }

    /// Sets `client_timezone` from `client_state` when a state is present.
    pub fn apply_state_timezone(&mut self) {
        if let Some(state) = self.client_state.as_deref().filter(|s| !s.trim().is_empty()) {
            self.client_timezone = zone_for_state(state).to_string();
        }
    }

    /// Drops the follow-up along with the priority and notes that only mean
    /// something while one is scheduled.
    pub fn clear_followup(&mut self) {
        self.next_followup = None;
        self.followup_priority = FollowupPriority::Medium;
        self.followup_notes = None;
    }

    /// Appends `[M/D/YYYY, h:MM AM] text` to `internal_notes`, stamped in the
    /// draft's zone.
    pub fn add_note(&mut self, text: &str, now: DateTime<Utc>) {
        let stamp = note_datetime_stamp(civil_now_in_zone(&self.client_timezone, now));
        append_paragraph(&mut self.internal_notes, &format!("{stamp} {}", text.trim()));
    }

    /// The follow-up must not already have passed in the lead's own zone.
    pub fn ensure_followup_in_future(&self, now: DateTime<Utc>) -> Result<(), ValidationError> {
        if let Some(at) = self.next_followup {
            ensure_future(at, civil_now_in_zone(&self.client_timezone, now))?;
        }
        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Lead {
    pub id: LeadId,
    pub business_name: String,
    pub owner_name: String,
    pub phone: String,
    pub email: Option<String>,
    pub business_type: Option<String>,
    pub business_type_details: Option<String>,
    pub credit_score: Option<i32>,
    pub funding_amount: i64,
    pub monthly_revenue: i64,
    pub funding_purpose: Option<String>,
    pub payback_time: Option<PaybackTime>,
    pub current_positions: Vec<Position>,
    pub has_mca_history: bool,
    pub has_defaults: bool,
    pub default_details: Option<String>,
    pub stage: Stage,
    pub next_followup: Option<CivilTimestamp>,
    pub followup_priority: FollowupPriority,
    pub followup_notes: Option<String>,
    pub internal_notes: String,
    pub client_timezone: String,
    pub client_city: Option<String>,
    pub client_state: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Input for the schedule-follow-up workflow.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FollowupSchedule {
    pub at: CivilTimestamp,
    pub kind: FollowupKind,
    pub priority: FollowupPriority,
    pub notes: Option<String>,
}

impl Lead {
    pub fn from_draft(id: LeadId, now: DateTime<Utc>, draft: LeadDraft) -> Self {
        let mut lead = Self {
            id,
            business_name: String::new(),
            owner_name: String::new(),
            phone: String::new(),
            email: None,
            business_type: None,
            business_type_details: None,
            credit_score: None,
            funding_amount: 0,
            monthly_revenue: 0,
            funding_purpose: None,
            payback_time: None,
            current_positions: Vec::new(),
            has_mca_history: false,
            has_defaults: false,
            default_details: None,
            stage: Stage::Prospect,
            next_followup: None,
            followup_priority: FollowupPriority::Medium,
            followup_notes: None,
            internal_notes: String::new(),
            client_timezone: String::new(),
            client_city: None,
            client_state: None,
            created_at: now,
            updated_at: now,
        };
        lead.apply_draft(draft);
        lead
    }

    /// Overwrites every editable field. `id` and the audit stamps are kept.
    pub fn apply_draft(&mut self, draft: LeadDraft) {
        self.business_name = draft.business_name;
        self.owner_name = draft.owner_name;
        self.phone = draft.phone;
        self.email = draft.email;
        self.business_type = draft.business_type;
        self.business_type_details = draft.business_type_details;
        self.credit_score = draft.credit_score;
        self.funding_amount = draft.funding_amount;
        self.monthly_revenue = draft.monthly_revenue;
        self.funding_purpose = draft.funding_purpose;
        self.payback_time = draft.payback_time;
        self.current_positions = draft.current_positions;
        self.has_mca_history = draft.has_mca_history;
        self.has_defaults = draft.has_defaults;
        self.default_details = draft.default_details;
        self.stage = draft.stage;
        self.next_followup = draft.next_followup;
        self.followup_priority = draft.followup_priority;
        self.followup_notes = draft.followup_notes;
        self.internal_notes = draft.internal_notes;
        self.client_timezone = draft.client_timezone;
        self.client_city = draft.client_city;
        self.client_state = draft.client_state;
    }

    pub fn to_draft(&self) -> LeadDraft {
        LeadDraft {
            business_name: self.business_name.clone(),
            owner_name: self.owner_name.clone(),
            phone: self.phone.clone(),
            email: self.email.clone(),
            business_type: self.business_type.clone(),
            business_type_details: self.business_type_details.clone(),
            credit_score: self.credit_score,
            funding_amount: self.funding_amount,
            monthly_revenue: self.monthly_revenue,
            funding_purpose: self.funding_purpose.clone(),
            payback_time: self.payback_time,
            current_positions: self.current_positions.clone(),
            has_mca_history: self.has_mca_history,
            has_defaults: self.has_defaults,
            default_details: self.default_details.clone(),
            stage: self.stage,
            next_followup: self.next_followup,
            followup_priority: self.followup_priority,
            followup_notes: self.followup_notes.clone(),
            internal_notes: self.internal_notes.clone(),
            client_timezone: self.client_timezone.clone(),
            client_city: self.client_city.clone(),
            client_state: self.client_state.clone(),
        }
    }

    pub fn validate(&self) -> Result<(), ValidationError> {
        validate_lead_fields(&LeadFields {
            business_name: &self.business_name,
            owner_name: &self.owner_name,
            phone: &self.phone,
            email: self.email.as_deref(),
            credit_score: self.credit_score,
            funding_amount: self.funding_amount,
            monthly_revenue: self.monthly_revenue,
            positions: &self.current_positions,
            client_timezone: &self.client_timezone,
        })
    }

    pub fn active_positions(&self) -> impl Iterator<Item = &Position> {
        self.current_positions.iter().filter(|p| p.is_active())
    }

    /// Appends a paragraph to `internal_notes`.
    pub fn append_note(&mut self, entry: &str) {
        append_paragraph(&mut self.internal_notes, entry);
    }

    /// A free-form note, stamped with the date and time in the lead's zone.
    pub fn add_note(&mut self, text: &str, now: DateTime<Utc>) {
        let stamp = note_datetime_stamp(self.civil_now(now));
        self.append_note(&format!("{stamp} {}", text.trim()));
    }

    pub fn clear_followup(&mut self) {
        self.next_followup = None;
        self.followup_priority = FollowupPriority::Medium;
        self.followup_notes = None;
    }

    pub fn change_stage(&mut self, stage: Stage, now: DateTime<Utc>) {
        self.stage = stage;
        let stamp = note_date_stamp(self.civil_now(now));
        self.append_note(&format!("{stamp} Stage updated to: {}", stage.label()));
    }

    pub fn schedule_followup(
        &mut self,
        schedule: FollowupSchedule,
        now: DateTime<Utc>,
    ) -> Result<(), ValidationError> {
        let civil_now = self.civil_now(now);
        let at = ensure_future(schedule.at, civil_now)?;
        let notes = schedule
            .notes
            .map(|notes| notes.trim().to_string())
            .filter(|notes| !notes.is_empty());

        let mut entry = format!(
            "{} Follow-up scheduled for {} - {}",
            note_date_stamp(civil_now),
            at.as_naive().format("%m/%d/%Y %-I:%M %p"),
            schedule.kind
        );
        if let Some(notes) = notes.as_deref() {
            entry.push_str(" - ");
            entry.push_str(notes);
        }

        self.next_followup = Some(at);
        self.followup_priority = schedule.priority;
        self.followup_notes = notes;
        self.append_note(&entry);
        Ok(())
    }

    pub fn complete_followup(&mut self, now: DateTime<Utc>) {
        self.clear_followup();
        let stamp = note_datetime_stamp(self.civil_now(now));
        self.append_note(&format!("{stamp} Follow-up completed."));
    }

    pub fn mark_high_priority(&mut self, now: DateTime<Utc>) {
        let stamp = note_date_stamp(self.civil_now(now));
        self.append_note(&format!("{stamp} Marked as HIGH PRIORITY lead"));
    }

    /// Wall clock in the lead's zone; note stamps and the past-follow-up
    /// check both read it.
    pub fn civil_now(&self, now: DateTime<Utc>) -> chrono::NaiveDateTime {
        civil_now_in_zone(&self.client_timezone, now)
    }
}

fn append_paragraph(notes: &mut String, entry: &str) {
    if !notes.is_empty() {
        notes.push_str("\n\n");
    }
    notes.push_str(entry);
}

#[cfg(test)]
mod tests {
    use super::{FollowupSchedule, Lead, LeadDraft};
    use crate::domain::followup::{FollowupKind, FollowupPriority};
    use crate::domain::ids::LeadId;
    use crate::domain::stage::Stage;
    use crate::error::ValidationError;
    use crate::followup::compose;
    use chrono::{TimeZone, Utc};

    fn lead() -> Lead {
        let draft = LeadDraft {
            business_name: "Sunrise Bakery".to_string(),
            owner_name: "Maria Lopez".to_string(),
            phone: "(415) 555-1212".to_string(),
            client_timezone: "America/Chicago".to_string(),
            ..LeadDraft::default()
        };
        let now = Utc.with_ymd_and_hms(2025, 3, 7, 20, 30, 0).unwrap();
        Lead::from_draft(LeadId::new(), now, draft)
    }

    #[test]
    fn draft_defaults_match_new_lead_form() {
        let draft = LeadDraft::default();
        assert_eq!(draft.stage, Stage::Prospect);
        assert_eq!(draft.followup_priority, FollowupPriority::Medium);
        assert_eq!(draft.client_timezone, "America/New_York");
    }

    #[test]
    fn partial_json_draft_fills_defaults() {
        let draft: LeadDraft =
            serde_json::from_str(r#"{"business_name":"Acme","stage":"Email Sent"}"#).unwrap();
        assert_eq!(draft.business_name, "Acme");
        assert_eq!(draft.stage, Stage::EmailSent);
        assert_eq!(draft.client_timezone, "America/New_York");
    }

    #[test]
    fn draft_round_trips_through_lead() {
        let lead = lead();
        let rebuilt = Lead::from_draft(lead.id, lead.created_at, lead.to_draft());
        assert_eq!(rebuilt, lead);
    }

    #[test]
    fn state_sets_timezone() {
        let mut draft = LeadDraft {
            client_state: Some("id".to_string()),
            ..LeadDraft::default()
        };
        draft.apply_state_timezone();
        assert_eq!(draft.client_timezone, "America/Boise");
    }

    #[test]
    fn stage_change_appends_dated_note() {
        let mut lead = lead();
        lead.internal_notes = "Called twice.".to_string();
        let now = Utc.with_ymd_and_hms(2025, 3, 7, 20, 30, 0).unwrap();
        lead.change_stage(Stage::OfferPresented, now);
        assert_eq!(lead.stage, Stage::OfferPresented);
        assert_eq!(
            lead.internal_notes,
            "Called twice.\n\n[3/7/2025] Stage updated to: Offer Presented"
        );
    }

    #[test]
    fn schedule_sets_followup_and_logs_it() {
        let mut lead = lead();
        let now = Utc.with_ymd_and_hms(2025, 3, 7, 20, 30, 0).unwrap();
        let at = compose("2025-03-10", "14:30").unwrap().unwrap();
        lead.schedule_followup(
            FollowupSchedule {
                at,
                kind: FollowupKind::Call,
                priority: FollowupPriority::High,
                notes: Some("Discuss offer".to_string()),
            },
            now,
        )
        .unwrap();
        assert_eq!(lead.next_followup, Some(at));
        assert_eq!(lead.followup_priority, FollowupPriority::High);
        assert_eq!(lead.followup_notes.as_deref(), Some("Discuss offer"));
        assert_eq!(
            lead.internal_notes,
            "[3/7/2025] Follow-up scheduled for 03/10/2025 2:30 PM - call - Discuss offer"
        );
    }

    #[test]
    fn schedule_rejects_time_already_passed_in_lead_zone() {
        let mut lead = lead();
        // 20:30 UTC is 14:30 in Chicago.
        let now = Utc.with_ymd_and_hms(2025, 3, 7, 20, 30, 0).unwrap();
        let past = compose("2025-03-07", "14:29").unwrap().unwrap();
        let result = lead.schedule_followup(
            FollowupSchedule {
                at: past,
                kind: FollowupKind::Email,
                priority: FollowupPriority::Low,
                notes: None,
            },
            now,
        );
        assert!(matches!(result, Err(ValidationError::FollowupInPast(_))));
        assert!(lead.next_followup.is_none());
        assert!(lead.internal_notes.is_empty());

        let same_minute = compose("2025-03-07", "14:30").unwrap().unwrap();
        assert!(lead
            .schedule_followup(
                FollowupSchedule {
                    at: same_minute,
                    kind: FollowupKind::Email,
                    priority: FollowupPriority::Low,
                    notes: None,
                },
                now,
            )
            .is_ok());
    }

    #[test]
    fn complete_resets_followup_fields() {
        let mut lead = lead();
        lead.next_followup = compose("2025-03-10", "09:00").unwrap();
        lead.followup_priority = FollowupPriority::Urgent;
        lead.followup_notes = Some("bring offer".to_string());
        let now = Utc.with_ymd_and_hms(2025, 3, 10, 15, 5, 0).unwrap();
        lead.complete_followup(now);
        assert!(lead.next_followup.is_none());
        assert_eq!(lead.followup_priority, FollowupPriority::Medium);
        assert!(lead.followup_notes.is_none());
        assert_eq!(lead.internal_notes, "[3/10/2025, 10:05 AM] Follow-up completed.");
    }

    #[test]
    fn clearing_followup_resets_priority_and_notes() {
        let mut draft = LeadDraft {
            next_followup: compose("2025-03-10", "09:00").unwrap(),
            followup_priority: FollowupPriority::Urgent,
            followup_notes: Some("bring offer".to_string()),
            ..LeadDraft::default()
        };
        draft.clear_followup();
        assert!(draft.next_followup.is_none());
        assert_eq!(draft.followup_priority, FollowupPriority::Medium);
        assert!(draft.followup_notes.is_none());

        let mut lead = lead();
        lead.followup_priority = FollowupPriority::Low;
        lead.followup_notes = Some("call after lunch".to_string());
        lead.clear_followup();
        assert_eq!(lead.followup_priority, FollowupPriority::Medium);
        assert!(lead.followup_notes.is_none());
    }

    #[test]
    fn free_notes_are_stamped_and_appended() {
        let mut lead = lead();
        lead.internal_notes = "Called twice.".to_string();
        // 20:30 UTC is 2:30 PM in Chicago.
        let now = Utc.with_ymd_and_hms(2025, 3, 7, 20, 30, 0).unwrap();
        lead.add_note("  called back ", now);
        assert_eq!(
            lead.internal_notes,
            "Called twice.\n\n[3/7/2025, 2:30 PM] called back"
        );

        let mut draft = LeadDraft {
            client_timezone: "America/Chicago".to_string(),
            ..LeadDraft::default()
        };
        draft.add_note("wants a callback", now);
        draft.add_note("sent statements", now);
        assert_eq!(
            draft.internal_notes,
            "[3/7/2025, 2:30 PM] wants a callback\n\n[3/7/2025, 2:30 PM] sent statements"
        );
    }

    #[test]
    fn mark_high_priority_only_adds_note() {
        let mut lead = lead();
        let now = Utc.with_ymd_and_hms(2025, 3, 7, 20, 30, 0).unwrap();
        lead.mark_high_priority(now);
        assert_eq!(lead.followup_priority, FollowupPriority::Medium);
        assert_eq!(lead.internal_notes, "[3/7/2025] Marked as HIGH PRIORITY lead");
    }
}
