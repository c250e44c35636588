use crate::domain::{Lead, Stage};
use crate::rules::{lead_due_state, DueState};
use chrono::{DateTime, Utc};
use serde::Serialize;

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct LeadStatistics {
    pub total_leads: usize,
    pub prospects: usize,
    pub active_leads: usize,
    pub closed_leads: usize,
    pub total_funding_requested: i64,
    /// Rounded mean over leads that have a score.
    pub avg_credit_score: Option<i32>,
    pub followups_due: usize,
    pub followups_upcoming: usize,
}

pub fn lead_statistics(leads: &[Lead], now: DateTime<Utc>, upcoming_days: i64) -> LeadStatistics {
    let mut stats = LeadStatistics {
        total_leads: leads.len(),
        ..LeadStatistics::default()
    };
    let mut score_sum: i64 = 0;
    let mut score_count: i64 = 0;

    for lead in leads {
        match lead.stage {
            Stage::Prospect => stats.prospects += 1,
            Stage::Closed => stats.closed_leads += 1,
            stage if stage.is_in_pipeline() => stats.active_leads += 1,
            _ => {}
        }
        stats.total_funding_requested = stats
            .total_funding_requested
            .saturating_add(lead.funding_amount);
        if let Some(score) = lead.credit_score {
            score_sum += i64::from(score);
            score_count += 1;
        }
        match lead_due_state(lead, now, upcoming_days) {
            DueState::Overdue => stats.followups_due += 1,
            DueState::Upcoming => stats.followups_upcoming += 1,
            DueState::Unscheduled | DueState::Later => {}
        }
    }

    if score_count > 0 {
        let mean = (score_sum * 2 + score_count) / (score_count * 2);
        stats.avg_credit_score = i32::try_from(mean).ok();
    }
    stats
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct PositionSummary {
    pub count: usize,
    pub total_original: i64,
    pub total_balance: i64,
}

/// Totals over positions that name a lender. Sums saturate, as in
/// [`lead_statistics`].
pub fn position_summary(lead: &Lead) -> PositionSummary {
    lead.active_positions()
        .fold(PositionSummary::default(), |mut summary, position| {
            summary.count += 1;
            summary.total_original = summary
                .total_original
                .saturating_add(position.original_amount);
            summary.total_balance = summary
                .total_balance
                .saturating_add(position.current_balance);
            summary
        })
}
