use crate::domain::phone::strip_phone_formatting;
use crate::domain::Lead;
use crate::filter::ast::{AmountField, FilterExpr};
use crate::rules::lead_due_state;
use chrono::{DateTime, Utc};

/// Clock and window needed by `due:` terms.
#[derive(Debug, Clone, Copy)]
pub struct FilterContext {
    pub now: DateTime<Utc>,
    pub upcoming_days: i64,
}

pub fn matches_filter(filter: &FilterExpr, lead: &Lead, ctx: &FilterContext) -> bool {
    match filter {
        FilterExpr::Text(term) => matches_text(lead, term),
        FilterExpr::Stage(stage) => lead.stage == *stage,
        FilterExpr::Priority(priority) => lead.followup_priority == *priority,
        FilterExpr::BusinessType(wanted) => lead
            .business_type
            .as_deref()
            .is_some_and(|value| contains_ignore_case(value, wanted)),
        FilterExpr::Payback(payback) => lead.payback_time == Some(*payback),
        FilterExpr::McaHistory(flag) => lead.has_mca_history == *flag,
        FilterExpr::Due(selector) => {
            selector.matches(lead_due_state(lead, ctx.now, ctx.upcoming_days))
        }
        FilterExpr::Amount { field, cmp, value } => {
            let actual = match field {
                AmountField::Funding => Some(lead.funding_amount),
                AmountField::Revenue => Some(lead.monthly_revenue),
                AmountField::Credit => lead.credit_score.map(i64::from),
            };
            actual.is_some_and(|actual| cmp.holds(actual, *value))
        }
        FilterExpr::And(terms) => terms.iter().all(|term| matches_filter(term, lead, ctx)),
    }
}

fn matches_text(lead: &Lead, term: &str) -> bool {
    if contains_ignore_case(&lead.business_name, term)
        || contains_ignore_case(&lead.owner_name, term)
        || lead
            .email
            .as_deref()
            .is_some_and(|email| contains_ignore_case(email, term))
    {
        return true;
    }
    let phone = strip_phone_formatting(&lead.phone);
    let term = strip_phone_formatting(term);
    !term.is_empty() && phone.contains(&term)
}

fn contains_ignore_case(haystack: &str, needle: &str) -> bool {
    haystack.to_lowercase().contains(&needle.to_lowercase())
}
