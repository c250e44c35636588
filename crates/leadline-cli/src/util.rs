use anyhow::{anyhow, Result};
use leadline_core::domain::{LeadId, PaymentFrequency, Position};
use leadline_core::rules::DueState;
use std::str::FromStr;

pub use leadline_core::time::now_utc;

pub fn parse_lead_id(raw: &str) -> Result<LeadId> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Err(anyhow!("lead id cannot be empty"));
    }
    LeadId::from_str(trimmed).map_err(|_| anyhow!("invalid lead id"))
}

/// Whole dollars; `$` and thousands separators are ignored.
pub fn parse_amount(raw: &str) -> Result<i64> {
    let cleaned: String = raw
        .trim()
        .chars()
        .filter(|ch| !matches!(ch, '$' | ','))
        .collect();
    cleaned
        .parse::<i64>()
        .map_err(|_| anyhow!("invalid amount: {}", raw.trim()))
}

/// `LENDER:ORIGINAL:BALANCE[:FREQUENCY]`, frequency defaulting to daily.
pub fn parse_position(raw: &str) -> Result<Position> {
    let parts: Vec<&str> = raw.split(':').map(str::trim).collect();
    let (lender, original, balance, frequency) = match parts.as_slice() {
        [lender, original, balance] => (*lender, *original, *balance, None),
        [lender, original, balance, frequency] => (*lender, *original, *balance, Some(*frequency)),
        _ => {
            return Err(anyhow!(
                "invalid position: expected LENDER:ORIGINAL:BALANCE[:FREQUENCY]"
            ))
        }
    };
    let frequency = match frequency {
        Some(value) => PaymentFrequency::from_str(value)?,
        None => PaymentFrequency::Daily,
    };
    Ok(Position::new(
        lender,
        parse_amount(original)?,
        parse_amount(balance)?,
        frequency,
    ))
}

pub fn due_state_label(state: DueState) -> &'static str {
    match state {
        DueState::Unscheduled => "unscheduled",
        DueState::Overdue => "due",
        DueState::Upcoming => "upcoming",
        DueState::Later => "later",
    }
}

pub fn non_empty(value: String) -> Option<String> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_string())
    }
}
