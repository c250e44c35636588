//! Follow-up compose/decompose. A follow-up is entered as a date, a time and
//! (separately) the lead's zone; only the date and time digits are stored.

mod display;
mod timestamp;

use crate::error::ValidationError;
use crate::time::{parse_civil_date, parse_civil_time, TimeParseError};
use chrono::{NaiveDateTime, NaiveTime, Timelike};
use serde::{Deserialize, Serialize};

pub use display::{format_for_display, FollowupDisplay, INVALID_DATE, NOT_SCHEDULED};
pub use timestamp::CivilTimestamp;

/// Time used when a follow-up is scheduled by date alone.
pub const DEFAULT_FOLLOWUP_TIME: NaiveTime = match NaiveTime::from_hms_opt(9, 0, 0) {
    Some(time) => time,
    None => panic!("09:00 is a valid time"),
};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FollowupParts {
    pub date: String,
    pub time: String,
}

/// Combines `YYYY-MM-DD` and `HH:MM` into a stored timestamp. An empty date
/// means there is no follow-up; an empty time means 09:00.
pub fn compose(date: &str, time: &str) -> Result<Option<CivilTimestamp>, TimeParseError> {
    compose_with_default(date, Some(time), DEFAULT_FOLLOWUP_TIME)
}

/// Like [`compose`], but a missing or blank time falls back to `default_time`.
pub fn compose_with_default(
    date: &str,
    time: Option<&str>,
    default_time: NaiveTime,
) -> Result<Option<CivilTimestamp>, TimeParseError> {
    if date.trim().is_empty() {
        return Ok(None);
    }
    let date = parse_civil_date(date)?;
    let time = match time.map(str::trim).filter(|value| !value.is_empty()) {
        Some(time) => parse_civil_time(time)?,
        None => default_time,
    };
    Ok(Some(CivilTimestamp::from_parts(date, time)))
}

/// Recovers exactly the digits that were composed: `HH:MM` and `YYYY-MM-DD`.
pub fn decompose(stored: &str) -> Result<FollowupParts, TimeParseError> {
    let ts = CivilTimestamp::parse_wire(stored)?;
    Ok(FollowupParts {
        date: ts.date().format("%Y-%m-%d").to_string(),
        time: ts.time().format("%H:%M").to_string(),
    })
}

/// Rejects follow-ups earlier than the current civil minute. `civil_now` is
/// the wall clock in whatever zone the digits are meant for.
pub fn ensure_future(
    at: CivilTimestamp,
    civil_now: NaiveDateTime,
) -> Result<CivilTimestamp, ValidationError> {
    let floor = civil_now
        .with_second(0)
        .and_then(|value| value.with_nanosecond(0))
        .unwrap_or(civil_now);
    if at.as_naive() < floor {
        return Err(ValidationError::FollowupInPast(at.to_wire()));
    }
    Ok(at)
}
