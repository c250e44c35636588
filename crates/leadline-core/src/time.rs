use chrono::{DateTime, Duration, NaiveDate, NaiveDateTime, NaiveTime, SubsecRound, Utc};
use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum TimeParseError {
    #[error("timestamp cannot be empty")]
    Empty,
    #[error("invalid date format: expected YYYY-MM-DD")]
    InvalidDateFormat,
    #[error("invalid time format: expected HH:MM")]
    InvalidTimeFormat,
    #[error("invalid stored timestamp: {0}")]
    InvalidTimestamp(String),
}

pub fn now_utc() -> DateTime<Utc> {
    Utc::now()
}

pub fn parse_civil_date(raw: &str) -> Result<NaiveDate, TimeParseError> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Err(TimeParseError::Empty);
    }
    NaiveDate::parse_from_str(trimmed, "%Y-%m-%d").map_err(|_| TimeParseError::InvalidDateFormat)
}

/// `HH:MM`, or `HH:MM:SS` as stored.
pub fn parse_civil_time(raw: &str) -> Result<NaiveTime, TimeParseError> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Err(TimeParseError::Empty);
    }
    NaiveTime::parse_from_str(trimmed, "%H:%M")
        .or_else(|_| NaiveTime::parse_from_str(trimmed, "%H:%M:%S"))
        .map_err(|_| TimeParseError::InvalidTimeFormat)
}

/// `[3/7/2025]`
pub fn note_date_stamp(civil: NaiveDateTime) -> String {
    format!("[{}]", civil.format("%-m/%-d/%Y"))
}

/// `[3/7/2025, 2:30 PM]`
pub fn note_datetime_stamp(civil: NaiveDateTime) -> String {
    format!("[{}]", civil.format("%-m/%-d/%Y, %-I:%M %p"))
}

/// Returns `candidate` at microsecond resolution unless it does not move past
/// `last`, in which case the next microsecond after `last` is used. Keeps
/// audit stamps strictly ordered when two writes land inside the same tick.
pub fn strictly_after(candidate: DateTime<Utc>, last: Option<DateTime<Utc>>) -> DateTime<Utc> {
    let candidate = candidate.trunc_subsecs(6);
    match last {
        Some(last) if candidate <= last => last + Duration::microseconds(1),
        _ => candidate,
    }
}

#[cfg(test)]
mod tests {
    use super::{
        note_date_stamp, note_datetime_stamp, parse_civil_date, parse_civil_time, strictly_after,
        TimeParseError,
    };
    use chrono::{Duration, NaiveDate, TimeZone, Utc};

    #[test]
    fn parse_civil_date_rejects_empty_and_garbage() {
        assert_eq!(parse_civil_date(" "), Err(TimeParseError::Empty));
        assert_eq!(
            parse_civil_date("12/01/2025"),
            Err(TimeParseError::InvalidDateFormat)
        );
        assert!(parse_civil_date("2025-12-01").is_ok());
    }

    #[test]
    fn parse_civil_time_accepts_minutes_and_seconds() {
        assert!(parse_civil_time("09:00").is_ok());
        assert!(parse_civil_time("09:00:30").is_ok());
        assert_eq!(
            parse_civil_time("9am"),
            Err(TimeParseError::InvalidTimeFormat)
        );
    }

    #[test]
    fn note_stamps_use_us_ordering() {
        let civil = NaiveDate::from_ymd_opt(2025, 3, 7)
            .unwrap()
            .and_hms_opt(14, 30, 0)
            .unwrap();
        assert_eq!(note_date_stamp(civil), "[3/7/2025]");
        assert_eq!(note_datetime_stamp(civil), "[3/7/2025, 2:30 PM]");
    }

    #[test]
    fn strictly_after_bumps_collisions() {
        let now = Utc.with_ymd_and_hms(2025, 1, 1, 0, 0, 0).unwrap();
        assert_eq!(strictly_after(now, None), now);
        assert_eq!(strictly_after(now, Some(now)), now + Duration::microseconds(1));
        let later = now + Duration::seconds(1);
        assert_eq!(strictly_after(later, Some(now)), later);
        let nanos = now + Duration::nanoseconds(1_500);
        assert_eq!(strictly_after(nanos, None), now + Duration::microseconds(1));
    }
}
