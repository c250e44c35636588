use crate::time::{parse_civil_date, parse_civil_time, TimeParseError};
use chrono::{NaiveDate, NaiveDateTime, NaiveTime, Timelike};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;

/// A follow-up time as literal wall-clock digits.
///
/// The wire form is `YYYY-MM-DDTHH:MM:SS.000Z`. The trailing `Z` is only a
/// format marker kept for storage compatibility; the digits are never shifted
/// by any zone on the way in or out.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct CivilTimestamp(NaiveDateTime);

impl CivilTimestamp {
    pub fn new(value: NaiveDateTime) -> Self {
        let value = value.with_nanosecond(0).unwrap_or(value);
        Self(value)
    }

    pub fn from_parts(date: NaiveDate, time: NaiveTime) -> Self {
        Self::new(date.and_time(time))
    }

    pub fn as_naive(&self) -> NaiveDateTime {
        self.0
    }

    pub fn date(&self) -> NaiveDate {
        self.0.date()
    }

    pub fn time(&self) -> NaiveTime {
        self.0.time()
    }

    pub fn to_wire(&self) -> String {
        self.0.format("%Y-%m-%dT%H:%M:%S.000Z").to_string()
    }

    /// Reads any stored shape by splitting the string; never goes through an
    /// instant, so the process timezone cannot leak in.
    pub fn parse_wire(raw: &str) -> Result<Self, TimeParseError> {
        let (date_part, clock_part) = split_stored(raw)?;
        let invalid = || TimeParseError::InvalidTimestamp(raw.trim().to_string());
        let date = parse_civil_date(date_part).map_err(|_| invalid())?;
        let time = parse_civil_time(clock_part).map_err(|_| invalid())?;
        Ok(Self::from_parts(date, time))
    }
}

/// Splits a stored value into its date and `HH:MM[:SS]` halves. A bare date
/// reads as midnight.
pub(crate) fn split_stored(raw: &str) -> Result<(&str, &str), TimeParseError> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Err(TimeParseError::Empty);
    }
    let (date_part, rest) = match trimmed.split_once('T') {
        Some((date, rest)) => (date, rest),
        None => (trimmed, "00:00:00"),
    };
    let rest = rest.strip_suffix('Z').unwrap_or(rest);
    let clock = match rest.split_once('.') {
        Some((clock, fraction)) => {
            if fraction.is_empty() || !fraction.chars().all(|ch| ch.is_ascii_digit()) {
                return Err(TimeParseError::InvalidTimestamp(trimmed.to_string()));
            }
            clock
        }
        None => rest,
    };
    Ok((date_part, clock))
}

impl fmt::Display for CivilTimestamp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_wire())
    }
}

impl FromStr for CivilTimestamp {
    type Err = TimeParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse_wire(s)
    }
}

impl Serialize for CivilTimestamp {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_wire())
    }
}

impl<'de> Deserialize<'de> for CivilTimestamp {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        Self::parse_wire(&raw).map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::CivilTimestamp;
    use crate::time::TimeParseError;

    #[test]
    fn wire_form_keeps_digits() {
        let ts = CivilTimestamp::parse_wire("2025-03-10T14:30:00.000Z").unwrap();
        assert_eq!(ts.to_wire(), "2025-03-10T14:30:00.000Z");
    }

    #[test]
    fn parse_wire_accepts_legacy_shapes() {
        for raw in [
            "2025-03-10T14:30",
            "2025-03-10T14:30:00",
            "2025-03-10T14:30:00Z",
            "2025-03-10T14:30:00.123Z",
        ] {
            let ts = CivilTimestamp::parse_wire(raw).unwrap();
            assert_eq!(ts.to_wire(), "2025-03-10T14:30:00.000Z", "{raw}");
        }
        let date_only = CivilTimestamp::parse_wire("2025-03-10").unwrap();
        assert_eq!(date_only.to_wire(), "2025-03-10T00:00:00.000Z");
    }

    #[test]
    fn parse_wire_rejects_offsets_and_garbage() {
        assert!(CivilTimestamp::parse_wire("2025-03-10T14:30:00+02:00").is_err());
        assert!(CivilTimestamp::parse_wire("2025-13-10T14:30").is_err());
        assert!(CivilTimestamp::parse_wire("tomorrow").is_err());
        assert_eq!(CivilTimestamp::parse_wire(""), Err(TimeParseError::Empty));
    }

    #[test]
    fn serde_uses_wire_form() {
        let ts = CivilTimestamp::parse_wire("2025-12-01T09:00").unwrap();
        let json = serde_json::to_string(&ts).unwrap();
        assert_eq!(json, "\"2025-12-01T09:00:00.000Z\"");
        let back: CivilTimestamp = serde_json::from_str(&json).unwrap();
        assert_eq!(back, ts);
    }
}
