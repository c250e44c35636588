use super::timestamp::CivilTimestamp;
use crate::timezone::{resolve_tz, zone_info};
use serde::Serialize;

pub const NOT_SCHEDULED: &str = "Not scheduled";
pub const INVALID_DATE: &str = "Invalid date";

/// Human-readable pieces of a stored follow-up.
///
/// `date` and `time` are the literal digits: the time the lead should be
/// contacted in the lead's own locale. `zone_clock` reads the same digits as a
/// UTC instant and renders them in the lead's zone; it feeds "time there"
/// widgets only and is never the authoritative follow-up time.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FollowupDisplay {
    pub date: String,
    pub time: String,
    pub zone_clock: String,
    pub zone_label: String,
    pub zone_abbreviation: String,
}

impl FollowupDisplay {
    fn sentinel(date: &str) -> Self {
        Self {
            date: date.to_string(),
            time: String::new(),
            zone_clock: String::new(),
            zone_label: String::new(),
            zone_abbreviation: String::new(),
        }
    }

    pub fn is_scheduled(&self) -> bool {
        self.date != NOT_SCHEDULED && self.date != INVALID_DATE
    }
}

pub fn format_for_display(stored: &str, zone: &str) -> FollowupDisplay {
    if stored.trim().is_empty() {
        return FollowupDisplay::sentinel(NOT_SCHEDULED);
    }
    let Ok(ts) = CivilTimestamp::parse_wire(stored) else {
        return FollowupDisplay::sentinel(INVALID_DATE);
    };

    let info = zone_info(zone);
    let converted = ts.as_naive().and_utc().with_timezone(&resolve_tz(info.id));
    FollowupDisplay {
        date: ts.date().format("%m/%d/%Y").to_string(),
        time: ts.time().format("%-I:%M %p").to_string(),
        zone_clock: format!("{} {}", converted.format("%-I:%M %p"), info.abbreviation),
        zone_label: info.label.to_string(),
        zone_abbreviation: info.abbreviation.to_string(),
    }
}
