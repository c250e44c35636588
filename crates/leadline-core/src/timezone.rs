//! Static US zone and state tables. Zone ids are only used to render display
//! clocks; they never move the digits of a stored follow-up.

use crate::error::CoreError;
use chrono::{DateTime, NaiveDateTime, Utc};
use chrono_tz::Tz;

pub const DEFAULT_ZONE: &str = "America/New_York";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ZoneInfo {
    pub id: &'static str,
    pub label: &'static str,
    pub abbreviation: &'static str,
    pub cities: &'static [&'static str],
    /// Other zone ids that read the same on a US wall clock.
    pub aliases: &'static [&'static str],
}

pub const ZONES: [ZoneInfo; 7] = [
    ZoneInfo {
        id: "America/New_York",
        label: "Eastern Time (New York)",
        abbreviation: "ET",
        cities: &["New York", "Miami", "Atlanta", "Boston"],
        aliases: &[],
    },
    ZoneInfo {
        id: "America/Chicago",
        label: "Central Time (Chicago)",
        abbreviation: "CT",
        cities: &["Chicago", "Dallas", "Houston", "Minneapolis"],
        aliases: &[],
    },
    ZoneInfo {
        id: "America/Denver",
        label: "Mountain Time (Denver)",
        abbreviation: "MT",
        cities: &["Denver", "Salt Lake City", "Albuquerque", "Boise"],
        aliases: &["America/Boise"],
    },
    ZoneInfo {
        id: "America/Los_Angeles",
        label: "Pacific Time (Los Angeles)",
        abbreviation: "PT",
        cities: &["Los Angeles", "San Francisco", "Seattle", "Las Vegas"],
        aliases: &[],
    },
    ZoneInfo {
        id: "America/Phoenix",
        label: "Arizona Time (Phoenix)",
        abbreviation: "AZ",
        cities: &["Phoenix", "Tucson"],
        aliases: &[],
    },
    ZoneInfo {
        id: "America/Anchorage",
        label: "Alaska Time (Anchorage)",
        abbreviation: "AK",
        cities: &["Anchorage", "Fairbanks", "Juneau"],
        aliases: &[],
    },
    ZoneInfo {
        id: "Pacific/Honolulu",
        label: "Hawaii Time (Honolulu)",
        abbreviation: "HI",
        cities: &["Honolulu", "Hilo"],
        aliases: &[],
    },
];

pub fn find_zone(id: &str) -> Option<&'static ZoneInfo> {
    let wanted = id.trim();
    ZONES
        .iter()
        .find(|zone| zone.id == wanted || zone.aliases.contains(&wanted))
}

/// Unknown ids resolve to the Eastern entry.
pub fn zone_info(id: &str) -> &'static ZoneInfo {
    find_zone(id).unwrap_or(&ZONES[0])
}

pub fn zone_abbreviation(id: &str) -> &'static str {
    zone_info(id).abbreviation
}

pub fn zone_label(id: &str) -> &'static str {
    zone_info(id).label
}

/// Any IANA id the tz database knows, not only the seven in [`ZONES`].
pub fn is_known_zone(id: &str) -> bool {
    id.trim().parse::<Tz>().is_ok()
}

pub fn resolve_tz(id: &str) -> Tz {
    id.trim().parse::<Tz>().unwrap_or(chrono_tz::America::New_York)
}

/// Wall-clock reading in `zone` at `now`, e.g. `3:05 PM CT`.
pub fn current_time_in_zone(zone: &str, now: DateTime<Utc>) -> String {
    let local = now.with_timezone(&resolve_tz(zone));
    format!("{} {}", local.format("%-I:%M %p"), zone_abbreviation(zone))
}

pub fn civil_now_in_zone(zone: &str, now: DateTime<Utc>) -> NaiveDateTime {
    now.with_timezone(&resolve_tz(zone)).naive_local()
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct UsState {
    pub code: &'static str,
    pub name: &'static str,
    pub zone: &'static str,
}

macro_rules! us_states {
    ($(($code:literal, $name:literal, $zone:literal)),* $(,)?) => {
        pub const US_STATES: &[UsState] = &[
            $(UsState { code: $code, name: $name, zone: $zone }),*
        ];
    };
}

us_states![
    ("AL", "Alabama", "America/Chicago"),
    ("AK", "Alaska", "America/Anchorage"),
    ("AZ", "Arizona", "America/Phoenix"),
    ("AR", "Arkansas", "America/Chicago"),
    ("CA", "California", "America/Los_Angeles"),
    ("CO", "Colorado", "America/Denver"),
    ("CT", "Connecticut", "America/New_York"),
    ("DE", "Delaware", "America/New_York"),
    ("FL", "Florida", "America/New_York"),
    ("GA", "Georgia", "America/New_York"),
    ("HI", "Hawaii", "Pacific/Honolulu"),
    ("ID", "Idaho", "America/Boise"),
    ("IL", "Illinois", "America/Chicago"),
    ("IN", "Indiana", "America/New_York"),
    ("IA", "Iowa", "America/Chicago"),
    ("KS", "Kansas", "America/Chicago"),
    ("KY", "Kentucky", "America/New_York"),
    ("LA", "Louisiana", "America/Chicago"),
    ("ME", "Maine", "America/New_York"),
    ("MD", "Maryland", "America/New_York"),
    ("MA", "Massachusetts", "America/New_York"),
    ("MI", "Michigan", "America/New_York"),
    ("MN", "Minnesota", "America/Chicago"),
    ("MS", "Mississippi", "America/Chicago"),
    ("MO", "Missouri", "America/Chicago"),
    ("MT", "Montana", "America/Denver"),
    ("NE", "Nebraska", "America/Chicago"),
    ("NV", "Nevada", "America/Los_Angeles"),
    ("NH", "New Hampshire", "America/New_York"),
    ("NJ", "New Jersey", "America/New_York"),
    ("NM", "New Mexico", "America/Denver"),
    ("NY", "New York", "America/New_York"),
    ("NC", "North Carolina", "America/New_York"),
    ("ND", "North Dakota", "America/Chicago"),
    ("OH", "Ohio", "America/New_York"),
    ("OK", "Oklahoma", "America/Chicago"),
    ("OR", "Oregon", "America/Los_Angeles"),
    ("PA", "Pennsylvania", "America/New_York"),
    ("RI", "Rhode Island", "America/New_York"),
    ("SC", "South Carolina", "America/New_York"),
    ("SD", "South Dakota", "America/Chicago"),
    ("TN", "Tennessee", "America/Chicago"),
    ("TX", "Texas", "America/Chicago"),
    ("UT", "Utah", "America/Denver"),
    ("VT", "Vermont", "America/New_York"),
    ("VA", "Virginia", "America/New_York"),
    ("WA", "Washington", "America/Los_Angeles"),
    ("WV", "West Virginia", "America/New_York"),
    ("WI", "Wisconsin", "America/Chicago"),
    ("WY", "Wyoming", "America/Denver"),
];

pub fn state_by_code(code: &str) -> Option<&'static UsState> {
    let wanted = code.trim();
    US_STATES
        .iter()
        .find(|state| state.code.eq_ignore_ascii_case(wanted))
}

pub fn parse_state_code(code: &str) -> Result<&'static UsState, CoreError> {
    state_by_code(code).ok_or_else(|| CoreError::InvalidStateCode(code.trim().to_string()))
}

pub fn zone_for_state(code: &str) -> &'static str {
    state_by_code(code).map_or(DEFAULT_ZONE, |state| state.zone)
}

pub fn states_in_zone(zone: &str) -> impl Iterator<Item = &'static UsState> + '_ {
    US_STATES.iter().filter(move |state| state.zone == zone)
}
