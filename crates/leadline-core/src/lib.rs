pub mod domain;
pub mod dto;
pub mod error;
pub mod filter;
pub mod followup;
pub mod format;
pub mod reducer;
pub mod rules;
pub mod stats;
pub mod time;
pub mod timezone;

pub use domain::*;
pub use dto::*;
pub use error::{CoreError, ValidationError};
pub use filter::{
    matches_filter, parse_filter, FilterContext, FilterExpr, FilterParseError, LeadFilter,
};
pub use followup::{
    compose, compose_with_default, decompose, ensure_future, format_for_display, CivilTimestamp,
    FollowupDisplay, FollowupParts,
};
pub use reducer::{reduce, LeadAction, LeadState};
pub use rules::*;
pub use stats::{lead_statistics, position_summary, LeadStatistics, PositionSummary};
pub use time::TimeParseError;
