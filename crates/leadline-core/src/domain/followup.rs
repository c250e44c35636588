use crate::domain::stage::slugify;
use crate::error::CoreError;
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;

/// Declared in ascending urgency so the derived `Ord` ranks `Urgent` highest.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize,
)]
#[serde(rename_all = "lowercase")]
pub enum FollowupPriority {
    Low,
    #[default]
    Medium,
    High,
    Urgent,
}

impl FollowupPriority {
    pub const ALL: [FollowupPriority; 4] = [
        FollowupPriority::Low,
        FollowupPriority::Medium,
        FollowupPriority::High,
        FollowupPriority::Urgent,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            FollowupPriority::Low => "low",
            FollowupPriority::Medium => "medium",
            FollowupPriority::High => "high",
            FollowupPriority::Urgent => "urgent",
        }
    }
}

/// Most urgent first: `[low, urgent, medium, high]` sorts to
/// `[urgent, high, medium, low]`.
pub fn priority_cmp(a: &FollowupPriority, b: &FollowupPriority) -> Ordering {
    b.cmp(a)
}

impl fmt::Display for FollowupPriority {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for FollowupPriority {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().to_ascii_lowercase();
        FollowupPriority::ALL
            .into_iter()
            .find(|priority| priority.as_str() == wanted)
            .ok_or_else(|| CoreError::InvalidPriority(s.trim().to_string()))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum FollowupKind {
    #[default]
    Call,
    Email,
    Meeting,
    CheckIn,
}

impl FollowupKind {
    pub const ALL: [FollowupKind; 4] = [
        FollowupKind::Call,
        FollowupKind::Email,
        FollowupKind::Meeting,
        FollowupKind::CheckIn,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            FollowupKind::Call => "call",
            FollowupKind::Email => "email",
            FollowupKind::Meeting => "meeting",
            FollowupKind::CheckIn => "check-in",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            FollowupKind::Call => "Phone Call",
            FollowupKind::Email => "Email",
            FollowupKind::Meeting => "In-Person Meeting",
            FollowupKind::CheckIn => "General Check-in",
        }
    }
}

impl fmt::Display for FollowupKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for FollowupKind {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = slugify(s);
        FollowupKind::ALL
            .into_iter()
            .find(|kind| kind.as_str() == wanted)
            .ok_or_else(|| CoreError::InvalidFollowupKind(s.trim().to_string()))
    }
}
