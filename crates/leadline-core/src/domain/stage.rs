use crate::error::CoreError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Pipeline phase of a lead. Any stage may follow any other.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum Stage {
    #[default]
    Prospect,
    #[serde(rename = "Email Sent")]
    EmailSent,
    #[serde(rename = "Bank Statements Received")]
    BankStatementsReceived,
    #[serde(rename = "Submitted to Underwriting")]
    SubmittedToUnderwriting,
    #[serde(rename = "Offer Presented")]
    OfferPresented,
    Closed,
    #[serde(rename = "Cold Lead")]
    ColdLead,
    #[serde(rename = "Not Interested")]
    NotInterested,
}

impl Stage {
    pub const ALL: [Stage; 8] = [
        Stage::Prospect,
        Stage::EmailSent,
        Stage::BankStatementsReceived,
        Stage::SubmittedToUnderwriting,
        Stage::OfferPresented,
        Stage::Closed,
        Stage::ColdLead,
        Stage::NotInterested,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            Stage::Prospect => "Prospect",
            Stage::EmailSent => "Email Sent",
            Stage::BankStatementsReceived => "Bank Statements Received",
            Stage::SubmittedToUnderwriting => "Submitted to Underwriting",
            Stage::OfferPresented => "Offer Presented",
            Stage::Closed => "Closed",
            Stage::ColdLead => "Cold Lead",
            Stage::NotInterested => "Not Interested",
        }
    }

    pub fn slug(&self) -> &'static str {
        match self {
            Stage::Prospect => "prospect",
            Stage::EmailSent => "email-sent",
            Stage::BankStatementsReceived => "bank-statements-received",
            Stage::SubmittedToUnderwriting => "submitted-to-underwriting",
            Stage::OfferPresented => "offer-presented",
            Stage::Closed => "closed",
            Stage::ColdLead => "cold-lead",
            Stage::NotInterested => "not-interested",
        }
    }

    /// Past the first touch and not yet resolved one way or the other.
    pub fn is_in_pipeline(&self) -> bool {
        !matches!(
            self,
            Stage::Prospect | Stage::Closed | Stage::ColdLead | Stage::NotInterested
        )
    }
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for Stage {
    type Err = CoreError;

    /// Accepts either the display label or the slug, case-insensitively.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = slugify(s);
        Stage::ALL
            .into_iter()
            .find(|stage| stage.slug() == wanted)
            .ok_or_else(|| CoreError::InvalidStage(s.trim().to_string()))
    }
}

pub(crate) fn slugify(raw: &str) -> String {
    raw.trim()
        .chars()
        .map(|ch| match ch {
            ' ' | '_' => '-',
            other => other.to_ascii_lowercase(),
        })
        .collect()
}
