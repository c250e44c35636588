use crate::error::CoreError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PaybackTime {
    #[serde(rename = "3-months")]
    ThreeMonths,
    #[serde(rename = "6-months")]
    SixMonths,
    #[serde(rename = "9-months")]
    NineMonths,
    #[serde(rename = "12-months")]
    TwelveMonths,
    #[serde(rename = "18-months")]
    EighteenPlusMonths,
}

impl PaybackTime {
    pub const ALL: [PaybackTime; 5] = [
        PaybackTime::ThreeMonths,
        PaybackTime::SixMonths,
        PaybackTime::NineMonths,
        PaybackTime::TwelveMonths,
        PaybackTime::EighteenPlusMonths,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            PaybackTime::ThreeMonths => "3-months",
            PaybackTime::SixMonths => "6-months",
            PaybackTime::NineMonths => "9-months",
            PaybackTime::TwelveMonths => "12-months",
            PaybackTime::EighteenPlusMonths => "18-months",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            PaybackTime::ThreeMonths => "3 months",
            PaybackTime::SixMonths => "6 months",
            PaybackTime::NineMonths => "9 months",
            PaybackTime::TwelveMonths => "12 months",
            PaybackTime::EighteenPlusMonths => "18+ months",
        }
    }
}

impl fmt::Display for PaybackTime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for PaybackTime {
    type Err = CoreError;

    /// Accepts `6-months`, `6 months`, `6`, and `18+`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim().to_ascii_lowercase();
        let months = trimmed
            .trim_end_matches("months")
            .trim_end_matches('-')
            .trim()
            .trim_end_matches('+');
        match months {
            "3" => Ok(PaybackTime::ThreeMonths),
            "6" => Ok(PaybackTime::SixMonths),
            "9" => Ok(PaybackTime::NineMonths),
            "12" => Ok(PaybackTime::TwelveMonths),
            "18" => Ok(PaybackTime::EighteenPlusMonths),
            _ => Err(CoreError::InvalidPaybackTime(s.trim().to_string())),
        }
    }
}
