use crate::domain::ids::PositionId;
use crate::error::CoreError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum PaymentFrequency {
    #[default]
    Daily,
    Weekly,
    Monthly,
}

impl PaymentFrequency {
    pub fn as_str(&self) -> &'static str {
        match self {
            PaymentFrequency::Daily => "Daily",
            PaymentFrequency::Weekly => "Weekly",
            PaymentFrequency::Monthly => "Monthly",
        }
    }
}

impl fmt::Display for PaymentFrequency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for PaymentFrequency {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "daily" => Ok(PaymentFrequency::Daily),
            "weekly" => Ok(PaymentFrequency::Weekly),
            "monthly" => Ok(PaymentFrequency::Monthly),
            _ => Err(CoreError::InvalidPaymentFrequency(s.trim().to_string())),
        }
    }
}

/// An existing advance or loan the business is still paying down. Owned by
/// its lead; the lead's whole list is replaced on every update.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Position {
    pub id: PositionId,
    pub lender_name: String,
    pub original_amount: i64,
    pub current_balance: i64,
    pub payment_frequency: PaymentFrequency,
}

impl Position {
    pub fn new(
        lender_name: impl Into<String>,
        original_amount: i64,
        current_balance: i64,
        payment_frequency: PaymentFrequency,
    ) -> Self {
        Self {
            id: PositionId::new(),
            lender_name: lender_name.into(),
            original_amount,
            current_balance,
            payment_frequency,
        }
    }

    /// Positions without a lender are placeholder rows and skip validation.
    pub fn is_active(&self) -> bool {
        !self.lender_name.trim().is_empty()
    }
}
