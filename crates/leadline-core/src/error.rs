use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum CoreError {
    #[error("invalid stage: {0}")]
    InvalidStage(String),
    #[error("invalid follow-up priority: {0}")]
    InvalidPriority(String),
    #[error("invalid follow-up type: {0}")]
    InvalidFollowupKind(String),
    #[error("invalid payback time: {0}")]
    InvalidPaybackTime(String),
    #[error("invalid payment frequency: {0}")]
    InvalidPaymentFrequency(String),
    #[error("invalid US state code: {0}")]
    InvalidStateCode(String),
    #[error("invalid upcoming days: {0}")]
    InvalidUpcomingDays(i64),
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ValidationError {
    #[error("business name is required")]
    MissingBusinessName,
    #[error("owner name is required")]
    MissingOwnerName,
    #[error("phone number is required")]
    MissingPhone,
    #[error("invalid phone number: {0}")]
    InvalidPhone(String),
    #[error("invalid email address: {0}")]
    InvalidEmail(String),
    #[error("credit score must be between 300 and 850: {0}")]
    InvalidCreditScore(i32),
    #[error("{0} cannot be negative")]
    NegativeAmount(&'static str),
    #[error("{0} is larger than $1,000,000,000")]
    AmountTooLarge(&'static str),
    #[error("position {0}: original amount must be greater than 0")]
    PositionOriginalAmount(usize),
    #[error("position {0}: current balance cannot be negative")]
    PositionNegativeBalance(usize),
    #[error("unknown timezone: {0}")]
    UnknownTimezone(String),
    #[error("follow-up is in the past: {0}")]
    FollowupInPast(String),
}
