use crate::domain::{FollowupPriority, PaybackTime, Stage};
use crate::rules::DueSelector;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AmountField {
    Funding,
    Revenue,
    Credit,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Comparison {
    Gt,
    Ge,
    Lt,
    Le,
    Eq,
}

impl Comparison {
    pub fn holds(&self, left: i64, right: i64) -> bool {
        match self {
            Comparison::Gt => left > right,
            Comparison::Ge => left >= right,
            Comparison::Lt => left < right,
            Comparison::Le => left <= right,
            Comparison::Eq => left == right,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FilterExpr {
    Text(String),
    Stage(Stage),
    Priority(FollowupPriority),
    BusinessType(String),
    Payback(PaybackTime),
    McaHistory(bool),
    Due(DueSelector),
    Amount {
        field: AmountField,
        cmp: Comparison,
        value: i64,
    },
    And(Vec<FilterExpr>),
}

pub type LeadFilter = FilterExpr;
