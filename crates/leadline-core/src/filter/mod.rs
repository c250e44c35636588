mod ast;
mod eval;
mod parser;

use thiserror::Error;

pub use ast::{AmountField, Comparison, FilterExpr, LeadFilter};
pub use eval::{matches_filter, FilterContext};
pub use parser::parse_filter;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum FilterParseError {
    #[error("empty value for {0}:")]
    EmptyValue(&'static str),
    #[error("invalid stage: {0}")]
    InvalidStage(String),
    #[error("invalid priority: {0}")]
    InvalidPriority(String),
    #[error("invalid payback time: {0}")]
    InvalidPayback(String),
    #[error("invalid mca selector: {0} (expected yes or no)")]
    InvalidMcaSelector(String),
    #[error("invalid due selector: {0}")]
    InvalidDueSelector(String),
    #[error("invalid amount comparison: {0}")]
    InvalidAmount(String),
}
