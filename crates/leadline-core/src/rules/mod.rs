pub mod due;
pub mod validation;

pub use due::{
    compute_due_state, lead_due_state, validate_upcoming_days, DueSelector, DueState,
    DEFAULT_UPCOMING_DAYS, MAX_UPCOMING_DAYS,
};
pub use validation::{validate_lead_fields, validate_positions, LeadFields};
