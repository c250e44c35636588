pub mod business_type;
pub mod email;
pub mod followup;
pub mod ids;
pub mod lead;
pub mod payback;
pub mod phone;
pub mod position;
pub mod stage;

pub use business_type::{
    business_types, canonical_business_type, category_for, BUSINESS_CATEGORIES,
};
pub use email::{is_valid_email, normalize_email};
pub use followup::{priority_cmp, FollowupKind, FollowupPriority};
pub use ids::{LeadId, PositionId};
pub use lead::{FollowupSchedule, Lead, LeadDraft};
pub use payback::PaybackTime;
pub use phone::{format_phone_number, is_valid_phone, strip_phone_formatting};
pub use position::{PaymentFrequency, Position};
pub use stage::Stage;
