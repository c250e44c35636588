pub mod drafts;
pub mod leads;

pub use drafts::{DraftsRepo, ADD_LEAD_DRAFT};
pub use leads::LeadsRepo;
