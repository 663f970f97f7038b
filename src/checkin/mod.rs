//! Daily check-in: form input, score formulas, record assembly.

pub mod score;
pub mod service;
pub mod types;

pub use score::{composite_score, harmony_ratio, trait_breakdown, trait_shares, ShareLabel, TraitShare};
pub use service::{CheckinOutcome, CheckinService};
pub use types::*;
