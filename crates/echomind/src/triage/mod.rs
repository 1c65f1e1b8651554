//! Urgency triage: keyword tiers, classification and per-tier guidance

mod classifier;
pub mod guidance;
pub mod keywords;

pub use classifier::UrgencyClassifier;
pub use keywords::{emergency_contacts, TierEntry, TierTable};
