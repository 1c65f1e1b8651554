//! Urgency tiers and crisis contacts

use serde::{Deserialize, Serialize};

/// Urgency classification, ordered by severity (`Critical` is greatest)
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[serde(rename_all = "snake_case")]
pub enum UrgencyLevel {
    /// Informational query
    Low,
    /// Moderate concern
    Medium,
    /// Urgent need for support
    High,
    /// Immediate crisis
    Critical,
}

impl UrgencyLevel {
    /// Tiers in the order the classifier tests them
    pub const PRIORITY: [UrgencyLevel; 4] = [
        UrgencyLevel::Critical,
        UrgencyLevel::High,
        UrgencyLevel::Medium,
        UrgencyLevel::Low,
    ];

    /// Wire name
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Critical => "critical",
            Self::High => "high",
            Self::Medium => "medium",
            Self::Low => "low",
        }
    }
}

impl std::fmt::Display for UrgencyLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Emergency hotline information
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct EmergencyContact {
    pub name: String,
    pub phone: String,
    pub description: String,
    pub available_247: bool,
    pub country: String,
}
