//! Static keyword tier table and emergency contact catalog

use crate::types::{EmergencyContact, UrgencyLevel};

/// Phrases indicating immediate crisis
pub const CRITICAL_PHRASES: &[&str] = &[
    "suicide",
    "suicidal",
    "kill myself",
    "end my life",
    "want to die",
    "self harm",
    "self-harm",
    "hurt myself",
    "cutting",
    "overdose",
    "no reason to live",
    "better off dead",
    "end it all",
];

/// Phrases indicating an urgent need for support
pub const HIGH_PHRASES: &[&str] = &[
    "panic attack",
    "cant breathe",
    "can't breathe",
    "severe anxiety",
    "breakdown",
    "mental breakdown",
    "crisis",
    "emergency",
    "desperate",
    "hopeless",
    "cant take it",
    "can't take it",
    "overwhelming",
    "intense fear",
    "terrified",
];

/// Phrases indicating moderate concern
pub const MEDIUM_PHRASES: &[&str] = &[
    "anxious",
    "depressed",
    "stressed",
    "worried",
    "scared",
    "sad",
    "lonely",
    "isolated",
    "struggling",
    "difficult",
    "overwhelmed",
    "burnout",
    "exhausted",
    "sleepless",
];

/// 988 Suicide & Crisis Lifeline
pub fn us_lifeline() -> EmergencyContact {
    EmergencyContact {
        name: "988 Suicide & Crisis Lifeline".to_string(),
        phone: "988".to_string(),
        description: "24/7 crisis support for emotional distress or suicidal crisis".to_string(),
        available_247: true,
        country: "United States".to_string(),
    }
}

/// AASRA helpline (India)
pub fn india_aasra() -> EmergencyContact {
    EmergencyContact {
        name: "AASRA Helpline".to_string(),
        phone: "9152987821".to_string(),
        description: "24/7 crisis intervention center for suicide prevention".to_string(),
        available_247: true,
        country: "India".to_string(),
    }
}

/// Crisis Text Line
pub fn crisis_text_line() -> EmergencyContact {
    EmergencyContact {
        name: "Crisis Text Line".to_string(),
        phone: "741741".to_string(),
        description: "Text HOME to 741741 for 24/7 crisis support via text".to_string(),
        available_247: true,
        country: "United States".to_string(),
    }
}

/// Full emergency contact catalog
pub fn emergency_contacts() -> Vec<EmergencyContact> {
    vec![us_lifeline(), india_aasra(), crisis_text_line()]
}

/// One urgency tier: its phrases and the contacts surfaced when it matches
#[derive(Debug, Clone)]
pub struct TierEntry {
    pub level: UrgencyLevel,
    pub phrases: Vec<String>,
    pub contacts: Vec<EmergencyContact>,
}

impl TierEntry {
    pub fn new(level: UrgencyLevel, phrases: &[&str], contacts: Vec<EmergencyContact>) -> Self {
        Self {
            level,
            phrases: phrases.iter().map(|p| p.to_lowercase()).collect(),
            contacts,
        }
    }
}

/// Tier table, always held in priority order (Critical first)
#[derive(Debug, Clone)]
pub struct TierTable {
    entries: Vec<TierEntry>,
}

impl TierTable {
    /// Build a table; entries are reordered by descending severity
    pub fn new(mut entries: Vec<TierEntry>) -> Self {
        entries.sort_by(|a, b| b.level.cmp(&a.level));
        Self { entries }
    }

    pub fn entries(&self) -> &[TierEntry] {
        &self.entries
    }
}

impl Default for TierTable {
    fn default() -> Self {
        Self::new(vec![
            TierEntry::new(UrgencyLevel::Critical, CRITICAL_PHRASES, emergency_contacts()),
            TierEntry::new(
                UrgencyLevel::High,
                HIGH_PHRASES,
                vec![us_lifeline(), india_aasra()],
            ),
            TierEntry::new(UrgencyLevel::Medium, MEDIUM_PHRASES, Vec::new()),
        ])
    }
}
