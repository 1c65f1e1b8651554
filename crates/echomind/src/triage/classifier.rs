//! Keyword-priority urgency classifier

use regex::{Regex, RegexBuilder};

use crate::error::{Error, Result};
use crate::types::{EmergencyContact, UrgencyLevel};

use super::keywords::TierTable;

struct CompiledTier {
    level: UrgencyLevel,
    patterns: Vec<Regex>,
    contacts: Vec<EmergencyContact>,
}

impl CompiledTier {
    fn matches(&self, text: &str) -> bool {
        self.patterns.iter().any(|p| p.is_match(text))
    }

    fn hit_count(&self, text: &str) -> usize {
        self.patterns.iter().filter(|p| p.is_match(text)).count()
    }
}

/// Classifier for the urgency level of user queries
pub struct UrgencyClassifier {
    /// Tiers in priority order
    tiers: Vec<CompiledTier>,
}

impl UrgencyClassifier {
    /// Classifier over the built-in tier table
    pub fn new() -> Self {
        Self::from_table(&TierTable::default()).expect("built-in keyword table compiles")
    }

    /// Compile a custom tier table
    pub fn from_table(table: &TierTable) -> Result<Self> {
        let tiers = table
            .entries()
            .iter()
            .map(|entry| {
                let patterns = entry
                    .phrases
                    .iter()
                    .filter(|p| !p.trim().is_empty())
                    .map(|p| phrase_pattern(p))
                    .collect::<Result<Vec<_>>>()?;

                Ok(CompiledTier {
                    level: entry.level,
                    patterns,
                    contacts: entry.contacts.clone(),
                })
            })
            .collect::<Result<Vec<_>>>()?;

        tracing::info!(
            "Urgency classifier initialized with {} phrases across {} tiers",
            tiers.iter().map(|t| t.patterns.len()).sum::<usize>(),
            tiers.len()
        );

        Ok(Self { tiers })
    }

    /// Classify a query: the first tier (by priority) with any phrase match wins
    pub fn classify(&self, query: &str) -> (UrgencyLevel, Vec<EmergencyContact>) {
        let query = query.to_lowercase();

        for tier in &self.tiers {
            if tier.matches(&query) {
                match tier.level {
                    UrgencyLevel::Critical => tracing::warn!("CRITICAL urgency detected in query"),
                    level => tracing::info!("{} urgency detected in query", level),
                }
                return (tier.level, tier.contacts.clone());
            }
        }

        tracing::debug!("No urgency keywords matched, defaulting to low");
        (UrgencyLevel::Low, Vec::new())
    }

    /// Advisory risk score in [0, 1]: weighted count of distinct matched phrases
    pub fn risk_score(&self, query: &str) -> f32 {
        let query = query.to_lowercase();

        let score: f32 = self
            .tiers
            .iter()
            .map(|tier| tier.hit_count(&query) as f32 * risk_weight(tier.level))
            .sum();

        score.min(1.0)
    }

    /// Whether the crisis banner should be shown
    pub fn should_show_emergency_banner(level: UrgencyLevel) -> bool {
        matches!(level, UrgencyLevel::Critical | UrgencyLevel::High)
    }

    /// Canned message for a tier
    pub fn urgency_message(level: UrgencyLevel) -> &'static str {
        match level {
            UrgencyLevel::Critical => {
                "⚠️ If you're in crisis, please reach out for immediate help. \
                 Your life matters, and support is available 24/7."
            }
            UrgencyLevel::High => {
                "It sounds like you're going through a difficult time. \
                 Consider reaching out to a crisis hotline or mental health professional."
            }
            UrgencyLevel::Medium => {
                "I'm here to help you find the support you need. \
                 Let's explore resources that might be helpful for you."
            }
            UrgencyLevel::Low => {
                "I'll do my best to provide you with helpful information and resources."
            }
        }
    }
}

impl Default for UrgencyClassifier {
    fn default() -> Self {
        Self::new()
    }
}

fn risk_weight(level: UrgencyLevel) -> f32 {
    match level {
        UrgencyLevel::Critical => 0.4,
        UrgencyLevel::High => 0.2,
        UrgencyLevel::Medium => 0.1,
        UrgencyLevel::Low => 0.0,
    }
}

/// Whole-word pattern for a phrase; inner whitespace matches any whitespace run
fn phrase_pattern(phrase: &str) -> Result<Regex> {
    let body = phrase
        .split_whitespace()
        .map(regex::escape)
        .collect::<Vec<_>>()
        .join(r"\s+");

    RegexBuilder::new(&format!(r"\b{}\b", body))
        .case_insensitive(true)
        .build()
        .map_err(|e| Error::Config(format!("Invalid keyword '{}': {}", phrase, e)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::triage::keywords::{emergency_contacts, TierEntry};

    #[test]
    fn test_critical_dominates_medium_words() {
        let classifier = UrgencyClassifier::new();
        let (level, contacts) =
            classifier.classify("I'm stressed, anxious and lonely and I want to end my life");

        assert_eq!(level, UrgencyLevel::Critical);
        assert_eq!(contacts, emergency_contacts());
    }

    #[test]
    fn test_high_binds_subset() {
        let classifier = UrgencyClassifier::new();
        let (level, contacts) = classifier.classify("I think I'm having a PANIC ATTACK");

        assert_eq!(level, UrgencyLevel::High);
        assert_eq!(contacts.len(), 2);
        assert_eq!(contacts[0].phone, "988");
        assert_eq!(contacts[1].country, "India");
    }

    #[test]
    fn test_medium_and_low() {
        let classifier = UrgencyClassifier::new();

        let (level, contacts) = classifier.classify("feeling worried about exams");
        assert_eq!(level, UrgencyLevel::Medium);
        assert!(contacts.is_empty());

        let (level, contacts) = classifier.classify("what are good study habits?");
        assert_eq!(level, UrgencyLevel::Low);
        assert!(contacts.is_empty());

        let (level, contacts) = classifier.classify("");
        assert_eq!(level, UrgencyLevel::Low);
        assert!(contacts.is_empty());
    }

    #[test]
    fn test_word_boundaries() {
        let table = TierTable::new(vec![TierEntry::new(
            UrgencyLevel::Critical,
            &["cat"],
            emergency_contacts(),
        )]);
        let classifier = UrgencyClassifier::from_table(&table).unwrap();

        assert_eq!(classifier.classify("which category is this").0, UrgencyLevel::Low);
        assert_eq!(classifier.classify("my cat is sick").0, UrgencyLevel::Critical);
        assert_eq!(classifier.classify("cat.").0, UrgencyLevel::Critical);

        let classifier = UrgencyClassifier::new();
        assert_eq!(classifier.classify("crisisless sadly").0, UrgencyLevel::Low);
    }

    #[test]
    fn test_multi_word_phrase_spacing() {
        let classifier = UrgencyClassifier::new();
        assert_eq!(classifier.classify("i want to  kill\tmyself").0, UrgencyLevel::Critical);
        assert_eq!(classifier.classify("skill myselfish").0, UrgencyLevel::Low);
    }

    #[test]
    fn test_table_is_priority_ordered() {
        let table = TierTable::new(vec![
            TierEntry::new(UrgencyLevel::Medium, &["tired"], Vec::new()),
            TierEntry::new(UrgencyLevel::Critical, &["tired of living"], emergency_contacts()),
        ]);
        let classifier = UrgencyClassifier::from_table(&table).unwrap();

        assert_eq!(classifier.classify("so tired of living").0, UrgencyLevel::Critical);
        assert_eq!(classifier.classify("so tired").0, UrgencyLevel::Medium);
    }

    #[test]
    fn test_risk_score() {
        let classifier = UrgencyClassifier::new();

        assert_eq!(classifier.risk_score("hello there"), 0.0);
        assert!((classifier.risk_score("I feel sad") - 0.1).abs() < 1e-6);
        assert!((classifier.risk_score("sad and lonely") - 0.2).abs() < 1e-6);
        assert!((classifier.risk_score("hopeless and sad") - 0.3).abs() < 1e-6);

        let many = "suicidal, hopeless, desperate, want to die, overdose";
        assert_eq!(classifier.risk_score(many), 1.0);
    }

    #[test]
    fn test_risk_score_monotonic() {
        let classifier = UrgencyClassifier::new();
        let words = ["sad", "lonely", "crisis", "terrified", "suicide", "overdose"];

        let mut query = String::new();
        let mut previous = 0.0;
        for word in words {
            query.push(' ');
            query.push_str(word);
            let score = classifier.risk_score(&query);
            assert!(score >= previous);
            assert!((0.0..=1.0).contains(&score));
            previous = score;
        }
    }

    #[test]
    fn test_banner_and_messages() {
        assert!(UrgencyClassifier::should_show_emergency_banner(UrgencyLevel::Critical));
        assert!(UrgencyClassifier::should_show_emergency_banner(UrgencyLevel::High));
        assert!(!UrgencyClassifier::should_show_emergency_banner(UrgencyLevel::Medium));
        assert!(!UrgencyClassifier::should_show_emergency_banner(UrgencyLevel::Low));

        let messages: std::collections::HashSet<_> = UrgencyLevel::PRIORITY
            .iter()
            .map(|l| UrgencyClassifier::urgency_message(*l))
            .collect();
        assert_eq!(messages.len(), 4);
    }
}
