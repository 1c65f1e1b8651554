//! Next steps and resource recommendations per urgency tier

use std::collections::HashMap;

use crate::types::{ResourceRecommendation, UrgencyLevel};

/// Actionable next steps for a tier
pub fn next_steps(level: UrgencyLevel) -> Vec<String> {
    let steps: [&str; 4] = match level {
        UrgencyLevel::Critical => [
            "Call 988 immediately for crisis support",
            "Go to your nearest emergency room if you're in immediate danger",
            "Reach out to a trusted friend or family member",
            "Use the Crisis Text Line: Text HOME to 741741",
        ],
        UrgencyLevel::High => [
            "Contact a crisis hotline for immediate support",
            "Schedule an urgent appointment with a mental health professional",
            "Reach out to your support network",
            "Practice grounding techniques to manage acute distress",
        ],
        UrgencyLevel::Medium => [
            "Schedule an appointment with a counselor",
            "Explore self-help resources and coping strategies",
            "Connect with a support group",
            "Practice self-care activities",
        ],
        UrgencyLevel::Low => [
            "Explore the recommended resources",
            "Learn more about mental wellness practices",
            "Consider preventive mental health support",
            "Build a self-care routine",
        ],
    };

    steps.iter().map(|s| s.to_string()).collect()
}

/// Resource recommendations; a crisis hotline leads for Critical and High
pub fn recommended_resources(
    level: UrgencyLevel,
    location: Option<&str>,
) -> Vec<ResourceRecommendation> {
    let mut resources = Vec::with_capacity(3);

    if matches!(level, UrgencyLevel::Critical | UrgencyLevel::High) {
        resources.push(ResourceRecommendation {
            resource_id: "crisis_hotline".to_string(),
            name: "24/7 Crisis Hotline".to_string(),
            resource_type: "hotline".to_string(),
            description: "Immediate crisis support available now".to_string(),
            location: Some("National".to_string()),
            cost_range: Some("Free".to_string()),
            contact_info: contact("phone", "988"),
            trust_score: 1.0,
            match_score: 1.0,
        });
    }

    resources.push(ResourceRecommendation {
        resource_id: "university_counseling".to_string(),
        name: "University Counseling Center".to_string(),
        resource_type: "counselor".to_string(),
        description: "Professional counseling services for students".to_string(),
        location: Some(location.unwrap_or("Campus").to_string()),
        cost_range: Some("Free for students".to_string()),
        contact_info: contact("website", "https://counseling.university.edu"),
        trust_score: 0.95,
        match_score: 0.9,
    });

    resources.push(ResourceRecommendation {
        resource_id: "mental_health_app".to_string(),
        name: "Mindfulness & Meditation App".to_string(),
        resource_type: "self_help".to_string(),
        description: "Guided meditation and stress relief exercises".to_string(),
        location: Some("Online".to_string()),
        cost_range: Some("Free - $10/month".to_string()),
        contact_info: contact("website", "https://example-app.com"),
        trust_score: 0.85,
        match_score: 0.75,
    });

    resources
}

fn contact(kind: &str, value: &str) -> HashMap<String, String> {
    HashMap::from([(kind.to_string(), value.to_string())])
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hotline_only_for_urgent_tiers() {
        let critical = recommended_resources(UrgencyLevel::Critical, None);
        assert_eq!(critical.len(), 3);
        assert_eq!(critical[0].resource_id, "crisis_hotline");

        let low = recommended_resources(UrgencyLevel::Low, Some("Boston"));
        assert_eq!(low.len(), 2);
        assert_eq!(low[0].location.as_deref(), Some("Boston"));
    }

    #[test]
    fn test_next_steps_per_tier() {
        assert!(next_steps(UrgencyLevel::Critical)[0].contains("988"));
        for level in UrgencyLevel::PRIORITY {
            assert_eq!(next_steps(level).len(), 4);
        }
    }
}
