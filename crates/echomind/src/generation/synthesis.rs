//! Extractive answer synthesis over ranked chunks

use std::collections::BTreeSet;

use crate::config::SynthesisConfig;
use crate::error::{Error, Result};
use crate::types::{ConfidenceLevel, ScoredChunk, SynthesizedAnswer};

use super::citation::{extract_sources, truncate_with_ellipsis};

const ANSWER_INTRO: &str =
    "Based on trusted mental wellness resources, here's what we found regarding your question:\n\n";
const ANSWER_CONCLUSION: &str = "\n\nThese insights come from verified sources. For personalized guidance, please consult with a mental health professional.";

const NO_INFO_ANSWER: &str = "I couldn't find specific information in our knowledge base for your query. However, I recommend speaking with a mental health professional who can provide personalized guidance.";
const NO_INFO_KEY_POINTS: &[&str] = &[
    "Consider reaching out to a mental health professional",
    "Emergency hotlines are available 24/7",
];
const NO_INFO_TOPICS: &[&str] = &[
    "professional counseling",
    "crisis support",
    "mental health resources",
];

const ERROR_ANSWER: &str = "I encountered an issue processing your request. Please try rephrasing your question or contact support if the issue persists.";

const DEFAULT_TOPICS: &[&str] = &[
    "stress management",
    "counseling services",
    "self-care techniques",
];

/// Chunks quoted in the answer body and mined for key points
const TOP_CHUNKS: usize = 3;
/// Characters quoted per chunk in the answer body
const ANSWER_EXCERPT_CHARS: usize = 200;
const MAX_KEY_POINTS: usize = 5;
const MAX_TOPICS: usize = 5;

/// Composes answers from retrieved chunks without generating new prose
#[derive(Debug, Clone, Copy)]
pub struct SynthesisEngine {
    thresholds: SynthesisConfig,
}

impl SynthesisEngine {
    pub fn new(thresholds: SynthesisConfig) -> Self {
        Self { thresholds }
    }

    /// Synthesize an answer. Never fails; problems yield the canonical error answer.
    pub fn synthesize(&self, query: &str, chunks: &[ScoredChunk]) -> SynthesizedAnswer {
        if chunks.is_empty() {
            return no_information_answer();
        }

        match self.compose(chunks) {
            Ok(answer) => {
                tracing::debug!(
                    "Synthesized answer for '{}' from {} chunks ({:?})",
                    preview(query),
                    chunks.len(),
                    answer.confidence
                );
                answer
            }
            Err(e) => {
                tracing::error!("Error synthesizing answer: {}", e);
                error_answer()
            }
        }
    }

    fn compose(&self, chunks: &[ScoredChunk]) -> Result<SynthesizedAnswer> {
        if let Some(bad) = chunks
            .iter()
            .find(|c| !c.relevance_score.is_finite() || !(0.0..=1.0).contains(&c.relevance_score))
        {
            return Err(Error::synthesis(format!(
                "chunk {} has relevance score {} outside [0, 1]",
                bad.id, bad.relevance_score
            )));
        }

        let confidence_score =
            chunks.iter().map(|c| c.relevance_score).sum::<f32>() / chunks.len() as f32;

        Ok(SynthesizedAnswer {
            answer: answer_text(chunks),
            confidence: ConfidenceLevel::from_score(confidence_score, &self.thresholds),
            confidence_score,
            sources: extract_sources(chunks),
            key_points: key_points(chunks),
            related_topics: related_topics(chunks),
        })
    }
}

impl Default for SynthesisEngine {
    fn default() -> Self {
        Self::new(SynthesisConfig::default())
    }
}

fn answer_text(chunks: &[ScoredChunk]) -> String {
    let body = chunks
        .iter()
        .take(TOP_CHUNKS)
        .map(|c| format!("• {}", truncate_with_ellipsis(&c.content, ANSWER_EXCERPT_CHARS)))
        .collect::<Vec<_>>()
        .join("\n\n");

    format!("{ANSWER_INTRO}{body}{ANSWER_CONCLUSION}")
}

fn key_points(chunks: &[ScoredChunk]) -> Vec<String> {
    chunks
        .iter()
        .take(TOP_CHUNKS)
        .filter_map(|c| {
            let first = c.content.split('.').next().unwrap_or("").trim();
            (!first.is_empty()).then(|| format!("{first}."))
        })
        .take(MAX_KEY_POINTS)
        .collect()
}

fn related_topics(chunks: &[ScoredChunk]) -> Vec<String> {
    let topics: BTreeSet<String> = chunks
        .iter()
        .flat_map(|c| c.metadata.topics())
        .collect();

    if topics.is_empty() {
        return DEFAULT_TOPICS.iter().map(|t| t.to_string()).collect();
    }
    topics.into_iter().take(MAX_TOPICS).collect()
}

fn preview(query: &str) -> String {
    query.chars().take(50).collect()
}

/// Answer returned when retrieval found nothing
pub fn no_information_answer() -> SynthesizedAnswer {
    SynthesizedAnswer {
        answer: NO_INFO_ANSWER.to_string(),
        confidence: ConfidenceLevel::Low,
        confidence_score: 0.0,
        sources: Vec::new(),
        key_points: NO_INFO_KEY_POINTS.iter().map(|s| s.to_string()).collect(),
        related_topics: NO_INFO_TOPICS.iter().map(|s| s.to_string()).collect(),
    }
}

/// Answer returned when composition failed
pub fn error_answer() -> SynthesizedAnswer {
    SynthesizedAnswer {
        answer: ERROR_ANSWER.to_string(),
        confidence: ConfidenceLevel::Low,
        confidence_score: 0.0,
        sources: Vec::new(),
        key_points: Vec::new(),
        related_topics: Vec::new(),
    }
}
