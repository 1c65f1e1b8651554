//! Response types for ingestion, retrieval, synthesis and queries

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use uuid::Uuid;

use crate::config::SynthesisConfig;

use super::document::{ChunkMetadata, DocumentChunk, SourceType};
use super::triage::{EmergencyContact, UrgencyLevel};

/// A chunk scored against one query (recomputed per query, never stored)
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ScoredChunk {
    /// Chunk ID
    pub id: String,
    /// Text content
    pub content: String,
    /// Provenance
    pub metadata: ChunkMetadata,
    /// `1 - relevance_score` for lexical, cosine distance for vector
    pub distance: f32,
    /// Relevance in [0, 1], higher is better
    pub relevance_score: f32,
}

impl ScoredChunk {
    /// Create a scored view of a stored chunk
    pub fn from_chunk(chunk: &DocumentChunk, relevance_score: f32, distance: f32) -> Self {
        Self {
            id: chunk.id.clone(),
            content: chunk.content.clone(),
            metadata: chunk.metadata.clone(),
            distance,
            relevance_score,
        }
    }
}

/// Confidence bucket for a synthesized answer
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum ConfidenceLevel {
    High,
    Medium,
    Low,
}

impl ConfidenceLevel {
    /// Bucket a score; thresholds are inclusive lower bounds
    pub fn from_score(score: f32, thresholds: &SynthesisConfig) -> Self {
        if score >= thresholds.high_confidence {
            Self::High
        } else if score >= thresholds.medium_confidence {
            Self::Medium
        } else {
            Self::Low
        }
    }
}

/// Citation for one source (deduplicated by source name)
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SourceReference {
    pub source_id: String,
    pub source_name: String,
    pub source_type: SourceType,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub source_url: Option<String>,
    /// Trust score (0.0-1.0)
    pub trust_score: f32,
    pub last_verified: DateTime<Utc>,
    /// Relevant excerpt from the source
    #[serde(skip_serializing_if = "Option::is_none")]
    pub excerpt: Option<String>,
}

/// Extractive answer with citations
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SynthesizedAnswer {
    pub answer: String,
    pub confidence: ConfidenceLevel,
    pub confidence_score: f32,
    pub sources: Vec<SourceReference>,
    pub key_points: Vec<String>,
    pub related_topics: Vec<String>,
}

/// Outcome of an ingestion call
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum IngestStatus {
    Success,
    Error,
}

/// Result of ingesting one document
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct IngestResult {
    pub status: IngestStatus,
    pub source_name: String,
    pub chunks_created: usize,
    pub document_ids: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl IngestResult {
    /// Successful ingestion
    pub fn success(source_name: impl Into<String>, document_ids: Vec<String>) -> Self {
        Self {
            status: IngestStatus::Success,
            source_name: source_name.into(),
            chunks_created: document_ids.len(),
            document_ids,
            error: None,
        }
    }

    /// Failed ingestion; nothing was stored
    pub fn failure(source_name: impl Into<String>, error: impl Into<String>) -> Self {
        Self {
            status: IngestStatus::Error,
            source_name: source_name.into(),
            chunks_created: 0,
            document_ids: Vec::new(),
            error: Some(error.into()),
        }
    }

    pub fn is_success(&self) -> bool {
        self.status == IngestStatus::Success
    }
}

/// Store health
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum StoreStatus {
    Empty,
    Healthy,
}

impl StoreStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Empty => "empty",
            Self::Healthy => "healthy",
        }
    }
}

/// Collection statistics
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct CollectionStats {
    pub total_documents: usize,
    pub status: StoreStatus,
}

/// Personalized resource recommendation
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ResourceRecommendation {
    pub resource_id: String,
    pub name: String,
    /// e.g. "hotline", "counselor", "self_help"
    pub resource_type: String,
    pub description: String,
    pub location: Option<String>,
    pub cost_range: Option<String>,
    pub contact_info: HashMap<String, String>,
    pub trust_score: f32,
    /// How well it matches the user's needs
    pub match_score: f32,
}

/// Complete response to a user query
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct QueryResponse {
    pub response_id: Uuid,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub session_id: Option<String>,
    pub urgency_level: UrgencyLevel,
    pub emergency_contacts: Vec<EmergencyContact>,
    pub show_emergency_banner: bool,
    pub urgency_message: String,
    /// Advisory only; never used to pick the tier
    pub risk_score: f32,
    pub synthesized_answer: SynthesizedAnswer,
    pub recommended_resources: Vec<ResourceRecommendation>,
    pub next_steps: Vec<String>,
    pub timestamp: DateTime<Utc>,
}

/// Health check response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthCheckResponse {
    pub status: String,
    pub version: String,
    pub timestamp: DateTime<Utc>,
    /// Service name -> status
    pub services: HashMap<String, String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_confidence_bucket_boundaries() {
        let thresholds = SynthesisConfig::default();
        assert_eq!(ConfidenceLevel::from_score(0.8, &thresholds), ConfidenceLevel::High);
        assert_eq!(ConfidenceLevel::from_score(0.6, &thresholds), ConfidenceLevel::Medium);
        assert_eq!(ConfidenceLevel::from_score(0.79, &thresholds), ConfidenceLevel::Medium);
        assert_eq!(ConfidenceLevel::from_score(0.59, &thresholds), ConfidenceLevel::Low);
        assert_eq!(ConfidenceLevel::from_score(0.0, &thresholds), ConfidenceLevel::Low);
        assert_eq!(ConfidenceLevel::from_score(1.0, &thresholds), ConfidenceLevel::High);
    }

    #[test]
    fn test_ingest_result_shapes() {
        let ok = IngestResult::success("Guide", vec!["a".into(), "b".into()]);
        assert!(ok.is_success());
        assert_eq!(ok.chunks_created, 2);

        let json = serde_json::to_value(&ok).unwrap();
        assert_eq!(json["status"], "success");
        assert!(json.get("error").is_none());

        let err = IngestResult::failure("Guide", "boom");
        let json = serde_json::to_value(&err).unwrap();
        assert_eq!(json["status"], "error");
        assert_eq!(json["error"], "boom");
        assert_eq!(json["chunks_created"], 0);
    }
}
