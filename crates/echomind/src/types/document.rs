//! Chunk and provenance types with source tracking for citations

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Trust score assumed when a chunk carries none
pub const DEFAULT_TRUST_SCORE: f32 = 0.8;

/// Metadata keys owned by the ingestion pipeline; callers cannot override them
pub const RESERVED_METADATA_KEYS: &[&str] = &[
    "source_name",
    "source_type",
    "source_url",
    "chunk_index",
    "total_chunks",
    "ingested_at",
    "content_hash",
];

/// Kinds of trusted information source
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum SourceType {
    University,
    Government,
    Ngo,
    Medical,
    VerifiedHotline,
}

impl SourceType {
    /// Wire name
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::University => "university",
            Self::Government => "government",
            Self::Ngo => "ngo",
            Self::Medical => "medical",
            Self::VerifiedHotline => "verified_hotline",
        }
    }

    /// Parse a wire name, case-insensitively
    pub fn parse(name: &str) -> Option<Self> {
        match name.trim().to_lowercase().as_str() {
            "university" => Some(Self::University),
            "government" => Some(Self::Government),
            "ngo" => Some(Self::Ngo),
            "medical" => Some(Self::Medical),
            "verified_hotline" => Some(Self::VerifiedHotline),
            _ => None,
        }
    }
}

/// Provenance attached to every chunk
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ChunkMetadata {
    /// Human-readable source name (used for citation dedup)
    pub source_name: String,
    /// Source category
    pub source_type: SourceType,
    /// Source URL, if known
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source_url: Option<String>,
    /// 0-based position within the ingested document
    pub chunk_index: u32,
    /// Number of chunks the document produced
    pub total_chunks: u32,
    /// Ingestion wall-clock time, shared by all chunks of one call
    pub ingested_at: DateTime<Utc>,
    /// SHA-256 of the full document text
    #[serde(default)]
    pub content_hash: String,
    /// Caller-supplied fields (`trust_score`, `topics`, ...)
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl ChunkMetadata {
    /// Trust score from metadata, clamped to [0, 1]
    pub fn trust_score(&self) -> f32 {
        self.extra
            .get("trust_score")
            .and_then(Value::as_f64)
            .filter(|s| s.is_finite())
            .map(|s| (s as f32).clamp(0.0, 1.0))
            .unwrap_or(DEFAULT_TRUST_SCORE)
    }

    /// Topics from the `topics` field, comma-separated string or string array
    pub fn topics(&self) -> Vec<String> {
        let raw: Vec<String> = match self.extra.get("topics") {
            Some(Value::String(s)) => s.split(',').map(str::to_string).collect(),
            Some(Value::Array(items)) => items
                .iter()
                .filter_map(Value::as_str)
                .map(str::to_string)
                .collect(),
            _ => Vec::new(),
        };

        raw.into_iter()
            .map(|t| t.trim().to_string())
            .filter(|t| !t.is_empty())
            .collect()
    }
}

/// A stored unit of ingested text
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct DocumentChunk {
    /// `{source_name}_{ingestion_timestamp}_chunk_{index}`
    pub id: String,
    /// Text content
    pub content: String,
    /// Provenance
    pub metadata: ChunkMetadata,
    /// Embedding vector, present only under the vector strategy
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub embedding: Option<Vec<f32>>,
}

impl DocumentChunk {
    /// Build the id for one chunk of an ingestion call
    pub fn make_id(source_name: &str, ingestion_timestamp: i64, chunk_index: u32) -> String {
        format!("{}_{}_chunk_{}", source_name, ingestion_timestamp, chunk_index)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn metadata(extra: Value) -> ChunkMetadata {
        ChunkMetadata {
            source_name: "Campus Guide".to_string(),
            source_type: SourceType::University,
            source_url: None,
            chunk_index: 0,
            total_chunks: 1,
            ingested_at: Utc::now(),
            content_hash: String::new(),
            extra: extra.as_object().cloned().unwrap_or_default(),
        }
    }

    #[test]
    fn test_trust_score_default_and_clamp() {
        assert_eq!(metadata(json!({})).trust_score(), DEFAULT_TRUST_SCORE);
        assert_eq!(metadata(json!({"trust_score": 0.95})).trust_score(), 0.95);
        assert_eq!(metadata(json!({"trust_score": 3})).trust_score(), 1.0);
        assert_eq!(metadata(json!({"trust_score": "high"})).trust_score(), DEFAULT_TRUST_SCORE);
    }

    #[test]
    fn test_topics_parsing() {
        let m = metadata(json!({"topics": "sleep, stress ,,anxiety"}));
        assert_eq!(m.topics(), vec!["sleep", "stress", "anxiety"]);

        let m = metadata(json!({"topics": ["grief", 3, "loss"]}));
        assert_eq!(m.topics(), vec!["grief", "loss"]);

        assert!(metadata(json!({"topic": "ignored"})).topics().is_empty());
    }

    #[test]
    fn test_extra_fields_flatten() {
        let m = metadata(json!({"language": "en"}));
        let value = serde_json::to_value(&m).unwrap();
        assert_eq!(value["language"], "en");
        assert_eq!(value["source_type"], "university");

        let back: ChunkMetadata = serde_json::from_value(value).unwrap();
        assert_eq!(back, m);
    }

    #[test]
    fn test_source_type_parse() {
        assert_eq!(SourceType::parse("Verified_Hotline"), Some(SourceType::VerifiedHotline));
        assert_eq!(SourceType::parse("blog"), None);
        assert_eq!(SourceType::Ngo.as_str(), "ngo");
    }
}
