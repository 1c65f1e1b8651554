//! Configuration for the wellness engine

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::error::{Error, Result};

/// Main engine configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct EchoConfig {
    /// Server configuration
    #[serde(default)]
    pub server: ServerConfig,
    /// Chunking configuration
    #[serde(default)]
    pub chunking: ChunkingConfig,
    /// Retrieval configuration
    #[serde(default)]
    pub retrieval: RetrievalConfig,
    /// Confidence bucketing for synthesized answers
    #[serde(default)]
    pub synthesis: SynthesisConfig,
    /// Relevance scoring strategy
    #[serde(default)]
    pub scoring: ScoringConfig,
    /// Document store persistence
    #[serde(default)]
    pub storage: StorageConfig,
}

impl EchoConfig {
    /// Parse a TOML configuration file
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let content = std::fs::read_to_string(path.as_ref())?;
        let config: EchoConfig = toml::from_str(&content)?;
        config.validate()?;
        Ok(config)
    }

    /// Load from `ECHOMIND_CONFIG` (or defaults) and apply environment overrides
    pub fn load() -> Result<Self> {
        let mut config = match std::env::var("ECHOMIND_CONFIG") {
            Ok(path) => {
                tracing::info!("Loading configuration from {}", path);
                Self::from_file(path)?
            }
            Err(_) => Self::default(),
        };

        config.apply_env_overrides()?;
        config.validate()?;
        Ok(config)
    }

    fn apply_env_overrides(&mut self) -> Result<()> {
        if let Ok(host) = std::env::var("ECHOMIND_HOST") {
            self.server.host = host;
        }
        if let Ok(port) = std::env::var("ECHOMIND_PORT") {
            self.server.port = port
                .parse()
                .map_err(|e| Error::Config(format!("Invalid ECHOMIND_PORT '{}': {}", port, e)))?;
        }
        if let Ok(top_k) = std::env::var("ECHOMIND_TOP_K") {
            self.retrieval.top_k = top_k
                .parse()
                .map_err(|e| Error::Config(format!("Invalid ECHOMIND_TOP_K '{}': {}", top_k, e)))?;
        }
        if let Ok(path) = std::env::var("ECHOMIND_STORAGE_PATH") {
            self.storage.path = Some(PathBuf::from(path));
        }
        Ok(())
    }

    /// Reject configurations the engine cannot honour
    pub fn validate(&self) -> Result<()> {
        if self.chunking.chunk_size == 0 {
            return Err(Error::Config("chunk_size must be greater than zero".to_string()));
        }
        if self.chunking.chunk_overlap >= self.chunking.chunk_size {
            return Err(Error::Config(format!(
                "chunk_overlap ({}) must be smaller than chunk_size ({})",
                self.chunking.chunk_overlap, self.chunking.chunk_size
            )));
        }
        if self.retrieval.top_k == 0 {
            return Err(Error::Config("top_k must be greater than zero".to_string()));
        }

        let SynthesisConfig { high_confidence, medium_confidence } = self.synthesis;
        let in_unit = |v: f32| (0.0..=1.0).contains(&v);
        if !in_unit(high_confidence) || !in_unit(medium_confidence) {
            return Err(Error::Config("confidence thresholds must lie in [0, 1]".to_string()));
        }
        if medium_confidence > high_confidence {
            return Err(Error::Config(format!(
                "medium_confidence ({}) exceeds high_confidence ({})",
                medium_confidence, high_confidence
            )));
        }
        let embedding = &self.scoring.embedding;
        if embedding.dimensions == 0 {
            return Err(Error::Config("embedding dimensions must be greater than zero".to_string()));
        }
        if embedding.provider == EmbeddingBackend::Ollama {
            if let Some(expected) = known_model_dimensions(&embedding.model) {
                if expected != embedding.dimensions {
                    return Err(Error::Config(format!(
                        "model {} produces {} dimensions, configured {}",
                        embedding.model, expected, embedding.dimensions
                    )));
                }
            }
        }
        Ok(())
    }
}

/// Server configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    /// Host address
    pub host: String,
    /// Port number
    pub port: u16,
    /// Enable CORS
    pub enable_cors: bool,
    /// Prefix for versioned API routes
    pub api_prefix: String,
    /// Longest accepted query, in characters
    pub max_query_length: usize,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 8000,
            enable_cors: true,
            api_prefix: "/api/v1".to_string(),
            max_query_length: 2000,
        }
    }
}

/// How raw text is cut into chunks
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum ChunkingPolicy {
    /// The whole document becomes a single chunk
    #[default]
    WholeDocument,
    /// Overlapping windows bounded by `chunk_size`
    BoundedWindow,
}

/// Text chunking configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ChunkingConfig {
    /// Chunking policy
    pub policy: ChunkingPolicy,
    /// Target chunk size in characters
    pub chunk_size: usize,
    /// Overlap between chunks in characters
    pub chunk_overlap: usize,
}

impl Default for ChunkingConfig {
    fn default() -> Self {
        Self {
            policy: ChunkingPolicy::WholeDocument,
            chunk_size: 500,
            chunk_overlap: 50,
        }
    }
}

/// Retrieval configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct RetrievalConfig {
    /// Number of chunks returned when the caller gives no `top_k`
    pub top_k: usize,
}

impl Default for RetrievalConfig {
    fn default() -> Self {
        Self { top_k: 5 }
    }
}

/// Confidence thresholds (inclusive lower bounds)
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
#[serde(default)]
pub struct SynthesisConfig {
    pub high_confidence: f32,
    pub medium_confidence: f32,
}

impl Default for SynthesisConfig {
    fn default() -> Self {
        Self {
            high_confidence: 0.8,
            medium_confidence: 0.6,
        }
    }
}

/// Relevance scoring strategy
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum ScoringStrategy {
    /// Query/content term overlap
    #[default]
    Lexical,
    /// Cosine similarity between embeddings
    Vector,
}

/// Scoring configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ScoringConfig {
    /// Active strategy
    #[serde(default)]
    pub strategy: ScoringStrategy,
    /// Embedding settings (used by the vector strategy only)
    #[serde(default)]
    pub embedding: EmbeddingConfig,
}

/// Which embedding backend the vector strategy uses
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum EmbeddingBackend {
    /// Deterministic in-process feature hashing
    #[default]
    Hashing,
    /// Ollama embeddings API
    Ollama,
}

/// Embedding configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct EmbeddingConfig {
    /// Backend
    pub provider: EmbeddingBackend,
    /// Embedding dimensions; must match the model's output under Ollama
    pub dimensions: usize,
    /// Ollama base URL
    pub base_url: String,
    /// Ollama embedding model name
    pub model: String,
    /// Request timeout in seconds
    pub timeout_secs: u64,
}

impl Default for EmbeddingConfig {
    fn default() -> Self {
        Self {
            provider: EmbeddingBackend::Hashing,
            dimensions: 768,
            base_url: "http://localhost:11434".to_string(),
            model: "nomic-embed-text".to_string(),
            timeout_secs: 30,
        }
    }
}

/// Output size of common Ollama embedding models
pub fn known_model_dimensions(model: &str) -> Option<usize> {
    let name = model.split(':').next().unwrap_or(model);
    match name {
        "nomic-embed-text" => Some(768),
        "mxbai-embed-large" => Some(1024),
        "all-minilm" => Some(384),
        _ => None,
    }
}

/// Document store persistence
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct StorageConfig {
    /// JSON snapshot file; `None` keeps the store in memory only
    #[serde(default)]
    pub path: Option<PathBuf>,
}
