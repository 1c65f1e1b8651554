//! Embedding providers backing the vector scoring strategy

pub mod embedding;
pub mod hashing;
pub mod ollama;

use std::sync::Arc;

use crate::config::{EmbeddingBackend, EmbeddingConfig};
use crate::error::Result;

pub use embedding::EmbeddingProvider;
pub use hashing::HashingEmbedder;
pub use ollama::OllamaEmbedder;

/// Build the configured embedding provider
pub fn build_embedder(config: &EmbeddingConfig) -> Result<Arc<dyn EmbeddingProvider>> {
    let provider: Arc<dyn EmbeddingProvider> = match config.provider {
        EmbeddingBackend::Hashing => Arc::new(HashingEmbedder::new(config.dimensions)),
        EmbeddingBackend::Ollama => Arc::new(OllamaEmbedder::new(config)?),
    };

    tracing::info!(
        "Embedding provider: {} ({} dimensions)",
        provider.name(),
        provider.dimensions()
    );
    Ok(provider)
}
