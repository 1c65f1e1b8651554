//! Embedding provider seam shared by the vector scorer and ingestion

use async_trait::async_trait;
use crate::error::Result;

/// Text to vector conversion
///
/// Implementations:
/// - `HashingEmbedder`: deterministic in-process feature hashing
/// - `OllamaEmbedder`: local Ollama server (nomic-embed-text)
#[async_trait]
pub trait EmbeddingProvider: Send + Sync {
    /// Embed one text
    async fn embed(&self, text: &str) -> Result<Vec<f32>>;

    /// Embed every chunk of a document, in order
    ///
    /// Stops at the first failure so a document is never half embedded.
    async fn embed_batch(&self, texts: &[String]) -> Result<Vec<Vec<f32>>> {
        let mut vectors = Vec::with_capacity(texts.len());
        for (index, text) in texts.iter().enumerate() {
            let vector = self.embed(text).await.map_err(|e| {
                tracing::warn!("{} failed on chunk {} of {}", self.name(), index, texts.len());
                e
            })?;
            vectors.push(vector);
        }
        Ok(vectors)
    }

    /// Output vector length
    fn dimensions(&self) -> usize;

    /// Provider name for logging
    fn name(&self) -> &str;
}
