//! Relevance scoring strategies
//!
//! Both strategies share one capability: `embed_chunks_if_needed` runs at
//! ingestion, `embed_if_needed` at query time, and `score_chunk` is a pure
//! computation over in-memory data.

use async_trait::async_trait;
use std::collections::HashSet;
use std::sync::Arc;

use crate::error::{Error, Result};
use crate::providers::EmbeddingProvider;
use crate::types::DocumentChunk;

/// Query text with whatever each strategy needs precomputed
#[derive(Debug, Clone)]
pub struct PreparedQuery {
    pub text: String,
    pub terms: HashSet<String>,
    pub embedding: Option<Vec<f32>>,
}

impl PreparedQuery {
    pub fn new(text: &str, embedding: Option<Vec<f32>>) -> Self {
        Self {
            text: text.to_string(),
            terms: term_set(text),
            embedding,
        }
    }
}

/// Lowercased whitespace-delimited terms
pub fn term_set(text: &str) -> HashSet<String> {
    text.split_whitespace().map(str::to_lowercase).collect()
}

/// Strategy interface shared by ingestion and retrieval
#[async_trait]
pub trait RelevanceScorer: Send + Sync {
    /// Embedding to store with a chunk or query, `None` when the strategy keeps no state
    async fn embed_if_needed(&self, text: &str) -> Result<Option<Vec<f32>>>;

    /// One embedding per chunk of a document, `None` when the strategy keeps no state
    async fn embed_chunks_if_needed(&self, texts: &[String]) -> Result<Option<Vec<Vec<f32>>>>;

    /// Relevance in [0, 1], higher is better
    fn score_chunk(&self, query: &PreparedQuery, chunk: &DocumentChunk) -> f32;

    /// Strategy name for logging
    fn name(&self) -> &str;

    async fn prepare_query(&self, query: &str) -> Result<PreparedQuery> {
        let embedding = self.embed_if_needed(query).await?;
        Ok(PreparedQuery::new(query, embedding))
    }
}

/// Term-overlap scoring: |Q ∩ C| / |Q|
#[derive(Debug, Default, Clone, Copy)]
pub struct LexicalScorer;

#[async_trait]
impl RelevanceScorer for LexicalScorer {
    async fn embed_if_needed(&self, _text: &str) -> Result<Option<Vec<f32>>> {
        Ok(None)
    }

    async fn embed_chunks_if_needed(&self, _texts: &[String]) -> Result<Option<Vec<Vec<f32>>>> {
        Ok(None)
    }

    fn score_chunk(&self, query: &PreparedQuery, chunk: &DocumentChunk) -> f32 {
        let content_terms = term_set(&chunk.content);
        let overlap = query.terms.intersection(&content_terms).count();
        overlap as f32 / query.terms.len().max(1) as f32
    }

    fn name(&self) -> &str {
        "lexical"
    }
}

/// Cosine similarity over provider embeddings
pub struct VectorScorer {
    embedder: Arc<dyn EmbeddingProvider>,
}

impl VectorScorer {
    pub fn new(embedder: Arc<dyn EmbeddingProvider>) -> Self {
        Self { embedder }
    }
}

#[async_trait]
impl RelevanceScorer for VectorScorer {
    async fn embed_if_needed(&self, text: &str) -> Result<Option<Vec<f32>>> {
        self.embedder.embed(text).await.map(Some)
    }

    async fn embed_chunks_if_needed(&self, texts: &[String]) -> Result<Option<Vec<Vec<f32>>>> {
        let vectors = self.embedder.embed_batch(texts).await?;
        if vectors.len() != texts.len() {
            return Err(Error::embedding(format!(
                "{} returned {} embeddings for {} chunks",
                self.embedder.name(),
                vectors.len(),
                texts.len()
            )));
        }
        Ok(Some(vectors))
    }

    fn score_chunk(&self, query: &PreparedQuery, chunk: &DocumentChunk) -> f32 {
        match (&query.embedding, &chunk.embedding) {
            (Some(q), Some(c)) if q.len() == c.len() => cosine_similarity(q, c).clamp(0.0, 1.0),
            (Some(_), Some(_)) => {
                tracing::debug!("Dimension mismatch for chunk {}, scoring 0", chunk.id);
                0.0
            }
            _ => 0.0,
        }
    }

    fn name(&self) -> &str {
        "vector"
    }
}

/// Cosine similarity; zero vectors compare as 0
pub fn cosine_similarity(a: &[f32], b: &[f32]) -> f32 {
    let mut dot = 0.0f32;
    let mut norm_a = 0.0f32;
    let mut norm_b = 0.0f32;

    for (x, y) in a.iter().zip(b.iter()) {
        dot += x * y;
        norm_a += x * x;
        norm_b += y * y;
    }

    let denom = norm_a.sqrt() * norm_b.sqrt();
    if denom < f32::EPSILON {
        return 0.0;
    }
    dot / denom
}
