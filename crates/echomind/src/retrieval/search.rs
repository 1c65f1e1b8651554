//! Ranked retrieval over the document store

use std::sync::Arc;

use crate::error::Result;
use crate::storage::DocumentStore;
use crate::types::{DocumentChunk, ScoredChunk};

use super::scorer::RelevanceScorer;

/// Scores every stored chunk and returns the best `k`
pub struct Retriever {
    store: Arc<DocumentStore>,
    scorer: Arc<dyn RelevanceScorer>,
    default_top_k: usize,
}

impl Retriever {
    pub fn new(
        store: Arc<DocumentStore>,
        scorer: Arc<dyn RelevanceScorer>,
        default_top_k: usize,
    ) -> Self {
        Self {
            store,
            scorer,
            default_top_k,
        }
    }

    /// Relevance of a single chunk to `query`
    pub async fn score(&self, query: &str, chunk: &DocumentChunk) -> Result<f32> {
        let prepared = self.scorer.prepare_query(query).await?;
        Ok(self.scorer.score_chunk(&prepared, chunk))
    }

    /// Top `k` chunks, best first; ties keep ingestion order
    pub async fn retrieve(&self, query: &str, k: Option<usize>) -> Result<Vec<ScoredChunk>> {
        let k = k.unwrap_or(self.default_top_k);
        let chunks = self.store.snapshot();
        if chunks.is_empty() || k == 0 {
            return Ok(Vec::new());
        }

        let prepared = self.scorer.prepare_query(query).await?;

        let mut scored: Vec<(&DocumentChunk, f32)> = chunks
            .iter()
            .map(|chunk| (chunk.as_ref(), self.scorer.score_chunk(&prepared, chunk)))
            .collect();

        // sort_by is stable
        scored.sort_by(|a, b| b.1.total_cmp(&a.1));
        scored.truncate(k);

        tracing::debug!(
            "Retrieved {} of {} chunks ({} scoring)",
            scored.len(),
            chunks.len(),
            self.scorer.name()
        );

        Ok(scored
            .into_iter()
            .map(|(chunk, score)| ScoredChunk::from_chunk(chunk, score, 1.0 - score))
            .collect())
    }
}
