//! Document ingestion: chunk, embed if the strategy needs it, append

use chrono::Utc;
use serde_json::{Map, Value};
use sha2::{Digest, Sha256};
use std::sync::Arc;

use crate::error::{Error, Result};
use crate::retrieval::RelevanceScorer;
use crate::storage::DocumentStore;
use crate::types::document::RESERVED_METADATA_KEYS;
use crate::types::{ChunkMetadata, DocumentChunk, IngestResult, SourceType};

use super::chunker::TextChunker;

/// One document to ingest
#[derive(Debug, Clone)]
pub struct IngestInput<'a> {
    pub text: &'a str,
    pub source_name: &'a str,
    pub source_type: SourceType,
    pub source_url: Option<&'a str>,
    pub extra: Map<String, Value>,
}

/// Ingestion pipeline shared by the engine and the ingest binary
pub struct IngestPipeline {
    store: Arc<DocumentStore>,
    chunker: TextChunker,
    scorer: Arc<dyn RelevanceScorer>,
}

impl IngestPipeline {
    pub fn new(
        store: Arc<DocumentStore>,
        chunker: TextChunker,
        scorer: Arc<dyn RelevanceScorer>,
    ) -> Self {
        Self {
            store,
            chunker,
            scorer,
        }
    }

    /// Ingest a document. Failures come back as an error result, never as `Err`.
    pub async fn ingest(&self, input: IngestInput<'_>) -> IngestResult {
        let source_name = input.source_name.to_string();

        match self.try_ingest(input).await {
            Ok(ids) => {
                tracing::info!("Ingested '{}': {} chunks", source_name, ids.len());
                IngestResult::success(source_name, ids)
            }
            Err(e) => {
                tracing::error!("Error ingesting '{}': {}", source_name, e);
                IngestResult::failure(source_name, e.to_string())
            }
        }
    }

    async fn try_ingest(&self, input: IngestInput<'_>) -> Result<Vec<String>> {
        if input.source_name.trim().is_empty() {
            return Err(Error::ingestion("source_name must not be empty"));
        }

        let pieces = self.chunker.chunk(input.text);
        if pieces.is_empty() {
            return Err(Error::ingestion("document text is empty"));
        }

        let ingested_at = Utc::now();
        let timestamp = ingested_at
            .timestamp_nanos_opt()
            .unwrap_or_else(|| ingested_at.timestamp_micros());
        let content_hash = hex::encode(Sha256::digest(input.text.as_bytes()));
        let source_url = input
            .source_url
            .map(str::trim)
            .filter(|url| !url.is_empty())
            .map(String::from);
        let extra = strip_reserved(input.extra);
        let total_chunks = pieces.len() as u32;

        let mut embeddings = self
            .scorer
            .embed_chunks_if_needed(&pieces)
            .await?
            .map(Vec::into_iter);

        let mut chunks = Vec::with_capacity(pieces.len());
        for (index, content) in pieces.into_iter().enumerate() {
            let chunk_index = index as u32;
            let embedding = embeddings.as_mut().and_then(Iterator::next);

            chunks.push(DocumentChunk {
                id: DocumentChunk::make_id(input.source_name, timestamp, chunk_index),
                content,
                metadata: ChunkMetadata {
                    source_name: input.source_name.to_string(),
                    source_type: input.source_type,
                    source_url: source_url.clone(),
                    chunk_index,
                    total_chunks,
                    ingested_at,
                    content_hash: content_hash.clone(),
                    extra: extra.clone(),
                },
                embedding,
            });
        }

        let ids = chunks.iter().map(|chunk| chunk.id.clone()).collect();
        self.store.add_batch(chunks)?;
        Ok(ids)
    }
}

fn strip_reserved(mut extra: Map<String, Value>) -> Map<String, Value> {
    for key in RESERVED_METADATA_KEYS {
        if extra.remove(*key).is_some() {
            tracing::debug!("Ignoring reserved metadata key '{}'", key);
        }
    }
    extra
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ChunkingPolicy;
    use crate::providers::{EmbeddingProvider, HashingEmbedder};
    use crate::retrieval::{LexicalScorer, VectorScorer};
    use async_trait::async_trait;
    use serde_json::json;
    use std::sync::atomic::{AtomicUsize, Ordering};

    /// Embedder whose second call fails
    struct FlakyEmbedder {
        calls: AtomicUsize,
    }

    #[async_trait]
    impl EmbeddingProvider for FlakyEmbedder {
        async fn embed(&self, _text: &str) -> Result<Vec<f32>> {
            match self.calls.fetch_add(1, Ordering::SeqCst) {
                1 => Err(Error::embedding("connection reset")),
                _ => Ok(vec![1.0, 0.0, 0.0, 0.0]),
            }
        }

        fn dimensions(&self) -> usize {
            4
        }

        fn name(&self) -> &str {
            "flaky"
        }
    }

    fn pipeline(
        policy: ChunkingPolicy,
        scorer: Arc<dyn RelevanceScorer>,
    ) -> (Arc<DocumentStore>, IngestPipeline) {
        let store = Arc::new(DocumentStore::in_memory());
        let pipeline = IngestPipeline::new(store.clone(), TextChunker::new(policy, 30, 5), scorer);
        (store, pipeline)
    }

    fn input<'a>(text: &'a str, extra: Map<String, Value>) -> IngestInput<'a> {
        IngestInput {
            text,
            source_name: "Campus Guide",
            source_type: SourceType::University,
            source_url: Some(""),
            extra,
        }
    }

    #[tokio::test]
    async fn test_whole_document_metadata() {
        let (store, pipeline) = pipeline(ChunkingPolicy::WholeDocument, Arc::new(LexicalScorer));
        let extra = json!({"topics": "sleep", "chunk_index": 99}).as_object().cloned().unwrap();

        let result = pipeline.ingest(input("Sleep well before exams.", extra)).await;
        assert!(result.is_success());
        assert_eq!(result.chunks_created, 1);
        assert!(result.document_ids[0].starts_with("Campus Guide_"));
        assert!(result.document_ids[0].ends_with("_chunk_0"));

        let chunks = store.snapshot();
        let meta = &chunks[0].metadata;
        assert_eq!(meta.chunk_index, 0);
        assert_eq!(meta.total_chunks, 1);
        assert_eq!(meta.source_url, None);
        assert_eq!(meta.content_hash.len(), 64);
        assert!(!meta.extra.contains_key("chunk_index"));
        assert_eq!(meta.topics(), vec!["sleep".to_string()]);
        assert!(chunks[0].embedding.is_none());
    }

    #[tokio::test]
    async fn test_bounded_window_shares_provenance() {
        let (store, pipeline) = pipeline(ChunkingPolicy::BoundedWindow, Arc::new(LexicalScorer));
        let text = "Breathing slowly helps. Walking outside helps. Talking to friends helps too.";

        let result = pipeline.ingest(input(text, Map::new())).await;
        assert!(result.chunks_created > 1);

        let chunks = store.snapshot();
        let total = chunks.len() as u32;
        for (i, chunk) in chunks.iter().enumerate() {
            assert_eq!(chunk.metadata.chunk_index, i as u32);
            assert_eq!(chunk.metadata.total_chunks, total);
            assert_eq!(chunk.metadata.ingested_at, chunks[0].metadata.ingested_at);
            assert_eq!(chunk.id, result.document_ids[i]);
        }
    }

    #[tokio::test]
    async fn test_vector_strategy_stores_embeddings() {
        let scorer = Arc::new(VectorScorer::new(Arc::new(HashingEmbedder::new(32))));
        let (store, pipeline) = pipeline(ChunkingPolicy::WholeDocument, scorer);

        pipeline.ingest(input("Mindfulness reduces stress.", Map::new())).await;
        assert_eq!(store.snapshot()[0].embedding.as_ref().map(Vec::len), Some(32));
    }

    #[tokio::test]
    async fn test_empty_text_is_error_result() {
        let (store, pipeline) = pipeline(ChunkingPolicy::WholeDocument, Arc::new(LexicalScorer));
        let result = pipeline.ingest(input("   ", Map::new())).await;

        assert!(!result.is_success());
        assert!(result.error.is_some());
        assert!(store.is_empty());
    }

    #[tokio::test]
    async fn test_repeated_ingestion_gets_distinct_ids() {
        let (_, pipeline) = pipeline(ChunkingPolicy::WholeDocument, Arc::new(LexicalScorer));
        let a = pipeline.ingest(input("Same text.", Map::new())).await;
        let b = pipeline.ingest(input("Same text.", Map::new())).await;
        assert_ne!(a.document_ids, b.document_ids);
    }

    #[tokio::test]
    async fn test_embedding_failure_appends_nothing() {
        let embedder = Arc::new(FlakyEmbedder {
            calls: AtomicUsize::new(0),
        });
        let scorer = Arc::new(VectorScorer::new(embedder.clone()));
        let (store, pipeline) = pipeline(ChunkingPolicy::BoundedWindow, scorer);
        let text = "Breathing slowly helps. Walking outside helps. Talking to friends helps too.";

        let result = pipeline.ingest(input(text, Map::new())).await;

        assert!(!result.is_success());
        assert!(result.error.as_deref().unwrap_or_default().contains("connection reset"));
        assert!(result.document_ids.is_empty());
        assert_eq!(embedder.calls.load(Ordering::SeqCst), 2);
        assert!(store.is_empty());
    }
}
