//! Wellness engine: triage, ingestion, retrieval and synthesis behind one handle

use chrono::Utc;
use serde_json::{Map, Value};
use std::sync::Arc;
use uuid::Uuid;

use crate::config::EchoConfig;
use crate::error::Result;
use crate::generation::SynthesisEngine;
use crate::ingestion::{IngestInput, IngestPipeline, TextChunker};
use crate::retrieval::{build_scorer, RelevanceScorer, Retriever};
use crate::storage::DocumentStore;
use crate::triage::{guidance, UrgencyClassifier};
use crate::types::{
    CollectionStats, DocumentChunk, EmergencyContact, IngestResult, QueryRequest, QueryResponse,
    ScoredChunk, SourceType, SynthesizedAnswer, UrgencyLevel,
};

/// Explicitly constructed engine, shared by handlers via `Arc`
pub struct WellnessEngine {
    classifier: UrgencyClassifier,
    store: Arc<DocumentStore>,
    pipeline: IngestPipeline,
    retriever: Retriever,
    synthesis: SynthesisEngine,
    max_query_length: usize,
}

impl WellnessEngine {
    /// Build from configuration, opening the snapshot file when one is configured
    pub fn from_config(config: &EchoConfig) -> Result<Self> {
        config.validate()?;

        let store = match &config.storage.path {
            Some(path) => DocumentStore::open(path)?,
            None => DocumentStore::in_memory(),
        };
        let scorer = build_scorer(&config.scoring)?;

        tracing::info!(
            "Wellness engine ready: {:?} chunking, {} scoring, {} chunks stored",
            config.chunking.policy,
            scorer.name(),
            store.len()
        );

        Ok(Self::with_parts(config, Arc::new(store), scorer))
    }

    /// Assemble from an existing store and scorer
    pub fn with_parts(
        config: &EchoConfig,
        store: Arc<DocumentStore>,
        scorer: Arc<dyn RelevanceScorer>,
    ) -> Self {
        Self {
            classifier: UrgencyClassifier::new(),
            pipeline: IngestPipeline::new(
                store.clone(),
                TextChunker::from_config(&config.chunking),
                scorer.clone(),
            ),
            retriever: Retriever::new(store.clone(), scorer, config.retrieval.top_k),
            store,
            synthesis: SynthesisEngine::new(config.synthesis),
            max_query_length: config.server.max_query_length,
        }
    }

    pub fn classify_urgency(&self, query: &str) -> (UrgencyLevel, Vec<EmergencyContact>) {
        self.classifier.classify(query)
    }

    /// Advisory keyword-density score; never changes the tier
    pub fn risk_score(&self, query: &str) -> f32 {
        self.classifier.risk_score(query)
    }

    pub async fn ingest_document(
        &self,
        text: &str,
        source_name: &str,
        source_type: SourceType,
        source_url: Option<&str>,
        metadata: Map<String, Value>,
    ) -> IngestResult {
        self.pipeline
            .ingest(IngestInput {
                text,
                source_name,
                source_type,
                source_url,
                extra: metadata,
            })
            .await
    }

    /// Relevance of one chunk to a query
    pub async fn score(&self, query: &str, chunk: &DocumentChunk) -> Result<f32> {
        self.retriever.score(query, chunk).await
    }

    pub async fn retrieve_relevant_documents(
        &self,
        query: &str,
        top_k: Option<usize>,
    ) -> Result<Vec<ScoredChunk>> {
        self.retriever.retrieve(query, top_k).await
    }

    pub fn synthesize_answer(&self, query: &str, chunks: &[ScoredChunk]) -> SynthesizedAnswer {
        self.synthesis.synthesize(query, chunks)
    }

    pub fn collection_stats(&self) -> CollectionStats {
        self.store.stats()
    }

    /// Classify, retrieve, synthesize and attach per-tier guidance
    pub async fn answer_query(&self, request: &QueryRequest) -> Result<QueryResponse> {
        let query = request.validated_query(self.max_query_length)?;
        let preview: String = query.chars().take(50).collect();
        tracing::info!("Processing query: {}...", preview);

        let (urgency_level, emergency_contacts) = self.classify_urgency(query);
        let risk_score = self.risk_score(query);

        let retrieved = self.retrieve_relevant_documents(query, request.top_k).await?;
        tracing::info!("Retrieved {} relevant chunks", retrieved.len());

        let synthesized_answer = self.synthesize_answer(query, &retrieved);

        Ok(QueryResponse {
            response_id: Uuid::new_v4(),
            session_id: request.session_id.clone(),
            urgency_level,
            emergency_contacts,
            show_emergency_banner: UrgencyClassifier::should_show_emergency_banner(urgency_level),
            urgency_message: UrgencyClassifier::urgency_message(urgency_level).to_string(),
            risk_score,
            synthesized_answer,
            recommended_resources: guidance::recommended_resources(
                urgency_level,
                request.user_location.as_deref(),
            ),
            next_steps: guidance::next_steps(urgency_level),
            timestamp: Utc::now(),
        })
    }
}
