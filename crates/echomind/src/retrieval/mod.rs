//! Relevance scoring and ranked retrieval

pub mod scorer;
pub mod search;

use std::sync::Arc;

use crate::config::{ScoringConfig, ScoringStrategy};
use crate::error::Result;
use crate::providers::build_embedder;

pub use scorer::{cosine_similarity, LexicalScorer, PreparedQuery, RelevanceScorer, VectorScorer};
pub use search::Retriever;

/// Build the configured scoring strategy
pub fn build_scorer(config: &ScoringConfig) -> Result<Arc<dyn RelevanceScorer>> {
    Ok(match config.strategy {
        ScoringStrategy::Lexical => Arc::new(LexicalScorer),
        ScoringStrategy::Vector => Arc::new(VectorScorer::new(build_embedder(&config.embedding)?)),
    })
}
