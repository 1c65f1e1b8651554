//! Source references for synthesized answers

use std::collections::HashSet;

use crate::types::{ScoredChunk, SourceReference};

/// Characters of chunk content kept in a source excerpt
pub const EXCERPT_CHARS: usize = 150;

/// Cut `text` to `max_chars` characters, appending "..." when anything was dropped
pub fn truncate_with_ellipsis(text: &str, max_chars: usize) -> String {
    match text.char_indices().nth(max_chars) {
        Some((cut, _)) => format!("{}...", &text[..cut]),
        None => text.to_string(),
    }
}

/// Stable identifier for a source name
pub fn source_id(source_name: &str) -> String {
    source_name.replace(' ', "_").to_lowercase()
}

/// One reference per distinct source name, taken from its highest-ranked chunk
pub fn extract_sources(chunks: &[ScoredChunk]) -> Vec<SourceReference> {
    let mut seen = HashSet::new();

    chunks
        .iter()
        .filter(|chunk| seen.insert(chunk.metadata.source_name.as_str()))
        .map(|chunk| {
            let meta = &chunk.metadata;
            SourceReference {
                source_id: source_id(&meta.source_name),
                source_name: meta.source_name.clone(),
                source_type: meta.source_type,
                source_url: meta.source_url.clone(),
                trust_score: meta.trust_score(),
                last_verified: meta.ingested_at,
                excerpt: Some(truncate_with_ellipsis(&chunk.content, EXCERPT_CHARS)),
            }
        })
        .collect()
}
