//! Text chunking with whole-document and bounded-window policies

use std::collections::VecDeque;

use crate::config::{ChunkingConfig, ChunkingPolicy};

/// Split points, most meaningful first. The separator stays on the preceding piece.
const SEPARATORS: &[&str] = &["\n\n", "\n", ". ", " "];

/// Text chunker with configurable policy, size and overlap
#[derive(Debug, Clone)]
pub struct TextChunker {
    policy: ChunkingPolicy,
    /// Upper bound on chunk length in characters
    chunk_size: usize,
    /// Characters carried over between consecutive windows
    overlap: usize,
}

impl TextChunker {
    /// Create a new chunker
    pub fn new(policy: ChunkingPolicy, chunk_size: usize, overlap: usize) -> Self {
        let chunk_size = chunk_size.max(1);
        Self {
            policy,
            chunk_size,
            overlap: overlap.min(chunk_size - 1),
        }
    }

    pub fn from_config(config: &ChunkingConfig) -> Self {
        Self::new(config.policy, config.chunk_size, config.chunk_overlap)
    }

    pub fn policy(&self) -> ChunkingPolicy {
        self.policy
    }

    /// Split `text` into chunk contents under the configured policy
    pub fn chunk(&self, text: &str) -> Vec<String> {
        if text.trim().is_empty() {
            return Vec::new();
        }

        match self.policy {
            ChunkingPolicy::WholeDocument => vec![text.to_string()],
            ChunkingPolicy::BoundedWindow => self
                .split_recursive(text, SEPARATORS)
                .into_iter()
                .map(|chunk| chunk.trim().to_string())
                .filter(|chunk| !chunk.is_empty())
                .collect(),
        }
    }

    fn split_recursive(&self, text: &str, separators: &[&str]) -> Vec<String> {
        if char_len(text) <= self.chunk_size {
            return vec![text.to_string()];
        }

        let Some((separator, finer)) = separators.split_first() else {
            return self.hard_cut(text);
        };

        if !text.contains(separator) {
            return self.split_recursive(text, finer);
        }

        let mut chunks = Vec::new();
        let mut fitting: Vec<&str> = Vec::new();

        for piece in text.split_inclusive(separator) {
            if char_len(piece) <= self.chunk_size {
                fitting.push(piece);
            } else {
                if !fitting.is_empty() {
                    chunks.extend(self.merge(&fitting));
                    fitting.clear();
                }
                chunks.extend(self.split_recursive(piece, finer));
            }
        }

        if !fitting.is_empty() {
            chunks.extend(self.merge(&fitting));
        }
        chunks
    }

    /// Pack pieces into windows of at most `chunk_size`, carrying up to
    /// `overlap` characters of trailing pieces into the next window
    fn merge(&self, pieces: &[&str]) -> Vec<String> {
        let mut chunks = Vec::new();
        let mut window: VecDeque<&str> = VecDeque::new();
        let mut total = 0usize;

        for piece in pieces {
            let len = char_len(piece);

            if !window.is_empty() && total + len > self.chunk_size {
                chunks.push(window.iter().copied().collect::<String>());

                while total > self.overlap || (total > 0 && total + len > self.chunk_size) {
                    match window.pop_front() {
                        Some(dropped) => total -= char_len(dropped),
                        None => break,
                    }
                }
            }

            window.push_back(piece);
            total += len;
        }

        if !window.is_empty() {
            chunks.push(window.iter().copied().collect::<String>());
        }
        chunks
    }

    /// Last resort for a single unit with no smaller boundary
    fn hard_cut(&self, text: &str) -> Vec<String> {
        let chars: Vec<char> = text.chars().collect();
        let mut chunks = Vec::new();
        let mut start = 0usize;

        loop {
            let end = (start + self.chunk_size).min(chars.len());
            chunks.push(chars[start..end].iter().collect());
            if end == chars.len() {
                break;
            }
            start = end.saturating_sub(self.overlap).max(start + 1);
        }
        chunks
    }
}

fn char_len(text: &str) -> usize {
    text.chars().count()
}
