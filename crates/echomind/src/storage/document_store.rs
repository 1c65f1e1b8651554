//! Append-only chunk store with optional JSON snapshot persistence

use parking_lot::{Mutex, RwLock};
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use crate::error::{Error, Result};
use crate::types::{CollectionStats, DocumentChunk, StoreStatus};

/// Ordered, append-only collection of ingested chunks
///
/// Readers take `Arc` snapshots under a read lock. Writers are serialized by
/// `write_guard` and publish a whole batch under one write lock, so a reader
/// sees either all chunks of an ingestion call or none of them.
pub struct DocumentStore {
    chunks: RwLock<Vec<Arc<DocumentChunk>>>,
    /// Snapshot file; `None` keeps the store in memory
    path: Option<PathBuf>,
    write_guard: Mutex<()>,
}

impl DocumentStore {
    /// Create an empty in-memory store
    pub fn in_memory() -> Self {
        Self {
            chunks: RwLock::new(Vec::new()),
            path: None,
            write_guard: Mutex::new(()),
        }
    }

    /// Open a store backed by a JSON snapshot (a missing file means empty)
    pub fn open(path: impl Into<PathBuf>) -> Result<Self> {
        let path = path.into();
        let chunks = Self::load_snapshot(&path)?;
        tracing::info!("Loaded {} chunks from {}", chunks.len(), path.display());

        Ok(Self {
            chunks: RwLock::new(chunks.into_iter().map(Arc::new).collect()),
            path: Some(path),
            write_guard: Mutex::new(()),
        })
    }

    fn load_snapshot(path: &Path) -> Result<Vec<DocumentChunk>> {
        if !path.exists() {
            return Ok(Vec::new());
        }

        let content = fs::read_to_string(path)?;
        serde_json::from_str(&content).map_err(|e| {
            Error::storage(format!("Failed to parse snapshot {}: {}", path.display(), e))
        })
    }

    /// Append a single chunk
    pub fn add(&self, chunk: DocumentChunk) -> Result<()> {
        self.add_batch(vec![chunk]).map(|_| ())
    }

    /// Append chunks atomically, preserving their order; returns the new length
    pub fn add_batch(&self, chunks: Vec<DocumentChunk>) -> Result<usize> {
        let _writer = self.write_guard.lock();
        let incoming: Vec<Arc<DocumentChunk>> = chunks.into_iter().map(Arc::new).collect();

        if let Some(path) = &self.path {
            let current = self.snapshot();
            let combined: Vec<&DocumentChunk> = current
                .iter()
                .chain(incoming.iter())
                .map(Arc::as_ref)
                .collect();
            Self::write_snapshot(path, &combined)?;
        }

        let mut guard = self.chunks.write();
        guard.extend(incoming);
        Ok(guard.len())
    }

    fn write_snapshot(path: &Path, chunks: &[&DocumentChunk]) -> Result<()> {
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }

        let tmp_path = path.with_extension("json.tmp");
        let json = serde_json::to_vec(chunks)?;
        fs::write(&tmp_path, json)?;
        fs::rename(&tmp_path, path)?;

        tracing::debug!("Persisted {} chunks to {}", chunks.len(), path.display());
        Ok(())
    }

    /// Consistent view of every chunk in ingestion order
    pub fn snapshot(&self) -> Vec<Arc<DocumentChunk>> {
        self.chunks.read().clone()
    }

    /// Number of stored chunks
    pub fn len(&self) -> usize {
        self.chunks.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Collection statistics
    pub fn stats(&self) -> CollectionStats {
        let total_documents = self.len();
        CollectionStats {
            total_documents,
            status: if total_documents == 0 {
                StoreStatus::Empty
            } else {
                StoreStatus::Healthy
            },
        }
    }
}

impl Default for DocumentStore {
    fn default() -> Self {
        Self::in_memory()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{ChunkMetadata, SourceType};
    use chrono::Utc;

    fn chunk(source: &str, index: u32) -> DocumentChunk {
        DocumentChunk {
            id: DocumentChunk::make_id(source, 1, index),
            content: format!("{} content {}", source, index),
            metadata: ChunkMetadata {
                source_name: source.to_string(),
                source_type: SourceType::Ngo,
                source_url: None,
                chunk_index: index,
                total_chunks: 3,
                ingested_at: Utc::now(),
                content_hash: String::new(),
                extra: Default::default(),
            },
            embedding: None,
        }
    }

    #[test]
    fn test_append_order_and_stats() {
        let store = DocumentStore::in_memory();
        assert_eq!(store.stats().status, StoreStatus::Empty);
        assert!(store.snapshot().is_empty());

        store.add(chunk("a", 0)).unwrap();
        store.add_batch(vec![chunk("b", 0), chunk("b", 1)]).unwrap();

        let ids: Vec<_> = store.snapshot().iter().map(|c| c.id.clone()).collect();
        assert_eq!(ids, vec!["a_1_chunk_0", "b_1_chunk_0", "b_1_chunk_1"]);

        let stats = store.stats();
        assert_eq!(stats.total_documents, 3);
        assert_eq!(stats.status, StoreStatus::Healthy);
    }

    #[test]
    fn test_snapshot_is_stable() {
        let store = DocumentStore::in_memory();
        store.add(chunk("a", 0)).unwrap();

        let before = store.snapshot();
        store.add(chunk("a", 1)).unwrap();

        assert_eq!(before.len(), 1);
        assert_eq!(store.len(), 2);
    }

    #[test]
    fn test_concurrent_batches_stay_contiguous() {
        let store = Arc::new(DocumentStore::in_memory());

        let handles: Vec<_> = (0..8)
            .map(|t| {
                let store = Arc::clone(&store);
                std::thread::spawn(move || {
                    let source = format!("s{}", t);
                    let batch = (0..3).map(|i| chunk(&source, i)).collect();
                    store.add_batch(batch).unwrap();
                })
            })
            .collect();
        for handle in handles {
            handle.join().unwrap();
        }

        let all = store.snapshot();
        assert_eq!(all.len(), 24);
        for group in all.chunks(3) {
            let source = &group[0].metadata.source_name;
            assert!(group.iter().all(|c| &c.metadata.source_name == source));
            let indices: Vec<_> = group.iter().map(|c| c.metadata.chunk_index).collect();
            assert_eq!(indices, vec![0, 1, 2]);
        }
    }

    #[test]
    fn test_persistence_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("store").join("chunks.json");

        {
            let store = DocumentStore::open(&path).unwrap();
            assert!(store.is_empty());
            store.add_batch(vec![chunk("a", 0), chunk("a", 1)]).unwrap();
        }

        let reopened = DocumentStore::open(&path).unwrap();
        let ids: Vec<_> = reopened.snapshot().iter().map(|c| c.id.clone()).collect();
        assert_eq!(ids, vec!["a_1_chunk_0", "a_1_chunk_1"]);
        assert!(!path.with_extension("json.tmp").exists());
    }

    #[test]
    fn test_corrupt_snapshot_is_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("chunks.json");
        fs::write(&path, "not json").unwrap();

        assert!(matches!(DocumentStore::open(&path), Err(Error::Storage(_))));
    }
}
