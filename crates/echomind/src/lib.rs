//! echomind: wellness query triage and retrieval-synthesis engine
//!
//! Queries are classified into urgency tiers with matching emergency contacts,
//! answered from an append-only store of trusted documents, and composed into
//! extractive answers that cite their sources.

pub mod config;
pub mod engine;
pub mod error;
pub mod generation;
pub mod ingestion;
pub mod providers;
pub mod retrieval;
pub mod server;
pub mod storage;
pub mod triage;
pub mod types;

pub use config::EchoConfig;
pub use engine::WellnessEngine;
pub use error::{Error, Result};
pub use types::{
    document::{ChunkMetadata, DocumentChunk, SourceType},
    query::QueryRequest,
    response::{QueryResponse, ScoredChunk, SynthesizedAnswer},
    triage::{EmergencyContact, UrgencyLevel},
};
