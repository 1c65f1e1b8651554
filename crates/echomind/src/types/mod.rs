//! Core types for the wellness engine

pub mod document;
pub mod query;
pub mod response;
pub mod triage;

pub use document::{ChunkMetadata, DocumentChunk, SourceType};
pub use query::{IngestDocumentRequest, QueryRequest};
pub use response::{
    CollectionStats, ConfidenceLevel, HealthCheckResponse, IngestResult, IngestStatus, QueryResponse,
    ResourceRecommendation, ScoredChunk, SourceReference, StoreStatus, SynthesizedAnswer,
};
pub use triage::{EmergencyContact, UrgencyLevel};
