//! Document ingestion pipeline

pub mod chunker;
pub mod files;
pub mod pipeline;

pub use chunker::TextChunker;
pub use files::discover_text_files;
pub use pipeline::{IngestInput, IngestPipeline};
