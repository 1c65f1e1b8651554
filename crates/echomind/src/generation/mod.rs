//! Answer generation with source citations

pub mod citation;
pub mod synthesis;

pub use citation::{extract_sources, truncate_with_ellipsis};
pub use synthesis::{error_answer, no_information_answer, SynthesisEngine};
