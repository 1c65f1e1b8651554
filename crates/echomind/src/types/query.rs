//! Request types

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::error::{Error, Result};

use super::document::SourceType;

/// User query request
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct QueryRequest {
    /// The user's wellness query
    pub query: String,

    /// Session identifier for context tracking
    #[serde(default)]
    pub session_id: Option<String>,

    /// User's location for localized resources
    #[serde(default)]
    pub user_location: Option<String>,

    /// Number of chunks to retrieve (defaults to the configured top_k)
    #[serde(default)]
    pub top_k: Option<usize>,

    /// User preferences (cost, insurance, ...)
    #[serde(default)]
    pub preferences: Map<String, Value>,
}

impl QueryRequest {
    /// Create a new query
    pub fn new(query: impl Into<String>) -> Self {
        Self {
            query: query.into(),
            ..Default::default()
        }
    }

    /// Trimmed query text, rejecting empty or overlong input
    pub fn validated_query(&self, max_length: usize) -> Result<&str> {
        let query = self.query.trim();
        if query.is_empty() {
            return Err(Error::invalid_request("Query cannot be empty"));
        }
        if query.chars().count() > max_length {
            return Err(Error::invalid_request(format!(
                "Query exceeds {} characters",
                max_length
            )));
        }
        if self.top_k == Some(0) {
            return Err(Error::invalid_request("top_k must be greater than zero"));
        }
        Ok(query)
    }
}

/// Request to add a document to the knowledge base
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IngestDocumentRequest {
    #[serde(default)]
    pub document_url: Option<String>,
    #[serde(default)]
    pub document_text: Option<String>,
    pub source_name: String,
    pub source_type: SourceType,
    #[serde(default)]
    pub metadata: Map<String, Value>,
}

impl IngestDocumentRequest {
    /// Document text to ingest; URL fetching is not supported
    pub fn text(&self) -> Result<&str> {
        match (self.document_text.as_deref(), self.document_url.as_deref()) {
            (Some(text), _) if !text.trim().is_empty() => Ok(text),
            (_, Some(url)) if !url.trim().is_empty() => Err(Error::invalid_request(
                "URL fetching not implemented yet. Please provide document_text.",
            )),
            _ => Err(Error::invalid_request(
                "Either document_url or document_text must be provided",
            )),
        }
    }
}
