//! Document ingestion endpoint

use axum::{extract::State, Json};

use crate::error::Result;
use crate::server::state::AppState;
use crate::types::{IngestDocumentRequest, IngestResult};

/// POST /api/v1/ingest
///
/// Only inline `document_text` is accepted; URL fetching is not supported.
/// Pipeline failures are reported in the body with `status: "error"`.
pub async fn ingest_document(
    State(state): State<AppState>,
    Json(request): Json<IngestDocumentRequest>,
) -> Result<Json<IngestResult>> {
    let text = request.text()?;
    tracing::info!("Ingesting document: {}", request.source_name);

    let result = state
        .engine()
        .ingest_document(
            text,
            &request.source_name,
            request.source_type,
            request.document_url.as_deref(),
            request.metadata.clone(),
        )
        .await;

    Ok(Json(result))
}
