//! Query endpoint: triage plus synthesized answer

use axum::{extract::State, Json};
use std::time::Instant;

use crate::error::Result;
use crate::server::state::AppState;
use crate::types::{QueryRequest, QueryResponse};

/// POST /api/v1/query
pub async fn process_query(
    State(state): State<AppState>,
    Json(request): Json<QueryRequest>,
) -> Result<Json<QueryResponse>> {
    let start = Instant::now();
    let response = state.engine().answer_query(&request).await?;

    tracing::info!(
        "Query answered: urgency={}, sources={}, {}ms",
        response.urgency_level,
        response.synthesized_answer.sources.len(),
        start.elapsed().as_millis()
    );

    Ok(Json(response))
}
