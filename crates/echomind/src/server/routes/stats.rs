//! Knowledge base statistics

use axum::{extract::State, Json};

use crate::server::state::AppState;
use crate::types::CollectionStats;

/// GET /api/v1/stats
pub async fn get_stats(State(state): State<AppState>) -> Json<CollectionStats> {
    Json(state.engine().collection_stats())
}
