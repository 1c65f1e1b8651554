//! API routes for the wellness server

pub mod ingest;
pub mod query;
pub mod stats;

use axum::{
    routing::{get, post},
    Router,
};

use crate::server::state::AppState;

/// Build all API routes
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .route("/query", post(query::process_query))
        .route("/ingest", post(ingest::ingest_document))
        .route("/stats", get(stats::get_stats))
}
