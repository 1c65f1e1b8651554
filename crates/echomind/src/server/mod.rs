//! HTTP server for the wellness engine

pub mod routes;
pub mod state;

use axum::{extract::State, routing::get, Json, Router};
use chrono::Utc;
use std::collections::HashMap;
use std::net::SocketAddr;
use tower::ServiceBuilder;
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};

use crate::config::EchoConfig;
use crate::error::{Error, Result};
use crate::types::HealthCheckResponse;
use state::AppState;

/// EchoMind HTTP server
pub struct EchoServer {
    config: EchoConfig,
    state: AppState,
}

impl EchoServer {
    /// Create a new server, building the engine from `config`
    pub fn new(config: EchoConfig) -> Result<Self> {
        let state = AppState::new(config.clone())?;
        Ok(Self { config, state })
    }

    /// Create around existing state
    pub fn with_state(state: AppState) -> Self {
        Self {
            config: state.config().clone(),
            state,
        }
    }

    /// Build the router with all routes
    pub fn router(&self) -> Router {
        let router = Router::new()
            .route("/", get(root))
            .route("/health", get(health_check))
            .nest(&self.config.server.api_prefix, routes::api_routes())
            .with_state(self.state.clone())
            .layer(ServiceBuilder::new().layer(TraceLayer::new_for_http()));

        if self.config.server.enable_cors {
            router.layer(
                CorsLayer::new()
                    .allow_origin(Any)
                    .allow_methods(Any)
                    .allow_headers(Any),
            )
        } else {
            router
        }
    }

    /// Start the server
    pub async fn start(self) -> Result<()> {
        let addr: SocketAddr = self
            .address()
            .parse()
            .map_err(|e| Error::Config(format!("Invalid address: {}", e)))?;

        let router = self.router();

        tracing::info!("Starting EchoMind server on http://{}", addr);

        let listener = tokio::net::TcpListener::bind(addr)
            .await
            .map_err(|e| Error::Config(format!("Failed to bind: {}", e)))?;

        axum::serve(listener, router)
            .await
            .map_err(|e| Error::Internal(format!("Server error: {}", e)))?;

        Ok(())
    }

    /// Get the server address
    pub fn address(&self) -> String {
        format!("{}:{}", self.config.server.host, self.config.server.port)
    }
}

/// GET /
async fn root() -> Json<serde_json::Value> {
    Json(serde_json::json!({
        "name": "EchoMind API",
        "version": env!("CARGO_PKG_VERSION"),
        "status": "running",
        "health": "/health",
    }))
}

/// GET /health
async fn health_check(State(state): State<AppState>) -> Json<HealthCheckResponse> {
    let stats = state.engine().collection_stats();

    let services = HashMap::from([
        ("rag_service".to_string(), "healthy".to_string()),
        ("urgency_classifier".to_string(), "healthy".to_string()),
        ("vector_db".to_string(), stats.status.as_str().to_string()),
    ]);

    Json(HealthCheckResponse {
        status: "healthy".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        timestamp: Utc::now(),
        services,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::{to_bytes, Body};
    use axum::http::{header, Request, StatusCode};
    use serde_json::{json, Value};
    use tower::ServiceExt;

    fn app() -> Router {
        EchoServer::new(EchoConfig::default()).unwrap().router()
    }

    async fn send(app: Router, request: Request<Body>) -> (StatusCode, Value) {
        let response = app.oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        (status, serde_json::from_slice(&bytes).unwrap_or(Value::Null))
    }

    fn post(uri: &str, body: Value) -> Request<Body> {
        Request::builder()
            .method("POST")
            .uri(uri)
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .unwrap()
    }

    fn get(uri: &str) -> Request<Body> {
        Request::builder().uri(uri).body(Body::empty()).unwrap()
    }

    #[tokio::test]
    async fn test_health_on_empty_store() {
        let (status, body) = send(app(), get("/health")).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["status"], "healthy");
        assert_eq!(body["services"]["vector_db"], "empty");
    }

    #[tokio::test]
    async fn test_ingest_then_query() {
        let app = app();

        let (status, body) = send(
            app.clone(),
            post(
                "/api/v1/ingest",
                json!({
                    "document_text": "Anxiety causes stress. Breathing helps anxiety.",
                    "source_name": "Test Source",
                    "source_type": "university",
                    "metadata": {"topics": "anxiety"}
                }),
            ),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["status"], "success");
        assert_eq!(body["chunks_created"], 1);

        let (status, body) = send(app.clone(), get("/api/v1/stats")).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, json!({"total_documents": 1, "status": "healthy"}));

        let (status, body) =
            send(app, post("/api/v1/query", json!({"query": "anxiety help"}))).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["urgency_level"], "low");
        assert_eq!(body["synthesized_answer"]["sources"][0]["source_name"], "Test Source");
        assert_eq!(body["synthesized_answer"]["related_topics"], json!(["anxiety"]));
    }

    #[tokio::test]
    async fn test_blank_query_is_bad_request() {
        let (status, body) = send(app(), post("/api/v1/query", json!({"query": "  "}))).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"]["type"], "invalid_request");
    }

    #[tokio::test]
    async fn test_url_only_ingest_rejected() {
        let (status, _) = send(
            app(),
            post(
                "/api/v1/ingest",
                json!({
                    "document_url": "https://example.org/guide",
                    "source_name": "Guide",
                    "source_type": "ngo"
                }),
            ),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_critical_query_shows_banner() {
        let (status, body) = send(
            app(),
            post("/api/v1/query", json!({"query": "I want to kill myself"})),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["urgency_level"], "critical");
        assert_eq!(body["show_emergency_banner"], true);
        assert_eq!(body["emergency_contacts"].as_array().map(Vec::len), Some(3));
    }
}
