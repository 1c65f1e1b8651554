//! Application state for the HTTP server

use std::sync::Arc;

use crate::config::EchoConfig;
use crate::engine::WellnessEngine;
use crate::error::Result;

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    inner: Arc<AppStateInner>,
}

struct AppStateInner {
    config: EchoConfig,
    engine: Arc<WellnessEngine>,
}

impl AppState {
    /// Create new application state
    pub fn new(config: EchoConfig) -> Result<Self> {
        tracing::info!("Initializing application state...");
        let engine = Arc::new(WellnessEngine::from_config(&config)?);
        Ok(Self::with_engine(config, engine))
    }

    /// Wrap an already constructed engine
    pub fn with_engine(config: EchoConfig, engine: Arc<WellnessEngine>) -> Self {
        Self {
            inner: Arc::new(AppStateInner { config, engine }),
        }
    }

    pub fn config(&self) -> &EchoConfig {
        &self.inner.config
    }

    pub fn engine(&self) -> &WellnessEngine {
        &self.inner.engine
    }
}
