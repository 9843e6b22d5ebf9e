//! Application state
//!
//! Read-only: configuration and start time. Fitted models and datasets are
//! never stored here; each request builds its own.

use chrono::{DateTime, Utc};

use crate::pipeline::PipelineConfig;

use super::ServerConfig;

/// Application state shared across handlers
pub struct AppState {
    pub config: ServerConfig,
    pub started_at: DateTime<Utc>,
}

impl AppState {
    pub fn new(config: ServerConfig) -> Self {
        Self {
            config,
            started_at: Utc::now(),
        }
    }

    pub fn pipeline(&self) -> &PipelineConfig {
        &self.config.pipeline
    }

    pub fn uptime_secs(&self) -> i64 {
        Utc::now().signed_duration_since(self.started_at).num_seconds()
    }
}
