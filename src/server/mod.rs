//! ML Showcase Server Module
//!
//! JSON API and HTML pages for the regression and k-NN demos.

mod api;
mod error;
mod handlers;
mod pages;
mod state;

pub use api::create_router;
pub use error::ServerError;
pub use handlers::ApiSuccess;
pub use state::AppState;

use std::net::SocketAddr;
use std::sync::Arc;
use tracing::info;

use crate::pipeline::PipelineConfig;

/// Server configuration
#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    pub pipeline: PipelineConfig,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: std::env::var("API_HOST").unwrap_or_else(|_| "0.0.0.0".to_string()),
            port: std::env::var("API_PORT")
                .ok()
                .and_then(|p| p.parse().ok())
                .unwrap_or(8080),
            pipeline: PipelineConfig::default(),
        }
    }
}

/// Validate the pipeline configuration, bind and serve until ctrl+c.
pub async fn run_server(config: ServerConfig) -> anyhow::Result<()> {
    config.pipeline.validate()?;

    let start_time = chrono::Utc::now();
    let addr: SocketAddr = format!("{}:{}", config.host, config.port).parse()?;
    info!(
        host = %config.host,
        port = config.port,
        address = %addr,
        regression_samples = config.pipeline.regression.sample_size,
        started_at = %start_time.to_rfc3339(),
        "ML Showcase server starting"
    );

    let state = Arc::new(AppState::new(config));
    let app = create_router(state);

    info!(
        regression = %format!("http://{}/regression", addr),
        knn = %format!("http://{}/knn", addr),
        "Demo pages mounted"
    );

    let listener = tokio::net::TcpListener::bind(addr).await?;
    info!(address = %addr, pid = std::process::id(), "Listening");

    let shutdown_signal = async move {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!(error = %e, "Failed to listen for ctrl+c, graceful shutdown disabled");
            std::future::pending::<()>().await;
        }
        let uptime = chrono::Utc::now().signed_duration_since(start_time);
        info!(
            uptime_secs = uptime.num_seconds(),
            "ctrl+c received, draining requests"
        );
    };

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal)
        .await?;

    info!("Stopped");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = ServerConfig {
            host: "127.0.0.1".to_string(),
            port: 0,
            ..Default::default()
        };
        assert_eq!(config.pipeline, PipelineConfig::default());
        assert!(config.pipeline.validate().is_ok());
    }
}
