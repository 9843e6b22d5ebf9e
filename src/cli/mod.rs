//! ML Showcase CLI Module
//!
//! Runs the web server, or a single pipeline with the report printed as JSON.

use clap::{Parser, Subcommand};
use colored::*;
use serde::Serialize;
use std::path::{Path, PathBuf};

use crate::pipeline::{classification, regression, KnnParams, PipelineConfig};

fn dim(s: &str) -> ColoredString { s.truecolor(100, 100, 100) }
fn accent(s: &str) -> ColoredString { s.truecolor(120, 170, 255) }

#[derive(Parser)]
#[command(name = "ml-showcase")]
#[command(author, version, about = "Linear regression and k-NN teaching demos over HTTP", long_about = None)]
pub struct Cli {
    /// Pipeline configuration file (JSON); missing fields keep defaults
    #[arg(short, long, global = true, env = "PIPELINE_CONFIG")]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Start the web server (default)
    Serve {
        /// Host address to bind
        #[arg(long, env = "API_HOST", default_value = "0.0.0.0")]
        host: String,

        /// Port to listen on
        #[arg(short, long, env = "API_PORT", default_value = "8080")]
        port: u16,
    },

    /// Run the regression pipeline once and print the report
    Regression,

    /// Predict a house price from the average number of rooms
    Predict {
        /// Average rooms (falls back to the configured default)
        #[arg(short, long)]
        rooms: Option<f64>,
    },

    /// Run the k-NN pipeline once and print the report
    Knn {
        /// Feature index for the x axis (0-3)
        #[arg(long, allow_negative_numbers = true)]
        feature_x: Option<i64>,

        /// Feature index for the y axis (0-3)
        #[arg(long, allow_negative_numbers = true)]
        feature_y: Option<i64>,

        /// Number of neighbors
        #[arg(short, long, allow_negative_numbers = true)]
        k: Option<i64>,
    },
}

/// Load and validate the pipeline configuration, or fall back to defaults.
pub fn load_pipeline_config(path: Option<&Path>) -> anyhow::Result<PipelineConfig> {
    match path {
        Some(path) => {
            let config = PipelineConfig::from_json_file(path)?;
            tracing::info!(path = %path.display(), "Loaded pipeline configuration");
            Ok(config)
        }
        None => Ok(PipelineConfig::default()),
    }
}

fn print_json<T: Serialize>(value: &T) -> anyhow::Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

pub fn cmd_regression(pipeline: &PipelineConfig) -> anyhow::Result<()> {
    let report = regression::run(&pipeline.regression)?;
    print_json(&report)
}

pub fn cmd_predict(pipeline: &PipelineConfig, rooms: Option<f64>) -> anyhow::Result<()> {
    let rooms = rooms.unwrap_or(pipeline.regression.default_rooms);
    let report = regression::predict(&pipeline.regression, rooms)?;
    print_json(&report)
}

pub fn cmd_knn(pipeline: &PipelineConfig, params: KnnParams) -> anyhow::Result<()> {
    let report = classification::run(&pipeline.classification, params)?;
    print_json(&report)
}

pub async fn cmd_serve(host: &str, port: u16, pipeline: PipelineConfig) -> anyhow::Result<()> {
    use crate::server::{run_server, ServerConfig};

    println!();
    println!("  {}", "ML Showcase".white().bold());
    println!("  {}", dim(&format!("v{}", env!("CARGO_PKG_VERSION"))));
    println!();
    println!("  {} {}", dim("Demos  "), accent(&format!("http://{}:{}", host, port)));
    println!("  {} {}", dim("Health "), accent(&format!("http://{}:{}/api/health", host, port)));
    println!("  {}", dim("ctrl+c to stop"));
    println!();

    let config = ServerConfig {
        host: host.to_string(),
        port,
        pipeline,
    };
    run_server(config).await
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_knn_command() {
        let cli = Cli::try_parse_from(["ml-showcase", "knn", "--feature-x", "-1", "-k", "7"]).unwrap();
        match cli.command {
            Some(Commands::Knn { feature_x, feature_y, k }) => {
                assert_eq!(feature_x, Some(-1));
                assert_eq!(feature_y, None);
                assert_eq!(k, Some(7));
            }
            _ => panic!("expected knn command"),
        }
    }

    #[test]
    fn test_no_subcommand_defaults_to_none() {
        let cli = Cli::try_parse_from(["ml-showcase"]).unwrap();
        assert!(cli.command.is_none());
    }

    #[test]
    fn test_missing_config_file() {
        assert!(load_pipeline_config(Some(Path::new("/nonexistent/pipeline.json"))).is_err());
        assert_eq!(load_pipeline_config(None).unwrap(), PipelineConfig::default());
    }
}
