//! ML Showcase - Main Entry Point
//!
//! Serves the regression and k-NN demos, or runs one pipeline from the CLI.

use clap::Parser;
use ml_showcase::cli::{cmd_knn, cmd_predict, cmd_regression, cmd_serve, load_pipeline_config, Cli, Commands};
use ml_showcase::pipeline::KnnParams;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "ml_showcase=info,tower_http=info".into()),
        )
        .init();

    let cli = Cli::parse();
    let pipeline = load_pipeline_config(cli.config.as_deref())?;

    match cli.command {
        Some(Commands::Serve { host, port }) => {
            cmd_serve(&host, port, pipeline).await?;
        }
        Some(Commands::Regression) => {
            cmd_regression(&pipeline)?;
        }
        Some(Commands::Predict { rooms }) => {
            cmd_predict(&pipeline, rooms)?;
        }
        Some(Commands::Knn { feature_x, feature_y, k }) => {
            cmd_knn(&pipeline, KnnParams { feature_x, feature_y, k })?;
        }
        None => {
            let defaults = ml_showcase::server::ServerConfig::default();
            cmd_serve(&defaults.host, defaults.port, pipeline).await?;
        }
    }

    Ok(())
}
