//! ML Showcase - classic machine-learning demos over HTTP
//!
//! Two independent, stateless pipelines:
//! - Linear regression of house prices on the average number of rooms
//! - k-nearest-neighbor classification of iris flowers on two measurements
//!
//! Every call loads the built-in dataset, splits it with a fixed seed, fits a
//! fresh model and returns a serializable report. Nothing is cached between
//! calls.
//!
//! # Modules
//!
//! - [`datasets`] - Built-in housing and iris data
//! - [`training`] - Splitting, linear regression, k-NN, metrics
//! - [`pipeline`] - Configuration and the two end-to-end pipelines
//! - [`server`] - HTTP server with JSON API and HTML pages
//! - [`cli`] - Command-line interface

pub mod error;

pub mod datasets;
pub mod training;
pub mod pipeline;

pub mod server;
pub mod cli;

pub use error::{Result, ShowcaseError};

/// Re-export commonly used types
pub mod prelude {
    pub use crate::error::{Result, ShowcaseError};
    pub use crate::datasets::Dataset;
    pub use crate::training::{KNNClassifier, LinearRegression, RegressionMetrics, TrainTestSplit};
    pub use crate::pipeline::{ClassificationConfig, KnnParams, PipelineConfig, RegressionConfig};
    pub use crate::server::{create_router, AppState, ServerConfig};
}
