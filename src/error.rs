//! Error types for the ML showcase library

use thiserror::Error;

/// Result type alias for showcase operations
pub type Result<T> = std::result::Result<T, ShowcaseError>;

/// Main error type for datasets, models and pipelines
#[derive(Error, Debug)]
pub enum ShowcaseError {
    #[error("Data error: {0}")]
    DataError(String),

    #[error("Configuration error: {0}")]
    ConfigError(String),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerializationError(String),

    #[error("Invalid shape: expected {expected}, got {actual}")]
    ShapeError { expected: String, actual: String },

    #[error("Feature not found: {0}")]
    FeatureNotFound(String),

    #[error("Model not fitted")]
    ModelNotFitted,

    #[error("Invalid parameter: {name} = {value}, {reason}")]
    InvalidParameter {
        name: String,
        value: String,
        reason: String,
    },

    #[error("Computation error: {0}")]
    ComputationError(String),

    #[error("Invalid input: {0}")]
    InvalidInput(String),
}

impl ShowcaseError {
    /// True for failures raised while fitting or evaluating a model,
    /// as opposed to bad input or broken data.
    pub fn is_model_failure(&self) -> bool {
        matches!(
            self,
            ShowcaseError::ComputationError(_) | ShowcaseError::ModelNotFitted
        )
    }
}

impl From<polars::error::PolarsError> for ShowcaseError {
    fn from(err: polars::error::PolarsError) -> Self {
        ShowcaseError::DataError(err.to_string())
    }
}

impl From<serde_json::Error> for ShowcaseError {
    fn from(err: serde_json::Error) -> Self {
        ShowcaseError::SerializationError(err.to_string())
    }
}

impl From<ndarray::ShapeError> for ShowcaseError {
    fn from(err: ndarray::ShapeError) -> Self {
        ShowcaseError::ShapeError {
            expected: "valid shape".to_string(),
            actual: err.to_string(),
        }
    }
}
