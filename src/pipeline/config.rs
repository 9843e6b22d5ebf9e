//! Pipeline configuration
//!
//! Sample sizes, split ratios, seeds and parameter defaults for both
//! pipelines. Passed into every pipeline call rather than baked in.

use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::error::{Result, ShowcaseError};

/// Configuration for the housing regression pipeline
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RegressionConfig {
    /// Records taken from the front of the dataset
    pub sample_size: usize,

    /// Column used as the single predictor
    pub feature_index: usize,

    /// Multiplier applied to the target ($100k -> $10k)
    pub target_scale: f64,

    /// Fraction of records held out for testing
    pub test_ratio: f64,

    /// Shuffle seed for the split
    pub seed: u64,

    /// Points on the plotted regression line
    pub line_points: usize,

    /// Room count used when `/predict` gets none
    pub default_rooms: f64,
}

impl Default for RegressionConfig {
    fn default() -> Self {
        Self {
            sample_size: 200,
            feature_index: 0,
            target_scale: 10.0,
            test_ratio: 0.2,
            seed: 42,
            line_points: 100,
            default_rooms: 5.0,
        }
    }
}

/// Configuration for the iris k-NN pipeline
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ClassificationConfig {
    pub test_ratio: f64,
    pub seed: u64,
    pub default_feature_x: usize,
    pub default_feature_y: usize,
    pub default_k: usize,
    pub min_k: usize,
    pub max_k: usize,
}

impl Default for ClassificationConfig {
    fn default() -> Self {
        Self {
            test_ratio: 0.3,
            seed: 42,
            default_feature_x: 2,
            default_feature_y: 3,
            default_k: 5,
            min_k: 1,
            max_k: 20,
        }
    }
}

/// Top-level pipeline configuration
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PipelineConfig {
    pub regression: RegressionConfig,
    pub classification: ClassificationConfig,
}

impl PipelineConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// Load from a JSON file; missing fields keep their defaults.
    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self> {
        let raw = std::fs::read_to_string(path.as_ref())?;
        let config: Self = serde_json::from_str(&raw)?;
        config.validate()?;
        Ok(config)
    }

    pub fn with_regression(mut self, regression: RegressionConfig) -> Self {
        self.regression = regression;
        self
    }

    pub fn with_classification(mut self, classification: ClassificationConfig) -> Self {
        self.classification = classification;
        self
    }

    pub fn validate(&self) -> Result<()> {
        let r = &self.regression;
        check_ratio("regression.test_ratio", r.test_ratio)?;
        if r.sample_size == 0 {
            return Err(config_error("regression.sample_size must be positive"));
        }
        if r.line_points < 2 {
            return Err(config_error("regression.line_points must be at least 2"));
        }
        if !r.target_scale.is_finite() || !r.default_rooms.is_finite() {
            return Err(config_error("regression scale and default rooms must be finite"));
        }

        let c = &self.classification;
        check_ratio("classification.test_ratio", c.test_ratio)?;
        if c.min_k == 0 || c.min_k > c.max_k {
            return Err(config_error("classification k range must satisfy 1 <= min_k <= max_k"));
        }
        if c.default_k < c.min_k || c.default_k > c.max_k {
            return Err(config_error("classification.default_k must lie within [min_k, max_k]"));
        }
        Ok(())
    }
}

fn check_ratio(name: &str, ratio: f64) -> Result<()> {
    if ratio > 0.0 && ratio < 1.0 {
        Ok(())
    } else {
        Err(config_error(&format!("{} must be strictly between 0 and 1, got {}", name, ratio)))
    }
}

fn config_error(msg: &str) -> ShowcaseError {
    ShowcaseError::ConfigError(msg.to_string())
}
