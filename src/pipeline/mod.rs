//! Request-scoped pipelines
//!
//! Each pipeline is a straight-line computation: load a built-in dataset,
//! split it with a fixed seed, fit a fresh model, score it and return a
//! serializable report. No fitted model or dataset outlives a call.

pub mod classification;
mod config;
pub mod regression;

pub use classification::{KnnParams, KnnReport, ResolvedKnnParams};
pub use config::{ClassificationConfig, PipelineConfig, RegressionConfig};
pub use regression::{PredictionReport, RegressionReport};

/// Round half away from zero to `places` decimals.
pub(crate) fn round_to(value: f64, places: i32) -> f64 {
    if !value.is_finite() {
        return value;
    }
    let factor = 10f64.powi(places);
    (value * factor).round() / factor
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_round_to() {
        assert_eq!(round_to(1.23456, 2), 1.23);
        assert_eq!(round_to(0.987612, 4), 0.9876);
        assert_eq!(round_to(-2.345678, 2), -2.35);
        assert!(round_to(f64::NAN, 2).is_nan());
    }
}
