//! Iris k-NN classification pipeline
//!
//! load -> feature pair -> seeded split -> k-NN fit -> predictions ->
//! accuracy + confusion matrix -> report.

use ndarray::Array1;
use serde::{Deserialize, Serialize};
use tracing::debug;

use super::config::ClassificationConfig;
use super::round_to;
use crate::datasets::iris;
use crate::error::{Result, ShowcaseError};
use crate::training::{accuracy_score, confusion_matrix, train_test_split, KNNClassifier};

/// Caller-supplied parameters, unvalidated. Absent values take defaults.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct KnnParams {
    pub feature_x: Option<i64>,
    pub feature_y: Option<i64>,
    pub k: Option<i64>,
}

/// Parameters after out-of-range values were replaced by defaults.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ResolvedKnnParams {
    pub feature_x: usize,
    pub feature_y: usize,
    pub k: usize,
}

impl KnnParams {
    /// Substitute defaults for anything out of range. Never fails: a feature
    /// index outside `[0, n_features)` falls back to its default, and so does
    /// a k outside `[min_k, max_k]`.
    pub fn resolve(&self, config: &ClassificationConfig, n_features: usize) -> ResolvedKnnParams {
        let feature = |value: Option<i64>, default: usize| -> usize {
            value
                .and_then(|v| usize::try_from(v).ok())
                .filter(|&v| v < n_features)
                .unwrap_or(default)
        };
        let k = self
            .k
            .and_then(|v| usize::try_from(v).ok())
            .filter(|&v| (config.min_k..=config.max_k).contains(&v))
            .unwrap_or(config.default_k);

        ResolvedKnnParams {
            feature_x: feature(self.feature_x, config.default_feature_x),
            feature_y: feature(self.feature_y, config.default_feature_y),
            k,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CurrentFeatures {
    pub x: String,
    pub y: String,
    pub x_idx: usize,
    pub y_idx: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LabeledPoints {
    pub x: Vec<f64>,
    pub y: Vec<f64>,
    pub labels: Vec<usize>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PredictedPoints {
    pub x: Vec<f64>,
    pub y: Vec<f64>,
    pub labels: Vec<usize>,
    pub predictions: Vec<usize>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct KnnData {
    pub train: LabeledPoints,
    pub test: PredictedPoints,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct KnnMetrics {
    pub accuracy: f64,
    pub confusion_matrix: Vec<Vec<usize>>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct KnnDescription {
    pub dataset: String,
    pub samples: usize,
    pub train_size: usize,
    pub test_size: usize,
    pub classes: usize,
}

/// Body of `/api/knn/data`
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct KnnReport {
    pub feature_names: Vec<String>,
    pub target_names: Vec<String>,
    pub current_features: CurrentFeatures,
    pub k_neighbors: usize,
    pub data: KnnData,
    pub metrics: KnnMetrics,
    pub description: KnnDescription,
}

fn class_labels(target: &Array1<f64>, n_classes: usize) -> Result<Array1<usize>> {
    target
        .iter()
        .map(|&t| {
            if t >= 0.0 && t.fract() == 0.0 && (t as usize) < n_classes {
                Ok(t as usize)
            } else {
                Err(ShowcaseError::DataError(format!("invalid class label {}", t)))
            }
        })
        .collect()
}

/// Fit k-NN on a two-feature projection of iris and score it on the held-out split.
pub fn run(config: &ClassificationConfig, params: KnnParams) -> Result<KnnReport> {
    let dataset = iris::load()?;
    let resolved = params.resolve(config, dataset.n_features());
    let n_classes = dataset.target_names.len();

    let x = dataset.feature_pair(resolved.feature_x, resolved.feature_y)?;
    let y = class_labels(&dataset.target, n_classes)?;

    let split = train_test_split(dataset.n_samples(), config.test_ratio, config.seed)?;
    let (x_train, x_test, y_train, y_test) = split.apply(&x, &y)?;

    let mut knn = KNNClassifier::with_k(resolved.k);
    knn.fit(&x_train, &y_train)?;
    let y_pred = knn.predict(&x_test)?;

    let accuracy = accuracy_score(&y_test, &y_pred)?;
    let matrix = confusion_matrix(&y_test, &y_pred, n_classes)?;

    debug!(
        feature_x = resolved.feature_x,
        feature_y = resolved.feature_y,
        k = resolved.k,
        accuracy,
        "Classification pipeline fitted"
    );

    Ok(KnnReport {
        current_features: CurrentFeatures {
            x: dataset.feature_names[resolved.feature_x].clone(),
            y: dataset.feature_names[resolved.feature_y].clone(),
            x_idx: resolved.feature_x,
            y_idx: resolved.feature_y,
        },
        k_neighbors: resolved.k,
        data: KnnData {
            train: LabeledPoints {
                x: x_train.column(0).to_vec(),
                y: x_train.column(1).to_vec(),
                labels: y_train.to_vec(),
            },
            test: PredictedPoints {
                x: x_test.column(0).to_vec(),
                y: x_test.column(1).to_vec(),
                labels: y_test.to_vec(),
                predictions: y_pred.to_vec(),
            },
        },
        metrics: KnnMetrics {
            accuracy: round_to(accuracy, 4),
            confusion_matrix: matrix,
        },
        description: KnnDescription {
            dataset: dataset.name.clone(),
            samples: dataset.n_samples(),
            train_size: split.train_len(),
            test_size: split.test_len(),
            classes: n_classes,
        },
        feature_names: dataset.feature_names,
        target_names: dataset.target_names,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn params(x: i64, y: i64, k: i64) -> KnnParams {
        KnnParams {
            feature_x: Some(x),
            feature_y: Some(y),
            k: Some(k),
        }
    }

    #[test]
    fn test_resolve_defaults() {
        let config = ClassificationConfig::default();
        let resolved = KnnParams::default().resolve(&config, 4);
        assert_eq!(resolved, ResolvedKnnParams { feature_x: 2, feature_y: 3, k: 5 });
    }

    #[test]
    fn test_resolve_clamps_out_of_range() {
        let config = ClassificationConfig::default();
        assert_eq!(params(10, -1, 0).resolve(&config, 4), ResolvedKnnParams { feature_x: 2, feature_y: 3, k: 5 });
        assert_eq!(params(4, 4, 25).resolve(&config, 4).k, 5);
        assert_eq!(params(0, 1, 20).resolve(&config, 4), ResolvedKnnParams { feature_x: 0, feature_y: 1, k: 20 });
        assert_eq!(params(3, 3, 1).resolve(&config, 4).k, 1);
    }

    #[test]
    fn test_petal_features_classify_well() {
        let report = run(&ClassificationConfig::default(), KnnParams::default()).unwrap();
        assert_eq!(report.k_neighbors, 5);
        assert_eq!(report.current_features.x, "Petal length");
        assert_eq!(report.description.train_size, 105);
        assert_eq!(report.description.test_size, 45);
        assert!(report.metrics.accuracy > 0.85, "accuracy {}", report.metrics.accuracy);
    }

    #[test]
    fn test_confusion_matrix_matches_test_labels() {
        let report = run(&ClassificationConfig::default(), params(0, 1, 7)).unwrap();
        let cm = &report.metrics.confusion_matrix;
        assert_eq!(cm.len(), 3);
        for (class, row) in cm.iter().enumerate() {
            assert_eq!(row.len(), 3);
            let expected = report.data.test.labels.iter().filter(|&&l| l == class).count();
            assert_eq!(row.iter().sum::<usize>(), expected);
        }
    }

    #[test]
    fn test_run_is_deterministic() {
        let config = ClassificationConfig::default();
        assert_eq!(
            run(&config, params(1, 2, 3)).unwrap(),
            run(&config, params(1, 2, 3)).unwrap()
        );
    }
}
