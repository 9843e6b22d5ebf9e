//! K-Nearest Neighbors classifier
//!
//! Euclidean distance, uniform majority vote. Query rows are classified in
//! parallel; each one keeps its k best candidates in a bounded max-heap.

use ndarray::{Array1, Array2, ArrayView1};
use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::collections::BinaryHeap;

use crate::error::{Result, ShowcaseError};

/// KNN configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct KNNConfig {
    /// Number of neighbors
    pub n_neighbors: usize,
}

impl Default for KNNConfig {
    fn default() -> Self {
        Self { n_neighbors: 5 }
    }
}

/// K-Nearest Neighbors Classifier over integer class labels
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct KNNClassifier {
    config: KNNConfig,
    x_train: Option<Array2<f64>>,
    y_train: Option<Array1<usize>>,
    n_classes: usize,
}

impl KNNClassifier {
    pub fn new(config: KNNConfig) -> Self {
        Self {
            config,
            x_train: None,
            y_train: None,
            n_classes: 0,
        }
    }

    /// Create with default config and specified k
    pub fn with_k(k: usize) -> Self {
        Self::new(KNNConfig { n_neighbors: k })
    }

    pub fn k(&self) -> usize {
        self.config.n_neighbors
    }

    /// Fit the classifier (stores training data)
    pub fn fit(&mut self, x: &Array2<f64>, y: &Array1<usize>) -> Result<()> {
        if x.nrows() != y.len() {
            return Err(ShowcaseError::ShapeError {
                expected: format!("y length = {}", x.nrows()),
                actual: format!("y length = {}", y.len()),
            });
        }
        let k = self.config.n_neighbors;
        if k == 0 || k > x.nrows() {
            return Err(ShowcaseError::InvalidParameter {
                name: "n_neighbors".to_string(),
                value: k.to_string(),
                reason: format!("must be in 1..={} for this training set", x.nrows()),
            });
        }

        self.n_classes = y.iter().copied().max().map_or(0, |m| m + 1);
        self.x_train = Some(x.to_owned());
        self.y_train = Some(y.to_owned());
        Ok(())
    }

    /// Predict class labels (parallelized over query rows)
    pub fn predict(&self, x: &Array2<f64>) -> Result<Array1<usize>> {
        let (x_train, y_train) = match (&self.x_train, &self.y_train) {
            (Some(x), Some(y)) => (x, y),
            _ => return Err(ShowcaseError::ModelNotFitted),
        };
        if x.ncols() != x_train.ncols() {
            return Err(ShowcaseError::ShapeError {
                expected: format!("{} features", x_train.ncols()),
                actual: format!("{} features", x.ncols()),
            });
        }

        let k = self.config.n_neighbors;
        let n_classes = self.n_classes;

        let predictions: Vec<usize> = (0..x.nrows())
            .into_par_iter()
            .map(|i| {
                let neighbors = find_k_nearest(x.row(i), x_train, y_train, k);
                majority_vote(&neighbors, n_classes)
            })
            .collect();

        Ok(Array1::from_vec(predictions))
    }
}

/// Max-heap entry: (distance, training row, label). Ordering is by distance,
/// then by row so equal distances keep the earlier training row.
#[derive(PartialEq)]
struct Candidate(f64, usize, usize);

impl Eq for Candidate {}

impl PartialOrd for Candidate {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Candidate {
    fn cmp(&self, other: &Self) -> Ordering {
        self.0
            .partial_cmp(&other.0)
            .unwrap_or(Ordering::Equal)
            .then(self.1.cmp(&other.1))
    }
}

/// Labels of the k nearest training rows, O(n log k).
fn find_k_nearest(
    point: ArrayView1<f64>,
    x_train: &Array2<f64>,
    y_train: &Array1<usize>,
    k: usize,
) -> Vec<usize> {
    let mut heap = BinaryHeap::with_capacity(k + 1);

    for (i, row) in x_train.rows().into_iter().enumerate() {
        let candidate = Candidate(euclidean(point, row), i, y_train[i]);
        if heap.len() < k {
            heap.push(candidate);
        } else if let Some(top) = heap.peek() {
            if candidate < *top {
                heap.pop();
                heap.push(candidate);
            }
        }
    }

    heap.into_iter().map(|c| c.2).collect()
}

fn euclidean(a: ArrayView1<f64>, b: ArrayView1<f64>) -> f64 {
    a.iter()
        .zip(b.iter())
        .map(|(ai, bi)| {
            let d = ai - bi;
            d * d
        })
        .sum::<f64>()
        .sqrt()
}

/// Most frequent label; ties go to the lowest class index.
fn majority_vote(labels: &[usize], n_classes: usize) -> usize {
    let mut votes = vec![0usize; n_classes.max(1)];
    for &label in labels {
        if label < votes.len() {
            votes[label] += 1;
        }
    }
    let mut best = 0;
    for (class, &count) in votes.iter().enumerate() {
        if count > votes[best] {
            best = class;
        }
    }
    best
}

#[cfg(test)]
mod tests {
    use super::*;

    fn create_classification_data() -> (Array2<f64>, Array1<usize>) {
        let x = Array2::from_shape_vec((20, 2), vec![
            // Class 0 (low values)
            1.0, 1.0, 1.5, 1.5, 2.0, 2.0, 2.5, 2.5, 1.0, 2.0,
            1.5, 2.5, 2.0, 1.5, 2.5, 1.0, 1.2, 1.8, 1.8, 1.2,
            // Class 1 (high values)
            8.0, 8.0, 8.5, 8.5, 9.0, 9.0, 9.5, 9.5, 8.0, 9.0,
            8.5, 9.5, 9.0, 8.5, 9.5, 8.0, 8.2, 8.8, 8.8, 8.2,
        ]).unwrap();

        let y = Array1::from_vec(vec![
            0, 0, 0, 0, 0, 0, 0, 0, 0, 0,
            1, 1, 1, 1, 1, 1, 1, 1, 1, 1,
        ]);

        (x, y)
    }

    #[test]
    fn test_knn_classifier() {
        let (x, y) = create_classification_data();

        let mut knn = KNNClassifier::with_k(3);
        knn.fit(&x, &y).unwrap();

        let predictions = knn.predict(&x).unwrap();
        assert_eq!(predictions, y);
    }

    #[test]
    fn test_unseen_points() {
        let (x, y) = create_classification_data();
        let mut knn = KNNClassifier::with_k(5);
        knn.fit(&x, &y).unwrap();

        let query = Array2::from_shape_vec((2, 2), vec![0.0, 0.5, 10.0, 10.0]).unwrap();
        assert_eq!(knn.predict(&query).unwrap().to_vec(), vec![0, 1]);
    }

    #[test]
    fn test_distance() {
        let a = ndarray::array![0.0, 0.0];
        let b = ndarray::array![3.0, 4.0];
        assert!((euclidean(a.view(), b.view()) - 5.0).abs() < 1e-12);
    }

    #[test]
    fn test_vote_tie_prefers_lowest_class() {
        assert_eq!(majority_vote(&[2, 1, 1, 2], 3), 1);
        assert_eq!(majority_vote(&[0, 2], 3), 0);
        assert_eq!(majority_vote(&[2, 2, 0], 3), 2);
    }

    #[test]
    fn test_invalid_k() {
        let (x, y) = create_classification_data();
        assert!(KNNClassifier::with_k(0).fit(&x, &y).is_err());
        assert!(KNNClassifier::with_k(21).fit(&x, &y).is_err());
        assert!(KNNClassifier::with_k(20).fit(&x, &y).is_ok());
    }

    #[test]
    fn test_predict_before_fit() {
        let knn = KNNClassifier::with_k(3);
        let query = Array2::<f64>::zeros((1, 2));
        assert!(matches!(knn.predict(&query), Err(ShowcaseError::ModelNotFitted)));
    }
}
