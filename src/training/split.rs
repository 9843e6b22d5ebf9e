//! Seeded train/test splitting

use ndarray::{Array1, Array2, Axis};
use rand::seq::SliceRandom;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

use crate::error::{Result, ShowcaseError};

/// Row indices of a single train/test partition.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TrainTestSplit {
    pub train_indices: Vec<usize>,
    pub test_indices: Vec<usize>,
}

impl TrainTestSplit {
    pub fn train_len(&self) -> usize {
        self.train_indices.len()
    }

    pub fn test_len(&self) -> usize {
        self.test_indices.len()
    }

    /// Partition a feature matrix and its targets, returning
    /// `(x_train, x_test, y_train, y_test)`.
    pub fn apply<T: Clone>(
        &self,
        x: &Array2<f64>,
        y: &Array1<T>,
    ) -> Result<(Array2<f64>, Array2<f64>, Array1<T>, Array1<T>)> {
        if x.nrows() != y.len() {
            return Err(ShowcaseError::ShapeError {
                expected: format!("{} targets", x.nrows()),
                actual: format!("{} targets", y.len()),
            });
        }
        let n = x.nrows();
        if let Some(&bad) = self
            .train_indices
            .iter()
            .chain(self.test_indices.iter())
            .find(|&&i| i >= n)
        {
            return Err(ShowcaseError::InvalidInput(format!(
                "split index {} out of range for {} samples",
                bad, n
            )));
        }

        Ok((
            x.select(Axis(0), &self.train_indices),
            x.select(Axis(0), &self.test_indices),
            self.train_indices.iter().map(|&i| y[i].clone()).collect(),
            self.test_indices.iter().map(|&i| y[i].clone()).collect(),
        ))
    }
}

/// Shuffle `0..n_samples` with a seeded ChaCha8 generator and hold out
/// `ceil(test_ratio * n_samples)` indices for testing.
pub fn train_test_split(n_samples: usize, test_ratio: f64, seed: u64) -> Result<TrainTestSplit> {
    if !(test_ratio > 0.0 && test_ratio < 1.0) {
        return Err(ShowcaseError::InvalidParameter {
            name: "test_ratio".to_string(),
            value: test_ratio.to_string(),
            reason: "must be strictly between 0 and 1".to_string(),
        });
    }

    let n_test = (test_ratio * n_samples as f64).ceil() as usize;
    let n_train = n_samples.saturating_sub(n_test);
    if n_test == 0 || n_train == 0 {
        return Err(ShowcaseError::InvalidParameter {
            name: "n_samples".to_string(),
            value: n_samples.to_string(),
            reason: format!(
                "test_ratio {} leaves an empty train or test set",
                test_ratio
            ),
        });
    }

    let mut indices: Vec<usize> = (0..n_samples).collect();
    let mut rng = ChaCha8Rng::seed_from_u64(seed);
    indices.shuffle(&mut rng);

    let train_indices = indices.split_off(n_test);
    Ok(TrainTestSplit {
        train_indices,
        test_indices: indices,
    })
}
