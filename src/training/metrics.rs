//! Evaluation metrics for regression and classification

use ndarray::Array1;
use serde::{Deserialize, Serialize};

use crate::error::{Result, ShowcaseError};

fn check_lengths(expected: usize, actual: usize) -> Result<()> {
    if expected != actual {
        return Err(ShowcaseError::ShapeError {
            expected: format!("{} predictions", expected),
            actual: format!("{} predictions", actual),
        });
    }
    if expected == 0 {
        return Err(ShowcaseError::InvalidInput(
            "metrics need at least one sample".to_string(),
        ));
    }
    Ok(())
}

/// Mean of squared residuals.
pub fn mean_squared_error(y_true: &Array1<f64>, y_pred: &Array1<f64>) -> Result<f64> {
    check_lengths(y_true.len(), y_pred.len())?;
    let sum: f64 = y_true
        .iter()
        .zip(y_pred.iter())
        .map(|(t, p)| (t - p).powi(2))
        .sum();
    Ok(sum / y_true.len() as f64)
}

/// Coefficient of determination. A constant target scores 1.0 when
/// predicted exactly and 0.0 otherwise.
pub fn r2_score(y_true: &Array1<f64>, y_pred: &Array1<f64>) -> Result<f64> {
    check_lengths(y_true.len(), y_pred.len())?;
    let n = y_true.len() as f64;
    let y_mean = y_true.sum() / n;
    let ss_tot: f64 = y_true.iter().map(|y| (y - y_mean).powi(2)).sum();
    let ss_res: f64 = y_true
        .iter()
        .zip(y_pred.iter())
        .map(|(t, p)| (t - p).powi(2))
        .sum();

    if ss_tot == 0.0 {
        return Ok(if ss_res == 0.0 { 1.0 } else { 0.0 });
    }
    Ok(1.0 - ss_res / ss_tot)
}

/// Fraction of exact label matches.
pub fn accuracy_score(y_true: &Array1<usize>, y_pred: &Array1<usize>) -> Result<f64> {
    check_lengths(y_true.len(), y_pred.len())?;
    let correct = y_true
        .iter()
        .zip(y_pred.iter())
        .filter(|(t, p)| t == p)
        .count();
    Ok(correct as f64 / y_true.len() as f64)
}

/// `n_classes × n_classes` count table; rows are true labels, columns predicted.
pub fn confusion_matrix(
    y_true: &Array1<usize>,
    y_pred: &Array1<usize>,
    n_classes: usize,
) -> Result<Vec<Vec<usize>>> {
    check_lengths(y_true.len(), y_pred.len())?;
    let mut matrix = vec![vec![0usize; n_classes]; n_classes];
    for (&t, &p) in y_true.iter().zip(y_pred.iter()) {
        if t >= n_classes || p >= n_classes {
            return Err(ShowcaseError::InvalidInput(format!(
                "label {} outside {} classes",
                t.max(p),
                n_classes
            )));
        }
        matrix[t][p] += 1;
    }
    Ok(matrix)
}

/// Regression quality summary
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RegressionMetrics {
    pub r2: f64,
    pub mse: f64,
    pub rmse: f64,
}

impl RegressionMetrics {
    pub fn compute(y_true: &Array1<f64>, y_pred: &Array1<f64>) -> Result<Self> {
        let mse = mean_squared_error(y_true, y_pred)?;
        Ok(Self {
            r2: r2_score(y_true, y_pred)?,
            mse,
            rmse: mse.sqrt(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::array;

    #[test]
    fn test_regression_metrics() {
        let y_true = array![3.0, -0.5, 2.0, 7.0];
        let y_pred = array![2.5, 0.0, 2.0, 8.0];
        let m = RegressionMetrics::compute(&y_true, &y_pred).unwrap();
        assert!((m.mse - 0.375).abs() < 1e-12);
        assert!((m.rmse - 0.375f64.sqrt()).abs() < 1e-12);
        assert!((m.r2 - 0.9486081370449679).abs() < 1e-12);
    }

    #[test]
    fn test_r2_constant_target() {
        let y = array![2.0, 2.0, 2.0];
        assert_eq!(r2_score(&y, &y).unwrap(), 1.0);
        assert_eq!(r2_score(&y, &array![2.0, 2.0, 3.0]).unwrap(), 0.0);
    }

    #[test]
    fn test_accuracy() {
        let y_true = array![0usize, 1, 2, 2];
        let y_pred = array![0usize, 2, 2, 2];
        assert_eq!(accuracy_score(&y_true, &y_pred).unwrap(), 0.75);
    }

    #[test]
    fn test_confusion_matrix_rows_sum_to_class_counts() {
        let y_true = array![0usize, 0, 1, 1, 1, 2];
        let y_pred = array![0usize, 1, 1, 1, 2, 2];
        let cm = confusion_matrix(&y_true, &y_pred, 3).unwrap();
        assert_eq!(cm, vec![vec![1, 1, 0], vec![0, 2, 1], vec![0, 0, 1]]);
        let row_sums: Vec<usize> = cm.iter().map(|r| r.iter().sum()).collect();
        assert_eq!(row_sums, vec![2, 3, 1]);
    }

    #[test]
    fn test_confusion_matrix_keeps_absent_classes() {
        let y = array![0usize, 0];
        let cm = confusion_matrix(&y, &y, 3).unwrap();
        assert_eq!(cm.len(), 3);
        assert!(cm.iter().all(|r| r.len() == 3));
    }

    #[test]
    fn test_length_mismatch() {
        assert!(mean_squared_error(&array![1.0], &array![1.0, 2.0]).is_err());
        let empty = Array1::<usize>::from_vec(vec![]);
        assert!(accuracy_score(&empty, &empty).is_err());
        assert!(confusion_matrix(&array![3usize], &array![0usize], 3).is_err());
    }
}
