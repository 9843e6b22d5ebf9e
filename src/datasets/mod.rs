//! Built-in datasets
//!
//! Each dataset is materialised as a polars [`DataFrame`] and then converted
//! into a row-major [`Dataset`] of ndarray features and targets. Loaders are
//! pure: every call rebuilds the same data from scratch.

pub mod housing;
pub mod iris;

use ndarray::{s, Array1, Array2, Axis};
use polars::prelude::*;

use crate::error::{Result, ShowcaseError};

/// Immutable feature matrix + target vector with display metadata.
#[derive(Debug, Clone)]
pub struct Dataset {
    pub name: String,
    pub features: Array2<f64>,
    pub target: Array1<f64>,
    pub feature_names: Vec<String>,
    /// Class names for classification targets, empty for regression
    pub target_names: Vec<String>,
}

impl Dataset {
    /// Build a dataset from a frame. Every column except `target_column`
    /// becomes a feature, in frame order.
    pub fn from_frame(
        name: &str,
        df: &DataFrame,
        target_column: &str,
        target_names: Vec<String>,
    ) -> Result<Self> {
        let feature_names: Vec<String> = df
            .get_column_names()
            .into_iter()
            .filter(|col| col.as_str() != target_column)
            .map(|col| col.to_string())
            .collect();

        let features = columns_to_array2(df, &feature_names)?;
        let target = column_to_array1(df, target_column)?;

        Ok(Self {
            name: name.to_string(),
            features,
            target,
            feature_names,
            target_names,
        })
    }

    pub fn n_samples(&self) -> usize {
        self.features.nrows()
    }

    pub fn n_features(&self) -> usize {
        self.features.ncols()
    }

    /// First `n` records in their original order (clamped to the dataset size).
    pub fn head(&self, n: usize) -> Self {
        let n = n.min(self.n_samples());
        Self {
            name: self.name.clone(),
            features: self.features.slice(s![..n, ..]).to_owned(),
            target: self.target.slice(s![..n]).to_owned(),
            feature_names: self.feature_names.clone(),
            target_names: self.target_names.clone(),
        }
    }

    /// Single feature as an `n × 1` matrix.
    pub fn feature_column(&self, idx: usize) -> Result<Array2<f64>> {
        self.check_feature(idx)?;
        Ok(self.features.select(Axis(1), &[idx]))
    }

    /// Two features as an `n × 2` matrix, `x` first.
    pub fn feature_pair(&self, x: usize, y: usize) -> Result<Array2<f64>> {
        self.check_feature(x)?;
        self.check_feature(y)?;
        Ok(self.features.select(Axis(1), &[x, y]))
    }

    fn check_feature(&self, idx: usize) -> Result<()> {
        if idx >= self.n_features() {
            return Err(ShowcaseError::InvalidParameter {
                name: "feature_index".to_string(),
                value: idx.to_string(),
                reason: format!("dataset '{}' has {} features", self.name, self.n_features()),
            });
        }
        Ok(())
    }
}

/// Extract a single column as `Array1<f64>`, casting to Float64.
fn column_to_array1(df: &DataFrame, col_name: &str) -> Result<Array1<f64>> {
    Ok(Array1::from_vec(column_values(df, col_name)?))
}

/// Extract named columns into a row-major `Array2<f64>`.
fn columns_to_array2(df: &DataFrame, col_names: &[String]) -> Result<Array2<f64>> {
    let n_rows = df.height();
    let n_cols = col_names.len();

    let col_data: Vec<Vec<f64>> = col_names
        .iter()
        .map(|col_name| column_values(df, col_name))
        .collect::<Result<Vec<Vec<f64>>>>()?;

    Ok(Array2::from_shape_fn((n_rows, n_cols), |(r, c)| col_data[c][r]))
}

fn column_values(df: &DataFrame, col_name: &str) -> Result<Vec<f64>> {
    let column = df
        .column(col_name)
        .map_err(|_| ShowcaseError::FeatureNotFound(col_name.to_string()))?;
    let casted = column
        .cast(&DataType::Float64)
        .map_err(|e| ShowcaseError::DataError(e.to_string()))?;
    let values = casted
        .f64()
        .map_err(|e| ShowcaseError::DataError(e.to_string()))?
        .into_iter()
        .map(|v| {
            v.ok_or_else(|| ShowcaseError::DataError(format!("null value in column '{}'", col_name)))
        })
        .collect::<Result<Vec<f64>>>()?;
    Ok(values)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn small_frame() -> DataFrame {
        df!(
            "a" => &[1.0, 2.0, 3.0, 4.0],
            "b" => &[10.0, 20.0, 30.0, 40.0],
            "label" => &[0i32, 1, 0, 1]
        )
        .unwrap()
    }

    #[test]
    fn test_from_frame_splits_target() {
        let ds = Dataset::from_frame("small", &small_frame(), "label", vec![]).unwrap();
        assert_eq!(ds.n_samples(), 4);
        assert_eq!(ds.n_features(), 2);
        assert_eq!(ds.feature_names, vec!["a", "b"]);
        assert_eq!(ds.features[[2, 1]], 30.0);
        assert_eq!(ds.target[3], 1.0);
    }

    #[test]
    fn test_missing_target_column() {
        let err = Dataset::from_frame("small", &small_frame(), "price", vec![]).unwrap_err();
        assert!(matches!(err, ShowcaseError::FeatureNotFound(_)));
    }

    #[test]
    fn test_head_keeps_front_records() {
        let ds = Dataset::from_frame("small", &small_frame(), "label", vec![]).unwrap();
        let head = ds.head(2);
        assert_eq!(head.n_samples(), 2);
        assert_eq!(head.features[[1, 0]], 2.0);
        assert_eq!(ds.head(100).n_samples(), 4);
    }

    #[test]
    fn test_feature_selection() {
        let ds = Dataset::from_frame("small", &small_frame(), "label", vec![]).unwrap();
        let col = ds.feature_column(1).unwrap();
        assert_eq!(col.dim(), (4, 1));
        assert_eq!(col[[0, 0]], 10.0);

        let pair = ds.feature_pair(1, 0).unwrap();
        assert_eq!(pair.row(3).to_vec(), vec![40.0, 4.0]);

        assert!(ds.feature_column(2).is_err());
    }
}
