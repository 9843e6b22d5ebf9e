//! Model training module
//!
//! Provides the building blocks both pipelines share:
//! - Seeded train/test splitting
//! - Linear regression (OLS)
//! - K-Nearest Neighbors classification
//! - Regression and classification metrics

pub mod knn;
pub mod linear_models;
pub mod metrics;
pub mod split;

pub use knn::{KNNClassifier, KNNConfig};
pub use linear_models::LinearRegression;
pub use metrics::{accuracy_score, confusion_matrix, mean_squared_error, r2_score, RegressionMetrics};
pub use split::{train_test_split, TrainTestSplit};
