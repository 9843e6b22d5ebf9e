//! Housing price regression pipeline
//!
//! load -> first `sample_size` records -> single feature -> seeded split ->
//! OLS fit -> predictions -> metrics -> report. Nothing is cached; each call
//! rebuilds the dataset and refits.

use ndarray::{Array1, Array2, Axis};
use serde::Serialize;
use tracing::debug;

use super::config::RegressionConfig;
use super::round_to;
use crate::datasets::{housing, Dataset};
use crate::error::{Result, ShowcaseError};
use crate::training::{train_test_split, LinearRegression, RegressionMetrics};

/// x/y values with the model's fitted values.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FittedPoints {
    pub x: Vec<f64>,
    pub y: Vec<f64>,
    pub y_pred: Vec<f64>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LinePoints {
    pub x: Vec<f64>,
    pub y: Vec<f64>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RegressionData {
    pub train: FittedPoints,
    pub test: FittedPoints,
    pub regression_line: LinePoints,
}

/// Rounded test-set metrics and fitted line parameters.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RegressionSummary {
    pub r2_score: f64,
    pub mse: f64,
    pub rmse: f64,
    pub coefficient: f64,
    pub intercept: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RegressionDescription {
    pub dataset: String,
    pub samples: usize,
    pub train_size: usize,
    pub test_size: usize,
    pub feature_name: String,
    pub feature_unit: String,
    pub target_name: String,
    pub target_unit: String,
    pub info: String,
}

/// Body of `/api/regression/data`
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RegressionReport {
    pub data: RegressionData,
    pub metrics: RegressionSummary,
    pub description: RegressionDescription,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PredictionInput {
    pub rooms: f64,
    pub unit: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PricePrediction {
    pub price: f64,
    pub unit: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Formula {
    pub coefficient: f64,
    pub intercept: f64,
    pub equation: String,
}

/// Body of `/api/regression/predict`
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PredictionReport {
    pub input: PredictionInput,
    pub prediction: PricePrediction,
    pub formula: Formula,
}

const TARGET_UNIT: &str = "$10k";

/// Selected feature column and scaled target over the sample window.
struct Window {
    dataset: Dataset,
    x: Array2<f64>,
    y: Array1<f64>,
}

impl Window {
    fn load(config: &RegressionConfig) -> Result<Self> {
        let dataset = housing::load()?.head(config.sample_size);
        let x = dataset.feature_column(config.feature_index)?;
        let y = &dataset.target * config.target_scale;
        Ok(Self { dataset, x, y })
    }

    fn feature_label(&self, idx: usize) -> (String, String) {
        match housing::FEATURE_LABELS.get(idx) {
            Some((name, unit)) => (name.to_string(), unit.to_string()),
            None => (self.dataset.feature_names[idx].clone(), String::new()),
        }
    }
}

fn coefficient_and_intercept(model: &LinearRegression) -> Result<(f64, f64)> {
    let coef = model
        .coefficients()?
        .get(0)
        .copied()
        .ok_or_else(|| ShowcaseError::ComputationError("model has no coefficients".to_string()))?;
    Ok((coef, model.intercept()?))
}

/// Fit on the training split and report predictions, metrics and a plotting line.
pub fn run(config: &RegressionConfig) -> Result<RegressionReport> {
    let window = Window::load(config)?;
    let n = window.x.nrows();

    let split = train_test_split(n, config.test_ratio, config.seed)?;
    let (x_train, x_test, y_train, y_test) = split.apply(&window.x, &window.y)?;

    let mut model = LinearRegression::new();
    model.fit(&x_train, &y_train)?;

    let y_train_pred = model.predict(&x_train)?;
    let y_test_pred = model.predict(&x_test)?;
    let scores = RegressionMetrics::compute(&y_test, &y_test_pred)?;
    let (coef, intercept) = coefficient_and_intercept(&model)?;

    let column = window.x.column(0);
    let x_min = column.iter().copied().fold(f64::INFINITY, f64::min);
    let x_max = column.iter().copied().fold(f64::NEG_INFINITY, f64::max);
    let line_x = Array1::linspace(x_min, x_max, config.line_points);
    let line_y = model.predict(&line_x.clone().insert_axis(Axis(1)))?;

    debug!(
        samples = n,
        train = split.train_len(),
        test = split.test_len(),
        r2 = scores.r2,
        coefficient = coef,
        "Regression pipeline fitted"
    );

    let (feature_name, feature_unit) = window.feature_label(config.feature_index);

    Ok(RegressionReport {
        data: RegressionData {
            train: FittedPoints {
                x: x_train.column(0).to_vec(),
                y: y_train.to_vec(),
                y_pred: y_train_pred.to_vec(),
            },
            test: FittedPoints {
                x: x_test.column(0).to_vec(),
                y: y_test.to_vec(),
                y_pred: y_test_pred.to_vec(),
            },
            regression_line: LinePoints {
                x: line_x.to_vec(),
                y: line_y.to_vec(),
            },
        },
        metrics: RegressionSummary {
            r2_score: round_to(scores.r2, 4),
            mse: round_to(scores.mse, 2),
            rmse: round_to(scores.rmse, 2),
            coefficient: round_to(coef, 2),
            intercept: round_to(intercept, 2),
        },
        description: RegressionDescription {
            dataset: window.dataset.name.clone(),
            samples: n,
            train_size: split.train_len(),
            test_size: split.test_len(),
            feature_name,
            feature_unit,
            target_name: housing::TARGET_LABEL.to_string(),
            target_unit: TARGET_UNIT.to_string(),
            info: "Block-level sample modelled on census housing survey records".to_string(),
        },
    })
}

/// Fit on the whole sample window (no split) and predict the price for `rooms`.
pub fn predict(config: &RegressionConfig, rooms: f64) -> Result<PredictionReport> {
    if !rooms.is_finite() {
        return Err(ShowcaseError::InvalidInput(format!("rooms must be a finite number, got {}", rooms)));
    }
    let window = Window::load(config)?;

    let mut model = LinearRegression::new();
    model.fit(&window.x, &window.y)?;

    let price = model.predict(&Array2::from_elem((1, 1), rooms))?[0];
    let (coef, intercept) = coefficient_and_intercept(&model)?;
    let coefficient = round_to(coef, 2);
    let intercept = round_to(intercept, 2);

    debug!(rooms, price, "Regression prediction");

    let (_, unit) = window.feature_label(config.feature_index);
    Ok(PredictionReport {
        input: PredictionInput { rooms, unit },
        prediction: PricePrediction {
            price: round_to(price, 2),
            unit: TARGET_UNIT.to_string(),
        },
        formula: Formula {
            coefficient,
            intercept,
            equation: format!("price = {} × rooms + {}", coefficient, intercept),
        },
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_report_sizes() {
        let report = run(&RegressionConfig::default()).unwrap();
        assert_eq!(report.description.samples, 200);
        assert_eq!(report.description.train_size, 160);
        assert_eq!(report.description.test_size, 40);
        assert_eq!(report.data.train.x.len(), 160);
        assert_eq!(report.data.test.y_pred.len(), 40);
        assert_eq!(report.data.regression_line.x.len(), 100);
    }

    #[test]
    fn test_line_spans_feature_range() {
        let report = run(&RegressionConfig::default()).unwrap();
        let all_x: Vec<f64> = report
            .data
            .train
            .x
            .iter()
            .chain(report.data.test.x.iter())
            .copied()
            .collect();
        let min = all_x.iter().copied().fold(f64::INFINITY, f64::min);
        let max = all_x.iter().copied().fold(f64::NEG_INFINITY, f64::max);
        let line = &report.data.regression_line.x;
        assert_eq!(line[0], min);
        assert!((line[line.len() - 1] - max).abs() < 1e-9);
    }

    #[test]
    fn test_rooms_raise_price() {
        let report = run(&RegressionConfig::default()).unwrap();
        assert!(report.metrics.coefficient > 0.0);
        assert!(report.metrics.r2_score.is_finite());
        assert!(report.metrics.rmse >= 0.0);
    }

    #[test]
    fn test_predict_matches_formula() {
        let report = predict(&RegressionConfig::default(), 5.0).unwrap();
        let expected = report.formula.coefficient * 5.0 + report.formula.intercept;
        assert!((report.prediction.price - expected).abs() < 0.05);
        assert!(report.formula.equation.starts_with("price = "));
    }

    #[test]
    fn test_predict_rejects_non_finite_rooms() {
        let config = RegressionConfig::default();
        for rooms in [f64::NAN, f64::INFINITY, f64::NEG_INFINITY] {
            let err = predict(&config, rooms).unwrap_err();
            assert!(matches!(err, ShowcaseError::InvalidInput(_)));
        }
    }

    #[test]
    fn test_bad_feature_index() {
        let config = RegressionConfig {
            feature_index: 9,
            ..Default::default()
        };
        assert!(run(&config).is_err());
        assert!(predict(&config, 5.0).is_err());
    }
}
