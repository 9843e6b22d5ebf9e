//! HTTP request handlers

use std::num::IntErrorKind;
use std::str::FromStr;
use std::sync::Arc;

use axum::{
    extract::{Query, State},
    response::Html,
    Json,
};
use serde::Serialize;
use tracing::info;

use crate::pipeline::{classification, regression, KnnParams, KnnReport, PredictionReport, RegressionReport};

use super::error::{Result, ServerError};
use super::pages;
use super::state::AppState;

/// Successful API body: `{"success": true, ...payload}`
#[derive(Debug, Serialize)]
pub struct ApiSuccess<T> {
    success: bool,
    #[serde(flatten)]
    payload: T,
}

impl<T> ApiSuccess<T> {
    fn new(payload: T) -> Json<Self> {
        Json(Self {
            success: true,
            payload,
        })
    }
}

/// Raw query pairs in request order. Repeated keys are kept; lookups take
/// the first occurrence.
#[derive(Debug, Default)]
pub struct QueryArgs(Vec<(String, String)>);

impl QueryArgs {
    fn first(&self, name: &str) -> Option<&str> {
        self.0
            .iter()
            .find(|(key, _)| key == name)
            .map(|(_, value)| value.as_str())
    }
}

impl From<Vec<(String, String)>> for QueryArgs {
    fn from(pairs: Vec<(String, String)>) -> Self {
        Self(pairs)
    }
}

fn not_a_number(name: &str, value: &str) -> ServerError {
    ServerError::InvalidInput(format!("could not convert {} value '{}' to a number", name, value))
}

/// Parse an optional raw query value. Absent means `None`; present but
/// unparsable is an input error.
fn parse_param<T: FromStr>(name: &str, raw: Option<&str>) -> Result<Option<T>> {
    match raw {
        None => Ok(None),
        Some(value) => value
            .trim()
            .parse::<T>()
            .map(Some)
            .map_err(|_| not_a_number(name, value)),
    }
}

/// Integer variant of [`parse_param`]. Well-formed integers beyond `i64`
/// saturate so range checks downstream treat them as out of range.
fn parse_int_param(name: &str, raw: Option<&str>) -> Result<Option<i64>> {
    let Some(value) = raw else {
        return Ok(None);
    };
    match value.trim().parse::<i64>() {
        Ok(v) => Ok(Some(v)),
        Err(e) => match e.kind() {
            IntErrorKind::PosOverflow => Ok(Some(i64::MAX)),
            IntErrorKind::NegOverflow => Ok(Some(i64::MIN)),
            _ => Err(not_a_number(name, value)),
        },
    }
}

/// Run a CPU-bound pipeline off the async workers.
async fn run_blocking<T, F>(job: F) -> Result<T>
where
    F: FnOnce() -> crate::error::Result<T> + Send + 'static,
    T: Send + 'static,
{
    tokio::task::spawn_blocking(job)
        .await
        .map_err(|e| ServerError::Internal(format!("pipeline task failed: {}", e)))?
        .map_err(ServerError::from)
}

// ============================================================================
// Regression Handlers
// ============================================================================

pub async fn regression_data(
    State(state): State<Arc<AppState>>,
) -> Result<Json<ApiSuccess<RegressionReport>>> {
    let config = state.pipeline().regression.clone();
    let report = run_blocking(move || regression::run(&config)).await?;

    info!(
        r2 = report.metrics.r2_score,
        rmse = report.metrics.rmse,
        "Served regression data"
    );
    Ok(ApiSuccess::new(report))
}

pub async fn regression_predict(
    State(state): State<Arc<AppState>>,
    Query(pairs): Query<Vec<(String, String)>>,
) -> Result<Json<ApiSuccess<PredictionReport>>> {
    let args = QueryArgs::from(pairs);
    let config = state.pipeline().regression.clone();
    let rooms = parse_param::<f64>("rooms", args.first("rooms"))?.unwrap_or(config.default_rooms);

    let report = run_blocking(move || regression::predict(&config, rooms)).await?;

    info!(rooms, price = report.prediction.price, "Served regression prediction");
    Ok(ApiSuccess::new(report))
}

// ============================================================================
// Classification Handlers
// ============================================================================

impl QueryArgs {
    fn knn_params(&self) -> Result<KnnParams> {
        Ok(KnnParams {
            feature_x: parse_int_param("feature_x", self.first("feature_x"))?,
            feature_y: parse_int_param("feature_y", self.first("feature_y"))?,
            k: parse_int_param("k", self.first("k"))?,
        })
    }
}

pub async fn knn_data(
    State(state): State<Arc<AppState>>,
    Query(pairs): Query<Vec<(String, String)>>,
) -> Result<Json<ApiSuccess<KnnReport>>> {
    let config = state.pipeline().classification.clone();
    let params = QueryArgs::from(pairs).knn_params()?;

    let report = run_blocking(move || classification::run(&config, params)).await?;

    info!(
        k = report.k_neighbors,
        feature_x = report.current_features.x_idx,
        feature_y = report.current_features.y_idx,
        accuracy = report.metrics.accuracy,
        "Served k-NN data"
    );
    Ok(ApiSuccess::new(report))
}

// ============================================================================
// System Handlers
// ============================================================================

pub async fn health_check(State(state): State<Arc<AppState>>) -> Json<serde_json::Value> {
    Json(serde_json::json!({
        "status": "ok",
        "version": env!("CARGO_PKG_VERSION"),
        "uptime_secs": state.uptime_secs(),
    }))
}

// ============================================================================
// UI Handlers
// ============================================================================

pub async fn serve_index() -> Html<&'static str> {
    Html(pages::INDEX_HTML)
}

pub async fn serve_regression_page() -> Html<&'static str> {
    Html(pages::REGRESSION_HTML)
}

pub async fn serve_knn_page() -> Html<&'static str> {
    Html(pages::KNN_HTML)
}
