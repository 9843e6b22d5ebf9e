//! Error types for the server

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

use crate::error::ShowcaseError;

#[derive(Error, Debug)]
pub enum ServerError {
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Model fitting failed: {0}")]
    ModelFit(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl ServerError {
    /// Every failure is reported as 500 with the `{success: false, error}`
    /// body; the variants only change how it is logged.
    pub fn status(&self) -> StatusCode {
        match self {
            ServerError::InvalidInput(_) => StatusCode::INTERNAL_SERVER_ERROR,
            ServerError::ModelFit(_) => StatusCode::INTERNAL_SERVER_ERROR,
            ServerError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl From<ShowcaseError> for ServerError {
    fn from(err: ShowcaseError) -> Self {
        let msg = err.to_string();
        match err {
            ShowcaseError::InvalidInput(_) | ShowcaseError::InvalidParameter { .. } => {
                ServerError::InvalidInput(msg)
            }
            e if e.is_model_failure() => ServerError::ModelFit(msg),
            _ => ServerError::Internal(msg),
        }
    }
}

impl IntoResponse for ServerError {
    fn into_response(self) -> Response {
        match &self {
            ServerError::InvalidInput(msg) => {
                tracing::warn!(detail = %msg, "Rejected request input");
            }
            ServerError::ModelFit(msg) => {
                tracing::error!(detail = %msg, "Model fitting failed");
            }
            ServerError::Internal(msg) => {
                tracing::error!(detail = %msg, "Internal server error");
            }
        }

        let body = Json(json!({
            "success": false,
            "error": self.to_string(),
        }));

        (self.status(), body).into_response()
    }
}

pub type Result<T> = std::result::Result<T, ServerError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_showcase_error() {
        let err: ServerError = ShowcaseError::InvalidInput("rooms".into()).into();
        assert!(matches!(err, ServerError::InvalidInput(_)));

        let err: ServerError = ShowcaseError::ComputationError("singular".into()).into();
        assert!(matches!(err, ServerError::ModelFit(_)));

        let err: ServerError = ShowcaseError::DataError("bad frame".into()).into();
        assert!(matches!(err, ServerError::Internal(_)));
    }

    #[test]
    fn test_all_errors_are_500() {
        for err in [
            ServerError::InvalidInput("a".into()),
            ServerError::ModelFit("b".into()),
            ServerError::Internal("c".into()),
        ] {
            assert_eq!(err.into_response().status(), StatusCode::INTERNAL_SERVER_ERROR);
        }
    }
}
