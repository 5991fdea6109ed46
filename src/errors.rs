use axum::http::StatusCode;
use axum::response::IntoResponse;
use thiserror::Error;

use crate::external::SourceError;

/// Failures of the windowing and rendering pipeline.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum PipelineError {
    #[error("malformed timestamp: {0:?}")]
    MalformedTimestamp(String),
    #[error("unknown timezone: {0}")]
    UnknownTimezone(String),
    #[error("invalid window: {0} days")]
    InvalidWindow(i64),
    #[error("fleet snapshot has no usable rows")]
    EmptyFleet,
    #[error("station {0} is missing from the fleet snapshot")]
    MissingStation(String),
}

#[derive(Debug, Error)]
pub enum AppError {
    #[error("Pipeline error: {0}")]
    Pipeline(#[from] PipelineError),
    #[error("Source error: {0}")]
    Source(#[from] SourceError),
    #[error("Validation error: {0}")]
    Validation(String),
    #[error("Not found: {0}")]
    NotFound(String),
}

impl IntoResponse for AppError {
    fn into_response(self) -> axum::response::Response {
        let status = match &self {
            AppError::Pipeline(PipelineError::MalformedTimestamp(_))
            | AppError::Pipeline(PipelineError::UnknownTimezone(_))
            | AppError::Pipeline(PipelineError::InvalidWindow(_)) => StatusCode::BAD_REQUEST,
            AppError::Pipeline(PipelineError::EmptyFleet)
            | AppError::Pipeline(PipelineError::MissingStation(_)) => StatusCode::BAD_GATEWAY,
            AppError::Source(SourceError::NotFound(_)) => StatusCode::NOT_FOUND,
            AppError::Source(_) => StatusCode::BAD_GATEWAY,
            AppError::Validation(_) => StatusCode::BAD_REQUEST,
            AppError::NotFound(_) => StatusCode::NOT_FOUND,
        };
        (status, self.to_string()).into_response()
    }
}
