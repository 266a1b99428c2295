use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};
use thiserror::Error;

use msk_core::CycleError;
use msk_prometheus::MetricsError;

#[derive(Debug, Error)]
pub enum ApiError {
    #[error("discovery failed: {0}")]
    Cycle(#[from] CycleError),

    #[error("metrics encoding failed: {0}")]
    Metrics(#[from] MetricsError),
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        tracing::error!(error = %self, "request failed");
        (StatusCode::INTERNAL_SERVER_ERROR, "Internal Server Error").into_response()
    }
}
