//! Pull-mode HTTP interface.
//!
//! Every `GET /` runs one discovery cycle and answers with the record array as JSON.
//! When a [`msk_prometheus::PrometheusMetrics`] is attached, `GET /metrics` serves its text exposition.

mod error;
pub use error::ApiError;

mod http;
pub use http::{HttpApi, metrics_router, serve};
