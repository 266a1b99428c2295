//! Prometheus metrics backend for the MSK discovery service.
//!
//! [`PrometheusMetrics`] implements [`msk_core::MetricsBackend`] and keeps its collectors in a private [`Registry`].
//! It observes the discovery process itself; broker metrics are scraped by Prometheus from the published targets.
//!
//! ## Example
//! ```rust
//! use std::sync::Arc;
//! use msk_core::{CycleOutcome, MetricsBackend, Mode};
//! use msk_prometheus::PrometheusMetrics;
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let metrics = Arc::new(PrometheusMetrics::new()?);
//! metrics.record_cycle(Mode::Push, CycleOutcome::Success, std::time::Duration::from_millis(250));
//!
//! let text = metrics.encode()?;
//! assert!(text.contains("msk_sd_cycles_total"));
//! # Ok(())
//! # }
//! ```
//!
//! ## Metrics
//! - `msk_sd_cycles_total{mode, outcome}` - Counter
//! - `msk_sd_cycle_duration_seconds{mode}` - Histogram
//! - `msk_sd_records{mode}` - Gauge, records published by the last successful cycle
//! - `msk_sd_targets{mode}` - Gauge, targets published by the last successful cycle

mod backend;
pub use backend::{MetricsError, PrometheusMetrics};

pub use prometheus::Registry;
