use std::time::Duration;

use prometheus::{HistogramOpts, HistogramVec, IntCounterVec, IntGaugeVec, Opts, Registry};
use thiserror::Error;

use msk_core::{CycleOutcome, MetricsBackend, Mode};

const DURATION_BUCKETS: &[f64] = &[0.1, 0.25, 0.5, 1.0, 2.5, 5.0, 10.0, 30.0, 60.0, 120.0];

#[derive(Debug, Error)]
pub enum MetricsError {
    #[error("prometheus: {0}")]
    Prometheus(#[from] prometheus::Error),
}

#[derive(Clone)]
pub struct PrometheusMetrics {
    registry: Registry,
    cycles: IntCounterVec,
    duration: HistogramVec,
    records: IntGaugeVec,
    targets: IntGaugeVec,
}

impl PrometheusMetrics {
    /// Create the collectors and register them in a fresh registry.
    pub fn new() -> Result<Self, MetricsError> {
        Self::with_registry(Registry::new())
    }

    pub fn with_registry(registry: Registry) -> Result<Self, MetricsError> {
        let cycles = IntCounterVec::new(
            Opts::new("msk_sd_cycles_total", "Discovery cycles by outcome."),
            &["mode", "outcome"],
        )?;
        let duration = HistogramVec::new(
            HistogramOpts::new(
                "msk_sd_cycle_duration_seconds",
                "Wall-clock duration of discovery cycles.",
            )
            .buckets(DURATION_BUCKETS.to_vec()),
            &["mode"],
        )?;
        let records = IntGaugeVec::new(
            Opts::new("msk_sd_records", "Static configs published by the last successful cycle."),
            &["mode"],
        )?;
        let targets = IntGaugeVec::new(
            Opts::new("msk_sd_targets", "Scrape targets published by the last successful cycle."),
            &["mode"],
        )?;

        registry.register(Box::new(cycles.clone()))?;
        registry.register(Box::new(duration.clone()))?;
        registry.register(Box::new(records.clone()))?;
        registry.register(Box::new(targets.clone()))?;

        Ok(Self {
            registry,
            cycles,
            duration,
            records,
            targets,
        })
    }

    pub fn gather(&self) -> Vec<prometheus::proto::MetricFamily> {
        self.registry.gather()
    }

    /// Text exposition format of every registered collector.
    pub fn encode(&self) -> Result<String, MetricsError> {
        Ok(prometheus::TextEncoder::new().encode_to_string(&self.gather())?)
    }
}

impl MetricsBackend for PrometheusMetrics {
    fn record_cycle(&self, mode: Mode, outcome: CycleOutcome, elapsed: Duration) {
        self.cycles
            .with_label_values(&[mode.as_str(), outcome.as_str()])
            .inc();
        self.duration
            .with_label_values(&[mode.as_str()])
            .observe(elapsed.as_secs_f64());
    }

    fn record_targets(&self, mode: Mode, records: usize, targets: usize) {
        self.records
            .with_label_values(&[mode.as_str()])
            .set(i64::try_from(records).unwrap_or(i64::MAX));
        self.targets
            .with_label_values(&[mode.as_str()])
            .set(i64::try_from(targets).unwrap_or(i64::MAX));
    }
}
