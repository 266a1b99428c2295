//! Hooks for observing refresh cycles.
//!
//! The core only reports through [`MetricsBackend`]; the Prometheus implementation lives in its own crate.
use std::time::Duration;

/// Which adapter ran the cycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Mode {
    /// Timer driven, writes the file sink.
    Push,
    /// Request driven, answers an HTTP request.
    Pull,
}

impl Mode {
    pub fn as_str(&self) -> &'static str {
        match self {
            Mode::Push => "push",
            Mode::Pull => "pull",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CycleOutcome {
    Success,
    DiscoveryError,
    Timeout,
    SinkError,
}

impl CycleOutcome {
    pub fn as_str(&self) -> &'static str {
        match self {
            CycleOutcome::Success => "success",
            CycleOutcome::DiscoveryError => "discovery_error",
            CycleOutcome::Timeout => "timeout",
            CycleOutcome::SinkError => "sink_error",
        }
    }
}

pub trait MetricsBackend: Send + Sync + 'static {
    /// Called once per finished cycle, successful or not.
    fn record_cycle(&self, mode: Mode, outcome: CycleOutcome, elapsed: Duration);

    /// Called after a successful cycle with the size of the published list.
    fn record_targets(&self, mode: Mode, records: usize, targets: usize);
}

/// Backend that drops everything.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopMetrics;

impl MetricsBackend for NoopMetrics {
    fn record_cycle(&self, _mode: Mode, _outcome: CycleOutcome, _elapsed: Duration) {}

    fn record_targets(&self, _mode: Mode, _records: usize, _targets: usize) {}
}
