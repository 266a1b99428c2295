use std::{
    sync::Arc,
    time::{Duration, Instant},
};

use tokio::{
    sync::watch,
    time::{self, MissedTickBehavior},
};
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, warn};

use msk_discover::TargetSource;
use msk_model::StaticTargetRecord;

use crate::{
    cycle::{discover_with_timeout, observe_cycle},
    error::{CycleError, SinkError},
    metrics::{MetricsBackend, Mode, NoopMetrics},
    sink::FileSink,
};

const MIN_INTERVAL: Duration = Duration::from_millis(1);

/// Whether a refresh cycle is currently in flight.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RefreshState {
    Idle,
    Refreshing,
}

/// Push mode: refresh the file sink now, then on every interval tick.
///
/// Cycles never overlap. A cycle that overruns the interval is followed immediately by the next one.
/// A failed cycle leaves the previous file in place.
pub struct PushScheduler<S: ?Sized> {
    source: Arc<S>,
    sink: FileSink,
    interval: Duration,
    timeout: Option<Duration>,
    metrics: Arc<dyn MetricsBackend>,
    state: watch::Sender<RefreshState>,
}

impl<S> PushScheduler<S>
where
    S: TargetSource + ?Sized,
{
    pub fn new(source: Arc<S>, sink: FileSink, interval: Duration) -> Self {
        let (state, _) = watch::channel(RefreshState::Idle);
        Self {
            source,
            sink,
            interval: interval.max(MIN_INTERVAL),
            timeout: None,
            metrics: Arc::new(NoopMetrics),
            state,
        }
    }

    /// Bound every discovery cycle by `timeout`.
    pub fn with_timeout(mut self, timeout: Option<Duration>) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn with_metrics(mut self, metrics: Arc<dyn MetricsBackend>) -> Self {
        self.metrics = metrics;
        self
    }

    pub fn sink(&self) -> &FileSink {
        &self.sink
    }

    pub fn subscribe(&self) -> watch::Receiver<RefreshState> {
        self.state.subscribe()
    }

    /// Run one cycle and replace the sink file with its output.
    ///
    /// Returns the number of records written.
    pub async fn run_once(&self) -> Result<usize, CycleError> {
        self.state.send_replace(RefreshState::Refreshing);
        let started = Instant::now();

        let result = self.refresh().await;
        let elapsed = started.elapsed();
        observe_cycle(self.metrics.as_ref(), Mode::Push, elapsed, &result);

        self.state.send_replace(RefreshState::Idle);
        debug!(?elapsed, ok = result.is_ok(), "push cycle finished");
        result.map(|records| records.len())
    }

    /// Loop until `shutdown` is cancelled, abandoning a cycle that is still in flight.
    ///
    /// Cycle errors are logged, never fatal.
    pub async fn run(self, shutdown: CancellationToken) {
        let mut ticker = time::interval(self.interval);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
        info!(
            interval = ?self.interval,
            path = %self.sink.path().display(),
            "push scheduler started"
        );

        loop {
            tokio::select! {
                biased;
                _ = shutdown.cancelled() => {
                    info!("push scheduler stopped");
                    return;
                }
                _ = ticker.tick() => {}
            }

            // The sink renames complete files only; an abandoned cycle leaves the previous one.
            let result = tokio::select! {
                biased;
                _ = shutdown.cancelled() => {
                    self.state.send_replace(RefreshState::Idle);
                    info!("push scheduler stopped, in-flight refresh abandoned");
                    return;
                }
                result = self.run_once() => result,
            };

            match result {
                Ok(records) => info!(
                    records,
                    path = %self.sink.path().display(),
                    "wrote discovered targets"
                ),
                Err(e) => warn!(error = %e, "refresh failed, keeping previous targets"),
            }
        }
    }

    async fn refresh(&self) -> Result<Vec<StaticTargetRecord>, CycleError> {
        let records = discover_with_timeout(self.source.as_ref(), self.timeout).await?;
        let sink = self.sink.clone();
        let records = tokio::task::spawn_blocking(move || sink.write(&records).map(|()| records))
            .await
            .map_err(SinkError::from)??;
        Ok(records)
    }
}
