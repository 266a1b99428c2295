use std::time::Duration;

use msk_discover::TargetSource;
use msk_model::StaticTargetRecord;

use crate::{
    error::CycleError,
    metrics::{CycleOutcome, MetricsBackend, Mode},
};

/// Run one discovery cycle, bounded by `timeout` when set.
pub async fn discover_with_timeout<S>(
    source: &S,
    timeout: Option<Duration>,
) -> Result<Vec<StaticTargetRecord>, CycleError>
where
    S: TargetSource + ?Sized,
{
    match timeout {
        Some(limit) => tokio::time::timeout(limit, source.discover())
            .await
            .map_err(|_| CycleError::Timeout(limit))?
            .map_err(CycleError::from),
        None => source.discover().await.map_err(CycleError::from),
    }
}

/// Report a finished cycle to `metrics`.
pub fn observe_cycle(
    metrics: &dyn MetricsBackend,
    mode: Mode,
    elapsed: Duration,
    result: &Result<Vec<StaticTargetRecord>, CycleError>,
) {
    match result {
        Ok(records) => {
            metrics.record_cycle(mode, CycleOutcome::Success, elapsed);
            let targets = records.iter().map(|r| r.targets.len()).sum();
            metrics.record_targets(mode, records.len(), targets);
        }
        Err(e) => metrics.record_cycle(mode, e.outcome(), elapsed),
    }
}
