//! Target sources with scripted behaviour for the core tests.

use std::sync::{
    Mutex,
    atomic::{AtomicBool, AtomicUsize, Ordering},
};

use async_trait::async_trait;
use msk_discover::{CloudError, DiscoverError, TargetSource};
use msk_model::{StaticTargetRecord, TargetLabels};

pub(crate) fn record(name: &str, targets: &[&str]) -> StaticTargetRecord {
    StaticTargetRecord {
        targets: targets.iter().map(|t| t.to_string()).collect(),
        labels: TargetLabels {
            job: format!("msk-{name}"),
            cluster_name: name.to_string(),
            cluster_arn: format!("arn:::{name}"),
        },
    }
}

pub(crate) fn sample_records() -> Vec<StaticTargetRecord> {
    vec![
        record(
            "full",
            &["b-1.full:11001", "b-1.full:11002", "b-2.full:11001", "b-2.full:11002"],
        ),
        record("limited", &["b-1.limited:11001", "b-2.limited:11001"]),
    ]
}

/// Returns `records` until told to fail.
pub(crate) struct ScriptedSource {
    records: Mutex<Vec<StaticTargetRecord>>,
    fail: AtomicBool,
    calls: AtomicUsize,
}

impl ScriptedSource {
    pub(crate) fn ok(records: Vec<StaticTargetRecord>) -> Self {
        Self {
            records: Mutex::new(records),
            fail: AtomicBool::new(false),
            calls: AtomicUsize::new(0),
        }
    }

    pub(crate) fn failing() -> Self {
        let source = Self::ok(Vec::new());
        source.set_failing(true);
        source
    }

    pub(crate) fn set_failing(&self, fail: bool) {
        self.fail.store(fail, Ordering::SeqCst);
    }

    pub(crate) fn set_records(&self, records: Vec<StaticTargetRecord>) {
        *self.records.lock().unwrap() = records;
    }

    pub(crate) fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl TargetSource for ScriptedSource {
    async fn discover(&self) -> Result<Vec<StaticTargetRecord>, DiscoverError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if self.fail.load(Ordering::SeqCst) {
            return Err(DiscoverError::ListClusters(CloudError::new(
                "ListClusters",
                "connection reset",
            )));
        }
        Ok(self.records.lock().unwrap().clone())
    }
}

/// Never answers.
pub(crate) struct StalledSource;

#[async_trait]
impl TargetSource for StalledSource {
    async fn discover(&self) -> Result<Vec<StaticTargetRecord>, DiscoverError> {
        std::future::pending().await
    }
}
