use std::{path::PathBuf, time::Duration};

use msk_discover::DiscoverError;
use thiserror::Error;

use crate::metrics::CycleOutcome;

#[derive(Debug, Error)]
pub enum SinkError {
    #[error("failed to encode yaml: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("failed to encode json: {0}")]
    Json(#[from] serde_json::Error),

    #[error("failed to write {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("sink write task failed: {0}")]
    Task(#[from] tokio::task::JoinError),
}

/// Why a refresh cycle produced no output.
#[derive(Debug, Error)]
pub enum CycleError {
    #[error(transparent)]
    Discover(#[from] DiscoverError),

    #[error("discovery timed out after {0:?}")]
    Timeout(Duration),

    #[error(transparent)]
    Sink(#[from] SinkError),
}

impl CycleError {
    pub fn outcome(&self) -> CycleOutcome {
        match self {
            CycleError::Discover(_) => CycleOutcome::DiscoveryError,
            CycleError::Timeout(_) => CycleOutcome::Timeout,
            CycleError::Sink(_) => CycleOutcome::SinkError,
        }
    }
}
