use thiserror::Error;

use msk_model::NodeKind;

/// Failure reported by the cloud control plane client.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("{operation} failed: {message}")]
pub struct CloudError {
    pub operation: &'static str,
    pub message: String,
}

impl CloudError {
    pub fn new(operation: &'static str, message: impl Into<String>) -> Self {
        Self {
            operation,
            message: message.into(),
        }
    }
}

#[derive(Error, Debug)]
pub enum ResolveError {
    #[error(transparent)]
    Api(#[from] CloudError),

    #[error("{0} node has no endpoints")]
    MissingEndpoint(NodeKind),

    #[error("bootstrap broker string is empty")]
    EmptyBootstrap,

    #[error("invalid bootstrap broker entry: {0:?}")]
    InvalidBootstrapEntry(String),
}

#[derive(Error, Debug)]
pub enum DiscoverError {
    #[error("failed to list clusters: {0}")]
    ListClusters(#[source] CloudError),

    #[error("failed to resolve brokers of cluster {name} ({arn}): {source}")]
    Resolve {
        name: String,
        arn: String,
        #[source]
        source: ResolveError,
    },
}

#[derive(Error, Debug)]
pub enum FilterError {
    #[error("invalid cluster name pattern: {0}")]
    InvalidPattern(#[from] regex::Error),

    #[error("invalid tag condition {0:?} (expected key=value)")]
    InvalidTag(String),
}
