use std::str::FromStr;

use crate::filter::FilterSpec;

/// How the brokers of a cluster are resolved.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ResolveStrategy {
    /// Page through the node listing; controller nodes are included.
    #[default]
    Nodes,
    /// Split the bootstrap broker string.
    Bootstrap,
}

impl FromStr for ResolveStrategy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "nodes" => Ok(ResolveStrategy::Nodes),
            "bootstrap" => Ok(ResolveStrategy::Bootstrap),
            _ => Err(format!("invalid resolver: {s} (expected: nodes|bootstrap)")),
        }
    }
}

/// Immutable discovery settings, fixed at process start.
#[derive(Debug, Clone)]
pub struct DiscoveryConfig {
    /// Prefix of the `job` label; the cluster name is appended after a dash.
    pub job_prefix: String,
    pub filter: FilterSpec,
    pub strategy: ResolveStrategy,
    /// Upper bound of clusters resolved at the same time.
    pub concurrency: usize,
}

impl Default for DiscoveryConfig {
    fn default() -> Self {
        Self {
            job_prefix: "msk".to_string(),
            filter: FilterSpec::default(),
            strategy: ResolveStrategy::Nodes,
            concurrency: 1,
        }
    }
}
