use std::collections::HashMap;

use serde::{Deserialize, Serialize};

/// Cluster tags as reported by the control plane.
pub type Tags = HashMap<String, String>;

/// Identity of a single cluster: its name, ARN and tags.
#[derive(Clone, Debug, Default, Eq, PartialEq, Serialize, Deserialize)]
pub struct ClusterIdentity {
    pub name: String,
    pub arn: String,
    #[serde(default, skip_serializing_if = "HashMap::is_empty")]
    pub tags: Tags,
}

impl ClusterIdentity {
    pub fn new(name: impl Into<String>, arn: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            arn: arn.into(),
            tags: Tags::new(),
        }
    }

    pub fn with_tag(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.tags.insert(key.into(), value.into());
        self
    }
}

/// Which exporter ports are enabled on the brokers of a cluster.
///
/// The control plane reports these at cluster granularity, so every broker of the cluster shares them.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq, Serialize, Deserialize)]
pub struct MonitoringCapability {
    pub jmx: bool,
    pub node: bool,
}

impl MonitoringCapability {
    pub const fn new(jmx: bool, node: bool) -> Self {
        Self { jmx, node }
    }

    /// Returns `true` if at least one exporter is enabled.
    #[inline]
    pub fn any(&self) -> bool {
        self.jmx || self.node
    }
}

/// One entry of the cluster listing: identity plus cluster-level monitoring flags.
#[derive(Clone, Debug, Default, Eq, PartialEq, Serialize, Deserialize)]
pub struct ClusterInfo {
    pub identity: ClusterIdentity,
    pub monitoring: MonitoringCapability,
}

impl ClusterInfo {
    pub fn new(identity: ClusterIdentity, monitoring: MonitoringCapability) -> Self {
        Self {
            identity,
            monitoring,
        }
    }

    #[inline]
    pub fn name(&self) -> &str {
        &self.identity.name
    }

    #[inline]
    pub fn arn(&self) -> &str {
        &self.identity.arn
    }
}
