use std::fmt;

use serde::{Deserialize, Serialize};

/// Kind of a cluster member node.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NodeKind {
    /// Regular broker; runs both exporters when enabled.
    Broker,
    /// Dedicated controller (KRaft topologies); runs the JMX exporter only.
    Controller,
}

impl NodeKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            NodeKind::Broker => "broker",
            NodeKind::Controller => "controller",
        }
    }
}

impl fmt::Display for NodeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One entry of the node listing of a cluster.
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct NodeInfo {
    pub kind: NodeKind,
    /// Endpoint hosts without ports. Only the first one is used for scraping.
    pub endpoints: Vec<String>,
}

impl NodeInfo {
    pub fn broker(host: impl Into<String>) -> Self {
        Self {
            kind: NodeKind::Broker,
            endpoints: vec![host.into()],
        }
    }

    pub fn controller(host: impl Into<String>) -> Self {
        Self {
            kind: NodeKind::Controller,
            endpoints: vec![host.into()],
        }
    }
}

/// Resolved network host of a single node, with the exporters that apply to it.
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct BrokerEndpoint {
    pub host: String,
    pub jmx: bool,
    pub node: bool,
}
