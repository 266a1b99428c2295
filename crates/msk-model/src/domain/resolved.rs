use crate::{BrokerEndpoint, ClusterIdentity, MonitoringCapability};

/// A cluster with its brokers resolved for one discovery cycle.
///
/// Built fresh every cycle and dropped once the cycle output is produced.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct ResolvedCluster {
    pub identity: ClusterIdentity,
    pub monitoring: MonitoringCapability,
    /// Endpoints in control-plane enumeration order.
    pub brokers: Vec<BrokerEndpoint>,
}
