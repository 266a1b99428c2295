mod cluster;
pub use cluster::{ClusterIdentity, ClusterInfo, MonitoringCapability, Tags};

mod node;
pub use node::{BrokerEndpoint, NodeInfo, NodeKind};

mod resolved;
pub use resolved::ResolvedCluster;

mod target;
pub use target::{StaticTargetRecord, TargetLabels};

mod page;
pub use page::Page;
