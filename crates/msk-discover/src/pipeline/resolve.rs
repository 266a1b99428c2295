use tracing::{debug, trace};

use msk_model::{
    BrokerEndpoint, ClusterInfo, MonitoringCapability, NodeInfo, NodeKind, ResolvedCluster,
};

use crate::{
    api::{KafkaApi, collect_pages},
    config::ResolveStrategy,
    errors::ResolveError,
};

/// Resolve the broker endpoints of one cluster.
///
/// The result never holds a partial broker list: any page failure or malformed node fails the whole cluster.
pub async fn resolve<A>(
    api: &A,
    cluster: &ClusterInfo,
    strategy: ResolveStrategy,
) -> Result<ResolvedCluster, ResolveError>
where
    A: KafkaApi + ?Sized,
{
    let caps = cluster.monitoring;
    let brokers = match strategy {
        ResolveStrategy::Nodes => {
            let nodes = collect_pages("ListNodes", |token| {
                api.list_nodes(cluster.arn(), token)
            })
            .await?;
            endpoints_from_nodes(nodes, caps)?
        }
        ResolveStrategy::Bootstrap => {
            let bootstrap = api.get_bootstrap_brokers(cluster.arn()).await?;
            endpoints_from_bootstrap(&bootstrap, caps)?
        }
    };
    debug!(cluster = %cluster.name(), brokers = brokers.len(), ?strategy, "cluster resolved");

    Ok(ResolvedCluster {
        identity: cluster.identity.clone(),
        monitoring: caps,
        brokers,
    })
}

fn endpoints_from_nodes(
    nodes: Vec<NodeInfo>,
    caps: MonitoringCapability,
) -> Result<Vec<BrokerEndpoint>, ResolveError> {
    nodes
        .into_iter()
        .map(|node| {
            let host = node
                .endpoints
                .into_iter()
                .next()
                .ok_or(ResolveError::MissingEndpoint(node.kind))?;

            // Controllers do not run the node exporter.
            let node_exporter = match node.kind {
                NodeKind::Broker => caps.node,
                NodeKind::Controller => false,
            };
            Ok(BrokerEndpoint {
                host,
                jmx: caps.jmx,
                node: node_exporter,
            })
        })
        .collect()
}

fn endpoints_from_bootstrap(
    bootstrap: &str,
    caps: MonitoringCapability,
) -> Result<Vec<BrokerEndpoint>, ResolveError> {
    let mut brokers: Vec<BrokerEndpoint> = Vec::new();
    for entry in bootstrap.split(',').map(str::trim).filter(|e| !e.is_empty()) {
        let host = strip_port(entry)
            .ok_or_else(|| ResolveError::InvalidBootstrapEntry(entry.to_string()))?;

        if brokers.iter().any(|b| b.host == host) {
            trace!(host, "duplicate bootstrap entry skipped");
            continue;
        }
        brokers.push(BrokerEndpoint {
            host: host.to_string(),
            jmx: caps.jmx,
            node: caps.node,
        });
    }

    if brokers.is_empty() {
        return Err(ResolveError::EmptyBootstrap);
    }
    Ok(brokers)
}

fn strip_port(entry: &str) -> Option<&str> {
    let (host, port) = entry.rsplit_once(':')?;
    if host.is_empty() || port.is_empty() || !port.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    Some(host)
}
