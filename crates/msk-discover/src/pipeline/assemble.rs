use msk_model::{
    JMX_EXPORTER_PORT, NODE_EXPORTER_PORT, ResolvedCluster, StaticTargetRecord, TargetLabels,
};

/// Turn a resolved cluster into its static config.
///
/// Targets follow broker order; per broker the JMX target comes before the node exporter target.
pub fn assemble(job_prefix: &str, resolved: &ResolvedCluster) -> StaticTargetRecord {
    let capacity = resolved
        .brokers
        .iter()
        .map(|b| usize::from(b.jmx) + usize::from(b.node))
        .sum();

    let mut targets = Vec::with_capacity(capacity);
    for broker in &resolved.brokers {
        if broker.jmx {
            targets.push(format!("{}:{}", broker.host, JMX_EXPORTER_PORT));
        }
        if broker.node {
            targets.push(format!("{}:{}", broker.host, NODE_EXPORTER_PORT));
        }
    }

    StaticTargetRecord {
        targets,
        labels: TargetLabels {
            job: format!("{}-{}", job_prefix, resolved.identity.name),
            cluster_name: resolved.identity.name.clone(),
            cluster_arn: resolved.identity.arn.clone(),
        },
    }
}
