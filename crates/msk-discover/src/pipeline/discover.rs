use std::sync::Arc;

use async_trait::async_trait;
use futures::{StreamExt, TryStreamExt, stream};
use tracing::{debug, info};

use msk_model::{ClusterInfo, ResolvedCluster, StaticTargetRecord};

use crate::{
    api::{KafkaApi, collect_pages},
    config::DiscoveryConfig,
    errors::DiscoverError,
    pipeline::{assemble, resolve},
};

/// Anything that can produce a complete target list on demand.
///
/// Both the push scheduler and the pull HTTP interface consume discovery through this trait.
#[async_trait]
pub trait TargetSource: Send + Sync + 'static {
    /// Run one full discovery cycle from scratch.
    async fn discover(&self) -> Result<Vec<StaticTargetRecord>, DiscoverError>;
}

/// List, filter, resolve and assemble: one discovery cycle over the control plane.
pub struct Discovery<A> {
    api: Arc<A>,
    config: Arc<DiscoveryConfig>,
}

impl<A> Clone for Discovery<A> {
    fn clone(&self) -> Self {
        Self {
            api: Arc::clone(&self.api),
            config: Arc::clone(&self.config),
        }
    }
}

impl<A> Discovery<A>
where
    A: KafkaApi,
{
    pub fn new(api: Arc<A>, config: DiscoveryConfig) -> Self {
        Self {
            api,
            config: Arc::new(config),
        }
    }

    pub fn config(&self) -> &DiscoveryConfig {
        &self.config
    }

    /// Run one discovery cycle.
    ///
    /// Fails closed: a listing failure or the resolution failure of any selected cluster fails the whole cycle.
    /// Clusters with every exporter disabled are resolved but produce no record.
    pub async fn discover(&self) -> Result<Vec<StaticTargetRecord>, DiscoverError> {
        let listed = collect_pages("ListClusters", |token| self.api.list_clusters(token))
            .await
            .map_err(DiscoverError::ListClusters)?;
        let total = listed.len();

        let selected = self.config.filter.apply(listed);
        debug!(total, selected = selected.len(), "clusters listed");

        // `buffered` yields in input order regardless of completion order.
        let resolved: Vec<ResolvedCluster> = stream::iter(selected)
            .map(|cluster| self.resolve_cluster(cluster))
            .buffered(self.config.concurrency.max(1))
            .try_collect()
            .await?;

        let records: Vec<StaticTargetRecord> = resolved
            .iter()
            .filter(|cluster| {
                let monitored = cluster.monitoring.any();
                if !monitored {
                    debug!(cluster = %cluster.identity.name, "no exporter enabled, skipping");
                }
                monitored
            })
            .map(|cluster| assemble(&self.config.job_prefix, cluster))
            .collect();

        info!(
            clusters = total,
            records = records.len(),
            targets = records.iter().map(|r| r.targets.len()).sum::<usize>(),
            "discovery cycle finished"
        );
        Ok(records)
    }

    async fn resolve_cluster(
        &self,
        cluster: ClusterInfo,
    ) -> Result<ResolvedCluster, DiscoverError> {
        resolve(self.api.as_ref(), &cluster, self.config.strategy)
            .await
            .map_err(|source| DiscoverError::Resolve {
                name: cluster.identity.name.clone(),
                arn: cluster.identity.arn.clone(),
                source,
            })
    }
}

#[async_trait]
impl<A> TargetSource for Discovery<A>
where
    A: KafkaApi,
{
    async fn discover(&self) -> Result<Vec<StaticTargetRecord>, DiscoverError> {
        Discovery::discover(self).await
    }
}
