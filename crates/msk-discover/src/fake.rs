//! In-memory control plane used by the discovery tests.

use std::{
    collections::HashMap,
    sync::{
        Mutex,
        atomic::{AtomicUsize, Ordering},
    },
};

use async_trait::async_trait;
use msk_model::{ClusterIdentity, ClusterInfo, MonitoringCapability, NodeInfo, Page};

use crate::{api::KafkaApi, errors::CloudError};

#[derive(Debug, Clone)]
pub(crate) struct FakeCluster {
    identity: ClusterIdentity,
    monitoring: MonitoringCapability,
    brokers: usize,
    kraft: bool,
    fail_nodes_after: Option<usize>,
}

impl FakeCluster {
    /// Cluster `name` with `brokers` brokers named `b-<i>.<name>` and both exporters enabled.
    pub(crate) fn new(name: &str, brokers: usize) -> Self {
        Self {
            identity: ClusterIdentity::new(name, format!("arn:::{name}")),
            monitoring: MonitoringCapability::new(true, true),
            brokers,
            kraft: false,
            fail_nodes_after: None,
        }
    }

    pub(crate) fn monitoring(mut self, jmx: bool, node: bool) -> Self {
        self.monitoring = MonitoringCapability::new(jmx, node);
        self
    }

    /// Add one controller `c-<i>.<name>` per broker, listed before the brokers.
    pub(crate) fn kraft(mut self) -> Self {
        self.kraft = true;
        self
    }

    pub(crate) fn tag(mut self, key: &str, value: &str) -> Self {
        self.identity = self.identity.with_tag(key, value);
        self
    }

    /// Fail every node listing page from index `pages` onwards.
    pub(crate) fn fail_nodes_after(mut self, pages: usize) -> Self {
        self.fail_nodes_after = Some(pages);
        self
    }

    fn info(&self) -> ClusterInfo {
        ClusterInfo::new(self.identity.clone(), self.monitoring)
    }

    fn nodes(&self) -> Vec<NodeInfo> {
        let name = &self.identity.name;
        let controllers = if self.kraft { self.brokers } else { 0 };
        (1..=controllers)
            .map(|i| NodeInfo::controller(format!("c-{i}.{name}")))
            .chain((1..=self.brokers).map(|i| NodeInfo::broker(format!("b-{i}.{name}"))))
            .collect()
    }
}

pub(crate) struct FakeKafka {
    clusters: Vec<FakeCluster>,
    page_size: usize,
    fail_clusters_after: Option<usize>,
    cluster_calls: AtomicUsize,
    node_calls: Mutex<HashMap<String, usize>>,
}

impl FakeKafka {
    pub(crate) fn new() -> Self {
        Self {
            clusters: Vec::new(),
            page_size: 100,
            fail_clusters_after: None,
            cluster_calls: AtomicUsize::new(0),
            node_calls: Mutex::new(HashMap::new()),
        }
    }

    pub(crate) fn with_cluster(mut self, cluster: FakeCluster) -> Self {
        self.clusters.push(cluster);
        self
    }

    pub(crate) fn with_page_size(mut self, size: usize) -> Self {
        self.page_size = size.max(1);
        self
    }

    /// Fail every cluster listing page from index `pages` onwards.
    pub(crate) fn fail_clusters_after(mut self, pages: usize) -> Self {
        self.fail_clusters_after = Some(pages);
        self
    }

    pub(crate) fn cluster_info(&self, name: &str) -> ClusterInfo {
        self.find(name).map(FakeCluster::info).unwrap()
    }

    pub(crate) fn cluster_calls(&self) -> usize {
        self.cluster_calls.load(Ordering::SeqCst)
    }

    pub(crate) fn node_calls(&self, name: &str) -> usize {
        let arn = format!("arn:::{name}");
        self.node_calls.lock().unwrap().get(&arn).copied().unwrap_or(0)
    }

    fn find(&self, name: &str) -> Option<&FakeCluster> {
        self.clusters.iter().find(|c| c.identity.name == name)
    }

    fn by_arn(&self, arn: &str) -> Result<&FakeCluster, CloudError> {
        self.clusters
            .iter()
            .find(|c| c.identity.arn == arn)
            .ok_or_else(|| CloudError::new("Fake", format!("unknown cluster {arn}")))
    }

    fn page<T: Clone>(
        &self,
        items: &[T],
        token: Option<String>,
    ) -> Result<(usize, Page<T>), CloudError> {
        let index: usize = match token {
            None => 0,
            Some(t) => t
                .parse()
                .map_err(|_| CloudError::new("Fake", format!("bad token {t}")))?,
        };
        let start = index * self.page_size;
        let end = (start + self.page_size).min(items.len());
        let chunk = items.get(start..end).unwrap_or_default().to_vec();

        let page = if end < items.len() {
            Page::with_next(chunk, (index + 1).to_string())
        } else {
            Page::last(chunk)
        };
        Ok((index, page))
    }
}

#[async_trait]
impl KafkaApi for FakeKafka {
    async fn list_clusters(
        &self,
        next_token: Option<String>,
    ) -> Result<Page<ClusterInfo>, CloudError> {
        self.cluster_calls.fetch_add(1, Ordering::SeqCst);
        let infos: Vec<ClusterInfo> = self.clusters.iter().map(FakeCluster::info).collect();
        let (index, page) = self.page(&infos, next_token)?;

        if self.fail_clusters_after.is_some_and(|n| index >= n) {
            return Err(CloudError::new("ListClusters", "connection reset"));
        }
        Ok(page)
    }

    async fn list_nodes(
        &self,
        cluster_arn: &str,
        next_token: Option<String>,
    ) -> Result<Page<NodeInfo>, CloudError> {
        *self
            .node_calls
            .lock()
            .unwrap()
            .entry(cluster_arn.to_string())
            .or_default() += 1;

        let cluster = self.by_arn(cluster_arn)?;
        let (index, page) = self.page(&cluster.nodes(), next_token)?;

        if cluster.fail_nodes_after.is_some_and(|n| index >= n) {
            return Err(CloudError::new("ListNodes", "throttled"));
        }
        Ok(page)
    }

    async fn get_bootstrap_brokers(&self, cluster_arn: &str) -> Result<String, CloudError> {
        let cluster = self.by_arn(cluster_arn)?;
        let name = &cluster.identity.name;
        Ok((1..=cluster.brokers)
            .map(|i| format!("b-{i}.{name}:9092"))
            .collect::<Vec<_>>()
            .join(","))
    }
}
