use async_trait::async_trait;
use aws_config::{BehaviorVersion, Region};
use aws_sdk_kafka::{
    Client, error::DisplayErrorContext,
    operation::get_bootstrap_brokers::GetBootstrapBrokersOutput, types,
};
use tracing::{debug, trace};

use msk_model::{ClusterIdentity, ClusterInfo, MonitoringCapability, NodeInfo, NodeKind, Page};

use crate::{api::KafkaApi, errors::CloudError};

/// [`KafkaApi`] backed by the Amazon MSK control plane.
#[derive(Clone, Debug)]
pub struct AwsKafkaApi {
    client: Client,
}

impl AwsKafkaApi {
    /// Load credentials and region from the default provider chain.
    ///
    /// An explicit `region` takes precedence over the environment, profile and instance metadata.
    pub async fn from_env(region: Option<String>) -> Self {
        let mut loader = aws_config::defaults(BehaviorVersion::latest());
        if let Some(region) = region {
            loader = loader.region(Region::new(region));
        }
        let config = loader.load().await;
        debug!(region = ?config.region(), "aws configuration loaded");

        Self::new(Client::new(&config))
    }

    pub fn new(client: Client) -> Self {
        Self { client }
    }
}

#[async_trait]
impl KafkaApi for AwsKafkaApi {
    async fn list_clusters(
        &self,
        next_token: Option<String>,
    ) -> Result<Page<ClusterInfo>, CloudError> {
        let output = self
            .client
            .list_clusters()
            .set_next_token(next_token)
            .send()
            .await
            .map_err(|e| CloudError::new("ListClusters", DisplayErrorContext(&e).to_string()))?;

        let items = output
            .cluster_info_list()
            .iter()
            .map(cluster_info)
            .collect();
        Ok(Page {
            items,
            next_token: output.next_token().map(str::to_owned),
        })
    }

    async fn list_nodes(
        &self,
        cluster_arn: &str,
        next_token: Option<String>,
    ) -> Result<Page<NodeInfo>, CloudError> {
        let output = self
            .client
            .list_nodes()
            .cluster_arn(cluster_arn)
            .set_next_token(next_token)
            .send()
            .await
            .map_err(|e| CloudError::new("ListNodes", DisplayErrorContext(&e).to_string()))?;

        let items = output
            .node_info_list()
            .iter()
            .filter_map(|node| {
                let info = node_info(node);
                if info.is_none() {
                    trace!(
                        cluster_arn,
                        node_type = ?node.node_type(),
                        "node without broker or controller details skipped"
                    );
                }
                info
            })
            .collect();
        Ok(Page {
            items,
            next_token: output.next_token().map(str::to_owned),
        })
    }

    async fn get_bootstrap_brokers(&self, cluster_arn: &str) -> Result<String, CloudError> {
        let output = self
            .client
            .get_bootstrap_brokers()
            .cluster_arn(cluster_arn)
            .send()
            .await
            .map_err(|e| {
                CloudError::new("GetBootstrapBrokers", DisplayErrorContext(&e).to_string())
            })?;

        Ok(preferred_bootstrap(&output).unwrap_or_default().to_owned())
    }
}

/// First non-blank bootstrap string: plaintext, then TLS, then SASL/IAM, then SASL/SCRAM.
fn preferred_bootstrap(output: &GetBootstrapBrokersOutput) -> Option<&str> {
    [
        output.bootstrap_broker_string(),
        output.bootstrap_broker_string_tls(),
        output.bootstrap_broker_string_sasl_iam(),
        output.bootstrap_broker_string_sasl_scram(),
    ]
    .into_iter()
    .flatten()
    .find(|s| !s.trim().is_empty())
}

fn cluster_info(cluster: &types::ClusterInfo) -> ClusterInfo {
    let prometheus = cluster.open_monitoring().and_then(|m| m.prometheus());
    let jmx = prometheus
        .and_then(|p| p.jmx_exporter())
        .and_then(|e| e.enabled_in_broker())
        .unwrap_or(false);
    let node = prometheus
        .and_then(|p| p.node_exporter())
        .and_then(|e| e.enabled_in_broker())
        .unwrap_or(false);

    let identity = ClusterIdentity {
        name: cluster.cluster_name().unwrap_or_default().to_string(),
        arn: cluster.cluster_arn().unwrap_or_default().to_string(),
        tags: cluster.tags().cloned().unwrap_or_default(),
    };
    ClusterInfo::new(identity, MonitoringCapability::new(jmx, node))
}

fn node_info(node: &types::NodeInfo) -> Option<NodeInfo> {
    if let Some(broker) = node.broker_node_info() {
        return Some(NodeInfo {
            kind: NodeKind::Broker,
            endpoints: broker.endpoints().to_vec(),
        });
    }
    node.controller_node_info().map(|controller| NodeInfo {
        kind: NodeKind::Controller,
        endpoints: controller.endpoints().to_vec(),
    })
}
