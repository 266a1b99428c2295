use std::future::Future;

use async_trait::async_trait;
use msk_model::{ClusterInfo, NodeInfo, Page};

use crate::errors::CloudError;

/// Cluster inventory exposed by the cloud control plane.
///
/// Listings are paginated: callers pass back the `next_token` of the previous page until it is absent.
#[async_trait]
pub trait KafkaApi: Send + Sync + 'static {
    /// List one page of clusters in the configured region.
    async fn list_clusters(
        &self,
        next_token: Option<String>,
    ) -> Result<Page<ClusterInfo>, CloudError>;

    /// List one page of broker and controller nodes of a cluster.
    async fn list_nodes(
        &self,
        cluster_arn: &str,
        next_token: Option<String>,
    ) -> Result<Page<NodeInfo>, CloudError>;

    /// Comma-separated `host:port` bootstrap list of a cluster.
    async fn get_bootstrap_brokers(&self, cluster_arn: &str) -> Result<String, CloudError>;
}

/// Walk a paginated listing to the end, keeping page and in-page order.
///
/// Any page failure aborts the walk; no partial result is returned. A page that hands back the
/// token it was requested with is a failure too, otherwise the walk would never end.
pub(crate) async fn collect_pages<T, F, Fut>(
    operation: &'static str,
    mut fetch: F,
) -> Result<Vec<T>, CloudError>
where
    F: FnMut(Option<String>) -> Fut,
    Fut: Future<Output = Result<Page<T>, CloudError>>,
{
    let mut items = Vec::new();
    let mut token: Option<String> = None;
    loop {
        let page = fetch(token.clone()).await?;
        let next = page.next().map(str::to_owned);
        items.extend(page.items);

        match next {
            Some(next) if token.as_deref() == Some(next.as_str()) => {
                return Err(CloudError::new(
                    operation,
                    format!("repeated pagination token {next:?}"),
                ));
            }
            Some(next) => token = Some(next),
            None => return Ok(items),
        }
    }
}
