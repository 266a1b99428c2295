use serde::{Deserialize, Serialize};

/// Labels attached to every target of a static config.
#[derive(Clone, Debug, Eq, PartialEq, Hash, Serialize, Deserialize)]
pub struct TargetLabels {
    pub job: String,
    pub cluster_name: String,
    pub cluster_arn: String,
}

/// A single Prometheus static config, as consumed by `file_sd_configs` and `http_sd_configs`.
#[derive(Clone, Debug, Eq, PartialEq, Hash, Serialize, Deserialize)]
pub struct StaticTargetRecord {
    /// `host:port` scrape endpoints.
    pub targets: Vec<String>,
    pub labels: TargetLabels,
}
