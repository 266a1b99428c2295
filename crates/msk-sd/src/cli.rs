use std::{net::SocketAddr, path::PathBuf, time::Duration};

use anyhow::{Result, bail};
use clap::Parser;
use humantime::parse_duration;

use msk_core::OutputFormat;
use msk_discover::{DiscoveryConfig, FilterSpec, ResolveStrategy, parse_tag_condition};
use msk_model::Tags;
use msk_observe::{LoggerConfig, LoggerFormat};

#[derive(Parser, Debug)]
#[command(about, version)]
pub struct CliArgs {
    #[arg(
        long = "output",
        default_value = "msk_file_sd.yml",
        help = r#"
Path of the file_sd file written in push mode. The file is replaced atomically
on every successful refresh.
"#
    )]
    pub output: PathBuf,

    #[arg(
        long = "output-format",
        help = r#"
Encoding of the output file (yaml|json). Defaults to json for a `.json`
extension and yaml otherwise.
"#
    )]
    pub output_format: Option<OutputFormat>,

    #[arg(
        long = "scrape-interval",
        default_value = "5m",
        value_parser = parse_duration,
        help = r#"
Interval between two discovery runs in push mode.
"#
    )]
    pub scrape_interval: Duration,

    #[arg(
        long = "job-prefix",
        default_value = "msk",
        help = r#"
Prefix of the `job` label. The cluster name is appended after a dash.
"#
    )]
    pub job_prefix: String,

    #[arg(
        long = "filter",
        default_value = "",
        help = r#"
Regex matched against cluster names. Empty matches every cluster.
"#
    )]
    pub filter: String,

    #[arg(
        long = "tag",
        value_name = "KEY=VALUE",
        value_parser = parse_tag,
        help = r#"
Keep clusters carrying this tag. Repeatable; a cluster matching any
condition is kept.
"#
    )]
    pub tags: Vec<(String, String)>,

    #[arg(
        long = "region",
        help = r#"
AWS region to query. Falls back to the default provider chain.
"#
    )]
    pub region: Option<String>,

    #[arg(
        long = "http-sd",
        help = r#"
Serve targets over HTTP (pull mode) instead of writing the output file.
"#
    )]
    pub http_sd: bool,

    #[arg(
        long = "listen-address",
        default_value = ":8080",
        value_parser = parse_listen_address,
        help = r#"
Listen address of the pull-mode HTTP server. A bare `:port` binds all
interfaces.
"#
    )]
    pub listen_address: SocketAddr,

    #[arg(
        long = "resolver",
        default_value = "nodes",
        help = r#"
How broker hosts are resolved (nodes|bootstrap).
"#
    )]
    pub resolver: ResolveStrategy,

    #[arg(
        long = "concurrency",
        default_value_t = 1,
        help = r#"
Number of clusters resolved at the same time.
"#
    )]
    pub concurrency: usize,

    #[arg(
        long = "discovery-timeout",
        value_parser = parse_duration,
        help = r#"
Upper bound of a single discovery run. Unbounded when unset.
"#
    )]
    pub discovery_timeout: Option<Duration>,

    #[arg(
        long = "metrics-address",
        value_parser = parse_listen_address,
        help = r#"
Expose `/metrics` on this address in push mode. In pull mode the route is
always served on the listen address.
"#
    )]
    pub metrics_address: Option<SocketAddr>,

    #[arg(long = "log-level", default_value = "info")]
    pub log_level: String,

    #[arg(long = "log-format", default_value = "text")]
    pub log_format: LoggerFormat,
}

impl CliArgs {
    pub fn validate(self) -> Result<Self> {
        if self.scrape_interval.is_zero() {
            bail!("--scrape-interval must be greater than zero");
        }

        if self.concurrency == 0 {
            bail!("--concurrency must be at least 1");
        }

        if self.job_prefix.trim().is_empty() {
            bail!("--job-prefix must not be empty");
        }

        if let Some(region) = &self.region {
            let valid = !region.is_empty()
                && region
                    .chars()
                    .all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c == '-');
            if !valid {
                bail!("Invalid region: {region:?}");
            }
        }

        if self.discovery_timeout.is_some_and(|t| t.is_zero()) {
            bail!("--discovery-timeout must be greater than zero");
        }

        Ok(self)
    }

    pub fn discovery_config(&self) -> Result<DiscoveryConfig> {
        let tags: Tags = self.tags.iter().cloned().collect();
        let filter = FilterSpec::new(&self.filter, tags)?;

        Ok(DiscoveryConfig {
            job_prefix: self.job_prefix.clone(),
            filter,
            strategy: self.resolver,
            concurrency: self.concurrency,
        })
    }

    pub fn output_format(&self) -> OutputFormat {
        self.output_format
            .unwrap_or_else(|| OutputFormat::from_path(&self.output))
    }

    pub fn logger_config(&self) -> LoggerConfig {
        LoggerConfig::new(self.log_level.clone(), self.log_format)
    }
}

fn parse_tag(raw: &str) -> Result<(String, String), String> {
    parse_tag_condition(raw).map_err(|e| e.to_string())
}

/// Accepts `host:port`, `[v6]:port` and a bare `:port` meaning every interface.
pub fn parse_listen_address(raw: &str) -> Result<SocketAddr, String> {
    let raw = raw.trim();
    let full = match raw.strip_prefix(':') {
        Some(port) => format!("0.0.0.0:{port}"),
        None => raw.to_string(),
    };
    full.parse()
        .map_err(|e| format!("invalid listen address {raw:?}: {e}"))
}
