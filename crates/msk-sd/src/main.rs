use std::sync::Arc;

use anyhow::{Context, Result};
use clap::Parser;
use tokio::net::TcpListener;
use tokio_util::sync::CancellationToken;
use tracing::{info, warn};

use msk_api::{HttpApi, metrics_router, serve};
use msk_core::{FileSink, PushScheduler};
use msk_discover::{AwsKafkaApi, Discovery};
use msk_observe::logger_init;
use msk_prometheus::PrometheusMetrics;

use crate::cli::CliArgs;

mod cli;

type AwsDiscovery = Discovery<AwsKafkaApi>;

#[tokio::main]
async fn main() -> Result<()> {
    let args = CliArgs::parse().validate()?;
    logger_init(&args.logger_config())?;

    let config = args.discovery_config()?;
    let api = Arc::new(AwsKafkaApi::from_env(args.region.clone()).await);
    let discovery = Arc::new(Discovery::new(api, config));
    let metrics = Arc::new(PrometheusMetrics::new()?);

    let shutdown = CancellationToken::new();
    tokio::spawn(watch_signals(shutdown.clone()));

    if args.http_sd {
        run_pull(&args, discovery, metrics, shutdown).await
    } else {
        run_push(&args, discovery, metrics, shutdown).await
    }
}

async fn run_push(
    args: &CliArgs,
    discovery: Arc<AwsDiscovery>,
    metrics: Arc<PrometheusMetrics>,
    shutdown: CancellationToken,
) -> Result<()> {
    let sink = FileSink::new(&args.output, args.output_format());
    info!(
        output = %sink.path().display(),
        format = ?sink.format(),
        interval = %humantime::format_duration(args.scrape_interval),
        "starting push mode"
    );

    let exporter = match args.metrics_address {
        Some(addr) => {
            let listener = TcpListener::bind(addr)
                .await
                .with_context(|| format!("failed to bind metrics address {addr}"))?;
            let router = metrics_router(metrics.clone());
            Some(tokio::spawn(serve(listener, router, shutdown.clone())))
        }
        None => None,
    };

    PushScheduler::new(discovery, sink, args.scrape_interval)
        .with_timeout(args.discovery_timeout)
        .with_metrics(metrics)
        .run(shutdown)
        .await;

    if let Some(handle) = exporter {
        handle
            .await
            .context("metrics server task failed")?
            .context("metrics server failed")?;
    }
    Ok(())
}

async fn run_pull(
    args: &CliArgs,
    discovery: Arc<AwsDiscovery>,
    metrics: Arc<PrometheusMetrics>,
    shutdown: CancellationToken,
) -> Result<()> {
    if args.metrics_address.is_some() {
        warn!("--metrics-address is ignored in pull mode, /metrics shares the listen address");
    }
    info!(address = %args.listen_address, "starting pull mode");

    let listener = TcpListener::bind(args.listen_address)
        .await
        .with_context(|| format!("failed to bind listen address {}", args.listen_address))?;
    let router = HttpApi::new(discovery)
        .with_timeout(args.discovery_timeout)
        .with_metrics(metrics)
        .router();

    serve(listener, router, shutdown)
        .await
        .context("http server failed")
}

/// Cancel `shutdown` on SIGINT or SIGTERM.
async fn watch_signals(shutdown: CancellationToken) {
    let interrupt = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            warn!(error = %e, "failed to listen for SIGINT");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        use tokio::signal::unix::{SignalKind, signal};
        match signal(SignalKind::terminate()) {
            Ok(mut stream) => {
                stream.recv().await;
            }
            Err(e) => {
                warn!(error = %e, "failed to listen for SIGTERM");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = interrupt => {},
        _ = terminate => {},
    }
    info!("shutdown requested");
    shutdown.cancel();
}
