use std::{sync::Arc, time::Duration};

use axum::{
    Json, Router,
    extract::State,
    http::header,
    response::IntoResponse,
    routing::get,
};
use tokio::{net::TcpListener, time::Instant};
use tokio_util::sync::CancellationToken;

use msk_core::{MetricsBackend, Mode, NoopMetrics, discover_with_timeout, observe_cycle};
use msk_discover::TargetSource;
use msk_model::StaticTargetRecord;
use msk_prometheus::PrometheusMetrics;

use crate::error::ApiError;

const TEXT_FORMAT: &str = "text/plain; version=0.0.4; charset=utf-8";

/// HTTP API service builder.
pub struct HttpApi<S> {
    source: Arc<S>,
    timeout: Option<Duration>,
    recorder: Arc<dyn MetricsBackend>,
    exposition: Option<Arc<PrometheusMetrics>>,
}

struct ApiState<S> {
    source: Arc<S>,
    timeout: Option<Duration>,
    recorder: Arc<dyn MetricsBackend>,
}

impl<S> HttpApi<S>
where
    S: TargetSource,
{
    pub fn new(source: Arc<S>) -> Self {
        Self {
            source,
            timeout: None,
            recorder: Arc::new(NoopMetrics),
            exposition: None,
        }
    }

    /// Bound every request-triggered cycle by `timeout`.
    pub fn with_timeout(mut self, timeout: Option<Duration>) -> Self {
        self.timeout = timeout;
        self
    }

    /// Record pull cycles in `metrics` and mount `GET /metrics`.
    pub fn with_metrics(mut self, metrics: Arc<PrometheusMetrics>) -> Self {
        self.recorder = metrics.clone();
        self.exposition = Some(metrics);
        self
    }

    /// Build axum router with mounted endpoints.
    ///
    /// Routes:
    /// - GET / - Run discovery, return the static config array
    /// - GET /metrics - Prometheus exposition (only with metrics attached)
    pub fn router(self) -> Router {
        let state = Arc::new(ApiState {
            source: self.source,
            timeout: self.timeout,
            recorder: self.recorder,
        });
        let router = Router::new()
            .route("/", get(list_targets::<S>))
            .with_state(state);

        match self.exposition {
            Some(metrics) => router.merge(metrics_router(metrics)),
            None => router,
        }
    }
}

/// Standalone router exposing only `GET /metrics`.
pub fn metrics_router(metrics: Arc<PrometheusMetrics>) -> Router {
    Router::new()
        .route("/metrics", get(render_metrics))
        .with_state(metrics)
}

/// Serve `router` on `listener` until `shutdown` fires, then drain in-flight requests.
pub async fn serve(
    listener: TcpListener,
    router: Router,
    shutdown: CancellationToken,
) -> std::io::Result<()> {
    if let Ok(addr) = listener.local_addr() {
        tracing::info!(%addr, "http listener started");
    }
    axum::serve(listener, router)
        .with_graceful_shutdown(async move { shutdown.cancelled().await })
        .await
}

/// GET /
async fn list_targets<S>(
    State(state): State<Arc<ApiState<S>>>,
) -> Result<Json<Vec<StaticTargetRecord>>, ApiError>
where
    S: TargetSource,
{
    let started = Instant::now();
    let result = discover_with_timeout(state.source.as_ref(), state.timeout).await;
    observe_cycle(
        state.recorder.as_ref(),
        Mode::Pull,
        started.elapsed(),
        &result,
    );

    let records = result?;
    tracing::debug!(records = records.len(), "served discovery request");
    Ok(Json(records))
}

/// GET /metrics
async fn render_metrics(
    State(metrics): State<Arc<PrometheusMetrics>>,
) -> Result<impl IntoResponse, ApiError> {
    let body = metrics.encode()?;
    Ok(([(header::CONTENT_TYPE, TEXT_FORMAT)], body))
}
