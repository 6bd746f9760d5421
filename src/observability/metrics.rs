use prometheus::{HistogramOpts, HistogramVec, IntCounter, IntCounterVec, IntGauge, Opts, Registry};
use tracing::info;
use std::sync::Arc;
use tokio::sync::OnceCell;

// Declare the static OnceCell to hold the Metrics.
static METRICS_INSTANCE: OnceCell<Arc<Metrics>> = OnceCell::const_new();

/// Asynchronously initializes and gets a reference to the static `Metrics`.
pub async fn get_metrics() -> &'static Arc<Metrics> {
    METRICS_INSTANCE.get_or_init(|| async {
        info!("Initializing Metrics ...");
        Metrics::new()}
    ).await
}

pub const OUTCOME_OK: &str = "ok";
pub const OUTCOME_ERROR: &str = "error";

#[derive(Clone)]
pub struct Metrics {
    pub registry: Registry,

    // Upstream metrics
    pub upstream_requests: IntCounterVec,
    pub upstream_request_duration: HistogramVec,
    pub pages_fetched: IntCounter,

    // Token metrics
    pub token_cache_hits: IntCounter,
    pub token_refreshes: IntCounterVec,

    // Boundary
    pub normalized_errors: IntCounterVec,
    pub up: IntGauge,
}

impl Metrics {
    fn new() -> Arc<Self> {
        let registry = Registry::new_custom(Some("playlistproxy".into()), None).unwrap();

        let metrics: Arc<Metrics> = Arc::new(Self {
            // Upstream
            upstream_requests: IntCounterVec::new(Opts::new("upstream_requests_total", "Upstream calls by endpoint and outcome"),&["endpoint", "outcome"],).unwrap(),
            upstream_request_duration: HistogramVec::new(HistogramOpts::new("upstream_request_duration_seconds", "Upstream call duration seconds").buckets(vec![0.01, 0.05, 0.1, 0.25, 0.5, 1.0, 2.5, 5.0]),&["endpoint"],).unwrap(),
            pages_fetched: IntCounter::new("pages_fetched_total", "Collection pages fetched").unwrap(),

            // Token
            token_cache_hits: IntCounter::new("token_cache_hits_total", "Token acquisitions served from cache").unwrap(),
            token_refreshes: IntCounterVec::new(Opts::new("token_refreshes_total", "Credential exchanges by outcome"),&["outcome"],).unwrap(),

            // Boundary
            normalized_errors: IntCounterVec::new(Opts::new("normalized_errors_total", "Error responses by kind"),&["kind"],).unwrap(),
            up: IntGauge::new("up", "1 if service is healthy").unwrap(),

            registry,
        });

        // Register all metrics in the registry
        let reg = &metrics.registry;
        reg.register(Box::new(metrics.upstream_requests.clone())).unwrap();
        reg.register(Box::new(metrics.upstream_request_duration.clone())).unwrap();
        reg.register(Box::new(metrics.pages_fetched.clone())).unwrap();
        reg.register(Box::new(metrics.token_cache_hits.clone())).unwrap();
        reg.register(Box::new(metrics.token_refreshes.clone())).unwrap();
        reg.register(Box::new(metrics.normalized_errors.clone())).unwrap();
        reg.register(Box::new(metrics.up.clone())).unwrap();

        metrics
    }
}
