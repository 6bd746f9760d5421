use std::sync::Arc;
use std::time::Duration;

use anyhow::Result;
use axum::Router;
use reqwest::Client;
use tracing::{error, info};

use crate::cache::token_cache::TokenCache;
use crate::config::settings::SettingsConfig;
use crate::config::upstream::ServiceConfig;
use crate::observability::logger::Logger;
use crate::observability::metrics::{get_metrics, Metrics};
use crate::observability::routes::MetricsState;
use crate::server::routes::resource_router;
use crate::sources::playlist::PlaylistSource;

#[derive(Clone)]
pub struct AppState {
    pub metrics_state: MetricsState,
    pub playlists: Arc<PlaylistSource>,
    pub logger: Arc<dyn Logger>,
}

impl AppState {
    pub fn new (
        metrics: &Metrics,
        playlists: PlaylistSource,
        logger: Arc<dyn Logger>,
    ) -> Self {
        Self {
            metrics_state: MetricsState::new(metrics.registry.clone()),
            playlists: Arc::new(playlists),
            logger,
        }
    }

    /// Wire the upstream client from config: one HTTP client, one token cache for the process.
    pub async fn from_config(service_config: Arc<ServiceConfig>, logger: Arc<dyn Logger>) -> Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_millis(service_config.settings.request_timeout_ms))
            .build()?;
        let playlists = PlaylistSource::new(
            client,
            service_config,
            Arc::new(TokenCache::new()),
            logger.clone(),
        );
        Ok(Self::new(get_metrics().await, playlists, logger))
    }
}

pub fn build_router(settings_config: &SettingsConfig, state: AppState) -> Router {
    Router::new()
        .merge(resource_router())
        .merge(state.metrics_state.router(&settings_config.metrics))
        .with_state(state)
}

/// Start the Axum server with the resource routes and, when enabled, the metrics route.
pub async fn start(settings_config: &SettingsConfig, state: AppState) -> Result<()> {
    let metrics = get_metrics().await;
    let app = build_router(settings_config, state);

    let bind_addr = format!("{}:{}", settings_config.server.host, settings_config.server.port);
    let listener = tokio::net::TcpListener::bind(&bind_addr).await?;
    info!("listening on {}", bind_addr);
    metrics.up.set(1);

    let served = axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await;
    metrics.up.set(0);
    served?;

    Ok(())
}

async fn shutdown_signal() {
    match tokio::signal::ctrl_c().await {
        Ok(()) => info!("shutdown signal received"),
        Err(e) => {
            error!("unable to listen for shutdown signal: {}", e);
            std::future::pending::<()>().await
        }
    }
}
