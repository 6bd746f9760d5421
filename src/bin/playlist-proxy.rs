use std::sync::Arc;

use anyhow::Result;
use clap::Parser;
use playlist_proxy::observability::logger::{Logger, TracingLogger};
use playlist_proxy::server;
use playlist_proxy::server::server::AppState;
use playlist_proxy::utils::config_loader;
use playlist_proxy::utils::logging;
use playlist_proxy::utils::logging::LogLevel;
use tracing::info;

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Args {
    #[arg(short, long, env = "CONFIG", default_value = "playlist-proxy.yaml")]
    config: String,
    #[arg(long, env = "LOG_LEVEL" , value_enum)]
    log_level: Option<LogLevel>,
}

#[tokio::main]
async fn main() -> Result<()> {
    // -------------------------------
    // 1. Load YAML config (fails fast on missing upstream settings)
    // -------------------------------

    let args = Args::parse();
    let service_config = Arc::new(config_loader::run(&args.config)?);
    logging::run(&service_config, args.log_level);

    // -------------------------------
    // 2. Build upstream client and shared token cache
    // -------------------------------

    let logger: Arc<dyn Logger> = Arc::new(TracingLogger);
    let state = AppState::from_config(service_config.clone(), logger).await?;

    // -------------------------------
    // 3. Serve
    // -------------------------------

    info!("Service starting...");
    server::server::start(&service_config.settings, state).await
}
