// tests/common/mod.rs
pub use axum::Router;
pub use serde_json::json;
pub use tokio::task::JoinHandle;

use std::net::SocketAddr;
use std::sync::{Arc, Mutex};

use httpmock::Method::POST;
use httpmock::{Mock, MockServer};
use reqwest::Client;

use crate::cache::token_cache::TokenCache;
use crate::config::upstream::UpstreamConfig;
use crate::observability::logger::{LogContext, Logger, NoopLogger};
use crate::sources::token_exchange::TokenManager;

pub const PLAYLIST_ID: &str = "37i9dQZF1DXcBWIGoYBM5M";
pub const TOKEN_PATH: &str = "/api/token";
/// base64("client-id:client-secret")
pub const BASIC_CREDENTIALS: &str = "Basic Y2xpZW50LWlkOmNsaWVudC1zZWNyZXQ=";

/// Spawn an Axum router on an ephemeral port and return (JoinHandle, SocketAddr)
pub async fn spawn_axum(router: Router) -> (JoinHandle<()>, SocketAddr) {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.expect("bind failed");
    let addr = listener.local_addr().unwrap();
    let handle = tokio::spawn(async move {
        axum::serve(listener, router).await.expect("server failed");
    });
    (handle, addr)
}

pub fn build_reqwest_client() -> Client {
    Client::builder()
        .timeout(std::time::Duration::from_secs(5))
        .build()
        .expect("reqwest client")
}

/// Upstream config pointing both the API and the token endpoint at `server`.
pub fn upstream_config(server: &MockServer) -> UpstreamConfig {
    UpstreamConfig::new(&server.url("/v1"), &server.url(TOKEN_PATH), "client-id", "client-secret")
}

pub fn token_manager(config: UpstreamConfig, cache: Arc<TokenCache>) -> TokenManager {
    let logger: Arc<dyn Logger> = Arc::new(NoopLogger);
    TokenManager::new(build_reqwest_client(), Arc::new(config), cache, logger)
}

/// Client-credentials endpoint that only answers correctly-authenticated requests.
pub async fn mock_token_endpoint<'a>(server: &'a MockServer, access_token: &str, expires_in: u64) -> Mock<'a> {
    let body = json!({
        "access_token": access_token,
        "token_type": "Bearer",
        "expires_in": expires_in
    });
    server
        .mock_async(|when, then| {
            when.method(POST)
                .path(TOKEN_PATH)
                .header("authorization", BASIC_CREDENTIALS)
                .header("content-type", "application/x-www-form-urlencoded")
                .body("grant_type=client_credentials");
            then.status(200)
                .header("Content-Type", "application/json")
                .json_body(body.clone());
        })
        .await
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogLevelTag {
    Error,
    Warning,
    Info,
}

/// Keeps every entry in memory; used to assert on emitted logs.
#[derive(Debug, Default)]
pub struct MemoryLogger {
    entries: Mutex<Vec<(LogLevelTag, String, Option<LogContext>)>>,
}

impl MemoryLogger {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    pub fn entries(&self) -> Vec<(LogLevelTag, String, Option<LogContext>)> {
        self.entries
            .lock()
            .map(|entries| entries.clone())
            .unwrap_or_default()
    }

    fn push(&self, level: LogLevelTag, message: &str, context: Option<&LogContext>) {
        if let Ok(mut entries) = self.entries.lock() {
            entries.push((level, message.to_owned(), context.cloned()));
        }
    }
}

impl Logger for MemoryLogger {
    fn error(&self, message: &str, context: Option<&LogContext>) {
        self.push(LogLevelTag::Error, message, context);
    }

    fn warning(&self, message: &str, context: Option<&LogContext>) {
        self.push(LogLevelTag::Warning, message, context);
    }

    fn info(&self, message: &str, context: Option<&LogContext>) {
        self.push(LogLevelTag::Info, message, context);
    }
}
