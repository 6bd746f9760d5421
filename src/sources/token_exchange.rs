use std::sync::Arc;

use base64::prelude::BASE64_STANDARD;
use base64::Engine;
use http::header::{AUTHORIZATION, CONTENT_TYPE};
use reqwest::Client;
use serde_json::json;

use crate::cache::token::CachedToken;
use crate::cache::token_cache::TokenCache;
use crate::config::upstream::{ConfigProvider, Credentials};
use crate::errors::Failure;
use crate::helpers::time::{get_instant, now_millis, token_expires_at_millis};
use crate::observability::logger::{log_context, Logger};
use crate::observability::metrics::{get_metrics, OUTCOME_ERROR, OUTCOME_OK};
use crate::parser::token_response::{describe_exchange_rejection, parse_exchange_response, IssuedToken};
use crate::utils::constants::{CLIENT_CREDENTIALS_BODY, ENDPOINT_TOKEN};

/// Client-credentials token manager backed by the shared [`TokenCache`].
#[derive(Clone)]
pub struct TokenManager {
    client: Client,
    config: Arc<dyn ConfigProvider>,
    cache: Arc<TokenCache>,
    logger: Arc<dyn Logger>,
}

impl TokenManager {
    pub fn new(
        client: Client,
        config: Arc<dyn ConfigProvider>,
        cache: Arc<TokenCache>,
        logger: Arc<dyn Logger>,
    ) -> Self {
        Self { client, config, cache, logger }
    }

    /// Return a usable bearer token, exchanging credentials only when the
    /// cached one is missing or inside the refresh leeway.
    pub async fn acquire(&self) -> Result<String, Failure> {
        let metrics = get_metrics().await;

        if let Some(token) = self.cache.get_valid(now_millis()).await {
            metrics.token_cache_hits.inc();
            return Ok(token.value);
        }

        let _guard = self.cache.refresh_guard().await;

        // a concurrent caller may have refreshed while we waited
        if let Some(token) = self.cache.get_valid(now_millis()).await {
            metrics.token_cache_hits.inc();
            return Ok(token.value);
        }

        match self.exchange().await {
            Ok(token) => {
                metrics.token_refreshes.with_label_values(&[OUTCOME_OK]).inc();
                self.logger.info(
                    "upstream token refreshed",
                    Some(&log_context([("expires_at_epoch_millis", json!(token.expires_at_epoch_millis))])),
                );
                self.cache.set(token.clone()).await;
                Ok(token.value)
            }
            Err(e) => {
                metrics.token_refreshes.with_label_values(&[OUTCOME_ERROR]).inc();
                self.logger.error(
                    "upstream token refresh failed",
                    Some(&log_context([("error", json!(e.to_string()))])),
                );
                Err(e)
            }
        }
    }

    async fn exchange(&self) -> Result<CachedToken, Failure> {
        let upstream = self.config.get_config();
        let credentials = upstream
            .credentials()
            .ok_or_else(|| Failure::Auth("missing upstream client credentials".to_owned()))?;

        let metrics = get_metrics().await;
        let start = get_instant();
        let now = now_millis();

        let result = self.request_token(&upstream.token_url, &credentials).await;

        metrics
            .upstream_request_duration
            .with_label_values(&[ENDPOINT_TOKEN])
            .observe(start.elapsed().as_secs_f64());
        let outcome = if result.is_ok() { OUTCOME_OK } else { OUTCOME_ERROR };
        metrics.upstream_requests.with_label_values(&[ENDPOINT_TOKEN, outcome]).inc();

        let issued = result?;
        Ok(CachedToken::new(
            issued.access_token,
            token_expires_at_millis(now, issued.lifetime_seconds),
        ))
    }

    async fn request_token(
        &self,
        token_url: &str,
        credentials: &Credentials,
    ) -> Result<IssuedToken, Failure> {
        let basic = BASE64_STANDARD.encode(format!(
            "{}:{}",
            credentials.client_id, credentials.client_secret
        ));

        let response = self
            .client
            .post(token_url)
            .header(AUTHORIZATION, format!("Basic {}", basic))
            .header(CONTENT_TYPE, "application/x-www-form-urlencoded")
            .body(CLIENT_CREDENTIALS_BODY)
            .send()
            .await
            .map_err(|e| Failure::Auth(format!("token request failed: {}", e)))?;

        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|e| Failure::Auth(format!("token response unreadable: {}", e)))?;

        if !status.is_success() {
            return Err(Failure::Auth(describe_exchange_rejection(status.as_u16(), &body)));
        }
        parse_exchange_response(&body)
    }
}
