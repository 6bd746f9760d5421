use http::header::{ACCEPT, AUTHORIZATION};
use reqwest::Client;
use serde::de::DeserializeOwned;

use crate::errors::Failure;
use crate::helpers::time::get_instant;
use crate::observability::metrics::{get_metrics, OUTCOME_ERROR, OUTCOME_OK};

/// Authenticated GET returning the decoded JSON body.
///
/// Non-2xx responses are classified from their body; transport and decoding
/// errors come back as `Transport` / `Generic` failures.
pub async fn get_json<T: DeserializeOwned>(
    client: &Client,
    url: &str,
    token: &str,
    endpoint: &str,
) -> Result<T, Failure> {
    let metrics = get_metrics().await;
    let start = get_instant();

    let result = send_get(client, url, token).await;

    metrics
        .upstream_request_duration
        .with_label_values(&[endpoint])
        .observe(start.elapsed().as_secs_f64());
    let outcome = if result.is_ok() { OUTCOME_OK } else { OUTCOME_ERROR };
    metrics.upstream_requests.with_label_values(&[endpoint, outcome]).inc();

    result
}

async fn send_get<T: DeserializeOwned>(client: &Client, url: &str, token: &str) -> Result<T, Failure> {
    let response = client
        .get(url)
        .header(AUTHORIZATION, format!("Bearer {}", token))
        .header(ACCEPT, "application/json")
        .send()
        .await?;

    let status = response.status();
    let body = response.text().await?;
    if !status.is_success() {
        return Err(Failure::from_upstream_response(status.as_u16(), &body));
    }
    Ok(serde_json::from_str(&body)?)
}
