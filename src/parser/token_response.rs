use serde::Deserialize;
use serde_json::Value;

use crate::errors::Failure;
use crate::utils::constants::BEARER_SCHEME;

#[derive(Debug, Deserialize)]
struct ExchangeResponse {
    access_token: String,
    token_type: String,
    expires_in: Value,
}

/// Validated credential-exchange payload.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IssuedToken {
    pub access_token: String,
    pub lifetime_seconds: u64,
}

/// Parse a 2xx exchange body. Any shape mismatch is an auth failure.
pub fn parse_exchange_response(body: &str) -> Result<IssuedToken, Failure> {
    let response: ExchangeResponse = serde_json::from_str(body)
        .map_err(|e| Failure::Auth(format!("malformed token response: {}", e)))?;

    if response.access_token.is_empty() {
        return Err(Failure::Auth("token response has an empty access_token".to_owned()));
    }
    if response.token_type != BEARER_SCHEME {
        return Err(Failure::Auth(format!(
            "unexpected token_type '{}', expected '{}'",
            response.token_type, BEARER_SCHEME
        )));
    }
    let lifetime_seconds = response
        .expires_in
        .as_u64()
        .filter(|secs| *secs > 0)
        .ok_or_else(|| {
            Failure::Auth(format!(
                "expires_in must be a positive integer, got {}",
                response.expires_in
            ))
        })?;

    Ok(IssuedToken {
        access_token: response.access_token,
        lifetime_seconds,
    })
}

/// Message for a rejected exchange, preferring the OAuth `error_description`.
pub fn describe_exchange_rejection(status: u16, body: &str) -> String {
    let detail = serde_json::from_str::<Value>(body).ok().and_then(|v| {
        v.get("error_description")
            .and_then(Value::as_str)
            .or_else(|| v.get("error").and_then(Value::as_str))
            .or_else(|| v.pointer("/error/message").and_then(Value::as_str))
            .map(str::to_owned)
    });
    match detail {
        Some(detail) => format!("token endpoint responded {}: {}", status, detail),
        None => format!("token endpoint responded {}", status),
    }
}
