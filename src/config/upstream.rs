use serde::{Deserialize, Deserializer};

use crate::config::settings::SettingsConfig;
use crate::utils::constants::DEFAULT_TOKEN_URL;

/// ================================
/// Full service configuration
/// ================================
#[derive(Debug, Deserialize, Clone)]
pub struct ServiceConfig {
    pub settings: SettingsConfig,
    pub upstream: UpstreamConfig,
}

/// ================================
/// Upstream catalog API
/// ================================
#[derive(Debug, Deserialize, Clone, Default)]
pub struct UpstreamConfig {
    /// e.g. https://api.spotify.com/v1
    #[serde(default, deserialize_with = "null_as_empty")]
    pub base_url: String,
    #[serde(default = "default_token_url", deserialize_with = "null_as_empty")]
    pub token_url: String,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub client_id: String,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub client_secret: String,
}

impl UpstreamConfig {
    pub fn new(base_url: &str, token_url: &str, client_id: &str, client_secret: &str) -> Self {
        Self {
            base_url: base_url.trim_end_matches('/').to_owned(),
            token_url: token_url.to_owned(),
            client_id: client_id.to_owned(),
            client_secret: client_secret.to_owned(),
        }
    }

    /// None when either half of the pair is blank.
    pub fn credentials(&self) -> Option<Credentials> {
        let client_id = self.client_id.trim();
        let client_secret = self.client_secret.trim();
        if client_id.is_empty() || client_secret.is_empty() {
            return None;
        }
        Some(Credentials {
            client_id: client_id.to_owned(),
            client_secret: client_secret.to_owned(),
        })
    }

    pub fn api_url(&self, path: &str) -> String {
        format!("{}/{}", self.base_url.trim_end_matches('/'), path.trim_start_matches('/'))
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Credentials {
    pub client_id: String,
    pub client_secret: String,
}

/// Source of upstream settings for the request chain.
pub trait ConfigProvider: Send + Sync {
    fn get_config(&self) -> &UpstreamConfig;
}

impl ConfigProvider for UpstreamConfig {
    fn get_config(&self) -> &UpstreamConfig {
        self
    }
}

impl ConfigProvider for ServiceConfig {
    fn get_config(&self) -> &UpstreamConfig {
        &self.upstream
    }
}

fn default_token_url() -> String {
    DEFAULT_TOKEN_URL.to_string()
}

// `${VAR}` expanding to nothing leaves a YAML null behind
fn null_as_empty<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<String>::deserialize(deserializer)?.unwrap_or_default())
}
