use std::{fs, path::Path};
use crate::config::settings::{LogFormat, LoggingConfig};
use crate::config::upstream::ServiceConfig;
use crate::config::proc_validator;
use anyhow::{anyhow, Result};
use regex::Regex;
use tracing::{debug, error};

/// Load and validate config from YAML file
pub fn file_to_config(path: &Path) -> Result<ServiceConfig> {
    let content = fs::read_to_string(path)?;

    let expanded = expand_env_vars(&content)?;
    parse_config(expanded)
}

pub fn parse_config(content: String) -> Result<ServiceConfig> {
    let mut service_config: ServiceConfig = serde_yaml::from_str(&content)
        .inspect_err(|e| {
            error!("parse config error: {}", e);
        })?;

    // Apply defaults
    if service_config.settings.logging.is_none() {
        service_config.settings.logging = Some(LoggingConfig::new("info".to_owned(), LogFormat::Compact));
    }
    service_config.upstream.base_url = service_config.upstream.base_url.trim_end_matches('/').to_owned();

    debug!("validation config ...");
    proc_validator::validate_service_config(&service_config)
        .map_err(|issues| anyhow!("config validation failed:\n  - {}", issues.join("\n  - ")))?;

    Ok(service_config)
}

/// `${VAR}` and `${VAR:default}`; unset variables without a default expand to an empty string.
pub fn expand_env_vars(input: &str) -> Result<String> {
    let re = Regex::new(r"\$\{(\w+)(?::([^\}]+))?\}")?;
    let expanded = re.replace_all(input, |caps: &regex::Captures| {
        let var = &caps[1];
        let default = caps.get(2).map(|m| m.as_str()).unwrap_or("");
        std::env::var(var).unwrap_or_else(|_| default.to_string())
    });
    Ok(expanded.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;
    use std::io::Write;

    const CONFIG: &str = r#"
settings:
  server:
    host: 127.0.0.1
    port: "3000"
  metrics:
    is_enabled: true
upstream:
  base_url: ${PLAYLIST_PROXY_TEST_BASE:https://api.spotify.com/v1/}
  client_id: ${PLAYLIST_PROXY_TEST_ID}
  client_secret: ${PLAYLIST_PROXY_TEST_SECRET:shh}
"#;

    #[test]
    #[serial]
    fn expands_env_and_applies_defaults() {
        std::env::set_var("PLAYLIST_PROXY_TEST_ID", "client-1");
        std::env::remove_var("PLAYLIST_PROXY_TEST_BASE");

        let cfg = parse_config(expand_env_vars(CONFIG).unwrap()).unwrap();

        assert_eq!(cfg.upstream.base_url, "https://api.spotify.com/v1");
        assert_eq!(cfg.upstream.client_id, "client-1");
        assert_eq!(cfg.upstream.client_secret, "shh");
        assert_eq!(cfg.upstream.token_url, "https://accounts.spotify.com/api/token");
        assert_eq!(cfg.settings.metrics.path, "/metrics");
        assert_eq!(cfg.settings.request_timeout_ms, 10_000);
        assert_eq!(cfg.settings.logging.unwrap().format, LogFormat::Compact);

        std::env::remove_var("PLAYLIST_PROXY_TEST_ID");
    }

    #[test]
    #[serial]
    fn missing_credentials_fail_fast() {
        std::env::remove_var("PLAYLIST_PROXY_TEST_ID");

        let err = parse_config(expand_env_vars(CONFIG).unwrap()).unwrap_err();
        assert!(err.to_string().contains("upstream.client_id"));
    }

    #[test]
    #[serial]
    fn loads_from_file() {
        std::env::set_var("PLAYLIST_PROXY_TEST_ID", "from-file");
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(CONFIG.as_bytes()).unwrap();

        let cfg = file_to_config(file.path()).unwrap();
        assert_eq!(cfg.upstream.client_id, "from-file");
        assert_eq!(cfg.settings.server.port, "3000");

        std::env::remove_var("PLAYLIST_PROXY_TEST_ID");
    }
}
