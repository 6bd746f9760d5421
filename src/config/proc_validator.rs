//! Configuration validation with aggregated errors.
//! - Aggregates all issues into Vec<String>
//! - Upstream URLs must be absolute http(s) URLs
//! - Client credentials must be present (fail fast before serving traffic)
//! - Server port / metrics path / logging level invariants

use tracing::{error, info};
use url::Url;

use crate::config::settings::SettingsConfig;
use crate::config::upstream::{ServiceConfig, UpstreamConfig};

const LOG_LEVELS: [&str; 5] = ["trace", "debug", "info", "warn", "error"];

/// Public entrypoint: returns Ok(()) or Err(Vec<String>) containing all issues.
pub fn validate_service_config(cfg: &ServiceConfig) -> Result<(), Vec<String>> {
    let mut errors: Vec<String> = Vec::new();

    validate_settings(&cfg.settings, &mut errors);
    validate_upstream(&cfg.upstream, &mut errors);

    if errors.is_empty() {
        info!("config validation passed");
        Ok(())
    } else {
        for e in &errors {
            error!("config validation: {}", e);
        }
        Err(errors)
    }
}

fn validate_settings(settings: &SettingsConfig, errors: &mut Vec<String>) {
    if settings.server.host.trim().is_empty() {
        errors.push("settings.server.host must not be empty".to_string());
    }
    if settings.server.port.parse::<u16>().is_err() {
        errors.push(format!(
            "settings.server.port '{}' is not a valid port",
            settings.server.port
        ));
    }
    if settings.metrics.is_enabled && !settings.metrics.path.starts_with('/') {
        errors.push(format!(
            "settings.metrics.path '{}' must start with '/'",
            settings.metrics.path
        ));
    }
    if settings.request_timeout_ms == 0 {
        errors.push("settings.request_timeout_ms must be > 0".to_string());
    }
    if let Some(logging) = &settings.logging {
        if !LOG_LEVELS.contains(&logging.level.to_lowercase().as_str()) {
            errors.push(format!(
                "settings.logging.level '{}' must be one of {:?}",
                logging.level, LOG_LEVELS
            ));
        }
    }
}

fn validate_upstream(upstream: &UpstreamConfig, errors: &mut Vec<String>) {
    validate_http_url("upstream.base_url", &upstream.base_url, errors);
    validate_http_url("upstream.token_url", &upstream.token_url, errors);

    if upstream.client_id.trim().is_empty() {
        errors.push("upstream.client_id is required".to_string());
    }
    if upstream.client_secret.trim().is_empty() {
        errors.push("upstream.client_secret is required".to_string());
    }
}

fn validate_http_url(field: &str, value: &str, errors: &mut Vec<String>) {
    match Url::parse(value) {
        Ok(url) if url.scheme() == "http" || url.scheme() == "https" => {}
        Ok(url) => errors.push(format!(
            "{} '{}' has unsupported scheme '{}'",
            field,
            value,
            url.scheme()
        )),
        Err(e) => errors.push(format!("{} '{}' is not a valid URL: {}", field, value, e)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::settings::{LogFormat, LoggingConfig, MetricsConfig, ServerConfig};

    fn settings(port: &str) -> SettingsConfig {
        SettingsConfig {
            server: ServerConfig { host: "0.0.0.0".into(), port: port.into() },
            metrics: MetricsConfig::default(),
            logging: Some(LoggingConfig::new("info".into(), LogFormat::Json)),
            request_timeout_ms: 1000,
        }
    }

    #[test]
    fn valid_config_passes() {
        let cfg = ServiceConfig {
            settings: settings("8080"),
            upstream: UpstreamConfig::new(
                "https://api.spotify.com/v1",
                "https://accounts.spotify.com/api/token",
                "id",
                "secret",
            ),
        };
        assert!(validate_service_config(&cfg).is_ok());
    }

    #[test]
    fn all_issues_are_reported() {
        let cfg = ServiceConfig {
            settings: settings("not-a-port"),
            upstream: UpstreamConfig::new("ftp://example.com", "", "", ""),
        };
        let errors = validate_service_config(&cfg).unwrap_err();

        assert_eq!(errors.len(), 5, "{errors:?}");
        assert!(errors.iter().any(|e| e.contains("settings.server.port")));
        assert!(errors.iter().any(|e| e.contains("unsupported scheme 'ftp'")));
        assert!(errors.iter().any(|e| e.contains("upstream.token_url")));
        assert!(errors.iter().any(|e| e.contains("upstream.client_id")));
        assert!(errors.iter().any(|e| e.contains("upstream.client_secret")));
    }
}
