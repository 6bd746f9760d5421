use serde_json::Value;
use thiserror::Error;

use crate::errors::normalized::{ErrorDetail, ErrorKind, NormalizedError, ValidationIssue};

/// Every failure the request path can produce, tagged at the point it enters the service.
#[derive(Debug, Error)]
pub enum Failure {
    /// Already in the outbound envelope.
    #[error("{}", .0.message)]
    Normalized(NormalizedError),

    /// Input rejected before any network call.
    #[error("input validation failed: {}", render_issues(.0))]
    Validation(Vec<ValidationIssue>),

    /// Missing credentials or a rejected/malformed credential exchange.
    #[error("credential exchange failed: {0}")]
    Auth(String),

    /// Structured `{ error: { status, message } }` envelope, or a bare upstream status.
    #[error("upstream responded {status}: {message}")]
    Upstream { status: u16, message: String },

    /// General `{ statusCode?, statusMessage?, message }` envelope.
    #[error("{message}")]
    Status {
        status_code: Option<u16>,
        status_message: Option<String>,
        message: String,
    },

    #[error("transport failure: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("{0}")]
    Generic(String),
}

impl From<serde_json::Error> for Failure {
    fn from(e: serde_json::Error) -> Self {
        Failure::Generic(format!("malformed upstream payload: {}", e))
    }
}

impl Failure {
    /// Classify an untyped error value; first matching shape wins.
    pub fn from_value(value: &Value) -> Failure {
        if let Some(normalized) = as_normalized(value) {
            return Failure::Normalized(normalized);
        }
        if let Some((status, message)) = as_upstream_envelope(value) {
            return Failure::Upstream { status, message };
        }
        if let Some(failure) = as_status_envelope(value) {
            return failure;
        }
        if let Some(issues) = as_issue_list(value) {
            return Failure::Validation(issues);
        }
        Failure::Generic(match value {
            Value::String(s) => s.clone(),
            other => other.to_string(),
        })
    }

    /// Classify a non-2xx upstream response. Bodies without a recognizable
    /// envelope, or whose envelope names a non-error status, carry the HTTP status.
    pub fn from_upstream_response(status: u16, body: &str) -> Failure {
        match serde_json::from_str::<Value>(body).map(|v| Failure::from_value(&v)) {
            Ok(Failure::Upstream { status: declared, message }) => Failure::Upstream {
                status: error_status_or(Some(declared), status),
                message,
            },
            Ok(Failure::Status { status_code, status_message, message }) => Failure::Status {
                status_code: Some(error_status_or(status_code, status)),
                status_message,
                message,
            },
            Ok(Failure::Normalized(mut normalized)) => {
                normalized.status_code = error_status_or(Some(normalized.status_code), status);
                Failure::Normalized(normalized)
            }
            _ => Failure::Upstream { status, message: String::new() },
        }
    }
}

fn error_status_or(declared: Option<u16>, fallback: u16) -> u16 {
    declared.filter(|code| (400..=599).contains(code)).unwrap_or(fallback)
}

fn render_issues(issues: &[ValidationIssue]) -> String {
    issues
        .iter()
        .map(|i| format!("{} (at {})", i.message, i.path.join(".")))
        .collect::<Vec<_>>()
        .join("; ")
}

fn status_u16(value: &Value) -> Option<u16> {
    value.as_u64().and_then(|n| u16::try_from(n).ok())
}

fn as_normalized(value: &Value) -> Option<NormalizedError> {
    let obj = value.as_object()?;
    let status_code = status_u16(obj.get("statusCode")?)?;
    let message = obj.get("message")?.as_str()?;

    let detail = match obj.get("detail") {
        None | Some(Value::Null) => None,
        Some(detail) => Some(as_detail(detail)?),
    };

    let kind = obj
        .get("kind")
        .or_else(|| obj.get("statusMessage"))
        .and_then(Value::as_str)
        .unwrap_or(ErrorKind::Unexpected.as_str());

    Some(NormalizedError {
        status_code,
        kind: kind.to_owned(),
        message: message.to_owned(),
        detail,
    })
}

fn as_detail(value: &Value) -> Option<ErrorDetail> {
    let obj = value.as_object()?;
    let issues = match obj.get("issues") {
        None | Some(Value::Null) => None,
        Some(issues) => Some(issues.as_array()?.iter().map(as_issue).collect::<Option<Vec<_>>>()?),
    };
    Some(ErrorDetail {
        title: obj.get("title")?.as_str()?.to_owned(),
        description: obj.get("description")?.as_str()?.to_owned(),
        issues,
    })
}

fn as_upstream_envelope(value: &Value) -> Option<(u16, String)> {
    let inner = value.get("error")?.as_object()?;
    let status = status_u16(inner.get("status")?)?;
    let message = inner.get("message")?.as_str()?;
    Some((status, message.to_owned()))
}

fn as_status_envelope(value: &Value) -> Option<Failure> {
    let obj = value.as_object()?;
    let message = obj.get("message")?.as_str()?;

    let status_code = match obj.get("statusCode") {
        None | Some(Value::Null) => None,
        Some(code) => Some(status_u16(code)?),
    };
    let status_message = match obj.get("statusMessage") {
        None | Some(Value::Null) => None,
        Some(m) => Some(m.as_str()?.to_owned()),
    };

    Some(Failure::Status {
        status_code,
        status_message,
        message: message.to_owned(),
    })
}

fn as_issue_list(value: &Value) -> Option<Vec<ValidationIssue>> {
    let items = value.as_array()?;
    if items.is_empty() {
        return None;
    }
    items.iter().map(as_issue).collect()
}

fn as_issue(value: &Value) -> Option<ValidationIssue> {
    let obj = value.as_object()?;
    let path = obj
        .get("path")?
        .as_array()?
        .iter()
        .map(|segment| match segment {
            Value::String(s) => s.clone(),
            other => other.to_string(),
        })
        .collect();

    Some(ValidationIssue {
        code: obj.get("code")?.as_str()?.to_owned(),
        path,
        message: obj.get("message")?.as_str()?.to_owned(),
    })
}
