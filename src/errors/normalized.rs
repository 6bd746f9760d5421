use serde::Serialize;

/// Machine-readable error kinds emitted by this service.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    Validation,
    Auth,
    Upstream,
    Unknown,
    /// general status envelopes that did not name a kind
    Unexpected,
}

impl ErrorKind {
    pub fn as_str(&self) -> &'static str {
        match *self {
            ErrorKind::Validation => "VALIDATION_ERROR",
            ErrorKind::Auth => "AUTH_ERROR",
            ErrorKind::Upstream => "UPSTREAM_ERROR",
            ErrorKind::Unknown => "UNKNOWN_ERROR",
            ErrorKind::Unexpected => "UNEXPECTED_ERROR",
        }
    }
}

/// One violated input constraint.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ValidationIssue {
    pub code: String,
    pub path: Vec<String>,
    pub message: String,
}

impl ValidationIssue {
    pub fn new(code: &str, field: &str, message: &str) -> Self {
        Self {
            code: code.to_owned(),
            path: vec![field.to_owned()],
            message: message.to_owned(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ErrorDetail {
    pub title: String,
    pub description: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub issues: Option<Vec<ValidationIssue>>,
}

/// The single error envelope returned to callers.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NormalizedError {
    pub status_code: u16,
    pub kind: String,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub detail: Option<ErrorDetail>,
}

impl NormalizedError {
    pub fn new(status_code: u16, kind: ErrorKind, message: impl Into<String>) -> Self {
        Self {
            status_code,
            kind: kind.as_str().to_owned(),
            message: message.into(),
            detail: None,
        }
    }

    pub fn with_detail(mut self, title: &str, description: &str) -> Self {
        self.detail = Some(ErrorDetail {
            title: title.to_owned(),
            description: description.to_owned(),
            issues: None,
        });
        self
    }
}
