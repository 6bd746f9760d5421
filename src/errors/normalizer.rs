use serde_json::Value;

use crate::errors::failure::Failure;
use crate::errors::normalized::{ErrorDetail, ErrorKind, NormalizedError, ValidationIssue};
use crate::errors::status::status_message;

const VALIDATION_TITLE: &str = "Input validation error";
const VALIDATION_DESCRIPTION: &str = "Please check the provided data.";

/// Where a failure happened, used for detail text on generic failures.
#[derive(Debug, Clone)]
pub struct ErrorContext {
    pub operation: String,
    pub fallback_message: String,
}

impl ErrorContext {
    pub fn new(operation: &str, fallback_message: &str) -> Self {
        Self {
            operation: operation.to_owned(),
            fallback_message: fallback_message.to_owned(),
        }
    }
}

/// Fold any failure into the outbound envelope. Never fails.
pub fn normalize(failure: &Failure, context: &ErrorContext) -> NormalizedError {
    let normalized = match failure {
        Failure::Normalized(n) => n.clone(),
        Failure::Upstream { status, message } => {
            NormalizedError::new(*status, ErrorKind::Upstream, message.clone())
        }
        Failure::Status { status_code, status_message, message } => NormalizedError {
            status_code: status_code.unwrap_or(500),
            kind: status_message
                .clone()
                .unwrap_or_else(|| ErrorKind::Unexpected.as_str().to_owned()),
            message: message.clone(),
            detail: None,
        },
        Failure::Validation(issues) => NormalizedError {
            status_code: 409,
            kind: ErrorKind::Validation.as_str().to_owned(),
            message: prettify_issues(issues),
            detail: Some(ErrorDetail {
                title: VALIDATION_TITLE.to_owned(),
                description: VALIDATION_DESCRIPTION.to_owned(),
                issues: Some(issues.clone()),
            }),
        },
        Failure::Auth(message) => NormalizedError::new(500, ErrorKind::Auth, message.clone())
            .with_detail(&context.operation, "Upstream credential exchange failed"),
        Failure::Transport(_) | Failure::Generic(_) => {
            let rendered = match failure {
                Failure::Generic(message) => message.clone(),
                other => other.to_string(),
            };
            let message = if rendered.trim().is_empty() {
                context.fallback_message.clone()
            } else {
                rendered
            };
            NormalizedError::new(500, ErrorKind::Unknown, message)
                .with_detail(&context.operation, &context.fallback_message)
        }
    };

    fill_message(normalized)
}

/// Classify an untyped error value and normalize it.
pub fn normalize_value(value: &Value, context: &ErrorContext) -> NormalizedError {
    normalize(&Failure::from_value(value), context)
}

fn fill_message(mut normalized: NormalizedError) -> NormalizedError {
    if normalized.message.trim().is_empty() {
        normalized.message = status_message(normalized.status_code).to_owned();
    }
    normalized
}

fn prettify_issues(issues: &[ValidationIssue]) -> String {
    issues
        .iter()
        .map(|issue| format!("✖ {}\n  → at {}", issue.message, issue.path.join(".")))
        .collect::<Vec<_>>()
        .join("\n")
}
