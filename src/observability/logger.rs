use std::collections::BTreeMap;

use serde_json::Value;
use tracing::{error, info, warn};

/// Structured context attached to a log call.
pub type LogContext = BTreeMap<String, Value>;

/// Logging sink injected into the upstream client; delivery is up to the implementation.
pub trait Logger: Send + Sync {
    fn error(&self, message: &str, context: Option<&LogContext>);
    fn warning(&self, message: &str, context: Option<&LogContext>);
    fn info(&self, message: &str, context: Option<&LogContext>);
}

pub fn log_context<const N: usize>(pairs: [(&str, Value); N]) -> LogContext {
    pairs.into_iter().map(|(k, v)| (k.to_owned(), v)).collect()
}

fn render(context: Option<&LogContext>) -> String {
    context
        .map(|ctx| Value::Object(ctx.clone().into_iter().collect()).to_string())
        .unwrap_or_default()
}

/// Forwards to the process `tracing` subscriber.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingLogger;

impl Logger for TracingLogger {
    fn error(&self, message: &str, context: Option<&LogContext>) {
        error!(context = %render(context), "{}", message);
    }

    fn warning(&self, message: &str, context: Option<&LogContext>) {
        warn!(context = %render(context), "{}", message);
    }

    fn info(&self, message: &str, context: Option<&LogContext>) {
        info!(context = %render(context), "{}", message);
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct NoopLogger;

impl Logger for NoopLogger {
    fn error(&self, _: &str, _: Option<&LogContext>) {}
    fn warning(&self, _: &str, _: Option<&LogContext>) {}
    fn info(&self, _: &str, _: Option<&LogContext>) {}
}
