//! Diagnostic reporter capability, called by the fetch helper on failure.

use crate::http::TransportError;
use serde::Serialize;
use serde_json::Value;

/// What the reporter learns about a failed fetch.
#[derive(Debug, Clone, Copy, Serialize)]
pub struct FailureContext<'a> {
    /// The error returned by the HTTP client.
    #[serde(rename = "err")]
    pub error: &'a TransportError,
    /// Extra context supplied through the fetch options.
    #[serde(rename = "logData", skip_serializing_if = "Option::is_none")]
    pub log_data: Option<&'a Value>,
}

/// Receives fetch failures before they are returned to the caller.
///
/// Any `Fn(&FailureContext, &str)` closure is a reporter.
pub trait ErrorReporter: Send + Sync {
    /// Report a failure. `message` names the fetch when a name was given.
    fn error(&self, context: &FailureContext<'_>, message: &str);
}

impl<F> ErrorReporter for F
where
    F: Fn(&FailureContext<'_>, &str) + Send + Sync,
{
    fn error(&self, context: &FailureContext<'_>, message: &str) {
        self(context, message);
    }
}

/// Default reporter: writes the message to stderr and ignores the context.
#[derive(Debug, Clone, Copy, Default)]
pub struct ConsoleReporter;

impl ErrorReporter for ConsoleReporter {
    #[allow(clippy::print_stderr)]
    fn error(&self, _context: &FailureContext<'_>, message: &str) {
        eprintln!("{message}");
    }
}

/// Reporter that emits a `tracing` error event with the context attached.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingReporter;

impl ErrorReporter for TracingReporter {
    fn error(&self, context: &FailureContext<'_>, message: &str) {
        tracing::error!(
            error = %context.error,
            status = ?context.error.status,
            log_data = ?context.log_data,
            "{message}"
        );
    }
}
