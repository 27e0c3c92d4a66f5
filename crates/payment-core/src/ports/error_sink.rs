//! Log sink for translated failures.

use crate::code::{ErrorCode, Severity};

/// One translated failure, as handed to the log sink.
#[derive(Debug, Clone, Copy)]
pub struct ErrorEvent<'a> {
    /// Correlation id also sent to the client.
    pub error_id: &'a str,
    pub code: ErrorCode,
    pub severity: Severity,
    /// Path of the request that failed.
    pub path: &'a str,
    /// Internal description of the failure. May contain detail the client never sees.
    pub description: &'a str,
    /// Cause chain, outermost first. Empty for `Severity::Warn`.
    pub causes: &'a [String],
}

/// Append-only destination for failure records.
///
/// Implementations are shared across request workers and must accept
/// concurrent calls without mixing up individual records.
pub trait ErrorSink: Send + Sync {
    fn record(&self, event: &ErrorEvent<'_>);
}
