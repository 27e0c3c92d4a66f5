//! Error sink that writes through the global `tracing` subscriber.

use payment_core::Severity;
use payment_core::ports::{ErrorEvent, ErrorSink};

/// Emits each failure as one `tracing` event.
///
/// Warn-level events carry the error id, code, path and description.
/// Error-level events add the cause chain.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingErrorSink;

impl TracingErrorSink {
    pub fn new() -> Self {
        Self
    }
}

impl ErrorSink for TracingErrorSink {
    fn record(&self, event: &ErrorEvent<'_>) {
        match event.severity {
            Severity::Warn => tracing::warn!(
                error_id = %event.error_id,
                code = %event.code,
                path = %event.path,
                "{} - {}",
                event.code.summary(),
                event.description
            ),
            Severity::Error => tracing::error!(
                error_id = %event.error_id,
                code = %event.code,
                path = %event.path,
                causes = ?event.causes,
                "{} - {}",
                event.code.summary(),
                event.description
            ),
        }
    }
}
