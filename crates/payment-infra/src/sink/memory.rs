//! In-memory error sink - captures records for inspection in tests.

use std::sync::{Arc, Mutex, MutexGuard};

use payment_core::ports::{ErrorEvent, ErrorSink};
use payment_core::{ErrorCode, Severity};

/// Owned copy of an [`ErrorEvent`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecordedError {
    pub error_id: String,
    pub code: ErrorCode,
    pub severity: Severity,
    pub path: String,
    pub description: String,
    pub causes: Vec<String>,
}

/// Sink that keeps every record in memory.
///
/// Clones share the same buffer, so a test can hand one clone to the
/// translator and read records back through another.
#[derive(Debug, Clone, Default)]
pub struct MemoryErrorSink {
    records: Arc<Mutex<Vec<RecordedError>>>,
}

impl MemoryErrorSink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn records(&self) -> Vec<RecordedError> {
        self.lock().clone()
    }

    pub fn len(&self) -> usize {
        self.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.lock().is_empty()
    }

    fn lock(&self) -> MutexGuard<'_, Vec<RecordedError>> {
        // Records are append-only, so a poisoned buffer is still consistent.
        self.records.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

impl ErrorSink for MemoryErrorSink {
    fn record(&self, event: &ErrorEvent<'_>) {
        self.lock().push(RecordedError {
            error_id: event.error_id.to_string(),
            code: event.code,
            severity: event.severity,
            path: event.path.to_string(),
            description: event.description.to_string(),
            causes: event.causes.to_vec(),
        });
    }
}
