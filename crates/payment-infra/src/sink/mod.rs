//! Error sink implementations - tracing output and in-memory capture.

mod memory;
mod subscriber;

pub use memory::{MemoryErrorSink, RecordedError};
pub use subscriber::TracingErrorSink;
