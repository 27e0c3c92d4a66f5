//! Ports - trait definitions for external dependencies.
//! These are the "interfaces" that infrastructure must implement.

mod error_sink;
mod repository;

pub use error_sink::{ErrorEvent, ErrorSink};
pub use repository::{AccountRepository, PaymentRepository};
