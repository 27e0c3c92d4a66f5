//! # Payment Infrastructure
//!
//! Concrete implementations of the ports defined in `payment-core`.
//!
//! ## Feature Flags
//!
//! - `postgres` (default) - classification of SeaORM database errors

pub mod repository;
pub mod sink;

#[cfg(feature = "postgres")]
pub mod database;

// Re-exports
pub use repository::{InMemoryAccountRepository, InMemoryPaymentRepository};
pub use sink::{MemoryErrorSink, RecordedError, TracingErrorSink};

#[cfg(feature = "postgres")]
pub use database::map_db_err;
