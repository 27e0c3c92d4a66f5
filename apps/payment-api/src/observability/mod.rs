//! Observability module - alerting on severe failures.

mod alert;

pub use alert::AlertLayer;
