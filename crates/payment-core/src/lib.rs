//! # Payment Core
//!
//! The domain layer of the payment backend.
//! This crate holds the failure taxonomy, the error-code table and the ports
//! that infrastructure implements. It has no web or database dependencies.

pub mod code;
pub mod domain;
pub mod error;
pub mod ports;
pub mod validation;

pub use code::{ErrorCode, Severity, StatusClass};
pub use error::{DomainError, RepoError};
pub use validation::FieldViolations;
