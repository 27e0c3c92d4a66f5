//! Domain-level error types.

use std::fmt;

use rust_decimal::Decimal;
use thiserror::Error;

use crate::code::ErrorCode;
use crate::validation::FieldViolations;

/// Boxed underlying failure kept for diagnostics only.
pub type BoxError = Box<dyn std::error::Error + Send + Sync + 'static>;

/// How an account was looked up.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AccountLookup {
    Id(i64),
    Number(String),
}

/// How a user was looked up.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UserLookup {
    Id(i64),
    Username(String),
}

/// Which storage constraint a write tripped over.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConstraintKind {
    Unique,
    ForeignKey,
    /// The storage layer could not say; see [`ConstraintKind::from_description`].
    Unknown,
}

impl ConstraintKind {
    /// Best-effort guess from a storage engine's error text.
    ///
    /// Only meaningful for engines whose messages mention "unique" or
    /// "foreign key"; anything else stays `Unknown`.
    pub fn from_description(description: &str) -> Self {
        let lowered = description.to_ascii_lowercase();
        if lowered.contains("unique") {
            ConstraintKind::Unique
        } else if lowered.contains("foreign key") {
            ConstraintKind::ForeignKey
        } else {
            ConstraintKind::Unknown
        }
    }
}

/// Domain errors - business failures raised while handling a request.
///
/// Every variant maps to exactly one [`ErrorCode`]. The `Display` text is
/// the message; any `source` is for logs and never reaches a client.
#[derive(Debug, Error)]
pub enum DomainError {
    #[error("{message}")]
    PaymentNotFound {
        payment_id: Option<String>,
        message: String,
    },

    #[error("{message}")]
    AccountNotFound {
        lookup: Option<AccountLookup>,
        message: String,
    },

    #[error("{message}")]
    UserNotFound {
        lookup: Option<UserLookup>,
        message: String,
    },

    #[error("{message}")]
    InsufficientFunds {
        available: Option<Decimal>,
        requested: Option<Decimal>,
        message: String,
    },

    #[error("{0}")]
    InvalidPaymentStatus(String),

    #[error("{message}")]
    PaymentProcessing {
        message: String,
        source: Option<BoxError>,
    },

    #[error("{0}")]
    DuplicateResource(String),

    #[error("{message}")]
    Authentication {
        message: String,
        source: Option<BoxError>,
    },

    #[error("{0}")]
    BadCredentials(String),

    #[error("{0}")]
    AccessDenied(String),

    #[error("Validation failed: {0}")]
    Validation(FieldViolations),

    #[error("{message}")]
    DataIntegrity {
        kind: ConstraintKind,
        message: String,
        source: Option<BoxError>,
    },
}

impl DomainError {
    pub fn payment_not_found(message: impl Into<String>) -> Self {
        Self::PaymentNotFound {
            payment_id: None,
            message: message.into(),
        }
    }

    pub fn payment_not_found_by_id(payment_id: impl fmt::Display) -> Self {
        let payment_id = payment_id.to_string();
        Self::PaymentNotFound {
            message: format!("Payment not found with ID: {payment_id}"),
            payment_id: Some(payment_id),
        }
    }

    pub fn account_not_found(message: impl Into<String>) -> Self {
        Self::AccountNotFound {
            lookup: None,
            message: message.into(),
        }
    }

    pub fn account_not_found_by_id(account_id: i64) -> Self {
        Self::AccountNotFound {
            lookup: Some(AccountLookup::Id(account_id)),
            message: format!("Account not found with ID: {account_id}"),
        }
    }

    pub fn account_not_found_by_number(account_number: impl Into<String>) -> Self {
        let account_number = account_number.into();
        Self::AccountNotFound {
            message: format!("Account not found with account number: {account_number}"),
            lookup: Some(AccountLookup::Number(account_number)),
        }
    }

    pub fn user_not_found(message: impl Into<String>) -> Self {
        Self::UserNotFound {
            lookup: None,
            message: message.into(),
        }
    }

    pub fn user_not_found_by_id(user_id: i64) -> Self {
        Self::UserNotFound {
            lookup: Some(UserLookup::Id(user_id)),
            message: format!("User not found with ID: {user_id}"),
        }
    }

    pub fn user_not_found_by_username(username: impl Into<String>) -> Self {
        let username = username.into();
        Self::UserNotFound {
            message: format!("User not found with username: {username}"),
            lookup: Some(UserLookup::Username(username)),
        }
    }

    /// Debit of `requested` against an `available` balance that cannot cover it.
    pub fn insufficient_funds(available: Decimal, requested: Decimal) -> Self {
        Self::InsufficientFunds {
            message: format!("Insufficient funds. Available: {available}, Requested: {requested}"),
            available: Some(available),
            requested: Some(requested),
        }
    }

    pub fn insufficient_funds_message(message: impl Into<String>) -> Self {
        Self::InsufficientFunds {
            available: None,
            requested: None,
            message: message.into(),
        }
    }

    pub fn invalid_payment_status(message: impl Into<String>) -> Self {
        Self::InvalidPaymentStatus(message.into())
    }

    pub fn payment_processing(message: impl Into<String>) -> Self {
        Self::PaymentProcessing {
            message: message.into(),
            source: None,
        }
    }

    pub fn payment_processing_caused(
        message: impl Into<String>,
        cause: impl Into<BoxError>,
    ) -> Self {
        Self::PaymentProcessing {
            message: message.into(),
            source: Some(cause.into()),
        }
    }

    pub fn duplicate_resource(message: impl Into<String>) -> Self {
        Self::DuplicateResource(message.into())
    }

    pub fn authentication(message: impl Into<String>) -> Self {
        Self::Authentication {
            message: message.into(),
            source: None,
        }
    }

    pub fn authentication_caused(
        message: impl Into<String>,
        cause: impl Into<BoxError>,
    ) -> Self {
        Self::Authentication {
            message: message.into(),
            source: Some(cause.into()),
        }
    }

    pub fn bad_credentials(message: impl Into<String>) -> Self {
        Self::BadCredentials(message.into())
    }

    pub fn access_denied(message: impl Into<String>) -> Self {
        Self::AccessDenied(message.into())
    }

    pub fn data_integrity(kind: ConstraintKind, message: impl Into<String>) -> Self {
        Self::DataIntegrity {
            kind,
            message: message.into(),
            source: None,
        }
    }

    /// Integrity failure keeping the storage error for the logs.
    pub fn data_integrity_caused(
        kind: ConstraintKind,
        message: impl Into<String>,
        cause: impl Into<BoxError>,
    ) -> Self {
        Self::DataIntegrity {
            kind,
            message: message.into(),
            source: Some(cause.into()),
        }
    }

    /// The stable code this failure is reported under.
    pub fn code(&self) -> ErrorCode {
        match self {
            DomainError::PaymentNotFound { .. } => ErrorCode::PaymentNotFound,
            DomainError::AccountNotFound { .. } => ErrorCode::AccountNotFound,
            DomainError::UserNotFound { .. } => ErrorCode::UserNotFound,
            DomainError::InsufficientFunds { .. } => ErrorCode::InsufficientFunds,
            DomainError::InvalidPaymentStatus(_) => ErrorCode::InvalidPaymentStatus,
            DomainError::PaymentProcessing { .. } => ErrorCode::PaymentProcessingError,
            DomainError::DuplicateResource(_) => ErrorCode::DuplicateResource,
            DomainError::Authentication { .. } => ErrorCode::AuthenticationError,
            DomainError::BadCredentials(_) => ErrorCode::BadCredentials,
            DomainError::AccessDenied(_) => ErrorCode::AccessDenied,
            DomainError::Validation(_) => ErrorCode::ValidationError,
            DomainError::DataIntegrity { .. } => ErrorCode::DataIntegrityViolation,
        }
    }
}

impl From<FieldViolations> for DomainError {
    fn from(violations: FieldViolations) -> Self {
        DomainError::Validation(violations)
    }
}

/// Repository-level errors.
#[derive(Debug, Error)]
pub enum RepoError {
    #[error("Database connection failed: {0}")]
    Connection(String),

    #[error("Query execution failed: {0}")]
    Query(String),

    #[error("Constraint violation: {message}")]
    Constraint {
        kind: ConstraintKind,
        message: String,
    },
}
