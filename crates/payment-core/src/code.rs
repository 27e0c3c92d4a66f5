//! Stable error codes and the status class each one maps to.
//!
//! `ErrorCode` is the single table every failure resolves through: the wire
//! code, the status class, the top-level summary and the log severity all
//! come from here.

use std::fmt;

/// Categorical outcome of a failed request, independent of HTTP.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StatusClass {
    BadRequest,
    Unauthorized,
    Forbidden,
    NotFound,
    Conflict,
    Internal,
}

impl StatusClass {
    /// Literal HTTP status for this class.
    pub const fn http_status(self) -> u16 {
        match self {
            StatusClass::BadRequest => 400,
            StatusClass::Unauthorized => 401,
            StatusClass::Forbidden => 403,
            StatusClass::NotFound => 404,
            StatusClass::Conflict => 409,
            StatusClass::Internal => 500,
        }
    }
}

/// How loudly a failure is logged.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Severity {
    /// Expected client-side failures. Logged without a cause chain.
    Warn,
    /// Defects or unexpected system conditions. Logged with the full chain.
    Error,
}

/// Machine-readable error code surfaced to clients.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorCode {
    PaymentNotFound,
    PaymentProcessingError,
    InsufficientFunds,
    InvalidPaymentStatus,
    AccountNotFound,
    UserNotFound,
    DuplicateResource,
    ValidationError,
    ConstraintViolation,
    DataIntegrityViolation,
    AuthenticationError,
    BadCredentials,
    AccessDenied,
    InvalidJson,
    TypeMismatch,
    InternalServerError,
}

impl ErrorCode {
    pub const ALL: [ErrorCode; 16] = [
        ErrorCode::PaymentNotFound,
        ErrorCode::PaymentProcessingError,
        ErrorCode::InsufficientFunds,
        ErrorCode::InvalidPaymentStatus,
        ErrorCode::AccountNotFound,
        ErrorCode::UserNotFound,
        ErrorCode::DuplicateResource,
        ErrorCode::ValidationError,
        ErrorCode::ConstraintViolation,
        ErrorCode::DataIntegrityViolation,
        ErrorCode::AuthenticationError,
        ErrorCode::BadCredentials,
        ErrorCode::AccessDenied,
        ErrorCode::InvalidJson,
        ErrorCode::TypeMismatch,
        ErrorCode::InternalServerError,
    ];

    pub const fn as_str(self) -> &'static str {
        match self {
            ErrorCode::PaymentNotFound => "PAYMENT_NOT_FOUND",
            ErrorCode::PaymentProcessingError => "PAYMENT_PROCESSING_ERROR",
            ErrorCode::InsufficientFunds => "INSUFFICIENT_FUNDS",
            ErrorCode::InvalidPaymentStatus => "INVALID_PAYMENT_STATUS",
            ErrorCode::AccountNotFound => "ACCOUNT_NOT_FOUND",
            ErrorCode::UserNotFound => "USER_NOT_FOUND",
            ErrorCode::DuplicateResource => "DUPLICATE_RESOURCE",
            ErrorCode::ValidationError => "VALIDATION_ERROR",
            ErrorCode::ConstraintViolation => "CONSTRAINT_VIOLATION",
            ErrorCode::DataIntegrityViolation => "DATA_INTEGRITY_VIOLATION",
            ErrorCode::AuthenticationError => "AUTHENTICATION_ERROR",
            ErrorCode::BadCredentials => "BAD_CREDENTIALS",
            ErrorCode::AccessDenied => "ACCESS_DENIED",
            ErrorCode::InvalidJson => "INVALID_JSON",
            ErrorCode::TypeMismatch => "TYPE_MISMATCH",
            ErrorCode::InternalServerError => "INTERNAL_SERVER_ERROR",
        }
    }

    pub const fn status_class(self) -> StatusClass {
        match self {
            ErrorCode::PaymentNotFound | ErrorCode::AccountNotFound | ErrorCode::UserNotFound => {
                StatusClass::NotFound
            }
            ErrorCode::PaymentProcessingError
            | ErrorCode::InsufficientFunds
            | ErrorCode::InvalidPaymentStatus
            | ErrorCode::ValidationError
            | ErrorCode::ConstraintViolation
            | ErrorCode::InvalidJson
            | ErrorCode::TypeMismatch => StatusClass::BadRequest,
            ErrorCode::DuplicateResource | ErrorCode::DataIntegrityViolation => {
                StatusClass::Conflict
            }
            ErrorCode::AuthenticationError | ErrorCode::BadCredentials => {
                StatusClass::Unauthorized
            }
            ErrorCode::AccessDenied => StatusClass::Forbidden,
            ErrorCode::InternalServerError => StatusClass::Internal,
        }
    }

    /// Summary placed in the top-level `message` of a failure response.
    pub const fn summary(self) -> &'static str {
        match self {
            ErrorCode::PaymentNotFound => "Payment not found",
            ErrorCode::PaymentProcessingError => "Payment processing failed",
            ErrorCode::InsufficientFunds => "Insufficient funds",
            ErrorCode::InvalidPaymentStatus => "Invalid payment status",
            ErrorCode::AccountNotFound => "Account not found",
            ErrorCode::UserNotFound => "User not found",
            ErrorCode::DuplicateResource => "Resource already exists",
            ErrorCode::ValidationError => "Validation failed",
            ErrorCode::ConstraintViolation => "Constraint violation",
            ErrorCode::DataIntegrityViolation => "Data integrity violation",
            ErrorCode::AuthenticationError => "Authentication required",
            ErrorCode::BadCredentials => "Invalid credentials",
            ErrorCode::AccessDenied => "Access denied",
            ErrorCode::InvalidJson => "Invalid request format",
            ErrorCode::TypeMismatch => "Invalid parameter type",
            ErrorCode::InternalServerError => "Internal server error",
        }
    }

    pub const fn severity(self) -> Severity {
        match self {
            ErrorCode::PaymentProcessingError
            | ErrorCode::DataIntegrityViolation
            | ErrorCode::InternalServerError => Severity::Error,
            _ => Severity::Warn,
        }
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
