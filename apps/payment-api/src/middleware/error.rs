//! Boundary failure type returned by every handler.

use actix_web::{HttpResponse, ResponseError, http::StatusCode};
use payment_core::error::RepoError;
use payment_core::{DomainError, ErrorCode, FieldViolations};

use super::translator::status_code;

/// Any failure a request handler can end with.
///
/// The response body is not built here: [`ErrorTranslation`] intercepts the
/// error and renders the envelope with the request path.
///
/// [`ErrorTranslation`]: super::translation::ErrorTranslation
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error(transparent)]
    Domain(#[from] DomainError),

    /// Parameter-level constraint failures (query or path values out of range).
    #[error("Constraint violation: {0}")]
    ConstraintViolation(FieldViolations),

    /// Request body could not be parsed.
    #[error("Malformed request body: {0}")]
    MalformedInput(String),

    #[error("Invalid value for parameter '{parameter}': {reason}")]
    TypeMismatch { parameter: String, reason: String },

    #[error(transparent)]
    Unclassified(#[from] anyhow::Error),
}

impl AppError {
    pub fn code(&self) -> ErrorCode {
        match self {
            AppError::Domain(err) => err.code(),
            AppError::ConstraintViolation(_) => ErrorCode::ConstraintViolation,
            AppError::MalformedInput(_) => ErrorCode::InvalidJson,
            AppError::TypeMismatch { .. } => ErrorCode::TypeMismatch,
            AppError::Unclassified(_) => ErrorCode::InternalServerError,
        }
    }

    /// Wrap an actix error from outside the taxonomy.
    ///
    /// The original text becomes the cause, so it is logged with the chain
    /// but never shown as the description.
    pub fn unclassified(err: &actix_web::Error) -> Self {
        let status = err.as_response_error().status_code();
        AppError::Unclassified(
            anyhow::Error::msg(err.to_string())
                .context(format!("Unhandled error response ({status})")),
        )
    }
}

impl ResponseError for AppError {
    fn status_code(&self) -> StatusCode {
        status_code(self.code().status_class())
    }

    fn error_response(&self) -> HttpResponse {
        HttpResponse::build(self.status_code()).finish()
    }
}

impl From<RepoError> for AppError {
    fn from(err: RepoError) -> Self {
        if let RepoError::Constraint { kind, message } = &err {
            let (kind, message) = (*kind, message.clone());
            return AppError::Domain(DomainError::data_integrity_caused(kind, message, err));
        }
        AppError::Unclassified(anyhow::Error::new(err).context("Storage operation failed"))
    }
}

impl From<FieldViolations> for AppError {
    fn from(violations: FieldViolations) -> Self {
        AppError::Domain(DomainError::Validation(violations))
    }
}

/// Result type alias for handlers.
pub type AppResult<T> = Result<T, AppError>;
