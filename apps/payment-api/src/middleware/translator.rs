//! Failure → response translation.
//!
//! [`ErrorTranslator::translate`] is the only place an [`ErrorEnvelope`] is
//! built. It resolves the code, status and client message from the failure's
//! variant, stamps a fresh error id, and records exactly one event on the
//! configured [`ErrorSink`].

use std::collections::BTreeMap;
use std::sync::Arc;

use actix_web::HttpResponse;
use actix_web::http::StatusCode;
use payment_core::error::ConstraintKind;
use payment_core::ports::{ErrorEvent, ErrorSink};
use payment_core::{DomainError, Severity, StatusClass};
use payment_shared::{ApiResponse, ErrorEnvelope};

use super::error::AppError;

const GENERIC_INTEGRITY_MESSAGE: &str = "Data integrity violation";

/// HTTP status for a status class.
pub fn status_code(class: StatusClass) -> StatusCode {
    StatusCode::from_u16(class.http_status()).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR)
}

/// A rendered failure: status plus body.
#[derive(Debug, Clone)]
pub struct Translation {
    pub status: StatusCode,
    pub body: ApiResponse<()>,
}

impl Translation {
    #[cfg(test)]
    pub fn envelope(&self) -> Option<&ErrorEnvelope> {
        self.body.error.as_ref()
    }

    pub fn into_response(self) -> HttpResponse {
        HttpResponse::build(self.status).json(self.body)
    }
}

/// Stateless translator shared by every worker.
#[derive(Clone)]
pub struct ErrorTranslator {
    sink: Arc<dyn ErrorSink>,
}

impl ErrorTranslator {
    pub fn new(sink: Arc<dyn ErrorSink>) -> Self {
        Self { sink }
    }

    pub fn translate(&self, failure: &AppError, path: &str) -> Translation {
        let code = failure.code();
        let severity = code.severity();
        let (message, details) = client_view(failure);

        let mut envelope = ErrorEnvelope::new(code.as_str(), message, path);
        if let Some(details) = details {
            envelope = envelope.with_details(details);
        }

        let description = failure.to_string();
        let causes = match severity {
            Severity::Error => cause_chain(failure),
            Severity::Warn => Vec::new(),
        };
        self.sink.record(&ErrorEvent {
            error_id: &envelope.error_id,
            code,
            severity,
            path,
            description: &description,
            causes: &causes,
        });

        Translation {
            status: status_code(code.status_class()),
            body: ApiResponse::failure(envelope, code.summary()),
        }
    }
}

/// Client-safe message and optional field details for a failure.
fn client_view(failure: &AppError) -> (String, Option<BTreeMap<String, String>>) {
    match failure {
        AppError::Domain(err) => match err {
            DomainError::PaymentNotFound { message, .. }
            | DomainError::AccountNotFound { message, .. }
            | DomainError::UserNotFound { message, .. }
            | DomainError::InsufficientFunds { message, .. }
            | DomainError::PaymentProcessing { message, .. } => (message.clone(), None),
            DomainError::InvalidPaymentStatus(message)
            | DomainError::DuplicateResource(message) => (message.clone(), None),
            DomainError::Authentication { .. } => ("Authentication failed".to_string(), None),
            DomainError::BadCredentials(_) => ("Invalid username or password".to_string(), None),
            DomainError::AccessDenied(_) => ("Access denied".to_string(), None),
            DomainError::Validation(violations) => (
                "Invalid request parameters".to_string(),
                Some(violations.as_map().clone()),
            ),
            DomainError::DataIntegrity { kind, message, .. } => {
                (integrity_message(*kind, message).to_string(), None)
            }
        },
        AppError::ConstraintViolation(violations) => (
            "Data constraint violation".to_string(),
            Some(violations.as_map().clone()),
        ),
        AppError::MalformedInput(_) => ("Invalid JSON format".to_string(), None),
        AppError::TypeMismatch { parameter, .. } => {
            (format!("Invalid value for parameter '{parameter}'"), None)
        }
        AppError::Unclassified(_) => ("An unexpected error occurred".to_string(), None),
    }
}

/// Message for a storage constraint failure.
///
/// A kind reported by the storage layer wins; otherwise the description is
/// sniffed, which only works for engines that word their errors that way.
fn integrity_message(kind: ConstraintKind, description: &str) -> &'static str {
    let kind = match kind {
        ConstraintKind::Unknown => ConstraintKind::from_description(description),
        known => known,
    };
    match kind {
        ConstraintKind::Unique => "A record with this information already exists",
        ConstraintKind::ForeignKey => "Referenced record does not exist",
        ConstraintKind::Unknown => GENERIC_INTEGRITY_MESSAGE,
    }
}

/// Source chain below `err`, outermost first.
fn cause_chain(err: &dyn std::error::Error) -> Vec<String> {
    let mut chain = Vec::new();
    let mut current = err.source();
    while let Some(cause) = current {
        chain.push(cause.to_string());
        current = cause.source();
    }
    chain
}
