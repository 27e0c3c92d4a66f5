//! Standardized API response types.

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Standard API response wrapper, used for both outcomes.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiResponse<T> {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<ErrorEnvelope>,
}

impl<T> ApiResponse<T> {
    pub fn ok(data: T) -> Self {
        Self {
            success: true,
            message: None,
            data: Some(data),
            error: None,
        }
    }

    pub fn ok_with_message(data: T, message: impl Into<String>) -> Self {
        Self {
            success: true,
            message: Some(message.into()),
            data: Some(data),
            error: None,
        }
    }

    /// Failure body: a short summary plus the envelope.
    pub fn failure(error: ErrorEnvelope, message: impl Into<String>) -> Self {
        Self {
            success: false,
            message: Some(message.into()),
            data: None,
            error: Some(error),
        }
    }
}

/// Client-facing description of one failed request.
///
/// Built once per failure and never persisted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ErrorEnvelope {
    /// Fresh per occurrence, for matching client reports to server logs.
    pub error_id: String,

    /// Stable machine-readable code, e.g. `INSUFFICIENT_FUNDS`.
    pub code: String,

    /// Display-safe explanation.
    pub message: String,

    pub timestamp: DateTime<Utc>,

    /// Path of the request being handled.
    pub path: String,

    /// Field name → message, only for validation-class failures.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<BTreeMap<String, String>>,
}

impl ErrorEnvelope {
    /// Stamp a new envelope with a fresh id and the current time.
    pub fn new(
        code: impl Into<String>,
        message: impl Into<String>,
        path: impl Into<String>,
    ) -> Self {
        Self {
            error_id: Uuid::new_v4().to_string(),
            code: code.into(),
            message: message.into(),
            timestamp: Utc::now(),
            path: path.into(),
            details: None,
        }
    }

    pub fn with_details(mut self, details: BTreeMap<String, String>) -> Self {
        self.details = Some(details);
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_failure_body_shape() {
        let envelope = ErrorEnvelope::new(
            "ACCOUNT_NOT_FOUND",
            "Account not found with ID: 42",
            "/api/accounts/42",
        );
        let body: ApiResponse<()> = ApiResponse::failure(envelope, "Account not found");
        let json = serde_json::to_value(&body).unwrap();

        assert_eq!(json["success"], false);
        assert_eq!(json["message"], "Account not found");
        assert!(json.get("data").is_none());
        let error = &json["error"];
        assert_eq!(error["code"], "ACCOUNT_NOT_FOUND");
        assert_eq!(error["path"], "/api/accounts/42");
        assert!(!error["errorId"].as_str().unwrap().is_empty());
        assert!(error["timestamp"].is_string());
        assert!(error.get("details").is_none());
    }

    #[test]
    fn test_details_are_serialized_when_present() {
        let mut details = BTreeMap::new();
        details.insert("amount".to_string(), "must be greater than zero".to_string());
        let envelope = ErrorEnvelope::new("VALIDATION_ERROR", "Invalid request parameters", "/x")
            .with_details(details);
        let json = serde_json::to_value(&envelope).unwrap();
        assert_eq!(json["details"]["amount"], "must be greater than zero");
    }

    #[test]
    fn test_each_envelope_gets_its_own_id() {
        let a = ErrorEnvelope::new("C", "m", "/p");
        let b = ErrorEnvelope::new("C", "m", "/p");
        assert_ne!(a.error_id, b.error_id);
    }

    #[test]
    fn test_ok_body_omits_error() {
        let json = serde_json::to_value(ApiResponse::ok(5)).unwrap();
        assert_eq!(json["success"], true);
        assert_eq!(json["data"], 5);
        assert!(json.get("error").is_none());
    }
}
