use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::DomainError;
use crate::validation::FieldViolations;

/// Lifecycle state of a payment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum PaymentStatus {
    Pending,
    Processing,
    Completed,
    Failed,
    Cancelled,
    Refunded,
}

impl PaymentStatus {
    pub const ALL: [PaymentStatus; 6] = [
        PaymentStatus::Pending,
        PaymentStatus::Processing,
        PaymentStatus::Completed,
        PaymentStatus::Failed,
        PaymentStatus::Cancelled,
        PaymentStatus::Refunded,
    ];

    pub const fn as_str(self) -> &'static str {
        match self {
            PaymentStatus::Pending => "PENDING",
            PaymentStatus::Processing => "PROCESSING",
            PaymentStatus::Completed => "COMPLETED",
            PaymentStatus::Failed => "FAILED",
            PaymentStatus::Cancelled => "CANCELLED",
            PaymentStatus::Refunded => "REFUNDED",
        }
    }

    /// Whether the lifecycle allows moving from `self` to `next`.
    pub fn can_transition_to(self, next: PaymentStatus) -> bool {
        use PaymentStatus::*;
        matches!(
            (self, next),
            (Pending, Processing)
                | (Pending, Cancelled)
                | (Processing, Completed)
                | (Processing, Failed)
                | (Processing, Cancelled)
                | (Completed, Refunded)
        )
    }

    pub fn is_terminal(self) -> bool {
        matches!(
            self,
            PaymentStatus::Failed | PaymentStatus::Cancelled | PaymentStatus::Refunded
        )
    }
}

impl fmt::Display for PaymentStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for PaymentStatus {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim();
        PaymentStatus::ALL
            .into_iter()
            .find(|status| status.as_str().eq_ignore_ascii_case(wanted))
            .ok_or_else(|| {
                let allowed: Vec<_> = PaymentStatus::ALL.iter().map(|s| s.as_str()).collect();
                let mut violations = FieldViolations::new();
                violations.add("status", format!("must be one of {}", allowed.join(", ")));
                DomainError::Validation(violations)
            })
    }
}

/// Payment entity - a pending or settled movement against one account.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Payment {
    pub reference: String,
    pub account_id: i64,
    pub amount: Decimal,
    pub currency: String,
    pub description: Option<String>,
    pub status: PaymentStatus,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Caller-supplied data for creating a payment.
#[derive(Debug, Clone)]
pub struct NewPayment {
    pub account_id: i64,
    pub amount: Decimal,
    pub currency: String,
    pub description: Option<String>,
}

impl NewPayment {
    pub fn validate(&self) -> Result<(), DomainError> {
        let mut violations = FieldViolations::new();
        violations
            .check(self.account_id > 0, "accountId", "must be a positive id")
            .check(
                self.amount > Decimal::ZERO,
                "amount",
                "must be greater than zero",
            )
            .check(
                self.currency.len() == 3 && self.currency.chars().all(|c| c.is_ascii_uppercase()),
                "currency",
                "must be a 3-letter ISO code",
            );
        if let Some(description) = &self.description {
            violations.check(
                description.chars().count() <= 255,
                "description",
                "must be at most 255 characters",
            );
        }
        violations.into_result()
    }
}

impl Payment {
    /// Create a pending payment with a fresh reference.
    pub fn new(new: NewPayment) -> Self {
        let now = Utc::now();
        Self {
            reference: format!("PAY-{}", Uuid::new_v4().simple()).to_uppercase(),
            account_id: new.account_id,
            amount: new.amount,
            currency: new.currency,
            description: new.description,
            status: PaymentStatus::Pending,
            created_at: now,
            updated_at: now,
        }
    }

    /// Move to `next`, rejecting transitions the lifecycle forbids.
    pub fn transition_to(&mut self, next: PaymentStatus) -> Result<(), DomainError> {
        if !self.status.can_transition_to(next) {
            return Err(DomainError::invalid_payment_status(format!(
                "Payment {} cannot move from {} to {}",
                self.reference, self.status, next
            )));
        }
        self.status = next;
        self.updated_at = Utc::now();
        Ok(())
    }
}
