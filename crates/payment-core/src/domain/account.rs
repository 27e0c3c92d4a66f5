use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::error::DomainError;
use crate::validation::FieldViolations;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum AccountStatus {
    Active,
    Frozen,
    Closed,
}

impl AccountStatus {
    pub fn as_str(self) -> &'static str {
        match self {
            AccountStatus::Active => "ACTIVE",
            AccountStatus::Frozen => "FROZEN",
            AccountStatus::Closed => "CLOSED",
        }
    }
}

/// Account entity - holds a balance in a single currency.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Account {
    pub id: i64,
    pub account_number: String,
    pub owner_name: String,
    pub currency: String,
    pub balance: Decimal,
    pub status: AccountStatus,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Caller-supplied data for opening an account.
#[derive(Debug, Clone)]
pub struct NewAccount {
    pub account_number: String,
    pub owner_name: String,
    pub currency: String,
    pub initial_balance: Decimal,
}

impl NewAccount {
    /// Check every field and report all violations at once.
    pub fn validate(&self) -> Result<(), DomainError> {
        let mut violations = FieldViolations::new();
        violations
            .check(
                !self.account_number.trim().is_empty(),
                "accountNumber",
                "must not be blank",
            )
            .check(
                !self.owner_name.trim().is_empty(),
                "ownerName",
                "must not be blank",
            )
            .check(
                self.currency.len() == 3 && self.currency.chars().all(|c| c.is_ascii_uppercase()),
                "currency",
                "must be a 3-letter ISO code",
            )
            .check(
                !self.initial_balance.is_sign_negative(),
                "initialBalance",
                "cannot be negative",
            );
        violations.into_result()
    }
}

impl Account {
    /// Open an active account from validated input.
    pub fn open(id: i64, new: NewAccount) -> Self {
        let now = Utc::now();
        Self {
            id,
            account_number: new.account_number,
            owner_name: new.owner_name,
            currency: new.currency,
            balance: new.initial_balance,
            status: AccountStatus::Active,
            created_at: now,
            updated_at: now,
        }
    }

    /// Take `amount` out of the balance. Returns the new balance.
    pub fn debit(&mut self, amount: Decimal) -> Result<Decimal, DomainError> {
        self.check_operation(amount)?;
        if self.balance < amount {
            return Err(DomainError::insufficient_funds(self.balance, amount));
        }
        self.balance -= amount;
        self.updated_at = Utc::now();
        Ok(self.balance)
    }

    /// Add `amount` to the balance. Returns the new balance.
    pub fn credit(&mut self, amount: Decimal) -> Result<Decimal, DomainError> {
        self.check_operation(amount)?;
        self.balance += amount;
        self.updated_at = Utc::now();
        Ok(self.balance)
    }

    fn check_operation(&self, amount: Decimal) -> Result<(), DomainError> {
        let mut violations = FieldViolations::new();
        violations.check(
            amount > Decimal::ZERO,
            "amount",
            "must be greater than zero",
        );
        if self.status != AccountStatus::Active {
            violations.add(
                "status",
                format!("account is not active for balance operations: {}", self.status.as_str()),
            );
        }
        violations.into_result()
    }
}
