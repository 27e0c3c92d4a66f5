//! Data Transfer Objects - request/response types for the API.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Request to open an account.
///
/// Text fields default to empty so that missing values surface as
/// validation failures rather than unparsable bodies.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateAccountRequest {
    #[serde(default)]
    pub account_number: String,
    #[serde(default)]
    pub owner_name: String,
    #[serde(default)]
    pub currency: String,
    #[serde(default)]
    pub initial_balance: Option<Decimal>,
}

/// Request to take money out of an account.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DebitRequest {
    pub amount: Decimal,
}

/// Request to create a payment against an account.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreatePaymentRequest {
    pub account_id: i64,
    pub amount: Decimal,
    #[serde(default)]
    pub currency: String,
    #[serde(default)]
    pub description: Option<String>,
}

/// Request to move a payment to another lifecycle state.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UpdatePaymentStatusRequest {
    #[serde(default)]
    pub status: String,
    #[serde(default)]
    pub reason: Option<String>,
}

/// Query string for listing an account's payments.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PaymentListQuery {
    pub limit: Option<i64>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AccountResponse {
    pub id: i64,
    pub account_number: String,
    pub owner_name: String,
    pub currency: String,
    pub balance: Decimal,
    pub status: String,
    pub created_at: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PaymentResponse {
    pub reference: String,
    pub account_id: i64,
    pub amount: Decimal,
    pub currency: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub status: String,
    pub created_at: String,
    pub updated_at: String,
}
