//! Account handlers.

use actix_web::{HttpResponse, web};
use rust_decimal::Decimal;

use payment_core::domain::{Account, NewAccount};
use payment_core::{DomainError, FieldViolations};
use payment_shared::ApiResponse;
use payment_shared::dto::{AccountResponse, CreateAccountRequest, DebitRequest, PaymentListQuery};

use super::payments::payment_response;
use crate::middleware::{AppError, AppResult};
use crate::state::AppState;

const DEFAULT_PAGE_SIZE: i64 = 20;
const MAX_PAGE_SIZE: i64 = 100;

pub(crate) fn account_response(account: Account) -> AccountResponse {
    AccountResponse {
        id: account.id,
        account_number: account.account_number,
        owner_name: account.owner_name,
        currency: account.currency,
        balance: account.balance,
        status: account.status.as_str().to_string(),
        created_at: account.created_at.to_rfc3339(),
    }
}

pub(crate) async fn load_account(state: &AppState, id: i64) -> AppResult<Account> {
    state
        .accounts
        .find_by_id(id)
        .await?
        .ok_or_else(|| DomainError::account_not_found_by_id(id).into())
}

/// POST /api/accounts
pub async fn create_account(
    state: web::Data<AppState>,
    body: web::Json<CreateAccountRequest>,
) -> AppResult<HttpResponse> {
    let req = body.into_inner();
    let new = NewAccount {
        account_number: req.account_number.trim().to_string(),
        owner_name: req.owner_name.trim().to_string(),
        currency: req.currency.trim().to_string(),
        initial_balance: req.initial_balance.unwrap_or(Decimal::ZERO),
    };
    new.validate()?;

    if state
        .accounts
        .find_by_number(&new.account_number)
        .await?
        .is_some()
    {
        return Err(DomainError::duplicate_resource(format!(
            "Account {} already exists",
            new.account_number
        ))
        .into());
    }

    // A concurrent create can still lose the race; storage reports it as an integrity violation.
    let account = state.accounts.create(new).await?;
    tracing::info!(account_id = account.id, "Account opened");

    Ok(HttpResponse::Created().json(ApiResponse::ok_with_message(
        account_response(account),
        "Account created",
    )))
}

/// GET /api/accounts/{id}
pub async fn get_account(
    state: web::Data<AppState>,
    path: web::Path<i64>,
) -> AppResult<HttpResponse> {
    let account = load_account(&state, path.into_inner()).await?;
    Ok(HttpResponse::Ok().json(ApiResponse::ok(account_response(account))))
}

/// GET /api/accounts/number/{account_number}
pub async fn get_account_by_number(
    state: web::Data<AppState>,
    path: web::Path<String>,
) -> AppResult<HttpResponse> {
    let account_number = path.into_inner();
    let account = state
        .accounts
        .find_by_number(&account_number)
        .await?
        .ok_or_else(|| DomainError::account_not_found_by_number(account_number))?;
    Ok(HttpResponse::Ok().json(ApiResponse::ok(account_response(account))))
}

/// POST /api/accounts/{id}/debit
pub async fn debit(
    state: web::Data<AppState>,
    path: web::Path<i64>,
    body: web::Json<DebitRequest>,
) -> AppResult<HttpResponse> {
    let mut account = load_account(&state, path.into_inner()).await?;
    let amount = body.into_inner().amount;

    account.debit(amount)?;
    let account = state.accounts.update(account).await?;
    tracing::info!(account_id = account.id, %amount, "Account debited");

    Ok(HttpResponse::Ok().json(ApiResponse::ok_with_message(
        account_response(account),
        "Debit applied",
    )))
}

/// GET /api/accounts/{id}/payments?limit=
pub async fn list_payments(
    state: web::Data<AppState>,
    path: web::Path<i64>,
    query: web::Query<PaymentListQuery>,
) -> AppResult<HttpResponse> {
    let limit = query.limit.unwrap_or(DEFAULT_PAGE_SIZE);
    if !(1..=MAX_PAGE_SIZE).contains(&limit) {
        let mut violations = FieldViolations::new();
        violations.add("limit", format!("must be between 1 and {MAX_PAGE_SIZE}"));
        return Err(AppError::ConstraintViolation(violations));
    }

    let account = load_account(&state, path.into_inner()).await?;
    let payments = state
        .payments
        .find_by_account(account.id, limit as usize)
        .await?;

    let data: Vec<_> = payments.into_iter().map(payment_response).collect();
    Ok(HttpResponse::Ok().json(ApiResponse::ok(data)))
}
