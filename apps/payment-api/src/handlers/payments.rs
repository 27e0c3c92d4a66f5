//! Payment handlers.

use actix_web::{HttpResponse, web};

use payment_core::domain::{NewPayment, Payment, PaymentStatus};
use payment_core::{DomainError, FieldViolations};
use payment_shared::ApiResponse;
use payment_shared::dto::{CreatePaymentRequest, PaymentResponse, UpdatePaymentStatusRequest};

use super::accounts::load_account;
use crate::middleware::AppResult;
use crate::state::AppState;

pub(crate) fn payment_response(payment: Payment) -> PaymentResponse {
    PaymentResponse {
        reference: payment.reference,
        account_id: payment.account_id,
        amount: payment.amount,
        currency: payment.currency,
        description: payment.description,
        status: payment.status.to_string(),
        created_at: payment.created_at.to_rfc3339(),
        updated_at: payment.updated_at.to_rfc3339(),
    }
}

/// POST /api/payments
pub async fn create_payment(
    state: web::Data<AppState>,
    body: web::Json<CreatePaymentRequest>,
) -> AppResult<HttpResponse> {
    let req = body.into_inner();
    let new = NewPayment {
        account_id: req.account_id,
        amount: req.amount,
        currency: req.currency.trim().to_string(),
        description: req.description,
    };
    new.validate()?;

    let account = load_account(&state, new.account_id).await?;
    if account.currency != new.currency {
        let mut violations = FieldViolations::new();
        violations.add(
            "currency",
            format!("must match account currency {}", account.currency),
        );
        return Err(DomainError::Validation(violations).into());
    }

    let payment = state.payments.save(Payment::new(new)).await?;
    tracing::info!(
        reference = %payment.reference,
        account_id = payment.account_id,
        "Payment created"
    );

    Ok(HttpResponse::Created().json(ApiResponse::ok_with_message(
        payment_response(payment),
        "Payment created",
    )))
}

/// GET /api/payments/{reference}
pub async fn get_payment(
    state: web::Data<AppState>,
    path: web::Path<String>,
) -> AppResult<HttpResponse> {
    let reference = path.into_inner();
    let payment = state
        .payments
        .find_by_reference(&reference)
        .await?
        .ok_or_else(|| DomainError::payment_not_found_by_id(&reference))?;
    Ok(HttpResponse::Ok().json(ApiResponse::ok(payment_response(payment))))
}

/// PATCH /api/payments/{reference}/status
///
/// Completing a payment debits its account; the status change is only
/// stored once the debit succeeded.
pub async fn update_status(
    state: web::Data<AppState>,
    path: web::Path<String>,
    body: web::Json<UpdatePaymentStatusRequest>,
) -> AppResult<HttpResponse> {
    let reference = path.into_inner();
    let req = body.into_inner();
    let next: PaymentStatus = req.status.parse()?;

    let mut payment = state
        .payments
        .find_by_reference(&reference)
        .await?
        .ok_or_else(|| DomainError::payment_not_found_by_id(&reference))?;
    let previous = payment.status;
    payment.transition_to(next)?;

    if next == PaymentStatus::Completed {
        let mut account = load_account(&state, payment.account_id).await?;
        account.debit(payment.amount)?;
        state.accounts.update(account).await?;
    }

    let payment = state.payments.save(payment).await?;
    tracing::info!(
        reference = %payment.reference,
        from = %previous,
        to = %payment.status,
        reason = req.reason.as_deref().unwrap_or(""),
        "Payment status changed"
    );

    Ok(HttpResponse::Ok().json(ApiResponse::ok(payment_response(payment))))
}
