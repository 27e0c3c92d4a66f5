//! End-to-end request tests through the full middleware stack.

use std::sync::Arc;

use actix_web::dev::{Service, ServiceResponse};
use actix_web::http::{StatusCode, header::ContentType};
use actix_web::{App, HttpResponse, error, test, web};
use payment_core::{ErrorCode, Severity};
use payment_infra::MemoryErrorSink;
use serde_json::{Value, json};

use super::configure_routes;
use crate::middleware::{ErrorTranslation, ErrorTranslator, configure_extractors};
use crate::state::AppState;

/// Seeded accounts: id 1 = ACC-1001 (500.00 EUR), id 2 = ACC-1002 (50.00 EUR).
macro_rules! init_app {
    ($sink:expr) => {{
        let state = AppState::in_memory(true).await;
        let translator = Arc::new(ErrorTranslator::new(Arc::new($sink.clone())));
        test::init_service(
            App::new()
                .wrap(ErrorTranslation::new(translator))
                .app_data(web::Data::new(state))
                .configure(configure_extractors)
                .configure(configure_routes),
        )
        .await
    }};
}

fn error_of(body: &Value) -> &Value {
    assert_eq!(body["success"], json!(false));
    &body["error"]
}

#[actix_rt::test]
async fn test_health_is_untouched() {
    let sink = MemoryErrorSink::new();
    let app = init_app!(sink);

    let req = test::TestRequest::get().uri("/api/health").to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["status"], "ok");
    assert!(sink.is_empty());
}

#[actix_rt::test]
async fn test_unknown_account_is_translated_with_request_path() {
    let sink = MemoryErrorSink::new();
    let app = init_app!(sink);

    let req = test::TestRequest::get().uri("/api/accounts/999").to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);

    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["message"], "Account not found");
    let error = error_of(&body);
    assert_eq!(error["code"], "ACCOUNT_NOT_FOUND");
    assert_eq!(error["message"], "Account not found with ID: 999");
    assert_eq!(error["path"], "/api/accounts/999");
    assert!(error.get("details").is_none());

    let records = sink.records();
    assert_eq!(records.len(), 1);
    assert_eq!(records[0].code, ErrorCode::AccountNotFound);
    assert_eq!(records[0].path, "/api/accounts/999");
    assert_eq!(error["errorId"], json!(records[0].error_id));
}

#[actix_rt::test]
async fn test_non_numeric_id_is_type_mismatch() {
    let sink = MemoryErrorSink::new();
    let app = init_app!(sink);

    let req = test::TestRequest::get().uri("/api/accounts/abc").to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);

    let body: Value = test::read_body_json(resp).await;
    let error = error_of(&body);
    assert_eq!(error["code"], "TYPE_MISMATCH");
    assert_eq!(error["message"], "Invalid value for parameter 'id'");
}

#[actix_rt::test]
async fn test_malformed_body_is_invalid_json() {
    let sink = MemoryErrorSink::new();
    let app = init_app!(sink);

    let req = test::TestRequest::post()
        .uri("/api/accounts")
        .insert_header(ContentType::json())
        .set_payload("{\"accountNumber\": ")
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);

    let body: Value = test::read_body_json(resp).await;
    let error = error_of(&body);
    assert_eq!(error["code"], "INVALID_JSON");
    assert_eq!(error["message"], "Invalid JSON format");
    assert_eq!(sink.records()[0].code, ErrorCode::InvalidJson);
}

#[actix_rt::test]
async fn test_invalid_account_reports_every_field() {
    let sink = MemoryErrorSink::new();
    let app = init_app!(sink);

    let req = test::TestRequest::post()
        .uri("/api/accounts")
        .set_json(json!({
            "accountNumber": "",
            "ownerName": "Edsger",
            "currency": "eur",
            "initialBalance": "-1.00"
        }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);

    let body: Value = test::read_body_json(resp).await;
    let error = error_of(&body);
    assert_eq!(error["code"], "VALIDATION_ERROR");
    assert_eq!(error["message"], "Invalid request parameters");
    let details = error["details"].as_object().expect("details");
    assert_eq!(details.len(), 3);
    assert!(details.contains_key("accountNumber"));
    assert!(details.contains_key("currency"));
    assert!(details.contains_key("initialBalance"));
}

#[actix_rt::test]
async fn test_create_then_duplicate_account() {
    let sink = MemoryErrorSink::new();
    let app = init_app!(sink);
    let payload = json!({
        "accountNumber": "ACC-2001",
        "ownerName": "Barbara Liskov",
        "currency": "USD",
        "initialBalance": "10.00"
    });

    let req = test::TestRequest::post()
        .uri("/api/accounts")
        .set_json(&payload)
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::CREATED);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["success"], json!(true));
    assert_eq!(body["data"]["status"], "ACTIVE");
    assert!(body.get("error").is_none());

    let req = test::TestRequest::post()
        .uri("/api/accounts")
        .set_json(&payload)
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::CONFLICT);
    let body: Value = test::read_body_json(resp).await;
    let error = error_of(&body);
    assert_eq!(error["code"], "DUPLICATE_RESOURCE");
    assert_eq!(error["message"], "Account ACC-2001 already exists");
    assert_eq!(sink.len(), 1);
}

#[actix_rt::test]
async fn test_lookup_by_number() {
    let sink = MemoryErrorSink::new();
    let app = init_app!(sink);

    let req = test::TestRequest::get()
        .uri("/api/accounts/number/ACC-1001")
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);

    let req = test::TestRequest::get()
        .uri("/api/accounts/number/ACC-0000")
        .to_request();
    let resp = test::call_service(&app, req).await;
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(
        error_of(&body)["message"],
        "Account not found with account number: ACC-0000"
    );
}

#[actix_rt::test]
async fn test_overdraft_is_insufficient_funds() {
    let sink = MemoryErrorSink::new();
    let app = init_app!(sink);

    let req = test::TestRequest::post()
        .uri("/api/accounts/2/debit")
        .set_json(json!({ "amount": "80.00" }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);

    let body: Value = test::read_body_json(resp).await;
    let error = error_of(&body);
    assert_eq!(error["code"], "INSUFFICIENT_FUNDS");
    assert_eq!(
        error["message"],
        "Insufficient funds. Available: 50.00, Requested: 80.00"
    );

    let req = test::TestRequest::get().uri("/api/accounts/2").to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(body["data"]["balance"], "50.00");
}

#[actix_rt::test]
async fn test_page_size_out_of_range_is_constraint_violation() {
    let sink = MemoryErrorSink::new();
    let app = init_app!(sink);

    let req = test::TestRequest::get()
        .uri("/api/accounts/1/payments?limit=0")
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    let body: Value = test::read_body_json(resp).await;
    let error = error_of(&body);
    assert_eq!(error["code"], "CONSTRAINT_VIOLATION");
    assert_eq!(error["message"], "Data constraint violation");
    assert!(error["details"]["limit"].is_string());

    let req = test::TestRequest::get()
        .uri("/api/accounts/1/payments?limit=lots")
        .to_request();
    let resp = test::call_service(&app, req).await;
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(error_of(&body)["code"], "TYPE_MISMATCH");
    assert_eq!(
        error_of(&body)["message"],
        "Invalid value for parameter 'limit'"
    );
}

#[actix_rt::test]
async fn test_payment_lifecycle_failures() {
    let sink = MemoryErrorSink::new();
    let app = init_app!(sink);

    let create = |amount: &str| {
        test::TestRequest::post()
            .uri("/api/payments")
            .set_json(json!({ "accountId": 2, "amount": amount, "currency": "EUR" }))
            .to_request()
    };
    let set_status = |reference: &str, status: &str| {
        test::TestRequest::patch()
            .uri(&format!("/api/payments/{reference}/status"))
            .set_json(json!({ "status": status }))
            .to_request()
    };

    let body: Value = test::call_and_read_body_json(&app, create("30.00")).await;
    let first = body["data"]["reference"].as_str().expect("reference").to_string();
    for status in ["processing", "COMPLETED"] {
        let resp = test::call_service(&app, set_status(&first, status)).await;
        assert_eq!(resp.status(), StatusCode::OK);
    }

    // Completed payments cannot be reopened.
    let resp = test::call_service(&app, set_status(&first, "PENDING")).await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(error_of(&body)["code"], "INVALID_PAYMENT_STATUS");

    // Unknown status names are validation failures on `status`.
    let resp = test::call_service(&app, set_status(&first, "BOGUS")).await;
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(error_of(&body)["code"], "VALIDATION_ERROR");
    assert!(error_of(&body)["details"]["status"].is_string());

    // Remaining balance is 20.00, so completing a second 30.00 payment fails.
    let body: Value = test::call_and_read_body_json(&app, create("30.00")).await;
    let second = body["data"]["reference"].as_str().expect("reference").to_string();
    test::call_service(&app, set_status(&second, "PROCESSING")).await;
    let resp = test::call_service(&app, set_status(&second, "COMPLETED")).await;
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(error_of(&body)["code"], "INSUFFICIENT_FUNDS");

    let req = test::TestRequest::get()
        .uri(&format!("/api/payments/{second}"))
        .to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(body["data"]["status"], "PROCESSING");

    let codes: Vec<_> = sink.records().into_iter().map(|r| r.code).collect();
    assert_eq!(
        codes,
        vec![
            ErrorCode::InvalidPaymentStatus,
            ErrorCode::ValidationError,
            ErrorCode::InsufficientFunds,
        ]
    );
}

#[actix_rt::test]
async fn test_payment_against_missing_account_or_reference() {
    let sink = MemoryErrorSink::new();
    let app = init_app!(sink);

    let req = test::TestRequest::post()
        .uri("/api/payments")
        .set_json(json!({ "accountId": 42, "amount": "5.00", "currency": "EUR" }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(error_of(&body)["code"], "ACCOUNT_NOT_FOUND");

    let req = test::TestRequest::post()
        .uri("/api/payments")
        .set_json(json!({ "accountId": 1, "amount": "5.00", "currency": "USD" }))
        .to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;
    assert!(error_of(&body)["details"]["currency"].is_string());

    let req = test::TestRequest::get()
        .uri("/api/payments/PAY-MISSING")
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
    let body: Value = test::read_body_json(resp).await;
    let error = error_of(&body);
    assert_eq!(error["code"], "PAYMENT_NOT_FOUND");
    assert_eq!(error["message"], "Payment not found with ID: PAY-MISSING");
    assert_eq!(error["path"], "/api/payments/PAY-MISSING");
}

#[actix_rt::test]
async fn test_foreign_handler_error_is_unclassified() {
    let sink = MemoryErrorSink::new();
    let translator = Arc::new(ErrorTranslator::new(Arc::new(sink.clone())));
    let app = test::init_service(
        App::new().wrap(ErrorTranslation::new(translator)).route(
            "/api/upstream",
            web::get().to(|| async {
                Err::<HttpResponse, _>(error::ErrorBadGateway("db at 10.0.0.5"))
            }),
        ),
    )
    .await;

    let req = test::TestRequest::get().uri("/api/upstream").to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::INTERNAL_SERVER_ERROR);

    let bytes = test::read_body(resp).await;
    assert!(!String::from_utf8_lossy(&bytes).contains("10.0.0.5"));
    let body: Value = serde_json::from_slice(&bytes).expect("json body");
    let error = error_of(&body);
    assert_eq!(error["code"], "INTERNAL_SERVER_ERROR");
    assert_eq!(error["message"], "An unexpected error occurred");
    assert_eq!(error["path"], "/api/upstream");

    let records = sink.records();
    assert_eq!(records.len(), 1);
    assert_eq!(records[0].severity, Severity::Error);
    assert_eq!(records[0].code, ErrorCode::InternalServerError);
    assert_eq!(records[0].causes, vec!["db at 10.0.0.5"]);
}

#[actix_rt::test]
async fn test_inner_service_err_carries_translated_response() {
    let sink = MemoryErrorSink::new();
    let translator = Arc::new(ErrorTranslator::new(Arc::new(sink.clone())));
    let app = test::init_service(
        App::new()
            .wrap_fn(|_req, _srv| async {
                Err::<ServiceResponse, _>(error::ErrorServiceUnavailable(
                    "pool at 10.0.0.6 exhausted",
                ))
            })
            .wrap(ErrorTranslation::new(translator))
            .configure(configure_routes),
    )
    .await;

    let req = test::TestRequest::get().uri("/api/health").to_request();
    let err = match app.call(req).await {
        Ok(resp) => panic!("expected an error, got {}", resp.status()),
        Err(err) => err,
    };
    let resp = err.error_response();
    assert_eq!(resp.status(), StatusCode::INTERNAL_SERVER_ERROR);

    let bytes = actix_web::body::to_bytes(resp.into_body())
        .await
        .expect("body");
    assert!(!String::from_utf8_lossy(&bytes).contains("10.0.0.6"));
    let body: Value = serde_json::from_slice(&bytes).expect("json body");
    let error = error_of(&body);
    assert_eq!(error["code"], "INTERNAL_SERVER_ERROR");
    assert_eq!(error["path"], "/api/health");

    let records = sink.records();
    assert_eq!(records.len(), 1);
    assert_eq!(records[0].severity, Severity::Error);
    assert_eq!(
        records[0].description,
        "Unhandled error response (503 Service Unavailable)"
    );
    assert_eq!(records[0].causes, vec!["pool at 10.0.0.6 exhausted"]);
}
