//! HTTP handlers and route configuration.

mod accounts;
mod health;
mod payments;

use actix_web::web;

/// Configure all application routes.
pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api")
            .route("/health", web::get().to(health::health_check))
            .service(
                web::scope("/accounts")
                    .route("", web::post().to(accounts::create_account))
                    .route(
                        "/number/{account_number}",
                        web::get().to(accounts::get_account_by_number),
                    )
                    .route("/{id}", web::get().to(accounts::get_account))
                    .route("/{id}/debit", web::post().to(accounts::debit))
                    .route("/{id}/payments", web::get().to(accounts::list_payments)),
            )
            .service(
                web::scope("/payments")
                    .route("", web::post().to(payments::create_payment))
                    .route("/{reference}", web::get().to(payments::get_payment))
                    .route(
                        "/{reference}/status",
                        web::patch().to(payments::update_status),
                    ),
            ),
    );
}

#[cfg(test)]
mod tests;
