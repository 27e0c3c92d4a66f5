//! # Payment API Server
//!
//! Actix-web entry point. Every failed request leaves through the
//! [`ErrorTranslation`] middleware, which renders the error envelope and
//! logs the failure once.

use std::sync::Arc;

use actix_web::{App, HttpServer, web};
use payment_infra::TracingErrorSink;
use tracing_actix_web::TracingLogger;

mod config;
mod handlers;
mod middleware;
mod observability;
mod state;
mod telemetry;

use config::AppConfig;
use middleware::{ErrorTranslation, ErrorTranslator, configure_extractors};
use state::AppState;

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    dotenvy::dotenv().ok();

    let config = AppConfig::from_env();
    telemetry::init_telemetry(&config.telemetry);

    tracing::info!(
        "Starting Payment API Server on {}:{}",
        config.host,
        config.port
    );

    let state = AppState::in_memory(config.seed_demo_data).await;
    let translator = Arc::new(ErrorTranslator::new(Arc::new(TracingErrorSink::new())));

    HttpServer::new(move || {
        App::new()
            .wrap(ErrorTranslation::new(Arc::clone(&translator)))
            .wrap(TracingLogger::default())
            .app_data(web::Data::new(state.clone()))
            .configure(configure_extractors)
            .configure(handlers::configure_routes)
    })
    .bind((config.host.as_str(), config.port))?
    .run()
    .await
}
