//! Application state - shared across all handlers.

use std::sync::Arc;

use payment_core::domain::NewAccount;
use payment_core::ports::{AccountRepository, PaymentRepository};
use payment_infra::{InMemoryAccountRepository, InMemoryPaymentRepository};
use rust_decimal::Decimal;

/// Shared application state.
#[derive(Clone)]
pub struct AppState {
    pub accounts: Arc<dyn AccountRepository>,
    pub payments: Arc<dyn PaymentRepository>,
}

impl AppState {
    /// Build in-memory repositories, optionally seeded with demo accounts.
    pub async fn in_memory(seed_demo_data: bool) -> Self {
        let accounts = Arc::new(InMemoryAccountRepository::new());
        let payments = Arc::new(InMemoryPaymentRepository::new(Arc::clone(&accounts)));

        if seed_demo_data {
            for (number, owner, balance) in [
                ("ACC-1001", "Ada Lovelace", Decimal::new(50_000, 2)),
                ("ACC-1002", "Alan Turing", Decimal::new(5_000, 2)),
            ] {
                let seeded = accounts
                    .create(NewAccount {
                        account_number: number.to_string(),
                        owner_name: owner.to_string(),
                        currency: "EUR".to_string(),
                        initial_balance: balance,
                    })
                    .await;
                if let Err(e) = seeded {
                    tracing::warn!("Failed to seed account {}: {}", number, e);
                }
            }
            tracing::info!("Seeded demo accounts");
        }

        tracing::info!("Application state initialized (in-memory storage)");

        Self { accounts, payments }
    }
}
