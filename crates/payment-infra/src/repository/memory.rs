//! In-memory repositories - used when no database is configured.
//!
//! They enforce the same constraints a relational schema would (unique
//! account numbers, payments referencing an existing account) and report
//! violations the way a storage engine does.

use std::collections::HashMap;
use std::sync::Arc;
use std::sync::atomic::{AtomicI64, Ordering};

use async_trait::async_trait;
use tokio::sync::RwLock;

use payment_core::domain::{Account, NewAccount, Payment};
use payment_core::error::{ConstraintKind, RepoError};
use payment_core::ports::{AccountRepository, PaymentRepository};

/// Accounts keyed by id. Note: data is lost on process restart.
pub struct InMemoryAccountRepository {
    store: RwLock<HashMap<i64, Account>>,
    next_id: AtomicI64,
}

impl InMemoryAccountRepository {
    pub fn new() -> Self {
        Self {
            store: RwLock::new(HashMap::new()),
            next_id: AtomicI64::new(1),
        }
    }

    async fn exists(&self, id: i64) -> bool {
        self.store.read().await.contains_key(&id)
    }
}

impl Default for InMemoryAccountRepository {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl AccountRepository for InMemoryAccountRepository {
    async fn find_by_id(&self, id: i64) -> Result<Option<Account>, RepoError> {
        Ok(self.store.read().await.get(&id).cloned())
    }

    async fn find_by_number(&self, account_number: &str) -> Result<Option<Account>, RepoError> {
        let store = self.store.read().await;
        Ok(store
            .values()
            .find(|a| a.account_number == account_number)
            .cloned())
    }

    async fn create(&self, account: NewAccount) -> Result<Account, RepoError> {
        // Check and insert under one write lock so concurrent creates cannot both pass.
        let mut store = self.store.write().await;
        if store
            .values()
            .any(|a| a.account_number == account.account_number)
        {
            return Err(RepoError::Constraint {
                kind: ConstraintKind::Unique,
                message: "duplicate key value violates unique constraint \
                          \"accounts_account_number_key\""
                    .to_string(),
            });
        }

        let id = self.next_id.fetch_add(1, Ordering::Relaxed);
        let account = Account::open(id, account);
        store.insert(id, account.clone());
        tracing::debug!(account_id = id, "Account created");
        Ok(account)
    }

    async fn update(&self, account: Account) -> Result<Account, RepoError> {
        let mut store = self.store.write().await;
        match store.get_mut(&account.id) {
            Some(slot) => {
                *slot = account.clone();
                Ok(account)
            }
            None => Err(RepoError::Query(format!(
                "UPDATE affected 0 rows for account {}",
                account.id
            ))),
        }
    }
}

/// Payments keyed by reference, checked against an account store.
pub struct InMemoryPaymentRepository {
    store: RwLock<HashMap<String, Payment>>,
    accounts: Arc<InMemoryAccountRepository>,
}

impl InMemoryPaymentRepository {
    pub fn new(accounts: Arc<InMemoryAccountRepository>) -> Self {
        Self {
            store: RwLock::new(HashMap::new()),
            accounts,
        }
    }
}

#[async_trait]
impl PaymentRepository for InMemoryPaymentRepository {
    async fn find_by_reference(&self, reference: &str) -> Result<Option<Payment>, RepoError> {
        Ok(self.store.read().await.get(reference).cloned())
    }

    async fn find_by_account(
        &self,
        account_id: i64,
        limit: usize,
    ) -> Result<Vec<Payment>, RepoError> {
        let store = self.store.read().await;
        let mut payments: Vec<Payment> = store
            .values()
            .filter(|p| p.account_id == account_id)
            .cloned()
            .collect();
        payments.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        payments.truncate(limit);
        Ok(payments)
    }

    async fn save(&self, payment: Payment) -> Result<Payment, RepoError> {
        if !self.accounts.exists(payment.account_id).await {
            return Err(RepoError::Constraint {
                kind: ConstraintKind::ForeignKey,
                message: format!(
                    "insert or update on table \"payments\" violates foreign key constraint \
                     \"payments_account_id_fkey\" (account_id)=({})",
                    payment.account_id
                ),
            });
        }

        let mut store = self.store.write().await;
        store.insert(payment.reference.clone(), payment.clone());
        Ok(payment)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use payment_core::domain::{NewPayment, PaymentStatus};
    use rust_decimal_macros::dec;

    fn new_account(number: &str) -> NewAccount {
        NewAccount {
            account_number: number.to_string(),
            owner_name: "Grace".to_string(),
            currency: "USD".to_string(),
            initial_balance: dec!(100.00),
        }
    }

    fn new_payment(account_id: i64) -> Payment {
        Payment::new(NewPayment {
            account_id,
            amount: dec!(10.00),
            currency: "USD".to_string(),
            description: None,
        })
    }

    #[tokio::test]
    async fn test_create_and_find() {
        let repo = InMemoryAccountRepository::new();
        let created = repo.create(new_account("ACC-1")).await.unwrap();

        let by_id = repo.find_by_id(created.id).await.unwrap().unwrap();
        assert_eq!(by_id.account_number, "ACC-1");
        let by_number = repo.find_by_number("ACC-1").await.unwrap().unwrap();
        assert_eq!(by_number.id, created.id);
        assert!(repo.find_by_id(999).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_duplicate_number_is_unique_violation() {
        let repo = InMemoryAccountRepository::new();
        repo.create(new_account("ACC-1")).await.unwrap();

        match repo.create(new_account("ACC-1")).await.unwrap_err() {
            RepoError::Constraint { kind, message } => {
                assert_eq!(kind, ConstraintKind::Unique);
                assert!(message.contains("unique"));
            }
            other => panic!("unexpected {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_payment_for_unknown_account_is_foreign_key_violation() {
        let accounts = Arc::new(InMemoryAccountRepository::new());
        let payments = InMemoryPaymentRepository::new(accounts);

        match payments.save(new_payment(7)).await.unwrap_err() {
            RepoError::Constraint { kind, .. } => assert_eq!(kind, ConstraintKind::ForeignKey),
            other => panic!("unexpected {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_payments_listed_newest_first_with_limit() {
        let accounts = Arc::new(InMemoryAccountRepository::new());
        let account = accounts.create(new_account("ACC-1")).await.unwrap();
        let payments = InMemoryPaymentRepository::new(accounts);

        let mut saved = Vec::new();
        for _ in 0..3 {
            saved.push(payments.save(new_payment(account.id)).await.unwrap());
            tokio::time::sleep(std::time::Duration::from_millis(2)).await;
        }

        let listed = payments.find_by_account(account.id, 2).await.unwrap();
        assert_eq!(listed.len(), 2);
        assert_eq!(listed[0].reference, saved[2].reference);
        assert_eq!(listed[0].status, PaymentStatus::Pending);
    }
}
