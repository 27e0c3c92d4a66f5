//! Repository ports for accounts and payments.

use async_trait::async_trait;

use crate::domain::{Account, NewAccount, Payment};
use crate::error::RepoError;

#[async_trait]
pub trait AccountRepository: Send + Sync {
    async fn find_by_id(&self, id: i64) -> Result<Option<Account>, RepoError>;

    async fn find_by_number(&self, account_number: &str) -> Result<Option<Account>, RepoError>;

    /// Insert a new account. Fails with a unique constraint on a taken number.
    async fn create(&self, account: NewAccount) -> Result<Account, RepoError>;

    async fn update(&self, account: Account) -> Result<Account, RepoError>;
}

#[async_trait]
pub trait PaymentRepository: Send + Sync {
    async fn find_by_reference(&self, reference: &str) -> Result<Option<Payment>, RepoError>;

    /// Newest first, at most `limit` entries.
    async fn find_by_account(&self, account_id: i64, limit: usize)
    -> Result<Vec<Payment>, RepoError>;

    /// Insert or replace. Fails with a foreign key constraint when the account is unknown.
    async fn save(&self, payment: Payment) -> Result<Payment, RepoError>;
}
