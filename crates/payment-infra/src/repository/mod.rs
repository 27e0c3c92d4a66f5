//! Repository implementations - in-memory stores for accounts and payments.

mod memory;

pub use memory::{InMemoryAccountRepository, InMemoryPaymentRepository};
