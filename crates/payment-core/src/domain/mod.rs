//! Domain entities - the business objects that raise failures.

mod account;
mod payment;

pub use account::{Account, AccountStatus, NewAccount};
pub use payment::{NewPayment, Payment, PaymentStatus};
