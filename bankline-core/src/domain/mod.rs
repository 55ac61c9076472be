//! Core domain entities
//!
//! Transient mirrors of server-owned records plus the request and response
//! shapes of the banking API. Pure data - no I/O.

mod beneficiary;
pub mod requests;
pub mod responses;
pub mod result;
mod session;
mod transaction;
mod user;
pub mod wire;

pub use beneficiary::{Beneficiary, BeneficiaryInput};
pub use session::{BalanceChanged, Session};
pub use transaction::{
    completed_total, Pagination, Transaction, TransactionQuery, TransactionStatus,
    TransactionType,
};
pub use user::User;
