//! Service layer - one service per REST resource
//!
//! Services are thin: they build the request, call the [`ApiClient`] and
//! hand back the typed response. State lives in the stores.
//!
//! [`ApiClient`]: crate::adapters::http::ApiClient

mod auth;
mod beneficiary;
pub mod logging;
mod transaction;
mod user;

pub(crate) use auth::{clear_persisted_session, persist_user};

pub use auth::AuthService;
pub use beneficiary::BeneficiaryService;
pub use logging::{EntryPoint, LogEntry, LogEvent, LogFilter, LoggingService};
pub use transaction::TransactionService;
pub use user::UserService;
