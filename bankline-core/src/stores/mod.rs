//! Stores - client-side state over the services
//!
//! Each store owns its slice of state, a `loading` flag and the last error
//! message. Mutating actions take `&mut self` and run to completion on the
//! calling thread. The session is shared through [`SessionContext`].

mod auth;
mod beneficiary;
mod session;
mod transaction;

pub use auth::SessionStore;
pub use beneficiary::BeneficiaryStore;
pub use session::SessionContext;
pub use transaction::TransactionStore;

use crate::domain::result::{Error, Result};

/// `loading` / `error` pair every store carries
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub(crate) struct ActionState {
    pub loading: bool,
    pub error: Option<String>,
}

impl ActionState {
    /// Start an action: set `loading` and drop the previous error
    pub fn begin(&mut self) {
        self.loading = true;
        self.error = None;
    }

    /// End an action, recording a display message when it failed.
    ///
    /// The message is the server's `error`/`message` text when present,
    /// otherwise `fallback`.
    pub fn finish<T>(&mut self, result: Result<T>, fallback: &str) -> Result<T> {
        self.loading = false;
        if let Err(e) = &result {
            self.error = Some(display_message(e, fallback));
        }
        result
    }
}

fn display_message(error: &Error, fallback: &str) -> String {
    match error {
        Error::Api { .. } => error.user_message().unwrap_or_else(|| fallback.to_string()),
        _ => error
            .user_message()
            .filter(|m| !m.trim().is_empty())
            .unwrap_or_else(|| fallback.to_string()),
    }
}
