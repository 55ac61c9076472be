//! Cross-store notifications

use crate::domain::BalanceChanged;

/// Receives balance updates reported by money-moving operations.
///
/// The session is the one production listener: it owns the user record and
/// applies the new balance to it.
pub trait BalanceListener: Send + Sync {
    fn on_balance_changed(&self, event: &BalanceChanged);
}
