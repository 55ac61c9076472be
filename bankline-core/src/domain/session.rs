//! Session domain model

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::User;

/// Authenticated identity held by the client.
///
/// Token and user are established and cleared together.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Session {
    pub token: Option<String>,
    pub user: Option<User>,
}

impl Session {
    pub fn new(token: impl Into<String>, user: User) -> Self {
        Self {
            token: Some(token.into()),
            user: Some(user),
        }
    }

    pub fn is_authenticated(&self) -> bool {
        self.token.is_some()
    }

    pub fn user_id(&self) -> Option<&str> {
        self.user.as_ref().map(|u| u.id.as_str())
    }

    /// Balance of the current user, zero when no user is loaded
    pub fn balance(&self) -> Decimal {
        self.user
            .as_ref()
            .map(|u| u.balance)
            .unwrap_or(Decimal::ZERO)
    }
}

/// Emitted after a deposit or transfer reports the new account balance
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct BalanceChanged {
    pub new_balance: Decimal,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_session() {
        let session = Session::default();
        assert!(!session.is_authenticated());
        assert_eq!(session.user_id(), None);
        assert_eq!(session.balance(), Decimal::ZERO);
    }

    #[test]
    fn test_established_session() {
        let session = Session::new("tok", User::new("7", Decimal::new(4200, 2)));
        assert!(session.is_authenticated());
        assert_eq!(session.user_id(), Some("7"));
        assert_eq!(session.balance(), Decimal::new(4200, 2));
    }
}
