//! Shared session handle

use std::sync::{Arc, RwLock, RwLockReadGuard, RwLockWriteGuard};

use rust_decimal::Decimal;

use crate::domain::result::Result;
use crate::domain::{BalanceChanged, Session, User};
use crate::ports::{BalanceListener, KeyValueStorage, TOKEN_KEY, USER_KEY};
use crate::services::{clear_persisted_session, persist_user};

/// Cloneable handle to the in-memory session and its durable mirror.
///
/// All clones see the same state. Only `token` and `user` are ever written
/// to storage.
#[derive(Clone)]
pub struct SessionContext {
    state: Arc<RwLock<Session>>,
    storage: Arc<dyn KeyValueStorage>,
}

impl std::fmt::Debug for SessionContext {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SessionContext")
            .field("authenticated", &self.is_authenticated())
            .field("user_id", &self.user_id())
            .finish()
    }
}

impl SessionContext {
    /// Empty session over `storage`; call [`restore`](Self::restore) to load
    pub fn new(storage: Arc<dyn KeyValueStorage>) -> Self {
        Self {
            state: Arc::new(RwLock::new(Session::default())),
            storage,
        }
    }

    pub fn storage(&self) -> &Arc<dyn KeyValueStorage> {
        &self.storage
    }

    // A poisoned lock still holds a consistent Session; every write replaces
    // whole fields.
    fn read(&self) -> RwLockReadGuard<'_, Session> {
        self.state.read().unwrap_or_else(|e| e.into_inner())
    }

    fn write(&self) -> RwLockWriteGuard<'_, Session> {
        self.state.write().unwrap_or_else(|e| e.into_inner())
    }

    /// Load token and user from storage. Never fails.
    ///
    /// Unreadable storage or a malformed user record leaves the
    /// corresponding field absent.
    pub fn restore(&self) {
        let token = match self.storage.get(TOKEN_KEY) {
            Ok(token) => token,
            Err(e) => {
                tracing::warn!(error = %e, "Could not read stored token");
                None
            }
        };

        let user = match self.storage.get(USER_KEY) {
            Ok(Some(raw)) => match serde_json::from_str::<User>(&raw) {
                Ok(user) => Some(user),
                Err(e) => {
                    tracing::warn!(error = %e, "Stored user record is malformed, ignoring it");
                    None
                }
            },
            Ok(None) => None,
            Err(e) => {
                tracing::warn!(error = %e, "Could not read stored user");
                None
            }
        };

        *self.write() = Session { token, user };
    }

    /// Snapshot of the current session
    pub fn snapshot(&self) -> Session {
        self.read().clone()
    }

    pub fn token(&self) -> Option<String> {
        self.read().token.clone()
    }

    pub fn user(&self) -> Option<User> {
        self.read().user.clone()
    }

    pub fn is_authenticated(&self) -> bool {
        self.read().is_authenticated()
    }

    pub fn user_id(&self) -> Option<String> {
        self.read().user_id().map(str::to_string)
    }

    /// Current user's balance, zero without a user
    pub fn balance(&self) -> Decimal {
        self.read().balance()
    }

    /// Set token and user together and persist both
    pub fn establish(&self, token: &str, user: Option<User>) -> Result<()> {
        self.storage.set(TOKEN_KEY, token)?;
        match &user {
            Some(user) => persist_user(self.storage.as_ref(), user)?,
            None => self.storage.remove(USER_KEY)?,
        }

        let mut session = self.write();
        session.token = Some(token.to_string());
        session.user = user;
        Ok(())
    }

    /// Drop token and user from memory and storage.
    ///
    /// Memory is always cleared; a storage failure is only logged.
    pub fn clear(&self) {
        *self.write() = Session::default();
        if let Err(e) = clear_persisted_session(self.storage.as_ref()) {
            tracing::warn!(error = %e, "Could not clear stored session");
        }
    }

    /// Replace the user record in memory and storage; the token is untouched
    pub fn update_user(&self, user: User) -> Result<()> {
        persist_user(self.storage.as_ref(), &user)?;
        self.write().user = Some(user);
        Ok(())
    }
}

impl BalanceListener for SessionContext {
    fn on_balance_changed(&self, event: &BalanceChanged) {
        let Some(user) = self.user() else {
            tracing::debug!("Balance change with no signed-in user, ignoring");
            return;
        };
        if let Err(e) = self.update_user(user.with_balance(event.new_balance)) {
            tracing::warn!(error = %e, "Could not persist updated balance");
        }
    }
}
