//! Navigation guard

use crate::domain::result::Result;
use crate::domain::User;
use crate::ports::{KeyValueStorage, TOKEN_KEY, USER_KEY};

use super::Route;

/// Guard decision for one navigation
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Navigation {
    Proceed,
    Redirect(Route),
}

/// Decide whether `target` may be entered.
///
/// - protected route without a token: go to login
/// - login or register with a token: go to the user's dashboard when the
///   stored user has an id, otherwise stay
/// - anything else: proceed
pub fn guard(target: &Route, token: Option<&str>, stored_user_id: Option<&str>) -> Navigation {
    let has_token = token.is_some_and(|t| !t.is_empty());

    if target.requires_auth() && !has_token {
        return Navigation::Redirect(Route::Login);
    }

    if target.is_guest_only() && has_token {
        if let Some(user_id) = stored_user_id.filter(|id| !id.is_empty()) {
            return Navigation::Redirect(Route::Dashboard {
                user_id: user_id.to_string(),
            });
        }
    }

    Navigation::Proceed
}

/// [`guard`] fed straight from storage.
///
/// A stored user that does not parse counts as having no id.
pub fn guard_with_storage(target: &Route, storage: &dyn KeyValueStorage) -> Result<Navigation> {
    let token = storage.get(TOKEN_KEY)?;
    let user_id = storage
        .get(USER_KEY)?
        .and_then(|raw| match serde_json::from_str::<User>(&raw) {
            Ok(user) => Some(user.id),
            Err(e) => {
                tracing::warn!(error = %e, "Stored user record is malformed, ignoring it");
                None
            }
        });
    Ok(guard(target, token.as_deref(), user_id.as_deref()))
}
