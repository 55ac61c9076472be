//! Auth service - registration, login, logout, current user

use std::sync::Arc;

use crate::adapters::http::ApiClient;
use crate::domain::requests::{Credentials, RegisterRequest};
use crate::domain::responses::{LoginResponse, MessageResponse, UserResponse};
use crate::domain::result::Result;
use crate::domain::User;
use crate::ports::{KeyValueStorage, TOKEN_KEY, USER_KEY};

/// Write the user record to storage
pub(crate) fn persist_user(storage: &dyn KeyValueStorage, user: &User) -> Result<()> {
    let serialized = serde_json::to_string(user)?;
    storage.set(USER_KEY, &serialized)
}

/// Remove token and user from storage.
///
/// Both removals are attempted even if the first fails.
pub(crate) fn clear_persisted_session(storage: &dyn KeyValueStorage) -> Result<()> {
    let token = storage.remove(TOKEN_KEY);
    let user = storage.remove(USER_KEY);
    token.and(user)
}

/// Authentication endpoints
pub struct AuthService {
    client: Arc<ApiClient>,
    storage: Arc<dyn KeyValueStorage>,
}

impl AuthService {
    pub fn new(client: Arc<ApiClient>, storage: Arc<dyn KeyValueStorage>) -> Self {
        Self { client, storage }
    }

    /// Create an account. Does not sign the user in.
    pub fn register(&self, request: &RegisterRequest) -> Result<MessageResponse> {
        self.client.post("/auth/register", request)
    }

    /// Exchange credentials for a token; persists token and user on success
    pub fn login(&self, credentials: &Credentials) -> Result<LoginResponse> {
        let response: LoginResponse = self.client.post("/auth/login", credentials)?;

        if let Some(token) = &response.token {
            self.storage.set(TOKEN_KEY, token)?;
            if let Some(user) = &response.user {
                persist_user(self.storage.as_ref(), user)?;
            }
        }

        Ok(response)
    }

    /// Tell the server the token is done with.
    ///
    /// Stored credentials are removed whether or not the call succeeds; the
    /// server error, if any, is still returned.
    pub fn logout(&self) -> Result<MessageResponse> {
        let result = self.client.post_empty("/auth/logout");
        let cleared = clear_persisted_session(self.storage.as_ref());
        let response = result?;
        cleared?;
        Ok(response)
    }

    /// `GET /user`; refreshes the stored user record
    pub fn get_current_user(&self) -> Result<UserResponse> {
        let response: UserResponse = self.client.get("/user")?;
        if let Some(user) = &response.user {
            persist_user(self.storage.as_ref(), user)?;
        }
        Ok(response)
    }
}
