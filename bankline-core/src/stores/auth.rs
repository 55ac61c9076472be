//! Session store - sign-up, sign-in, sign-out

use crate::domain::requests::{Credentials, RegisterRequest};
use crate::domain::responses::MessageResponse;
use crate::domain::result::{Error, Result};
use crate::domain::User;
use crate::services::AuthService;

use super::{ActionState, SessionContext};

/// Authentication state and actions
pub struct SessionStore {
    auth: AuthService,
    session: SessionContext,
    state: ActionState,
}

impl SessionStore {
    pub fn new(auth: AuthService, session: SessionContext) -> Self {
        Self {
            auth,
            session,
            state: ActionState::default(),
        }
    }

    /// Restore the session from storage. Never fails.
    pub fn init(&mut self) {
        self.session.restore();
    }

    pub fn session(&self) -> &SessionContext {
        &self.session
    }

    /// Create an account. Session state is left alone.
    pub fn register(&mut self, request: &RegisterRequest) -> Result<MessageResponse> {
        self.state.begin();
        let result = self.auth.register(request);
        self.state.finish(result, "Registration failed")
    }

    /// Sign in and persist token and user
    pub fn login(&mut self, credentials: &Credentials) -> Result<User> {
        self.state.begin();
        let result = self.login_inner(credentials);
        self.state.finish(result, "Login failed")
    }

    fn login_inner(&mut self, credentials: &Credentials) -> Result<User> {
        let response = self.auth.login(credentials)?;
        let token = response
            .token
            .ok_or_else(|| Error::validation("Login response did not include a token"))?;
        let Some(user) = response.user else {
            // Token and user are only ever stored together
            self.session.clear();
            return Err(Error::validation("Login response did not include a user"));
        };

        self.session.establish(&token, Some(user.clone()))?;
        tracing::debug!(user_id = %user.id, "Signed in");
        Ok(user)
    }

    /// Sign out.
    ///
    /// Local state and storage are cleared whatever the server says. A
    /// failed server call is still returned after cleanup.
    pub fn logout(&mut self) -> Result<()> {
        self.state.begin();
        let result = self.auth.logout();
        self.session.clear();

        if let Err(e) = &result {
            tracing::warn!(error = %e, "Server logout failed, local session cleared anyway");
        }
        self.state.finish(result.map(|_| ()), "Logout failed")
    }

    /// Refresh the user record from the server; the token is kept
    pub fn fetch_current_user(&mut self) -> Result<User> {
        self.state.begin();
        let result = self.fetch_current_user_inner();
        self.state.finish(result, "Failed to fetch user")
    }

    fn fetch_current_user_inner(&mut self) -> Result<User> {
        let user = self
            .auth
            .get_current_user()?
            .user
            .ok_or_else(|| Error::not_found("Server returned no user"))?;
        self.session.update_user(user.clone())?;
        Ok(user)
    }

    /// Replace the user record locally and in storage
    pub fn update_user(&mut self, user: User) -> Result<()> {
        self.session.update_user(user)
    }

    pub fn is_authenticated(&self) -> bool {
        self.session.is_authenticated()
    }

    pub fn current_user(&self) -> Option<User> {
        self.session.user()
    }

    pub fn token(&self) -> Option<String> {
        self.session.token()
    }

    pub fn loading(&self) -> bool {
        self.state.loading
    }

    pub fn error(&self) -> Option<&str> {
        self.state.error.as_deref()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    use rust_decimal::Decimal;
    use serde_json::json;

    use crate::adapters::http::ApiClient;
    use crate::adapters::memory_storage::MemoryStorage;
    use crate::adapters::mock_server::{MockBankServer, MockRoute};
    use crate::ports::{KeyValueStorage, TOKEN_KEY, USER_KEY};

    fn store(server: &MockBankServer, storage: Arc<MemoryStorage>) -> SessionStore {
        let client = Arc::new(
            ApiClient::new_with_base_url(&server.base_url(), 5, storage.clone()).unwrap(),
        );
        let session = SessionContext::new(storage.clone());
        let mut store = SessionStore::new(AuthService::new(client, storage), session);
        store.init();
        store
    }

    fn login_route() -> MockRoute {
        MockRoute::json(
            "POST",
            "/auth/login",
            200,
            json!({"token": "tok-9", "user": {"id": 7, "name": "Ada", "balance": "100.00"}}),
        )
    }

    #[test]
    fn test_login_then_logout() {
        let server = MockBankServer::start(vec![
            login_route(),
            MockRoute::json("POST", "/auth/logout", 200, json!({"message": "Logged out"})),
        ])
        .unwrap();
        let storage = Arc::new(MemoryStorage::new());
        let mut store = store(&server, storage.clone());

        let user = store.login(&Credentials::new("ada@example.com", "pw")).unwrap();
        assert_eq!(user.id, "7");
        assert!(store.is_authenticated());
        assert_eq!(store.token().as_deref(), Some("tok-9"));
        assert!(!store.loading());

        store.logout().unwrap();
        assert!(!store.is_authenticated());
        assert!(store.current_user().is_none());
        assert_eq!(storage.get(TOKEN_KEY).unwrap(), None);
        assert_eq!(storage.get(USER_KEY).unwrap(), None);
    }

    #[test]
    fn test_logout_clears_locally_when_server_fails() {
        let server = MockBankServer::start(vec![
            login_route(),
            MockRoute::json("POST", "/auth/logout", 500, json!({"message": "Server down"})),
        ])
        .unwrap();
        let storage = Arc::new(MemoryStorage::new());
        let mut store = store(&server, storage.clone());
        store.login(&Credentials::new("ada@example.com", "pw")).unwrap();

        let err = store.logout().unwrap_err();
        assert_eq!(err.status(), Some(500));
        assert_eq!(store.error(), Some("Server down"));
        assert!(!store.is_authenticated());
        assert!(storage.is_empty());
    }

    #[test]
    fn test_logout_without_session_still_notifies_server() {
        let server = MockBankServer::start(vec![MockRoute::json(
            "POST",
            "/auth/logout",
            200,
            json!({"message": "Logged out"}),
        )])
        .unwrap();
        let storage = Arc::new(MemoryStorage::new());
        let mut store = store(&server, storage.clone());
        assert!(!store.is_authenticated());

        store.logout().unwrap();
        let sent = server.requests_to("POST", "/auth/logout");
        assert_eq!(sent.len(), 1);
        assert_eq!(sent[0].authorization, None);
        assert!(storage.is_empty());
    }

    #[test]
    fn test_logout_clears_locally_when_endpoint_missing() {
        let server = MockBankServer::start(vec![login_route()]).unwrap();
        let storage = Arc::new(MemoryStorage::new());
        let mut store = store(&server, storage.clone());
        store.login(&Credentials::new("ada@example.com", "pw")).unwrap();

        // No logout route: the mock answers 404
        assert!(store.logout().is_err());
        assert!(!store.is_authenticated());
        assert!(storage.is_empty());
    }

    #[test]
    fn test_failed_login_records_message() {
        let server = MockBankServer::start(vec![MockRoute::json(
            "POST",
            "/auth/login",
            401,
            json!({"error": "Invalid credentials"}),
        )])
        .unwrap();
        let storage = Arc::new(MemoryStorage::new());
        let mut store = store(&server, storage.clone());

        assert!(store.login(&Credentials::new("a@b.c", "bad")).is_err());
        assert_eq!(store.error(), Some("Invalid credentials"));
        assert!(!store.is_authenticated());
        assert!(!store.loading());
        assert!(storage.is_empty());
    }

    #[test]
    fn test_login_without_token_fails() {
        let server = MockBankServer::start(vec![MockRoute::json(
            "POST",
            "/auth/login",
            200,
            json!({"message": "Check your email"}),
        )])
        .unwrap();
        let mut store = store(&server, Arc::new(MemoryStorage::new()));

        let err = store.login(&Credentials::new("a@b.c", "pw")).unwrap_err();
        assert!(matches!(err, Error::Validation(_)));
        assert!(!store.is_authenticated());
    }

    #[test]
    fn test_register_does_not_sign_in() {
        let server = MockBankServer::start(vec![MockRoute::json(
            "POST",
            "/auth/register",
            201,
            json!({"message": "Registered", "user": {"id": 8}}),
        )])
        .unwrap();
        let storage = Arc::new(MemoryStorage::new());
        let mut store = store(&server, storage.clone());

        let response = store
            .register(&RegisterRequest {
                name: "Ada".to_string(),
                email: "ada@example.com".to_string(),
                password: "pw".to_string(),
                password_confirmation: "pw".to_string(),
                phone: None,
            })
            .unwrap();
        assert_eq!(response.message.as_deref(), Some("Registered"));
        assert!(!store.is_authenticated());
        assert!(storage.is_empty());
    }

    #[test]
    fn test_register_validation_error_without_message_uses_fallback() {
        let server = MockBankServer::start(vec![MockRoute::json(
            "POST",
            "/auth/register",
            422,
            json!({"errors": {"email": ["The email has already been taken."]}}),
        )])
        .unwrap();
        let mut store = store(&server, Arc::new(MemoryStorage::new()));

        let err = store
            .register(&RegisterRequest {
                name: "Ada".to_string(),
                email: "ada@example.com".to_string(),
                password: "pw".to_string(),
                password_confirmation: "pw".to_string(),
                phone: None,
            })
            .unwrap_err();
        assert_eq!(store.error(), Some("Registration failed"));
        assert_eq!(
            err.field_errors(),
            vec![("email".to_string(), "The email has already been taken.".to_string())]
        );
    }

    #[test]
    fn test_fetch_current_user_keeps_token() {
        let server = MockBankServer::start(vec![MockRoute::json(
            "GET",
            "/user",
            200,
            json!({"user": {"id": 7, "balance": "42.00"}}),
        )])
        .unwrap();
        let storage = Arc::new(MemoryStorage::with_entries([
            ("token", "tok"),
            ("user", r#"{"id": 7, "balance": "1.00"}"#),
        ]));
        let mut store = store(&server, storage.clone());

        let user = store.fetch_current_user().unwrap();
        assert_eq!(user.balance, Decimal::new(4200, 2));
        assert_eq!(store.token().as_deref(), Some("tok"));
        assert_eq!(store.current_user().unwrap().balance, Decimal::new(4200, 2));

        let sent = server.requests_to("GET", "/user");
        assert_eq!(sent[0].authorization.as_deref(), Some("Bearer tok"));
    }

    #[test]
    fn test_fetch_current_user_failure_uses_fallback() {
        let server = MockBankServer::start(vec![MockRoute::raw("GET", "/user", 502, "")]).unwrap();
        let mut store = store(&server, Arc::new(MemoryStorage::new()));
        assert!(store.fetch_current_user().is_err());
        assert_eq!(store.error(), Some("Failed to fetch user"));
    }

    #[test]
    fn test_update_user_persists() {
        let server = MockBankServer::start(Vec::new()).unwrap();
        let storage = Arc::new(MemoryStorage::new());
        let mut store = store(&server, storage.clone());

        store.update_user(User::new("5", Decimal::TEN)).unwrap();
        assert_eq!(store.current_user().unwrap().id, "5");
        assert!(storage.get(USER_KEY).unwrap().is_some());
        // No token was set
        assert!(!store.is_authenticated());
    }
}
