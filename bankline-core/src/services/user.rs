//! User service - profile, PIN, next of kin, dashboard

use std::path::Path;
use std::sync::Arc;

use crate::adapters::http::ApiClient;
use crate::domain::requests::{NextOfKinRequest, ProfileUpdate, TransactionPinRequest};
use crate::domain::responses::{DashboardResponse, MessageResponse, UserResponse};
use crate::domain::result::{Error, Result};

/// Multipart field name the server expects for the picture
const PROFILE_PICTURE_FIELD: &str = "profile_picture";

/// Profile endpoints under `/user` plus the dashboard
pub struct UserService {
    client: Arc<ApiClient>,
}

impl UserService {
    pub fn new(client: Arc<ApiClient>) -> Self {
        Self { client }
    }

    pub fn get_profile(&self) -> Result<UserResponse> {
        self.client.get("/user")
    }

    pub fn update_profile(&self, update: &ProfileUpdate) -> Result<MessageResponse> {
        self.client.put("/user/profile", update)
    }

    pub fn upload_profile_picture(&self, file: &Path) -> Result<MessageResponse> {
        if !file.is_file() {
            return Err(Error::validation(format!(
                "Profile picture not found: {}",
                file.display()
            )));
        }
        self.client
            .post_file("/user/profile-picture", PROFILE_PICTURE_FIELD, file)
    }

    pub fn create_transaction_pin(
        &self,
        request: &TransactionPinRequest,
    ) -> Result<MessageResponse> {
        self.client.post("/user/transaction-pin", request)
    }

    pub fn update_transaction_pin(
        &self,
        request: &TransactionPinRequest,
    ) -> Result<MessageResponse> {
        self.client.put("/user/transaction-pin", request)
    }

    /// Add or replace next-of-kin details
    pub fn add_next_of_kin(&self, request: &NextOfKinRequest) -> Result<MessageResponse> {
        self.client.post("/user/next-of-kin", request)
    }

    pub fn get_dashboard(&self, user_id: &str) -> Result<DashboardResponse> {
        self.client.get(&format!("/dashboard/{}", user_id))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::memory_storage::MemoryStorage;
    use crate::adapters::mock_server::{MockBankServer, MockRoute};
    use rust_decimal::Decimal;
    use serde_json::json;

    fn service(server: &MockBankServer) -> UserService {
        let storage = Arc::new(MemoryStorage::new());
        let client =
            Arc::new(ApiClient::new_with_base_url(&server.base_url(), 5, storage).unwrap());
        UserService::new(client)
    }

    #[test]
    fn test_update_profile_sends_only_set_fields() {
        let server = MockBankServer::start(vec![MockRoute::json(
            "PUT",
            "/user/profile",
            200,
            json!({"message": "Profile updated", "user": {"id": 7, "name": "Ada L."}}),
        )])
        .unwrap();
        let users = service(&server);

        let response = users
            .update_profile(&ProfileUpdate {
                name: Some("Ada L.".to_string()),
                ..Default::default()
            })
            .unwrap();
        assert_eq!(response.user.unwrap().name.as_deref(), Some("Ada L."));
        assert_eq!(
            server.requests_to("PUT", "/user/profile")[0].json(),
            json!({"name": "Ada L."})
        );
    }

    #[test]
    fn test_pin_create_and_update_use_different_methods() {
        let server = MockBankServer::start(vec![
            MockRoute::json("POST", "/user/transaction-pin", 201, json!({"message": "created"})),
            MockRoute::json("PUT", "/user/transaction-pin", 200, json!({"message": "updated"})),
        ])
        .unwrap();
        let users = service(&server);
        let request = TransactionPinRequest {
            current_pin: None,
            pin: "1234".to_string(),
            pin_confirmation: "1234".to_string(),
        };

        assert_eq!(
            users.create_transaction_pin(&request).unwrap().message.as_deref(),
            Some("created")
        );
        assert_eq!(
            users.update_transaction_pin(&request).unwrap().message.as_deref(),
            Some("updated")
        );
    }

    #[test]
    fn test_next_of_kin() {
        let server = MockBankServer::start(vec![MockRoute::json(
            "POST",
            "/user/next-of-kin",
            200,
            json!({"message": "saved"}),
        )])
        .unwrap();
        let users = service(&server);
        users
            .add_next_of_kin(&NextOfKinRequest {
                name: "Grace".to_string(),
                relationship: "Sister".to_string(),
                phone: "555-0100".to_string(),
                email: None,
                address: None,
            })
            .unwrap();
        let sent = server.requests_to("POST", "/user/next-of-kin")[0].json();
        assert_eq!(sent["relationship"], "Sister");
        assert!(sent.get("email").is_none());
    }

    #[test]
    fn test_dashboard_path_uses_user_id() {
        let server = MockBankServer::start(vec![MockRoute::json(
            "GET",
            "/dashboard/7",
            200,
            json!({"balance": "320.00", "recent_transactions": [], "total_beneficiaries": 2}),
        )])
        .unwrap();
        let dashboard = service(&server).get_dashboard("7").unwrap();
        assert_eq!(dashboard.balance, Some(Decimal::new(32000, 2)));
        assert!(dashboard.extra.contains_key("total_beneficiaries"));
    }

    #[test]
    fn test_upload_profile_picture_is_multipart() {
        let server = MockBankServer::start(vec![MockRoute::json(
            "POST",
            "/user/profile-picture",
            200,
            json!({"message": "uploaded"}),
        )])
        .unwrap();
        let dir = tempfile::tempdir().unwrap();
        let picture = dir.path().join("me.png");
        std::fs::write(&picture, b"\x89PNG fake").unwrap();

        service(&server).upload_profile_picture(&picture).unwrap();

        let sent = &server.requests_to("POST", "/user/profile-picture")[0];
        assert!(sent
            .content_type
            .as_deref()
            .unwrap_or_default()
            .starts_with("multipart/form-data"));
        let body = String::from_utf8_lossy(&sent.body);
        assert!(body.contains("name=\"profile_picture\""));
    }

    #[test]
    fn test_upload_missing_file_is_rejected_locally() {
        let server = MockBankServer::start(Vec::new()).unwrap();
        let err = service(&server)
            .upload_profile_picture(Path::new("/nonexistent/me.png"))
            .unwrap_err();
        assert!(matches!(err, Error::Validation(_)));
        assert!(server.requests().is_empty());
    }
}
