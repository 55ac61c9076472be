//! Error taxonomy and the JSON outcome envelope

use serde::{Deserialize, Serialize};
use serde_json::Value as JsonValue;
use thiserror::Error;

/// Everything a store or service call can fail with
#[derive(Error, Debug)]
pub enum Error {
    /// The server answered with a non-success status.
    ///
    /// `payload` holds the server's structured error body when it was JSON.
    #[error("{message}")]
    Api {
        status: u16,
        message: String,
        payload: Option<JsonValue>,
    },

    #[error("Network error: {0}")]
    Transport(String),

    #[error("Storage error: {0}")]
    Storage(String),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("{0}")]
    Other(String),
}

impl Error {
    /// Build an API error from a status code and the raw response body
    pub fn api(status: u16, body: &str) -> Self {
        let payload = serde_json::from_str::<JsonValue>(body).ok();
        let message = payload
            .as_ref()
            .and_then(server_message)
            .unwrap_or_else(|| format!("Request failed with HTTP {}", status));
        Self::Api {
            status,
            message,
            payload,
        }
    }

    /// Create a transport error
    pub fn transport(msg: impl Into<String>) -> Self {
        Self::Transport(msg.into())
    }

    /// Create a storage error
    pub fn storage(msg: impl Into<String>) -> Self {
        Self::Storage(msg.into())
    }

    /// Create a not found error
    pub fn not_found(msg: impl Into<String>) -> Self {
        Self::NotFound(msg.into())
    }

    /// Create a validation error
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    /// HTTP status for server-reported errors
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Api { status, .. } => Some(*status),
            _ => None,
        }
    }

    /// Message suitable for showing next to a form.
    ///
    /// Server errors only yield a message when the payload carried one
    /// (`error` first, then `message`); callers supply their own fallback
    /// otherwise.
    pub fn user_message(&self) -> Option<String> {
        match self {
            Self::Api { payload, .. } => payload.as_ref().and_then(server_message),
            other => Some(other.to_string()),
        }
    }

    /// Per-field validation messages from a server `errors` object
    pub fn field_errors(&self) -> Vec<(String, String)> {
        let Self::Api {
            payload: Some(payload),
            ..
        } = self
        else {
            return Vec::new();
        };

        let Some(errors) = payload.get("errors").and_then(|e| e.as_object()) else {
            return Vec::new();
        };

        let mut out = Vec::new();
        for (field, messages) in errors {
            match messages {
                JsonValue::Array(items) => {
                    for item in items.iter().filter_map(|m| m.as_str()) {
                        out.push((field.clone(), item.to_string()));
                    }
                }
                JsonValue::String(s) => out.push((field.clone(), s.clone())),
                _ => {}
            }
        }
        out
    }
}

/// Pull the human-readable text out of a server error payload
fn server_message(payload: &JsonValue) -> Option<String> {
    ["error", "message"]
        .iter()
        .filter_map(|key| payload.get(*key).and_then(|v| v.as_str()))
        .map(str::trim)
        .find(|s| !s.is_empty())
        .map(str::to_string)
}

/// Core library result type
pub type Result<T> = std::result::Result<T, Error>;

/// One server-side validation message, tied to the input field it concerns
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldError {
    pub field: String,
    pub message: String,
}

/// Outcome envelope printed by `--json` commands
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OperationResult<T> {
    pub success: bool,
    pub data: Option<T>,
    pub error: Option<String>,
    /// HTTP status when the server rejected the request
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<u16>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub fields: Vec<FieldError>,
}

impl<T> OperationResult<T> {
    pub fn ok(data: T) -> Self {
        Self {
            success: true,
            data: Some(data),
            error: None,
            status: None,
            fields: Vec::new(),
        }
    }

    pub fn fail(error: impl Into<String>) -> Self {
        Self {
            success: false,
            data: None,
            error: Some(error.into()),
            status: None,
            fields: Vec::new(),
        }
    }
}

impl<T> From<Result<T>> for OperationResult<T> {
    fn from(result: Result<T>) -> Self {
        let err = match result {
            Ok(data) => return Self::ok(data),
            Err(err) => err,
        };
        Self {
            status: err.status(),
            fields: err
                .field_errors()
                .into_iter()
                .map(|(field, message)| FieldError { field, message })
                .collect(),
            ..Self::fail(err.to_string())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_api_error_prefers_error_field() {
        let err = Error::api(422, r#"{"error": "Insufficient funds", "message": "ignored"}"#);
        assert_eq!(err.status(), Some(422));
        assert_eq!(err.to_string(), "Insufficient funds");
        assert_eq!(err.user_message(), Some("Insufficient funds".to_string()));
    }

    #[test]
    fn test_api_error_falls_back_to_message_field() {
        let err = Error::api(401, r#"{"message": "Unauthenticated."}"#);
        assert_eq!(err.user_message(), Some("Unauthenticated.".to_string()));
    }

    #[test]
    fn test_api_error_without_payload_has_no_user_message() {
        let err = Error::api(500, "<html>Server Error</html>");
        assert_eq!(err.user_message(), None);
        assert_eq!(err.to_string(), "Request failed with HTTP 500");
        assert!(matches!(err, Error::Api { payload: None, .. }));
    }

    #[test]
    fn test_transport_error_user_message() {
        let err = Error::transport("connection refused");
        assert_eq!(
            err.user_message(),
            Some("Network error: connection refused".to_string())
        );
    }

    #[test]
    fn test_field_errors() {
        let err = Error::api(
            422,
            r#"{"message": "The given data was invalid.", "errors": {"email": ["The email has already been taken."]}}"#,
        );
        assert_eq!(
            err.field_errors(),
            vec![(
                "email".to_string(),
                "The email has already been taken.".to_string()
            )]
        );
    }

    #[test]
    fn test_success_envelope_omits_failure_keys() {
        let value = serde_json::to_value(OperationResult::ok("done")).unwrap();
        assert_eq!(
            value,
            serde_json::json!({"success": true, "data": "done", "error": null})
        );
    }

    #[test]
    fn test_local_failure_envelope() {
        let err: Result<i32> = Err(Error::validation("amount must be positive"));
        let result: OperationResult<i32> = err.into();
        assert!(!result.success);
        assert_eq!(
            result.error.as_deref(),
            Some("Validation error: amount must be positive")
        );
        assert_eq!(result.status, None);
        assert!(result.fields.is_empty());
    }

    #[test]
    fn test_server_failure_envelope_carries_status_and_fields() {
        let err: Result<i32> = Err(Error::api(
            422,
            r#"{"message": "Invalid", "errors": {"amount": "Too small"}}"#,
        ));
        let result: OperationResult<i32> = err.into();
        assert_eq!(result.status, Some(422));
        assert_eq!(
            result.fields,
            vec![FieldError {
                field: "amount".to_string(),
                message: "Too small".to_string(),
            }]
        );
    }
}
