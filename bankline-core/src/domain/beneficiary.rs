//! Beneficiary domain model

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value as JsonValue};

use super::wire::deserialize_id;

/// A saved transfer recipient owned by the current user
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Beneficiary {
    #[serde(deserialize_with = "deserialize_id")]
    pub id: String,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub account_number: Option<String>,
    #[serde(default)]
    pub bank_name: Option<String>,
    #[serde(default)]
    pub nickname: Option<String>,
    /// Remaining server metadata
    #[serde(flatten)]
    pub extra: Map<String, JsonValue>,
}

impl Beneficiary {
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: Some(name.into()),
            account_number: None,
            bank_name: None,
            nickname: None,
            extra: Map::new(),
        }
    }
}

/// Fields sent when creating or editing a beneficiary
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct BeneficiaryInput {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub account_number: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bank_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub nickname: Option<String>,
}

impl BeneficiaryInput {
    /// True when no field would be sent
    pub fn is_empty(&self) -> bool {
        self.name.is_none()
            && self.account_number.is_none()
            && self.bank_name.is_none()
            && self.nickname.is_none()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_beneficiary_from_payload() {
        let b: Beneficiary = serde_json::from_str(
            r#"{"id": 3, "name": "Grace", "account_number": "0123456789", "bank_name": "First Bank", "user_id": 7}"#,
        )
        .unwrap();
        assert_eq!(b.id, "3");
        assert_eq!(b.account_number.as_deref(), Some("0123456789"));
        assert!(b.extra.contains_key("user_id"));
    }

    #[test]
    fn test_input_skips_unset_fields() {
        let input = BeneficiaryInput {
            nickname: Some("Mum".to_string()),
            ..Default::default()
        };
        assert!(!input.is_empty());
        assert_eq!(serde_json::to_string(&input).unwrap(), r#"{"nickname":"Mum"}"#);
        assert!(BeneficiaryInput::default().is_empty());
    }
}
