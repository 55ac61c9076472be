//! User domain model

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value as JsonValue};

use super::wire::{deserialize_amount_or_zero, deserialize_id};

/// The authenticated customer as last reported by the server.
///
/// Profile fields the client does not model are kept in `extra` so that a
/// round-trip through storage does not drop them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct User {
    #[serde(deserialize_with = "deserialize_id")]
    pub id: String,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub phone: Option<String>,
    #[serde(default)]
    pub account_number: Option<String>,
    #[serde(default, deserialize_with = "deserialize_amount_or_zero")]
    pub balance: Decimal,
    #[serde(flatten)]
    pub extra: Map<String, JsonValue>,
}

impl User {
    pub fn new(id: impl Into<String>, balance: Decimal) -> Self {
        Self {
            id: id.into(),
            name: None,
            email: None,
            phone: None,
            account_number: None,
            balance,
            extra: Map::new(),
        }
    }

    /// Copy of this record carrying a server-reported balance
    pub fn with_balance(&self, balance: Decimal) -> Self {
        Self {
            balance,
            ..self.clone()
        }
    }

    /// Best label for display: name, then email, then id
    pub fn display_name(&self) -> &str {
        self.name
            .as_deref()
            .or(self.email.as_deref())
            .unwrap_or(&self.id)
    }
}
