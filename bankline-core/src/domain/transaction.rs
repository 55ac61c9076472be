//! Transaction domain model

use std::collections::BTreeMap;
use std::fmt;

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value as JsonValue};

use super::wire::{
    deserialize_amount, deserialize_id, deserialize_or_default, deserialize_timestamp,
};

/// Kind of money movement
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TransactionType {
    Deposit,
    Transfer,
    /// Unrecognized or missing
    #[default]
    #[serde(other)]
    Other,
}

impl fmt::Display for TransactionType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            TransactionType::Deposit => "deposit",
            TransactionType::Transfer => "transfer",
            TransactionType::Other => "other",
        };
        f.write_str(s)
    }
}

/// Processing state reported by the server
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TransactionStatus {
    Completed,
    Pending,
    Failed,
    /// Unrecognized or missing; never counted as completed
    #[default]
    #[serde(other)]
    Other,
}

impl fmt::Display for TransactionStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            TransactionStatus::Completed => "completed",
            TransactionStatus::Pending => "pending",
            TransactionStatus::Failed => "failed",
            TransactionStatus::Other => "other",
        };
        f.write_str(s)
    }
}

/// A single deposit or transfer as reported by the server
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Transaction {
    #[serde(deserialize_with = "deserialize_id")]
    pub id: String,
    #[serde(rename = "type", default, deserialize_with = "deserialize_or_default")]
    pub kind: TransactionType,
    /// Serialized as a decimal string
    #[serde(deserialize_with = "deserialize_amount")]
    pub amount: Decimal,
    #[serde(default, deserialize_with = "deserialize_or_default")]
    pub status: TransactionStatus,
    #[serde(default)]
    pub reference: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default, deserialize_with = "deserialize_timestamp")]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(flatten)]
    pub extra: Map<String, JsonValue>,
}

impl Transaction {
    pub fn new(
        id: impl Into<String>,
        kind: TransactionType,
        amount: Decimal,
        status: TransactionStatus,
    ) -> Self {
        Self {
            id: id.into(),
            kind,
            amount,
            status,
            reference: None,
            description: None,
            created_at: None,
            extra: Map::new(),
        }
    }

    pub fn is_completed(&self) -> bool {
        self.status == TransactionStatus::Completed
    }
}

/// Sum of completed transactions of one kind.
///
/// Only covers what is passed in; it is a preview over loaded data, not a
/// server-side aggregate.
pub fn completed_total<'a>(
    transactions: impl IntoIterator<Item = &'a Transaction>,
    kind: TransactionType,
) -> Decimal {
    transactions
        .into_iter()
        .filter(|t| t.kind == kind && t.is_completed())
        .map(|t| t.amount)
        .sum()
}

/// Listing metadata for the transaction history
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Pagination {
    pub current_page: u64,
    pub last_page: u64,
    pub per_page: u64,
    pub total: u64,
}

impl Default for Pagination {
    fn default() -> Self {
        Self {
            current_page: 1,
            last_page: 1,
            per_page: 15,
            total: 0,
        }
    }
}

impl Pagination {
    pub fn has_next(&self) -> bool {
        self.current_page < self.last_page
    }
}

/// Query parameters for the history listing.
///
/// Filtering and paging happen on the server; parameters are passed through
/// as given.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TransactionQuery {
    params: BTreeMap<String, String>,
}

impl TransactionQuery {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn page(self, page: u64) -> Self {
        self.param("page", page.to_string())
    }

    pub fn per_page(self, per_page: u64) -> Self {
        self.param("per_page", per_page.to_string())
    }

    pub fn kind(self, kind: TransactionType) -> Self {
        self.param("type", kind.to_string())
    }

    pub fn status(self, status: TransactionStatus) -> Self {
        self.param("status", status.to_string())
    }

    /// Any other server-understood parameter
    pub fn param(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.params.insert(key.into(), value.into());
        self
    }

    pub fn is_empty(&self) -> bool {
        self.params.is_empty()
    }

    pub fn pairs(&self) -> Vec<(String, String)> {
        self.params
            .iter()
            .map(|(k, v)| (k.clone(), v.clone()))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tx(id: &str, kind: TransactionType, cents: i64, status: TransactionStatus) -> Transaction {
        Transaction::new(id, kind, Decimal::new(cents, 2), status)
    }

    #[test]
    fn test_transaction_from_payload() {
        let t: Transaction = serde_json::from_str(
            r#"{"id": 11, "type": "deposit", "amount": "250.00", "status": "completed", "created_at": "2025-01-15T10:30:00Z", "channel": "card"}"#,
        )
        .unwrap();
        assert_eq!(t.id, "11");
        assert_eq!(t.kind, TransactionType::Deposit);
        assert_eq!(t.amount, Decimal::new(25000, 2));
        assert!(t.is_completed());
        assert!(t.created_at.is_some());
        assert!(t.extra.contains_key("channel"));
    }

    #[test]
    fn test_unknown_type_and_status() {
        let t: Transaction = serde_json::from_str(
            r#"{"id": "x", "type": "withdrawal", "amount": 5, "status": "reversed"}"#,
        )
        .unwrap();
        assert_eq!(t.kind, TransactionType::Other);
        assert_eq!(t.status, TransactionStatus::Other);
    }

    #[test]
    fn test_missing_or_null_type_and_status() {
        let t: Transaction = serde_json::from_str(r#"{"id": 1, "amount": "5.00"}"#).unwrap();
        assert_eq!(t.kind, TransactionType::Other);
        assert_eq!(t.status, TransactionStatus::Other);
        assert!(!t.is_completed());

        let t: Transaction = serde_json::from_str(
            r#"{"id": 2, "type": null, "amount": "5.00", "status": null}"#,
        )
        .unwrap();
        assert_eq!(t.kind, TransactionType::Other);
        assert_eq!(t.status, TransactionStatus::Other);
    }

    #[test]
    fn test_amount_serializes_as_string() {
        let t = tx("1", TransactionType::Transfer, 1050, TransactionStatus::Pending);
        let json = serde_json::to_value(&t).unwrap();
        assert_eq!(json["amount"], JsonValue::from("10.50"));
        assert_eq!(json["type"], JsonValue::from("transfer"));
    }

    #[test]
    fn test_completed_total_ignores_pending() {
        let list = vec![
            tx("1", TransactionType::Deposit, 10000, TransactionStatus::Completed),
            tx("2", TransactionType::Deposit, 5000, TransactionStatus::Pending),
            tx("3", TransactionType::Transfer, 2500, TransactionStatus::Completed),
        ];
        assert_eq!(
            completed_total(&list, TransactionType::Deposit),
            Decimal::new(10000, 2)
        );
        assert_eq!(
            completed_total(&list, TransactionType::Transfer),
            Decimal::new(2500, 2)
        );
        assert_eq!(
            completed_total(&Vec::<Transaction>::new(), TransactionType::Deposit),
            Decimal::ZERO
        );
    }

    #[test]
    fn test_query_pairs_are_sorted_and_overridable() {
        let q = TransactionQuery::new()
            .page(2)
            .kind(TransactionType::Deposit)
            .param("page", "3");
        assert_eq!(
            q.pairs(),
            vec![
                ("page".to_string(), "3".to_string()),
                ("type".to_string(), "deposit".to_string()),
            ]
        );
        assert!(TransactionQuery::new().is_empty());
    }

    #[test]
    fn test_pagination_default() {
        let p = Pagination::default();
        assert_eq!(p.per_page, 15);
        assert!(!p.has_next());
    }
}
