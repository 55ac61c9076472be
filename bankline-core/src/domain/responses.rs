//! Response envelopes returned by the banking API
//!
//! One type per endpoint family. Fields the server may omit are `Option`
//! or default to empty so that shape drift shows up here and not deep in a
//! store.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value as JsonValue};

use super::wire::deserialize_optional_amount;
use super::{Beneficiary, Pagination, Transaction, User};

/// Generic acknowledgement (`register`, `logout`, profile updates, PIN)
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct MessageResponse {
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub user: Option<User>,
    #[serde(flatten)]
    pub extra: Map<String, JsonValue>,
}

/// `POST /auth/login`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoginResponse {
    #[serde(default)]
    pub token: Option<String>,
    #[serde(default)]
    pub user: Option<User>,
    #[serde(default)]
    pub message: Option<String>,
}

/// `GET /user`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserResponse {
    #[serde(default)]
    pub user: Option<User>,
}

/// `GET /dashboard/{userId}`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DashboardResponse {
    #[serde(default)]
    pub user: Option<User>,
    #[serde(default, deserialize_with = "deserialize_optional_amount")]
    pub balance: Option<Decimal>,
    #[serde(default)]
    pub recent_transactions: Vec<Transaction>,
    #[serde(flatten)]
    pub extra: Map<String, JsonValue>,
}

/// `GET /beneficiaries`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BeneficiaryListResponse {
    #[serde(default)]
    pub beneficiaries: Option<Vec<Beneficiary>>,
}

/// `POST|PUT|DELETE /beneficiaries[/{id}]`
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct BeneficiaryResponse {
    #[serde(default)]
    pub beneficiary: Option<Beneficiary>,
    #[serde(default)]
    pub message: Option<String>,
}

/// `POST /transactions/deposit` and `POST /transactions/transfer`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TransactionResponse {
    #[serde(default)]
    pub transaction: Option<Transaction>,
    /// Balance after the operation, when the server reports it
    #[serde(default, deserialize_with = "deserialize_optional_amount")]
    pub new_balance: Option<Decimal>,
    #[serde(default)]
    pub message: Option<String>,
}

/// Server-side paging metadata
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct PageMeta {
    pub current_page: u64,
    pub last_page: u64,
    pub per_page: u64,
    pub total: u64,
}

impl From<PageMeta> for Pagination {
    fn from(meta: PageMeta) -> Self {
        Pagination {
            current_page: meta.current_page,
            last_page: meta.last_page,
            per_page: meta.per_page,
            total: meta.total,
        }
    }
}

/// `GET /transactions`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TransactionListResponse {
    #[serde(default)]
    pub transactions: Option<Vec<Transaction>>,
    #[serde(default)]
    pub meta: Option<PageMeta>,
}

/// `GET /transactions/{id}`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TransactionDetailResponse {
    #[serde(default)]
    pub transaction: Option<Transaction>,
}
