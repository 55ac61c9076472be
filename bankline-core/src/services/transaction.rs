//! Transaction service - deposits, transfers, history

use std::sync::Arc;

use crate::adapters::http::ApiClient;
use crate::domain::requests::{DepositRequest, TransferRequest};
use crate::domain::responses::{
    TransactionDetailResponse, TransactionListResponse, TransactionResponse,
};
use crate::domain::result::Result;
use crate::domain::TransactionQuery;

/// Endpoints under `/transactions`
pub struct TransactionService {
    client: Arc<ApiClient>,
}

impl TransactionService {
    pub fn new(client: Arc<ApiClient>) -> Self {
        Self { client }
    }

    pub fn deposit(&self, request: &DepositRequest) -> Result<TransactionResponse> {
        self.client.post("/transactions/deposit", request)
    }

    pub fn transfer(&self, request: &TransferRequest) -> Result<TransactionResponse> {
        self.client.post("/transactions/transfer", request)
    }

    /// One page of history; the query is forwarded untouched
    pub fn get_transaction_history(
        &self,
        query: &TransactionQuery,
    ) -> Result<TransactionListResponse> {
        self.client.get_with_query("/transactions", &query.pairs())
    }

    pub fn get_transaction_by_id(&self, id: &str) -> Result<TransactionDetailResponse> {
        self.client.get(&format!("/transactions/{}", id))
    }
}
