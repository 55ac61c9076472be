//! Transaction store - deposits, transfers and the loaded history

use std::sync::Arc;

use rust_decimal::Decimal;

use crate::domain::requests::{DepositRequest, TransferRequest};
use crate::domain::responses::TransactionResponse;
use crate::domain::result::{Error, Result};
use crate::domain::{
    completed_total, BalanceChanged, Pagination, Transaction, TransactionQuery, TransactionType,
};
use crate::ports::BalanceListener;
use crate::services::TransactionService;

use super::{ActionState, SessionContext};

/// How many transactions [`TransactionStore::recent_transactions`] shows
pub const RECENT_LIMIT: usize = 5;

/// Loaded transaction history plus deposit and transfer actions.
///
/// A confirmed deposit or transfer notifies every [`BalanceListener`] with
/// the server's new balance; the session is subscribed on construction.
pub struct TransactionStore {
    service: TransactionService,
    session: SessionContext,
    listeners: Vec<Arc<dyn BalanceListener>>,
    transactions: Vec<Transaction>,
    current: Option<Transaction>,
    pagination: Pagination,
    state: ActionState,
}

impl TransactionStore {
    pub fn new(service: TransactionService, session: SessionContext) -> Self {
        let listeners: Vec<Arc<dyn BalanceListener>> = vec![Arc::new(session.clone())];
        Self {
            service,
            session,
            listeners,
            transactions: Vec::new(),
            current: None,
            pagination: Pagination::default(),
            state: ActionState::default(),
        }
    }

    /// Register another balance listener
    pub fn subscribe(&mut self, listener: Arc<dyn BalanceListener>) {
        self.listeners.push(listener);
    }

    /// Deposit money.
    ///
    /// A 2xx answer is a success even when it omits the transaction; the
    /// caller gets the whole response.
    pub fn deposit(&mut self, request: &DepositRequest) -> Result<TransactionResponse> {
        self.state.begin();
        let result = self.service.deposit(request);
        let response = self.state.finish(result, "Deposit failed")?;
        self.apply_created(response)
    }

    pub fn transfer(&mut self, request: &TransferRequest) -> Result<TransactionResponse> {
        self.state.begin();
        let result = self.service.transfer(request);
        let response = self.state.finish(result, "Transfer failed")?;
        self.apply_created(response)
    }

    /// Publish the new balance, then prepend the created transaction if
    /// the server sent one
    fn apply_created(&mut self, response: TransactionResponse) -> Result<TransactionResponse> {
        if let Some(new_balance) = response.new_balance {
            let event = BalanceChanged { new_balance };
            for listener in &self.listeners {
                listener.on_balance_changed(&event);
            }
        }

        match &response.transaction {
            Some(transaction) => self.transactions.insert(0, transaction.clone()),
            None => tracing::debug!("Accepted without a transaction record"),
        }
        Ok(response)
    }

    /// Load one page of history.
    ///
    /// The list is replaced; pagination only when the response carries
    /// `meta`.
    pub fn fetch_transactions(&mut self, query: &TransactionQuery) -> Result<&[Transaction]> {
        self.state.begin();
        let result = self.service.get_transaction_history(query);
        let response = self.state.finish(result, "Failed to fetch transactions")?;

        self.transactions = response.transactions.unwrap_or_default();
        if let Some(meta) = response.meta {
            self.pagination = meta.into();
        }
        Ok(&self.transactions)
    }

    /// Load a single transaction into the current slot
    pub fn fetch_transaction_by_id(&mut self, id: &str) -> Result<Transaction> {
        self.state.begin();
        let result = self.service.get_transaction_by_id(id).and_then(|r| {
            r.transaction
                .ok_or_else(|| Error::not_found(format!("Transaction {}", id)))
        });
        let transaction = self.state.finish(result, "Failed to fetch transaction")?;
        self.current = Some(transaction.clone());
        Ok(transaction)
    }

    /// Empty the list and the current slot
    pub fn clear_transactions(&mut self) {
        self.transactions.clear();
        self.current = None;
        self.pagination = Pagination::default();
        self.state = ActionState::default();
    }

    pub fn transactions(&self) -> &[Transaction] {
        &self.transactions
    }

    pub fn current_transaction(&self) -> Option<&Transaction> {
        self.current.as_ref()
    }

    pub fn pagination(&self) -> &Pagination {
        &self.pagination
    }

    /// The session user's balance, zero when signed out
    pub fn balance(&self) -> Decimal {
        self.session.balance()
    }

    pub fn recent_transactions(&self) -> &[Transaction] {
        let end = self.transactions.len().min(RECENT_LIMIT);
        &self.transactions[..end]
    }

    /// Completed deposits in the loaded list
    pub fn total_deposits(&self) -> Decimal {
        completed_total(&self.transactions, TransactionType::Deposit)
    }

    /// Completed transfers in the loaded list
    pub fn total_transfers(&self) -> Decimal {
        completed_total(&self.transactions, TransactionType::Transfer)
    }

    pub fn loading(&self) -> bool {
        self.state.loading
    }

    pub fn error(&self) -> Option<&str> {
        self.state.error.as_deref()
    }
}
