//! Bankline Core - client-side state for the Bankline banking API
//!
//! The crate follows hexagonal architecture:
//!
//! - **domain**: entities and wire types (User, Beneficiary, Transaction, ...)
//! - **ports**: traits for external dependencies (KeyValueStorage, BalanceListener)
//! - **adapters**: concrete implementations (HTTP client, file and memory storage)
//! - **services**: one service per REST resource
//! - **stores**: session, beneficiary and transaction state over the services
//! - **router**: route table and auth guard

pub mod adapters;
pub mod config;
pub mod domain;
pub mod log_migrations;
pub mod ports;
pub mod router;
pub mod services;
pub mod stores;

use std::path::{Path, PathBuf};
use std::sync::Arc;

use anyhow::{Context, Result};

use adapters::file_storage::JsonFileStorage;
use adapters::http::ApiClient;
use config::Config;
use ports::KeyValueStorage;
use services::*;

// Re-export commonly used types at crate root
pub use domain::result::{Error, FieldError, OperationResult};
pub use domain::{Beneficiary, Pagination, Session, Transaction, TransactionQuery, User};
pub use router::{navigate, Navigation, Route};
pub use stores::{BeneficiaryStore, SessionContext, SessionStore, TransactionStore};

/// Main context for Bankline operations
///
/// Owns configuration, durable storage, the HTTP client, the profile
/// service and the three stores. The transaction store is wired to the
/// session so balance changes land on the signed-in user.
pub struct BanklineContext {
    pub config: Config,
    pub bankline_dir: PathBuf,
    pub storage: Arc<dyn KeyValueStorage>,
    pub client: Arc<ApiClient>,
    pub user_service: UserService,
    pub session_store: SessionStore,
    pub beneficiary_store: BeneficiaryStore,
    pub transaction_store: TransactionStore,
}

impl BanklineContext {
    /// Create a context over `bankline_dir` with `storage.json` as durable
    /// storage, and restore any saved session.
    pub fn new(bankline_dir: &Path) -> Result<Self> {
        std::fs::create_dir_all(bankline_dir)
            .with_context(|| format!("Failed to create {}", bankline_dir.display()))?;
        let config = Config::load(bankline_dir)?;
        let storage: Arc<dyn KeyValueStorage> = Arc::new(JsonFileStorage::in_dir(bankline_dir));
        Self::with_storage(bankline_dir, config, storage)
    }

    /// Create a context over caller-provided storage
    pub fn with_storage(
        bankline_dir: &Path,
        config: Config,
        storage: Arc<dyn KeyValueStorage>,
    ) -> Result<Self> {
        let client = Arc::new(
            ApiClient::new(&config, Arc::clone(&storage)).context("Failed to create API client")?,
        );

        let session = SessionContext::new(Arc::clone(&storage));
        let mut session_store = SessionStore::new(
            AuthService::new(Arc::clone(&client), Arc::clone(&storage)),
            session.clone(),
        );
        session_store.init();

        let user_service = UserService::new(Arc::clone(&client));
        let beneficiary_store = BeneficiaryStore::new(BeneficiaryService::new(Arc::clone(&client)));
        let transaction_store =
            TransactionStore::new(TransactionService::new(Arc::clone(&client)), session);

        Ok(Self {
            config,
            bankline_dir: bankline_dir.to_path_buf(),
            storage,
            client,
            user_service,
            session_store,
            beneficiary_store,
            transaction_store,
        })
    }

    pub fn session(&self) -> &SessionContext {
        self.session_store.session()
    }

    /// Sign out and drop everything loaded for the previous user.
    ///
    /// Local state is always cleared; the server's logout error, if any,
    /// is returned afterwards.
    pub fn sign_out(&mut self) -> domain::result::Result<()> {
        let result = self.session_store.logout();
        self.beneficiary_store.clear_beneficiaries();
        self.transaction_store.clear_transactions();
        result
    }

    /// Resolve a client route against the stored session
    pub fn navigate(&self, path: &str) -> domain::result::Result<router::Resolved> {
        router::navigate(path, self.storage.as_ref())
    }
}
