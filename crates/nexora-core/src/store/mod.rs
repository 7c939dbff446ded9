//! Persistence gateway
//!
//! Uniform data access for accounts, transactions and bank cards, with two
//! interchangeable backends behind one contract:
//!
//! - `Store` trait: defines the gateway operations
//! - `StoreClient` enum: concrete wrapper providing Clone + compile-time dispatch
//! - Backend implementations: `RemoteStore` (REST API), `LocalStore` (demo mode)
//!
//! # Usage
//!
//! ```rust,ignore
//! // Pick the backend once from configuration
//! let store = StoreClient::from_config(&GatewayConfig::from_env())?;
//!
//! let account = store.login("asha@nexora.dev", "secret").await?;
//! let ledger = store.list_transactions(&account).await?;
//! ```
//!
//! # Error policy
//!
//! Expected business conditions come back as dedicated error variants
//! (`DuplicateEmail`, `InvalidCredentials`, `Validation`); transport and
//! storage failures as `Transport`/`Http`/`Io`. `current_session` cannot
//! fail. `list_transactions` degrades to an empty list on transport failure
//! so a flaky network never blanks the ledger view.

pub mod kv;
mod local;
mod remote;


pub use local::LocalStore;
pub use remote::RemoteStore;

use async_trait::async_trait;

use crate::config::GatewayConfig;
use crate::error::Result;
use crate::models::{
    Account, BankCard, NewAccount, NewBankCard, NewTransaction, Transaction, TransactionPatch,
};

/// Trait defining the persistence gateway contract
///
/// Both backends satisfy the identical contract so callers need no
/// mode-specific branching.
#[async_trait]
pub trait Store: Send + Sync {
    /// Register a new account and establish a session for it
    async fn register(&self, account: NewAccount) -> Result<Account>;

    /// Sign in; establishes a session on success
    async fn login(&self, email: &str, password: &str) -> Result<Account>;

    /// Clear the session unconditionally; always succeeds
    async fn logout(&self);

    /// Last persisted session snapshot, if any
    fn current_session(&self) -> Option<Account>;

    /// Full ledger, newest occurrence date first.
    ///
    /// The viewer is accepted for interface symmetry only: the reference
    /// behavior is a shared team ledger that returns all records regardless
    /// of the requesting identity.
    async fn list_transactions(&self, viewer: &Account) -> Result<Vec<Transaction>>;

    /// Validate and persist a new transaction
    async fn create_transaction(&self, tx: NewTransaction) -> Result<()>;

    /// Partially update a transaction; a missing id is a silent no-op
    async fn update_transaction(&self, id: &str, patch: TransactionPatch) -> Result<()>;

    /// Delete a transaction; deleting an absent id is idempotent
    async fn delete_transaction(&self, id: &str) -> Result<()>;

    /// Delete several transactions. Non-atomic: a partial failure leaves
    /// earlier deletions committed.
    async fn bulk_delete(&self, ids: &[String]) -> Result<()>;

    /// Re-categorize several transactions. Non-atomic, same as `bulk_delete`.
    async fn bulk_set_category(&self, ids: &[String], category: &str) -> Result<()>;

    /// List stored bank cards
    async fn list_bank_cards(&self) -> Result<Vec<BankCard>>;

    /// Create (no id) or update (id present) a bank card
    async fn upsert_bank_card(&self, card: NewBankCard, id: Option<&str>) -> Result<()>;

    /// Delete a bank card; absent ids are a no-op
    async fn delete_bank_card(&self, id: &str) -> Result<()>;

    /// Team roster; credential fields are stripped from every record
    async fn list_accounts(&self) -> Result<Vec<Account>>;
}

/// Concrete store client enum
///
/// Provides Clone and compile-time dispatch without Box<dyn> overhead.
/// Both variants implement the same `Store` operations.
#[derive(Clone)]
pub enum StoreClient {
    /// REST API backend (bearer-token authenticated)
    Remote(RemoteStore),
    /// Local key-value backend (offline/demo mode)
    Local(LocalStore),
}

impl StoreClient {
    /// Select the backend from configuration.
    ///
    /// A configured API URL selects the remote backend; its absence is the
    /// sole trigger for demo mode. The choice is fixed for the process
    /// lifetime.
    pub fn from_config(config: &GatewayConfig) -> Result<Self> {
        match &config.api_url {
            Some(url) => Ok(StoreClient::Remote(RemoteStore::new(url, &config.data_dir)?)),
            None => Ok(StoreClient::Local(LocalStore::open(&config.data_dir)?)),
        }
    }

    /// Create a remote backend directly
    pub fn remote(base_url: &str, data_dir: &std::path::Path) -> Result<Self> {
        Ok(StoreClient::Remote(RemoteStore::new(base_url, data_dir)?))
    }

    /// Create a local backend directly
    pub fn local(data_dir: &std::path::Path) -> Result<Self> {
        Ok(StoreClient::Local(LocalStore::open(data_dir)?))
    }

    /// True when operating out of local storage
    pub fn is_offline(&self) -> bool {
        matches!(self, StoreClient::Local(_))
    }
}

// Implement Store for StoreClient by delegating to the inner backend
#[async_trait]
impl Store for StoreClient {
    async fn register(&self, account: NewAccount) -> Result<Account> {
        match self {
            StoreClient::Remote(s) => s.register(account).await,
            StoreClient::Local(s) => s.register(account).await,
        }
    }

    async fn login(&self, email: &str, password: &str) -> Result<Account> {
        match self {
            StoreClient::Remote(s) => s.login(email, password).await,
            StoreClient::Local(s) => s.login(email, password).await,
        }
    }

    async fn logout(&self) {
        match self {
            StoreClient::Remote(s) => s.logout().await,
            StoreClient::Local(s) => s.logout().await,
        }
    }

    fn current_session(&self) -> Option<Account> {
        match self {
            StoreClient::Remote(s) => s.current_session(),
            StoreClient::Local(s) => s.current_session(),
        }
    }

    async fn list_transactions(&self, viewer: &Account) -> Result<Vec<Transaction>> {
        match self {
            StoreClient::Remote(s) => s.list_transactions(viewer).await,
            StoreClient::Local(s) => s.list_transactions(viewer).await,
        }
    }

    async fn create_transaction(&self, tx: NewTransaction) -> Result<()> {
        match self {
            StoreClient::Remote(s) => s.create_transaction(tx).await,
            StoreClient::Local(s) => s.create_transaction(tx).await,
        }
    }

    async fn update_transaction(&self, id: &str, patch: TransactionPatch) -> Result<()> {
        match self {
            StoreClient::Remote(s) => s.update_transaction(id, patch).await,
            StoreClient::Local(s) => s.update_transaction(id, patch).await,
        }
    }

    async fn delete_transaction(&self, id: &str) -> Result<()> {
        match self {
            StoreClient::Remote(s) => s.delete_transaction(id).await,
            StoreClient::Local(s) => s.delete_transaction(id).await,
        }
    }

    async fn bulk_delete(&self, ids: &[String]) -> Result<()> {
        match self {
            StoreClient::Remote(s) => s.bulk_delete(ids).await,
            StoreClient::Local(s) => s.bulk_delete(ids).await,
        }
    }

    async fn bulk_set_category(&self, ids: &[String], category: &str) -> Result<()> {
        match self {
            StoreClient::Remote(s) => s.bulk_set_category(ids, category).await,
            StoreClient::Local(s) => s.bulk_set_category(ids, category).await,
        }
    }

    async fn list_bank_cards(&self) -> Result<Vec<BankCard>> {
        match self {
            StoreClient::Remote(s) => s.list_bank_cards().await,
            StoreClient::Local(s) => s.list_bank_cards().await,
        }
    }

    async fn upsert_bank_card(&self, card: NewBankCard, id: Option<&str>) -> Result<()> {
        match self {
            StoreClient::Remote(s) => s.upsert_bank_card(card, id).await,
            StoreClient::Local(s) => s.upsert_bank_card(card, id).await,
        }
    }

    async fn delete_bank_card(&self, id: &str) -> Result<()> {
        match self {
            StoreClient::Remote(s) => s.delete_bank_card(id).await,
            StoreClient::Local(s) => s.delete_bank_card(id).await,
        }
    }

    async fn list_accounts(&self) -> Result<Vec<Account>> {
        match self {
            StoreClient::Remote(s) => s.list_accounts().await,
            StoreClient::Local(s) => s.list_accounts().await,
        }
    }
}
