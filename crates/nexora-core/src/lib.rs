//! Nexora Core Library
//!
//! Shared functionality for the NexoraCrew small-business finance tracker:
//! - Persistence gateway with interchangeable remote (REST) and local
//!   (offline/demo) backends behind one contract
//! - Dashboard aggregation over the raw transaction ledger
//! - Polling change notifier for remote-mode refreshes
//! - Session persistence (account snapshot + bearer token)
//! - Attachment data-URL codec and CSV ledger export

pub mod attachment;
pub mod config;
pub mod error;
pub mod export;
pub mod models;
pub mod notify;
pub mod session;
pub mod stats;
pub mod store;

/// Test utilities including the mock REST API server
#[cfg(any(test, feature = "test-utils"))]
pub mod test_utils;

pub use attachment::{Attachment, MAX_ATTACHMENT_BYTES};
pub use config::{GatewayConfig, DEFAULT_POLL_PERIOD};
pub use error::{Error, Result};
pub use models::{
    Account, BankCard, CardType, InvestmentType, NewAccount, NewBankCard, NewTransaction,
    PaymentMethod, Transaction, TransactionKind, TransactionPatch,
};
pub use notify::{ChangeNotifier, Subscription};
pub use session::SessionStore;
pub use stats::{
    compute_dashboard, CategoryTotal, ContributorTotal, DashboardReport, DashboardStats,
    MonthlyPoint,
};
pub use store::{LocalStore, RemoteStore, Store, StoreClient};
