//! Bankline Core - client logic for the Bankline terminal banking client
//!
//! This crate implements the client core following hexagonal architecture:
//!
//! - **domain**: Session, transaction history models, error taxonomy
//! - **ports**: Trait definitions for external dependencies (CredentialStore,
//!   SessionExpiredHandler)
//! - **adapters**: Concrete credential stores (file-backed, in-memory)
//! - **api**: The session-aware request gateway to the banking backend
//! - **services**: Per-screen logic (auth, account operations, history)

pub mod adapters;
pub mod api;
pub mod config;
pub mod domain;
pub mod ports;
pub mod services;

use std::path::Path;
use std::sync::Arc;

use anyhow::Result;

use adapters::FileCredentialStore;
use api::ApiGateway;
use config::Config;
use ports::{CredentialStore, SessionExpiredHandler};
use services::{AccountService, AuthService, HistoryService};

// Re-export commonly used types at crate root
pub use domain::result::Error;
pub use domain::{Session, TransactionKind, TransactionRecord};

/// Main context for Bankline operations
///
/// This is the primary entry point: it loads configuration, wires the
/// credential store into the gateway, and hands out the services. The
/// expiry handler is supplied by the embedder, since what "go back to the
/// login page" means depends on the surface (CLI message, test counter).
pub struct BanklineContext {
    pub config: Config,
    pub store: Arc<dyn CredentialStore>,
    pub gateway: Arc<ApiGateway>,
    pub auth_service: AuthService,
    pub account_service: AccountService,
    pub history_service: HistoryService,
}

impl BanklineContext {
    /// Create a context rooted at the given bankline directory, with the
    /// session persisted to `session.json` inside it.
    pub fn new(bankline_dir: &Path, on_expired: Arc<dyn SessionExpiredHandler>) -> Result<Self> {
        let config = Config::load(bankline_dir)?;
        let store: Arc<dyn CredentialStore> = Arc::new(FileCredentialStore::new(bankline_dir));
        Self::with_store(config, store, on_expired)
    }

    /// Create a context over an explicit credential store (tests, embedders).
    pub fn with_store(
        config: Config,
        store: Arc<dyn CredentialStore>,
        on_expired: Arc<dyn SessionExpiredHandler>,
    ) -> Result<Self> {
        let gateway = Arc::new(ApiGateway::new(
            &config.api_base_url,
            Arc::clone(&store),
            on_expired,
        )?);

        let auth_service = AuthService::new(Arc::clone(&gateway), Arc::clone(&store));
        let account_service = AccountService::new(Arc::clone(&gateway), Arc::clone(&store));
        let history_service = HistoryService::new(Arc::clone(&gateway), Arc::clone(&store));

        Ok(Self {
            config,
            store,
            gateway,
            auth_service,
            account_service,
            history_service,
        })
    }
}
