//! History service - newest-first views over the backend ledger
//!
//! The backend returns transactions in chronological ascending order; both
//! views here reverse that so the most recent entry comes first, for the
//! full history view and the dashboard-style preview.

use std::sync::Arc;

use crate::api::ApiGateway;
use crate::domain::result::Result;
use crate::domain::TransactionRecord;
use crate::ports::CredentialStore;

use super::require_session;

/// Number of entries in the dashboard-style preview.
pub const RECENT_LIMIT: usize = 3;

/// Read-only presentation of the transaction history
pub struct HistoryService {
    gateway: Arc<ApiGateway>,
    store: Arc<dyn CredentialStore>,
}

impl HistoryService {
    pub fn new(gateway: Arc<ApiGateway>, store: Arc<dyn CredentialStore>) -> Self {
        Self { gateway, store }
    }

    /// Full history, newest first.
    ///
    /// A business-level failure response renders as an empty history.
    pub fn full(&self) -> Result<Vec<TransactionRecord>> {
        require_session(self.store.as_ref())?;
        let response = self.gateway.history()?;
        if !response.success {
            return Ok(Vec::new());
        }

        let mut transactions = response.transactions;
        transactions.reverse();
        Ok(transactions)
    }

    /// The last few entries, newest first - the dashboard preview.
    pub fn recent(&self) -> Result<Vec<TransactionRecord>> {
        require_session(self.store.as_ref())?;
        let response = self.gateway.history()?;
        if !response.success {
            return Ok(Vec::new());
        }

        Ok(recent_view(response.transactions, RECENT_LIMIT))
    }
}

/// Take the last `limit` entries of an ascending list and reverse them.
fn recent_view(transactions: Vec<TransactionRecord>, limit: usize) -> Vec<TransactionRecord> {
    let skip = transactions.len().saturating_sub(limit);
    let mut recent: Vec<TransactionRecord> = transactions.into_iter().skip(skip).collect();
    recent.reverse();
    recent
}
