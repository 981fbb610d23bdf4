//! Account operations - balance and money movement
//!
//! Amounts are relayed to the backend exactly as given; validation
//! ("Invalid amount", insufficient funds, unknown recipient) is the
//! backend's job and comes back as a business-level failure response.

use std::sync::Arc;

use rust_decimal::Decimal;

use crate::api::{ActionResponse, ApiGateway, BalanceResponse};
use crate::domain::result::Result;
use crate::ports::CredentialStore;

use super::require_session;

/// Balance queries and money movement for the logged-in user
pub struct AccountService {
    gateway: Arc<ApiGateway>,
    store: Arc<dyn CredentialStore>,
}

impl AccountService {
    pub fn new(gateway: Arc<ApiGateway>, store: Arc<dyn CredentialStore>) -> Self {
        Self { gateway, store }
    }

    /// Current balance.
    pub fn balance(&self) -> Result<BalanceResponse> {
        require_session(self.store.as_ref())?;
        self.gateway.balance()
    }

    /// Deposit into the logged-in user's account.
    pub fn deposit(&self, amount: Decimal) -> Result<ActionResponse> {
        require_session(self.store.as_ref())?;
        self.gateway.deposit(amount)
    }

    /// Withdraw from the logged-in user's account.
    pub fn withdraw(&self, amount: Decimal) -> Result<ActionResponse> {
        require_session(self.store.as_ref())?;
        self.gateway.withdraw(amount)
    }

    /// Transfer to another user.
    pub fn transfer(&self, to_user: &str, amount: Decimal) -> Result<ActionResponse> {
        require_session(self.store.as_ref())?;
        self.gateway.transfer(to_user, amount)
    }
}
