//! Service layer - screen-level logic over the gateway
//!
//! One service per feature area: auth (login/register/logout), account
//! (balance and money movement), history (ledger views). All of them go
//! through the gateway and the credential store, never around them.

mod account;
mod auth;
mod history;

pub use account::AccountService;
pub use auth::AuthService;
pub use history::{HistoryService, RECENT_LIMIT};

use crate::domain::result::{Error, Result};
use crate::ports::CredentialStore;

/// Entry guard for protected operations: fail fast when no token is stored,
/// before any network call is attempted. Distinct from the gateway's 401
/// handling, which deals with a session that existed but has since expired.
pub(crate) fn require_session(store: &dyn CredentialStore) -> Result<()> {
    match store.token() {
        Some(_) => Ok(()),
        None => Err(Error::NoSession),
    }
}
