//! Credential store port
//!
//! Defines the interface for holding the session token and display username
//! between operations; implementations decide where the pair lives.

use crate::domain::result::Result;
use crate::domain::Session;

/// Storage for the current session.
///
/// Implementations keep the token/username pair atomic: readers never see a
/// half-set session, and clearing twice leaves the same fully-cleared state
/// as clearing once.
pub trait CredentialStore: Send + Sync {
    /// Persist both halves of the session together.
    fn set_session(&self, token: &str, username: &str) -> Result<()>;

    /// The stored session, if both halves are present.
    fn session(&self) -> Option<Session>;

    /// The stored bearer token, if any.
    ///
    /// May return a token even when the username half is missing (a partial
    /// state left by an external writer); the gateway only cares about the
    /// token.
    fn token(&self) -> Option<String> {
        self.session().map(|s| s.token)
    }

    /// The stored display username, if any.
    fn username(&self) -> Option<String> {
        self.session().map(|s| s.username)
    }

    /// Remove both halves. Returns whether a bearer token was stored.
    ///
    /// Idempotent, and safe under concurrent callers: when several clears
    /// race, at most one of them observes the token as present.
    fn clear_session(&self) -> Result<bool>;
}
