//! Session domain model

use serde::{Deserialize, Serialize};

/// The paired (token, username) state representing a logged-in user.
///
/// Invariant: the two halves travel together. A credential store never
/// exposes a session with only one of them set.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Session {
    /// Opaque bearer credential issued by the backend on login.
    pub token: String,
    /// Display username; shown in the UI, never used to authenticate.
    pub username: String,
}

impl Session {
    pub fn new(token: impl Into<String>, username: impl Into<String>) -> Self {
        Self {
            token: token.into(),
            username: username.into(),
        }
    }
}
