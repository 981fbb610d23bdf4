//! In-memory credential store
//!
//! Holds the session in a mutex for tests and embedders that don't want
//! anything on disk. Same atomicity contract as the file store.

use std::sync::Mutex;

use crate::domain::result::Result;
use crate::domain::Session;
use crate::ports::CredentialStore;

#[derive(Debug, Default)]
struct StoredCredentials {
    token: Option<String>,
    username: Option<String>,
}

/// Credential store that lives and dies with the process
#[derive(Debug, Default)]
pub struct MemoryCredentialStore {
    inner: Mutex<StoredCredentials>,
}

impl MemoryCredentialStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a store with explicit halves, including partial states an
    /// external writer could leave behind.
    pub fn with_parts(token: Option<&str>, username: Option<&str>) -> Self {
        Self {
            inner: Mutex::new(StoredCredentials {
                token: token.map(str::to_string),
                username: username.map(str::to_string),
            }),
        }
    }
}

impl CredentialStore for MemoryCredentialStore {
    fn set_session(&self, token: &str, username: &str) -> Result<()> {
        let mut inner = self.inner.lock().expect("credential store poisoned");
        inner.token = Some(token.to_string());
        inner.username = Some(username.to_string());
        Ok(())
    }

    fn session(&self) -> Option<Session> {
        let inner = self.inner.lock().expect("credential store poisoned");
        match (&inner.token, &inner.username) {
            (Some(token), Some(username)) if !token.is_empty() => {
                Some(Session::new(token.clone(), username.clone()))
            }
            _ => None,
        }
    }

    fn token(&self) -> Option<String> {
        let inner = self.inner.lock().expect("credential store poisoned");
        inner.token.clone().filter(|t| !t.is_empty())
    }

    fn username(&self) -> Option<String> {
        let inner = self.inner.lock().expect("credential store poisoned");
        inner.username.clone().filter(|u| !u.is_empty())
    }

    fn clear_session(&self) -> Result<bool> {
        let mut inner = self.inner.lock().expect("credential store poisoned");
        let had_token = inner.token.take().filter(|t| !t.is_empty()).is_some();
        inner.username = None;
        Ok(had_token)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_set_then_clear() {
        let store = MemoryCredentialStore::new();
        store.set_session("tok", "alice").unwrap();
        assert!(store.session().is_some());

        assert!(store.clear_session().unwrap());
        assert_eq!(store.token(), None);
        assert_eq!(store.username(), None);
        assert!(!store.clear_session().unwrap());
    }

    #[test]
    fn test_partial_state_has_no_session() {
        let store = MemoryCredentialStore::with_parts(None, Some("alice"));
        assert_eq!(store.session(), None);
        assert_eq!(store.username().as_deref(), Some("alice"));
        assert!(!store.clear_session().unwrap());
        assert_eq!(store.username(), None);
    }
}
