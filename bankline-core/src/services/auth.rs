//! Authentication service - login, registration, logout

use std::sync::Arc;

use crate::api::{ActionResponse, ApiGateway, LoginResponse};
use crate::domain::result::Result;
use crate::ports::CredentialStore;

/// Login, registration and logout against the backend
pub struct AuthService {
    gateway: Arc<ApiGateway>,
    store: Arc<dyn CredentialStore>,
}

impl AuthService {
    pub fn new(gateway: Arc<ApiGateway>, store: Arc<dyn CredentialStore>) -> Self {
        Self { gateway, store }
    }

    /// Authenticate against the backend.
    ///
    /// On a successful response that carries a token, both halves of the
    /// session are persisted, the token verbatim. A success without a token
    /// is reported to the caller but never stored - the store holds a whole
    /// session or nothing.
    pub fn login(&self, username: &str, password: &str) -> Result<LoginResponse> {
        let response = self.gateway.login(username, password)?;

        if response.success {
            match &response.token {
                Some(token) => {
                    self.store.set_session(token, username)?;
                    tracing::info!(username, "logged in");
                }
                None => {
                    tracing::warn!("login succeeded but no token arrived; session not stored");
                }
            }
        }

        Ok(response)
    }

    /// Create a new account. Never touches the stored session.
    pub fn register(&self, username: &str, password: &str) -> Result<ActionResponse> {
        self.gateway.register(username, password)
    }

    /// Drop the stored session, both halves together.
    ///
    /// Returns whether a session was actually held. Purely local - the
    /// backend keeps no session state to tear down.
    pub fn logout(&self) -> Result<bool> {
        self.store.clear_session()
    }

    /// Display username of the held session, if any.
    pub fn current_user(&self) -> Option<String> {
        self.store.session().map(|s| s.username)
    }
}
