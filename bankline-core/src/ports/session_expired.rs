//! Session expiry notification port

/// Strategy invoked when the gateway detects an expired session: an HTTP 401
/// while a bearer token was stored.
///
/// Each surface decides what "go back to the login screen" means: the CLI
/// prints re-login instructions, tests count invocations. The gateway
/// guarantees at most one invocation per expiry event, however many
/// in-flight calls hit the same 401.
pub trait SessionExpiredHandler: Send + Sync {
    fn on_session_expired(&self);
}

/// Handler that only records the event in the log.
#[derive(Debug, Default)]
pub struct LogSessionExpired;

impl SessionExpiredHandler for LogSessionExpired {
    fn on_session_expired(&self) {
        tracing::warn!("session expired; stored credentials cleared");
    }
}
