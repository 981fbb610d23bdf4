//! Result and error types for the core library
//!
//! The first four variants are the gateway's response classification; the
//! rest cover client-side preconditions and ambient failures. `Unauthorized`
//! is handled centrally (session teardown) before it surfaces - every other
//! kind propagates unchanged to the caller.

use thiserror::Error;

/// Core library error type
#[derive(Error, Debug)]
pub enum Error {
    /// The backend rejected the session (HTTP 401). By the time this
    /// surfaces the gateway has already cleared the stored credentials.
    #[error("Unauthorized")]
    Unauthorized,

    /// Any non-2xx status other than 401.
    #[error("Server error: {status}")]
    Server { status: u16 },

    /// A 2xx response whose body was not the JSON we expected.
    #[error("Malformed response: {0}")]
    MalformedResponse(String),

    /// Transport-level failure: connection refused, DNS, timeout.
    #[error("Connection error")]
    Connection(#[source] reqwest::Error),

    /// A protected operation was attempted with no stored session.
    #[error("Not logged in")]
    NoSession,

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Credential storage error: {0}")]
    Storage(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl Error {
    /// Create a configuration error
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }

    /// Create a credential storage error
    pub fn storage(msg: impl Into<String>) -> Self {
        Self::Storage(msg.into())
    }
}

/// Core library result type
pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_messages() {
        assert_eq!(Error::Unauthorized.to_string(), "Unauthorized");
        assert_eq!(Error::Server { status: 503 }.to_string(), "Server error: 503");
        assert_eq!(Error::NoSession.to_string(), "Not logged in");
        assert_eq!(
            Error::config("bad base URL").to_string(),
            "Configuration error: bad base URL"
        );
    }
}
