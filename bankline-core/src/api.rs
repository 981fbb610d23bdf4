//! Bank API gateway
//!
//! The single request layer for the banking backend: builds every call,
//! attaches the bearer credential, classifies the response, and tears down
//! the session on authentication failure. Callers never talk to the backend
//! except through this gateway.

use std::sync::Arc;

use reqwest::blocking::Client;
use reqwest::header::{HeaderMap, HeaderName, HeaderValue, AUTHORIZATION, CONTENT_TYPE};
use reqwest::Method;
use rust_decimal::Decimal;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use url::Url;

use crate::domain::result::{Error, Result};
use crate::domain::TransactionRecord;
use crate::ports::{CredentialStore, SessionExpiredHandler};

// =============================================================================
// Wire models (matching the backend DTOs)
// =============================================================================

/// Response to POST /login.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoginResponse {
    pub success: bool,
    #[serde(default)]
    pub message: String,
    /// Bearer token; carried on successful logins.
    #[serde(default)]
    pub token: Option<String>,
}

/// Generic success/error response for simple operations
/// (register, deposit, withdraw, transfer).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ActionResponse {
    pub success: bool,
    #[serde(default)]
    pub message: String,
}

/// Response to GET /balance.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BalanceResponse {
    pub success: bool,
    #[serde(default)]
    pub message: String,
    #[serde(default)]
    pub balance: Decimal,
}

/// Response to GET /history. Transactions arrive chronological ascending.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HistoryResponse {
    pub success: bool,
    #[serde(default)]
    pub message: String,
    #[serde(default)]
    pub transactions: Vec<TransactionRecord>,
}

#[derive(Debug, Serialize)]
struct CredentialsBody<'a> {
    username: &'a str,
    password: &'a str,
}

#[derive(Debug, Serialize)]
struct AmountBody {
    amount: Decimal,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct TransferBody<'a> {
    to_user: &'a str,
    amount: Decimal,
}

// =============================================================================
// Request options
// =============================================================================

/// Options for a single gateway request.
///
/// Bodies are JSON-serializable values; extra headers are merged into the
/// defaults the gateway sets, with the caller winning on a name collision.
#[derive(Debug, Default)]
pub struct RequestOptions {
    pub method: Option<Method>,
    pub body: Option<serde_json::Value>,
    pub headers: Vec<(String, String)>,
}

impl RequestOptions {
    /// GET with no body.
    pub fn get() -> Self {
        Self::default()
    }

    /// POST with a JSON body.
    pub fn post(body: serde_json::Value) -> Self {
        Self {
            method: Some(Method::POST),
            body: Some(body),
            headers: Vec::new(),
        }
    }

    /// Add an extra header.
    pub fn header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.push((name.into(), value.into()));
        self
    }
}

// =============================================================================
// Gateway
// =============================================================================

/// Session-aware HTTP gateway to the banking backend
pub struct ApiGateway {
    client: Client,
    base_url: String,
    store: Arc<dyn CredentialStore>,
    on_expired: Arc<dyn SessionExpiredHandler>,
}

impl ApiGateway {
    /// Create a gateway against the given base address.
    ///
    /// No client-side timeout is configured: every call is a single attempt
    /// that runs on the transport's defaults, and the caller decides what to
    /// do with a failure.
    pub fn new(
        base_url: &str,
        store: Arc<dyn CredentialStore>,
        on_expired: Arc<dyn SessionExpiredHandler>,
    ) -> Result<Self> {
        if base_url.is_empty() {
            return Err(Error::config("backend base URL cannot be empty"));
        }
        Url::parse(base_url)
            .map_err(|e| Error::config(format!("invalid backend base URL '{}': {}", base_url, e)))?;

        // A call is a single attempt with no client-enforced deadline;
        // cancellation and timeouts are the transport's business.
        let client = Client::builder()
            .timeout(None)
            .build()
            .map_err(|e| Error::config(format!("failed to create HTTP client: {}", e)))?;

        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
            store,
            on_expired,
        })
    }

    /// Issue a request and classify the response.
    ///
    /// Classification is ordered, first match wins:
    /// 1. 401 - clear the stored session, notify the expiry handler (once,
    ///    however many concurrent calls hit it), fail `Unauthorized`. This
    ///    happens before any body parsing.
    /// 2. Other non-2xx - fail `Server { status }`, session untouched.
    /// 3. 2xx - parse the body as `T`; a parse failure is `MalformedResponse`.
    ///
    /// Transport failures fail `Connection` with the source error attached.
    /// There are no retries at any layer.
    pub fn request<T: DeserializeOwned>(&self, path: &str, options: RequestOptions) -> Result<T> {
        let url = format!("{}{}", self.base_url, path);
        let method = options.method.unwrap_or(Method::GET);

        let mut headers = HeaderMap::new();
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
        if let Some(token) = self.store.token() {
            let value = HeaderValue::from_str(&format!("Bearer {}", token))
                .map_err(|_| Error::storage("stored token is not a valid header value"))?;
            headers.insert(AUTHORIZATION, value);
        }
        // Caller-supplied headers merge last and win on collision.
        for (name, value) in &options.headers {
            let name = HeaderName::from_bytes(name.as_bytes())
                .map_err(|_| Error::config(format!("invalid header name '{}'", name)))?;
            let value = HeaderValue::from_str(value)
                .map_err(|_| Error::config(format!("invalid value for header '{}'", name)))?;
            headers.insert(name, value);
        }

        let mut builder = self.client.request(method.clone(), &url).headers(headers);
        if let Some(body) = &options.body {
            builder = builder.body(serde_json::to_string(body)?);
        }

        tracing::debug!(%method, %url, "issuing backend request");
        let response = builder.send().map_err(Error::Connection)?;
        let status = response.status();
        tracing::debug!(%url, status = status.as_u16(), "backend responded");

        if status.as_u16() == 401 {
            // Tear down before touching the body. The handler fires only for
            // the call that actually observed the live token go away.
            let had_token = self.store.clear_session()?;
            if had_token {
                tracing::warn!("backend rejected credentials; session cleared");
                self.on_expired.on_session_expired();
            }
            return Err(Error::Unauthorized);
        }

        if !status.is_success() {
            return Err(Error::Server {
                status: status.as_u16(),
            });
        }

        let body = response.text().map_err(Error::Connection)?;
        serde_json::from_str(&body).map_err(|e| Error::MalformedResponse(e.to_string()))
    }

    // =========================================================================
    // Endpoint wrappers
    // =========================================================================

    /// POST /login
    pub fn login(&self, username: &str, password: &str) -> Result<LoginResponse> {
        let body = serde_json::to_value(CredentialsBody { username, password })?;
        self.request("/login", RequestOptions::post(body))
    }

    /// POST /register
    pub fn register(&self, username: &str, password: &str) -> Result<ActionResponse> {
        let body = serde_json::to_value(CredentialsBody { username, password })?;
        self.request("/register", RequestOptions::post(body))
    }

    /// GET /balance
    pub fn balance(&self) -> Result<BalanceResponse> {
        self.request("/balance", RequestOptions::get())
    }

    /// POST /deposit
    pub fn deposit(&self, amount: Decimal) -> Result<ActionResponse> {
        let body = serde_json::to_value(AmountBody { amount })?;
        self.request("/deposit", RequestOptions::post(body))
    }

    /// POST /withdraw
    pub fn withdraw(&self, amount: Decimal) -> Result<ActionResponse> {
        let body = serde_json::to_value(AmountBody { amount })?;
        self.request("/withdraw", RequestOptions::post(body))
    }

    /// POST /transfer
    pub fn transfer(&self, to_user: &str, amount: Decimal) -> Result<ActionResponse> {
        let body = serde_json::to_value(TransferBody { to_user, amount })?;
        self.request("/transfer", RequestOptions::post(body))
    }

    /// GET /history
    pub fn history(&self) -> Result<HistoryResponse> {
        self.request("/history", RequestOptions::get())
    }
}

// =============================================================================
// Tests
// =============================================================================
