//! Integration tests for the gateway and services
//!
//! A minimal canned-response backend runs on a loopback listener, so the
//! full request path - header attachment, response classification, session
//! teardown - is exercised over real sockets.
//!
//! Run with: cargo test --test integration_tests -- --nocapture

use std::io::{BufRead, BufReader, Read, Write};
use std::net::{TcpListener, TcpStream};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::mpsc::{self, Receiver};
use std::sync::Arc;
use std::thread::{self, JoinHandle};

use rust_decimal::Decimal;

use bankline_core::adapters::MemoryCredentialStore;
use bankline_core::api::{ApiGateway, BalanceResponse, RequestOptions};
use bankline_core::config::Config;
use bankline_core::ports::{CredentialStore, SessionExpiredHandler};
use bankline_core::{BanklineContext, Error, TransactionKind};

// ============================================================================
// Test Helpers
// ============================================================================

/// What the stub backend saw in one request
struct ReceivedRequest {
    request_line: String,
    headers: Vec<(String, String)>,
    body: String,
}

impl ReceivedRequest {
    fn header(&self, name: &str) -> Option<&str> {
        let name = name.to_lowercase();
        self.headers
            .iter()
            .find(|(n, _)| *n == name)
            .map(|(_, v)| v.as_str())
    }
}

fn reason_for(status: u16) -> &'static str {
    match status {
        200 => "OK",
        401 => "Unauthorized",
        500 => "Internal Server Error",
        _ => "Status",
    }
}

/// Spawn a stub backend that serves the given (status, body) responses, one
/// per connection, in order, then exits.
fn spawn_backend_seq(
    responses: Vec<(u16, String)>,
) -> (String, Receiver<ReceivedRequest>, JoinHandle<()>) {
    let listener = TcpListener::bind("127.0.0.1:0").expect("bind stub backend");
    let base_url = format!("http://{}", listener.local_addr().unwrap());
    let (tx, rx) = mpsc::channel();

    let handle = thread::spawn(move || {
        for (status, body) in responses {
            let (stream, _) = listener.accept().expect("accept");
            let request = answer(stream, status, &body);
            let _ = tx.send(request);
        }
    });

    (base_url, rx, handle)
}

/// Spawn a stub backend that answers every connection identically.
fn spawn_backend(
    hits: usize,
    status: u16,
    body: &str,
) -> (String, Receiver<ReceivedRequest>, JoinHandle<()>) {
    spawn_backend_seq(vec![(status, body.to_string()); hits])
}

/// Read one HTTP request off the stream, answer it, close the connection.
fn answer(mut stream: TcpStream, status: u16, body: &str) -> ReceivedRequest {
    let mut reader = BufReader::new(stream.try_clone().unwrap());

    let mut request_line = String::new();
    reader.read_line(&mut request_line).unwrap();

    let mut headers = Vec::new();
    let mut content_length = 0usize;
    loop {
        let mut line = String::new();
        reader.read_line(&mut line).unwrap();
        let line = line.trim_end();
        if line.is_empty() {
            break;
        }
        if let Some((name, value)) = line.split_once(':') {
            let name = name.trim().to_lowercase();
            let value = value.trim().to_string();
            if name == "content-length" {
                content_length = value.parse().unwrap_or(0);
            }
            headers.push((name, value));
        }
    }

    let mut body_buf = vec![0u8; content_length];
    if content_length > 0 {
        reader.read_exact(&mut body_buf).unwrap();
    }

    let response = format!(
        "HTTP/1.1 {} {}\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{}",
        status,
        reason_for(status),
        body.len(),
        body
    );
    stream.write_all(response.as_bytes()).unwrap();
    stream.flush().unwrap();
    let _ = stream.shutdown(std::net::Shutdown::Write);

    ReceivedRequest {
        request_line: request_line.trim_end().to_string(),
        headers,
        body: String::from_utf8_lossy(&body_buf).into_owned(),
    }
}

/// Expiry handler that counts invocations
#[derive(Default)]
struct CountingExpired(AtomicUsize);

impl CountingExpired {
    fn count(&self) -> usize {
        self.0.load(Ordering::SeqCst)
    }
}

impl SessionExpiredHandler for CountingExpired {
    fn on_session_expired(&self) {
        self.0.fetch_add(1, Ordering::SeqCst);
    }
}

fn make_gateway(
    base_url: &str,
    store: Arc<MemoryCredentialStore>,
    expired: Arc<CountingExpired>,
) -> ApiGateway {
    ApiGateway::new(base_url, store, expired).expect("gateway")
}

fn make_context(
    base_url: &str,
    store: Arc<MemoryCredentialStore>,
    expired: Arc<CountingExpired>,
) -> BanklineContext {
    let mut config = Config::default();
    config.set_api_base_url(base_url);
    BanklineContext::with_store(config, store, expired).expect("context")
}

// ============================================================================
// Header attachment
// ============================================================================

#[test]
fn test_bearer_token_attached_verbatim() {
    let (base_url, rx, handle) = spawn_backend(1, 200, r#"{"success":true,"balance":100.5}"#);
    let store = Arc::new(MemoryCredentialStore::new());
    store.set_session("tok-123", "alice").unwrap();
    let gateway = make_gateway(&base_url, store, Arc::new(CountingExpired::default()));

    let response: BalanceResponse = gateway.request("/balance", RequestOptions::get()).unwrap();
    assert!(response.success);
    assert_eq!(response.balance, Decimal::new(1005, 1));

    let seen = rx.recv().unwrap();
    assert!(seen.request_line.starts_with("GET /balance"));
    assert_eq!(seen.header("authorization"), Some("Bearer tok-123"));
    assert_eq!(seen.header("content-type"), Some("application/json"));
    handle.join().unwrap();
}

#[test]
fn test_no_token_no_authorization_header() {
    let (base_url, rx, handle) = spawn_backend(1, 200, r#"{"success":true,"balance":0}"#);
    let store = Arc::new(MemoryCredentialStore::new());
    let gateway = make_gateway(&base_url, store, Arc::new(CountingExpired::default()));

    let _: BalanceResponse = gateway.request("/balance", RequestOptions::get()).unwrap();

    let seen = rx.recv().unwrap();
    assert_eq!(seen.header("authorization"), None);
    handle.join().unwrap();
}

#[test]
fn test_caller_headers_merged_not_dropped() {
    let (base_url, rx, handle) = spawn_backend(1, 200, r#"{"success":true,"message":"ok"}"#);
    let store = Arc::new(MemoryCredentialStore::new());
    store.set_session("tok-123", "alice").unwrap();
    let gateway = make_gateway(&base_url, store, Arc::new(CountingExpired::default()));

    let options = RequestOptions::post(serde_json::json!({"amount": "5"}))
        .header("X-Request-Id", "42");
    let _: bankline_core::api::ActionResponse = gateway.request("/deposit", options).unwrap();

    let seen = rx.recv().unwrap();
    assert_eq!(seen.header("x-request-id"), Some("42"));
    // Defaults still present alongside the caller's header
    assert_eq!(seen.header("authorization"), Some("Bearer tok-123"));
    assert_eq!(seen.body, r#"{"amount":"5"}"#);
    handle.join().unwrap();
}

// ============================================================================
// Response classification
// ============================================================================

#[test]
fn test_401_clears_session_and_notifies_once() {
    // Body is deliberately not JSON: teardown must happen before parsing
    let (base_url, _rx, handle) = spawn_backend(1, 401, "Unauthorized");
    let store = Arc::new(MemoryCredentialStore::new());
    store.set_session("tok-123", "alice").unwrap();
    let expired = Arc::new(CountingExpired::default());
    let gateway = make_gateway(&base_url, Arc::clone(&store), Arc::clone(&expired));

    let result: Result<BalanceResponse, _> = gateway.request("/balance", RequestOptions::get());
    assert!(matches!(result, Err(Error::Unauthorized)));

    assert_eq!(store.token(), None);
    assert_eq!(store.username(), None);
    assert_eq!(expired.count(), 1);
    handle.join().unwrap();
}

#[test]
fn test_401_with_stale_username_clears_it_quietly() {
    // No token stored, but a stale username left behind by an older client
    let (base_url, rx, handle) = spawn_backend(1, 401, r#"{"success":false}"#);
    let store = Arc::new(MemoryCredentialStore::with_parts(None, Some("alice")));
    let expired = Arc::new(CountingExpired::default());
    let gateway = make_gateway(&base_url, Arc::clone(&store), Arc::clone(&expired));

    let result: Result<BalanceResponse, _> = gateway.request("/balance", RequestOptions::get());
    assert!(matches!(result, Err(Error::Unauthorized)));

    // No token was sent, and the stale half is gone
    let seen = rx.recv().unwrap();
    assert_eq!(seen.header("authorization"), None);
    assert_eq!(store.username(), None);
    // No live session expired, so nobody is notified
    assert_eq!(expired.count(), 0);
    handle.join().unwrap();
}

#[test]
fn test_server_error_leaves_session_intact() {
    let (base_url, _rx, handle) = spawn_backend(1, 500, "boom");
    let store = Arc::new(MemoryCredentialStore::new());
    store.set_session("tok-123", "alice").unwrap();
    let expired = Arc::new(CountingExpired::default());
    let gateway = make_gateway(&base_url, Arc::clone(&store), Arc::clone(&expired));

    let result: Result<BalanceResponse, _> = gateway.request("/balance", RequestOptions::get());
    match result {
        Err(Error::Server { status }) => assert_eq!(status, 500),
        other => panic!("expected Server error, got {:?}", other),
    }

    assert_eq!(store.token().as_deref(), Some("tok-123"));
    assert_eq!(expired.count(), 0);
    handle.join().unwrap();
}

#[test]
fn test_2xx_bad_json_is_malformed_response() {
    let (base_url, _rx, handle) = spawn_backend(1, 200, "<html>not json</html>");
    let store = Arc::new(MemoryCredentialStore::new());
    let gateway = make_gateway(&base_url, store, Arc::new(CountingExpired::default()));

    let result: Result<BalanceResponse, _> = gateway.request("/balance", RequestOptions::get());
    assert!(matches!(result, Err(Error::MalformedResponse(_))));
    handle.join().unwrap();
}

#[test]
fn test_connection_refused_is_connection_error() {
    // Bind a port, then free it so nothing is listening
    let listener = TcpListener::bind("127.0.0.1:0").unwrap();
    let base_url = format!("http://{}", listener.local_addr().unwrap());
    drop(listener);

    let store = Arc::new(MemoryCredentialStore::new());
    let gateway = make_gateway(&base_url, store, Arc::new(CountingExpired::default()));

    let result: Result<BalanceResponse, _> = gateway.request("/balance", RequestOptions::get());
    assert!(matches!(result, Err(Error::Connection(_))));
}

#[test]
fn test_business_failure_resolves_not_rejects() {
    let (base_url, _rx, handle) =
        spawn_backend(1, 200, r#"{"success":false,"message":"Invalid amount"}"#);
    let store = Arc::new(MemoryCredentialStore::new());
    store.set_session("tok-123", "alice").unwrap();
    let ctx = make_context(&base_url, store, Arc::new(CountingExpired::default()));

    let response = ctx.account_service.deposit(Decimal::new(-5, 0)).unwrap();
    assert!(!response.success);
    assert_eq!(response.message, "Invalid amount");
    handle.join().unwrap();
}

// ============================================================================
// Entry guard (no session, no network)
// ============================================================================

#[test]
fn test_protected_operations_fail_fast_without_session() {
    // Point at a dead address: if the guard lets a call through, the error
    // kind changes and the assertions below catch it
    let store = Arc::new(MemoryCredentialStore::new());
    let ctx = make_context(
        "http://127.0.0.1:1",
        store,
        Arc::new(CountingExpired::default()),
    );

    assert!(matches!(ctx.account_service.balance(), Err(Error::NoSession)));
    assert!(matches!(
        ctx.account_service.deposit(Decimal::new(100, 0)),
        Err(Error::NoSession)
    ));
    assert!(matches!(
        ctx.account_service.withdraw(Decimal::new(100, 0)),
        Err(Error::NoSession)
    ));
    assert!(matches!(
        ctx.account_service.transfer("bob", Decimal::new(100, 0)),
        Err(Error::NoSession)
    ));
    assert!(matches!(ctx.history_service.full(), Err(Error::NoSession)));
    assert!(matches!(ctx.history_service.recent(), Err(Error::NoSession)));
}

// ============================================================================
// Auth flows
// ============================================================================

#[test]
fn test_login_stores_token_verbatim_and_sends_it_next() {
    let (base_url, rx, handle) = spawn_backend_seq(vec![
        (
            200,
            r#"{"success":true,"message":"Login successful.","token":"jwt-abc"}"#.to_string(),
        ),
        (200, r#"{"success":true,"balance":42}"#.to_string()),
    ]);
    let store = Arc::new(MemoryCredentialStore::new());
    let ctx = make_context(&base_url, Arc::clone(&store), Arc::new(CountingExpired::default()));

    let response = ctx.auth_service.login("alice", "hunter2").unwrap();
    assert!(response.success);
    assert_eq!(store.token().as_deref(), Some("jwt-abc"));
    assert_eq!(store.username().as_deref(), Some("alice"));

    let login_seen = rx.recv().unwrap();
    assert!(login_seen.request_line.starts_with("POST /login"));
    assert_eq!(
        login_seen.body,
        r#"{"username":"alice","password":"hunter2"}"#
    );

    // The very next call carries the token verbatim
    let _ = ctx.account_service.balance().unwrap();
    let balance_seen = rx.recv().unwrap();
    assert_eq!(balance_seen.header("authorization"), Some("Bearer jwt-abc"));
    handle.join().unwrap();
}

#[test]
fn test_failed_login_stores_nothing() {
    let (base_url, _rx, handle) = spawn_backend(
        1,
        200,
        r#"{"success":false,"message":"Invalid username or password."}"#,
    );
    let store = Arc::new(MemoryCredentialStore::new());
    let ctx = make_context(&base_url, Arc::clone(&store), Arc::new(CountingExpired::default()));

    let response = ctx.auth_service.login("alice", "wrong").unwrap();
    assert!(!response.success);
    assert_eq!(store.session(), None);
    handle.join().unwrap();
}

#[test]
fn test_login_success_without_token_stores_nothing() {
    let (base_url, _rx, handle) = spawn_backend(1, 200, r#"{"success":true,"message":"ok"}"#);
    let store = Arc::new(MemoryCredentialStore::new());
    let ctx = make_context(&base_url, Arc::clone(&store), Arc::new(CountingExpired::default()));

    let response = ctx.auth_service.login("alice", "pw").unwrap();
    assert!(response.success);
    assert_eq!(store.session(), None);
    handle.join().unwrap();
}

#[test]
fn test_register_never_touches_session() {
    let (base_url, rx, handle) =
        spawn_backend(1, 200, r#"{"success":true,"message":"Account created."}"#);
    let store = Arc::new(MemoryCredentialStore::new());
    store.set_session("tok-old", "old-user").unwrap();
    let ctx = make_context(&base_url, Arc::clone(&store), Arc::new(CountingExpired::default()));

    let response = ctx.auth_service.register("bob", "pw").unwrap();
    assert!(response.success);
    assert_eq!(store.token().as_deref(), Some("tok-old"));

    let seen = rx.recv().unwrap();
    assert!(seen.request_line.starts_with("POST /register"));
    handle.join().unwrap();
}

#[test]
fn test_logout_clears_both_halves() {
    let store = Arc::new(MemoryCredentialStore::new());
    store.set_session("tok-123", "alice").unwrap();
    let ctx = make_context(
        "http://127.0.0.1:1",
        Arc::clone(&store),
        Arc::new(CountingExpired::default()),
    );

    assert!(ctx.auth_service.logout().unwrap());
    assert_eq!(store.token(), None);
    assert_eq!(store.username(), None);
    // Logging out twice is harmless
    assert!(!ctx.auth_service.logout().unwrap());
}

// ============================================================================
// History presentation
// ============================================================================

#[test]
fn test_recent_history_is_reversed_tail() {
    let body = r#"{"success":true,"transactions":[
        {"type":"DEPOSIT","amount":100,"time":"2025-01-01 09:00:00"},
        {"type":"WITHDRAW","amount":40,"time":"2025-01-02 09:00:00"}
    ]}"#;
    let (base_url, _rx, handle) = spawn_backend(1, 200, body);
    let store = Arc::new(MemoryCredentialStore::new());
    store.set_session("tok-123", "alice").unwrap();
    let ctx = make_context(&base_url, store, Arc::new(CountingExpired::default()));

    let recent = ctx.history_service.recent().unwrap();
    assert_eq!(recent.len(), 2);
    assert_eq!(recent[0].kind, TransactionKind::Withdraw);
    assert_eq!(recent[0].signed_amount(), Decimal::new(-40, 0));
    assert_eq!(recent[1].kind, TransactionKind::Deposit);
    assert_eq!(recent[1].signed_amount(), Decimal::new(100, 0));
    handle.join().unwrap();
}

#[test]
fn test_history_business_failure_renders_empty() {
    let (base_url, _rx, handle) =
        spawn_backend(1, 200, r#"{"success":false,"message":"no history"}"#);
    let store = Arc::new(MemoryCredentialStore::new());
    store.set_session("tok-123", "alice").unwrap();
    let ctx = make_context(&base_url, store, Arc::new(CountingExpired::default()));

    assert!(ctx.history_service.full().unwrap().is_empty());
    handle.join().unwrap();
}
