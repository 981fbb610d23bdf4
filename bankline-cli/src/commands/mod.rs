//! CLI command implementations

pub mod balance;
pub mod deposit;
pub mod history;
pub mod login;
pub mod logout;
pub mod register;
pub mod status;
pub mod transfer;
pub mod withdraw;

use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use anyhow::{Context, Result};
use bankline_core::ports::SessionExpiredHandler;
use bankline_core::BanklineContext;

/// Expiry handler for the terminal: tell the user how to get back to a
/// signed-in state.
struct PrintSessionExpired;

impl SessionExpiredHandler for PrintSessionExpired {
    fn on_session_expired(&self) {
        crate::output::warning("Session expired. Run 'bk login' to sign in again.");
    }
}

/// Get the bankline directory from environment or default
pub fn get_bankline_dir() -> PathBuf {
    if let Ok(dir) = std::env::var("BANKLINE_DIR") {
        PathBuf::from(dir)
    } else {
        dirs::home_dir()
            .expect("Could not find home directory")
            .join(".bankline")
    }
}

/// Get or create bankline context
pub fn get_context() -> Result<BanklineContext> {
    let bankline_dir = get_bankline_dir();

    // Create directory if it doesn't exist
    std::fs::create_dir_all(&bankline_dir)
        .with_context(|| format!("Failed to create bankline directory: {:?}", bankline_dir))?;

    BanklineContext::new(&bankline_dir, Arc::new(PrintSessionExpired))
        .context("Failed to initialize bankline context")
}

/// Run a backend call behind a spinner when attached to a terminal
pub fn with_spinner<T>(message: &str, call: impl FnOnce() -> T) -> T {
    if atty::is(atty::Stream::Stderr) {
        let spinner = indicatif::ProgressBar::new_spinner();
        spinner.set_message(message.to_string());
        spinner.enable_steady_tick(Duration::from_millis(80));
        let result = call();
        spinner.finish_and_clear();
        result
    } else {
        call()
    }
}

/// Print a business-level failure and exit nonzero
pub fn fail_with(message: &str) -> ! {
    crate::output::error(message);
    std::process::exit(1);
}

/// Show the balance after a successful money movement.
///
/// The refresh is best-effort: the movement already happened, so a failure
/// here must not fail the command.
pub fn show_updated_balance(ctx: &BanklineContext) {
    match ctx.account_service.balance() {
        Ok(response) if response.success => {
            println!("Balance: {}", crate::output::format_currency(response.balance));
        }
        _ => {}
    }
}
