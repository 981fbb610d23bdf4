//! Balance command - show the current balance

use anyhow::Result;
use colored::Colorize;

use super::{fail_with, get_context, with_spinner};
use crate::output;

pub fn run(json: bool) -> Result<()> {
    let ctx = get_context()?;

    let response = with_spinner("Fetching balance...", || ctx.account_service.balance())?;

    if json {
        println!("{}", serde_json::to_string_pretty(&response)?);
        return Ok(());
    }

    if !response.success {
        fail_with(&response.message);
    }

    println!(
        "Balance: {}",
        output::format_currency(response.balance).bold()
    );
    Ok(())
}
