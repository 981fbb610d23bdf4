//! Withdraw command

use anyhow::Result;
use rust_decimal::Decimal;

use super::{fail_with, get_context, show_updated_balance, with_spinner};
use crate::output;

pub fn run(amount: Decimal, json: bool) -> Result<()> {
    let ctx = get_context()?;

    let response = with_spinner("Withdrawing...", || ctx.account_service.withdraw(amount))?;

    if json {
        println!("{}", serde_json::to_string_pretty(&response)?);
        return Ok(());
    }

    if !response.success {
        fail_with(&response.message);
    }

    output::success(&response.message);
    show_updated_balance(&ctx);
    Ok(())
}
