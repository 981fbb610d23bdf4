//! History command - transaction history, newest first

use anyhow::Result;
use bankline_core::TransactionRecord;
use colored::Colorize;

use super::{get_context, with_spinner};
use crate::output;

pub fn run(recent: bool, json: bool) -> Result<()> {
    let ctx = get_context()?;

    let transactions = with_spinner("Loading history...", || {
        if recent {
            ctx.history_service.recent()
        } else {
            ctx.history_service.full()
        }
    })?;

    if json {
        println!("{}", serde_json::to_string_pretty(&transactions)?);
        return Ok(());
    }

    if transactions.is_empty() {
        output::info("No transactions yet");
        return Ok(());
    }

    print_table(&transactions);
    Ok(())
}

fn print_table(transactions: &[TransactionRecord]) {
    let mut table = output::create_table();
    table.set_header(vec!["Type", "Amount", "Counterparty", "Time"]);

    for tx in transactions {
        let amount = output::format_signed_currency(tx.signed_amount());
        let amount = if tx.kind.is_incoming() {
            amount.green().to_string()
        } else {
            amount.red().to_string()
        };

        // Transfers carry the other side; deposits/withdrawals don't
        let counterparty = if tx.kind.is_incoming() {
            tx.from_user.clone()
        } else {
            tx.to_user.clone()
        }
        .unwrap_or_default();

        table.add_row(vec![
            tx.kind.as_str().to_string(),
            amount,
            counterparty,
            tx.time.clone(),
        ]);
    }

    println!("{}", table);
}
