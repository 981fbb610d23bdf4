//! Bankline CLI - your bank account in the terminal

use std::process::ExitCode;

use anyhow::Result;
use clap::{Parser, Subcommand};
use rust_decimal::Decimal;
use tracing_subscriber::EnvFilter;

mod commands;
mod output;

use commands::{balance, deposit, history, login, logout, register, status, transfer, withdraw};

/// Bankline - terminal client for your bank account
#[derive(Parser)]
#[command(name = "bk", version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Log in and store the session
    Login {
        /// Username (prompted when omitted)
        #[arg(long, short)]
        username: Option<String>,
        /// Password (prompted when omitted)
        #[arg(long, short)]
        password: Option<String>,
    },

    /// Create a new account
    Register {
        /// Username (prompted when omitted)
        #[arg(long, short)]
        username: Option<String>,
        /// Password (prompted when omitted)
        #[arg(long, short)]
        password: Option<String>,
    },

    /// Drop the stored session
    Logout,

    /// Show the current balance
    Balance {
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Deposit into your account
    Deposit {
        /// Amount, e.g. 25.00
        amount: Decimal,
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Withdraw from your account
    Withdraw {
        /// Amount, e.g. 25.00
        amount: Decimal,
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Transfer to another user
    Transfer {
        /// Receiving username
        to_user: String,
        /// Amount, e.g. 25.00
        amount: Decimal,
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Show transaction history, newest first
    History {
        /// Only the last few entries (the dashboard preview)
        #[arg(long)]
        recent: bool,
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Show session and backend status
    Status {
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
}

fn main() -> ExitCode {
    init_logging();

    let cli = Cli::parse();

    let result = run(cli);

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            output::error(&format!("{}", e));
            ExitCode::FAILURE
        }
    }
}

fn init_logging() {
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));

    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .compact()
        .init();
}

fn run(cli: Cli) -> Result<()> {
    match cli.command {
        Commands::Login { username, password } => login::run(username, password),
        Commands::Register { username, password } => register::run(username, password),
        Commands::Logout => logout::run(),
        Commands::Balance { json } => balance::run(json),
        Commands::Deposit { amount, json } => deposit::run(amount, json),
        Commands::Withdraw { amount, json } => withdraw::run(amount, json),
        Commands::Transfer { to_user, amount, json } => transfer::run(&to_user, amount, json),
        Commands::History { recent, json } => history::run(recent, json),
        Commands::Status { json } => status::run(json),
    }
}
