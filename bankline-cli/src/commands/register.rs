//! Register command - create a new account

use anyhow::Result;
use dialoguer::{Input, Password};

use super::{fail_with, get_context, with_spinner};
use crate::output;

pub fn run(username: Option<String>, password: Option<String>) -> Result<()> {
    let ctx = get_context()?;

    let username = match username {
        Some(u) => u,
        None => Input::new().with_prompt("Username").interact_text()?,
    };
    let password = match password {
        Some(p) => p,
        None => Password::new().with_prompt("Password").interact()?,
    };

    let response = with_spinner("Creating account...", || {
        ctx.auth_service.register(&username, &password)
    })?;

    if !response.success {
        fail_with(&response.message);
    }

    output::success(&response.message);
    println!("Run 'bk login' to sign in.");
    Ok(())
}
