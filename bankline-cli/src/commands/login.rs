//! Login command - authenticate and store the session

use anyhow::Result;
use colored::Colorize;
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

    let response = with_spinner("Signing in...", || {
        ctx.auth_service.login(&username, &password)
    })?;

    if !response.success {
        fail_with(&response.message);
    }

    output::success(&response.message);
    println!("Logged in as {}.", username.bold());
    Ok(())
}
