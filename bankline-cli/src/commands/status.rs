//! Status command - session and backend status

use anyhow::Result;
use colored::Colorize;

use super::{get_bankline_dir, get_context};

pub fn run(json: bool) -> Result<()> {
    let ctx = get_context()?;

    let username = ctx.auth_service.current_user();

    if json {
        let status = serde_json::json!({
            "backendUrl": ctx.config.api_base_url,
            "banklineDir": get_bankline_dir(),
            "loggedIn": username.is_some(),
            "username": username,
        });
        println!("{}", serde_json::to_string_pretty(&status)?);
        return Ok(());
    }

    println!("Backend: {}", ctx.config.api_base_url);
    println!("Directory: {}", get_bankline_dir().display());
    match username {
        Some(name) => println!("Session: logged in as {}", name.bold()),
        None => println!("Session: {}", "not logged in".dimmed()),
    }

    Ok(())
}
