//! Logout command - drop the stored session

use anyhow::Result;

use super::get_context;
use crate::output;

pub fn run() -> Result<()> {
    let ctx = get_context()?;

    if ctx.auth_service.logout()? {
        output::success("Logged out.");
    } else {
        output::info("No active session.");
    }
    Ok(())
}
