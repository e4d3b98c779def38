use anyhow::Result;
use colored::Colorize;

use super::Context;
use super::utils::print_state;

pub fn run(context: &Context, json: bool) -> Result<()> {
    let portal = context.open_portal()?;

    if json {
        println!("{}", serde_json::to_string_pretty(&portal.snapshot())?);
        return Ok(());
    }

    print_state(&portal);
    if let Some(user) = portal.user() {
        for (key, value) in user.attributes() {
            println!("  {}: {}", key.dimmed(), value);
        }
    }
    Ok(())
}
