//! Prompts
//!
//! Interactive terminal prompts for the dashboard menu.
//! Uses the `dialoguer` crate for input handling.

use anyhow::Result;
use colored::Colorize;
use dialoguer::Input;

/// Prompt the user for a required string value.
/// Repeats until a non-empty value is entered.
pub fn prompt_required(label: &str) -> Result<String> {
    loop {
        let value: String = Input::new()
            .with_prompt(format!("  {} {}", "\u{2192}".cyan(), label.white()))
            .allow_empty(true)
            .interact_text()?;

        let trimmed = value.trim().to_string();
        if !trimmed.is_empty() {
            return Ok(trimmed);
        }
        println!("{}", "  This field is required.".yellow());
    }
}

/// Wait for the user to press Enter before redrawing the dashboard.
pub fn pause() -> Result<()> {
    let _: String = Input::new()
        .with_prompt("  Press Enter to continue".dimmed().to_string())
        .allow_empty(true)
        .interact_text()?;
    Ok(())
}
