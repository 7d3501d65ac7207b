//! Interactive prompts.

use anyhow::{Context as _, Result};
use inquire::{Confirm, Password, PasswordDisplayMode, Text};

pub fn text(label: &str, help: &str) -> Result<String> {
    Text::new(label)
        .with_help_message(help)
        .prompt()
        .with_context(|| format!("Failed to read {label}"))
}

/// Masked input without a second confirmation prompt.
pub fn secret(label: &str) -> Result<String> {
    Password::new(label)
        .with_display_mode(PasswordDisplayMode::Masked)
        .without_confirmation()
        .prompt()
        .with_context(|| format!("Failed to read {label}"))
}

pub fn confirm(label: &str, default: bool) -> Result<bool> {
    Confirm::new(label)
        .with_default(default)
        .prompt()
        .with_context(|| format!("Failed to read {label}"))
}

/// Uses `preset` when given, otherwise prompts.
pub fn text_or(preset: Option<String>, label: &str, help: &str) -> Result<String> {
    match preset {
        Some(value) => Ok(value),
        None => text(label, help),
    }
}
