//! Styled terminal output for the account commands.

use std::fmt::Display;

use console::{Term, style};
use tome_business::{AlertState, format_time};

/// Terminal output helper for consistent styled output.
pub struct Output {
    term: Term,
}

impl Default for Output {
    fn default() -> Self {
        Self::new()
    }
}

impl Output {
    pub fn new() -> Self {
        Self {
            term: Term::stdout(),
        }
    }

    fn line(&self, text: &str) {
        drop(self.term.write_line(text));
    }

    pub fn success(&self, message: impl Display) {
        self.line(&format!("{} {message}", style("✓").green().bold()));
    }

    pub fn error(&self, message: impl Display) {
        self.line(&format!("{} {message}", style("✗").red().bold()));
    }

    pub fn warning(&self, message: impl Display) {
        self.line(&format!("{} {message}", style("⚠").yellow().bold()));
    }

    pub fn info(&self, message: impl Display) {
        self.line(&format!("{} {message}", style("ℹ").blue().bold()));
    }

    pub fn newline(&self) {
        self.line("");
    }

    pub fn header(&self, message: impl Display) {
        self.line(&style(message).bold().cyan().to_string());
    }

    pub fn dim(&self, message: impl Display) {
        self.line(&style(message).dim().to_string());
    }

    /// Print a labeled value with indentation.
    pub fn labeled(&self, label: impl Display, value: impl Display) {
        self.line(&format!("  {}: {value}", style(label).dim()));
    }

    /// Validation message attached to one input.
    pub fn field_error(&self, message: impl Display) {
        self.line(&format!("  {}", style(message).red()));
    }

    /// Remaining code lifetime as `MM:SS`.
    pub fn countdown(&self, seconds: u32) {
        self.line(&countdown_line(seconds));
    }

    /// Renders an open alert as a boxed notice. Closed alerts print nothing.
    pub fn alert(&self, alert: &AlertState) {
        if !alert.is_open {
            return;
        }
        self.newline();
        self.line(&format!(
            "{} {}",
            style("■").green().bold(),
            style(&alert.title).bold()
        ));
        self.line(&format!("  {}", alert.message));
        self.newline();
    }
}

fn countdown_line(seconds: u32) -> String {
    if seconds == 0 {
        format!("{} {}", style("⏱").dim(), style("00:00").red())
    } else {
        format!("{} {}", style("⏱").dim(), style(format_time(seconds)).yellow())
    }
}
