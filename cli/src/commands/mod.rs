//! Command implementations for the `tome` CLI.
//!
//! Each subcommand is implemented in its own module.

pub mod completions;
pub mod find_email;
pub mod login;
pub mod register;
pub mod reset_password;

pub use completions::generate_completions;
pub use find_email::run_find_email;
pub use login::{run_login, run_logout, run_status};
pub use register::run_register;
pub use reset_password::run_reset_password;
