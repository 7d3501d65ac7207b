//! The `tome` command-line client for To Me, Later accounts.

pub mod cli;
pub mod commands;
pub mod config;
pub mod context;
pub mod output;
pub mod prompt;
pub mod timing;
