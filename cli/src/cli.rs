use clap::{Parser, Subcommand};
use clap_complete::Shell;

#[derive(Debug, Parser)]
#[command(name = "tome")]
#[command(about = "Account tools for To Me, Later", long_about = None, version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Base URL of the backend (the API lives under `/api`)
    #[arg(long, global = true, env = "TOME_API_BASE_URL")]
    pub api_url: Option<String>,

    /// Show timing/latency information
    #[arg(long, global = true)]
    pub timing: bool,

    /// Enable verbose debug output
    #[arg(long, short = 'v', global = true)]
    pub verbose: bool,
}

#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Sign in and save the session
    Login {
        /// Account email (prompted when omitted)
        #[arg(long, short = 'e')]
        email: Option<String>,
    },
    /// Forget the saved session
    Logout,
    /// Show the saved session
    Status,
    /// Create an account, verifying the email first
    Register,
    /// Look up the email registered under a nickname
    FindEmail {
        /// Nickname to look up (prompted when omitted)
        nickname: Option<String>,
    },
    /// Reset a forgotten password with an emailed code
    ResetPassword {
        /// Account email (prompted when omitted)
        #[arg(long, short = 'e')]
        email: Option<String>,
    },
    /// Generate shell completions
    Completions {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: Shell,
    },
}

#[cfg(test)]
mod tests {
    use clap::CommandFactory as _;

    use super::*;

    #[test]
    fn test_cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_global_flags_after_subcommand() {
        let cli = Cli::try_parse_from(["tome", "status", "-v", "--api-url", "http://x"])
            .expect("Should parse");
        assert!(cli.verbose);
        assert!(!cli.timing);
        assert_eq!(cli.api_url.as_deref(), Some("http://x"));
        assert!(matches!(cli.command, Commands::Status));
    }

    #[test]
    fn test_parse_find_email_nickname() {
        let cli = Cli::try_parse_from(["tome", "find-email", "alice01"]).expect("Should parse");
        match cli.command {
            Commands::FindEmail { nickname } => assert_eq!(nickname.as_deref(), Some("alice01")),
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn test_parse_reset_password_email() {
        let cli = Cli::try_parse_from(["tome", "reset-password", "-e", "bob@example.com"])
            .expect("Should parse");
        assert!(matches!(
            cli.command,
            Commands::ResetPassword { email: Some(ref e) } if e == "bob@example.com"
        ));
    }

    #[test]
    fn test_subcommand_is_required() {
        assert!(Cli::try_parse_from(["tome"]).is_err());
    }
}
