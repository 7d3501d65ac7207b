#![allow(clippy::exit)]

use anyhow::Result;
use clap::Parser as _;
use tome_cli::cli::{Cli, Commands};
use tome_cli::commands::{
    generate_completions, run_find_email, run_login, run_logout, run_register,
    run_reset_password, run_status,
};
use tome_cli::context::AppContext;
use tome_cli::output::Output;
use tome_cli::timing::init_tracing;
use tracing::instrument;

#[tokio::main]
async fn main() {
    let cli = Cli::parse();
    init_tracing(cli.verbose, cli.timing);

    if let Err(err) = run(cli).await {
        Output::new().error(format!("{err:#}"));
        std::process::exit(1);
    }
}

#[instrument(skip_all, name = "tome")]
async fn run(cli: Cli) -> Result<()> {
    let context = || AppContext::from_env(cli.api_url.as_deref());

    match cli.command {
        Commands::Login { email } => run_login(context()?.service, email).await,
        Commands::Logout => run_logout(),
        Commands::Status => run_status(),
        Commands::Register => run_register(context()?.service).await,
        Commands::FindEmail { nickname } => run_find_email(context()?.service, nickname).await,
        Commands::ResetPassword { email } => run_reset_password(context()?.service, email).await,
        Commands::Completions { shell } => {
            generate_completions(shell);
            Ok(())
        }
    }
}
