//! `tome find-email`: look up the email registered under a nickname.

use anyhow::{Result, bail};
use tome_business::{AccountService, LookupPhase, RecoveryFlow};
use tracing::instrument;

use crate::output::Output;
use crate::prompt;

#[instrument(skip_all, name = "find_email")]
pub async fn run_find_email<S: AccountService>(
    service: S,
    nickname: Option<String>,
) -> Result<()> {
    let out = Output::new();

    out.header("Find your email");
    out.newline();

    let mut flow = RecoveryFlow::new(service);
    let mut preset = nickname;

    loop {
        let nickname =
            prompt::text_or(preset.take(), "Nickname:", "The nickname you signed up with")?;
        flow.set_nickname(nickname);
        flow.submit_lookup().await;

        if flow.lookup_phase() == LookupPhase::Result {
            break;
        }

        let message = flow.state().error.clone().unwrap_or_default();
        out.error(&message);
        if !prompt::confirm("Try another nickname?", true)? {
            bail!(message);
        }
        flow.reset_find_email_state();
    }

    let email = flow.state().lookup.found_email.clone().unwrap_or_default();
    out.success("Found your account");
    out.labeled("Email", email);
    Ok(())
}
