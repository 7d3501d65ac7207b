//! `tome reset-password`: request an emailed code and choose a new password.

use anyhow::{Result, bail};
use tome_business::{AccountService, RecoveryFlow, ResetStep, Route, Tab, Ticker};
use tracing::{info, instrument};

use crate::output::Output;
use crate::prompt;

/// `Request -> Verify`, re-prompting the email while it is rejected.
async fn request_code<S: AccountService>(
    out: &Output,
    flow: &mut RecoveryFlow<S>,
    mut preset: Option<String>,
) -> Result<()> {
    while flow.step() == ResetStep::Request {
        let email = prompt::text_or(preset.take(), "Email:", "A reset code will be sent here")?;
        flow.set_email(email);
        flow.send_reset_code().await;

        if let Some(message) = flow.state().error.clone() {
            out.error(message);
            if !prompt::confirm("Try again?", true)? {
                bail!("No reset code was sent");
            }
        }
    }

    out.alert(&flow.state().alert);
    flow.close_alert();
    Ok(())
}

#[instrument(skip_all, name = "reset_password")]
pub async fn run_reset_password<S: AccountService>(
    service: S,
    email: Option<String>,
) -> Result<()> {
    let out = Output::new();

    out.header("Reset your password");
    out.newline();

    let mut flow = RecoveryFlow::new(service);
    flow.set_active_tab(Tab::Password);

    request_code(&out, &mut flow, email).await?;
    let mut ticker = Ticker::spawn();

    loop {
        flow.advance(ticker.drain());

        if !flow.can_submit_reset() {
            out.warning("The reset code has expired.");
            if !prompt::confirm("Send a new code?", true)? {
                bail!("Password was not changed");
            }
            let email = flow.state().reset.email.clone();
            flow.back_to_request();
            request_code(&out, &mut flow, Some(email)).await?;
            ticker = Ticker::spawn();
            continue;
        }

        out.countdown(flow.time_left());
        let code = prompt::text("Reset code:", "From the email we just sent")?;
        let password = prompt::secret("New password:")?;
        let confirm = prompt::secret("Confirm new password:")?;

        // the countdown kept running while the prompts were open
        flow.advance(ticker.drain());
        if !flow.can_submit_reset() {
            continue;
        }

        flow.set_verification_code(code);
        flow.set_new_password(password);
        flow.set_confirm_new_password(confirm);
        flow.submit_reset().await;

        if flow.state().alert.is_open {
            break;
        }
        if let Some(message) = flow.state().error.clone() {
            out.error(message);
        }
    }

    info!(email = %flow.state().reset.email, "Password changed");
    out.alert(&flow.state().alert);
    if flow.close_alert() == Some(Route::Login) {
        out.dim("Use 'tome login' to sign in with your new password.");
    }
    Ok(())
}
