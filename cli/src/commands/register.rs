//! `tome register`: sign-up with email verification.

use anyhow::{Result, bail};
use tome_business::validation::Field;
use tome_business::{AccountService, RegisterFlow, Route, Ticker};
use tracing::{info, instrument};

use crate::output::Output;
use crate::prompt;

const FORM_FIELDS: [Field; 4] = [
    Field::Nickname,
    Field::Email,
    Field::Password,
    Field::ConfirmPassword,
];

fn read_field(field: Field) -> Result<String> {
    match field {
        Field::Nickname => prompt::text("Nickname:", "2-10 letters, digits or Hangul"),
        Field::Email => prompt::text("Email:", "A verification code will be sent here"),
        Field::Password => prompt::secret("Password:"),
        Field::ConfirmPassword => prompt::secret("Confirm password:"),
        Field::VerificationCode => {
            prompt::text("Verification code:", "6 characters, from the email")
        }
    }
}

/// Prompts until `field` passes its validator.
fn prompt_field<S: AccountService>(
    out: &Output,
    flow: &mut RegisterFlow<S>,
    field: Field,
) -> Result<()> {
    loop {
        let value = read_field(field)?;
        flow.set_field(field, value);
        match flow.state().errors.get(field) {
            Some(message) => out.field_error(message),
            None => return Ok(()),
        }
    }
}

fn general_error<S: AccountService>(flow: &RegisterFlow<S>) -> Option<String> {
    flow.state().errors.general.clone()
}

/// Sends a code, re-prompting the email while it is rejected locally.
async fn send_code<S: AccountService>(out: &Output, flow: &mut RegisterFlow<S>) -> Result<()> {
    loop {
        flow.send_code().await;
        if let Some(message) = general_error(flow) {
            bail!(message);
        }
        if let Some(message) = flow.state().errors.email.clone() {
            out.field_error(message);
            prompt_field(out, flow, Field::Email)?;
            continue;
        }
        out.alert(&flow.state().alert);
        flow.close_alert();
        return Ok(());
    }
}

async fn verify_email<S: AccountService>(out: &Output, flow: &mut RegisterFlow<S>) -> Result<()> {
    send_code(out, flow).await?;
    let mut ticker = Ticker::spawn();

    loop {
        flow.advance(ticker.drain());

        if flow.time_left() == 0 {
            if let Some(message) = flow.state().errors.verification_code.clone() {
                out.field_error(message);
            }
            if !prompt::confirm("Send a new code?", true)? {
                bail!("Email verification was not completed");
            }
            send_code(out, flow).await?;
            ticker = Ticker::spawn();
            continue;
        }

        out.countdown(flow.time_left());
        let code = read_field(Field::VerificationCode)?;
        flow.advance(ticker.drain());
        flow.set_field(Field::VerificationCode, code);
        flow.verify_code().await;

        if flow.state().is_email_verified {
            out.alert(&flow.state().alert);
            flow.close_alert();
            return Ok(());
        }
        if let Some(message) = general_error(flow) {
            bail!(message);
        }
        if let Some(message) = flow.state().errors.verification_code.clone() {
            out.field_error(message);
        }
    }
}

#[instrument(skip_all, name = "register")]
pub async fn run_register<S: AccountService>(service: S) -> Result<()> {
    let out = Output::new();

    out.header("Create a To Me, Later account");
    out.newline();

    let mut flow = RegisterFlow::new(service);
    for field in FORM_FIELDS {
        prompt_field(&out, &mut flow, field)?;
    }

    verify_email(&out, &mut flow).await?;

    loop {
        flow.submit().await;
        if flow.state().alert.is_open {
            break;
        }
        if let Some(message) = general_error(&flow) {
            bail!(message);
        }
        for field in FORM_FIELDS {
            if let Some(message) = flow.state().errors.get(field) {
                out.field_error(message);
                prompt_field(&out, &mut flow, field)?;
            }
        }
    }

    info!(email = %flow.state().email, "Account created");
    out.alert(&flow.state().alert);
    if flow.close_alert() == Some(Route::Login) {
        out.dim("Use 'tome login' to sign in.");
    }
    Ok(())
}
