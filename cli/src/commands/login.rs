//! `tome login`, `tome logout` and `tome status`.

use anyhow::{Result, bail};
use tome_business::{AccountService, LoginFlow, Session};
use tracing::{info, instrument};

use crate::config::Config;
use crate::output::Output;
use crate::prompt;

#[instrument(skip_all, name = "login")]
pub async fn run_login<S: AccountService>(service: S, email: Option<String>) -> Result<()> {
    let out = Output::new();

    out.header("Sign in to To Me, Later");
    out.newline();

    let email = prompt::text_or(email, "Email:", "The email you registered with")?;
    let password = prompt::secret("Password:")?;

    let session = Session::new();
    let mut flow = LoginFlow::new(service);
    flow.set_email(email);
    flow.set_password(password);

    if flow.submit(&session).await.is_none() {
        let message = flow.state().error.clone().unwrap_or_default();
        bail!("Login failed: {message}");
    }

    let mut config = Config::load()?;
    config.store_session(&session);
    let path = config.save()?;

    let nickname = session.user().map(|u| u.nickname).unwrap_or_default();
    info!("Signed in as {nickname}");
    out.success(format!("Signed in as {nickname}"));
    out.labeled("Session saved to", path.display());
    Ok(())
}

#[instrument(skip_all, name = "logout")]
pub fn run_logout() -> Result<()> {
    let out = Output::new();
    let mut config = Config::load()?;

    if !config.has_token() {
        out.info("Not currently signed in.");
        return Ok(());
    }

    let nickname = config.auth.nickname.clone().unwrap_or_default();
    config.clear_auth();
    let path = config.save()?;

    out.success(format!("Signed out {nickname}"));
    out.labeled("Credentials removed from", path.display());
    Ok(())
}

#[instrument(skip_all, name = "status")]
pub fn run_status() -> Result<()> {
    let out = Output::new();
    let config = Config::load()?;

    if !config.has_token() {
        out.info("Not signed in.");
        out.dim("Use 'tome login' to sign in.");
        return Ok(());
    }

    out.success("Signed in");
    if let Some(nickname) = &config.auth.nickname {
        out.labeled("Nickname", nickname);
    }
    if let Some(email) = &config.auth.email {
        out.labeled("Email", email);
    }
    out.labeled("Config file", Config::config_path()?.display());
    Ok(())
}
