//! Sign-up form with email verification.
//!
//! The user sends a code to their email, enters it before the countdown runs
//! out, then submits the rest of the form. Every field carries its own error
//! slot; collaborator failures land in `errors.general`.

use log::{info, warn};

use crate::countdown::{CODE_TTL_SECS, Countdown, TickOutcome};
use crate::validation::{
    Field, VERIFICATION_CODE_LEN, validate_confirm_password, validate_email, validate_field,
    validate_nickname, validate_password,
};
use crate::{AccountService, AlertAction, AlertState, Route};

pub const CODE_REQUIRED: &str = "인증 코드를 입력해주세요.";
pub const CODE_EXPIRED: &str = "인증 시간이 만료되었습니다. 다시 시도해주세요.";
pub const CODE_MISMATCH: &str = "인증 코드가 일치하지 않거나 만료되었습니다.";
pub const EMAIL_NOT_VERIFIED: &str = "이메일 인증을 완료해주세요.";
pub const REGISTER_FALLBACK_ERROR: &str = "회원가입에 실패했습니다.";

const CODE_SENT_TITLE: &str = "전송 완료";
const CODE_SENT_MESSAGE: &str = "인증 코드가 이메일로 발송되었습니다.";
const VERIFIED_TITLE: &str = "인증 성공";
const VERIFIED_MESSAGE: &str = "이메일 인증이 완료되었습니다.";
const WELCOME_TITLE: &str = "환영합니다!";
const WELCOME_MESSAGE: &str = "회원가입이 완료되었습니다. 로그인해주세요.";

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RegisterErrors {
    pub email: Option<String>,
    pub password: Option<String>,
    pub confirm_password: Option<String>,
    pub nickname: Option<String>,
    pub verification_code: Option<String>,
    pub general: Option<String>,
}

impl RegisterErrors {
    pub fn slot_mut(&mut self, field: Field) -> &mut Option<String> {
        match field {
            Field::Email => &mut self.email,
            Field::Password => &mut self.password,
            Field::ConfirmPassword => &mut self.confirm_password,
            Field::Nickname => &mut self.nickname,
            Field::VerificationCode => &mut self.verification_code,
        }
    }

    pub fn get(&self, field: Field) -> Option<&str> {
        match field {
            Field::Email => self.email.as_deref(),
            Field::Password => self.password.as_deref(),
            Field::ConfirmPassword => self.confirm_password.as_deref(),
            Field::Nickname => self.nickname.as_deref(),
            Field::VerificationCode => self.verification_code.as_deref(),
        }
    }

    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }
}

#[derive(Debug, Clone, Default)]
pub struct RegisterState {
    pub email: String,
    pub password: String,
    pub confirm_password: String,
    pub nickname: String,
    pub verification_code: String,
    pub is_email_sent: bool,
    pub is_email_verified: bool,
    pub is_sending_code: bool,
    pub is_verifying_code: bool,
    pub is_loading: bool,
    pub countdown: Countdown,
    pub errors: RegisterErrors,
    pub alert: AlertState,
}

impl RegisterState {
    pub fn time_left(&self) -> u32 {
        self.countdown.time_left()
    }

    fn value_mut(&mut self, field: Field) -> &mut String {
        match field {
            Field::Email => &mut self.email,
            Field::Password => &mut self.password,
            Field::ConfirmPassword => &mut self.confirm_password,
            Field::Nickname => &mut self.nickname,
            Field::VerificationCode => &mut self.verification_code,
        }
    }
}

pub struct RegisterFlow<S> {
    service: S,
    state: RegisterState,
}

impl<S: AccountService> RegisterFlow<S> {
    pub fn new(service: S) -> Self {
        Self {
            service,
            state: RegisterState::default(),
        }
    }

    pub fn state(&self) -> &RegisterState {
        &self.state
    }

    pub fn time_left(&self) -> u32 {
        self.state.time_left()
    }

    /// Stores `value` and validates it on the spot. Any general error is
    /// dismissed.
    pub fn set_field(&mut self, field: Field, value: impl Into<String>) {
        let value = value.into();
        let result = validate_field(field, &value, &self.state.password);
        *self.state.value_mut(field) = value;
        *self.state.errors.slot_mut(field) = result.err().map(str::to_owned);
        self.state.errors.general = None;
    }

    /// Emails a verification code and starts the countdown.
    pub async fn send_code(&mut self) {
        if let Err(msg) = validate_email(&self.state.email) {
            self.state.errors.email = Some(msg.to_owned());
            return;
        }

        self.state.is_sending_code = true;
        let result = self.service.send_verification_code(&self.state.email).await;
        self.state.is_sending_code = false;

        match result {
            Ok(()) => {
                info!("RegisterFlow: verification code sent to '{}'", self.state.email);
                self.state.is_email_sent = true;
                self.state.countdown.arm(CODE_TTL_SECS);
                self.state.alert.show(CODE_SENT_TITLE, CODE_SENT_MESSAGE);
            }
            Err(err) => {
                warn!("RegisterFlow: sending verification code failed ({})", err.kind());
                self.state.errors.general = Some(err.into_message());
            }
        }
    }

    /// Checks the entered code while the countdown is still running.
    pub async fn verify_code(&mut self) {
        if self.state.verification_code.chars().count() != VERIFICATION_CODE_LEN {
            self.state.errors.verification_code = Some(CODE_REQUIRED.to_owned());
            return;
        }
        if !self.state.countdown.is_running() {
            self.state.errors.verification_code = Some(CODE_EXPIRED.to_owned());
            return;
        }

        self.state.is_verifying_code = true;
        let result = self
            .service
            .check_verification_code(&self.state.email, &self.state.verification_code)
            .await;
        self.state.is_verifying_code = false;

        match result {
            Ok(true) => {
                info!("RegisterFlow: email '{}' verified", self.state.email);
                self.state.is_email_verified = true;
                self.state.countdown.disarm();
                self.state.alert.show(VERIFIED_TITLE, VERIFIED_MESSAGE);
            }
            Ok(false) => {
                self.state.errors.verification_code = Some(CODE_MISMATCH.to_owned());
            }
            Err(err) => {
                warn!("RegisterFlow: checking verification code failed ({})", err.kind());
                self.state.errors.general = Some(err.into_message());
            }
        }
    }

    /// Creates the account once the email is verified and every field passes.
    pub async fn submit(&mut self) {
        if !self.state.is_email_verified {
            self.state.errors.general = Some(EMAIL_NOT_VERIFIED.to_owned());
            return;
        }

        let state = &self.state;
        let errors = RegisterErrors {
            nickname: validate_nickname(&state.nickname).err().map(str::to_owned),
            email: validate_email(&state.email).err().map(str::to_owned),
            password: validate_password(&state.password).err().map(str::to_owned),
            confirm_password: validate_confirm_password(&state.password, &state.confirm_password)
                .err()
                .map(str::to_owned),
            verification_code: None,
            general: None,
        };
        let has_errors = !errors.is_empty();
        self.state.errors = errors;
        if has_errors {
            return;
        }

        self.state.is_loading = true;
        let result = self
            .service
            .register(&self.state.email, &self.state.password, &self.state.nickname)
            .await;
        self.state.is_loading = false;

        match result {
            Ok(()) => {
                info!("RegisterFlow: account created for '{}'", self.state.email);
                self.state.alert.show_then(
                    WELCOME_TITLE,
                    WELCOME_MESSAGE,
                    AlertAction::Navigate(Route::Login),
                );
            }
            Err(err) => {
                warn!("RegisterFlow: registration failed ({})", err.kind());
                let message = err.into_message();
                self.state.errors.general = Some(if message.is_empty() {
                    REGISTER_FALLBACK_ERROR.to_owned()
                } else {
                    message
                });
            }
        }
    }

    /// Applies one elapsed second. Running out before verification leaves an
    /// expiry message on the code field.
    pub fn tick(&mut self) -> TickOutcome {
        let outcome = self.state.countdown.tick();
        if outcome == TickOutcome::Expired
            && self.state.is_email_sent
            && !self.state.is_email_verified
        {
            info!("RegisterFlow: verification code expired");
            self.state.errors.verification_code = Some(CODE_EXPIRED.to_owned());
        }
        outcome
    }

    pub fn advance(&mut self, ticks: u32) {
        for _ in 0..ticks {
            self.tick();
        }
    }

    pub fn close_alert(&mut self) -> Option<Route> {
        self.state.alert.close().map(|AlertAction::Navigate(route)| route)
    }
}

impl<S> std::fmt::Debug for RegisterFlow<S> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RegisterFlow")
            .field("email", &self.state.email)
            .field("is_email_sent", &self.state.is_email_sent)
            .field("is_email_verified", &self.state.is_email_verified)
            .field("time_left", &self.state.time_left())
            .field("errors", &self.state.errors)
            .finish_non_exhaustive()
    }
}
