//! In-memory [`AccountService`] for flow unit tests.
//!
//! Each operation returns a scripted result (success by default) and every
//! call is recorded so tests can assert that validation failures never reach
//! the service.
//!
//! ```ignore
//! let service = FakeAccountService::new();
//! service.script_find_email(Err(ServiceError::NotFound("없음".into())));
//! let mut flow = RecoveryFlow::new(service.clone());
//! ```

#![cfg(test)]

use std::sync::{Arc, Mutex, PoisonError};

use async_trait::async_trait;

use crate::account::{AccountService, LoginResponse, User};
use crate::{ServiceError, ServiceResult};

/// One recorded call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Call {
    FindEmail(String),
    SendVerificationCode(String),
    CheckVerificationCode {
        email: String,
        code: String,
    },
    SendResetCode(String),
    ResetPassword {
        email: String,
        code: String,
        new_password: String,
    },
    Register {
        email: String,
        password: String,
        nickname: String,
    },
    Login {
        email: String,
        password: String,
    },
}

#[derive(Debug)]
struct Script {
    find_email: ServiceResult<String>,
    send_verification_code: ServiceResult<()>,
    check_verification_code: ServiceResult<bool>,
    send_reset_code: ServiceResult<()>,
    reset_password: ServiceResult<()>,
    register: ServiceResult<()>,
    login: ServiceResult<LoginResponse>,
}

impl Default for Script {
    fn default() -> Self {
        Self {
            find_email: Ok("alice@example.com".to_owned()),
            send_verification_code: Ok(()),
            check_verification_code: Ok(true),
            send_reset_code: Ok(()),
            reset_password: Ok(()),
            register: Ok(()),
            login: Ok(LoginResponse {
                token: "jwt-token".to_owned(),
                user: sample_user(),
            }),
        }
    }
}

#[derive(Debug, Default)]
struct Inner {
    script: Script,
    calls: Vec<Call>,
}

#[derive(Debug, Clone, Default)]
pub struct FakeAccountService {
    inner: Arc<Mutex<Inner>>,
}

pub fn sample_user() -> User {
    User {
        id: 1,
        email: "alice@example.com".to_owned(),
        nickname: "alice01".to_owned(),
        socialtype: Some("NONE".to_owned()),
        socialid: Some(String::new()),
        createdat: None,
        updatedat: None,
    }
}

impl FakeAccountService {
    pub fn new() -> Self {
        Self::default()
    }

    fn with<R>(&self, f: impl FnOnce(&mut Inner) -> R) -> R {
        let mut inner = self.inner.lock().unwrap_or_else(PoisonError::into_inner);
        f(&mut inner)
    }

    pub fn calls(&self) -> Vec<Call> {
        self.with(|inner| inner.calls.clone())
    }

    pub fn call_count(&self) -> usize {
        self.with(|inner| inner.calls.len())
    }

    pub fn script_find_email(&self, result: ServiceResult<String>) {
        self.with(|inner| inner.script.find_email = result);
    }

    pub fn script_send_verification_code(&self, result: ServiceResult<()>) {
        self.with(|inner| inner.script.send_verification_code = result);
    }

    pub fn script_check_verification_code(&self, result: ServiceResult<bool>) {
        self.with(|inner| inner.script.check_verification_code = result);
    }

    pub fn script_send_reset_code(&self, result: ServiceResult<()>) {
        self.with(|inner| inner.script.send_reset_code = result);
    }

    pub fn script_reset_password(&self, result: ServiceResult<()>) {
        self.with(|inner| inner.script.reset_password = result);
    }

    pub fn script_register(&self, result: ServiceResult<()>) {
        self.with(|inner| inner.script.register = result);
    }

    pub fn script_login(&self, result: ServiceResult<LoginResponse>) {
        self.with(|inner| inner.script.login = result);
    }

    fn record<T: Clone>(
        &self,
        call: Call,
        pick: impl FnOnce(&Script) -> &ServiceResult<T>,
    ) -> ServiceResult<T> {
        self.with(|inner| {
            inner.calls.push(call);
            pick(&inner.script).clone()
        })
    }
}

#[async_trait]
impl AccountService for FakeAccountService {
    async fn find_email_by_nickname(&self, nickname: &str) -> ServiceResult<String> {
        self.record(Call::FindEmail(nickname.to_owned()), |s| &s.find_email)
    }

    async fn send_verification_code(&self, email: &str) -> ServiceResult<()> {
        self.record(Call::SendVerificationCode(email.to_owned()), |s| {
            &s.send_verification_code
        })
    }

    async fn check_verification_code(&self, email: &str, code: &str) -> ServiceResult<bool> {
        let call = Call::CheckVerificationCode {
            email: email.to_owned(),
            code: code.to_owned(),
        };
        self.record(call, |s| &s.check_verification_code)
    }

    async fn send_password_reset_code(&self, email: &str) -> ServiceResult<()> {
        self.record(Call::SendResetCode(email.to_owned()), |s| &s.send_reset_code)
    }

    async fn reset_password(
        &self,
        email: &str,
        code: &str,
        new_password: &str,
    ) -> ServiceResult<()> {
        let call = Call::ResetPassword {
            email: email.to_owned(),
            code: code.to_owned(),
            new_password: new_password.to_owned(),
        };
        self.record(call, |s| &s.reset_password)
    }

    async fn register(&self, email: &str, password: &str, nickname: &str) -> ServiceResult<()> {
        let call = Call::Register {
            email: email.to_owned(),
            password: password.to_owned(),
            nickname: nickname.to_owned(),
        };
        self.record(call, |s| &s.register)
    }

    async fn login(&self, email: &str, password: &str) -> ServiceResult<LoginResponse> {
        let call = Call::Login {
            email: email.to_owned(),
            password: password.to_owned(),
        };
        self.record(call, |s| &s.login)
    }
}

/// Shorthand for a scripted network failure.
pub fn network_error(message: &str) -> ServiceError {
    ServiceError::Network(message.to_owned())
}
