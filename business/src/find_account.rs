//! Account recovery: find a forgotten email, or reset the password.
//!
//! The flow has two tabs sharing one `error` slot and one alert:
//! - **Email**: nickname lookup. `Input` until a lookup succeeds, then
//!   `Result` until [`RecoveryFlow::reset_find_email_state`].
//! - **Password**: `Request` (ask for a reset code) then `Verify` (enter the
//!   code and a new password) while a five-minute countdown runs.
//!
//! Switching tabs keeps whatever was typed and does not stop the countdown.
//! The reset handler does not look at the countdown either: submission at
//! expiry is blocked by [`RecoveryFlow::can_submit_reset`] at the UI level,
//! and an expired code is otherwise left for the server to reject.

use log::{info, warn};

use crate::countdown::{CODE_TTL_SECS, Countdown, TickOutcome};
use crate::validation::{validate_confirm_password, validate_email, validate_password};
use crate::{AccountService, AlertAction, AlertState, Route};

pub const NICKNAME_REQUIRED: &str = "닉네임을 입력해주세요.";

const RESET_CODE_SENT_TITLE: &str = "전송 완료";
const RESET_CODE_SENT_MESSAGE: &str = "비밀번호 재설정 코드가 이메일로 발송되었습니다.";
const PASSWORD_CHANGED_TITLE: &str = "변경 완료";
const PASSWORD_CHANGED_MESSAGE: &str = "비밀번호가 성공적으로 변경되었습니다. 로그인해주세요.";

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Tab {
    #[default]
    Email,
    Password,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ResetStep {
    #[default]
    Request,
    Verify,
}

/// Phase of the find-email tab, derived from [`EmailLookupState::found_email`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LookupPhase {
    Input,
    Result,
}

#[derive(Debug, Clone, Default)]
pub struct EmailLookupState {
    pub nickname: String,
    pub found_email: Option<String>,
}

impl EmailLookupState {
    pub fn phase(&self) -> LookupPhase {
        if self.found_email.is_some() {
            LookupPhase::Result
        } else {
            LookupPhase::Input
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct ResetFlowState {
    pub step: ResetStep,
    pub email: String,
    pub verification_code: String,
    pub new_password: String,
    pub confirm_new_password: String,
    pub countdown: Countdown,
}

impl ResetFlowState {
    pub fn time_left(&self) -> u32 {
        self.countdown.time_left()
    }
}

/// Everything the recovery screen renders.
#[derive(Debug, Clone, Default)]
pub struct RecoveryState {
    pub active_tab: Tab,
    pub is_loading: bool,
    pub error: Option<String>,
    pub lookup: EmailLookupState,
    pub reset: ResetFlowState,
    pub alert: AlertState,
}

pub struct RecoveryFlow<S> {
    service: S,
    state: RecoveryState,
}

impl<S: AccountService> RecoveryFlow<S> {
    pub fn new(service: S) -> Self {
        Self {
            service,
            state: RecoveryState::default(),
        }
    }

    pub fn state(&self) -> &RecoveryState {
        &self.state
    }

    // =====================
    // Tabs
    // =====================

    pub fn set_active_tab(&mut self, tab: Tab) {
        self.state.active_tab = tab;
        self.state.error = None;
    }

    // =====================
    // Find email
    // =====================

    pub fn set_nickname(&mut self, nickname: impl Into<String>) {
        self.state.lookup.nickname = nickname.into();
    }

    pub fn lookup_phase(&self) -> LookupPhase {
        self.state.lookup.phase()
    }

    /// Looks up the email registered under the current nickname.
    pub async fn submit_lookup(&mut self) {
        self.state.error = None;

        if self.state.lookup.nickname.trim().is_empty() {
            self.state.error = Some(NICKNAME_REQUIRED.to_owned());
            return;
        }

        self.state.is_loading = true;
        let result = self
            .service
            .find_email_by_nickname(&self.state.lookup.nickname)
            .await;
        self.state.is_loading = false;

        match result {
            Ok(email) => {
                info!("RecoveryFlow: email found for '{}'", self.state.lookup.nickname);
                self.state.lookup.found_email = Some(email);
            }
            Err(err) => {
                warn!("RecoveryFlow: email lookup failed ({})", err.kind());
                self.state.error = Some(err.into_message());
            }
        }
    }

    /// Back to `Input` with an empty nickname.
    pub fn reset_find_email_state(&mut self) {
        self.state.lookup.found_email = None;
        self.state.lookup.nickname.clear();
    }

    // =====================
    // Reset password
    // =====================

    pub fn set_email(&mut self, email: impl Into<String>) {
        self.state.reset.email = email.into();
    }

    pub fn set_verification_code(&mut self, code: impl Into<String>) {
        self.state.reset.verification_code = code.into();
    }

    pub fn set_new_password(&mut self, password: impl Into<String>) {
        self.state.reset.new_password = password.into();
    }

    pub fn set_confirm_new_password(&mut self, password: impl Into<String>) {
        self.state.reset.confirm_new_password = password.into();
    }

    pub fn step(&self) -> ResetStep {
        self.state.reset.step
    }

    pub fn time_left(&self) -> u32 {
        self.state.reset.time_left()
    }

    /// New-password inputs exist only once a code has been issued.
    pub fn shows_password_inputs(&self) -> bool {
        self.state.reset.step == ResetStep::Verify
    }

    /// UI-level guard for the reset submit control.
    pub fn can_submit_reset(&self) -> bool {
        self.state.reset.step == ResetStep::Verify
            && self.state.reset.countdown.is_running()
            && !self.state.is_loading
    }

    /// `Request -> Verify`: asks the server to email a reset code.
    pub async fn send_reset_code(&mut self) {
        self.state.error = None;

        if let Err(msg) = validate_email(&self.state.reset.email) {
            self.state.error = Some(msg.to_owned());
            return;
        }

        self.state.is_loading = true;
        let result = self
            .service
            .send_password_reset_code(&self.state.reset.email)
            .await;
        self.state.is_loading = false;

        match result {
            Ok(()) => {
                info!("RecoveryFlow: reset code sent to '{}'", self.state.reset.email);
                self.state.reset.step = ResetStep::Verify;
                self.state.reset.countdown.arm(CODE_TTL_SECS);
                self.state
                    .alert
                    .show(RESET_CODE_SENT_TITLE, RESET_CODE_SENT_MESSAGE);
            }
            Err(err) => {
                warn!("RecoveryFlow: sending reset code failed ({})", err.kind());
                self.state.error = Some(err.into_message());
            }
        }
    }

    /// `Verify -> Request` ("change email"). Email and countdown are kept.
    pub fn back_to_request(&mut self) {
        self.state.reset.step = ResetStep::Request;
    }

    /// Submits the new password with the emailed code.
    ///
    /// The confirmation check runs before the strength check; either failure
    /// stops before any network call.
    pub async fn submit_reset(&mut self) {
        self.state.error = None;

        let reset = &self.state.reset;
        let checked =
            validate_confirm_password(&reset.new_password, &reset.confirm_new_password)
                .and_then(|()| validate_password(&reset.new_password));
        if let Err(msg) = checked {
            self.state.error = Some(msg.to_owned());
            return;
        }

        self.state.is_loading = true;
        let result = self
            .service
            .reset_password(&reset.email, &reset.verification_code, &reset.new_password)
            .await;
        self.state.is_loading = false;

        match result {
            Ok(()) => {
                if !self.state.reset.countdown.is_running() {
                    warn!(
                        "RecoveryFlow: password reset accepted after the local countdown ran out"
                    );
                }
                info!("RecoveryFlow: password reset for '{}'", self.state.reset.email);
                self.state.alert.show_then(
                    PASSWORD_CHANGED_TITLE,
                    PASSWORD_CHANGED_MESSAGE,
                    AlertAction::Navigate(Route::Login),
                );
            }
            Err(err) => {
                warn!("RecoveryFlow: password reset failed ({})", err.kind());
                self.state.error = Some(err.into_message());
            }
        }
    }

    // =====================
    // Countdown and alert
    // =====================

    /// Applies one elapsed second to the reset countdown.
    ///
    /// Expiry only disables submission; no message is produced.
    pub fn tick(&mut self) -> TickOutcome {
        let outcome = self.state.reset.countdown.tick();
        if outcome == TickOutcome::Expired {
            info!("RecoveryFlow: reset code countdown expired");
        }
        outcome
    }

    /// Applies `ticks` elapsed seconds.
    pub fn advance(&mut self, ticks: u32) {
        for _ in 0..ticks {
            self.tick();
        }
    }

    /// Closes the alert and returns the navigation it requested, if any.
    pub fn close_alert(&mut self) -> Option<Route> {
        self.state.alert.close().map(|AlertAction::Navigate(route)| route)
    }
}

impl<S> std::fmt::Debug for RecoveryFlow<S> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RecoveryFlow")
            .field("active_tab", &self.state.active_tab)
            .field("step", &self.state.reset.step)
            .field("time_left", &self.state.reset.time_left())
            .field("is_loading", &self.state.is_loading)
            .field("error", &self.state.error)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ServiceError;
    use crate::test_utils::{Call, FakeAccountService, network_error};
    use crate::validation::{INVALID_EMAIL, INVALID_PASSWORD, PASSWORD_MISMATCH};

    fn flow() -> (FakeAccountService, RecoveryFlow<FakeAccountService>) {
        let service = FakeAccountService::new();
        (service.clone(), RecoveryFlow::new(service))
    }

    async fn flow_in_verify() -> (FakeAccountService, RecoveryFlow<FakeAccountService>) {
        let (service, mut flow) = flow();
        flow.set_active_tab(Tab::Password);
        flow.set_email("bob@example.com");
        flow.send_reset_code().await;
        flow.close_alert();
        (service, flow)
    }

    #[test]
    fn test_initial_state() {
        let (_, flow) = flow();
        let state = flow.state();
        assert_eq!(state.active_tab, Tab::Email);
        assert_eq!(flow.lookup_phase(), LookupPhase::Input);
        assert_eq!(flow.step(), ResetStep::Request);
        assert_eq!(flow.time_left(), 0);
        assert!(!state.is_loading);
        assert!(state.error.is_none());
        assert!(!state.alert.is_open);
        assert!(!flow.shows_password_inputs());
        assert!(!flow.can_submit_reset());
    }

    #[tokio::test]
    async fn test_lookup_success_then_reset() {
        let (service, mut flow) = flow();
        flow.set_nickname("alice01");
        flow.submit_lookup().await;

        assert_eq!(flow.lookup_phase(), LookupPhase::Result);
        assert_eq!(
            flow.state().lookup.found_email.as_deref(),
            Some("alice@example.com")
        );
        assert_eq!(service.calls(), vec![Call::FindEmail("alice01".to_owned())]);

        flow.reset_find_email_state();
        assert_eq!(flow.lookup_phase(), LookupPhase::Input);
        assert!(flow.state().lookup.nickname.is_empty());
    }

    #[tokio::test]
    async fn test_lookup_not_found_keeps_input() {
        let (service, mut flow) = flow();
        service.script_find_email(Err(ServiceError::NotFound(
            "해당 닉네임으로 가입된 계정이 없습니다.".to_owned(),
        )));
        flow.set_nickname("ghost");
        flow.submit_lookup().await;

        assert_eq!(flow.lookup_phase(), LookupPhase::Input);
        assert_eq!(
            flow.state().error.as_deref(),
            Some("해당 닉네임으로 가입된 계정이 없습니다.")
        );
        assert!(!flow.state().is_loading);
    }

    #[tokio::test]
    async fn test_lookup_blank_nickname_is_rejected_locally() {
        let (service, mut flow) = flow();
        flow.set_nickname("   ");
        flow.submit_lookup().await;

        assert_eq!(flow.state().error.as_deref(), Some(NICKNAME_REQUIRED));
        assert_eq!(service.call_count(), 0);
    }

    #[tokio::test]
    async fn test_tab_switch_clears_error_only() {
        let (service, mut flow) = flow();
        service.script_find_email(Err(network_error("이메일 찾기에 실패했습니다.")));
        flow.set_nickname("alice01");
        flow.submit_lookup().await;
        assert!(flow.state().error.is_some());

        flow.set_active_tab(Tab::Password);
        assert!(flow.state().error.is_none());
        assert_eq!(flow.state().lookup.nickname, "alice01");
    }

    #[tokio::test]
    async fn test_send_reset_code_invalid_email() {
        let (service, mut flow) = flow();
        flow.set_email("not-an-email");
        flow.send_reset_code().await;

        assert_eq!(flow.state().error.as_deref(), Some(INVALID_EMAIL));
        assert_eq!(flow.step(), ResetStep::Request);
        assert_eq!(flow.time_left(), 0);
        assert_eq!(service.call_count(), 0);
    }

    #[tokio::test]
    async fn test_send_reset_code_success() {
        let (service, mut flow) = flow();
        flow.set_email("bob@example.com");
        flow.send_reset_code().await;

        assert_eq!(flow.step(), ResetStep::Verify);
        assert_eq!(flow.time_left(), CODE_TTL_SECS);
        assert!(flow.shows_password_inputs());
        assert!(flow.can_submit_reset());
        let alert = &flow.state().alert;
        assert!(alert.is_open);
        assert_eq!(alert.title, RESET_CODE_SENT_TITLE);
        assert_eq!(alert.message, RESET_CODE_SENT_MESSAGE);
        assert_eq!(flow.close_alert(), None);
        assert_eq!(
            service.calls(),
            vec![Call::SendResetCode("bob@example.com".to_owned())]
        );
    }

    #[tokio::test]
    async fn test_send_reset_code_failure_stays_in_request() {
        let (service, mut flow) = flow();
        service.script_send_reset_code(Err(ServiceError::RateLimited(
            "잠시 후 다시 시도해주세요.".to_owned(),
        )));
        flow.set_email("bob@example.com");
        flow.send_reset_code().await;

        assert_eq!(flow.step(), ResetStep::Request);
        assert_eq!(flow.time_left(), 0);
        assert_eq!(
            flow.state().error.as_deref(),
            Some("잠시 후 다시 시도해주세요.")
        );
    }

    #[tokio::test]
    async fn test_submit_reset_checks_mismatch_before_strength() {
        let (service, mut flow) = flow_in_verify().await;
        flow.set_verification_code("123456");
        flow.set_new_password("short");
        flow.set_confirm_new_password("other");
        flow.submit_reset().await;

        assert_eq!(flow.state().error.as_deref(), Some(PASSWORD_MISMATCH));
        assert_eq!(service.call_count(), 1);

        flow.set_confirm_new_password("short");
        flow.submit_reset().await;
        assert_eq!(flow.state().error.as_deref(), Some(INVALID_PASSWORD));
        assert_eq!(service.call_count(), 1);
    }

    #[tokio::test]
    async fn test_submit_reset_success_navigates_to_login() {
        let (service, mut flow) = flow_in_verify().await;
        flow.set_verification_code("123456");
        flow.set_new_password("abc12345");
        flow.set_confirm_new_password("abc12345");
        flow.submit_reset().await;

        assert!(flow.state().error.is_none());
        assert_eq!(flow.state().alert.title, PASSWORD_CHANGED_TITLE);
        assert_eq!(flow.close_alert(), Some(Route::Login));
        assert_eq!(
            service.calls().last(),
            Some(&Call::ResetPassword {
                email: "bob@example.com".to_owned(),
                code: "123456".to_owned(),
                new_password: "abc12345".to_owned(),
            })
        );
    }

    #[tokio::test]
    async fn test_submit_reset_server_rejection() {
        let (service, mut flow) = flow_in_verify().await;
        service.script_reset_password(Err(ServiceError::InvalidCode(
            "인증 코드가 올바르지 않습니다.".to_owned(),
        )));
        flow.set_verification_code("000000");
        flow.set_new_password("abc12345");
        flow.set_confirm_new_password("abc12345");
        flow.submit_reset().await;

        assert_eq!(
            flow.state().error.as_deref(),
            Some("인증 코드가 올바르지 않습니다.")
        );
        assert!(!flow.state().alert.is_open);
        assert_eq!(flow.step(), ResetStep::Verify);
    }

    #[tokio::test]
    async fn test_countdown_expiry_disables_submit_silently() {
        let (_, mut flow) = flow_in_verify().await;
        flow.advance(CODE_TTL_SECS - 1);
        assert_eq!(flow.time_left(), 1);
        assert!(flow.can_submit_reset());

        assert_eq!(flow.tick(), TickOutcome::Expired);
        assert_eq!(flow.time_left(), 0);
        assert!(!flow.can_submit_reset());
        assert!(flow.shows_password_inputs());
        assert!(flow.state().error.is_none());
        assert_eq!(flow.tick(), TickOutcome::Idle);
    }

    #[tokio::test]
    async fn test_submit_reset_after_expiry_is_left_to_the_server() {
        let (service, mut flow) = flow_in_verify().await;
        flow.advance(CODE_TTL_SECS);
        assert!(!flow.can_submit_reset());

        flow.set_verification_code("123456");
        flow.set_new_password("abc12345");
        flow.set_confirm_new_password("abc12345");
        flow.submit_reset().await;

        assert_eq!(
            service.calls().last(),
            Some(&Call::ResetPassword {
                email: "bob@example.com".to_owned(),
                code: "123456".to_owned(),
                new_password: "abc12345".to_owned(),
            })
        );
        assert!(flow.state().error.is_none());
        assert!(flow.state().alert.is_open);
        assert_eq!(flow.close_alert(), Some(Route::Login));
    }

    #[tokio::test]
    async fn test_back_to_request_keeps_email_and_countdown() {
        let (_, mut flow) = flow_in_verify().await;
        flow.advance(10);
        flow.back_to_request();

        assert_eq!(flow.step(), ResetStep::Request);
        assert_eq!(flow.state().reset.email, "bob@example.com");
        assert_eq!(flow.time_left(), CODE_TTL_SECS - 10);
        assert!(!flow.shows_password_inputs());
        assert!(!flow.can_submit_reset());
    }

    #[tokio::test]
    async fn test_resend_restarts_countdown() {
        let (_, mut flow) = flow_in_verify().await;
        flow.advance(100);
        flow.back_to_request();
        flow.send_reset_code().await;
        assert_eq!(flow.time_left(), CODE_TTL_SECS);
    }

    #[tokio::test]
    async fn test_tab_switch_keeps_countdown_running() {
        let (_, mut flow) = flow_in_verify().await;
        flow.set_active_tab(Tab::Email);
        flow.advance(5);
        flow.set_active_tab(Tab::Password);
        assert_eq!(flow.time_left(), CODE_TTL_SECS - 5);
        assert_eq!(flow.step(), ResetStep::Verify);
    }
}
