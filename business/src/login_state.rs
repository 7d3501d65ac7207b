//! Login form state and submission.
//!
//! It tracks:
//! - Email and password input
//! - Whether a login request is in flight
//! - The last error message
//!
//! A successful login writes the token and user into the [`Session`] handle
//! passed by the caller and asks for navigation to [`Route::Home`].

use log::{info, warn};

use crate::{AccountService, Route, Session};

/// Shown when no message is available for a failed login.
pub const LOGIN_FALLBACK_ERROR: &str = "Login failed";

#[derive(Debug, Clone, Default)]
pub struct LoginState {
    pub email: String,
    pub password: String,
    pub is_loading: bool,
    pub error: Option<String>,
}

pub struct LoginFlow<S> {
    service: S,
    state: LoginState,
}

impl<S: AccountService> LoginFlow<S> {
    pub fn new(service: S) -> Self {
        Self {
            service,
            state: LoginState::default(),
        }
    }

    pub fn state(&self) -> &LoginState {
        &self.state
    }

    pub fn set_email(&mut self, email: impl Into<String>) {
        self.state.email = email.into();
    }

    pub fn set_password(&mut self, password: impl Into<String>) {
        self.state.password = password.into();
    }

    /// Submits the credentials.
    ///
    /// Returns the route to navigate to on success. On failure the session is
    /// left untouched and the error is stored for display.
    pub async fn submit(&mut self, session: &Session) -> Option<Route> {
        self.state.error = None;
        self.state.is_loading = true;

        info!("LoginFlow: signing in '{}'", self.state.email);
        let result = self
            .service
            .login(&self.state.email, &self.state.password)
            .await;
        self.state.is_loading = false;

        match result {
            Ok(response) => {
                session.login(response.token, response.user);
                Some(Route::Home)
            }
            Err(err) => {
                warn!("LoginFlow: login failed ({})", err.kind());
                let message = err.into_message();
                self.state.error = Some(if message.is_empty() {
                    LOGIN_FALLBACK_ERROR.to_owned()
                } else {
                    message
                });
                None
            }
        }
    }
}

impl<S> std::fmt::Debug for LoginFlow<S> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LoginFlow")
            .field("email", &self.state.email)
            .field("is_loading", &self.state.is_loading)
            .field("error", &self.state.error)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ServiceError;
    use crate::account_api::LOGIN_FAILED;
    use crate::test_utils::{Call, FakeAccountService};

    #[tokio::test]
    async fn test_login_success_updates_session() {
        let service = FakeAccountService::new();
        let mut flow = LoginFlow::new(service.clone());
        let session = Session::new();

        flow.set_email("alice@example.com");
        flow.set_password("abc12345");
        let route = flow.submit(&session).await;

        assert_eq!(route, Some(Route::Home));
        assert!(!flow.state().is_loading);
        assert!(flow.state().error.is_none());
        assert_eq!(session.token().as_deref(), Some("jwt-token"));
        assert_eq!(
            service.calls(),
            vec![Call::Login {
                email: "alice@example.com".to_owned(),
                password: "abc12345".to_owned(),
            }]
        );
    }

    #[tokio::test]
    async fn test_login_failure_leaves_session_untouched() {
        let service = FakeAccountService::new();
        service.script_login(Err(ServiceError::InvalidCredentials(LOGIN_FAILED.to_owned())));
        let mut flow = LoginFlow::new(service);
        let session = Session::new();

        assert_eq!(flow.submit(&session).await, None);
        assert_eq!(flow.state().error.as_deref(), Some(LOGIN_FAILED));
        assert!(!session.is_authenticated());
    }

    #[tokio::test]
    async fn test_login_empty_message_uses_fallback() {
        let service = FakeAccountService::new();
        service.script_login(Err(ServiceError::Server(String::new())));
        let mut flow = LoginFlow::new(service);

        flow.submit(&Session::new()).await;
        assert_eq!(flow.state().error.as_deref(), Some(LOGIN_FALLBACK_ERROR));
    }

    #[tokio::test]
    async fn test_resubmit_clears_previous_error() {
        let service = FakeAccountService::new();
        service.script_login(Err(ServiceError::Network(LOGIN_FAILED.to_owned())));
        let mut flow = LoginFlow::new(service.clone());
        let session = Session::new();

        flow.submit(&session).await;
        assert!(flow.state().error.is_some());

        service.script_login(Ok(crate::account::LoginResponse {
            token: "t2".to_owned(),
            user: crate::test_utils::sample_user(),
        }));
        assert_eq!(flow.submit(&session).await, Some(Route::Home));
        assert!(flow.state().error.is_none());
        assert_eq!(session.token().as_deref(), Some("t2"));
    }
}
