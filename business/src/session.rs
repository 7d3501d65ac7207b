//! Signed-in session shared between flows.
//!
//! The session is an explicit handle: whoever needs to read or clear it gets a
//! clone passed in. Clones share the same underlying state.

use std::sync::{Arc, PoisonError, RwLock};

use log::info;

use crate::User;

/// Current authentication status.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum SessionState {
    /// Nobody is signed in.
    #[default]
    Anonymous,
    /// Signed in with a bearer token.
    Authenticated { token: String, user: User },
}

impl SessionState {
    pub fn is_authenticated(&self) -> bool {
        matches!(self, Self::Authenticated { .. })
    }

    pub fn token(&self) -> Option<&str> {
        match self {
            Self::Authenticated { token, .. } => Some(token.as_str()),
            Self::Anonymous => None,
        }
    }

    pub fn user(&self) -> Option<&User> {
        match self {
            Self::Authenticated { user, .. } => Some(user),
            Self::Anonymous => None,
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct Session {
    inner: Arc<RwLock<SessionState>>,
}

impl Session {
    pub fn new() -> Self {
        Self::default()
    }

    /// Restores a session from a previously saved token.
    pub fn restore(token: String, user: User) -> Self {
        let session = Self::new();
        session.login(token, user);
        session
    }

    pub fn login(&self, token: String, user: User) {
        info!("Session: signed in as '{}'", user.nickname);
        *self.inner.write().unwrap_or_else(PoisonError::into_inner) =
            SessionState::Authenticated { token, user };
    }

    pub fn logout(&self) {
        info!("Session: signed out");
        *self.inner.write().unwrap_or_else(PoisonError::into_inner) = SessionState::Anonymous;
    }

    /// A copy of the current state.
    pub fn snapshot(&self) -> SessionState {
        self.inner
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    pub fn is_authenticated(&self) -> bool {
        self.inner
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .is_authenticated()
    }

    pub fn token(&self) -> Option<String> {
        self.inner
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .token()
            .map(str::to_owned)
    }

    pub fn user(&self) -> Option<User> {
        self.inner
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .user()
            .cloned()
    }
}
