//! The account service boundary and its wire types.
//!
//! Flows talk to the backend only through [`AccountService`]. The production
//! implementation is [`crate::HttpAccountService`]; tests plug in fakes.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::ServiceResult;

/// A user as returned by the login endpoint.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub id: i64,
    pub email: String,
    pub nickname: String,
    #[serde(default)]
    pub socialtype: Option<String>,
    #[serde(default)]
    pub socialid: Option<String>,
    #[serde(default)]
    pub createdat: Option<String>,
    #[serde(default)]
    pub updatedat: Option<String>,
}

/// Successful login payload.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct LoginResponse {
    pub token: String,
    pub user: User,
}

#[derive(Debug, Clone, Serialize)]
pub struct LoginRequest {
    pub email: String,
    pub passwd: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct RegisterRequest {
    pub email: String,
    pub passwd: String,
    pub nickname: String,
    pub socialtype: String,
    pub socialid: String,
}

impl RegisterRequest {
    /// Email/password sign-up; social login fields are fixed.
    pub fn local(email: &str, password: &str, nickname: &str) -> Self {
        Self {
            email: email.to_owned(),
            passwd: password.to_owned(),
            nickname: nickname.to_owned(),
            socialtype: "NONE".to_owned(),
            socialid: String::new(),
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct EmailRequest {
    pub email: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct CheckCodeRequest {
    pub email: String,
    pub code: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct CheckCodeResponse {
    pub valid: bool,
}

#[derive(Debug, Clone, Serialize)]
pub struct FindEmailRequest {
    pub nickname: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct FindEmailResponse {
    pub email: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct ResetPasswordRequest {
    pub email: String,
    pub code: String,
    #[serde(rename = "newPasswd")]
    pub new_passwd: String,
}

/// Backend operations used by the account flows.
///
/// Every failure carries a message that can be shown to the user verbatim.
#[async_trait]
pub trait AccountService: Send + Sync {
    async fn find_email_by_nickname(&self, nickname: &str) -> ServiceResult<String>;

    async fn send_verification_code(&self, email: &str) -> ServiceResult<()>;

    /// `Ok(false)` means the code was wrong or has expired server-side.
    async fn check_verification_code(&self, email: &str, code: &str) -> ServiceResult<bool>;

    async fn send_password_reset_code(&self, email: &str) -> ServiceResult<()>;

    async fn reset_password(&self, email: &str, code: &str, new_password: &str)
    -> ServiceResult<()>;

    async fn register(&self, email: &str, password: &str, nickname: &str) -> ServiceResult<()>;

    async fn login(&self, email: &str, password: &str) -> ServiceResult<LoginResponse>;
}
