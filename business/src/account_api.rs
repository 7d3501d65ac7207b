//! HTTP implementation of [`AccountService`].
//!
//! Notes:
//! - Every call is a JSON `POST` under `{api_url}`.
//! - Non-2xx responses become a [`ServiceError`] whose variant follows the
//!   status code and whose message is taken from the body when the endpoint
//!   is known to send one, else the endpoint's default.
//! - Transport failures never leak `reqwest` text to the user; they carry the
//!   endpoint's default message and are logged in full.

use async_trait::async_trait;
use log::{error, info, warn};
use serde::Deserialize;

use crate::account::{
    AccountService, CheckCodeRequest, CheckCodeResponse, EmailRequest, FindEmailRequest,
    FindEmailResponse, LoginRequest, LoginResponse, RegisterRequest, ResetPasswordRequest,
};
use crate::http::{Client, HttpResult, Response};
use crate::{BusinessConfig, ServiceError, ServiceResult};

pub const LOGIN_FAILED: &str = "로그인에 실패했습니다. 아이디와 비밀번호를 확인해주세요.";
pub const REGISTER_FAILED: &str = "회원가입에 실패했습니다. 다시 시도해주세요.";
pub const SEND_CODE_FAILED: &str = "인증 코드 발송에 실패했습니다.";
pub const CHECK_CODE_FAILED: &str = "인증 코드 확인 중 오류가 발생했습니다.";
pub const FIND_EMAIL_FAILED: &str = "이메일 찾기에 실패했습니다.";
pub const RESET_PASSWORD_FAILED: &str = "비밀번호 변경에 실패했습니다.";

/// How an endpoint reports failure details in its body.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ErrorBody {
    /// Body is ignored; the default message is always used.
    Ignored,
    /// JSON `{ "error": "..." }`.
    ErrorField,
    /// Plain string, then `error`, then `message`.
    Lenient,
}

/// Per-endpoint error policy.
#[derive(Debug, Clone, Copy)]
struct Endpoint {
    path: &'static str,
    default_message: &'static str,
    body: ErrorBody,
    /// Variant used for a 400 response.
    bad_request: fn(String) -> ServiceError,
}

const LOGIN: Endpoint = Endpoint {
    path: "/auth/login",
    default_message: LOGIN_FAILED,
    body: ErrorBody::Ignored,
    bad_request: ServiceError::Validation,
};

const REGISTER: Endpoint = Endpoint {
    path: "/user",
    default_message: REGISTER_FAILED,
    body: ErrorBody::Lenient,
    bad_request: ServiceError::Validation,
};

const SEND_VERIFICATION_CODE: Endpoint = Endpoint {
    path: "/auth/verify/send",
    default_message: SEND_CODE_FAILED,
    body: ErrorBody::Ignored,
    bad_request: ServiceError::Validation,
};

const CHECK_VERIFICATION_CODE: Endpoint = Endpoint {
    path: "/auth/verify/check",
    default_message: CHECK_CODE_FAILED,
    body: ErrorBody::Ignored,
    bad_request: ServiceError::Validation,
};

const FIND_EMAIL: Endpoint = Endpoint {
    path: "/auth/find/email",
    default_message: FIND_EMAIL_FAILED,
    body: ErrorBody::ErrorField,
    bad_request: ServiceError::Validation,
};

const SEND_RESET_CODE: Endpoint = Endpoint {
    path: "/auth/password/code",
    default_message: SEND_CODE_FAILED,
    body: ErrorBody::ErrorField,
    bad_request: ServiceError::Validation,
};

const RESET_PASSWORD: Endpoint = Endpoint {
    path: "/auth/password/reset",
    default_message: RESET_PASSWORD_FAILED,
    body: ErrorBody::ErrorField,
    bad_request: ServiceError::InvalidCode,
};

#[derive(Debug, Deserialize)]
struct ErrorPayload {
    error: Option<String>,
    message: Option<String>,
}

impl Endpoint {
    fn message_from(&self, response: &Response) -> String {
        let non_empty = |s: &String| !s.trim().is_empty();

        let extracted = match self.body {
            ErrorBody::Ignored => None,
            ErrorBody::ErrorField => response
                .json::<ErrorPayload>()
                .ok()
                .and_then(|p| p.error)
                .filter(non_empty),
            ErrorBody::Lenient => match response.json::<serde_json::Value>() {
                Ok(serde_json::Value::String(text)) => Some(text).filter(non_empty),
                Ok(value) => serde_json::from_value::<ErrorPayload>(value)
                    .ok()
                    .and_then(|p| p.error.filter(non_empty).or(p.message))
                    .filter(non_empty),
                // Not JSON at all: a bare text body is the message itself.
                Err(_) => response.text().map(str::to_owned).filter(non_empty),
            },
        };

        extracted.unwrap_or_else(|| self.default_message.to_owned())
    }

    fn error_for(&self, response: &Response) -> ServiceError {
        let message = self.message_from(response);
        match response.status {
            400 => (self.bad_request)(message),
            401 => ServiceError::InvalidCredentials(message),
            404 => ServiceError::NotFound(message),
            409 => ServiceError::DuplicateEmail(message),
            410 => ServiceError::Expired(message),
            429 => ServiceError::RateLimited(message),
            _ => ServiceError::Server(message),
        }
    }

    /// Maps a transport result into a successful response or a service error.
    fn check(&self, result: HttpResult<Response>) -> ServiceResult<Response> {
        match result {
            Ok(response) if response.is_success() => Ok(response),
            Ok(response) => {
                let err = self.error_for(&response);
                warn!(
                    "POST {} failed with status {} ({}): {}",
                    self.path,
                    response.status,
                    err.kind(),
                    err
                );
                Err(err)
            }
            Err(e) => {
                error!("POST {} failed: {e}", self.path);
                Err(ServiceError::Network(self.default_message.to_owned()))
            }
        }
    }

    /// Parses a 2xx body, treating a malformed body as a server error.
    fn parse<T: serde::de::DeserializeOwned>(&self, response: &Response) -> ServiceResult<T> {
        response.json().map_err(|e| {
            error!("POST {}: failed to parse response: {e}", self.path);
            ServiceError::Server(self.default_message.to_owned())
        })
    }
}

/// [`AccountService`] backed by the REST API.
#[derive(Debug, Clone)]
pub struct HttpAccountService {
    client: Client,
}

impl HttpAccountService {
    pub fn new(config: &BusinessConfig) -> HttpResult<Self> {
        let client = Client::new(config.api_url(), config.request_timeout)?;
        Ok(Self { client })
    }

    pub fn api_url(&self) -> &str {
        self.client.api_url()
    }

    async fn post<B: serde::Serialize + Sync>(
        &self,
        endpoint: &Endpoint,
        body: &B,
    ) -> ServiceResult<Response> {
        let result = self.client.post_json(endpoint.path, body).await;
        endpoint.check(result)
    }
}

#[async_trait]
impl AccountService for HttpAccountService {
    async fn find_email_by_nickname(&self, nickname: &str) -> ServiceResult<String> {
        let body = FindEmailRequest {
            nickname: nickname.to_owned(),
        };
        let response = self.post(&FIND_EMAIL, &body).await?;
        let found: FindEmailResponse = FIND_EMAIL.parse(&response)?;
        info!("Found email for nickname '{nickname}'");
        Ok(found.email)
    }

    async fn send_verification_code(&self, email: &str) -> ServiceResult<()> {
        let body = EmailRequest {
            email: email.to_owned(),
        };
        self.post(&SEND_VERIFICATION_CODE, &body).await?;
        Ok(())
    }

    async fn check_verification_code(&self, email: &str, code: &str) -> ServiceResult<bool> {
        let body = CheckCodeRequest {
            email: email.to_owned(),
            code: code.to_owned(),
        };
        let response = self.post(&CHECK_VERIFICATION_CODE, &body).await?;
        let checked: CheckCodeResponse = CHECK_VERIFICATION_CODE.parse(&response)?;
        Ok(checked.valid)
    }

    async fn send_password_reset_code(&self, email: &str) -> ServiceResult<()> {
        let body = EmailRequest {
            email: email.to_owned(),
        };
        self.post(&SEND_RESET_CODE, &body).await?;
        Ok(())
    }

    async fn reset_password(
        &self,
        email: &str,
        code: &str,
        new_password: &str,
    ) -> ServiceResult<()> {
        let body = ResetPasswordRequest {
            email: email.to_owned(),
            code: code.to_owned(),
            new_passwd: new_password.to_owned(),
        };
        self.post(&RESET_PASSWORD, &body).await?;
        Ok(())
    }

    async fn register(&self, email: &str, password: &str, nickname: &str) -> ServiceResult<()> {
        let body = RegisterRequest::local(email, password, nickname);
        self.post(&REGISTER, &body).await?;
        Ok(())
    }

    async fn login(&self, email: &str, password: &str) -> ServiceResult<LoginResponse> {
        let body = LoginRequest {
            email: email.to_owned(),
            passwd: password.to_owned(),
        };
        let response = self.post(&LOGIN, &body).await?;
        LOGIN.parse(&response)
    }
}
