//! Failures reported by the account service.
//!
//! Every variant carries a message that is shown to the user as-is. Flows only
//! distinguish success from failure; the variant is there for logging and for
//! callers outside the flows.

use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ServiceError {
    #[error("{0}")]
    NotFound(String),
    #[error("{0}")]
    RateLimited(String),
    #[error("{0}")]
    InvalidCode(String),
    #[error("{0}")]
    Expired(String),
    #[error("{0}")]
    DuplicateEmail(String),
    #[error("{0}")]
    Validation(String),
    #[error("{0}")]
    InvalidCredentials(String),
    #[error("{0}")]
    Server(String),
    #[error("{0}")]
    Network(String),
}

impl ServiceError {
    /// The user-facing message.
    pub fn message(&self) -> &str {
        match self {
            Self::NotFound(msg)
            | Self::RateLimited(msg)
            | Self::InvalidCode(msg)
            | Self::Expired(msg)
            | Self::DuplicateEmail(msg)
            | Self::Validation(msg)
            | Self::InvalidCredentials(msg)
            | Self::Server(msg)
            | Self::Network(msg) => msg,
        }
    }

    /// Short machine-friendly name of the variant, for log lines.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::NotFound(_) => "not_found",
            Self::RateLimited(_) => "rate_limited",
            Self::InvalidCode(_) => "invalid_code",
            Self::Expired(_) => "expired",
            Self::DuplicateEmail(_) => "duplicate_email",
            Self::Validation(_) => "validation",
            Self::InvalidCredentials(_) => "invalid_credentials",
            Self::Server(_) => "server",
            Self::Network(_) => "network",
        }
    }

    pub fn into_message(self) -> String {
        match self {
            Self::NotFound(msg)
            | Self::RateLimited(msg)
            | Self::InvalidCode(msg)
            | Self::Expired(msg)
            | Self::DuplicateEmail(msg)
            | Self::Validation(msg)
            | Self::InvalidCredentials(msg)
            | Self::Server(msg)
            | Self::Network(msg) => msg,
        }
    }
}

pub type ServiceResult<T> = Result<T, ServiceError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_is_the_message() {
        let err = ServiceError::NotFound("해당 닉네임의 사용자가 없습니다.".to_owned());
        assert_eq!(err.to_string(), "해당 닉네임의 사용자가 없습니다.");
        assert_eq!(err.message(), "해당 닉네임의 사용자가 없습니다.");
        assert_eq!(err.kind(), "not_found");
    }

    #[test]
    fn test_into_message() {
        let err = ServiceError::Network("인증 코드 발송에 실패했습니다.".to_owned());
        assert_eq!(err.into_message(), "인증 코드 발송에 실패했습니다.");
    }
}
