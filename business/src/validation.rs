//! Field validators shared by the registration, login and recovery flows.
//!
//! All validators are pure. They return `Ok(())` or one fixed message that the
//! presentation layer shows next to the field.

use std::sync::LazyLock;

use regex::Regex;

pub const INVALID_EMAIL: &str = "유효하지 않은 이메일 형식입니다.";
pub const INVALID_PASSWORD: &str = "비밀번호는 영문과 숫자를 포함하여 8자 이상이어야 합니다.";
pub const INVALID_NICKNAME: &str = "닉네임은 2~10자의 영문, 숫자, 한글만 가능합니다.";
pub const PASSWORD_MISMATCH: &str = "비밀번호가 일치하지 않습니다.";
pub const INVALID_VERIFICATION_CODE: &str = "인증 코드는 6자리 숫자여야 합니다.";

/// Length of the emailed verification code.
pub const VERIFICATION_CODE_LEN: usize = 6;

const MIN_PASSWORD_LEN: usize = 8;
const PASSWORD_SYMBOLS: &str = "@$!%*#?&";

static EMAIL_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").expect("email pattern compiles"));

static NICKNAME_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[a-zA-Z0-9가-힣]{2,10}$").expect("nickname pattern compiles"));

pub type Validation = Result<(), &'static str>;

/// Form fields that carry their own validation message.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Field {
    Email,
    Password,
    ConfirmPassword,
    Nickname,
    VerificationCode,
}

pub fn is_valid_email(value: &str) -> bool {
    EMAIL_RE.is_match(value)
}

/// At least 8 characters, one ASCII letter and one digit. Only ASCII
/// alphanumerics and `@$!%*#?&` are accepted.
pub fn is_valid_password(value: &str) -> bool {
    let allowed = value
        .chars()
        .all(|c| c.is_ascii_alphanumeric() || PASSWORD_SYMBOLS.contains(c));

    allowed
        && value.chars().count() >= MIN_PASSWORD_LEN
        && value.chars().any(|c| c.is_ascii_alphabetic())
        && value.chars().any(|c| c.is_ascii_digit())
}

pub fn is_valid_nickname(value: &str) -> bool {
    NICKNAME_RE.is_match(value)
}

pub fn validate_email(value: &str) -> Validation {
    if is_valid_email(value) {
        Ok(())
    } else {
        Err(INVALID_EMAIL)
    }
}

pub fn validate_password(value: &str) -> Validation {
    if is_valid_password(value) {
        Ok(())
    } else {
        Err(INVALID_PASSWORD)
    }
}

pub fn validate_nickname(value: &str) -> Validation {
    if is_valid_nickname(value) {
        Ok(())
    } else {
        Err(INVALID_NICKNAME)
    }
}

/// Compares against the password as it is right now. Later edits to the
/// primary password do not re-run this check.
pub fn validate_confirm_password(password: &str, confirm: &str) -> Validation {
    if password == confirm {
        Ok(())
    } else {
        Err(PASSWORD_MISMATCH)
    }
}

pub fn validate_verification_code(value: &str) -> Validation {
    if value.chars().count() == VERIFICATION_CODE_LEN {
        Ok(())
    } else {
        Err(INVALID_VERIFICATION_CODE)
    }
}

/// Runs the validator for `field`. `password` is the primary password, used
/// only by [`Field::ConfirmPassword`].
pub fn validate_field(field: Field, value: &str, password: &str) -> Validation {
    match field {
        Field::Email => validate_email(value),
        Field::Password => validate_password(value),
        Field::ConfirmPassword => validate_confirm_password(password, value),
        Field::Nickname => validate_nickname(value),
        Field::VerificationCode => validate_verification_code(value),
    }
}
