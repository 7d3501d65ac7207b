//! Account flows for To Me, Later: registration, login, and account recovery.
//!
//! Flows are plain state machines driven through `&mut self`. They reach the
//! backend only through [`AccountService`]; [`HttpAccountService`] is the REST
//! implementation.

mod account;
mod account_api;
mod alert;
mod config;
mod countdown;
mod error;
mod find_account;
pub mod http;
mod login_state;
mod register;
mod route;
mod session;
mod test_utils;
pub mod validation;

pub use account::{AccountService, LoginResponse, User};
pub use account_api::{
    CHECK_CODE_FAILED, FIND_EMAIL_FAILED, HttpAccountService, LOGIN_FAILED, REGISTER_FAILED,
    RESET_PASSWORD_FAILED, SEND_CODE_FAILED,
};
pub use alert::{AlertAction, AlertState};
pub use config::{BusinessConfig, ConfigError, DEFAULT_API_BASE_URL, DEFAULT_REQUEST_TIMEOUT};
pub use countdown::{CODE_TTL_SECS, Countdown, TICK_INTERVAL, TickOutcome, Ticker, format_time};
pub use error::{ServiceError, ServiceResult};
pub use find_account::{
    EmailLookupState, LookupPhase, NICKNAME_REQUIRED, RecoveryFlow, RecoveryState,
    ResetFlowState, ResetStep, Tab,
};
pub use login_state::{LOGIN_FALLBACK_ERROR, LoginFlow, LoginState};
pub use register::{
    CODE_EXPIRED, CODE_MISMATCH, CODE_REQUIRED, EMAIL_NOT_VERIFIED, REGISTER_FALLBACK_ERROR,
    RegisterErrors, RegisterFlow, RegisterState,
};
pub use route::Route;
pub use session::{Session, SessionState};
pub use validation::Field;
