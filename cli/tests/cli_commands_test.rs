//! CLI integration tests using mock servers.
//!
//! These tests don't spawn the binary; they run the same flows the commands
//! run, minus the prompts, against a wiremock backend.

use serde_json::json;
use tome_business::{BusinessConfig, LoginFlow, RecoveryFlow, Session};
use tome_cli::config::Config;
use tome_cli::context::AppContext;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

async fn context() -> (MockServer, AppContext) {
    let server = MockServer::start().await;
    let context = AppContext::new(BusinessConfig::new(server.uri())).expect("context should build");
    (server, context)
}

#[test]
fn test_api_url_override() {
    let context = AppContext::new(BusinessConfig::default().with_api_base_url("http://tome.test/"))
        .expect("context should build");
    assert_eq!(context.service.api_url(), "http://tome.test/api");
}

#[tokio::test]
async fn test_login_persists_session() {
    let (server, context) = context().await;
    Mock::given(method("POST"))
        .and(path("/api/auth/login"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "token": "jwt-token",
            "user": {"id": 1, "email": "alice@example.com", "nickname": "alice01"}
        })))
        .expect(1)
        .mount(&server)
        .await;

    let session = Session::new();
    let mut flow = LoginFlow::new(context.service);
    flow.set_email("alice@example.com");
    flow.set_password("abc12345");
    assert!(flow.submit(&session).await.is_some());

    let dir = tempfile::tempdir().expect("Should create temp dir");
    let config_path = dir.path().join("config.toml");

    let mut config = Config::load_from(&config_path).expect("Should load");
    config.store_session(&session);
    config.save_to(&config_path).expect("Should save");

    let saved = Config::load_from(&config_path).expect("Should load");
    assert_eq!(saved.auth.token.as_deref(), Some("jwt-token"));
    assert_eq!(saved.auth.nickname.as_deref(), Some("alice01"));

    let mut saved = saved;
    saved.clear_auth();
    saved.save_to(&config_path).expect("Should save");
    assert!(!Config::load_from(&config_path).expect("Should load").has_token());
}

#[tokio::test]
async fn test_failed_login_leaves_config_empty() {
    let (server, context) = context().await;
    Mock::given(method("POST"))
        .and(path("/api/auth/login"))
        .respond_with(ResponseTemplate::new(401))
        .mount(&server)
        .await;

    let session = Session::new();
    let mut flow = LoginFlow::new(context.service);
    flow.set_email("alice@example.com");
    flow.set_password("wrong");
    assert!(flow.submit(&session).await.is_none());

    let mut config = Config::default();
    config.store_session(&session);
    assert!(!config.has_token());
}

#[tokio::test]
async fn test_find_email_lookup() {
    let (server, context) = context().await;
    Mock::given(method("POST"))
        .and(path("/api/auth/find/email"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(json!({"email": "alice@example.com"})),
        )
        .mount(&server)
        .await;

    let mut flow = RecoveryFlow::new(context.service);
    flow.set_nickname("alice01");
    flow.submit_lookup().await;
    assert_eq!(
        flow.state().lookup.found_email.as_deref(),
        Some("alice@example.com")
    );
}
