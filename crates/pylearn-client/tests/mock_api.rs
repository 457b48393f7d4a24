//! Mock backend tests for the pylearn client.
//!
//! These tests use wiremock to simulate the PyLearn API and verify the
//! refresh pipeline and auth state behavior without network access.

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use serde_json::json;
use wiremock::matchers::{any, body_json, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use pylearn_client::{ApiClient, AuthSession, SessionEvents};
use pylearn_core::error::{AuthError, Error};
use pylearn_core::models::User;
use pylearn_core::{
    AccessToken, BaseUrl, Credentials, MemoryTokenStore, RefreshToken, TokenPair, TokenSnapshot,
    TokenStore,
};

/// Helper to create a base URL from a mock server.
fn base_url(server: &MockServer) -> BaseUrl {
    BaseUrl::new(&format!("http://127.0.0.1:{}", server.address().port())).unwrap()
}

/// Helper to create an in-memory store seeded with tokens.
fn store_with(access: Option<&str>, refresh: Option<&str>) -> Arc<MemoryTokenStore> {
    Arc::new(MemoryTokenStore::with_tokens(TokenSnapshot {
        access: access.map(AccessToken::new),
        refresh: refresh.map(RefreshToken::new),
    }))
}

fn ada() -> serde_json::Value {
    json!({"id": 1, "username": "ada", "email": "ada@example.com"})
}

/// Event hook that records whether the session expired.
#[derive(Default)]
struct RecordingEvents {
    expired: AtomicBool,
}

impl SessionEvents for RecordingEvents {
    fn session_expired(&self) {
        self.expired.store(true, Ordering::SeqCst);
    }
}

// ============================================================================
// Refresh Pipeline Tests
// ============================================================================

#[tokio::test]
async fn test_success_passes_through_without_refresh() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/topics/"))
        .and(header("authorization", "Bearer access-1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([{
            "id": 1,
            "title": "Variables",
            "description": "",
            "order": 1,
            "is_unlocked": true,
            "is_completed": false,
            "questions_count": 5,
            "completed_count": 2
        }])))
        .expect(1)
        .mount(&server)
        .await;

    Mock::given(method("POST"))
        .and(path("/auth/refresh/"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&server)
        .await;

    let client = ApiClient::new(base_url(&server), store_with(Some("access-1"), Some("refresh-1")));
    let topics = client.topics().await.unwrap();

    assert_eq!(topics.len(), 1);
    assert_eq!(topics[0].title, "Variables");
}

#[tokio::test]
async fn test_non_401_error_passes_through_unchanged() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/topics/3/"))
        .respond_with(ResponseTemplate::new(403).set_body_json(json!({
            "error": "Topic is locked"
        })))
        .expect(1)
        .mount(&server)
        .await;

    Mock::given(method("POST"))
        .and(path("/auth/refresh/"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&server)
        .await;

    let client = ApiClient::new(base_url(&server), store_with(Some("access-1"), Some("refresh-1")));
    let err = client.topic(3).await.unwrap_err();

    match err {
        Error::Api(api) => {
            assert!(api.is_forbidden());
            assert_eq!(api.detail.as_deref(), Some("Topic is locked"));
        }
        other => panic!("expected API error, got {other:?}"),
    }
}

#[tokio::test]
async fn test_expired_access_refreshes_once_and_retries() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/auth/user/"))
        .and(header("authorization", "Bearer stale-access"))
        .respond_with(ResponseTemplate::new(401).set_body_json(json!({
            "detail": "Given token not valid for any token type"
        })))
        .expect(1)
        .mount(&server)
        .await;

    Mock::given(method("POST"))
        .and(path("/auth/refresh/"))
        .and(body_json(json!({"refresh": "refresh-1"})))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "access": "fresh-access"
        })))
        .expect(1)
        .mount(&server)
        .await;

    Mock::given(method("GET"))
        .and(path("/auth/user/"))
        .and(header("authorization", "Bearer fresh-access"))
        .respond_with(ResponseTemplate::new(200).set_body_json(ada()))
        .expect(1)
        .mount(&server)
        .await;

    let store = store_with(Some("stale-access"), Some("refresh-1"));
    let client = ApiClient::new(base_url(&server), store.clone());

    let user = client.current_user().await.unwrap();
    assert_eq!(user.username, "ada");

    // New access token persisted, refresh token untouched.
    let snapshot = store.read().unwrap();
    assert_eq!(snapshot.access.unwrap().as_str(), "fresh-access");
    assert_eq!(snapshot.refresh.unwrap().as_str(), "refresh-1");
}

#[tokio::test]
async fn test_rejected_refresh_clears_store_and_reports_refresh_failure() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/dashboard/"))
        .respond_with(ResponseTemplate::new(401).set_body_json(json!({
            "detail": "Given token not valid for any token type"
        })))
        .expect(1)
        .mount(&server)
        .await;

    Mock::given(method("POST"))
        .and(path("/auth/refresh/"))
        .respond_with(ResponseTemplate::new(401).set_body_json(json!({
            "detail": "Token is invalid or expired"
        })))
        .expect(1)
        .mount(&server)
        .await;

    let store = store_with(Some("stale-access"), Some("dead-refresh"));
    let events = Arc::new(RecordingEvents::default());
    let client = ApiClient::with_events(base_url(&server), store.clone(), events.clone());

    let err = client.dashboard().await.unwrap_err();

    // The caller sees the refresh failure, not the original 401.
    match err {
        Error::Auth(AuthError::RefreshRejected { source }) => match *source {
            Error::Api(api) => {
                assert_eq!(api.detail.as_deref(), Some("Token is invalid or expired"));
            }
            other => panic!("expected API error source, got {other:?}"),
        },
        other => panic!("expected refresh rejection, got {other:?}"),
    }

    assert!(store.read().unwrap().is_empty());
    assert!(events.expired.load(Ordering::SeqCst));
}

#[tokio::test]
async fn test_second_401_does_not_trigger_second_refresh() {
    let server = MockServer::start().await;

    // Unauthorized regardless of the token presented.
    Mock::given(method("GET"))
        .and(path("/dashboard/"))
        .respond_with(ResponseTemplate::new(401).set_body_json(json!({
            "detail": "User inactive or deleted"
        })))
        .expect(2)
        .mount(&server)
        .await;

    Mock::given(method("POST"))
        .and(path("/auth/refresh/"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "access": "fresh-access"
        })))
        .expect(1)
        .mount(&server)
        .await;

    let client = ApiClient::new(base_url(&server), store_with(Some("stale-access"), Some("refresh-1")));
    let err = client.dashboard().await.unwrap_err();

    // The retried call's 401 is final.
    match err {
        Error::Api(api) => assert!(api.is_unauthorized()),
        other => panic!("expected API error, got {other:?}"),
    }
}

#[tokio::test]
async fn test_401_without_refresh_token_propagates_original_error() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/auth/user/"))
        .respond_with(ResponseTemplate::new(401).set_body_json(json!({
            "detail": "Given token not valid for any token type"
        })))
        .expect(1)
        .mount(&server)
        .await;

    Mock::given(method("POST"))
        .and(path("/auth/refresh/"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&server)
        .await;

    let client = ApiClient::new(base_url(&server), store_with(Some("stale-access"), None));
    let err = client.current_user().await.unwrap_err();

    match err {
        Error::Api(api) => {
            assert!(api.is_unauthorized());
            assert_eq!(
                api.detail.as_deref(),
                Some("Given token not valid for any token type")
            );
        }
        other => panic!("expected API error, got {other:?}"),
    }
}

#[tokio::test]
async fn test_concurrent_401s_share_one_refresh() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/auth/user/"))
        .and(header("authorization", "Bearer stale-access"))
        .respond_with(ResponseTemplate::new(401).set_body_json(json!({
            "detail": "Given token not valid for any token type"
        })))
        .expect(2)
        .mount(&server)
        .await;

    // The gate must collapse both recoveries into a single refresh call.
    Mock::given(method("POST"))
        .and(path("/auth/refresh/"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "access": "fresh-access"
        })))
        .expect(1)
        .mount(&server)
        .await;

    Mock::given(method("GET"))
        .and(path("/auth/user/"))
        .and(header("authorization", "Bearer fresh-access"))
        .respond_with(ResponseTemplate::new(200).set_body_json(ada()))
        .expect(2)
        .mount(&server)
        .await;

    let client = ApiClient::new(base_url(&server), store_with(Some("stale-access"), Some("refresh-1")));

    let (a, b) = tokio::join!(client.current_user(), client.current_user());
    assert_eq!(a.unwrap().username, "ada");
    assert_eq!(b.unwrap().username, "ada");
}

// ============================================================================
// Auth Endpoint Tests
// ============================================================================

#[tokio::test]
async fn test_login_returns_issued_pair_without_storing_it() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/auth/login/"))
        .and(body_json(json!({"username": "ada", "password": "hunter2"})))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "access": "access-1",
            "refresh": "refresh-1"
        })))
        .mount(&server)
        .await;

    let store = store_with(None, None);
    let client = ApiClient::new(base_url(&server), store.clone());

    let pair = client.login(&Credentials::new("ada", "hunter2")).await.unwrap();
    assert_eq!(pair.access.as_str(), "access-1");
    assert_eq!(pair.refresh.as_str(), "refresh-1");

    // Login itself leaves the store untouched.
    assert!(store.read().unwrap().is_empty());
}

#[tokio::test]
async fn test_login_with_bad_password_reports_invalid_credentials() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/auth/login/"))
        .respond_with(ResponseTemplate::new(401).set_body_json(json!({
            "detail": "No active account found with the given credentials"
        })))
        .mount(&server)
        .await;

    let client = ApiClient::new(base_url(&server), store_with(None, None));
    let err = client.login(&Credentials::new("ada", "wrong")).await.unwrap_err();

    assert!(matches!(err, Error::Auth(AuthError::InvalidCredentials)));
}

#[tokio::test]
async fn test_register_returns_user_and_tokens() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/auth/register/"))
        .and(body_json(json!({
            "username": "ada",
            "email": "ada@example.com",
            "password": "hunter22",
            "password2": "hunter22"
        })))
        .respond_with(ResponseTemplate::new(201).set_body_json(json!({
            "message": "Registration successful",
            "user": ada(),
            "tokens": {"access": "access-1", "refresh": "refresh-1"}
        })))
        .mount(&server)
        .await;

    let client = ApiClient::new(base_url(&server), store_with(None, None));
    let account =
        pylearn_core::NewAccount::new("ada", "ada@example.com", "hunter22", "hunter22");

    let output = client.register(&account).await.unwrap();
    assert_eq!(output.user.id, 1);
    assert_eq!(output.tokens.access.as_str(), "access-1");
}

#[tokio::test]
async fn test_register_surfaces_field_errors() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/auth/register/"))
        .respond_with(ResponseTemplate::new(400).set_body_json(json!({
            "password": ["Passwords do not match"],
            "username": ["A user with that username already exists."]
        })))
        .mount(&server)
        .await;

    let client = ApiClient::new(base_url(&server), store_with(None, None));
    let account = pylearn_core::NewAccount::new("ada", "ada@example.com", "a", "b");

    let err = client.register(&account).await.unwrap_err();
    match err {
        Error::Api(api) => {
            assert_eq!(api.status, 400);
            assert_eq!(
                api.field_errors["password"],
                vec!["Passwords do not match".to_string()]
            );
            assert_eq!(api.field_errors.len(), 2);
        }
        other => panic!("expected API error, got {other:?}"),
    }
}

// ============================================================================
// Grading Tests
// ============================================================================

#[tokio::test]
async fn test_run_code_returns_execution_error() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/run-code/"))
        .and(body_json(json!({"code": "pront('hi')"})))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "output": null,
            "error": "NameError: name 'pront' is not defined"
        })))
        .mount(&server)
        .await;

    let client = ApiClient::new(base_url(&server), store_with(Some("access-1"), Some("refresh-1")));
    let result = client.run_code("pront('hi')").await.unwrap();

    assert!(result.output.is_none());
    assert!(result.error.unwrap().contains("NameError"));
}

#[tokio::test]
async fn test_submit_reports_grading_outcome() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/submit/7/"))
        .and(body_json(json!({"code": "print(1)"})))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "passed": false,
            "output": "1",
            "expected": "1\n2\n3",
            "message": "Output does not match expected result",
            "missing_keywords": ["for", "range"]
        })))
        .mount(&server)
        .await;

    let client = ApiClient::new(base_url(&server), store_with(Some("access-1"), Some("refresh-1")));
    let result = client.submit_code(7, "print(1)").await.unwrap();

    assert!(!result.passed);
    assert_eq!(result.expected, "1\n2\n3");
    assert_eq!(
        result.missing_keywords,
        Some(vec!["for".to_string(), "range".to_string()])
    );
    assert_eq!(result.topic_completed, None);
}

// ============================================================================
// Auth Session Tests
// ============================================================================

#[tokio::test]
async fn test_bootstrap_without_token_makes_no_network_call() {
    let server = MockServer::start().await;

    Mock::given(any()).respond_with(ResponseTemplate::new(200)).expect(0).mount(&server).await;

    let session = AuthSession::new(ApiClient::new(base_url(&server), store_with(None, None)));
    assert!(session.is_loading());

    session.bootstrap().await.unwrap();

    assert!(!session.is_loading());
    assert!(!session.is_authenticated());
    assert!(session.current_user().is_none());
}

#[tokio::test]
async fn test_bootstrap_with_valid_token_authenticates() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/auth/user/"))
        .and(header("authorization", "Bearer access-1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(ada()))
        .mount(&server)
        .await;

    let session = AuthSession::new(ApiClient::new(
        base_url(&server),
        store_with(Some("access-1"), Some("refresh-1")),
    ));
    session.bootstrap().await.unwrap();

    assert!(session.is_authenticated());
    assert!(!session.is_loading());
    let user = session.current_user().unwrap();
    assert_eq!((user.id, user.username.as_str()), (1, "ada"));
}

#[tokio::test]
async fn test_bootstrap_refreshes_expired_access_token() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/auth/user/"))
        .and(header("authorization", "Bearer stale-access"))
        .respond_with(ResponseTemplate::new(401).set_body_json(json!({
            "detail": "Given token not valid for any token type"
        })))
        .expect(1)
        .mount(&server)
        .await;

    Mock::given(method("POST"))
        .and(path("/auth/refresh/"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "access": "fresh-access"
        })))
        .expect(1)
        .mount(&server)
        .await;

    Mock::given(method("GET"))
        .and(path("/auth/user/"))
        .and(header("authorization", "Bearer fresh-access"))
        .respond_with(ResponseTemplate::new(200).set_body_json(ada()))
        .expect(1)
        .mount(&server)
        .await;

    let session = AuthSession::new(ApiClient::new(
        base_url(&server),
        store_with(Some("stale-access"), Some("refresh-1")),
    ));
    session.bootstrap().await.unwrap();

    assert!(session.is_authenticated());
}

#[tokio::test]
async fn test_bootstrap_with_invalid_tokens_becomes_anonymous() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/auth/user/"))
        .respond_with(ResponseTemplate::new(401).set_body_json(json!({
            "detail": "Given token not valid for any token type"
        })))
        .mount(&server)
        .await;

    Mock::given(method("POST"))
        .and(path("/auth/refresh/"))
        .respond_with(ResponseTemplate::new(401).set_body_json(json!({
            "detail": "Token is invalid or expired"
        })))
        .mount(&server)
        .await;

    let store = store_with(Some("stale-access"), Some("dead-refresh"));
    let session = AuthSession::new(ApiClient::new(base_url(&server), store.clone()));

    // Bootstrap settles to Anonymous rather than failing.
    session.bootstrap().await.unwrap();

    assert!(!session.is_authenticated());
    assert!(!session.is_loading());
    assert!(store.read().unwrap().is_empty());
}

#[tokio::test]
async fn test_login_persists_pair_and_authenticates() {
    let server = MockServer::start().await;

    let store = store_with(None, None);
    let session = AuthSession::new(ApiClient::new(base_url(&server), store.clone()));

    let user: User = serde_json::from_value(ada()).unwrap();
    let pair = TokenPair::new(AccessToken::new("access-1"), RefreshToken::new("refresh-1"));
    session.login(user, &pair).unwrap();

    assert!(session.is_authenticated());
    let snapshot = store.read().unwrap();
    assert_eq!(snapshot.access.unwrap().as_str(), "access-1");
    assert_eq!(snapshot.refresh.unwrap().as_str(), "refresh-1");
}

#[tokio::test]
async fn test_logout_twice_is_idempotent() {
    let server = MockServer::start().await;

    let store = store_with(Some("access-1"), Some("refresh-1"));
    let session = AuthSession::new(ApiClient::new(base_url(&server), store.clone()));

    session.logout().unwrap();
    assert!(store.read().unwrap().is_empty());
    assert!(!session.is_authenticated());

    session.logout().unwrap();
    assert!(store.read().unwrap().is_empty());
    assert!(!session.is_authenticated());
}
