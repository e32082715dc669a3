#![allow(clippy::unwrap_used)]
// Session token caching against a mocked door service.

mod common;

use std::sync::Arc;
use std::time::Duration;

use serde_json::json;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use doorsync_core::{CoreError, SessionManager};

use common::{credentials, myq_client, ok};

fn login_mock(token: &str) -> Mock {
    Mock::given(method("GET"))
        .and(path("/Membership/ValidateUserWithCulture"))
        .respond_with(ok(json!({ "SecurityToken": token })))
}

#[tokio::test]
async fn test_token_reused_within_window() {
    let server = MockServer::start().await;
    login_mock("tok-a").expect(1).mount(&server).await;

    let session = SessionManager::new(
        Arc::new(myq_client(&server)),
        credentials(),
        Duration::from_secs(1800),
    );

    let first = session.token().await.unwrap();
    let second = session.token().await.unwrap();
    assert_eq!(first, "tok-a");
    assert_eq!(first, second);
    assert!(session.expires_at().await.is_some());
}

#[tokio::test]
async fn test_expired_token_triggers_one_reauth() {
    let server = MockServer::start().await;
    login_mock("tok-a")
        .up_to_n_times(1)
        .expect(1)
        .mount(&server)
        .await;
    login_mock("tok-b").expect(1).mount(&server).await;

    let session = SessionManager::new(
        Arc::new(myq_client(&server)),
        credentials(),
        Duration::from_millis(200),
    );

    assert_eq!(session.token().await.unwrap(), "tok-a");
    assert_eq!(session.token().await.unwrap(), "tok-a");

    tokio::time::sleep(Duration::from_millis(300)).await;

    assert_eq!(session.token().await.unwrap(), "tok-b");
    assert_eq!(session.token().await.unwrap(), "tok-b");
}

#[tokio::test]
async fn test_zero_validity_authenticates_every_call() {
    let server = MockServer::start().await;
    login_mock("tok").expect(3).mount(&server).await;

    let session = SessionManager::new(Arc::new(myq_client(&server)), credentials(), Duration::ZERO);

    for _ in 0..3 {
        session.token().await.unwrap();
    }
}

#[tokio::test]
async fn test_failed_login_leaves_cache_empty_and_retries() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/Membership/ValidateUserWithCulture"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "ReturnCode": "203",
            "ErrorMessage": "The username or password you entered is incorrect."
        })))
        .up_to_n_times(1)
        .mount(&server)
        .await;
    login_mock("tok-ok").mount(&server).await;

    let session = SessionManager::new(
        Arc::new(myq_client(&server)),
        credentials(),
        Duration::from_secs(1800),
    );

    let err = session.token().await.unwrap_err();
    assert!(matches!(err, CoreError::AuthenticationFailure { .. }), "{err:?}");
    assert!(session.expires_at().await.is_none());

    assert_eq!(session.token().await.unwrap(), "tok-ok");
}

#[tokio::test]
async fn test_transport_failure_is_authentication_failure() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/Membership/ValidateUserWithCulture"))
        .respond_with(ResponseTemplate::new(502))
        .mount(&server)
        .await;

    let session = SessionManager::new(
        Arc::new(myq_client(&server)),
        credentials(),
        Duration::from_secs(1800),
    );

    assert!(matches!(
        session.token().await,
        Err(CoreError::AuthenticationFailure { .. })
    ));
}

#[tokio::test]
async fn test_concurrent_callers_share_one_login() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/Membership/ValidateUserWithCulture"))
        .respond_with(
            ok(json!({ "SecurityToken": "tok-a" })).set_delay(Duration::from_millis(100)),
        )
        .expect(1)
        .mount(&server)
        .await;

    let session = SessionManager::new(
        Arc::new(myq_client(&server)),
        credentials(),
        Duration::from_secs(1800),
    );

    let (a, b, c) = tokio::join!(session.token(), session.token(), session.token());
    assert_eq!(a.unwrap(), "tok-a");
    assert_eq!(b.unwrap(), "tok-a");
    assert_eq!(c.unwrap(), "tok-a");
}
