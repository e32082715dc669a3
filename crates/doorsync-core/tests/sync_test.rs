#![allow(clippy::unwrap_used)]
// Mirroring door state into controller variables.

mod common;

use std::sync::Arc;
use std::time::Duration;

use chrono::Utc;
use wiremock::matchers::{any, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use doorsync_core::{CoreError, Door, DoorState, SyncBridge};

use common::{PREFIX, definitions, definitions_mock, isy_client, isy_client_at, set_mock, var_mock};

fn door(name: &str, state: DoorState) -> Door {
    let now = Utc::now();
    Door {
        id: "42".into(),
        name: name.into(),
        state,
        changed_at: now,
        observed_at: now,
    }
}

fn bridge(server: &MockServer) -> SyncBridge {
    SyncBridge::new(Arc::new(isy_client(server)), PREFIX.into(), true)
}

#[tokio::test]
async fn test_writes_only_when_value_differs() {
    let server = MockServer::start().await;
    definitions_mock(&[("7", "garage_Main"), ("8", "garage_Side")])
        .expect(1)
        .mount(&server)
        .await;
    var_mock("7", 0).up_to_n_times(1).mount(&server).await;
    var_mock("7", 1).mount(&server).await;
    set_mock("7", 1, 200).expect(1).mount(&server).await;

    let sync = bridge(&server);
    let main = door("Main", DoorState::Open);

    assert!(sync.publish(&main).await.unwrap());
    assert!(sync.publish(&main).await.unwrap());
}

#[tokio::test]
async fn test_non_open_states_map_to_zero() {
    let server = MockServer::start().await;
    definitions_mock(&[("7", "garage_Main")]).mount(&server).await;
    var_mock("7", 1).mount(&server).await;
    set_mock("7", 0, 200).expect(1).mount(&server).await;

    let sync = bridge(&server);
    assert!(sync.publish(&door("Main", DoorState::Opening)).await.unwrap());
}

#[tokio::test]
async fn test_cached_binding_is_reused() {
    let server = MockServer::start().await;
    definitions_mock(&[("7", "garage_Main")])
        .expect(1)
        .mount(&server)
        .await;

    let sync = bridge(&server);
    assert_eq!(sync.bindings().resolve("Main").await.unwrap(), "7");
    assert_eq!(sync.bindings().resolve("Main").await.unwrap(), "7");
}

#[tokio::test]
async fn test_spaces_become_underscores_in_variable_name() {
    let server = MockServer::start().await;
    definitions_mock(&[("9", "garage_Main_Door")]).mount(&server).await;

    let sync = bridge(&server);
    assert_eq!(sync.bindings().variable_name("Main Door"), "garage_Main_Door");
    assert_eq!(sync.bindings().resolve("Main Door").await.unwrap(), "9");
}

#[tokio::test]
async fn test_missing_variable_is_binding_not_found() {
    let server = MockServer::start().await;
    definitions_mock(&[("7", "garage_Main")]).mount(&server).await;

    let sync = bridge(&server);
    let err = sync
        .publish(&door("Main Door", DoorState::Open))
        .await
        .unwrap_err();

    assert!(
        matches!(err, CoreError::BindingNotFound { ref variable } if variable == "garage_Main_Door"),
        "{err:?}"
    );
}

#[tokio::test]
async fn test_stale_binding_is_rebuilt_once() {
    let server = MockServer::start().await;
    definitions_mock(&[("7", "garage_Main")])
        .expect(2)
        .mount(&server)
        .await;
    var_mock("7", 0).mount(&server).await;
    set_mock("7", 1, 404).up_to_n_times(1).mount(&server).await;
    set_mock("7", 1, 200).mount(&server).await;

    let sync = bridge(&server);
    let main = door("Main", DoorState::Open);

    assert!(!sync.publish(&main).await.unwrap());
    assert!(sync.publish(&main).await.unwrap());
}

#[tokio::test]
async fn test_read_not_found_invalidates_binding() {
    let server = MockServer::start().await;
    definitions_mock(&[("7", "garage_Main")])
        .expect(2)
        .mount(&server)
        .await;
    Mock::given(wiremock::matchers::path("/rest/vars/get/2/7"))
        .respond_with(ResponseTemplate::new(404))
        .mount(&server)
        .await;

    let sync = bridge(&server);
    let main = door("Main", DoorState::Closed);

    assert!(!sync.publish(&main).await.unwrap());
    assert!(!sync.publish(&main).await.unwrap());
}

#[tokio::test]
async fn test_unexpected_status_reports_false() {
    let server = MockServer::start().await;
    definitions_mock(&[("7", "garage_Main")]).mount(&server).await;
    var_mock("7", 0).mount(&server).await;
    set_mock("7", 1, 500).expect(1).mount(&server).await;

    let sync = bridge(&server);
    assert!(!sync.publish(&door("Main", DoorState::Open)).await.unwrap());
}

#[tokio::test]
async fn test_malformed_variable_payload_reports_false() {
    let server = MockServer::start().await;
    definitions_mock(&[("7", "garage_Main")]).mount(&server).await;
    Mock::given(wiremock::matchers::path("/rest/vars/get/2/7"))
        .respond_with(ResponseTemplate::new(200).set_body_string("<var><val>oops"))
        .mount(&server)
        .await;

    let sync = bridge(&server);
    assert!(!sync.publish(&door("Main", DoorState::Open)).await.unwrap());
}

#[tokio::test]
async fn test_disabled_bridge_touches_nothing() {
    let server = MockServer::start().await;
    Mock::given(any())
        .respond_with(ResponseTemplate::new(500))
        .expect(0)
        .mount(&server)
        .await;

    let sync = SyncBridge::new(Arc::new(isy_client(&server)), PREFIX.into(), false);
    assert!(!sync.is_enabled());
    assert!(sync.publish(&door("Main", DoorState::Open)).await.unwrap());
}

#[tokio::test]
async fn test_unreachable_controller_is_an_error() {
    let sync = SyncBridge::new(
        Arc::new(isy_client_at("http://127.0.0.1:9")),
        PREFIX.into(),
        true,
    );

    let err = sync
        .publish(&door("Main", DoorState::Open))
        .await
        .unwrap_err();
    assert!(matches!(err, CoreError::ControllerUnreachable { .. }), "{err:?}");
    assert_eq!(err.code(), 2);
}

#[tokio::test]
async fn test_concurrent_misses_share_one_rebuild() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/rest/vars/definitions/2"))
        .respond_with(
            definitions(&[("7", "garage_Main"), ("8", "garage_Side")])
                .set_delay(Duration::from_millis(100)),
        )
        .expect(1)
        .mount(&server)
        .await;

    let sync = bridge(&server);
    let bindings = sync.bindings();

    let (main, side, again) = tokio::join!(
        bindings.resolve("Main"),
        bindings.resolve("Side"),
        bindings.resolve("Main")
    );
    assert_eq!(main.unwrap(), "7");
    assert_eq!(side.unwrap(), "8");
    assert_eq!(again.unwrap(), "7");
}
