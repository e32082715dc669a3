// Shared wiremock fixtures for the door service and the controller.
#![allow(dead_code, clippy::unwrap_used)]

use std::time::Duration;

use secrecy::SecretString;
use serde_json::{Value, json};
use url::Url;
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

use doorsync_api::{IsyClient, MyqClient};
use doorsync_core::{BridgeConfig, ControllerConfig, Credentials, DoorServiceConfig};

pub const TOKEN: &str = "tok-1";
pub const PREFIX: &str = "garage_";

// ── Clients & config ────────────────────────────────────────────────

pub fn myq_client(server: &MockServer) -> MyqClient {
    MyqClient::with_client(
        reqwest::Client::new(),
        Url::parse(&server.uri()).unwrap(),
        "test-app".into(),
        "en".into(),
    )
}

pub fn isy_client(server: &MockServer) -> IsyClient {
    isy_client_at(&server.uri())
}

pub fn isy_client_at(uri: &str) -> IsyClient {
    IsyClient::with_client(
        reqwest::Client::new(),
        Url::parse(uri).unwrap(),
        "admin".into(),
        SecretString::from("admin".to_string()),
    )
}

pub fn credentials() -> Credentials {
    Credentials {
        username: "alice".into(),
        password: SecretString::from("hunter2".to_string()),
    }
}

pub fn bridge_config(myq: &MockServer, isy: &MockServer, enabled: bool) -> BridgeConfig {
    BridgeConfig {
        door_service: DoorServiceConfig {
            base_url: Url::parse(&myq.uri()).unwrap(),
            app_id: "test-app".into(),
            culture: "en".into(),
            credentials: credentials(),
            session_validity: Duration::from_secs(1800),
        },
        controller: ControllerConfig {
            base_url: Url::parse(&isy.uri()).unwrap(),
            credentials: Credentials {
                username: "admin".into(),
                password: SecretString::from("admin".to_string()),
            },
            var_prefix: PREFIX.into(),
            enabled,
        },
        timeout: Duration::from_secs(5),
    }
}

// ── Door service fixtures ───────────────────────────────────────────

pub fn ok(body: Value) -> ResponseTemplate {
    let mut body = body;
    body["ReturnCode"] = json!("0");
    ResponseTemplate::new(200).set_body_json(body)
}

pub async fn mount_login(server: &MockServer, token: &str) {
    Mock::given(method("GET"))
        .and(path("/Membership/ValidateUserWithCulture"))
        .respond_with(ok(json!({ "SecurityToken": token })))
        .mount(server)
        .await;
}

pub fn door_device(id: u64, name: &str, code: u8, updated_ms: u64) -> Value {
    json!({
        "MyQDeviceTypeId": 2,
        "DeviceId": id,
        "Attributes": [
            { "AttributeDisplayName": "desc", "Value": name },
            {
                "AttributeDisplayName": "doorstate",
                "Value": code.to_string(),
                "UpdatedTime": updated_ms.to_string()
            }
        ]
    })
}

pub fn gateway_device(id: u64) -> Value {
    json!({
        "MyQDeviceTypeId": 1,
        "DeviceId": id,
        "Attributes": [{ "AttributeDisplayName": "desc", "Value": "Gateway" }]
    })
}

pub fn listing(devices: Vec<Value>) -> ResponseTemplate {
    ok(json!({ "Devices": devices }))
}

pub fn listing_mock(devices: Vec<Value>) -> Mock {
    Mock::given(method("GET"))
        .and(path("/api/UserDeviceDetails"))
        .respond_with(listing(devices))
}

pub fn state_mock(device_id: &str, code: u8, updated_ms: u64) -> Mock {
    Mock::given(method("GET"))
        .and(path("/Device/getDeviceAttribute"))
        .and(query_param("devId", device_id))
        .and(query_param("name", "doorstate"))
        .respond_with(ok(json!({
            "AttributeValue": code.to_string(),
            "UpdatedTime": updated_ms.to_string()
        })))
}

pub fn command_mock() -> Mock {
    Mock::given(method("PUT"))
        .and(path("/api/deviceattribute/putdeviceattribute"))
        .respond_with(ok(json!({})))
}

// ── Controller fixtures ─────────────────────────────────────────────

pub fn definitions(vars: &[(&str, &str)]) -> ResponseTemplate {
    let entries: String = vars
        .iter()
        .map(|(id, name)| format!(r#"<e id="{id}" name="{name}"/>"#))
        .collect();
    ResponseTemplate::new(200)
        .set_body_string(format!(r#"<CList type="VAR_STATE">{entries}</CList>"#))
}

pub fn definitions_mock(vars: &[(&str, &str)]) -> Mock {
    Mock::given(method("GET"))
        .and(path("/rest/vars/definitions/2"))
        .respond_with(definitions(vars))
}

pub fn var_mock(id: &str, val: i64) -> Mock {
    Mock::given(method("GET"))
        .and(path(format!("/rest/vars/get/2/{id}")))
        .respond_with(ResponseTemplate::new(200).set_body_string(format!(
            r#"<var type="2" id="{id}"><init>0</init><val>{val}</val><ts>20240101 10:00:00</ts></var>"#
        )))
}

pub fn set_mock(id: &str, value: i64, status: u16) -> Mock {
    Mock::given(method("GET"))
        .and(path(format!("/rest/vars/set/2/{id}/{value}")))
        .respond_with(ResponseTemplate::new(status))
}
