//! HTTP bridge

mod api;

use axum::{Router, routing::get};
use tokio::net::TcpListener;
use tower_http::trace::TraceLayer;
use tracing::{error, info};

use doorsync_core::DoorBridge;

use crate::error::CliError;

/// Create the HTTP router with all routes configured
pub fn create_router(bridge: DoorBridge) -> Router {
    Router::new()
        .route("/doors", get(api::list_doors))
        .route("/doors/", get(api::list_doors))
        .route("/doors/:name", get(api::door_status))
        .route("/doors/:name/:action", get(api::door_action))
        .layer(TraceLayer::new_for_http())
        .with_state(bridge)
}

/// Load the door registry, then serve until Ctrl-C.
///
/// A registry that cannot be loaded aborts startup before binding.
pub async fn run(bridge: DoorBridge, addr: &str) -> Result<(), CliError> {
    match bridge.warm_up().await {
        Ok(count) => info!(doors = count, "door registry ready"),
        Err(source) => {
            error!(error = %source, "door registry failed to load");
            return Err(CliError::Startup { source });
        }
    }

    let listener = TcpListener::bind(addr)
        .await
        .map_err(|source| CliError::Bind {
            addr: addr.to_owned(),
            source,
        })?;

    info!("doorsync listening on {addr}");

    axum::serve(listener, create_router(bridge))
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("doorsync stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        error!(error = %e, "failed to install Ctrl-C handler");
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]

    use super::*;
    use axum::http::StatusCode;
    use axum_test::TestServer;
    use serde_json::{Value, json};
    use wiremock::matchers::{method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    use doorsync_config::Config;

    fn ok(mut body: Value) -> ResponseTemplate {
        body["ReturnCode"] = json!("0");
        ResponseTemplate::new(200).set_body_json(body)
    }

    struct Fixture {
        myq: MockServer,
        _isy: MockServer,
        server: TestServer,
    }

    /// One closed door "Main" (id 42) bound to controller variable 7 = 0.
    async fn fixture() -> Fixture {
        let myq = MockServer::start().await;
        let isy = MockServer::start().await;

        Mock::given(path("/Membership/ValidateUserWithCulture"))
            .respond_with(ok(json!({ "SecurityToken": "tok" })))
            .mount(&myq)
            .await;
        Mock::given(path("/api/UserDeviceDetails"))
            .respond_with(ok(json!({
                "Devices": [{
                    "MyQDeviceTypeId": 2,
                    "DeviceId": 42,
                    "Attributes": [
                        { "AttributeDisplayName": "desc", "Value": "Main" },
                        { "AttributeDisplayName": "doorstate", "Value": "2", "UpdatedTime": "1000" }
                    ]
                }]
            })))
            .mount(&myq)
            .await;
        Mock::given(path("/Device/getDeviceAttribute"))
            .and(query_param("name", "doorstate"))
            .respond_with(ok(json!({ "AttributeValue": "2", "UpdatedTime": "1000" })))
            .mount(&myq)
            .await;

        Mock::given(path("/rest/vars/definitions/2"))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_string(r#"<CList type="VAR_STATE"><e id="7" name="garage_Main"/></CList>"#),
            )
            .mount(&isy)
            .await;
        Mock::given(path("/rest/vars/get/2/7"))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_string(r#"<var type="2" id="7"><init>0</init><val>0</val></var>"#),
            )
            .mount(&isy)
            .await;

        let mut cfg = Config::default();
        cfg.door_service.username = Some("alice".into());
        cfg.door_service.password = Some("pw".into());
        cfg.door_service.base_url = myq.uri();
        cfg.controller.host = Some(isy.uri());
        cfg.controller.username = Some("admin".into());
        cfg.controller.password = Some("admin".into());
        cfg.controller.var_prefix = "garage_".into();

        let bridge = DoorBridge::new(&cfg.to_bridge_config().unwrap()).unwrap();
        let server = TestServer::new(create_router(bridge)).unwrap();

        Fixture {
            myq,
            _isy: isy,
            server,
        }
    }

    #[tokio::test]
    async fn test_list_doors_returns_presented_doors() {
        let f = fixture().await;

        for route in ["/doors", "/doors/"] {
            let response = f.server.get(route).await;
            response.assert_status_ok();

            let body: Value = response.json();
            let doors = body.as_array().unwrap();
            assert_eq!(doors.len(), 1);
            assert_eq!(doors[0]["id"], "42");
            assert_eq!(doors[0]["name"], "Main");
            assert_eq!(doors[0]["state"], "Closed");
            assert!(doors[0]["changed"].is_string());
            assert!(doors[0]["updated"].is_string());
        }
    }

    #[tokio::test]
    async fn test_door_by_name_and_id() {
        let f = fixture().await;

        let by_name: Value = f.server.get("/doors/Main").await.json();
        let by_id: Value = f.server.get("/doors/42").await.json();
        assert_eq!(by_name["name"], "Main");
        assert_eq!(by_id["name"], "Main");
    }

    #[tokio::test]
    async fn test_status_action_is_plain_text() {
        let f = fixture().await;

        let response = f.server.get("/doors/Main/status").await;
        response.assert_status_ok();
        response.assert_text("Closed");
        let content_type = response.header("content-type");
        assert!(content_type.to_str().unwrap().starts_with("text/plain"));
    }

    #[tokio::test]
    async fn test_open_action_answers_ok() {
        let f = fixture().await;
        Mock::given(method("PUT"))
            .and(path("/api/deviceattribute/putdeviceattribute"))
            .respond_with(ok(json!({})))
            .expect(1)
            .mount(&f.myq)
            .await;

        f.server.get("/doors/Main/open").await.assert_text("OK");
    }

    #[tokio::test]
    async fn test_errors_are_json_500() {
        let f = fixture().await;

        let cases = [
            ("/doors/Attic", 3, "Door not found: Attic"),
            ("/doors/Main/close", 6, "Main already closed"),
            ("/doors/Main/sideways", 7, "Invalid state specified"),
        ];

        for (route, code, message) in cases {
            let response = f.server.get(route).await;
            response.assert_status(StatusCode::INTERNAL_SERVER_ERROR);
            let body: Value = response.json();
            assert_eq!(body["code"], code, "{route}");
            assert!(
                body["error"].as_str().unwrap().contains(message),
                "{route}: {body}"
            );
        }
    }
}
