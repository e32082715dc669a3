//! Door endpoint handlers

use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Serialize;
use tracing::error;

use doorsync_core::{CoreError, DoorBridge};

use crate::view::DoorView;

/// Body of every failed request.
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
    pub code: u16,
}

/// Handler error: any core failure becomes a 500 with a JSON body.
pub struct ApiError(CoreError);

impl From<CoreError> for ApiError {
    fn from(err: CoreError) -> Self {
        Self(err)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let code = self.0.code();
        error!(error = %self.0, code, "request failed");
        (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(ErrorResponse {
                error: self.0.to_string(),
                code,
            }),
        )
            .into_response()
    }
}

/// GET /doors
///
/// Refreshes every door and mirrors each into the controller.
pub async fn list_doors(State(bridge): State<DoorBridge>) -> Result<Json<Vec<DoorView>>, ApiError> {
    let doors = bridge.doors_status().await?;
    Ok(Json(doors.iter().map(DoorView::from).collect()))
}

/// GET /doors/:name
pub async fn door_status(
    State(bridge): State<DoorBridge>,
    Path(name): Path<String>,
) -> Result<Json<DoorView>, ApiError> {
    let door = bridge.door_status(&name).await?;
    Ok(Json(DoorView::from(&door)))
}

/// GET /doors/:name/:action
///
/// `status` answers with the state text, `open`/`close` with `OK`.
pub async fn door_action(
    State(bridge): State<DoorBridge>,
    Path((name, action)): Path<(String, String)>,
) -> Result<String, ApiError> {
    Ok(bridge.door_action(&name, &action).await?)
}
