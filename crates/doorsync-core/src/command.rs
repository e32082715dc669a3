// ── Command gate ──
//
// Validates an open/close request against the cached door state before
// writing it upstream, then reconciles the cache with what the door
// service reports afterwards.

use std::sync::Arc;

use tracing::{debug, info};

use doorsync_api::{DoorAttribute, MyqClient};

use crate::error::CoreError;
use crate::model::{DesiredState, Door};
use crate::session::SessionManager;
use crate::store::DoorRegistry;

pub struct CommandGate {
    client: Arc<MyqClient>,
    session: Arc<SessionManager>,
    registry: Arc<DoorRegistry>,
}

impl CommandGate {
    pub fn new(
        client: Arc<MyqClient>,
        session: Arc<SessionManager>,
        registry: Arc<DoorRegistry>,
    ) -> Self {
        Self {
            client,
            session,
            registry,
        }
    }

    /// Parse `desired` ("open" / "close", any case) and apply it.
    pub async fn set_state(&self, door: &Door, desired: &str) -> Result<Door, CoreError> {
        let desired: DesiredState = desired.parse()?;
        self.apply(door, desired).await
    }

    /// Issue `desired` unless `door` is already there or heading there.
    ///
    /// Returns the door as reported right after the write, which may still
    /// be `Opening`/`Closing`.
    pub async fn apply(&self, door: &Door, desired: DesiredState) -> Result<Door, CoreError> {
        if desired.is_satisfied_by(door.state) {
            debug!(name = %door.name, state = %door.state, ?desired, "command refused, no-op");
            return Err(CoreError::AlreadyInState {
                door: door.name.clone(),
                state: door.state,
                desired,
            });
        }

        let token = self.session.token().await?;
        self.client
            .set_attribute(
                &token,
                &door.id,
                DoorAttribute::DesiredDoorState,
                desired.code(),
            )
            .await
            .map_err(|e| match e {
                doorsync_api::Error::Api { message, .. } => CoreError::CommandRejected { message },
                other => CoreError::from(other),
            })?;

        info!(name = %door.name, from = %door.state, ?desired, "door command accepted");
        self.registry.refresh_state(door).await
    }
}
