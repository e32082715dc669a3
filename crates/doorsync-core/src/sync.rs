// ── Controller sync ──
//
// Mirrors a door's open/closed status into its controller state variable,
// writing only when the stored value differs. Data problems (stale id,
// unexpected status, unreadable payload) are logged and reported as
// `Ok(false)`; an unreachable controller is an error.

use std::sync::Arc;

use tracing::{debug, error, info, warn};

use doorsync_api::{IsyClient, VarRead, VarWrite};

use crate::error::CoreError;
use crate::model::{Door, DoorState};
use crate::store::VariableBindings;

pub struct SyncBridge {
    client: Arc<IsyClient>,
    bindings: VariableBindings,
    enabled: bool,
}

impl SyncBridge {
    pub fn new(client: Arc<IsyClient>, var_prefix: String, enabled: bool) -> Self {
        let bindings = VariableBindings::new(Arc::clone(&client), var_prefix);
        Self {
            client,
            bindings,
            enabled,
        }
    }

    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    pub fn bindings(&self) -> &VariableBindings {
        &self.bindings
    }

    /// Push `door`'s state to the controller.
    pub async fn publish(&self, door: &Door) -> Result<bool, CoreError> {
        if !self.enabled {
            return Ok(true);
        }

        let id = self.bindings.resolve(&door.name).await?;
        let variable = self.bindings.variable_name(&door.name);

        let current = match self.client.get_var(&id).await {
            Ok(VarRead::Value(value)) => value.val,
            Ok(VarRead::NotFound) => {
                error!(%variable, %id, "variable not found on controller (404)");
                self.bindings.invalidate(&door.name).await;
                return Ok(false);
            }
            Ok(VarRead::Failed { status, body }) => {
                error!(%variable, status, %body, "variable read failed");
                return Ok(false);
            }
            Err(e @ doorsync_api::Error::Deserialization { .. }) => {
                warn!(%variable, error = %e, "unreadable variable payload");
                return Ok(false);
            }
            Err(e) => return Err(CoreError::from_controller(e)),
        };

        let target = i64::from(door.state == DoorState::Open);
        if current == target {
            debug!(%variable, value = current, "variable already up to date");
            return Ok(true);
        }

        match self
            .client
            .set_var(&id, target)
            .await
            .map_err(CoreError::from_controller)?
        {
            VarWrite::Applied => {
                info!(%variable, from = current, to = target, "variable updated");
                Ok(true)
            }
            VarWrite::NotFound => {
                error!(%variable, %id, "variable not found on controller (404)");
                self.bindings.invalidate(&door.name).await;
                Ok(false)
            }
            VarWrite::Failed { status, body } => {
                error!(%variable, status, %body, "variable update failed");
                Ok(false)
            }
        }
    }
}
