// ── Variable binding cache ──
//
// Maps door names to controller variable ids. A miss rebuilds the whole
// map from the controller's definitions listing.

use std::collections::HashMap;
use std::sync::Arc;

use tokio::sync::Mutex;
use tracing::{debug, info};

use doorsync_api::IsyClient;

use crate::error::CoreError;

pub struct VariableBindings {
    client: Arc<IsyClient>,
    prefix: String,
    /// Variable name → variable id, for every variable the controller reported.
    bindings: Mutex<HashMap<String, String>>,
}

impl VariableBindings {
    pub fn new(client: Arc<IsyClient>, prefix: String) -> Self {
        Self {
            client,
            prefix,
            bindings: Mutex::new(HashMap::new()),
        }
    }

    /// Controller variable name mirroring `door_name`.
    pub fn variable_name(&self, door_name: &str) -> String {
        format!("{}{}", self.prefix, door_name.replace(' ', "_"))
    }

    /// Variable id bound to `door_name`, rebuilding the cache on a miss.
    pub async fn resolve(&self, door_name: &str) -> Result<String, CoreError> {
        let variable = self.variable_name(door_name);
        let mut bindings = self.bindings.lock().await;

        if let Some(id) = bindings.get(&variable) {
            return Ok(id.clone());
        }

        debug!(%variable, "binding miss, listing controller variables");
        let definitions = self
            .client
            .list_definitions()
            .await
            .map_err(CoreError::from_controller)?;

        *bindings = definitions.into_iter().map(|d| (d.name, d.id)).collect();

        let id = bindings
            .get(&variable)
            .cloned()
            .ok_or(CoreError::BindingNotFound { variable: variable.clone() })?;
        info!(%variable, %id, "state variable bound");
        Ok(id)
    }

    /// Drop the binding for `door_name` so the next resolve rebuilds.
    pub async fn invalidate(&self, door_name: &str) {
        let variable = self.variable_name(door_name);
        if self.bindings.lock().await.remove(&variable).is_some() {
            debug!(%variable, "binding invalidated");
        }
    }
}
