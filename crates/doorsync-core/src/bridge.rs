// ── Door bridge ──
//
// Composes the session, registry, command gate and sync bridge in request
// order: resolve or refresh the door, optionally command it, mirror the
// result into the controller, and hand the door back to the caller.

use std::sync::Arc;

use tracing::{debug, info, warn};

use doorsync_api::{IsyClient, MyqClient, TransportConfig};

use crate::command::CommandGate;
use crate::config::BridgeConfig;
use crate::error::CoreError;
use crate::model::Door;
use crate::session::SessionManager;
use crate::store::DoorRegistry;
use crate::sync::SyncBridge;

/// Action word that reads state instead of commanding the door.
pub const STATUS_ACTION: &str = "status";

/// Main entry point for consumers.
///
/// Cheaply cloneable via `Arc<BridgeInner>`; every clone shares the same
/// caches.
#[derive(Clone)]
pub struct DoorBridge {
    inner: Arc<BridgeInner>,
}

struct BridgeInner {
    session: Arc<SessionManager>,
    registry: Arc<DoorRegistry>,
    gate: CommandGate,
    sync: SyncBridge,
}

impl DoorBridge {
    /// Build both upstream clients and wire the components together.
    /// Makes no network calls.
    pub fn new(config: &BridgeConfig) -> Result<Self, CoreError> {
        let transport = TransportConfig::with_timeout(config.timeout);
        let door = &config.door_service;
        let controller = &config.controller;

        let myq = MyqClient::new(
            door.base_url.clone(),
            door.app_id.clone(),
            door.culture.clone(),
            &transport,
        )?;
        let isy = IsyClient::new(
            controller.base_url.clone(),
            controller.credentials.username.clone(),
            controller.credentials.password.clone(),
            &transport,
        )
        .map_err(CoreError::from_controller)?;

        Ok(Self::with_clients(myq, isy, config))
    }

    /// Wire the components around pre-built clients. Connection fields of
    /// `config` are ignored.
    pub fn with_clients(myq: MyqClient, isy: IsyClient, config: &BridgeConfig) -> Self {
        let myq = Arc::new(myq);
        let isy = Arc::new(isy);

        let session = Arc::new(SessionManager::new(
            Arc::clone(&myq),
            config.door_service.credentials.clone(),
            config.door_service.session_validity,
        ));
        let registry = Arc::new(DoorRegistry::new(Arc::clone(&myq), Arc::clone(&session)));
        let gate = CommandGate::new(myq, Arc::clone(&session), Arc::clone(&registry));
        let sync = SyncBridge::new(
            isy,
            config.controller.var_prefix.clone(),
            config.controller.enabled,
        );

        Self {
            inner: Arc::new(BridgeInner {
                session,
                registry,
                gate,
                sync,
            }),
        }
    }

    // ── Operations ───────────────────────────────────────────────

    /// Load the registry if it is empty. Returns the number of known doors.
    pub async fn warm_up(&self) -> Result<usize, CoreError> {
        let doors = self.inner.registry.all_doors(false).await?;
        info!(doors = doors.len(), "door registry loaded");
        Ok(doors.len())
    }

    /// Cached door by name or id, loading the registry on first use.
    pub async fn door(&self, name_or_id: &str) -> Result<Door, CoreError> {
        self.inner.registry.all_doors(false).await?;
        self.inner.registry.get_door(name_or_id).await
    }

    /// Refresh every door from upstream, mirror each one, and return them.
    pub async fn doors_status(&self) -> Result<Vec<Door>, CoreError> {
        let doors = self.inner.registry.all_doors(true).await?;
        for door in &doors {
            info!(
                name = %door.name,
                state = %door.state,
                changed = %door.format_changed(),
                "door status"
            );
            self.publish(door).await?;
        }
        Ok(doors)
    }

    /// Refresh one door, mirror it, and return it.
    pub async fn door_status(&self, name_or_id: &str) -> Result<Door, CoreError> {
        let cached = self.door(name_or_id).await?;
        let door = self.inner.registry.refresh_state(&cached).await?;
        info!(
            name = %door.name,
            state = %door.state,
            changed = %door.format_changed(),
            "door status"
        );
        self.publish(&door).await?;
        Ok(door)
    }

    /// `status` → current state text; `open`/`close` → `OK` once the
    /// command is accepted. Any other action is `InvalidState`.
    pub async fn door_action(&self, name_or_id: &str, action: &str) -> Result<String, CoreError> {
        if action == STATUS_ACTION {
            let door = self.door_status(name_or_id).await?;
            return Ok(door.state.to_string());
        }

        let cached = self.door(name_or_id).await?;
        let door = self.inner.gate.set_state(&cached, action).await?;
        self.publish(&door).await?;
        Ok("OK".into())
    }

    async fn publish(&self, door: &Door) -> Result<bool, CoreError> {
        let synced = self.inner.sync.publish(door).await?;
        if synced {
            debug!(name = %door.name, "controller in sync");
        } else {
            warn!(name = %door.name, "controller variable not updated");
        }
        Ok(synced)
    }
}
