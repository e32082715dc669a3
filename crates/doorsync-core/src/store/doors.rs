// ── Door registry ──
//
// Cache of every door seen on the account, keyed by upstream device id.
// Refreshes are additive: a door missing from a later listing keeps its
// last known record.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use indexmap::IndexMap;
use tokio::sync::Mutex;
use tracing::{debug, info};

use doorsync_api::{DoorAttribute, MyqClient, myq::MyqDevice};

use crate::error::CoreError;
use crate::model::{Door, DoorState, parse_epoch_millis};
use crate::session::SessionManager;

pub struct DoorRegistry {
    client: Arc<MyqClient>,
    session: Arc<SessionManager>,
    doors: Mutex<IndexMap<String, Door>>,
}

impl DoorRegistry {
    pub fn new(client: Arc<MyqClient>, session: Arc<SessionManager>) -> Self {
        Self {
            client,
            session,
            doors: Mutex::new(IndexMap::new()),
        }
    }

    /// All known doors keyed by name.
    ///
    /// Served from cache unless `force_refresh` is set or nothing has been
    /// loaded yet. A refresh that fails part-way leaves the cache as it was.
    /// Doors sharing a name collapse to the last one discovered; use
    /// [`all_doors`](Self::all_doors) to see every device.
    pub async fn list_doors(&self, force_refresh: bool) -> Result<IndexMap<String, Door>, CoreError> {
        let doors = self.all_doors(force_refresh).await?;
        Ok(doors.into_iter().map(|d| (d.name.clone(), d)).collect())
    }

    /// Every known door in discovery order, one entry per device id.
    ///
    /// Same caching rules as [`list_doors`](Self::list_doors).
    pub async fn all_doors(&self, force_refresh: bool) -> Result<Vec<Door>, CoreError> {
        let mut doors = self.doors.lock().await;
        if !force_refresh && !doors.is_empty() {
            return Ok(doors.values().cloned().collect());
        }

        let token = self.session.token().await?;
        let devices = self.client.list_devices(&token).await?;

        let mut fetched = Vec::new();
        for device in devices.iter().filter(|d| d.is_door()) {
            fetched.push(self.ingest(&token, device).await?);
        }

        for door in fetched {
            match doors.get_mut(&door.id) {
                Some(existing) => {
                    existing.name = door.name;
                    existing.state = door.state;
                    existing.changed_at = door.changed_at;
                    existing.observed_at = door.observed_at;
                }
                None => {
                    info!(id = %door.id, name = %door.name, state = %door.state, "discovered door");
                    doors.insert(door.id.clone(), door);
                }
            }
        }

        debug!(doors = doors.len(), "door registry refreshed");
        Ok(doors.values().cloned().collect())
    }

    /// Look a door up by exact name, then by id. Never refreshes.
    pub async fn get_door(&self, name_or_id: &str) -> Result<Door, CoreError> {
        let doors = self.doors.lock().await;
        doors
            .values()
            .find(|d| d.name == name_or_id)
            .or_else(|| doors.get(name_or_id))
            .cloned()
            .ok_or_else(|| CoreError::DoorNotFound {
                identifier: name_or_id.to_owned(),
            })
    }

    /// Re-query one door's state and store the result.
    pub async fn refresh_state(&self, door: &Door) -> Result<Door, CoreError> {
        let mut doors = self.doors.lock().await;

        let token = self.session.token().await?;
        let (state, changed_at) = self.fetch_state(&token, &door.id).await?;
        let observed_at = Utc::now();

        let entry = doors
            .entry(door.id.clone())
            .or_insert_with(|| door.clone());
        entry.state = state;
        entry.changed_at = changed_at;
        entry.observed_at = observed_at;

        debug!(name = %entry.name, state = %entry.state, "door state refreshed");
        Ok(entry.clone())
    }

    // ── Upstream ingestion ───────────────────────────────────────────

    /// Build a `Door` from a listing entry, querying attributes the listing
    /// left out.
    async fn ingest(&self, token: &str, device: &MyqDevice) -> Result<Door, CoreError> {
        let name = match device.attribute(DoorAttribute::Desc.as_str()) {
            Some(attr) => attr.value.clone(),
            None => {
                self.client
                    .get_attribute(token, &device.device_id, DoorAttribute::Desc)
                    .await?
                    .value
            }
        };

        let listed = device
            .attribute(DoorAttribute::DoorState.as_str())
            .and_then(|a| a.updated_time.as_deref().map(|t| (a.value.as_str(), t)));

        let (state, changed_at) = match listed {
            Some((code, updated)) => (DoorState::parse_code(code)?, parse_epoch_millis(updated)?),
            None => self.fetch_state(token, &device.device_id).await?,
        };

        Ok(Door {
            id: device.device_id.clone(),
            name,
            state,
            changed_at,
            observed_at: Utc::now(),
        })
    }

    async fn fetch_state(
        &self,
        token: &str,
        device_id: &str,
    ) -> Result<(DoorState, DateTime<Utc>), CoreError> {
        let attr = self
            .client
            .get_attribute(token, device_id, DoorAttribute::DoorState)
            .await?;
        let state = DoorState::parse_code(&attr.value)?;
        let updated = attr.updated_time.as_deref().ok_or_else(|| {
            CoreError::upstream(format!("door {device_id} state carries no update time"))
        })?;
        Ok((state, parse_epoch_millis(updated)?))
    }
}
