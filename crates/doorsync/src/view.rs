//! Client-facing rendering of a door, shared by the HTTP surface and CLI.

use serde::Serialize;
use tabled::Tabled;

use doorsync_core::Door;

/// `{id, name, state, changed, updated}` with local-time timestamps.
#[derive(Debug, Clone, Serialize)]
pub struct DoorView {
    pub id: String,
    pub name: String,
    pub state: String,
    pub changed: String,
    pub updated: String,
}

impl From<&Door> for DoorView {
    fn from(door: &Door) -> Self {
        Self {
            id: door.id.clone(),
            name: door.name.clone(),
            state: door.state.to_string(),
            changed: door.format_changed(),
            updated: door.format_updated(),
        }
    }
}

#[derive(Tabled)]
pub struct DoorRow {
    #[tabled(rename = "Name")]
    pub name: String,
    #[tabled(rename = "ID")]
    pub id: String,
    #[tabled(rename = "State")]
    pub state: String,
    #[tabled(rename = "Changed")]
    pub changed: String,
    #[tabled(rename = "Updated")]
    pub updated: String,
}

impl From<&DoorView> for DoorRow {
    fn from(v: &DoorView) -> Self {
        Self {
            name: v.name.clone(),
            id: v.id.clone(),
            state: v.state.clone(),
            changed: v.changed.clone(),
            updated: v.updated.clone(),
        }
    }
}

/// Key/value detail block for a single door.
pub fn detail(v: &DoorView) -> String {
    [
        format!("Name:     {}", v.name),
        format!("ID:       {}", v.id),
        format!("State:    {}", v.state),
        format!("Changed:  {}", v.changed),
        format!("Updated:  {}", v.updated),
    ]
    .join("\n")
}
