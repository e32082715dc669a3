// doorsync-core: Session, door cache, command gating, and controller sync.

pub mod bridge;
pub mod command;
pub mod config;
pub mod error;
pub mod model;
pub mod session;
pub mod store;
pub mod sync;

// ── Primary re-exports ──────────────────────────────────────────────
pub use bridge::{DoorBridge, STATUS_ACTION};
pub use command::CommandGate;
pub use config::{
    BridgeConfig, ControllerConfig, Credentials, DEFAULT_SESSION_VALIDITY, DoorServiceConfig,
};
pub use error::CoreError;
pub use model::{DesiredState, Door, DoorState};
pub use session::{Session, SessionManager};
pub use store::{DoorRegistry, VariableBindings};
pub use sync::SyncBridge;
