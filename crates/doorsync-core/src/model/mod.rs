// ── Domain model ──

pub mod door;

pub use door::{DesiredState, Door, DoorState, parse_epoch_millis};
