// ── Cached upstream state ──
//
// Door records from the door service and variable bindings from the
// automation controller. Each cache serializes its own refreshes.

mod bindings;
mod doors;

pub use bindings::VariableBindings;
pub use doors::DoorRegistry;
