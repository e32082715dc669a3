// ISY automation-controller client modules
//
// Basic-auth REST client for the controller's integer state variables.

pub mod client;
pub mod models;
pub mod vars;

pub use client::IsyClient;
pub use models::{VariableDefinition, VariableState};
pub use vars::{VAR_TYPE_STATE, VarRead, VarWrite};
