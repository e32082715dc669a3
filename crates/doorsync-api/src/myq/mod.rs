// MyQ door-service client modules
//
// Hand-written client for the MyQ cloud API: token login, device listing,
// and attribute reads/writes, all wrapped in the `ReturnCode` envelope.

pub mod auth;
pub mod client;
pub mod devices;
pub mod models;

pub use client::{DEFAULT_APP_ID, DEFAULT_BASE_URL, DEFAULT_CULTURE, MyqClient};
pub use devices::DoorAttribute;
pub use models::{AttributeResponse, MyqAttribute, MyqDevice};
