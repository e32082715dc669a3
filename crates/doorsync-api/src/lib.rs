// doorsync-api: Async Rust clients for the MyQ door service and the ISY controller

pub mod error;
pub mod isy;
pub mod myq;
pub mod transport;

pub use error::Error;
pub use isy::{IsyClient, VarRead, VarWrite};
pub use myq::{DoorAttribute, MyqClient};
pub use transport::TransportConfig;
