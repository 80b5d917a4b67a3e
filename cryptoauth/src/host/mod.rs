// cryptoauth-rs/cryptoauth/src/host/mod.rs
//! ASCII protocol spoken by host tools to an evaluation kit.

pub mod command;
pub mod packet;
/// Dispatch of parsed requests to a physical layer.
pub mod session;

pub use command::{parse, BoardCommand, DeviceCommand, HostCommand, PhysicalCommand};
pub use packet::{encode_response, Collator, HostResponse};
pub use session::{HostConfig, HostSession};
