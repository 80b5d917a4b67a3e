// cryptoauth-rs/cryptoauth/src/lib.rs

//! cryptoauth
//!
//! Pure Rust driver for ATSHA204 / ATECC108 CryptoAuthentication devices:
//! SWI and I2C physical layers, the CRC/retry comm layer, typed command
//! marshaling, host-side emulation of the device digests, and the ASCII
//! protocol spoken by host tools.
#![warn(missing_docs)]

pub mod comm;
pub mod constants;
pub mod device;
/// Error type and return codes.
pub mod error;
pub mod helper;
pub mod host;
/// Common imports.
pub mod prelude;
/// Packets, commands, CRC and per-opcode timing.
pub mod protocol;
#[doc(hidden)]
pub mod test_support;
/// Physical layers: SWI, I2C and a mock.
pub mod transport;
/// Opcodes, zones, serial numbers and device status.
pub mod types;
pub mod utils;

// Re-export common types at crate root so `crate::Error`, `crate::Result`,
// and the newtypes in `types` are available for consumers and for
// convenient `prelude` re-exports.
pub use crate::error::*;
pub use crate::types::*;

pub use prelude::*;
