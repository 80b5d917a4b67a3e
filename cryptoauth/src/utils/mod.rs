// cryptoauth-rs/cryptoauth/src/utils/mod.rs
//! Small helpers shared by the transport, host and test code.

pub mod hex;
pub mod timeout;

pub use hex::*;
pub use timeout::*;
