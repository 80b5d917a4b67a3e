// cryptoauth-rs/cryptoauth/src/prelude.rs

pub use crate::comm::{PollTiming, Resync, RetryPolicy};
pub use crate::device::{Asleep, Awake, Device, DeviceBuilder, Idle, StateError};
pub use crate::helper::{Sha256, TempKey};
pub use crate::host::HostSession;
pub use crate::protocol::{Command, Response, WriteData};
pub use crate::transport::{I2cPhysical, MockPhysical, Physical, SwiPhysical};
pub use crate::{Digest, DeviceStatus, Error, Interface, Opcode, Result, SerialNumber, Zone};

// Re-export small utilities for convenience
pub use crate::utils::{bytes_to_hex, bytes_to_hex_spaced, ms, parse_hex};
