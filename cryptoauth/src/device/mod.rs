// cryptoauth-rs/cryptoauth/src/device/mod.rs

//! Device session: owns the physical layer and tracks the power state in
//! the type system.

/// Builder for an asleep [`Device`].
pub mod builder;
/// The type-state [`Device`] and its transitions.
pub mod handle;
pub mod operations;

pub use builder::DeviceBuilder;
pub use handle::{Asleep, Awake, Device, Dormant, Idle, StateError, Transition};
