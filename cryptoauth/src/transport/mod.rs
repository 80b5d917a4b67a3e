// cryptoauth-rs/cryptoauth/src/transport/mod.rs

#[cfg(feature = "embedded-hal")]
pub mod embedded;
pub mod i2c;
/// Recording mock for tests.
pub mod mock;
pub mod swi;
/// The [`traits::Physical`] seam.
pub mod traits;

pub use i2c::{I2cBus, I2cConfig, I2cPhysical};
pub use mock::MockPhysical;
pub use swi::{SimulatedWire, SwiConfig, SwiHal, SwiPhysical, SwiTiming};
pub use traits::Physical;
