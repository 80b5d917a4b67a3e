// cryptoauth-rs/cryptoauth/src/device/builder.rs

use crate::comm::RetryPolicy;
use crate::device::handle::{Asleep, Device};
use crate::transport::Physical;
use crate::{Error, Result};

/// Helper to construct a Device with optional configuration.
#[derive(Default)]
pub struct DeviceBuilder {
    physical: Option<Box<dyn Physical>>,
    policy: RetryPolicy,
    device_id: Option<u8>,
}

impl DeviceBuilder {
    /// Empty builder with the default retry policy.
    pub fn new() -> Self {
        Self::default()
    }

    /// Physical layer the device talks through.
    pub fn with_physical(mut self, physical: Box<dyn Physical>) -> Self {
        self.physical = Some(physical);
        self
    }

    /// Overrides the retry policy.
    pub fn with_policy(mut self, policy: RetryPolicy) -> Self {
        self.policy = policy;
        self
    }

    /// Pin index (SWI) or 8-bit address (I2C) to select before first use.
    pub fn with_device_id(mut self, id: u8) -> Self {
        self.device_id = Some(id);
        self
    }

    /// Requires a physical layer; otherwise returns `NoDevice`.
    pub fn build(self) -> Result<Device<Asleep>> {
        let mut physical = self.physical.ok_or(Error::NoDevice)?;
        if let Some(id) = self.device_id {
            physical.set_device_id(id)?;
        }
        Ok(Device::new_with_physical(physical, self.policy))
    }
}
