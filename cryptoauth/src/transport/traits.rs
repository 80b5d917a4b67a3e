// cryptoauth-rs/cryptoauth/src/transport/traits.rs

use crate::types::Interface;
use crate::Result;

/// Physical layer: moves bytes between host and device and drives the
/// power-state tokens. The comm layer is written against this trait only.
pub trait Physical {
    /// Send a complete command packet (count through CRC).
    fn send_command(&mut self, packet: &[u8]) -> Result<()>;

    /// Receive one response packet into `buf`.
    ///
    /// Returns the count byte on success. `RxNoResponse` when nothing was
    /// received, `RxFail` for a partial transfer, `InvalidSize` when the
    /// count lies outside `[RSP_SIZE_MIN, buf.len()]`.
    fn receive_response(&mut self, buf: &mut [u8]) -> Result<usize>;

    /// Send the wake token. Does not read the wake response.
    fn wakeup(&mut self) -> Result<()>;

    /// Send the sleep token. Volatile state is lost.
    fn sleep(&mut self) -> Result<()>;

    /// Send the idle token. TempKey survives.
    fn idle(&mut self) -> Result<()>;

    /// Reset the device's I/O buffer. Interfaces without one do nothing.
    fn reset_io(&mut self) -> Result<()> {
        Ok(())
    }

    /// Re-establish communication after a failed transfer.
    fn resync(&mut self, buf: &mut [u8]) -> Result<()>;

    /// Select the device to talk to: a pin index on SWI, the 8-bit
    /// address on I2C.
    fn set_device_id(&mut self, id: u8) -> Result<()>;

    /// Id set by the last successful `set_device_id`.
    fn device_id(&self) -> u8;

    /// Which bus this is.
    fn interface(&self) -> Interface;

    /// Millisecond delay. Implementations backed by a HAL delay override
    /// this so tests run on virtual time.
    fn delay_ms(&mut self, ms: u32) {
        crate::utils::sleep_ms(ms)
    }
}

impl<P: Physical + ?Sized> Physical for Box<P> {
    fn send_command(&mut self, packet: &[u8]) -> Result<()> {
        (**self).send_command(packet)
    }
    fn receive_response(&mut self, buf: &mut [u8]) -> Result<usize> {
        (**self).receive_response(buf)
    }
    fn wakeup(&mut self) -> Result<()> {
        (**self).wakeup()
    }
    fn sleep(&mut self) -> Result<()> {
        (**self).sleep()
    }
    fn idle(&mut self) -> Result<()> {
        (**self).idle()
    }
    fn reset_io(&mut self) -> Result<()> {
        (**self).reset_io()
    }
    fn resync(&mut self, buf: &mut [u8]) -> Result<()> {
        (**self).resync(buf)
    }
    fn set_device_id(&mut self, id: u8) -> Result<()> {
        (**self).set_device_id(id)
    }
    fn device_id(&self) -> u8 {
        (**self).device_id()
    }
    fn interface(&self) -> Interface {
        (**self).interface()
    }
    fn delay_ms(&mut self, ms: u32) {
        (**self).delay_ms(ms)
    }
}

/// Validate a received count byte against the buffer size.
pub fn check_count(count: usize, capacity: usize) -> Result<usize> {
    if count < crate::constants::RSP_SIZE_MIN || count > capacity {
        return Err(crate::Error::InvalidSize {
            expected: capacity,
            actual: count,
        });
    }
    Ok(count)
}
