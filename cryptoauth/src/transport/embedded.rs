// cryptoauth-rs/cryptoauth/src/transport/embedded.rs

//! Adapters from embedded-hal 1.0 traits to [`SwiHal`] and [`I2cBus`].

use embedded_hal::delay::DelayNs;
use embedded_hal::digital::{InputPin, OutputPin};
use embedded_hal::i2c::{Error as _, I2c};

use crate::transport::i2c::I2cBus;
use crate::transport::swi::SwiHal;
use crate::{Error, Result};

/// SWI over one open-drain pin. The pin must be readable while released.
///
/// Every burst runs inside [`critical_section::with`], so the target must
/// link a `critical-section` implementation (for example the one the
/// `cortex-m` crate provides).
pub struct EmbeddedSwi<P, D> {
    pin: P,
    delay: D,
}

impl<P, D> EmbeddedSwi<P, D>
where
    P: OutputPin + InputPin,
    D: DelayNs,
{
    /// Drive the bus with `pin`, timing bits with `delay`.
    pub fn new(pin: P, delay: D) -> Self {
        Self { pin, delay }
    }

    /// Give back the pin and the delay.
    pub fn release(self) -> (P, D) {
        (self.pin, self.delay)
    }
}

impl<P, D> SwiHal for EmbeddedSwi<P, D>
where
    P: OutputPin + InputPin,
    D: DelayNs,
{
    fn set_pin(&mut self, high: bool) {
        let res = if high {
            self.pin.set_high()
        } else {
            self.pin.set_low()
        };
        if res.is_err() {
            log::trace!("swi pin write failed");
        }
    }

    fn read_pin(&mut self) -> bool {
        // 読めなければ解放状態とみなす
        self.pin.is_high().unwrap_or(true)
    }

    fn delay_ns(&mut self, ns: u32) {
        self.delay.delay_ns(ns);
    }

    fn with_interrupts_disabled<R>(&mut self, f: impl FnOnce(&mut Self) -> R) -> R
    where
        Self: Sized,
    {
        critical_section::with(|_cs| f(self))
    }

    fn delay_us(&mut self, us: u32) {
        self.delay.delay_us(us);
    }

    fn delay_ms(&mut self, ms: u32) {
        self.delay.delay_ms(ms);
    }
}

/// I2C over an embedded-hal bus.
pub struct EmbeddedI2c<I, D> {
    i2c: I,
    delay: D,
}

impl<I, D> EmbeddedI2c<I, D>
where
    I: I2c,
    D: DelayNs,
{
    /// Use `i2c` for transfers and `delay` for the wake timing.
    pub fn new(i2c: I, delay: D) -> Self {
        Self { i2c, delay }
    }

    /// Give back the bus and the delay.
    pub fn release(self) -> (I, D) {
        (self.i2c, self.delay)
    }
}

impl<I, D> I2cBus for EmbeddedI2c<I, D>
where
    I: I2c,
    D: DelayNs,
{
    fn write(&mut self, addr: u8, bytes: &[u8]) -> Result<()> {
        self.i2c.write(addr, bytes).map_err(|e| {
            log::debug!("i2c write to {:#04x} failed: {:?}", addr, e.kind());
            Error::CommFail
        })
    }

    fn read(&mut self, addr: u8, buf: &mut [u8]) -> Result<()> {
        self.i2c.read(addr, buf).map_err(|e| {
            log::debug!("i2c read from {:#04x} failed: {:?}", addr, e.kind());
            Error::RxNoResponse
        })
    }

    /// Addressing the general call address pulls SDA low for the address
    /// byte. At 100 kHz or below that covers the wake pulse width; the
    /// NACK that follows is expected.
    fn hold_sda_low(&mut self, us: u32) -> Result<()> {
        let _ = self.i2c.write(0x00, &[]);
        self.delay.delay_us(us);
        Ok(())
    }

    fn delay_us(&mut self, us: u32) {
        self.delay.delay_us(us);
    }

    fn delay_ms(&mut self, ms: u32) {
        self.delay.delay_ms(ms);
    }
}
