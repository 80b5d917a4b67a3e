// cryptoauth-rs/cryptoauth/src/transport/swi/hal.rs

/// Pin-level access needed to bit-bang the single-wire bus.
///
/// `set_pin(true)` releases the line (pulled high), `set_pin(false)` drives
/// it low. Implementations for real hardware live behind the `embedded-hal`
/// feature; [`super::SimulatedWire`] runs on virtual time.
pub trait SwiHal {
    /// Drive the line low, or release it.
    fn set_pin(&mut self, high: bool);

    /// Sample the line.
    fn read_pin(&mut self) -> bool;

    /// Busy-wait with nanosecond resolution.
    fn delay_ns(&mut self, ns: u32);

    /// Run `f` with interrupts masked. Bit timing within a burst must not
    /// be stretched by an interrupt handler.
    fn with_interrupts_disabled<R>(&mut self, f: impl FnOnce(&mut Self) -> R) -> R
    where
        Self: Sized,
    {
        f(self)
    }

    /// Select which signal pin the following transfers use.
    fn select_pin(&mut self, _index: u8) {}

    /// Busy-wait in microseconds.
    fn delay_us(&mut self, us: u32) {
        for _ in 0..us {
            self.delay_ns(1_000);
        }
    }

    /// Busy-wait in milliseconds.
    fn delay_ms(&mut self, ms: u32) {
        for _ in 0..ms {
            self.delay_ns(1_000_000);
        }
    }
}
