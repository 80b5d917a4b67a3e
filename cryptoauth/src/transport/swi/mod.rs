// cryptoauth-rs/cryptoauth/src/transport/swi/mod.rs

//! Single-wire interface.
//!
//! Every transfer is a burst of bytes preceded by a flag byte: command
//! `0x77`, transmit `0x88`, idle `0xBB`, sleep `0xCC`.

pub mod codec;
/// Pin access the bit-banged codec runs on.
pub mod hal;
pub mod sim;

pub use hal::SwiHal;
pub use sim::SimulatedWire;

use crate::constants::{
    SWI_FLAG_CMD, SWI_FLAG_IDLE, SWI_FLAG_SLEEP, SWI_FLAG_TX, WAKEUP_DELAY_MS,
    WAKEUP_PULSE_WIDTH_US,
};
use crate::transport::traits::{check_count, Physical};
use crate::types::Interface;
use crate::{Error, Result};

/// Bit timing. Defaults follow the device datasheet (230.4 kbaud).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SwiTiming {
    /// Width of every low pulse.
    pub bit_ns: u32,
    /// High time after the pulse of a one bit.
    pub one_tail_ns: u32,
    /// High time after the second pulse of a zero bit.
    pub zero_tail_ns: u32,
    /// Pause before the host starts driving a burst.
    pub turnaround_ns: u32,
    /// Samples to wait for a start pulse.
    pub start_pulse_timeout: u16,
    /// Samples to wait for the second pulse of a zero bit.
    pub zero_pulse_timeout: u16,
    /// Time per sample while waiting for an edge.
    pub sample_interval_ns: u32,
    /// Low time of the wake token.
    pub wake_pulse_us: u32,
    /// Wait after the token before the first command.
    pub wake_delay_ms: u32,
}

impl Default for SwiTiming {
    fn default() -> Self {
        Self {
            bit_ns: 4_340,
            one_tail_ns: 34_700,
            zero_tail_ns: 26_000,
            turnaround_ns: 6_000,
            start_pulse_timeout: 255,
            zero_pulse_timeout: 50,
            sample_interval_ns: 220,
            wake_pulse_us: WAKEUP_PULSE_WIDTH_US,
            wake_delay_ms: WAKEUP_DELAY_MS,
        }
    }
}

/// SWI physical layer settings.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SwiConfig {
    /// Bit timing
    pub timing: SwiTiming,
    /// Send a dummy 0x00 byte before the command flag. ECC108 revisions up
    /// to 0x100 miss the first flag after wake otherwise.
    pub dummy_flag: bool,
}

impl Default for SwiConfig {
    fn default() -> Self {
        Self {
            timing: SwiTiming::default(),
            dummy_flag: true,
        }
    }
}

/// SWI physical layer over any [`SwiHal`].
pub struct SwiPhysical<H: SwiHal> {
    hal: H,
    config: SwiConfig,
    device_id: u8,
}

impl<H: SwiHal> SwiPhysical<H> {
    /// Physical layer on device pin 0.
    pub fn new(hal: H, config: SwiConfig) -> Self {
        Self {
            hal,
            config,
            device_id: 0,
        }
    }

    /// Borrow the HAL.
    pub fn hal(&self) -> &H {
        &self.hal
    }

    /// Borrow the HAL mutably.
    pub fn hal_mut(&mut self) -> &mut H {
        &mut self.hal
    }

    /// Current settings.
    pub fn config(&self) -> &SwiConfig {
        &self.config
    }

    /// Give the HAL back.
    pub fn into_inner(self) -> H {
        self.hal
    }

    fn send_flagged(&mut self, bytes: &[u8]) {
        codec::send_bytes(&mut self.hal, &self.config.timing, bytes);
    }
}

impl<H: SwiHal> Physical for SwiPhysical<H> {
    fn send_command(&mut self, packet: &[u8]) -> Result<()> {
        if self.config.dummy_flag {
            self.send_flagged(&[0x00]);
        }
        self.send_flagged(&[SWI_FLAG_CMD]);
        self.send_flagged(packet);
        log::debug!("swi sent {} byte command", packet.len());
        Ok(())
    }

    fn receive_response(&mut self, buf: &mut [u8]) -> Result<usize> {
        self.send_flagged(&[SWI_FLAG_TX]);
        let out = codec::receive_bytes(&mut self.hal, &self.config.timing, buf);
        if out.bytes == 0 && out.timed_out {
            return Err(Error::RxNoResponse);
        }
        // デバイスは count バイトしか送らないので途中タイムアウトは正常
        let count = buf.first().copied().unwrap_or(0) as usize;
        match check_count(count, buf.len()) {
            Err(_) if out.timed_out => Err(Error::RxFail),
            Ok(count) if out.timed_out && out.bytes < count => {
                log::debug!("swi rx cut short: {} of {} bytes", out.bytes, count);
                Err(Error::RxFail)
            }
            other => other,
        }
    }

    fn wakeup(&mut self) -> Result<()> {
        let timing = self.config.timing;
        self.hal.set_pin(false);
        self.hal.delay_us(timing.wake_pulse_us);
        self.hal.set_pin(true);
        self.hal.delay_ms(timing.wake_delay_ms);
        Ok(())
    }

    fn sleep(&mut self) -> Result<()> {
        self.send_flagged(&[SWI_FLAG_SLEEP]);
        Ok(())
    }

    fn idle(&mut self) -> Result<()> {
        self.send_flagged(&[SWI_FLAG_IDLE]);
        Ok(())
    }

    fn resync(&mut self, buf: &mut [u8]) -> Result<()> {
        self.receive_response(buf).map(|_| ())
    }

    fn set_device_id(&mut self, id: u8) -> Result<()> {
        self.hal.select_pin(id);
        self.device_id = id;
        Ok(())
    }

    fn device_id(&self) -> u8 {
        self.device_id
    }

    fn interface(&self) -> Interface {
        Interface::Swi
    }

    fn delay_ms(&mut self, ms: u32) {
        self.hal.delay_ms(ms);
    }
}
