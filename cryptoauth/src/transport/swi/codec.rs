// cryptoauth-rs/cryptoauth/src/transport/swi/codec.rs
//! Bit-level SWI encoding.
//!
//! Each bit starts with a low pulse of `bit_ns`. A one is that pulse then a
//! long high tail. A zero adds a second low pulse after `bit_ns` of high.
//! Bytes go LSB first.

use super::hal::SwiHal;
use super::SwiTiming;

/// Result of a receive burst.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RxOutcome {
    /// Complete bytes stored in the buffer.
    pub bytes: usize,
    /// The line went quiet before the buffer was full.
    pub timed_out: bool,
}

/// Send `bytes` as one burst, interrupts masked.
pub fn send_bytes<H: SwiHal>(hal: &mut H, timing: &SwiTiming, bytes: &[u8]) {
    hal.with_interrupts_disabled(|hal| {
        hal.set_pin(true);
        hal.delay_ns(timing.turnaround_ns);
        for &byte in bytes {
            for bit in 0..8 {
                if byte & (1 << bit) != 0 {
                    hal.set_pin(false);
                    hal.delay_ns(timing.bit_ns);
                    hal.set_pin(true);
                    hal.delay_ns(timing.one_tail_ns);
                } else {
                    hal.set_pin(false);
                    hal.delay_ns(timing.bit_ns);
                    hal.set_pin(true);
                    hal.delay_ns(timing.bit_ns);
                    hal.set_pin(false);
                    hal.delay_ns(timing.bit_ns);
                    hal.set_pin(true);
                    hal.delay_ns(timing.zero_tail_ns);
                }
            }
        }
        log::trace!("swi tx {} bytes", bytes.len());
    });
}

/// Poll until the line reads `level` or `budget` samples are used up.
/// Returns the samples left; zero means timeout.
fn wait_for<H: SwiHal>(hal: &mut H, timing: &SwiTiming, level: bool, mut budget: u16) -> u16 {
    while budget > 0 {
        if hal.read_pin() == level {
            return budget;
        }
        hal.delay_ns(timing.sample_interval_ns);
        budget -= 1;
    }
    0
}

/// Receive up to `buf.len()` bytes as one burst, interrupts masked.
pub fn receive_bytes<H: SwiHal>(hal: &mut H, timing: &SwiTiming, buf: &mut [u8]) -> RxOutcome {
    buf.fill(0);
    hal.with_interrupts_disabled(|hal| {
        hal.set_pin(true);
        for i in 0..buf.len() {
            for bit in 0..8 {
                // start pulse: falling then rising edge, one shared budget
                let left = wait_for(hal, timing, false, timing.start_pulse_timeout);
                if left == 0 {
                    return RxOutcome {
                        bytes: i,
                        timed_out: true,
                    };
                }
                if wait_for(hal, timing, true, left) == 0 {
                    return RxOutcome {
                        bytes: i,
                        timed_out: true,
                    };
                }

                // 0 ビットなら二つ目のパルスが来る
                if wait_for(hal, timing, false, timing.zero_pulse_timeout) > 0 {
                    wait_for(hal, timing, true, timing.zero_pulse_timeout);
                } else {
                    buf[i] |= 1 << bit;
                }
            }
        }
        RxOutcome {
            bytes: buf.len(),
            timed_out: false,
        }
    })
}
