// cryptoauth-rs/cryptoauth/src/transport/i2c.rs

//! I2C ("TWI") physical layer.
//!
//! Every write starts with a word address byte selecting what the device
//! does with the transfer: reset its I/O buffer, sleep, idle, or accept a
//! command.

use crate::constants::{
    I2C_DEFAULT_ADDRESS, I2C_WORD_IDLE, I2C_WORD_NORMAL, I2C_WORD_RESET, I2C_WORD_SLEEP,
    WAKEUP_DELAY_MS, WAKEUP_PULSE_WIDTH_US,
};
use crate::transport::traits::{check_count, Physical};
use crate::types::Interface;
use crate::{Error, Result};

/// Bus access needed by [`I2cPhysical`]. Addresses are 7-bit.
pub trait I2cBus {
    /// Write `bytes` to the device at `addr`.
    fn write(&mut self, addr: u8, bytes: &[u8]) -> Result<()>;

    /// Fill `buf` from the device at `addr`. The physical layer treats any
    /// error, a NACK included, as no response.
    fn read(&mut self, addr: u8, buf: &mut [u8]) -> Result<()>;

    /// Hold SDA low for `us` microseconds. The device wakes on the pulse.
    fn hold_sda_low(&mut self, us: u32) -> Result<()>;

    /// Bus-level software reset sequence (clock-out of a stuck slave).
    fn software_reset(&mut self) -> Result<()> {
        Ok(())
    }

    /// Busy-wait.
    fn delay_us(&mut self, us: u32);

    /// Busy-wait in milliseconds.
    fn delay_ms(&mut self, ms: u32) {
        for _ in 0..ms {
            self.delay_us(1_000);
        }
    }
}

/// I2C physical layer settings.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct I2cConfig {
    /// 8-bit write address
    pub address: u8,
    /// SDA low time of the wake pulse
    pub wake_pulse_us: u32,
    /// Wait after the pulse before the wake response
    pub wake_delay_ms: u32,
}

impl Default for I2cConfig {
    fn default() -> Self {
        Self {
            address: I2C_DEFAULT_ADDRESS,
            wake_pulse_us: WAKEUP_PULSE_WIDTH_US,
            wake_delay_ms: WAKEUP_DELAY_MS,
        }
    }
}

/// I2C physical layer over any [`I2cBus`].
pub struct I2cPhysical<B: I2cBus> {
    bus: B,
    config: I2cConfig,
}

impl<B: I2cBus> I2cPhysical<B> {
    /// Physical layer at the configured address.
    pub fn new(bus: B, config: I2cConfig) -> Self {
        Self { bus, config }
    }

    /// Borrow the bus.
    pub fn bus(&self) -> &B {
        &self.bus
    }

    /// Borrow the bus mutably.
    pub fn bus_mut(&mut self) -> &mut B {
        &mut self.bus
    }

    /// Give the bus back.
    pub fn into_inner(self) -> B {
        self.bus
    }

    fn addr7(&self) -> u8 {
        self.config.address >> 1
    }

    fn send_word(&mut self, word: u8) -> Result<()> {
        let addr = self.addr7();
        self.bus.write(addr, &[word]).map_err(|e| {
            log::warn!("i2c word address {:#04x} not acknowledged: {}", word, e);
            Error::CommFail
        })
    }
}

impl<B: I2cBus> Physical for I2cPhysical<B> {
    fn send_command(&mut self, packet: &[u8]) -> Result<()> {
        let mut frame = Vec::with_capacity(packet.len() + 1);
        frame.push(I2C_WORD_NORMAL);
        frame.extend_from_slice(packet);
        let addr = self.addr7();
        self.bus.write(addr, &frame).map_err(|_| Error::CommFail)?;
        log::debug!("i2c sent {} byte command to {:#04x}", packet.len(), addr);
        Ok(())
    }

    fn receive_response(&mut self, buf: &mut [u8]) -> Result<usize> {
        if buf.is_empty() {
            return Err(Error::BadParam("empty receive buffer".into()));
        }
        let addr = self.addr7();
        self.bus
            .read(addr, &mut buf[..1])
            .map_err(|_| Error::RxNoResponse)?;
        let count = check_count(buf[0] as usize, buf.len())?;
        // 出力ポインタはデバイス側で保持される
        self.bus
            .read(addr, &mut buf[1..count])
            .map_err(|_| Error::RxFail)?;
        Ok(count)
    }

    fn wakeup(&mut self) -> Result<()> {
        let cfg = self.config;
        self.bus.hold_sda_low(cfg.wake_pulse_us)?;
        self.bus.delay_ms(cfg.wake_delay_ms);
        Ok(())
    }

    fn sleep(&mut self) -> Result<()> {
        self.send_word(I2C_WORD_SLEEP)
    }

    fn idle(&mut self) -> Result<()> {
        self.send_word(I2C_WORD_IDLE)
    }

    fn reset_io(&mut self) -> Result<()> {
        self.send_word(I2C_WORD_RESET)
    }

    fn resync(&mut self, buf: &mut [u8]) -> Result<()> {
        self.bus.software_reset()?;
        let addr = self.addr7();
        let head_len = buf.len().min(1);
        self.bus
            .read(addr, &mut buf[..head_len])
            .map_err(|_| Error::RxNoResponse)?;
        self.reset_io()
    }

    fn set_device_id(&mut self, id: u8) -> Result<()> {
        if id & 0x01 != 0 {
            return Err(Error::InvalidId(id));
        }
        self.config.address = id;
        Ok(())
    }

    fn device_id(&self) -> u8 {
        self.config.address
    }

    fn interface(&self) -> Interface {
        Interface::I2c
    }

    fn delay_ms(&mut self, ms: u32) {
        self.bus.delay_ms(ms);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::VecDeque;

    #[derive(Default)]
    struct TestBus {
        writes: Vec<(u8, Vec<u8>)>,
        output: VecDeque<u8>,
        nack_reads: bool,
        wake_pulses: Vec<u32>,
        resets: usize,
        elapsed_us: u64,
    }

    impl I2cBus for TestBus {
        fn write(&mut self, addr: u8, bytes: &[u8]) -> Result<()> {
            self.writes.push((addr, bytes.to_vec()));
            Ok(())
        }

        fn read(&mut self, _addr: u8, buf: &mut [u8]) -> Result<()> {
            if self.nack_reads {
                return Err(Error::CommFail);
            }
            for b in buf.iter_mut() {
                *b = self.output.pop_front().ok_or(Error::CommFail)?;
            }
            Ok(())
        }

        fn hold_sda_low(&mut self, us: u32) -> Result<()> {
            self.wake_pulses.push(us);
            Ok(())
        }

        fn software_reset(&mut self) -> Result<()> {
            self.resets += 1;
            Ok(())
        }

        fn delay_us(&mut self, us: u32) {
            self.elapsed_us += u64::from(us);
        }
    }

    fn phys() -> I2cPhysical<TestBus> {
        I2cPhysical::new(TestBus::default(), I2cConfig::default())
    }

    #[test]
    fn command_gets_normal_word_address() {
        let mut p = phys();
        p.send_command(&[0x07, 0x1B, 0, 0, 0, 0x24, 0xCD]).unwrap();
        let (addr, bytes) = &p.bus().writes[0];
        assert_eq!(*addr, 0x64);
        assert_eq!(bytes[0], I2C_WORD_NORMAL);
        assert_eq!(bytes.len(), 8);
    }

    #[test]
    fn receive_reads_count_then_rest() {
        let mut p = phys();
        p.bus_mut().output.extend([0x04, 0x11, 0x33, 0x43]);
        let mut buf = [0u8; 35];
        assert_eq!(p.receive_response(&mut buf).unwrap(), 4);
        assert_eq!(&buf[..4], &crate::constants::WAKE_RESPONSE);
    }

    #[test]
    fn receive_nack_is_no_response() {
        let mut p = phys();
        p.bus_mut().nack_reads = true;
        let mut buf = [0u8; 4];
        assert_eq!(p.receive_response(&mut buf), Err(Error::RxNoResponse));
    }

    #[test]
    fn oversized_count_is_invalid_size() {
        let mut p = phys();
        p.bus_mut().output.extend([0x23, 0x00]);
        let mut buf = [0u8; 7];
        assert!(matches!(
            p.receive_response(&mut buf),
            Err(Error::InvalidSize { .. })
        ));
    }

    #[test]
    fn power_words_and_wake() {
        let mut p = phys();
        p.sleep().unwrap();
        p.idle().unwrap();
        p.reset_io().unwrap();
        let words: Vec<u8> = p.bus().writes.iter().map(|(_, b)| b[0]).collect();
        assert_eq!(words, vec![I2C_WORD_SLEEP, I2C_WORD_IDLE, I2C_WORD_RESET]);
        p.wakeup().unwrap();
        assert_eq!(p.bus().wake_pulses, vec![60]);
        assert_eq!(p.bus().elapsed_us, 3_000);
    }

    #[test]
    fn resync_resets_bus_and_io() {
        let mut p = phys();
        p.bus_mut().output.push_back(0xFF);
        let mut buf = [0u8; 4];
        p.resync(&mut buf).unwrap();
        assert_eq!(p.bus().resets, 1);
        assert_eq!(p.bus().writes.last().unwrap().1, vec![I2C_WORD_RESET]);
    }

    #[test]
    fn device_id_must_be_even() {
        let mut p = phys();
        assert_eq!(p.set_device_id(0xC9), Err(Error::InvalidId(0xC9)));
        p.set_device_id(0xCA).unwrap();
        assert_eq!(p.device_id(), 0xCA);
        p.idle().unwrap();
        assert_eq!(p.bus().writes[0].0, 0x65);
    }
}
