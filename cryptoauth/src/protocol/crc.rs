// cryptoauth-rs/cryptoauth/src/protocol/crc.rs
//! Bit-serial CRC-16 used on every command and response packet.
//!
//! Polynomial 0x8005, register seeded with zero, no final xor. Data bits are
//! consumed LSB first and the register shifts out its MSB. The result goes on
//! the wire low byte first.

use crate::{Error, Result};

const POLYNOMIAL: u16 = 0x8005;

/// Continue a CRC computation from `state`.
pub fn crc16_update(state: u16, data: &[u8]) -> u16 {
    let mut reg = state;
    for &byte in data {
        for shift in 0..8 {
            let data_bit = (byte >> shift) & 1;
            let crc_bit = (reg >> 15) as u8;
            reg <<= 1;
            if data_bit != crc_bit {
                reg ^= POLYNOMIAL;
            }
        }
    }
    reg
}

/// CRC over `data` starting from zero.
pub fn crc16(data: &[u8]) -> u16 {
    crc16_update(0, data)
}

/// CRC in wire order `[lo, hi]`.
pub fn crc16_bytes(data: &[u8]) -> [u8; 2] {
    crc16(data).to_le_bytes()
}

/// Write the CRC of `packet[..len-2]` into its last two bytes.
pub fn append_crc(packet: &mut [u8]) -> Result<()> {
    let len = packet.len();
    if len < crate::constants::CRC_SIZE {
        return Err(Error::BadParam(format!("packet too short for crc: {}", len)));
    }
    let crc = crc16_bytes(&packet[..len - 2]);
    packet[len - 2..].copy_from_slice(&crc);
    Ok(())
}

/// Check that the last two bytes of `packet` carry the CRC of the rest.
pub fn verify_crc(packet: &[u8]) -> Result<()> {
    let len = packet.len();
    if len < crate::constants::RSP_SIZE_MIN {
        return Err(Error::InvalidSize {
            expected: crate::constants::RSP_SIZE_MIN,
            actual: len,
        });
    }
    let expected = crc16(&packet[..len - 2]);
    let actual = u16::from_le_bytes([packet[len - 2], packet[len - 1]]);
    if expected != actual {
        log::warn!("crc mismatch: calc {:#06x} recv {:#06x}", expected, actual);
        return Err(Error::BadCrc { expected, actual });
    }
    Ok(())
}
