// cryptoauth-rs/cryptoauth/src/protocol/commands/memory.rs
//! Read, Write and Lock rules.
//!
//! Callers pass byte addresses. The device wants word addresses, so the
//! range check happens after `>> 2` against the per-zone limit.

use super::{array, bad_param, Command, WriteData};
use crate::constants::{ZONE_ACCESS_32, ZONE_ACCESS_4, ZONE_COUNT_FLAG};
use crate::types::Zone;
use crate::Result;

/// Valid Read zone bits
pub const READ_ZONE_MASK: u8 = 0x83;
/// Valid Write zone bits
pub const WRITE_ZONE_MASK: u8 = 0xC3;
/// The value was encrypted and carries a MAC
pub const WRITE_ZONE_WITH_MAC: u8 = 0x40;
/// MAC trailing an encrypted write
pub const WRITE_MAC_SIZE: usize = 32;
/// Lock the data and OTP zones
pub const LOCK_ZONE_NO_CONFIG: u8 = 0x01;
/// Skip the summary CRC check
pub const LOCK_ZONE_NO_CRC: u8 = 0x80;
/// Valid Lock zone bits
pub const LOCK_ZONE_MASK: u8 = 0x81;

fn check_address(zone: u8, address: u16) -> Result<()> {
    let z = Zone::from_bits(zone).ok_or_else(|| bad_param(format!("zone {:#04x}", zone)))?;
    let word = address >> 2;
    if word > z.address_limit() {
        return Err(bad_param(format!(
            "address {:#06x} outside {} zone",
            address, z
        )));
    }
    Ok(())
}

pub(super) fn validate_read(zone: u8, address: u16) -> Result<()> {
    if zone & !READ_ZONE_MASK != 0 {
        return Err(bad_param(format!("read zone {:#04x}", zone)));
    }
    check_address(zone, address)
}

pub(super) fn validate_write(zone: u8, address: u16, data: &WriteData) -> Result<()> {
    if zone & !WRITE_ZONE_MASK != 0 {
        return Err(bad_param(format!("write zone {:#04x}", zone)));
    }
    let wants_block = zone & ZONE_COUNT_FLAG != 0;
    match (wants_block, data) {
        (true, WriteData::Block(_)) | (false, WriteData::Word(_)) => {}
        _ => {
            return Err(bad_param(
                "write data size does not match zone count flag",
            ));
        }
    }
    check_address(zone, address)
}

pub(super) fn validate_lock(zone: u8, summary: u16) -> Result<()> {
    if zone & !LOCK_ZONE_MASK != 0 {
        return Err(bad_param(format!("lock zone {:#04x}", zone)));
    }
    if zone & LOCK_ZONE_NO_CRC != 0 && summary != 0 {
        return Err(bad_param("lock summary must be 0 when ignored"));
    }
    Ok(())
}

pub(super) fn parse_write(zone: u8, word: u16, data: &[u8]) -> Result<Command> {
    let size = if zone & ZONE_COUNT_FLAG != 0 {
        ZONE_ACCESS_32
    } else {
        ZONE_ACCESS_4
    };
    let mac = match data.len() {
        n if n == size => None,
        n if n == size + WRITE_MAC_SIZE => Some(array::<32>(&data[size..])?),
        n => return Err(bad_param(format!("write data of {} bytes", n))),
    };
    let payload = if size == ZONE_ACCESS_32 {
        WriteData::Block(array::<32>(&data[..size])?)
    } else {
        WriteData::Word(array::<4>(&data[..size])?)
    };
    Ok(Command::Write {
        zone,
        address: super::byte_address(word)?,
        data: payload,
        mac,
    })
}
