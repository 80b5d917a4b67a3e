// cryptoauth-rs/cryptoauth/src/helper/encrypt.rs
//! Encrypted Read/Write: data is XORed with a TempKey produced by GenDig
//! over a data slot.

use super::sha256::Sha256;
use super::tempkey::{Source, TempKey};
use crate::constants::{ADDRESS_MASK, SN_0, SN_1, SN_8};
use crate::protocol::commands::WRITE_ZONE_MASK;
use crate::types::{Digest, Opcode};
use crate::{Error, Result};

/// Encrypt a 32-byte block for an encrypted Write. Returns the input MAC
/// the Write needs when `with_mac` is set, computed over the clear text.
pub fn encrypt(
    temp_key: &mut TempKey,
    zone: u8,
    address: u16,
    data: &mut Digest,
    with_mac: bool,
) -> Result<Option<Digest>> {
    if zone & !WRITE_ZONE_MASK != 0 {
        return Err(Error::BadParam(format!("encrypt zone {:#04x}", zone)));
    }
    if address & !ADDRESS_MASK != 0 {
        log::debug!("encrypt address {:#06x} out of range", address);
        temp_key.invalidate();
        return Err(Error::CmdFail);
    }
    let tk = temp_key.require(Some(Source::Random), true)?;

    let mac = with_mac.then(|| {
        Sha256::new()
            .chain(&tk)
            .chain(&[Opcode::Write.as_u8(), zone])
            .chain(&address.to_le_bytes())
            .chain(&[SN_8, SN_0, SN_1])
            .chain(&[0u8; 25])
            .chain(data)
            .finalize()
    });

    xor_in_place(data, &tk);
    temp_key.invalidate();
    Ok(mac)
}

/// Decrypt a block returned by an encrypted Read.
pub fn decrypt(temp_key: &mut TempKey, data: &mut Digest) -> Result<()> {
    let tk = temp_key.require(Some(Source::Random), true)?;
    xor_in_place(data, &tk);
    temp_key.invalidate();
    Ok(())
}

fn xor_in_place(data: &mut Digest, key: &Digest) {
    data.iter_mut().zip(key).for_each(|(d, k)| *d ^= k);
}
