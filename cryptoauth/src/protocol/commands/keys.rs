// cryptoauth-rs/cryptoauth/src/protocol/commands/keys.rs
//! DeriveKey and the ECC108 key commands: GenKey, Sign, Verify, PrivWrite.

use super::{array, bad_param, Command};
use crate::constants::KEY_ID_MAX;
use crate::Result;

/// TempKey must come from a random nonce
pub const DERIVE_KEY_RANDOM_FLAG: u8 = 0x04;
/// Authorizing MAC length
pub const DERIVE_KEY_MAC_SIZE: usize = 32;

/// Recompute the public key of a stored private key
pub const GENKEY_MODE_PUBLIC: u8 = 0x00;
/// Generate a new private key
pub const GENKEY_MODE_PRIVATE: u8 = 0x04;
/// Digest of the public key into TempKey
pub const GENKEY_MODE_DIGEST: u8 = 0x10;
/// Valid GenKey mode bits
pub const GENKEY_MODE_MASK: u8 = 0x1C;
/// OtherData for digest mode
pub const GENKEY_OTHER_DATA_SIZE: usize = 3;

/// Sign an external message loaded into TempKey
pub const SIGN_MODE_EXTERNAL: u8 = 0x80;
/// Valid Sign mode bits
pub const SIGN_MODE_MASK: u8 = 0x80;

/// Public key from a slot
pub const VERIFY_MODE_STORED: u8 = 0x00;
/// Public key in the command
pub const VERIFY_MODE_EXTERNAL: u8 = 0x02;
/// R and S
pub const VERIFY_SIGNATURE_SIZE: usize = 64;
/// X and Y
pub const VERIFY_PUBLIC_KEY_SIZE: usize = 64;

/// Value is encrypted with TempKey
pub const PRIVWRITE_MODE_ENCRYPT: u8 = 0x40;
/// Padded private key
pub const PRIVWRITE_VALUE_SIZE: usize = 36;
/// Authorizing MAC length
pub const PRIVWRITE_MAC_SIZE: usize = 32;

fn check_key_id(name: &str, key_id: u16) -> Result<()> {
    if key_id > KEY_ID_MAX {
        return Err(bad_param(format!("{} key id {}", name, key_id)));
    }
    Ok(())
}

pub(super) fn validate_derive_key(random: u8, target: u16) -> Result<()> {
    if random & !DERIVE_KEY_RANDOM_FLAG != 0 {
        return Err(bad_param(format!("derivekey random {:#04x}", random)));
    }
    check_key_id("derivekey", target)
}

pub(super) fn validate_gen_key(mode: u8, key_id: u16, has_other_data: bool) -> Result<()> {
    if mode & !GENKEY_MODE_MASK != 0 {
        return Err(bad_param(format!("genkey mode {:#04x}", mode)));
    }
    if has_other_data && mode & GENKEY_MODE_DIGEST == 0 {
        return Err(bad_param("genkey other data only with digest mode"));
    }
    check_key_id("genkey", key_id)
}

pub(super) fn validate_sign(mode: u8, key_id: u16) -> Result<()> {
    if mode & !SIGN_MODE_MASK != 0 {
        return Err(bad_param(format!("sign mode {:#04x}", mode)));
    }
    check_key_id("sign", key_id)
}

pub(super) fn validate_verify(mode: u8, key_id: u16, has_public_key: bool) -> Result<()> {
    match (mode, has_public_key) {
        (VERIFY_MODE_STORED, false) | (VERIFY_MODE_EXTERNAL, true) => {}
        (VERIFY_MODE_STORED, true) => {
            return Err(bad_param("verify stored mode takes no public key"));
        }
        (VERIFY_MODE_EXTERNAL, false) => {
            return Err(bad_param("verify external mode needs a public key"));
        }
        _ => return Err(bad_param(format!("verify mode {:#04x}", mode))),
    }
    check_key_id("verify", key_id)
}

pub(super) fn validate_priv_write(mode: u8, key_id: u16) -> Result<()> {
    if mode & !PRIVWRITE_MODE_ENCRYPT != 0 {
        return Err(bad_param(format!("privwrite zone {:#04x}", mode)));
    }
    check_key_id("privwrite", key_id)
}

pub(super) fn parse_derive_key(random: u8, target: u16, data: &[u8]) -> Result<Command> {
    let mac = match data.len() {
        0 => None,
        DERIVE_KEY_MAC_SIZE => Some(array::<32>(data)?),
        n => return Err(bad_param(format!("derivekey data of {} bytes", n))),
    };
    Ok(Command::DeriveKey {
        random,
        target,
        mac,
    })
}

pub(super) fn parse_gen_key(mode: u8, key_id: u16, data: &[u8]) -> Result<Command> {
    let other_data = match data.len() {
        0 => None,
        GENKEY_OTHER_DATA_SIZE => Some(array::<GENKEY_OTHER_DATA_SIZE>(data)?),
        n => return Err(bad_param(format!("genkey data of {} bytes", n))),
    };
    Ok(Command::GenKey {
        mode,
        key_id,
        other_data,
    })
}

pub(super) fn parse_verify(mode: u8, key_id: u16, data: &[u8]) -> Result<Command> {
    let (signature, public_key) = match data.len() {
        VERIFY_SIGNATURE_SIZE => (array::<VERIFY_SIGNATURE_SIZE>(data)?, None),
        n if n == VERIFY_SIGNATURE_SIZE + VERIFY_PUBLIC_KEY_SIZE => (
            array::<VERIFY_SIGNATURE_SIZE>(&data[..VERIFY_SIGNATURE_SIZE])?,
            Some(array::<VERIFY_PUBLIC_KEY_SIZE>(
                &data[VERIFY_SIGNATURE_SIZE..],
            )?),
        ),
        n => return Err(bad_param(format!("verify data of {} bytes", n))),
    };
    Ok(Command::Verify {
        mode,
        key_id,
        signature,
        public_key,
    })
}

pub(super) fn parse_priv_write(mode: u8, key_id: u16, data: &[u8]) -> Result<Command> {
    if data.len() != PRIVWRITE_VALUE_SIZE + PRIVWRITE_MAC_SIZE {
        return Err(bad_param(format!("privwrite data of {} bytes", data.len())));
    }
    Ok(Command::PrivWrite {
        mode,
        key_id,
        value: array::<PRIVWRITE_VALUE_SIZE>(&data[..PRIVWRITE_VALUE_SIZE])?,
        mac: array::<PRIVWRITE_MAC_SIZE>(&data[PRIVWRITE_VALUE_SIZE..])?,
    })
}
