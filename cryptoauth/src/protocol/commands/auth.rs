// cryptoauth-rs/cryptoauth/src/protocol/commands/auth.rs
//! MAC, CheckMac, HMAC, GenDig and Nonce rules.

use super::{array, bad_param, Command};
use crate::constants::{KEY_ID_MAX, OTP_BLOCK_MAX, ZONE_DATA, ZONE_OTP};
use crate::Result;

/// Second 32-byte block is TempKey, not the challenge
pub const MAC_MODE_BLOCK2_TEMPKEY: u8 = 0x01;
/// First 32-byte block is TempKey, not the slot key
pub const MAC_MODE_BLOCK1_TEMPKEY: u8 = 0x02;
/// TempKey.SourceFlag the command expects
pub const MAC_MODE_SOURCE_FLAG_MATCH: u8 = 0x04;
/// Both blocks from TempKey
pub const MAC_MODE_PASSTHROUGH: u8 = 0x07;
/// Include OTP[0..11]
pub const MAC_MODE_INCLUDE_OTP_88: u8 = 0x10;
/// Include OTP[0..8]
pub const MAC_MODE_INCLUDE_OTP_64: u8 = 0x20;
/// Include the full serial number
pub const MAC_MODE_INCLUDE_SN: u8 = 0x40;
/// Valid MAC mode bits
pub const MAC_MODE_MASK: u8 = 0x77;

/// Second block is TempKey
pub const CHECKMAC_MODE_BLOCK2_TEMPKEY: u8 = 0x01;
/// First block is TempKey
pub const CHECKMAC_MODE_BLOCK1_TEMPKEY: u8 = 0x02;
/// Expected TempKey.SourceFlag
pub const CHECKMAC_MODE_SOURCE_FLAG_MATCH: u8 = 0x04;
/// Include OTP[0..8]
pub const CHECKMAC_MODE_INCLUDE_OTP_64: u8 = 0x20;
/// Valid CheckMac mode bits
pub const CHECKMAC_MODE_MASK: u8 = 0x27;
/// OtherData bytes CheckMac sends
pub const CHECKMAC_OTHER_DATA_SIZE: usize = 13;

/// Expected TempKey.SourceFlag
pub const HMAC_MODE_SOURCE_FLAG_MATCH: u8 = 0x04;
/// Include OTP[0..11]
pub const HMAC_MODE_INCLUDE_OTP_88: u8 = 0x10;
/// Include OTP[0..8]
pub const HMAC_MODE_INCLUDE_OTP_64: u8 = 0x20;
/// Include the full serial number
pub const HMAC_MODE_INCLUDE_SN: u8 = 0x40;
/// Valid HMAC mode bits
pub const HMAC_MODE_MASK: u8 = 0x74;

/// GenDig over a config block
pub const GENDIG_ZONE_CONFIG: u8 = 0;
/// GenDig over an OTP block
pub const GENDIG_ZONE_OTP: u8 = 1;
/// GenDig over a key slot
pub const GENDIG_ZONE_DATA: u8 = 2;
/// Optional OtherData for GenDig
pub const GENDIG_OTHER_DATA_SIZE: usize = 4;

/// Random nonce, update the RNG seed
pub const NONCE_MODE_SEED_UPDATE: u8 = 0x00;
/// Random nonce, keep the seed
pub const NONCE_MODE_NO_SEED_UPDATE: u8 = 0x01;
/// Reserved; rejected
pub const NONCE_MODE_INVALID: u8 = 0x02;
/// NumIn goes straight into TempKey
pub const NONCE_MODE_PASSTHROUGH: u8 = 0x03;
/// NumIn length for the random modes
pub const NONCE_NUMIN_SIZE: usize = 20;
/// NumIn length in pass-through mode
pub const NONCE_NUMIN_SIZE_PASSTHROUGH: usize = 32;

fn check_key_id(key_id: u16) -> Result<()> {
    if key_id > KEY_ID_MAX {
        return Err(bad_param(format!("key id {} > {}", key_id, KEY_ID_MAX)));
    }
    Ok(())
}

pub(super) fn validate_mac(mode: u8, key_id: u16, has_challenge: bool) -> Result<()> {
    if mode & !MAC_MODE_MASK != 0 {
        return Err(bad_param(format!("mac mode {:#04x}", mode)));
    }
    if mode & MAC_MODE_BLOCK2_TEMPKEY == 0 && !has_challenge {
        return Err(bad_param("mac challenge required"));
    }
    check_key_id(key_id)
}

pub(super) fn validate_check_mac(mode: u8, key_id: u16) -> Result<()> {
    if mode | CHECKMAC_MODE_MASK != CHECKMAC_MODE_MASK {
        return Err(bad_param(format!("checkmac mode {:#04x}", mode)));
    }
    check_key_id(key_id)
}

pub(super) fn validate_hmac(mode: u8) -> Result<()> {
    if mode & !HMAC_MODE_MASK != 0 {
        return Err(bad_param(format!("hmac mode {:#04x}", mode)));
    }
    Ok(())
}

pub(super) fn validate_gen_dig(zone: u8, key_id: u16) -> Result<()> {
    if zone > GENDIG_ZONE_DATA {
        return Err(bad_param(format!("gendig zone {}", zone)));
    }
    if zone == ZONE_OTP && key_id > OTP_BLOCK_MAX {
        return Err(bad_param(format!("gendig otp block {}", key_id)));
    }
    if zone == ZONE_DATA && key_id > KEY_ID_MAX {
        return Err(bad_param(format!("gendig key id {}", key_id)));
    }
    Ok(())
}

pub(super) fn validate_nonce(mode: u8, num_in_len: usize) -> Result<()> {
    let expected = match mode {
        NONCE_MODE_SEED_UPDATE | NONCE_MODE_NO_SEED_UPDATE => NONCE_NUMIN_SIZE,
        NONCE_MODE_PASSTHROUGH => NONCE_NUMIN_SIZE_PASSTHROUGH,
        _ => return Err(bad_param(format!("nonce mode {}", mode))),
    };
    if num_in_len != expected {
        return Err(bad_param(format!(
            "nonce input of {} bytes, mode {} needs {}",
            num_in_len, mode, expected
        )));
    }
    Ok(())
}

pub(super) fn parse_mac(mode: u8, key_id: u16, data: &[u8]) -> Result<Command> {
    let challenge = if mode & MAC_MODE_BLOCK2_TEMPKEY == 0 {
        Some(array::<32>(data)?)
    } else if data.is_empty() {
        None
    } else {
        return Err(bad_param("mac with tempkey block2 takes no challenge"));
    };
    Ok(Command::Mac {
        mode,
        key_id,
        challenge,
    })
}

pub(super) fn parse_check_mac(mode: u8, key_id: u16, data: &[u8]) -> Result<Command> {
    if data.len() != 32 + 32 + CHECKMAC_OTHER_DATA_SIZE {
        return Err(bad_param(format!("checkmac data of {} bytes", data.len())));
    }
    Ok(Command::CheckMac {
        mode,
        key_id,
        challenge: Some(array::<32>(&data[..32])?),
        response: array::<32>(&data[32..64])?,
        other_data: array::<CHECKMAC_OTHER_DATA_SIZE>(&data[64..])?,
    })
}

pub(super) fn parse_gen_dig(zone: u8, key_id: u16, data: &[u8]) -> Result<Command> {
    let other_data = match data.len() {
        0 => None,
        GENDIG_OTHER_DATA_SIZE => Some(array::<GENDIG_OTHER_DATA_SIZE>(data)?),
        n => return Err(bad_param(format!("gendig data of {} bytes", n))),
    };
    Ok(Command::GenDig {
        zone,
        key_id,
        other_data,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn mac_mode_reserved_bits() {
        assert!(validate_mac(0x08, 0, true).is_err());
        assert!(validate_mac(0x80, 0, true).is_err());
        assert!(validate_mac(0x77, 0, false).is_ok());
    }

    #[test]
    fn mac_needs_challenge_unless_tempkey() {
        assert!(validate_mac(0x00, 0, false).is_err());
        assert!(validate_mac(0x01, 0, false).is_ok());
    }

    #[test]
    fn check_mac_rules() {
        assert!(validate_check_mac(0x27, 15).is_ok());
        assert!(validate_check_mac(0x10, 0).is_err());
        assert!(validate_check_mac(0x01, 16).is_err());
    }

    #[test]
    fn hmac_mask() {
        assert!(validate_hmac(0x74).is_ok());
        assert!(validate_hmac(0x01).is_err());
    }

    #[test]
    fn gen_dig_zones() {
        assert!(validate_gen_dig(GENDIG_ZONE_CONFIG, 0).is_ok());
        assert!(validate_gen_dig(GENDIG_ZONE_OTP, 1).is_ok());
        assert!(validate_gen_dig(GENDIG_ZONE_OTP, 2).is_err());
        assert!(validate_gen_dig(GENDIG_ZONE_DATA, 15).is_ok());
        assert!(validate_gen_dig(GENDIG_ZONE_DATA, 16).is_err());
        assert!(validate_gen_dig(3, 0).is_err());
    }

    #[test]
    fn nonce_modes() {
        assert!(validate_nonce(0, 20).is_ok());
        assert!(validate_nonce(1, 20).is_ok());
        assert!(validate_nonce(3, 32).is_ok());
        assert!(validate_nonce(2, 20).is_err());
        assert!(validate_nonce(4, 20).is_err());
        assert!(validate_nonce(0, 32).is_err());
    }
}
