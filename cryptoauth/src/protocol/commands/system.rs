// cryptoauth-rs/cryptoauth/src/protocol/commands/system.rs
//! Info, Pause, Random and UpdateExtra rules.

use super::bad_param;
use crate::Result;

/// Revision word
pub const INFO_MODE_REVISION: u8 = 0x00;
/// Whether the ECC key in a slot is valid
pub const INFO_MODE_KEY_VALID: u8 = 0x01;
/// Volatile state, TempKey validity included
pub const INFO_MODE_STATE: u8 = 0x02;
/// GPIO pin state
pub const INFO_MODE_GPIO: u8 = 0x03;
/// Highest Info mode
pub const INFO_MODE_MAX: u8 = 0x03;
/// Highest Info param
pub const INFO_PARAM_MAX: u16 = 0x03;

/// Update the RNG seed first
pub const RANDOM_SEED_UPDATE: u8 = 0x00;
/// Keep the RNG seed
pub const RANDOM_NO_SEED_UPDATE: u8 = 0x01;

/// UpdateExtra target: UserExtra
pub const UPDATE_CONFIG_BYTE_85: u8 = 0x00;
/// UpdateExtra target: Selector
pub const UPDATE_CONFIG_BYTE_86: u8 = 0x01;

pub(super) fn validate_info(mode: u8, param: u16) -> Result<()> {
    if mode > INFO_MODE_MAX || param > INFO_PARAM_MAX {
        return Err(bad_param(format!("info mode {} param {}", mode, param)));
    }
    Ok(())
}

pub(super) fn validate_random(mode: u8) -> Result<()> {
    if mode > RANDOM_NO_SEED_UPDATE {
        return Err(bad_param(format!("random mode {}", mode)));
    }
    Ok(())
}

pub(super) fn validate_update_extra(mode: u8, value: u16) -> Result<()> {
    if mode > UPDATE_CONFIG_BYTE_86 || value > 0xFF {
        return Err(bad_param(format!(
            "updateextra mode {} value {:#06x}",
            mode, value
        )));
    }
    Ok(())
}
