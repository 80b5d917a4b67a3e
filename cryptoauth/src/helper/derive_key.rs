// cryptoauth-rs/cryptoauth/src/helper/derive_key.rs

use super::sha256::Sha256;
use super::tempkey::{Source, TempKey};
use crate::constants::{KEY_ID_MAX, SN_0, SN_1, SN_8};
use crate::protocol::commands::DERIVE_KEY_RANDOM_FLAG;
use crate::types::{Digest, Opcode};
use crate::{Error, Result};

fn check_params(random: u8, target_key_id: u16) -> Result<()> {
    if random & !DERIVE_KEY_RANDOM_FLAG != 0 {
        return Err(Error::BadParam(format!("derivekey random {:#04x}", random)));
    }
    if target_key_id > KEY_ID_MAX {
        return Err(Error::BadParam(format!("derivekey target {}", target_key_id)));
    }
    Ok(())
}

/// The key DeriveKey writes into the target slot.
/// SHA-256(parent ‖ 1C ‖ random ‖ target ‖ EE 01 23 ‖ 0×25 ‖ TempKey).
pub fn derive_key(
    temp_key: &mut TempKey,
    random: u8,
    target_key_id: u16,
    parent: &Digest,
) -> Result<Digest> {
    check_params(random, target_key_id)?;
    let source = Source::from_flag(random & DERIVE_KEY_RANDOM_FLAG != 0);
    let tk = temp_key.require(Some(source), false)?;

    let digest = Sha256::new()
        .chain(parent)
        .chain(&[Opcode::DeriveKey.as_u8(), random])
        .chain(&target_key_id.to_le_bytes())
        .chain(&[SN_8, SN_0, SN_1])
        .chain(&[0u8; 25])
        .chain(&tk)
        .finalize();
    temp_key.invalidate();
    Ok(digest)
}

/// Authorizing MAC for a DeriveKey command when the target slot requires one.
pub fn derive_key_mac(random: u8, target_key_id: u16, parent: &Digest) -> Result<Digest> {
    check_params(random, target_key_id)?;
    Ok(Sha256::new()
        .chain(parent)
        .chain(&[Opcode::DeriveKey.as_u8(), random])
        .chain(&target_key_id.to_le_bytes())
        .chain(&[SN_8, SN_0, SN_1])
        .finalize())
}
