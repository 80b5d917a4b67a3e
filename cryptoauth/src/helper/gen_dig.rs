// cryptoauth-rs/cryptoauth/src/helper/gen_dig.rs

use super::sha256::Sha256;
use super::tempkey::{Source, TempKey, TempKeyState};
use crate::constants::{KEY_ID_MAX, SN_0, SN_1, SN_8};
use crate::protocol::commands::GENDIG_ZONE_DATA;
use crate::types::{Digest, Opcode};
use crate::{Error, Result};

/// Fold `stored_value` (the slot, OTP block or config data the device
/// used) into TempKey, matching a GenDig command.
pub fn gen_dig(temp_key: &mut TempKey, zone: u8, key_id: u16, stored_value: &Digest) -> Result<()> {
    if zone > GENDIG_ZONE_DATA {
        return Err(Error::BadParam(format!("gendig zone {}", zone)));
    }
    let current = temp_key.require(None, false)?;
    let source = temp_key.source().unwrap_or(Source::Random);

    let value = Sha256::new()
        .chain(stored_value)
        .chain(&[Opcode::GenDig.as_u8(), zone])
        .chain(&key_id.to_le_bytes())
        .chain(&[SN_8, SN_0, SN_1])
        .chain(&[0u8; 25])
        .chain(&current)
        .finalize();

    let state = if zone == GENDIG_ZONE_DATA && key_id <= KEY_ID_MAX {
        TempKeyState::ValidDerived {
            key_id: (key_id & 0x0F) as u8,
            source,
        }
    } else {
        match source {
            Source::Random => TempKeyState::ValidRandom,
            Source::Input => TempKeyState::ValidPassthrough,
        }
    };
    temp_key.load(value, state);
    log::trace!("gendig zone {} key {}", zone, key_id);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn random_tk() -> TempKey {
        let mut tk = TempKey::new();
        crate::helper::nonce(&mut tk, 0, &[0x01; 20], Some(&[0x02; 32])).unwrap();
        tk
    }

    #[test]
    fn data_slot_marks_gen_data() {
        let mut tk = random_tk();
        gen_dig(&mut tk, 2, 4, &[0xAA; 32]).unwrap();
        assert_eq!(
            tk.state(),
            TempKeyState::ValidDerived {
                key_id: 4,
                source: Source::Random
            }
        );
    }

    #[test]
    fn otp_zone_keeps_source() {
        let mut tk = random_tk();
        gen_dig(&mut tk, 1, 0, &[0xAA; 32]).unwrap();
        assert_eq!(tk.state(), TempKeyState::ValidRandom);
        assert!(!tk.gen_data());
    }

    #[test]
    fn bad_zone_leaves_tempkey() {
        let mut tk = random_tk();
        assert!(matches!(gen_dig(&mut tk, 3, 0, &[0; 32]), Err(Error::BadParam(_))));
        assert!(tk.is_valid());
    }

    #[test]
    fn invalid_tempkey_is_cmd_fail() {
        let mut tk = TempKey::new();
        assert_eq!(gen_dig(&mut tk, 2, 0, &[0; 32]), Err(Error::CmdFail));
    }
}
