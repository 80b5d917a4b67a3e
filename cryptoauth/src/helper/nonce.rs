// cryptoauth-rs/cryptoauth/src/helper/nonce.rs

use super::sha256::Sha256;
use super::tempkey::{TempKey, TempKeyState};
use crate::protocol::commands::{
    NONCE_MODE_NO_SEED_UPDATE, NONCE_MODE_PASSTHROUGH, NONCE_MODE_SEED_UPDATE,
    NONCE_NUMIN_SIZE, NONCE_NUMIN_SIZE_PASSTHROUGH,
};
use crate::protocol::parser::array_at;
use crate::types::{Digest, Opcode};
use crate::{Error, Result};

/// Reproduce the TempKey a Nonce command leaves in the device.
///
/// Modes 0 and 1 need the RandOut the device returned; mode 3 loads
/// `num_in` (32 bytes) directly.
pub fn nonce(
    temp_key: &mut TempKey,
    mode: u8,
    num_in: &[u8],
    rand_out: Option<&Digest>,
) -> Result<()> {
    match mode {
        NONCE_MODE_SEED_UPDATE | NONCE_MODE_NO_SEED_UPDATE => {
            let rand_out =
                rand_out.ok_or_else(|| Error::BadParam("nonce needs the device RandOut".into()))?;
            let num_in = array_at::<NONCE_NUMIN_SIZE>(num_in, 0)
                .map_err(|_| Error::BadParam("nonce NumIn must be 20 bytes".into()))?;
            let value = Sha256::new()
                .chain(rand_out)
                .chain(&num_in)
                .chain(&[Opcode::Nonce.as_u8(), mode, 0x00])
                .finalize();
            temp_key.load(value, TempKeyState::ValidRandom);
        }
        NONCE_MODE_PASSTHROUGH => {
            let value = array_at::<NONCE_NUMIN_SIZE_PASSTHROUGH>(num_in, 0)
                .map_err(|_| Error::BadParam("pass-through NumIn must be 32 bytes".into()))?;
            temp_key.load(value, TempKeyState::ValidPassthrough);
        }
        other => return Err(Error::BadParam(format!("nonce mode {}", other))),
    }
    Ok(())
}
