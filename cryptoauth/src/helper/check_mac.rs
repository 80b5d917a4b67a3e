// cryptoauth-rs/cryptoauth/src/helper/check_mac.rs

use super::sha256::Sha256;
use super::tempkey::{Source, TempKey, TempKeyState};
use crate::constants::{SN_0, SN_1, SN_8};
use crate::protocol::commands::{
    CHECKMAC_MODE_BLOCK1_TEMPKEY, CHECKMAC_MODE_BLOCK2_TEMPKEY, CHECKMAC_MODE_INCLUDE_OTP_64,
};
use crate::types::Digest;
use crate::{Error, Result};

/// Inputs for [`check_mac`].
#[derive(Debug, Clone, Copy)]
pub struct CheckMacInput<'a> {
    /// CheckMac mode bits
    pub mode: u8,
    /// Secret the client hashes in place of the slot key
    pub password: &'a Digest,
    /// OtherData sent with the command
    pub other_data: &'a [u8; 13],
    /// OTP[0..8]; needed when mode bit 5 is set
    pub otp: Option<&'a [u8; 8]>,
    /// Value copied into TempKey when the device compare succeeds
    pub target_key: &'a Digest,
}

/// Compute the client response a CheckMac command compares against, for
/// the password-check flow (block 1 the password, block 2 TempKey).
///
/// On success TempKey holds `target_key`, as the device's copy-on-match
/// leaves it.
pub fn check_mac(temp_key: &mut TempKey, input: &CheckMacInput<'_>) -> Result<Digest> {
    let mode = input.mode;
    if mode & (CHECKMAC_MODE_BLOCK1_TEMPKEY | CHECKMAC_MODE_BLOCK2_TEMPKEY)
        != CHECKMAC_MODE_BLOCK2_TEMPKEY
    {
        return Err(Error::BadParam(format!("checkmac mode {:#04x}", mode)));
    }
    let otp = match (mode & CHECKMAC_MODE_INCLUDE_OTP_64 != 0, input.otp) {
        (true, None) => return Err(Error::BadParam("mode includes OTP but none given".into())),
        (true, Some(otp)) => *otp,
        (false, _) => [0u8; 8],
    };
    let tk = temp_key.require(Some(Source::Random), false)?;

    let od = input.other_data;
    let digest = Sha256::new()
        .chain(input.password)
        .chain(&tk)
        .chain(&od[0..4])
        .chain(&otp)
        .chain(&od[4..7])
        .chain(&[SN_8])
        .chain(&od[7..11])
        .chain(&[SN_0, SN_1])
        .chain(&od[11..13])
        .finalize();

    temp_key.load(*input.target_key, TempKeyState::ValidPassthrough);
    Ok(digest)
}
