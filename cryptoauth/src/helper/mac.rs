// cryptoauth-rs/cryptoauth/src/helper/mac.rs
//! MAC and HMAC digests as computed by the device.

use super::sha256::Sha256;
use super::tempkey::{Source, TempKey};
use crate::constants::{SN_0, SN_1, SN_8};
use crate::protocol::commands::{
    HMAC_MODE_MASK, MAC_MODE_BLOCK1_TEMPKEY, MAC_MODE_BLOCK2_TEMPKEY, MAC_MODE_INCLUDE_OTP_64,
    MAC_MODE_INCLUDE_OTP_88, MAC_MODE_INCLUDE_SN, MAC_MODE_MASK, MAC_MODE_SOURCE_FLAG_MATCH,
};
use crate::types::{Digest, Opcode, SerialNumber};
use crate::{Error, Result};

/// OTP bytes the device can mix in (OTP[0..11]).
pub type OtpBytes = [u8; 11];

/// Inputs for [`mac`]. Fields a mode does not use may be `None`.
#[derive(Debug, Clone, Copy, Default)]
pub struct MacInput<'a> {
    /// MAC mode bits
    pub mode: u8,
    /// Slot the device would read the key from
    pub key_id: u16,
    /// Key[KeyID]; needed unless block 1 is TempKey
    pub key: Option<&'a Digest>,
    /// Needed unless block 2 is TempKey
    pub challenge: Option<&'a Digest>,
    /// Needed when an OTP mode bit is set
    pub otp: Option<&'a OtpBytes>,
    /// Needed when the serial number bit is set
    pub sn: Option<&'a SerialNumber>,
}

/// Inputs for [`hmac`].
#[derive(Debug, Clone, Copy)]
pub struct HmacInput<'a> {
    /// HMAC mode bits
    pub mode: u8,
    /// Slot the device would read the key from
    pub key_id: u16,
    /// Key[KeyID]
    pub key: &'a Digest,
    /// Needed when an OTP mode bit is set
    pub otp: Option<&'a OtpBytes>,
    /// Needed when the serial number bit is set
    pub sn: Option<&'a SerialNumber>,
}

fn require_extras(mode: u8, otp: Option<&OtpBytes>, sn: Option<&SerialNumber>) -> Result<()> {
    if mode & (MAC_MODE_INCLUDE_OTP_64 | MAC_MODE_INCLUDE_OTP_88) != 0 && otp.is_none() {
        return Err(Error::BadParam("mode includes OTP but none given".into()));
    }
    if mode & MAC_MODE_INCLUDE_SN != 0 && sn.is_none() {
        return Err(Error::BadParam("mode includes SN but none given".into()));
    }
    Ok(())
}

/// Opcode, mode, key id, then the OTP and serial number section shared by
/// MAC and HMAC.
fn feed_tail(
    h: &mut Sha256,
    opcode: Opcode,
    mode: u8,
    key_id: u16,
    otp: Option<&OtpBytes>,
    sn: Option<&SerialNumber>,
) {
    h.update(&[opcode.as_u8(), mode]);
    h.update(&key_id.to_le_bytes());

    match otp {
        Some(otp) if mode & MAC_MODE_INCLUDE_OTP_88 != 0 => h.update(otp),
        Some(otp) if mode & MAC_MODE_INCLUDE_OTP_64 != 0 => {
            h.update(&otp[..8]);
            h.update(&[0u8; 3]);
        }
        _ => h.update(&[0u8; 11]),
    }

    h.update(&[SN_8]);
    match sn {
        Some(sn) if mode & MAC_MODE_INCLUDE_SN != 0 => {
            h.update(&sn.tail());
            h.update(&[SN_0, SN_1]);
            h.update(&sn.middle());
        }
        _ => {
            h.update(&[0u8; 4]);
            h.update(&[SN_0, SN_1]);
            h.update(&[0u8; 2]);
        }
    }
}

/// Compute the response of a MAC command. TempKey is invalidated
/// afterwards whether or not this mode used it.
pub fn mac(temp_key: &mut TempKey, input: &MacInput<'_>) -> Result<Digest> {
    let mode = input.mode;
    if mode & !MAC_MODE_MASK != 0 {
        return Err(Error::BadParam(format!("mac mode {:#04x}", mode)));
    }
    let block1_tk = mode & MAC_MODE_BLOCK1_TEMPKEY != 0;
    let block2_tk = mode & MAC_MODE_BLOCK2_TEMPKEY != 0;
    if !block1_tk && input.key.is_none() {
        return Err(Error::BadParam("mac needs the key".into()));
    }
    if !block2_tk && input.challenge.is_none() {
        return Err(Error::BadParam("mac needs a challenge".into()));
    }
    require_extras(mode, input.otp, input.sn)?;

    let tk = if block1_tk || block2_tk {
        let source = Source::from_flag(mode & MAC_MODE_SOURCE_FLAG_MATCH != 0);
        temp_key.require(Some(source), false)?
    } else {
        [0u8; 32]
    };
    let block1 = match input.key {
        Some(key) if !block1_tk => key,
        _ => &tk,
    };
    let block2 = match input.challenge {
        Some(challenge) if !block2_tk => challenge,
        _ => &tk,
    };

    let mut h = Sha256::new();
    h.update(block1);
    h.update(block2);
    feed_tail(&mut h, Opcode::Mac, mode, input.key_id, input.otp, input.sn);
    let digest = h.finalize();

    temp_key.invalidate();
    Ok(digest)
}

/// Compute the response of an HMAC command (HMAC-SHA256 keyed with
/// Key[KeyID] over a MAC-style message with TempKey as block 2).
pub fn hmac(temp_key: &mut TempKey, input: &HmacInput<'_>) -> Result<Digest> {
    let mode = input.mode;
    if mode & !HMAC_MODE_MASK != 0 {
        return Err(Error::BadParam(format!("hmac mode {:#04x}", mode)));
    }
    require_extras(mode, input.otp, input.sn)?;
    let source = Source::from_flag(mode & MAC_MODE_SOURCE_FLAG_MATCH != 0);
    let tk = temp_key.require(Some(source), false)?;

    let mut ipad = [0x36u8; 64];
    let mut opad = [0x5Cu8; 64];
    for (i, k) in input.key.iter().enumerate() {
        ipad[i] ^= k;
        opad[i] ^= k;
    }

    let mut inner = Sha256::new();
    inner.update(&ipad);
    inner.update(&[0u8; 32]);
    inner.update(&tk);
    feed_tail(&mut inner, Opcode::Hmac, mode, input.key_id, input.otp, input.sn);
    let inner = inner.finalize();

    let digest = Sha256::new().chain(&opad).chain(&inner).finalize();
    temp_key.invalidate();
    Ok(digest)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::helper::tempkey::TempKeyState;

    #[test]
    fn mac_known_answer() {
        let key: Digest = crate::utils::parse_hex(
            "0000A1AC57FF404E45D40401BD0ED3C673D3B7B82D85D9F313B55EDA3D940000",
        )
        .unwrap()
        .try_into()
        .unwrap();
        let challenge: Digest = crate::utils::parse_hex(
            "00112233445566778899AABBCCDDEEFF00112233445566778899AABBCCDDEEFF",
        )
        .unwrap()
        .try_into()
        .unwrap();
        let mut tk = TempKey::new();
        let out = mac(
            &mut tk,
            &MacInput {
                key: Some(&key),
                challenge: Some(&challenge),
                ..MacInput::default()
            },
        )
        .unwrap();
        assert_eq!(
            crate::utils::bytes_to_hex(&out).to_uppercase(),
            "0667004F284D6E986204F460A3E8758A5985A67996C48A8846434EB3DB58A4FB"
        );
    }

    #[test]
    fn mac_needs_key_and_challenge() {
        let mut tk = TempKey::new();
        let res = mac(&mut tk, &MacInput::default());
        assert!(matches!(res, Err(Error::BadParam(_))));
        let key = [0u8; 32];
        let res = mac(
            &mut tk,
            &MacInput {
                key: Some(&key),
                ..MacInput::default()
            },
        );
        assert!(matches!(res, Err(Error::BadParam(_))));
    }

    #[test]
    fn mac_source_flag_must_match() {
        let mut tk = TempKey::new();
        tk.load([7; 32], TempKeyState::ValidRandom);
        let key = [1u8; 32];
        let input = MacInput {
            mode: MAC_MODE_BLOCK2_TEMPKEY | MAC_MODE_SOURCE_FLAG_MATCH,
            key: Some(&key),
            ..MacInput::default()
        };
        assert_eq!(mac(&mut tk, &input), Err(Error::CmdFail));
        assert!(!tk.is_valid());
    }

    #[test]
    fn mac_sn_requires_serial() {
        let mut tk = TempKey::new();
        let key = [1u8; 32];
        let input = MacInput {
            mode: MAC_MODE_INCLUDE_SN,
            key: Some(&key),
            challenge: Some(&key),
            ..MacInput::default()
        };
        assert!(matches!(mac(&mut tk, &input), Err(Error::BadParam(_))));
    }

    #[test]
    fn hmac_matches_manual_construction() {
        let mut tk = TempKey::new();
        tk.load([0x42; 32], TempKeyState::ValidRandom);
        let key = [0x0Bu8; 32];
        let out = hmac(
            &mut tk,
            &HmacInput {
                mode: 0,
                key_id: 3,
                key: &key,
                otp: None,
                sn: None,
            },
        )
        .unwrap();
        assert!(!tk.is_valid());

        let mut msg = vec![0u8; 32];
        msg.extend_from_slice(&[0x42; 32]);
        msg.extend_from_slice(&[0x11, 0x00, 0x03, 0x00]);
        msg.extend_from_slice(&[0u8; 11]);
        msg.extend_from_slice(&[0xEE, 0, 0, 0, 0, 0x01, 0x23, 0, 0]);
        let mut inner_pre: Vec<u8> = key.iter().map(|k| k ^ 0x36).collect();
        inner_pre.extend(std::iter::repeat(0x36).take(32));
        inner_pre.extend_from_slice(&msg);
        let inner = crate::helper::sha256(&inner_pre);
        let mut outer_pre: Vec<u8> = key.iter().map(|k| k ^ 0x5C).collect();
        outer_pre.extend(std::iter::repeat(0x5C).take(32));
        outer_pre.extend_from_slice(&inner);
        assert_eq!(out, crate::helper::sha256(&outer_pre));
    }
}
