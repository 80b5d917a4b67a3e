// fixtures.rs - known-answer values and canned packets

use cryptoauth::Digest;

/// Slot 0 key of the MAC known-answer vector.
pub const MAC_KEY0_HEX: &str = "0000A1AC57FF404E45D40401BD0ED3C673D3B7B82D85D9F313B55EDA3D940000";
pub const MAC_CHALLENGE_HEX: &str =
    "00112233445566778899AABBCCDDEEFF00112233445566778899AABBCCDDEEFF";
pub const MAC_DIGEST_HEX: &str = "0667004F284D6E986204F460A3E8758A5985A67996C48A8846434EB3DB58A4FB";

pub fn digest_from_hex(s: &str) -> Digest {
    let bytes = hex::decode(s).expect("fixture hex");
    bytes.try_into().expect("fixture is 32 bytes")
}

pub fn mac_key0() -> Digest {
    digest_from_hex(MAC_KEY0_HEX)
}

pub fn mac_challenge() -> Digest {
    digest_from_hex(MAC_CHALLENGE_HEX)
}

pub fn mac_digest() -> Digest {
    digest_from_hex(MAC_DIGEST_HEX)
}

/// RandOut of a Nonce on an unlocked device: the RNG is not seeded yet.
pub fn unlocked_random() -> Digest {
    let mut out = [0u8; 32];
    for chunk in out.chunks_exact_mut(4) {
        chunk.copy_from_slice(&[0xFF, 0xFF, 0x00, 0x00]);
    }
    out
}

pub fn sample_serial() -> [u8; 9] {
    [0x01, 0x23, 0x5A, 0x6B, 0x10, 0x20, 0x30, 0x40, 0xEE]
}

pub fn sample_otp() -> [u8; 11] {
    [0xA0, 0xA1, 0xA2, 0xA3, 0xA4, 0xA5, 0xA6, 0xA7, 0xA8, 0xA9, 0xAA]
}
