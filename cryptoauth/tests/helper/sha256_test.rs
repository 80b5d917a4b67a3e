#[path = "../common/mod.rs"]
mod common;

use cryptoauth::helper::{sha256, Sha256};
use proptest::prelude::*;
use sha2::Digest as _;

#[test]
fn standard_vectors() {
    assert_eq!(
        hex::encode(sha256(b"abc")),
        "ba7816bf8f01cfea414140de5dae2223b00361a396177a9cb410ff61f20015ad"
    );
    assert_eq!(
        hex::encode(sha256(b"")),
        "e3b0c44298fc1c149afbf4c8996fb92427ae41e4649b934ca495991b7852b855"
    );
}

proptest! {
    #[test]
    fn matches_sha2(data in prop::collection::vec(any::<u8>(), 0..300)) {
        let expected: [u8; 32] = sha2::Sha256::digest(&data).into();
        prop_assert_eq!(sha256(&data), expected);
    }

    #[test]
    fn streaming_matches_one_shot(data in prop::collection::vec(any::<u8>(), 0..300),
                                  cut in 0usize..300) {
        let cut = cut.min(data.len());
        let mut h = Sha256::new();
        h.update(&data[..cut]);
        h.update(&data[cut..]);
        prop_assert_eq!(h.finalize(), sha256(&data));
    }
}
