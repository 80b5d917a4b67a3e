#[path = "../common/mod.rs"]
mod common;

use common::fixtures;
use cryptoauth::helper::{
    check_mac, decrypt, derive_key, encrypt, gen_dig, hmac, mac, nonce, CheckMacInput,
    HmacInput, MacInput, TempKey, TempKeyState,
};
use cryptoauth::Error;

fn randomized(num_in: &[u8; 20]) -> TempKey {
    let mut tk = TempKey::new();
    nonce(&mut tk, 0, num_in, Some(&fixtures::unlocked_random())).unwrap();
    tk
}

#[test]
fn invalid_tempkey_fails_every_consumer() {
    let key = [0x11u8; 32];
    let mut data = [0u8; 32];

    let mut tk = TempKey::new();
    assert_eq!(gen_dig(&mut tk, 2, 1, &key), Err(Error::CmdFail));
    assert!(!tk.is_valid());

    let input = MacInput {
        mode: 0x01,
        key: Some(&key),
        ..MacInput::default()
    };
    assert_eq!(mac(&mut tk, &input), Err(Error::CmdFail));
    assert!(!tk.is_valid());

    let input = HmacInput {
        mode: 0,
        key_id: 0,
        key: &key,
        otp: None,
        sn: None,
    };
    assert_eq!(hmac(&mut tk, &input), Err(Error::CmdFail));
    assert!(!tk.is_valid());

    let input = CheckMacInput {
        mode: 0x01,
        password: &key,
        other_data: &[0; 13],
        otp: None,
        target_key: &key,
    };
    assert_eq!(check_mac(&mut tk, &input), Err(Error::CmdFail));
    assert!(!tk.is_valid());

    assert_eq!(derive_key(&mut tk, 0, 3, &key), Err(Error::CmdFail));
    assert!(!tk.is_valid());

    assert_eq!(encrypt(&mut tk, 2, 0, &mut data, false), Err(Error::CmdFail));
    assert!(!tk.is_valid());

    assert_eq!(decrypt(&mut tk, &mut data), Err(Error::CmdFail));
    assert!(!tk.is_valid());
    assert_eq!(data, [0u8; 32]);
}

fn nonce_gendig_mac(num_in: &[u8; 20]) -> [u8; 32] {
    let slot = [0x77u8; 32];
    let mut tk = randomized(num_in);
    gen_dig(&mut tk, 2, 4, &slot).unwrap();
    assert_eq!(
        tk.state(),
        TempKeyState::ValidDerived {
            key_id: 4,
            source: cryptoauth::helper::Source::Random
        }
    );
    let challenge = fixtures::mac_challenge();
    mac(
        &mut tk,
        &MacInput {
            mode: 0x02,
            key_id: 4,
            challenge: Some(&challenge),
            ..MacInput::default()
        },
    )
    .unwrap()
}

#[test]
fn nonce_gendig_mac_is_deterministic() {
    let a = nonce_gendig_mac(&[0x01; 20]);
    let b = nonce_gendig_mac(&[0x01; 20]);
    let c = nonce_gendig_mac(&[0x02; 20]);
    assert_eq!(a, b);
    assert_ne!(a, c);
}

#[test]
fn encrypted_write_then_read_round_trip() {
    let slot_key = [0x5Cu8; 32];
    let clear = [0xC3u8; 32];

    let mut tk = randomized(&[0x09; 20]);
    gen_dig(&mut tk, 2, 7, &slot_key).unwrap();
    let mut block = clear;
    let mac = encrypt(&mut tk, 0x82, 0x40 >> 2, &mut block, true).unwrap();
    assert!(mac.is_some());
    assert_ne!(block, clear);
    assert!(!tk.is_valid());

    let mut tk = randomized(&[0x09; 20]);
    gen_dig(&mut tk, 2, 7, &slot_key).unwrap();
    decrypt(&mut tk, &mut block).unwrap();
    assert_eq!(block, clear);
}

#[test]
fn check_mac_hands_target_to_tempkey() {
    let mut tk = randomized(&[0x03; 20]);
    let target = [0xA5u8; 32];
    check_mac(
        &mut tk,
        &CheckMacInput {
            mode: 0x01,
            password: &[0x10; 32],
            other_data: &[0; 13],
            otp: None,
            target_key: &target,
        },
    )
    .unwrap();
    assert_eq!(tk.value(), &target);

    // pass-through TempKey feeds DeriveKey with the random bit set
    let derived = derive_key(&mut tk, 0x04, 3, &[0x20; 32]).unwrap();
    assert_ne!(derived, target);
    assert!(!tk.is_valid());
}
