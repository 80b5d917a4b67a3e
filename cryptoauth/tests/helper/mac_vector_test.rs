#[path = "../common/mod.rs"]
mod common;

use common::fixtures;
use cryptoauth::helper::{mac, MacInput, TempKey};
use cryptoauth::test_support::response_packet;
use cryptoauth::SerialNumber;

#[test]
fn mac_mode0_known_answer() -> anyhow::Result<()> {
    let key = fixtures::mac_key0();
    let challenge = fixtures::mac_challenge();
    let mut tk = TempKey::new();
    let digest = mac(
        &mut tk,
        &MacInput {
            mode: 0,
            key_id: 0,
            key: Some(&key),
            challenge: Some(&challenge),
            ..MacInput::default()
        },
    )?;
    assert_eq!(digest, fixtures::mac_digest());

    let packet = response_packet(&digest);
    assert_eq!(&packet[33..], &[0xE5, 0x73]);
    Ok(())
}

#[test]
fn serial_and_otp_change_the_digest() -> anyhow::Result<()> {
    let key = fixtures::mac_key0();
    let challenge = fixtures::mac_challenge();
    let sn = SerialNumber::from_bytes(fixtures::sample_serial());
    let otp = fixtures::sample_otp();

    let run = |mode: u8| {
        let mut tk = TempKey::new();
        mac(
            &mut tk,
            &MacInput {
                mode,
                key_id: 0,
                key: Some(&key),
                challenge: Some(&challenge),
                otp: Some(&otp),
                sn: Some(&sn),
            },
        )
    };
    let plain = run(0x00)?;
    let with_sn = run(0x40)?;
    let with_otp64 = run(0x20)?;
    let with_otp88 = run(0x10)?;
    assert_eq!(plain, fixtures::mac_digest());
    assert_ne!(plain, with_sn);
    assert_ne!(plain, with_otp64);
    assert_ne!(with_otp64, with_otp88);
    Ok(())
}
