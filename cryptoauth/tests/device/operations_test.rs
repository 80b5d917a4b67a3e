#[path = "../common/mod.rs"]
mod common;

use common::fixtures;
use common::helpers::device_with_payloads;
use cryptoauth::constants::{ZONE_CONFIG, ZONE_DATA};
use cryptoauth::Error;

#[test]
fn nonce_on_unlocked_device() -> anyhow::Result<()> {
    let random = fixtures::unlocked_random();
    let (mut dev, mock) = device_with_payloads(&[&random])?;
    let rand_out = dev.nonce(0, &[0u8; 20])?;
    assert_eq!(rand_out, Some(random));
    let sent = mock.borrow().last_sent().map(|s| s.to_vec()).unwrap();
    assert_eq!(&sent[..5], &[27, 0x16, 0x00, 0x00, 0x00]);
    Ok(())
}

#[test]
fn mac_returns_digest() -> anyhow::Result<()> {
    let digest = fixtures::mac_digest();
    let (mut dev, _mock) = device_with_payloads(&[&digest])?;
    let got = dev.mac(0, 0, Some(&fixtures::mac_challenge()))?;
    assert_eq!(got, digest);
    Ok(())
}

#[test]
fn read_word_and_block() -> anyhow::Result<()> {
    let word = [0x01, 0x23, 0x5A, 0x6B];
    let block = [0x42u8; 32];
    let (mut dev, mock) = device_with_payloads(&[&word, &block])?;
    assert_eq!(dev.read_word(ZONE_CONFIG, 0)?, word);
    assert_eq!(dev.read_block(ZONE_DATA, 0x40)?, block);

    let m = mock.borrow();
    let read_block = m.last_sent().unwrap();
    assert_eq!(read_block[2], 0x82);
    assert_eq!(&read_block[3..5], &[0x10, 0x00]);
    Ok(())
}

#[test]
fn check_mac_bad_key_never_reaches_device() -> anyhow::Result<()> {
    let (mut dev, mock) = device_with_payloads(&[])?;
    let before = mock.borrow().call_count();
    let res = dev.check_mac(0, 16, Some(&[0; 32]), &[0; 32], &[0; 13]);
    assert!(matches!(res, Err(Error::BadParam(_))));
    assert_eq!(mock.borrow().call_count(), before);
    assert!(mock.borrow().sent.is_empty());
    Ok(())
}

#[test]
fn check_mac_miscompare() -> anyhow::Result<()> {
    let (mut dev, _mock) = device_with_payloads(&[&[0x01]])?;
    let res = dev.check_mac(0, 1, Some(&[0; 32]), &[0; 32], &[0; 13]);
    assert_eq!(res, Err(Error::CheckMacFailed));
    Ok(())
}

#[test]
fn execute_raw_sends_as_given() -> anyhow::Result<()> {
    let (mut dev, mock) = device_with_payloads(&[&[0x00]])?;
    let resp = dev.execute_raw(0x01, 0x00, 0x0000, &[], &[], &[])?;
    assert!(resp.status().into_result().is_ok());
    let m = mock.borrow();
    let sent = m.last_sent().unwrap();
    assert_eq!(sent.len(), 7);
    assert_eq!(sent[1], 0x01);
    Ok(())
}

#[test]
fn gen_key_returns_public_key() -> anyhow::Result<()> {
    let key = [0x5Au8; 64];
    let (mut dev, _mock) = device_with_payloads(&[&key])?;
    let public = dev.gen_key(0x00, 0, None)?;
    assert_eq!(public, key.to_vec());
    Ok(())
}

#[test]
fn status_only_commands() -> anyhow::Result<()> {
    let ok: &[u8] = &[0x00];
    let (mut dev, mock) = device_with_payloads(&[ok, ok, ok])?;
    dev.pause(0x03)?;
    dev.update_extra(0x01, 0x55)?;
    dev.priv_write(0x00, 2, &[0x11; 36], &[0u8; 32])?;

    let m = mock.borrow();
    assert_eq!(&m.sent[0][..5], &[7, 0x01, 0x03, 0x00, 0x00]);
    assert_eq!(&m.sent[1][..5], &[7, 0x20, 0x01, 0x55, 0x00]);
    assert_eq!(m.sent[2].len(), 75);
    assert_eq!(&m.sent[2][..5], &[75, 0x46, 0x00, 0x02, 0x00]);
    Ok(())
}

#[test]
fn dev_rev_reads_info_mode_zero() -> anyhow::Result<()> {
    let rev = [0x00, 0x00, 0x10, 0x00];
    let (mut dev, mock) = device_with_payloads(&[&rev])?;
    assert_eq!(dev.dev_rev()?, rev);
    assert_eq!(&mock.borrow().last_sent().unwrap()[..5], &[7, 0x30, 0x00, 0x00, 0x00]);
    Ok(())
}
