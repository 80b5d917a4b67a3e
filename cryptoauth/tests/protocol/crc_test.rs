#[path = "../common/mod.rs"]
mod common;

use cryptoauth::protocol::crc::{append_crc, crc16, crc16_bytes, crc16_update, verify_crc};
use cryptoauth::Error;
use proptest::prelude::*;

#[test]
fn wake_response_crc() {
    assert_eq!(crc16_bytes(&[0x04, 0x11]), [0x33, 0x43]);
}

#[test]
fn mac_response_crc() {
    let mut packet = vec![0x23];
    packet.extend_from_slice(&common::fixtures::mac_digest());
    assert_eq!(crc16_bytes(&packet), [0xE5, 0x73]);
}

#[test]
fn empty_input() {
    assert_eq!(crc16(&[]), 0);
}

proptest! {
    #[test]
    fn chained_equals_one_shot(data in prop::collection::vec(any::<u8>(), 0..128), split in 0usize..128) {
        let split = split.min(data.len());
        let (a, b) = data.split_at(split);
        prop_assert_eq!(crc16_update(crc16_update(0, a), b), crc16(&data));
    }

    #[test]
    fn appended_crc_verifies(data in prop::collection::vec(any::<u8>(), 2..96)) {
        let mut packet = data.clone();
        packet.extend_from_slice(&[0, 0]);
        append_crc(&mut packet).unwrap();
        prop_assert!(verify_crc(&packet).is_ok());
        prop_assert_eq!(crc16_bytes(&data), [packet[packet.len() - 2], packet[packet.len() - 1]]);
    }

    #[test]
    fn flipped_bit_is_detected(data in prop::collection::vec(any::<u8>(), 2..64), bit in 0usize..512) {
        let mut packet = data.clone();
        packet.extend_from_slice(&crc16_bytes(&data));
        let bit = bit % (packet.len() * 8);
        packet[bit / 8] ^= 1 << (bit % 8);
        let is_bad_crc = matches!(verify_crc(&packet), Err(Error::BadCrc { .. }));
        prop_assert!(is_bad_crc);
    }
}
