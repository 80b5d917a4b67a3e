#[path = "../common/mod.rs"]
mod common;

use cryptoauth::constants::{ZONE_CONFIG, ZONE_COUNT_FLAG, ZONE_DATA};
use cryptoauth::protocol::opcode_table::response_size;
use cryptoauth::protocol::{Command, WriteData};
use cryptoauth::{Error, Opcode};

#[test]
fn read_response_sizes() {
    assert_eq!(response_size(Opcode::Read, ZONE_CONFIG), 7);
    assert_eq!(response_size(Opcode::Read, ZONE_DATA | ZONE_COUNT_FLAG), 35);
}

#[test]
fn mac_packet_layout() -> anyhow::Result<()> {
    let challenge = common::fixtures::mac_challenge();
    let cmd = Command::Mac {
        mode: 0,
        key_id: 0,
        challenge: Some(challenge),
    };
    let pkt = cmd.encode()?;
    let bytes = pkt.as_bytes();
    assert_eq!(bytes.len(), 39);
    assert_eq!(&bytes[..5], &[39, 0x08, 0x00, 0x00, 0x00]);
    assert_eq!(&bytes[5..37], &challenge);
    assert_eq!(cmd.response_size(), 35);
    Ok(())
}

#[test]
fn check_mac_rejects_key_16() {
    let cmd = Command::CheckMac {
        mode: 0,
        key_id: 16,
        challenge: Some([0; 32]),
        response: [0; 32],
        other_data: [0; 13],
    };
    assert!(matches!(cmd.encode(), Err(Error::BadParam(_))));
}

#[test]
fn write_block_uses_word_address() {
    let ok = Command::Write {
        zone: ZONE_DATA | ZONE_COUNT_FLAG,
        address: 0x20,
        data: WriteData::Block([0x11; 32]),
        mac: None,
    };
    let pkt = ok.encode().unwrap();
    // byte address 0x20 is word 8
    assert_eq!(pkt.param2(), 0x0008);
    assert_eq!(pkt.data().len(), 32);
}

#[test]
fn from_raw_matches_typed() -> anyhow::Result<()> {
    let typed = Command::Random { mode: 0 };
    let raw = Command::from_raw(0x1B, 0x00, 0x0000, &[])?;
    assert_eq!(raw, typed);
    assert!(Command::from_raw(0x99, 0, 0, &[]).is_err());
    Ok(())
}

#[test]
fn nonce_num_in_sizes() {
    for (mode, len, ok) in [(0u8, 20usize, true), (0, 32, false), (3, 32, true), (3, 20, false)] {
        let cmd = Command::Nonce {
            mode,
            num_in: vec![0; len],
        };
        assert_eq!(cmd.encode().is_ok(), ok, "mode {} len {}", mode, len);
    }
}
