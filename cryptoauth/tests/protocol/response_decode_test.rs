#[path = "../common/mod.rs"]
mod common;

use cryptoauth::protocol::Response;
use cryptoauth::test_support::response_packet;
use cryptoauth::{DeviceStatus, Opcode};
use proptest::prelude::*;

#[test]
fn status_packet_for_any_opcode() {
    let pkt = response_packet(&[0x0F]);
    let resp = Response::decode(Opcode::Mac, 0, &pkt).unwrap();
    assert_eq!(resp, Response::Status(DeviceStatus::ExecutionError));
}

#[test]
fn block_and_word() {
    let digest = common::fixtures::mac_digest();
    let resp = Response::decode(Opcode::Mac, 0, &response_packet(&digest)).unwrap();
    assert_eq!(resp.into_block().unwrap(), digest);

    let resp = Response::decode(Opcode::Info, 0, &response_packet(&[0, 0, 0x10, 0x05])).unwrap();
    assert_eq!(resp.into_word().unwrap(), [0, 0, 0x10, 0x05]);
}

#[test]
fn wrong_size_is_error() {
    let pkt = response_packet(&[0u8; 4]);
    assert!(Response::decode(Opcode::Random, 0, &pkt).is_err());
}

proptest! {
    #[test]
    fn decode_never_panics(op in prop::sample::select(Opcode::ALL.to_vec()),
                           param1 in any::<u8>(),
                           packet in prop::collection::vec(any::<u8>(), 0..80)) {
        use std::panic::{catch_unwind, AssertUnwindSafe};
        let res = catch_unwind(AssertUnwindSafe(|| Response::decode(op, param1, &packet)));
        prop_assert!(res.is_ok());
    }
}
