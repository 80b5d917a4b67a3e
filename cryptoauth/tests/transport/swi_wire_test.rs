#[path = "../common/mod.rs"]
mod common;

use cryptoauth::comm::{self, PollTiming};
use cryptoauth::constants::SWI_FLAG_CMD;
use cryptoauth::test_support::response_packet;
use cryptoauth::transport::{Physical, SimulatedWire, SwiConfig, SwiPhysical};
use proptest::prelude::*;

fn wire() -> SwiPhysical<SimulatedWire> {
    SwiPhysical::new(SimulatedWire::default(), SwiConfig::default())
}

#[test]
fn random_command_over_simulated_wire() -> anyhow::Result<()> {
    let mut phys = wire();
    let random = [0x6Du8; 32];
    phys.hal_mut().push_wake_response();
    phys.hal_mut().push_response(response_packet(&random));

    let policy = common::helpers::fast_policy();
    let mut rx = [0u8; 35];
    comm::wakeup(&mut phys, &mut rx, &policy)?;

    let mut tx = [0x07u8, 0x1B, 0x00, 0x00, 0x00, 0x00, 0x00];
    let count = comm::send_and_receive(&mut phys, &mut tx, &mut rx, PollTiming::new(0, 0), &policy)?;
    assert_eq!(count, 35);
    assert_eq!(&rx[1..33], &random);
    assert_eq!(phys.hal().pending_responses(), 0);

    let packets = phys.hal().host_packets();
    assert!(packets.contains(&&[SWI_FLAG_CMD][..]));
    assert!(packets.contains(&&tx[..]));
    Ok(())
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(32))]

    #[test]
    fn response_round_trip(payload in prop::collection::vec(any::<u8>(), 1..=32)) {
        let mut phys = wire();
        let packet = response_packet(&payload);
        phys.hal_mut().push_response(packet.clone());
        let mut buf = [0u8; 35];
        let n = phys.receive_response(&mut buf).unwrap();
        prop_assert_eq!(&buf[..n], &packet[..]);
    }

    #[test]
    fn command_round_trip(body in prop::collection::vec(any::<u8>(), 4..40)) {
        let mut phys = wire();
        let mut packet = vec![(body.len() + 3) as u8];
        packet.extend_from_slice(&body);
        packet.extend_from_slice(&[0, 0]);
        phys.send_command(&packet).unwrap();
        prop_assert_eq!(phys.hal().bursts.last().unwrap(), &packet);
    }
}
