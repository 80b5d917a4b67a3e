// helpers.rs - mock-backed devices and sessions

use std::cell::RefCell;
use std::rc::Rc;

use cryptoauth::device::{Awake, Device};
use cryptoauth::host::HostSession;
use cryptoauth::test_support::{awake_mock_device, response_packet, shared_mock};
use cryptoauth::{MockPhysical, RetryPolicy};

pub type SharedMock = Rc<RefCell<MockPhysical>>;

/// Retry policy without the resync and wake delays.
pub fn fast_policy() -> RetryPolicy {
    RetryPolicy {
        sync_timeout_ms: 0,
        wake_failure_delay_ms: 0,
        ..RetryPolicy::default()
    }
}

/// Awake device whose command responses are `payloads` wrapped into packets.
pub fn device_with_payloads(payloads: &[&[u8]]) -> anyhow::Result<(Device<Awake>, SharedMock)> {
    let packets = payloads.iter().map(|p| response_packet(p)).collect();
    Ok(awake_mock_device(packets)?)
}

pub fn host_session() -> (HostSession, SharedMock) {
    let (phys, mock) = shared_mock();
    (HostSession::new(phys, fast_policy()), mock)
}

/// A response packet with one CRC bit flipped.
pub fn corrupted(payload: &[u8]) -> Vec<u8> {
    let mut p = response_packet(payload);
    let last = p.len() - 1;
    p[last] ^= 0x01;
    p
}
