// cryptoauth-rs/cryptoauth/src/test_support.rs

//! Test support helpers intended for use by unit and integration tests.
//!
//! These helpers centralize common MockPhysical setup so tests across the
//! crate and tests/ directory can reuse the same logic.
#![allow(dead_code)]

use std::cell::RefCell;
use std::rc::Rc;

use crate::comm::RetryPolicy;
use crate::constants::WAKE_RESPONSE;
use crate::device::{Awake, Device};
use crate::protocol::crc::crc16_bytes;
use crate::transport::{MockPhysical, Physical};
use crate::types::Interface;
use crate::Result;

/// Build a complete response packet: count, payload, CRC.
#[doc(hidden)]
pub fn response_packet(payload: &[u8]) -> Vec<u8> {
    let mut v = Vec::with_capacity(payload.len() + 3);
    v.push((payload.len() + 3) as u8);
    v.extend_from_slice(payload);
    let crc = crc16_bytes(&v);
    v.extend_from_slice(&crc);
    v
}

/// Physical layer delegating into a shared MockPhysical so a test can
/// inspect it after a Device took ownership.
#[doc(hidden)]
pub struct SharedMock {
    inner: Rc<RefCell<MockPhysical>>,
}

impl SharedMock {
    /// Share `inner` with the test.
    pub fn new(inner: Rc<RefCell<MockPhysical>>) -> Self {
        Self { inner }
    }
}

impl Physical for SharedMock {
    fn send_command(&mut self, packet: &[u8]) -> Result<()> {
        self.inner.borrow_mut().send_command(packet)
    }
    fn receive_response(&mut self, buf: &mut [u8]) -> Result<usize> {
        self.inner.borrow_mut().receive_response(buf)
    }
    fn wakeup(&mut self) -> Result<()> {
        self.inner.borrow_mut().wakeup()
    }
    fn sleep(&mut self) -> Result<()> {
        self.inner.borrow_mut().sleep()
    }
    fn idle(&mut self) -> Result<()> {
        self.inner.borrow_mut().idle()
    }
    fn reset_io(&mut self) -> Result<()> {
        self.inner.borrow_mut().reset_io()
    }
    fn resync(&mut self, buf: &mut [u8]) -> Result<()> {
        self.inner.borrow_mut().resync(buf)
    }
    fn set_device_id(&mut self, id: u8) -> Result<()> {
        self.inner.borrow_mut().set_device_id(id)
    }
    fn device_id(&self) -> u8 {
        self.inner.borrow().device_id()
    }
    fn interface(&self) -> Interface {
        self.inner.borrow().interface()
    }
    fn delay_ms(&mut self, ms: u32) {
        self.inner.borrow_mut().delay_ms(ms)
    }
}

/// Boxed SharedMock plus the handle to inspect it.
#[doc(hidden)]
pub fn shared_mock() -> (Box<dyn Physical>, Rc<RefCell<MockPhysical>>) {
    let inner = Rc::new(RefCell::new(MockPhysical::new()));
    (Box::new(SharedMock::new(inner.clone())), inner)
}

/// Awake device backed by a shared mock. The wake response is queued
/// first, then `responses` for the commands the test runs.
#[doc(hidden)]
pub fn awake_mock_device(
    responses: Vec<Vec<u8>>,
) -> Result<(Device<Awake>, Rc<RefCell<MockPhysical>>)> {
    let (boxed, inner) = shared_mock();
    {
        let mut m = inner.borrow_mut();
        m.push_response(WAKE_RESPONSE.to_vec());
        for r in responses {
            m.push_response(r);
        }
    }
    let device = Device::new_with_physical(boxed, RetryPolicy::default()).wakeup()?;
    Ok((device, inner))
}
