// cryptoauth-rs/cryptoauth/src/transport/mock.rs

use std::collections::VecDeque;

use crate::transport::traits::{check_count, Physical};
use crate::types::Interface;
use crate::{Error, Result};

/// Mock physical layer for unit tests. Records every call and replays
/// queued receive results. Delays are recorded, never slept.
#[derive(Debug, Default)]
pub struct MockPhysical {
    /// Every packet sent, in order
    pub sent: Vec<Vec<u8>>,
    /// Results handed out by `receive`, front first
    pub responses: VecDeque<Result<Vec<u8>>>,
    /// Every delay requested, in ms
    pub delays: Vec<u32>,
    /// Calls to `receive`
    pub receives: usize,
    /// Calls to `wakeup`
    pub wakeups: usize,
    /// Calls to `sleep`
    pub sleeps: usize,
    /// Calls to `idle`
    pub idles: usize,
    /// Calls to `resync`
    pub resyncs: usize,
    /// Calls to `reset_io`
    pub resets: usize,
    /// Testing hook: number of subsequent sends that fail with CommFail
    pub send_failures: usize,
    /// Testing hook: number of subsequent resyncs that fail
    pub resync_failures: usize,
    /// Last selected id
    pub device_id: u8,
    /// Reported interface
    pub interface: Interface,
}

impl MockPhysical {
    /// SWI mock with nothing queued.
    pub fn new() -> Self {
        Self::default()
    }

    /// Mock reporting `interface`.
    pub fn with_interface(interface: Interface) -> Self {
        Self {
            interface,
            ..Self::default()
        }
    }

    /// Queue a packet for the next `receive`.
    pub fn push_response(&mut self, resp: Vec<u8>) {
        self.responses.push_back(Ok(resp));
    }

    /// Queue a receive error, e.g. `RxNoResponse` to simulate a busy device.
    pub fn push_error(&mut self, err: Error) {
        self.responses.push_back(Err(err));
    }

    /// Fail the next `n` sends with `CommFail`.
    pub fn set_send_failures(&mut self, n: usize) {
        self.send_failures = n;
    }

    /// Fail the next `n` resyncs.
    pub fn set_resync_failures(&mut self, n: usize) {
        self.resync_failures = n;
    }

    /// Total number of calls into the physical layer. Delays excluded.
    pub fn call_count(&self) -> usize {
        self.sent.len()
            + self.receives
            + self.wakeups
            + self.sleeps
            + self.idles
            + self.resyncs
            + self.resets
    }

    /// Most recent packet sent.
    pub fn last_sent(&self) -> Option<&[u8]> {
        self.sent.last().map(|v| v.as_slice())
    }
}

impl Physical for MockPhysical {
    fn send_command(&mut self, packet: &[u8]) -> Result<()> {
        self.sent.push(packet.to_vec());
        if self.send_failures > 0 {
            self.send_failures -= 1;
            return Err(Error::CommFail);
        }
        Ok(())
    }

    fn receive_response(&mut self, buf: &mut [u8]) -> Result<usize> {
        self.receives += 1;
        match self.responses.pop_front() {
            None => Err(Error::RxNoResponse),
            Some(Err(e)) => Err(e),
            Some(Ok(bytes)) => {
                let n = bytes.len().min(buf.len());
                buf[..n].copy_from_slice(&bytes[..n]);
                let count = bytes.first().copied().unwrap_or(0) as usize;
                check_count(count, buf.len())
            }
        }
    }

    fn wakeup(&mut self) -> Result<()> {
        self.wakeups += 1;
        Ok(())
    }

    fn sleep(&mut self) -> Result<()> {
        self.sleeps += 1;
        Ok(())
    }

    fn idle(&mut self) -> Result<()> {
        self.idles += 1;
        Ok(())
    }

    fn reset_io(&mut self) -> Result<()> {
        self.resets += 1;
        Ok(())
    }

    fn resync(&mut self, _buf: &mut [u8]) -> Result<()> {
        self.resyncs += 1;
        if self.resync_failures > 0 {
            self.resync_failures -= 1;
            return Err(Error::RxNoResponse);
        }
        Ok(())
    }

    fn set_device_id(&mut self, id: u8) -> Result<()> {
        self.device_id = id;
        Ok(())
    }

    fn device_id(&self) -> u8 {
        self.device_id
    }

    fn interface(&self) -> Interface {
        self.interface
    }

    fn delay_ms(&mut self, ms: u32) {
        self.delays.push(ms);
    }
}
