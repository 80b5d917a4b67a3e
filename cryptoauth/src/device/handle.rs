// cryptoauth-rs/cryptoauth/src/device/handle.rs

use std::marker::PhantomData;

use crate::comm::{self, PollTiming, Resync, RetryPolicy};
use crate::constants::RSP_SIZE_MAX;
use crate::protocol::{lookup, Command, Response};
use crate::transport::Physical;
use crate::types::Interface;
use crate::{Error, Result};

/// Type-state marker: the device is asleep. Volatile state is cleared.
pub struct Asleep;
/// Type-state marker: the device is idle. TempKey and the RNG seed survive.
pub struct Idle;
/// Type-state marker: the device is awake and accepts commands.
pub struct Awake;

mod sealed {
    /// Limits [`super::Dormant`] to the asleep and idle markers.
    pub trait Sealed {}
    impl Sealed for super::Asleep {}
    impl Sealed for super::Idle {}
}

/// States the device can be woken from.
pub trait Dormant: sealed::Sealed {}
impl Dormant for Asleep {}
impl Dormant for Idle {}

/// Device session that enforces the power state at compile time.
///
/// Commands can only be executed on `Device<Awake>`. Idle keeps TempKey
/// and the RNG state; sleep clears them.
pub struct Device<State = Asleep> {
    phys: Box<dyn Physical>,
    policy: RetryPolicy,
    rx: [u8; RSP_SIZE_MAX],
    _state: PhantomData<State>,
}

impl<S> Device<S> {
    fn into_state<T>(self) -> Device<T> {
        Device {
            phys: self.phys,
            policy: self.policy,
            rx: self.rx,
            _state: PhantomData,
        }
    }

    fn fail(self, error: Error) -> StateError<S> {
        StateError {
            device: self,
            error,
        }
    }

    /// Select another device on the same bus.
    pub fn set_device_id(&mut self, id: u8) -> Result<()> {
        self.phys.set_device_id(id)
    }

    /// Id of the selected device.
    pub fn device_id(&self) -> u8 {
        self.phys.device_id()
    }

    /// Bus the physical layer talks over.
    pub fn interface(&self) -> Interface {
        self.phys.interface()
    }

    /// Retry policy used for every exchange.
    pub fn policy(&self) -> &RetryPolicy {
        &self.policy
    }

    /// Give back the physical layer.
    pub fn into_physical(self) -> Box<dyn Physical> {
        self.phys
    }
}

/// A failed power-state transition. The device comes back in the state
/// it was in, so the caller can retry on the same physical layer.
pub struct StateError<S> {
    /// Device in its previous state.
    pub device: Device<S>,
    /// Why the transition failed.
    pub error: Error,
}

impl<S> StateError<S> {
    /// Split into the device and the error.
    pub fn into_parts(self) -> (Device<S>, Error) {
        (self.device, self.error)
    }
}

impl<S> std::fmt::Debug for StateError<S> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("StateError")
            .field("error", &self.error)
            .finish_non_exhaustive()
    }
}

impl<S> std::fmt::Display for StateError<S> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "state transition failed: {}", self.error)
    }
}

impl<S> From<StateError<S>> for Error {
    fn from(e: StateError<S>) -> Self {
        e.error
    }
}

/// Result of a state transition from `S` to `T`.
pub type Transition<T, S> = std::result::Result<Device<T>, StateError<S>>;

impl Device<Asleep> {
    /// Wrap an existing physical layer. The device is assumed asleep.
    pub fn new_with_physical(phys: Box<dyn Physical>, policy: RetryPolicy) -> Self {
        Self {
            phys,
            policy,
            rx: [0u8; RSP_SIZE_MAX],
            _state: PhantomData,
        }
    }
}

impl<S: Dormant> Device<S> {
    /// Wake the device and check its wake response. On failure the device
    /// is handed back unchanged.
    pub fn wakeup(mut self) -> Transition<Awake, S> {
        match comm::wakeup(&mut *self.phys, &mut self.rx, &self.policy) {
            Ok(()) => Ok(self.into_state()),
            Err(e) => Err(self.fail(e)),
        }
    }
}

impl Device<Awake> {
    /// Send the sleep flag or word address.
    pub fn sleep(mut self) -> Transition<Asleep, Awake> {
        match self.phys.sleep() {
            Ok(()) => Ok(self.into_state()),
            Err(e) => Err(self.fail(e)),
        }
    }

    /// Send the idle flag or word address.
    pub fn idle(mut self) -> Transition<Idle, Awake> {
        match self.phys.idle() {
            Ok(()) => Ok(self.into_state()),
            Err(e) => Err(self.fail(e)),
        }
    }

    /// Validate, send and decode one command.
    pub fn execute(&mut self, cmd: &Command) -> Result<Response> {
        let mut packet = cmd.encode()?;
        let info = lookup(cmd.opcode());
        let size = info.response_size(cmd.param1());
        log::debug!("execute {} ({} bytes)", cmd.opcode(), packet.len());

        let count = comm::send_and_receive(
            &mut *self.phys,
            packet.as_mut_bytes(),
            &mut self.rx[..size],
            PollTiming::from(info),
            &self.policy,
        )?;
        Response::decode(cmd.opcode(), cmd.param1(), &self.rx[..count])
    }

    /// Generic entry point taking the raw layout: the three data blocks are
    /// concatenated in order.
    pub fn execute_raw(
        &mut self,
        opcode: u8,
        param1: u8,
        param2: u16,
        data1: &[u8],
        data2: &[u8],
        data3: &[u8],
    ) -> Result<Response> {
        let mut data = Vec::with_capacity(data1.len() + data2.len() + data3.len());
        data.extend_from_slice(data1);
        data.extend_from_slice(data2);
        data.extend_from_slice(data3);
        let cmd = Command::from_raw(opcode, param1, param2, &data)?;
        self.execute(&cmd)
    }

    /// Re-establish communication. `WokenUp` means volatile state is lost.
    pub fn resync(&mut self) -> Result<Resync> {
        comm::resync(&mut *self.phys, &mut self.rx, &self.policy)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::constants::WAKE_RESPONSE;
    use crate::test_support::{response_packet, shared_mock};
    use crate::types::DeviceStatus;
    use crate::Error;

    fn asleep() -> (
        Device<Asleep>,
        std::rc::Rc<std::cell::RefCell<crate::transport::MockPhysical>>,
    ) {
        let (boxed, inner) = shared_mock();
        (Device::new_with_physical(boxed, RetryPolicy::default()), inner)
    }

    #[test]
    fn wake_execute_sleep() {
        let (dev, inner) = asleep();
        inner.borrow_mut().push_response(WAKE_RESPONSE.to_vec());
        inner.borrow_mut().push_response(response_packet(&[0x5A; 32]));

        let mut dev = dev.wakeup().unwrap();
        let resp = dev.execute(&Command::Random { mode: 0 }).unwrap();
        assert_eq!(resp, Response::Block([0x5A; 32]));
        let _dev = dev.sleep().unwrap();

        let m = inner.borrow();
        assert_eq!(m.wakeups, 1);
        assert_eq!(m.sleeps, 1);
        let sent = m.last_sent().unwrap();
        assert_eq!(&sent[..5], &[0x07, 0x1B, 0x00, 0x00, 0x00]);
    }

    #[test]
    fn failed_wake_is_reported() {
        let (dev, inner) = asleep();
        inner.borrow_mut().push_response(vec![0x04, 0x00, 0x03, 0x40]);
        let err = dev.wakeup().err().unwrap();
        assert_eq!(err.error, Error::CommFail);
    }

    #[test]
    fn failed_wake_keeps_the_device() {
        let (dev, inner) = asleep();
        inner.borrow_mut().push_response(vec![0x04, 0x00, 0x03, 0x40]);
        inner.borrow_mut().push_response(WAKE_RESPONSE.to_vec());

        let (dev, err) = dev.wakeup().err().unwrap().into_parts();
        assert_eq!(err, Error::CommFail);
        let _awake = dev.wakeup().unwrap();
        assert_eq!(inner.borrow().wakeups, 2);
    }

    #[test]
    fn transition_error_converts_for_question_mark() {
        fn wake(dev: Device<Asleep>) -> Result<Device<Awake>> {
            Ok(dev.wakeup()?)
        }
        let (dev, _inner) = asleep();
        assert_eq!(wake(dev).err(), Some(Error::RxNoResponse));
    }

    #[test]
    fn idle_then_wake_again() {
        let (dev, inner) = asleep();
        inner.borrow_mut().push_response(WAKE_RESPONSE.to_vec());
        inner.borrow_mut().push_response(WAKE_RESPONSE.to_vec());
        let dev = dev.wakeup().unwrap().idle().unwrap();
        let _dev = dev.wakeup().unwrap();
        assert_eq!(inner.borrow().idles, 1);
        assert_eq!(inner.borrow().wakeups, 2);
    }

    #[test]
    fn invalid_command_does_no_io() {
        let (dev, inner) = asleep();
        inner.borrow_mut().push_response(WAKE_RESPONSE.to_vec());
        let mut dev = dev.wakeup().unwrap();
        let before = inner.borrow().call_count();
        let res = dev.execute(&Command::Random { mode: 2 });
        assert!(matches!(res, Err(Error::BadParam(_))));
        assert_eq!(inner.borrow().call_count(), before);
    }

    #[test]
    fn execute_raw_concatenates_blocks() {
        let (dev, inner) = asleep();
        inner.borrow_mut().push_response(WAKE_RESPONSE.to_vec());
        inner.borrow_mut().push_response(response_packet(&[0x00]));
        let mut dev = dev.wakeup().unwrap();
        let resp = dev
            .execute_raw(0x12, 0x00, 0x0004, &[1, 2], &[3], &[4])
            .unwrap();
        assert_eq!(resp.status(), DeviceStatus::Success);
        let m = inner.borrow();
        let sent = m.last_sent().unwrap();
        assert_eq!(sent[0], 11);
        assert_eq!(&sent[3..9], &[0x04, 0x00, 1, 2, 3, 4]);
    }

    #[test]
    fn device_id_in_any_state() {
        let (mut dev, inner) = asleep();
        dev.set_device_id(3).unwrap();
        assert_eq!(dev.device_id(), 3);
        assert_eq!(inner.borrow().device_id, 3);
    }
}
