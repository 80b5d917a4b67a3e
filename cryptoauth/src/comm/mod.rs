// cryptoauth-rs/cryptoauth/src/comm/mod.rs

//! Communication layer: CRC, polling, retries and resynchronization on top
//! of any [`Physical`].

/// Retry policy, poll timing and resync outcome.
pub mod retry;

pub use retry::{PollTiming, Resync, RetryPolicy};

use crate::constants::{
    CMD_SIZE_MAX, CMD_SIZE_MIN, RSP_SIZE_MIN, RSP_STATUS_IDX, STATUS_BYTE_CHECKMAC,
    STATUS_BYTE_COMM, STATUS_BYTE_EXEC, STATUS_BYTE_PARSE, STATUS_BYTE_SUCCESS,
    STATUS_BYTE_WAKEUP,
};
use crate::protocol::crc::{append_crc, verify_crc};
use crate::transport::Physical;
use crate::{Error, Result};

#[cfg(feature = "diagnostics")]
fn dump(label: &str, bytes: &[u8]) {
    log::trace!("{} {}", label, crate::utils::bytes_to_hex_spaced(bytes));
}

#[cfg(not(feature = "diagnostics"))]
fn dump(_label: &str, _bytes: &[u8]) {}

fn validate(tx: &[u8], rx: &[u8]) -> Result<()> {
    if tx.len() < CMD_SIZE_MIN || tx.len() > CMD_SIZE_MAX {
        return Err(Error::BadParam(format!(
            "command size {} outside {}..={}",
            tx.len(),
            CMD_SIZE_MIN,
            CMD_SIZE_MAX
        )));
    }
    if usize::from(tx[0]) != tx.len() {
        return Err(Error::BadParam(format!(
            "count byte {} does not match packet size {}",
            tx[0],
            tx.len()
        )));
    }
    if rx.len() < RSP_SIZE_MIN {
        return Err(Error::BadParam(format!(
            "response buffer of {} bytes is too small",
            rx.len()
        )));
    }
    Ok(())
}

/// Map the status byte of a four-byte response packet.
fn status_result(status: u8) -> Result<()> {
    match status {
        STATUS_BYTE_SUCCESS | STATUS_BYTE_WAKEUP => Ok(()),
        STATUS_BYTE_CHECKMAC => Err(Error::CheckMacFailed),
        STATUS_BYTE_PARSE => Err(Error::ParseError),
        STATUS_BYTE_EXEC => Err(Error::CmdFail),
        STATUS_BYTE_COMM => Err(Error::StatusCrc),
        other => Err(Error::StatusUnknown(other)),
    }
}

/// Poll `receive_response` until the device answers or `timeout_ms` of
/// poll intervals have elapsed.
fn poll_response<P: Physical + ?Sized>(
    phys: &mut P,
    rx: &mut [u8],
    timeout_ms: u32,
    policy: &RetryPolicy,
) -> Result<usize> {
    let step = policy.poll_interval_ms.max(1);
    let mut elapsed = 0u32;
    loop {
        match phys.receive_response(rx) {
            Err(Error::RxNoResponse) if elapsed < timeout_ms => {
                phys.delay_ms(policy.poll_interval_ms);
                elapsed = elapsed.saturating_add(step);
            }
            other => return other,
        }
    }
}

/// Send a command packet and receive its response.
///
/// `tx` is the whole packet including two bytes reserved for the CRC,
/// which is computed here. Returns the count byte of the response in `rx`.
/// Status packets are mapped to errors; success and after-wake statuses
/// return `Ok(4)`.
pub fn send_and_receive<P: Physical + ?Sized>(
    phys: &mut P,
    tx: &mut [u8],
    rx: &mut [u8],
    timing: PollTiming,
    policy: &RetryPolicy,
) -> Result<usize> {
    validate(tx, rx)?;
    append_crc(tx)?;
    dump("tx", tx);

    let mut last_err = Error::CommFail;

    'send: for attempt in 0..policy.attempts() {
        if attempt > 0 {
            log::debug!("resending command {:#04x} (attempt {})", tx[1], attempt + 1);
        }
        if let Err(e) = phys.send_command(tx) {
            log::debug!("send failed: {}", e);
            if resync(phys, rx, policy).is_err() {
                return Err(e);
            }
            last_err = e;
            continue;
        }

        phys.delay_ms(timing.poll_delay_ms);

        for _ in 0..policy.attempts() {
            rx.fill(0);
            let received = poll_response(phys, rx, timing.poll_timeout_ms, policy)
                .and_then(|count| verify_crc(&rx[..count]).map(|_| count));

            let count = match received {
                Ok(count) => count,
                Err(Error::RxNoResponse) => {
                    log::debug!("no response within {} ms", timing.poll_timeout_ms);
                    resync(phys, rx, policy)?;
                    last_err = Error::RxNoResponse;
                    continue 'send;
                }
                Err(e) if e.is_transient() => {
                    log::warn!("bad response: {}", e);
                    match resync(phys, rx, policy)? {
                        Resync::Synchronized => {
                            last_err = e;
                            continue;
                        }
                        Resync::WokenUp => {
                            last_err = e;
                            continue 'send;
                        }
                    }
                }
                Err(e) => return Err(e),
            };

            dump("rx", &rx[..count]);
            if count > RSP_SIZE_MIN {
                return Ok(count);
            }
            match status_result(rx[RSP_STATUS_IDX]) {
                Ok(()) => return Ok(count),
                Err(Error::StatusCrc) => {
                    log::debug!("device reported a CRC error on the command");
                    last_err = Error::StatusCrc;
                    continue 'send;
                }
                Err(e) => return Err(e),
            }
        }
    }

    Err(last_err)
}

/// Wake the device and check its wake response `04 11 33 43`.
pub fn wakeup<P: Physical + ?Sized>(
    phys: &mut P,
    rx: &mut [u8],
    policy: &RetryPolicy,
) -> Result<()> {
    phys.wakeup()?;
    let res = check_wake_response(phys, rx);
    if let Err(e) = &res {
        log::warn!("wakeup failed: {}", e);
        phys.delay_ms(policy.wake_failure_delay_ms);
    }
    res
}

fn check_wake_response<P: Physical + ?Sized>(phys: &mut P, rx: &mut [u8]) -> Result<()> {
    if rx.len() < RSP_SIZE_MIN {
        return Err(Error::BadParam("wake buffer too small".into()));
    }
    let buf = &mut rx[..RSP_SIZE_MIN];
    buf.fill(0);
    let count = phys.receive_response(buf)?;
    if count != RSP_SIZE_MIN {
        return Err(Error::InvalidSize {
            expected: RSP_SIZE_MIN,
            actual: count,
        });
    }
    if buf[RSP_STATUS_IDX] != STATUS_BYTE_WAKEUP {
        return Err(Error::CommFail);
    }
    verify_crc(buf)
}

/// Re-establish communication. Falls back to sleep and wakeup when the
/// physical resync gets no answer.
pub fn resync<P: Physical + ?Sized>(
    phys: &mut P,
    rx: &mut [u8],
    policy: &RetryPolicy,
) -> Result<Resync> {
    phys.delay_ms(policy.sync_timeout_ms);
    match phys.resync(rx) {
        Ok(()) => {
            log::debug!("resynchronized");
            Ok(Resync::Synchronized)
        }
        Err(e) => {
            log::debug!("resync failed ({}), waking device", e);
            phys.sleep()?;
            wakeup(phys, rx, policy)?;
            Ok(Resync::WokenUp)
        }
    }
}
