// cryptoauth-rs/cryptoauth/src/comm/retry.rs

use crate::constants::{COMMAND_EXEC_MAX_MS, RETRY_COUNT, SYNC_TIMEOUT_MS};
use crate::protocol::OpcodeInfo;

/// Retry and resync knobs for the comm layer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct RetryPolicy {
    /// Extra attempts per loop; each loop runs `retries + 1` times.
    pub retries: u8,
    /// Gap between response polls.
    pub poll_interval_ms: u32,
    /// Delay before a resync so the device drops a half-read packet.
    pub sync_timeout_ms: u32,
    /// Wait after a failed wakeup so a busy device can finish.
    pub wake_failure_delay_ms: u32,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            retries: RETRY_COUNT,
            poll_interval_ms: 1,
            sync_timeout_ms: SYNC_TIMEOUT_MS,
            wake_failure_delay_ms: COMMAND_EXEC_MAX_MS,
        }
    }
}

impl RetryPolicy {
    /// Total tries per loop.
    pub fn attempts(&self) -> usize {
        usize::from(self.retries) + 1
    }
}

/// When to start polling for a response and how long to keep at it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PollTiming {
    /// Wait after sending before the first poll.
    pub poll_delay_ms: u32,
    /// How long to keep polling once started.
    pub poll_timeout_ms: u32,
}

impl PollTiming {
    /// Explicit delay and timeout.
    pub fn new(poll_delay_ms: u32, poll_timeout_ms: u32) -> Self {
        Self {
            poll_delay_ms,
            poll_timeout_ms,
        }
    }

    /// Timing for a command whose maximum execution time is `exec_max_ms`,
    /// starting to poll after `poll_delay_ms`.
    pub fn from_exec_max(poll_delay_ms: u32, exec_max_ms: u32) -> Self {
        Self::new(poll_delay_ms, exec_max_ms.saturating_sub(poll_delay_ms))
    }
}

impl From<OpcodeInfo> for PollTiming {
    fn from(info: OpcodeInfo) -> Self {
        Self::new(info.poll_delay_ms, info.poll_timeout_ms())
    }
}

/// How a resync got the device back.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Resync {
    /// The interface resynchronized without losing device state.
    Synchronized,
    /// The device had to be put to sleep and woken; TempKey is gone.
    WokenUp,
}
