// cryptoauth-rs/cryptoauth/src/transport/swi/sim.rs
//! Virtual-time single-wire bus for tests and host-side experiments.
//!
//! The host side drives the pin through [`SwiHal`]; every burst it sends is
//! decoded back into bytes. When a burst is the transmit flag, the next
//! queued device response is played back as a waveform starting after
//! `response_delay_ns`.

use std::collections::VecDeque;

use super::hal::SwiHal;
use super::SwiTiming;
use crate::constants::{SWI_FLAG_TX, WAKE_RESPONSE};

/// Low pulses longer than this outside a burst count as a wake token.
const WAKE_MIN_NS: u64 = 40_000;

/// Virtual-time SWI line with a scripted device on the other end.
///
/// Decodes host bursts and answers transmit flags with queued responses.
#[derive(Debug)]
pub struct SimulatedWire {
    now_ns: u64,
    host_high: bool,
    low_since: u64,
    in_burst: bool,
    burst_pulses: Vec<(u64, u64)>,
    responses: VecDeque<Vec<u8>>,
    device_lows: Vec<(u64, u64)>,
    cursor: usize,
    timing: SwiTiming,
    /// Time between the end of the transmit flag and the device's first edge.
    pub response_delay_ns: u32,
    /// Bytes decoded from each host burst, in order.
    pub bursts: Vec<Vec<u8>>,
    /// Wake tokens seen
    pub wakeups: usize,
    /// Pin index from the last `select_pin`
    pub selected_pin: u8,
}

impl Default for SimulatedWire {
    fn default() -> Self {
        Self::new(SwiTiming::default())
    }
}

impl SimulatedWire {
    /// Idle line at time zero.
    pub fn new(timing: SwiTiming) -> Self {
        Self {
            now_ns: 0,
            host_high: true,
            low_since: 0,
            in_burst: false,
            burst_pulses: Vec::new(),
            responses: VecDeque::new(),
            device_lows: Vec::new(),
            cursor: 0,
            timing,
            response_delay_ns: 10_000,
            bursts: Vec::new(),
            wakeups: 0,
            selected_pin: 0,
        }
    }

    /// Queue bytes the device sends after the next transmit flag.
    pub fn push_response(&mut self, bytes: Vec<u8>) {
        self.responses.push_back(bytes);
    }

    /// Queue the wake response packet.
    pub fn push_wake_response(&mut self) {
        self.push_response(WAKE_RESPONSE.to_vec());
    }

    /// Virtual time
    pub fn now_ns(&self) -> u64 {
        self.now_ns
    }

    /// Queued responses not yet sent.
    pub fn pending_responses(&self) -> usize {
        self.responses.len()
    }

    /// Host bursts that are not transmit flags, i.e. commands and tokens.
    pub fn host_packets(&self) -> Vec<&[u8]> {
        self.bursts
            .iter()
            .filter(|b| b.as_slice() != [SWI_FLAG_TX])
            .map(|b| b.as_slice())
            .collect()
    }

    fn device_low(&mut self) -> bool {
        while self.cursor < self.device_lows.len() && self.device_lows[self.cursor].1 <= self.now_ns
        {
            self.cursor += 1;
        }
        match self.device_lows.get(self.cursor) {
            Some(&(start, end)) => start <= self.now_ns && self.now_ns < end,
            None => false,
        }
    }

    fn schedule_response(&mut self) {
        match self.responses.pop_front() {
            Some(bytes) => {
                let start = self.now_ns + u64::from(self.response_delay_ns);
                self.device_lows = waveform(&bytes, &self.timing, start);
                self.cursor = 0;
            }
            None => {
                self.device_lows.clear();
                self.cursor = 0;
            }
        }
    }
}

impl SwiHal for SimulatedWire {
    fn set_pin(&mut self, high: bool) {
        if high == self.host_high {
            return;
        }
        if !high {
            self.low_since = self.now_ns;
        } else if self.in_burst {
            self.burst_pulses.push((self.low_since, self.now_ns));
        } else if self.now_ns - self.low_since >= WAKE_MIN_NS {
            self.wakeups += 1;
        }
        self.host_high = high;
    }

    fn read_pin(&mut self) -> bool {
        self.host_high && !self.device_low()
    }

    fn delay_ns(&mut self, ns: u32) {
        self.now_ns += u64::from(ns);
    }

    fn with_interrupts_disabled<R>(&mut self, f: impl FnOnce(&mut Self) -> R) -> R
    where
        Self: Sized,
    {
        self.in_burst = true;
        self.burst_pulses.clear();
        let r = f(self);
        self.in_burst = false;
        if !self.burst_pulses.is_empty() {
            let bytes = decode_pulses(&self.burst_pulses, &self.timing);
            if bytes.as_slice() == [SWI_FLAG_TX] {
                self.schedule_response();
            }
            self.bursts.push(bytes);
        }
        r
    }

    fn select_pin(&mut self, index: u8) {
        self.selected_pin = index;
    }
}

/// Low intervals `(start, end)` in ns for `bytes`, starting at `start`.
pub fn waveform(bytes: &[u8], timing: &SwiTiming, start: u64) -> Vec<(u64, u64)> {
    let bit = u64::from(timing.bit_ns);
    let mut t = start;
    let mut lows = Vec::with_capacity(bytes.len() * 16);
    for &byte in bytes {
        for b in 0..8 {
            if byte & (1 << b) != 0 {
                lows.push((t, t + bit));
                t += bit + u64::from(timing.one_tail_ns);
            } else {
                lows.push((t, t + bit));
                lows.push((t + 2 * bit, t + 3 * bit));
                t += 3 * bit + u64::from(timing.zero_tail_ns);
            }
        }
    }
    lows
}

/// Group low pulses into bits: two pulses close together are a zero, a
/// lone pulse is a one. Trailing bits that do not fill a byte are dropped.
pub fn decode_pulses(pulses: &[(u64, u64)], timing: &SwiTiming) -> Vec<u8> {
    let zero_gap = 2 * u64::from(timing.bit_ns);
    let mut bits = Vec::with_capacity(pulses.len());
    let mut i = 0;
    while i < pulses.len() {
        let rise = pulses[i].1;
        match pulses.get(i + 1) {
            Some(&(fall, _)) if fall.saturating_sub(rise) <= zero_gap => {
                bits.push(false);
                i += 2;
            }
            _ => {
                bits.push(true);
                i += 1;
            }
        }
    }
    bits.chunks_exact(8)
        .map(|chunk| {
            chunk
                .iter()
                .enumerate()
                .fold(0u8, |acc, (n, &one)| if one { acc | (1 << n) } else { acc })
        })
        .collect()
}
