// cryptoauth-rs/cryptoauth/src/host/session.rs

use super::command::{parse, BoardCommand, DeviceCommand, HostCommand, PhysicalCommand};
use super::packet::{Collator, HostResponse, RX_CAPACITY, TX_CAPACITY};
use crate::comm::{self, PollTiming, Resync, RetryPolicy};
use crate::constants::{OPCODE_IDX, PARAM1_IDX, RSP_COUNT_IDX, RSP_SIZE_MAX, RSP_SIZE_MIN, WAKE_RESPONSE};
use crate::error::codes;
use crate::protocol::opcode_table::{
    lookup_raw, UNKNOWN_OPCODE_EXEC_MS, UNKNOWN_OPCODE_RESPONSE_SIZE,
};
use crate::transport::Physical;
use crate::types::{DeviceType, Interface};
use crate::{Error, Result};

/// Delay before the first poll of a talk.
pub const TALK_POLL_DELAY_MS: u32 = 5;

const KIT_NAME_SHORT: &str = "CK590 ";
const KIT_NAME: &str = "AT88CK590 ";
const KIT_VERSION: [u8; 3] = [1, 0, 5];
const SHA204_NAME: &str = "SHA204 ";
const SHA204_VERSION: [u8; 3] = [1, 3, 0];
const ECC108_NAME: &str = "ECC108 ";
const ECC108_VERSION: [u8; 3] = [0, 1, 0];

/// Host session settings.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct HostConfig {
    /// Longest request line, in bytes
    pub rx_capacity: usize,
    /// Largest data load of a response, in bytes
    pub tx_capacity: usize,
    /// Start with talk wrapped in wakeup/idle. ECC108 SWI parts fall asleep
    /// between a host's wake and talk requests otherwise.
    pub wrap_talk: bool,
    /// Family reported by `b:v`
    pub device_type: DeviceType,
}

impl Default for HostConfig {
    fn default() -> Self {
        Self {
            rx_capacity: RX_CAPACITY,
            tx_capacity: TX_CAPACITY,
            wrap_talk: true,
            device_type: DeviceType::Ecc108,
        }
    }
}

/// Serves ASCII host requests against one physical layer.
pub struct HostSession {
    phys: Box<dyn Physical>,
    policy: RetryPolicy,
    config: HostConfig,
    wrap: bool,
    collator: Collator,
    rx: [u8; RSP_SIZE_MAX],
}

impl HostSession {
    /// Session with the default config.
    pub fn new(phys: Box<dyn Physical>, policy: RetryPolicy) -> Self {
        Self::with_config(phys, policy, HostConfig::default())
    }

    /// Session with explicit buffer sizes and wrap mode.
    pub fn with_config(phys: Box<dyn Physical>, policy: RetryPolicy, config: HostConfig) -> Self {
        Self {
            phys,
            policy,
            config,
            wrap: config.wrap_talk,
            collator: Collator::new(config.rx_capacity),
            rx: [0u8; RSP_SIZE_MAX],
        }
    }

    /// Settings the session was built with.
    pub fn config(&self) -> &HostConfig {
        &self.config
    }

    /// Whether talk is currently wrapped in wakeup/idle.
    pub fn wraps_talk(&self) -> bool {
        self.wrap
    }

    /// Borrow the physical layer.
    pub fn physical(&self) -> &dyn Physical {
        self.phys.as_ref()
    }

    /// Borrow the physical layer mutably.
    pub fn physical_mut(&mut self) -> &mut dyn Physical {
        self.phys.as_mut()
    }

    /// End the session and hand the physical layer back.
    pub fn into_physical(self) -> Box<dyn Physical> {
        self.phys
    }

    /// Feed raw host bytes, answering every line they complete.
    pub fn feed(&mut self, bytes: &[u8]) -> Vec<String> {
        let lines = self.collator.feed(bytes);
        lines
            .into_iter()
            .map(|line| match line {
                Ok(line) => self.process_line(&line),
                Err(e) => HostResponse::error(&e).encode(self.config.tx_capacity),
            })
            .collect()
    }

    /// Process one request line and return the encoded response.
    pub fn process_line(&mut self, line: &[u8]) -> String {
        let text = String::from_utf8_lossy(line);
        log::debug!("host <- {}", text);
        let response = match parse(&text) {
            Ok(HostCommand::Device(cmd)) => self.device(cmd),
            Ok(HostCommand::Board(cmd)) => self.board(cmd),
            Err(e) => HostResponse::error(&e),
        };
        let encoded = response.encode(self.config.tx_capacity);
        log::debug!("host -> {}", encoded.trim_end());
        encoded
    }

    fn device(&mut self, cmd: DeviceCommand) -> HostResponse {
        match cmd {
            DeviceCommand::Talk(packet) => self.talk(packet),
            DeviceCommand::Wake if self.wrap => HostResponse::success(WAKE_RESPONSE.to_vec()),
            DeviceCommand::Wake => self.wake(),
            DeviceCommand::Send(bytes) | DeviceCommand::Physical(PhysicalCommand::Send(bytes)) => {
                status_only(self.phys.send_command(&bytes))
            }
            DeviceCommand::Receive(size)
            | DeviceCommand::Physical(PhysicalCommand::Receive(size)) => self.receive(size),
            DeviceCommand::Sleep => {
                let woken = if self.wrap { self.comm_wakeup() } else { Ok(()) };
                status_only(woken.and_then(|_| self.phys.sleep()))
            }
            // idle follows the next talk instead
            DeviceCommand::Idle if self.wrap => HostResponse::success(Vec::new()),
            DeviceCommand::Idle | DeviceCommand::Physical(PhysicalCommand::Idle) => {
                status_only(self.phys.idle())
            }
            DeviceCommand::Wrap(on) => {
                self.wrap = on;
                HostResponse::success(Vec::new())
            }
            DeviceCommand::Physical(PhysicalCommand::Wakeup) => status_only(self.phys.wakeup()),
            DeviceCommand::Physical(PhysicalCommand::Resync) => self.resync(),
            DeviceCommand::Physical(PhysicalCommand::Select(id)) => {
                status_only(self.phys.set_device_id(id))
            }
            DeviceCommand::Physical(PhysicalCommand::Sleep) => status_only(self.phys.sleep()),
        }
    }

    fn comm_wakeup(&mut self) -> Result<()> {
        comm::wakeup(self.phys.as_mut(), &mut self.rx, &self.policy)
    }

    fn response_bytes(&self) -> Vec<u8> {
        let count = usize::from(self.rx[RSP_COUNT_IDX]).min(self.rx.len());
        self.rx[..count].to_vec()
    }

    fn talk(&mut self, mut packet: Vec<u8>) -> HostResponse {
        if packet.len() <= PARAM1_IDX {
            return HostResponse::error(&Error::InvalidParams("talk packet too short".into()));
        }
        self.rx.fill(0);
        if self.wrap {
            if let Err(e) = self.comm_wakeup() {
                return HostResponse::error(&e);
            }
        }

        let (size, exec) = match lookup_raw(packet[OPCODE_IDX]) {
            Some(info) => (info.response_size(packet[PARAM1_IDX]), info.exec_max_ms),
            None => (UNKNOWN_OPCODE_RESPONSE_SIZE, UNKNOWN_OPCODE_EXEC_MS),
        };
        let timing = PollTiming::from_exec_max(TALK_POLL_DELAY_MS, exec);
        let result = comm::send_and_receive(
            self.phys.as_mut(),
            &mut packet,
            &mut self.rx[..size],
            timing,
            &self.policy,
        );

        let mut response = match result {
            Ok(_) => HostResponse::success(self.response_bytes()),
            // the host reads the status out of the packet itself
            Err(e) if e.is_device_status() => HostResponse::success(self.response_bytes()),
            Err(e) => HostResponse::error(&e),
        };
        if self.wrap {
            if let Err(e) = self.phys.idle() {
                if response.status == codes::SUCCESS {
                    response.status = e.return_code();
                }
            }
        }
        response
    }

    fn wake(&mut self) -> HostResponse {
        self.rx.fill(0);
        match self.comm_wakeup() {
            Ok(()) => HostResponse::success(self.rx[..RSP_SIZE_MIN].to_vec()),
            Err(e) => HostResponse::error(&e),
        }
    }

    fn receive(&mut self, size: u8) -> HostResponse {
        let size = usize::from(size).min(self.rx.len());
        self.rx.fill(0);
        match self.phys.receive_response(&mut self.rx[..size]) {
            Ok(count) => HostResponse::success(self.rx[..count].to_vec()),
            Err(e) => HostResponse::error(&e),
        }
    }

    fn resync(&mut self) -> HostResponse {
        self.rx.fill(0);
        match comm::resync(self.phys.as_mut(), &mut self.rx[..RSP_SIZE_MIN], &self.policy) {
            Ok(Resync::Synchronized) => HostResponse::success(Vec::new()),
            Ok(Resync::WokenUp) => HostResponse::error(&Error::ResyncWithWakeup),
            Err(e) => HostResponse::error(&e),
        }
    }

    fn board(&mut self, cmd: BoardCommand) -> HostResponse {
        match cmd {
            BoardCommand::Version => {
                let device = match self.config.device_type {
                    DeviceType::Sha204 => SHA204_NAME,
                    DeviceType::Ecc108 => ECC108_NAME,
                };
                let interface = match self.phys.interface() {
                    Interface::Swi => "SWI ",
                    Interface::I2c => "TWI ",
                };
                HostResponse::success(vec![self.phys.device_id()])
                    .with_prefix(format!("{}{}{}", KIT_NAME_SHORT, device, interface))
            }
            BoardCommand::Firmware(index) => {
                let (name, version) = match index {
                    0 => (KIT_NAME, KIT_VERSION),
                    1 => (SHA204_NAME, SHA204_VERSION),
                    3 => (ECC108_NAME, ECC108_VERSION),
                    other => {
                        return HostResponse::error(&Error::InvalidParams(format!(
                            "no firmware at index {}",
                            other
                        )));
                    }
                };
                HostResponse::success(version.to_vec()).with_prefix(name)
            }
        }
    }
}

fn status_only(res: Result<()>) -> HostResponse {
    match res {
        Ok(()) => HostResponse::success(Vec::new()),
        Err(e) => HostResponse::error(&e),
    }
}
