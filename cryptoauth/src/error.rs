// cryptoauth-rs/cryptoauth/src/error.rs

use thiserror::Error;

/// 共通エラー型
///
/// Variants mirror the library return-code families of the device
/// firmware; [`Error::return_code`] gives the numeric code used on the
/// ASCII host protocol.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum Error {
    /// A command or helper argument is out of range. No I/O was done.
    #[error("bad parameter: {0}")]
    BadParam(String),

    /// A packet or buffer has the wrong length.
    #[error("invalid response size: expected {expected}, got {actual}")]
    InvalidSize {
        /// Length required
        expected: usize,
        /// Length found
        actual: usize,
    },

    /// The CRC of a received packet does not match its contents.
    #[error("crc mismatch: expected {expected:#06x}, got {actual:#06x}")]
    BadCrc {
        /// CRC computed over the packet
        expected: u16,
        /// CRC carried by the packet
        actual: u16,
    },

    /// Nothing came back from the device.
    #[error("no response from device")]
    RxNoResponse,

    /// Reception stopped after part of a packet.
    #[error("receive failed after partial response")]
    RxFail,

    /// Sending to the device failed, or the wake response was wrong.
    #[error("communication with device failed")]
    CommFail,

    /// An operation did not finish in time.
    #[error("operation timed out")]
    Timeout,

    /// The device reported an execution error (status 0x0F), or the host
    /// TempKey did not allow the operation.
    #[error("device rejected command")]
    CmdFail,

    /// The device reported a parse error (status 0x03).
    #[error("device could not parse command")]
    ParseError,

    /// The device reported a CheckMac miscompare (status 0x01).
    #[error("checkmac miscompare")]
    CheckMacFailed,

    /// The device received the command with a bad CRC (status 0xFF).
    #[error("device reported a communication error")]
    StatusCrc,

    /// The device sent a status byte this crate does not know.
    #[error("unknown device status: {0:#04x}")]
    StatusUnknown(u8),

    /// Resync only got through by sleeping and waking the device.
    #[error("communication resynchronized by waking the device")]
    ResyncWithWakeup,

    /// No device answers at this id.
    #[error("invalid device id: {0:#04x}")]
    InvalidId(u8),

    /// A library function failed.
    #[error("function failed: {0}")]
    FuncFail(String),

    /// Failure that fits no other variant.
    #[error("general failure: {0}")]
    GenFail(String),

    /// The host sent a command the kit does not know.
    #[error("unknown command: {0}")]
    UnknownCommand(String),

    /// The host command has a missing or malformed data load.
    #[error("invalid parameters: {0}")]
    InvalidParams(String),

    /// A response does not fit the host transmit buffer.
    #[error("buffer overflow: capacity {capacity}, needed {needed}")]
    BufferOverflow {
        /// Bytes that fit
        capacity: usize,
        /// Bytes that were to be sent
        needed: usize,
    },

    /// A host line exceeded the receive buffer.
    #[error("host line longer than {capacity} bytes")]
    RxOverflow {
        /// Receive buffer size in bytes
        capacity: usize,
    },

    /// No physical layer or device is attached.
    #[error("no device")]
    NoDevice,
}

/// Numeric return codes shared with device firmware and host tools.
pub mod codes {
    /// Success
    pub const SUCCESS: u8 = 0x00;
    /// CheckMac miscompare
    pub const CHECKMAC_FAILED: u8 = 0xD1;
    /// Device parse error
    pub const PARSE_ERROR: u8 = 0xD2;
    /// Device execution error
    pub const CMD_FAIL: u8 = 0xD3;
    /// Device saw a bad command CRC
    pub const STATUS_CRC: u8 = 0xD4;
    /// Unknown device status
    pub const STATUS_UNKNOWN: u8 = 0xD5;
    /// Function failed
    pub const FUNC_FAIL: u8 = 0xE0;
    /// General failure
    pub const GEN_FAIL: u8 = 0xE1;
    /// Bad parameter
    pub const BAD_PARAM: u8 = 0xE2;
    /// Invalid device id
    pub const INVALID_ID: u8 = 0xE3;
    /// Invalid size
    pub const INVALID_SIZE: u8 = 0xE4;
    /// Response CRC mismatch
    pub const BAD_CRC: u8 = 0xE5;
    /// Partial receive
    pub const RX_FAIL: u8 = 0xE6;
    /// No response
    pub const RX_NO_RESPONSE: u8 = 0xE7;
    /// Resync needed a wakeup
    pub const RESYNC_WITH_WAKEUP: u8 = 0xE8;
    /// Communication failure
    pub const COMM_FAIL: u8 = 0xF0;
    /// Timeout
    pub const TIMEOUT: u8 = 0xF1;

    /// Kit: unknown command
    pub const KIT_UNKNOWN_COMMAND: u8 = 0xC0;
    /// Kit: host line too long
    pub const KIT_RX_OVERFLOW: u8 = 0xC1;
    /// Kit: response too long
    pub const KIT_TX_OVERFLOW: u8 = 0xC2;
    /// Kit: bad command parameters
    pub const KIT_INVALID_PARAMS: u8 = 0xC3;
    /// Kit: the interface does not support the function
    pub const KIT_INVALID_IF_FUNCTION: u8 = 0xC4;
    /// Kit: no device
    pub const KIT_NO_DEVICE: u8 = 0xC5;
}

impl Error {
    /// Library return code for this error.
    pub fn return_code(&self) -> u8 {
        match self {
            Error::BadParam(_) => codes::BAD_PARAM,
            Error::InvalidSize { .. } => codes::INVALID_SIZE,
            Error::BadCrc { .. } => codes::BAD_CRC,
            Error::RxNoResponse => codes::RX_NO_RESPONSE,
            Error::RxFail => codes::RX_FAIL,
            Error::CommFail => codes::COMM_FAIL,
            Error::Timeout => codes::TIMEOUT,
            Error::CmdFail => codes::CMD_FAIL,
            Error::ParseError => codes::PARSE_ERROR,
            Error::CheckMacFailed => codes::CHECKMAC_FAILED,
            Error::StatusCrc => codes::STATUS_CRC,
            Error::StatusUnknown(_) => codes::STATUS_UNKNOWN,
            Error::ResyncWithWakeup => codes::RESYNC_WITH_WAKEUP,
            Error::InvalidId(_) => codes::INVALID_ID,
            Error::FuncFail(_) => codes::FUNC_FAIL,
            Error::GenFail(_) => codes::GEN_FAIL,
            Error::UnknownCommand(_) => codes::KIT_UNKNOWN_COMMAND,
            Error::InvalidParams(_) => codes::KIT_INVALID_PARAMS,
            Error::BufferOverflow { .. } => codes::KIT_TX_OVERFLOW,
            Error::RxOverflow { .. } => codes::KIT_RX_OVERFLOW,
            Error::NoDevice => codes::KIT_NO_DEVICE,
        }
    }

    /// True when the error only reflects a status byte the device sent back.
    /// The transport itself worked; the caller decides what the status means.
    pub fn is_device_status(&self) -> bool {
        (codes::CHECKMAC_FAILED..=codes::STATUS_UNKNOWN).contains(&self.return_code())
    }

    /// Physical-layer timeouts and size errors that a resync may recover.
    pub fn is_transient(&self) -> bool {
        matches!(
            self,
            Error::RxNoResponse | Error::RxFail | Error::InvalidSize { .. } | Error::BadCrc { .. }
        )
    }
}

/// Crate-wide result type.
pub type Result<T> = std::result::Result<T, Error>;
