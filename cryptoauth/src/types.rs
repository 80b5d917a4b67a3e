// cryptoauth-rs/cryptoauth/src/types.rs

use crate::Error;
use derive_more::Display;
use std::convert::TryFrom;

/// 32-byte digest / key block
pub type Digest = [u8; 32];

/// Command opcodes
#[repr(u8)]
#[derive(Debug, Display, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Opcode {
    /// Idle all but the selected device
    Pause = 0x01,
    /// Read a word or block
    Read = 0x02,
    /// SHA-256 MAC over a key
    Mac = 0x08,
    /// HMAC/SHA-256 over a key
    Hmac = 0x11,
    /// Write a word or block
    Write = 0x12,
    /// Fold a stored value into TempKey
    GenDig = 0x15,
    /// Load TempKey
    Nonce = 0x16,
    /// Lock a zone
    Lock = 0x17,
    /// Random number
    Random = 0x1B,
    /// Derive a slot key
    DeriveKey = 0x1C,
    /// Write a config byte after lock
    UpdateExtra = 0x20,
    /// Check a client MAC
    CheckMac = 0x28,
    /// Info on ECC108, DevRev on SHA204
    Info = 0x30,
    /// Generate an ECC key (ECC108)
    GenKey = 0x40,
    /// ECDSA sign (ECC108)
    Sign = 0x41,
    /// ECDSA verify (ECC108)
    Verify = 0x45,
    /// Write an ECC private key (ECC108)
    PrivWrite = 0x46,
}

impl Opcode {
    /// Every opcode, in numeric order.
    pub const ALL: [Opcode; 17] = [
        Opcode::Pause,
        Opcode::Read,
        Opcode::Mac,
        Opcode::Hmac,
        Opcode::Write,
        Opcode::GenDig,
        Opcode::Nonce,
        Opcode::Lock,
        Opcode::Random,
        Opcode::DeriveKey,
        Opcode::UpdateExtra,
        Opcode::CheckMac,
        Opcode::Info,
        Opcode::GenKey,
        Opcode::Sign,
        Opcode::Verify,
        Opcode::PrivWrite,
    ];

    /// Wire value.
    pub fn as_u8(self) -> u8 {
        self as u8
    }
}

impl TryFrom<u8> for Opcode {
    type Error = Error;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        Opcode::ALL
            .iter()
            .copied()
            .find(|op| op.as_u8() == value)
            .ok_or_else(|| Error::BadParam(format!("unknown opcode {:#04x}", value)))
    }
}

/// Memory zone
#[repr(u8)]
#[derive(Debug, Display, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Zone {
    /// Configuration zone
    Config = 0,
    /// One-time-programmable zone
    Otp = 1,
    /// Key slots
    Data = 2,
}

impl Zone {
    /// Decode the zone bits of a Read/Write/GenDig zone parameter.
    pub fn from_bits(zone: u8) -> Option<Self> {
        match zone & crate::constants::ZONE_MASK {
            0 => Some(Zone::Config),
            1 => Some(Zone::Otp),
            2 => Some(Zone::Data),
            _ => None,
        }
    }

    /// Highest word address accepted for this zone.
    pub fn address_limit(self) -> u16 {
        match self {
            Zone::Config => crate::constants::ADDRESS_MASK_CONFIG,
            Zone::Otp => crate::constants::ADDRESS_MASK_OTP,
            Zone::Data => crate::constants::ADDRESS_MASK,
        }
    }
}

/// Device serial number - Newtype Pattern (9 バイト)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SerialNumber([u8; 9]);

impl SerialNumber {
    /// Wrap nine bytes read from the config zone.
    pub fn from_bytes(bytes: [u8; 9]) -> Self {
        Self(bytes)
    }

    /// Raw bytes, SN[0] first.
    pub fn as_bytes(&self) -> &[u8; 9] {
        &self.0
    }

    /// SN[2..4], the bytes MAC and HMAC include when asked to.
    pub fn middle(&self) -> [u8; 2] {
        [self.0[2], self.0[3]]
    }

    /// SN[4..8]
    pub fn tail(&self) -> [u8; 4] {
        [self.0[4], self.0[5], self.0[6], self.0[7]]
    }

    /// Lower-case hex, no separators.
    pub fn to_hex(&self) -> String {
        crate::utils::bytes_to_hex(self.as_bytes())
    }
}

impl TryFrom<&[u8]> for SerialNumber {
    type Error = Error;

    fn try_from(bytes: &[u8]) -> Result<Self, Self::Error> {
        if bytes.len() != 9 {
            return Err(Error::InvalidSize {
                expected: 9,
                actual: bytes.len(),
            });
        }
        let mut arr = [0u8; 9];
        arr.copy_from_slice(bytes);
        Ok(Self(arr))
    }
}

/// Status byte carried by a four-byte response packet
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeviceStatus {
    /// 0x00
    Success,
    /// 0x01
    CheckMacMiscompare,
    /// 0x03
    ParseError,
    /// 0x05
    EccFault,
    /// 0x07
    SelfTestError,
    /// 0x0F
    ExecutionError,
    /// 0x11, the wake response
    AfterWake,
    /// 0xFF, command CRC was bad
    CommunicationError,
    /// Any other byte
    Other(u8),
}

impl DeviceStatus {
    /// Classify a raw status byte.
    pub fn from_byte(status: u8) -> Self {
        use crate::constants::*;
        match status {
            STATUS_BYTE_SUCCESS => Self::Success,
            STATUS_BYTE_CHECKMAC => Self::CheckMacMiscompare,
            STATUS_BYTE_PARSE => Self::ParseError,
            STATUS_BYTE_ECC_FAULT => Self::EccFault,
            STATUS_BYTE_SELF_TEST => Self::SelfTestError,
            STATUS_BYTE_EXEC => Self::ExecutionError,
            STATUS_BYTE_WAKEUP => Self::AfterWake,
            STATUS_BYTE_COMM => Self::CommunicationError,
            other => Self::Other(other),
        }
    }

    /// Raw status byte.
    pub fn as_byte(self) -> u8 {
        use crate::constants::*;
        match self {
            Self::Success => STATUS_BYTE_SUCCESS,
            Self::CheckMacMiscompare => STATUS_BYTE_CHECKMAC,
            Self::ParseError => STATUS_BYTE_PARSE,
            Self::EccFault => STATUS_BYTE_ECC_FAULT,
            Self::SelfTestError => STATUS_BYTE_SELF_TEST,
            Self::ExecutionError => STATUS_BYTE_EXEC,
            Self::AfterWake => STATUS_BYTE_WAKEUP,
            Self::CommunicationError => STATUS_BYTE_COMM,
            Self::Other(b) => b,
        }
    }

    /// Translate into a library error. `Ok` for success and after-wake.
    pub fn into_result(self) -> crate::Result<()> {
        match self {
            Self::Success | Self::AfterWake => Ok(()),
            Self::CheckMacMiscompare => Err(Error::CheckMacFailed),
            Self::ParseError => Err(Error::ParseError),
            Self::ExecutionError => Err(Error::CmdFail),
            Self::CommunicationError => Err(Error::StatusCrc),
            other => Err(Error::StatusUnknown(other.as_byte())),
        }
    }
}

/// Physical interface
#[derive(Debug, Display, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Interface {
    /// Single-wire interface
    #[default]
    #[display(fmt = "SWI")]
    Swi,
    /// I2C, shown as TWI on the host protocol
    #[display(fmt = "TWI")]
    I2c,
}

/// Device family
#[derive(Debug, Display, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum DeviceType {
    /// ATSHA204
    #[display(fmt = "SHA204")]
    Sha204,
    /// ATECC108
    #[default]
    #[display(fmt = "ECC108")]
    Ecc108,
}
