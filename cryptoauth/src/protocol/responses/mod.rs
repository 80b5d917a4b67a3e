// cryptoauth-rs/cryptoauth/src/protocol/responses/mod.rs

use crate::constants::{RSP_SIZE_32, RSP_SIZE_MAX, RSP_SIZE_MIN, RSP_SIZE_VAL};
use crate::protocol::opcode_table;
use crate::protocol::packet::response_payload;
use crate::types::{DeviceStatus, Opcode};
use crate::{Error, Result};

/// Decoded response packet.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Response {
    /// Four-byte status packet
    Status(DeviceStatus),
    /// Four data bytes (Read word, Info)
    Word([u8; 4]),
    /// 32 data bytes (MAC, HMAC, Random, Nonce, Read block)
    Block([u8; 32]),
    /// Public key or signature from GenKey/Sign
    Key(Vec<u8>),
}

impl Response {
    /// Decode a received packet (count, payload, CRC) for the command that
    /// produced it.
    pub fn decode(opcode: Opcode, param1: u8, packet: &[u8]) -> Result<Self> {
        let payload = response_payload(packet)?;

        // ステータスのみのパケットはどのコマンドでもあり得る
        if packet.len() == RSP_SIZE_MIN {
            return Ok(Self::Status(DeviceStatus::from_byte(payload[0])));
        }

        let expected = opcode_table::response_size(opcode, param1);
        match (expected, packet.len()) {
            (RSP_SIZE_VAL, RSP_SIZE_VAL) => {
                Ok(Self::Word(crate::protocol::parser::array_at::<4>(payload, 0)?))
            }
            (RSP_SIZE_32, RSP_SIZE_32) => {
                Ok(Self::Block(crate::protocol::parser::array_at::<32>(payload, 0)?))
            }
            (RSP_SIZE_MAX, n) if n > RSP_SIZE_MIN && n <= RSP_SIZE_MAX => {
                Ok(Self::Key(payload.to_vec()))
            }
            (expected, actual) => Err(Error::InvalidSize { expected, actual }),
        }
    }

    /// Status carried by a status packet. Data packets count as success.
    pub fn status(&self) -> DeviceStatus {
        match self {
            Response::Status(s) => *s,
            _ => DeviceStatus::Success,
        }
    }

    /// Payload bytes; empty for a status packet.
    pub fn data(&self) -> &[u8] {
        match self {
            Response::Status(_) => &[],
            Response::Word(w) => w,
            Response::Block(b) => b,
            Response::Key(k) => k,
        }
    }

    /// 32 data bytes, or the device status as an error.
    pub fn into_block(self) -> Result<[u8; 32]> {
        match self {
            Response::Block(b) => Ok(b),
            Response::Status(s) => {
                s.into_result()?;
                Err(Error::InvalidSize {
                    expected: RSP_SIZE_32,
                    actual: RSP_SIZE_MIN,
                })
            }
            other => Err(Error::InvalidSize {
                expected: RSP_SIZE_32,
                actual: other.data().len() + 3,
            }),
        }
    }

    /// 4 data bytes, or the device status as an error.
    pub fn into_word(self) -> Result<[u8; 4]> {
        match self {
            Response::Word(w) => Ok(w),
            Response::Status(s) => {
                s.into_result()?;
                Err(Error::InvalidSize {
                    expected: RSP_SIZE_VAL,
                    actual: RSP_SIZE_MIN,
                })
            }
            other => Err(Error::InvalidSize {
                expected: RSP_SIZE_VAL,
                actual: other.data().len() + 3,
            }),
        }
    }
}

impl Response {
    /// Variable-length ECC payload. A digest-mode GenKey answers with a
    /// status packet and yields an empty key.
    pub fn into_key(self) -> Result<Vec<u8>> {
        match self {
            Response::Key(k) => Ok(k),
            Response::Status(s) => {
                s.into_result()?;
                Ok(Vec::new())
            }
            other => Err(Error::InvalidSize {
                expected: RSP_SIZE_MAX,
                actual: other.data().len() + 3,
            }),
        }
    }
}
