// cryptoauth-rs/cryptoauth/src/protocol/packet.rs

use crate::constants::{
    CMD_SIZE_MAX, CMD_SIZE_MIN, COUNT_IDX, CRC_SIZE, DATA_IDX, OPCODE_IDX, PARAM1_IDX,
    PARAM2_IDX, RSP_SIZE_MIN, RSP_STATUS_IDX,
};
use crate::{Error, Result};

/// Command packet on the wire
/// Format: [Count(1)] [Opcode(1)] [Param1(1)] [Param2(2, LE)] [Data(n)] [CRC(2)]
///
/// Count covers the whole packet including itself and the CRC. The CRC
/// bytes are reserved here and filled by the comm layer before sending.
#[derive(Clone, PartialEq, Eq)]
pub struct CommandPacket {
    buf: [u8; CMD_SIZE_MAX],
    len: usize,
}

impl CommandPacket {
    /// Build a packet with the count byte set and room for the CRC.
    pub fn new(opcode: u8, param1: u8, param2: u16, data: &[u8]) -> Result<Self> {
        let len = CMD_SIZE_MIN + data.len();
        if len > CMD_SIZE_MAX {
            return Err(Error::BadParam(format!(
                "command packet of {} bytes exceeds {}",
                len, CMD_SIZE_MAX
            )));
        }

        let mut buf = [0u8; CMD_SIZE_MAX];
        buf[COUNT_IDX] = len as u8;
        buf[OPCODE_IDX] = opcode;
        buf[PARAM1_IDX] = param1;
        buf[PARAM2_IDX..DATA_IDX].copy_from_slice(&param2.to_le_bytes());
        buf[DATA_IDX..DATA_IDX + data.len()].copy_from_slice(data);
        Ok(Self { buf, len })
    }

    /// Wrap an already-formatted packet (host talk). The count byte must
    /// match the slice length.
    pub fn from_wire(bytes: &[u8]) -> Result<Self> {
        if bytes.len() < CMD_SIZE_MIN || bytes.len() > CMD_SIZE_MAX {
            return Err(Error::BadParam(format!(
                "command packet length {} outside [{}, {}]",
                bytes.len(),
                CMD_SIZE_MIN,
                CMD_SIZE_MAX
            )));
        }
        if usize::from(bytes[COUNT_IDX]) != bytes.len() {
            return Err(Error::BadParam(format!(
                "count byte {} does not match length {}",
                bytes[COUNT_IDX],
                bytes.len()
            )));
        }
        let mut buf = [0u8; CMD_SIZE_MAX];
        buf[..bytes.len()].copy_from_slice(bytes);
        Ok(Self {
            buf,
            len: bytes.len(),
        })
    }

    /// Packet length, CRC included.
    pub fn len(&self) -> usize {
        self.len
    }

    /// Always false for a constructed packet.
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Wire bytes.
    pub fn as_bytes(&self) -> &[u8] {
        &self.buf[..self.len]
    }

    /// Wire bytes, for filling in the CRC.
    pub fn as_mut_bytes(&mut self) -> &mut [u8] {
        &mut self.buf[..self.len]
    }

    /// Opcode byte
    pub fn opcode(&self) -> u8 {
        self.buf[OPCODE_IDX]
    }

    /// Param1 byte
    pub fn param1(&self) -> u8 {
        self.buf[PARAM1_IDX]
    }

    /// Param2, decoded little-endian
    pub fn param2(&self) -> u16 {
        u16::from_le_bytes([self.buf[PARAM2_IDX], self.buf[PARAM2_IDX + 1]])
    }

    /// Data section, excluding the CRC.
    pub fn data(&self) -> &[u8] {
        &self.buf[DATA_IDX..self.len - CRC_SIZE]
    }

    /// Fill in the trailing CRC bytes.
    pub fn seal(&mut self) {
        let len = self.len;
        let crc = crate::protocol::crc::crc16_bytes(&self.buf[..len - CRC_SIZE]);
        self.buf[len - CRC_SIZE..len].copy_from_slice(&crc);
    }
}

impl std::fmt::Debug for CommandPacket {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CommandPacket")
            .field("bytes", &crate::utils::bytes_to_hex_spaced(self.as_bytes()))
            .finish()
    }
}

/// Status byte of a four-byte response, `None` for data responses.
pub fn response_status(packet: &[u8]) -> Option<u8> {
    if packet.len() == RSP_SIZE_MIN && usize::from(packet[COUNT_IDX]) == RSP_SIZE_MIN {
        Some(packet[RSP_STATUS_IDX])
    } else {
        None
    }
}

/// Check count byte and CRC of a received response. Returns the payload
/// between the count byte and the CRC.
pub fn response_payload(packet: &[u8]) -> Result<&[u8]> {
    crate::protocol::parser::ensure_len(packet, RSP_SIZE_MIN)?;
    let count = usize::from(packet[COUNT_IDX]);
    if count != packet.len() {
        return Err(Error::InvalidSize {
            expected: packet.len(),
            actual: count,
        });
    }
    crate::protocol::crc::verify_crc(packet)?;
    Ok(&packet[1..count - CRC_SIZE])
}
