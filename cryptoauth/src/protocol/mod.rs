// cryptoauth-rs/cryptoauth/src/protocol/mod.rs

pub mod commands;
pub mod crc;
pub mod opcode_table;
/// Command and response packet buffers.
pub mod packet;
pub mod parser;
/// Typed responses.
pub mod responses;

pub use commands::{Command, WriteData};
pub use crc::{crc16, crc16_bytes, crc16_update};
pub use opcode_table::{lookup, response_size, OpcodeInfo};
pub use packet::CommandPacket;
pub use responses::Response;
