// cryptoauth-rs/cryptoauth/src/host/command.rs
//! Host command parser.
//!
//! Grammar (case-insensitive, optional `lib:` prefix):
//!
//! ```text
//! s|e[...]:t(<packet>)      talk
//! s|e[...]:w                wake
//! s|e[...]:c(<bytes>)       send
//! s|e[...]:r(<size>)        receive
//! s|e[...]:s | :i           sleep, idle
//! s|e[...]:a(<0|1>)         wrap talk in wake/idle
//! s|e[...]:p[...]:w|c|r|sy|s(<id>)|s|i
//! b[...]:v | b[...]:f(<index>)
//! ```

use crate::utils::parse_hex;
use crate::{Error, Result};

/// Physical-layer commands (`p:` group).
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PhysicalCommand {
    /// Wake token only
    Wakeup,
    /// Raw bytes, no CRC handling
    Send(Vec<u8>),
    /// Read this many bytes
    Receive(u8),
    /// Resynchronize the interface
    Resync,
    /// Select a device by pin index or address
    Select(u8),
    /// Sleep flag or word
    Sleep,
    /// Idle flag or word
    Idle,
}

/// Device commands (`s:` / `e:` group).
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DeviceCommand {
    /// Full command round trip through the comm layer
    Talk(Vec<u8>),
    /// Wake and check the wake response
    Wake,
    /// Send a packet without waiting for a response
    Send(Vec<u8>),
    /// Receive a response of this size
    Receive(u8),
    /// Put the device to sleep
    Sleep,
    /// Put the device into idle
    Idle,
    /// Wrap each talk in a wakeup and an idle
    Wrap(bool),
    /// `p:` subcommand
    Physical(PhysicalCommand),
}

/// Board commands (`b:` group).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BoardCommand {
    /// Kit version string
    Version,
    /// Firmware info at an index
    Firmware(u8),
}

/// One parsed request line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HostCommand {
    /// Addressed to the device
    Device(DeviceCommand),
    /// Addressed to the kit itself
    Board(BoardCommand),
}

/// Hex between `(` and `)`. A missing `)` takes the rest of the field.
pub fn data_load(field: &str) -> Result<Vec<u8>> {
    let open = field
        .find('(')
        .ok_or_else(|| Error::InvalidParams(format!("no data load in '{}'", field)))?;
    let rest = &field[open + 1..];
    let hex = rest.find(')').map_or(rest, |close| &rest[..close]);
    parse_hex(hex).map_err(Error::InvalidParams)
}

fn first_byte(field: &str) -> Result<u8> {
    data_load(field)?
        .first()
        .copied()
        .ok_or_else(|| Error::InvalidParams(format!("empty data load in '{}'", field)))
}

fn unknown(line: &str) -> Error {
    Error::UnknownCommand(line.to_string())
}

/// Text after the first `:`.
fn after_colon(s: &str) -> Option<&str> {
    s.find(':').map(|i| &s[i + 1..])
}

/// Parse one request line (terminator already removed).
pub fn parse(line: &str) -> Result<HostCommand> {
    let lowered = line.trim_end_matches('\r').to_ascii_lowercase();
    let mut cmd = lowered.as_str();
    if cmd.starts_with('l') {
        cmd = after_colon(cmd).ok_or_else(|| unknown(line))?;
    }

    match cmd.as_bytes().first() {
        Some(b's') | Some(b'e') => {
            let rest = after_colon(cmd).ok_or_else(|| unknown(line))?;
            parse_device(rest, line).map(HostCommand::Device)
        }
        Some(b'b') => {
            let rest = after_colon(cmd).ok_or_else(|| unknown(line))?;
            parse_board(rest, line).map(HostCommand::Board)
        }
        _ => Err(unknown(line)),
    }
}

fn parse_device(rest: &str, line: &str) -> Result<DeviceCommand> {
    let cmd = match rest.as_bytes().first() {
        Some(b't') => DeviceCommand::Talk(data_load(rest)?),
        Some(b'w') => DeviceCommand::Wake,
        Some(b'c') => DeviceCommand::Send(data_load(rest)?),
        Some(b'r') => DeviceCommand::Receive(first_byte(rest)?),
        Some(b's') => DeviceCommand::Sleep,
        Some(b'i') => DeviceCommand::Idle,
        Some(b'a') => DeviceCommand::Wrap(first_byte(rest)? != 0),
        Some(b'p') => {
            let sub = after_colon(rest).ok_or_else(|| unknown(line))?;
            DeviceCommand::Physical(parse_physical(sub, line)?)
        }
        _ => return Err(unknown(line)),
    };
    Ok(cmd)
}

fn parse_physical(sub: &str, line: &str) -> Result<PhysicalCommand> {
    let bytes = sub.as_bytes();
    let cmd = match bytes.first() {
        Some(b'w') => PhysicalCommand::Wakeup,
        Some(b'c') => PhysicalCommand::Send(data_load(sub)?),
        Some(b'r') => PhysicalCommand::Receive(first_byte(sub)?),
        Some(b's') if bytes.get(1) == Some(&b'y') => PhysicalCommand::Resync,
        // s(<id>) selects, a bare s[leep] sleeps
        Some(b's') if sub.contains('(') => PhysicalCommand::Select(first_byte(sub)?),
        Some(b's') => PhysicalCommand::Sleep,
        Some(b'i') => PhysicalCommand::Idle,
        _ => return Err(unknown(line)),
    };
    Ok(cmd)
}

fn parse_board(rest: &str, line: &str) -> Result<BoardCommand> {
    match rest.as_bytes().first() {
        Some(b'v') => Ok(BoardCommand::Version),
        Some(b'f') => Ok(BoardCommand::Firmware(first_byte(rest)?)),
        _ => Err(unknown(line)),
    }
}
