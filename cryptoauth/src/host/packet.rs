// cryptoauth-rs/cryptoauth/src/host/packet.rs
//! Line framing for the ASCII host protocol.
//!
//! Requests are terminated by `'\n'`. Responses are
//! `[<ascii prefix>]<status hex>(<data hex>)\n` with uppercase hex.

use crate::error::codes;
use crate::utils::bytes_to_hex_upper;
use crate::{Error, Result};

/// End of packet
pub const EOP: u8 = b'\n';

/// Default request capacity in bytes, terminator excluded.
pub const RX_CAPACITY: usize = 384;

/// Default response capacity in data bytes.
pub const TX_CAPACITY: usize = 255;

/// Accumulates host bytes into lines.
///
/// A line that outgrows the capacity is dropped up to its terminator and
/// reported as [`Error::RxOverflow`].
#[derive(Debug, Clone)]
pub struct Collator {
    buf: Vec<u8>,
    capacity: usize,
    overflowed: bool,
}

impl Default for Collator {
    fn default() -> Self {
        Self::new(RX_CAPACITY)
    }
}

impl Collator {
    /// Collator for lines of at most `capacity` bytes.
    pub fn new(capacity: usize) -> Self {
        Self {
            buf: Vec::with_capacity(capacity),
            capacity,
            overflowed: false,
        }
    }

    /// Receive buffer size.
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Bytes of the line collected so far.
    pub fn pending(&self) -> usize {
        self.buf.len()
    }

    /// Take one byte. Returns the finished line when `byte` is the
    /// terminator.
    pub fn push(&mut self, byte: u8) -> Option<Result<Vec<u8>>> {
        if byte == EOP {
            if std::mem::take(&mut self.overflowed) {
                self.buf.clear();
                log::warn!("host line dropped: longer than {} bytes", self.capacity);
                return Some(Err(Error::RxOverflow {
                    capacity: self.capacity,
                }));
            }
            return Some(Ok(std::mem::take(&mut self.buf)));
        }
        if self.overflowed {
            return None;
        }
        if self.buf.len() >= self.capacity {
            self.overflowed = true;
            self.buf.clear();
        } else {
            self.buf.push(byte);
        }
        None
    }

    /// Take a chunk of bytes and return every line it completes.
    pub fn feed(&mut self, bytes: &[u8]) -> Vec<Result<Vec<u8>>> {
        bytes.iter().filter_map(|&b| self.push(b)).collect()
    }

    /// Drop the partial line and any overflow.
    pub fn reset(&mut self) {
        self.buf.clear();
        self.overflowed = false;
    }
}

/// A response before hex encoding.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct HostResponse {
    /// Plain text sent ahead of the status (board commands only)
    pub prefix: String,
    /// Return code
    pub status: u8,
    /// Response payload
    pub data: Vec<u8>,
}

impl HostResponse {
    /// Response with no prefix.
    pub fn new(status: u8, data: Vec<u8>) -> Self {
        Self {
            prefix: String::new(),
            status,
            data,
        }
    }

    /// Success with a payload.
    pub fn success(data: Vec<u8>) -> Self {
        Self::new(codes::SUCCESS, data)
    }

    /// Status-only response carrying the return code of `err`.
    pub fn error(err: &Error) -> Self {
        Self::new(err.return_code(), Vec::new())
    }

    /// Text sent before the status.
    pub fn with_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.prefix = prefix.into();
        self
    }

    /// Encode as a protocol line. Data beyond `tx_capacity` bytes is cut off
    /// and the status replaced with the tx overflow code.
    pub fn encode(&self, tx_capacity: usize) -> String {
        let (status, data) = if self.data.len() > tx_capacity {
            let err = Error::BufferOverflow {
                capacity: tx_capacity,
                needed: self.data.len(),
            };
            log::warn!("host response truncated: {}", err);
            (err.return_code(), &self.data[..tx_capacity])
        } else {
            (self.status, &self.data[..])
        };
        format!(
            "{}{:02X}({})\n",
            self.prefix,
            status,
            bytes_to_hex_upper(data)
        )
    }
}

/// Encode a status and data load with the default tx capacity.
pub fn encode_response(status: u8, data: &[u8]) -> String {
    HostResponse::new(status, data.to_vec()).encode(TX_CAPACITY)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn collects_lines() {
        let mut c = Collator::new(16);
        let lines = c.feed(b"s:w\ns:t(07");
        assert_eq!(lines, vec![Ok(b"s:w".to_vec())]);
        assert_eq!(c.pending(), 6);
        let lines = c.feed(b"02)\n");
        assert_eq!(lines, vec![Ok(b"s:t(0702)".to_vec())]);
        assert_eq!(c.pending(), 0);
    }

    #[test]
    fn overflow_discards_until_terminator() {
        let mut c = Collator::new(4);
        let lines = c.feed(b"abcdefgh\nb:v\n");
        assert_eq!(
            lines,
            vec![Err(Error::RxOverflow { capacity: 4 }), Ok(b"b:v".to_vec())]
        );
        assert_eq!(lines[0].as_ref().unwrap_err().return_code(), 0xC1);
    }

    #[test]
    fn exactly_full_line_is_accepted() {
        let mut c = Collator::new(3);
        assert_eq!(c.feed(b"s:w\n"), vec![Ok(b"s:w".to_vec())]);
    }

    #[test]
    fn one_byte_past_capacity_overflows() {
        let mut c = Collator::new(4);
        assert!(c.feed(b"b:f(").is_empty());
        assert_eq!(c.pending(), c.capacity());

        // the fifth byte tips it over; nothing more is kept
        assert!(c.feed(b"0").is_empty());
        assert_eq!(c.pending(), 0);
        assert!(c.feed(b"3)").is_empty());
        assert_eq!(c.pending(), 0);

        assert_eq!(c.feed(b"\n"), vec![Err(Error::RxOverflow { capacity: 4 })]);
        assert_eq!(c.feed(b"b:v\n"), vec![Ok(b"b:v".to_vec())]);
    }

    #[test]
    fn reset_clears_overflow() {
        let mut c = Collator::new(2);
        c.feed(b"abc");
        c.reset();
        assert_eq!(c.feed(b"ab\n"), vec![Ok(b"ab".to_vec())]);
    }

    #[test]
    fn encodes_uppercase() {
        assert_eq!(encode_response(0x00, &[0x04, 0x11, 0x33, 0x43]), "00(04113343)\n");
        assert_eq!(encode_response(0xE7, &[]), "E7()\n");
        let r = HostResponse::success(vec![0xab]).with_prefix("CK590 ");
        assert_eq!(r.encode(TX_CAPACITY), "CK590 00(AB)\n");
    }

    #[test]
    fn oversized_data_is_truncated() {
        let r = HostResponse::success(vec![0x11; 6]);
        assert_eq!(r.encode(4), "C2(11111111)\n");
    }
}
