// cryptoauth-rs/cryptoauth/src/protocol/parser.rs
//! Bounds-checked readers shared by response decoding and helper inputs.

use crate::{Error, Result};

/// `InvalidSize` unless `data` holds at least `min` bytes.
pub fn ensure_len(data: &[u8], min: usize) -> Result<()> {
    if data.len() < min {
        return Err(Error::InvalidSize {
            expected: min,
            actual: data.len(),
        });
    }
    Ok(())
}

/// Copy `N` bytes starting at `offset` into a fixed array.
pub fn array_at<const N: usize>(data: &[u8], offset: usize) -> Result<[u8; N]> {
    ensure_len(data, offset + N)?;
    let mut out = [0u8; N];
    out.copy_from_slice(&data[offset..offset + N]);
    Ok(out)
}
