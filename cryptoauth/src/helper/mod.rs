// cryptoauth-rs/cryptoauth/src/helper/mod.rs
//! Host-side emulation of the device's cryptographic state.
//!
//! Each function mirrors one command: it checks the same parameters, checks
//! and updates [`TempKey`] the same way, and computes the digest the device
//! would. Used to predict MAC responses and to build CheckMac, DeriveKey
//! and encrypted Write inputs.

/// CheckMac client response.
pub mod check_mac;
/// DeriveKey result and its authorizing MAC.
pub mod derive_key;
pub mod encrypt;
/// GenDig over TempKey.
pub mod gen_dig;
pub mod mac;
/// Nonce into TempKey.
pub mod nonce;
pub mod sha256;
/// Host copy of TempKey.
pub mod tempkey;

pub use check_mac::{check_mac, CheckMacInput};
pub use derive_key::{derive_key, derive_key_mac};
pub use encrypt::{decrypt, encrypt};
pub use gen_dig::gen_dig;
pub use mac::{hmac, mac, HmacInput, MacInput, OtpBytes};
pub use nonce::nonce;
pub use sha256::{sha256, Sha256};
pub use tempkey::{Source, TempKey, TempKeyState};

pub use crate::protocol::crc::{crc16, crc16_bytes};
