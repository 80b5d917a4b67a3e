// cryptoauth-rs/cryptoauth/src/protocol/commands/mod.rs

//! Typed device commands.
//!
//! Each variant carries exactly the fields its packet needs. `validate`
//! applies the parameter rules before any I/O; `encode` produces the wire
//! packet with CRC space reserved; `from_raw` turns a raw
//! opcode/param/data layout back into a typed command.

pub mod auth;
pub mod keys;
pub mod memory;
pub mod system;

pub use auth::*;
pub use keys::*;
pub use memory::*;
pub use system::*;

use crate::protocol::packet::CommandPacket;
use crate::types::{Digest, Opcode};
use crate::{Error, Result};

/// Write payload: one word or a full block, selected by zone bit 7.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WriteData {
    /// Four bytes
    Word([u8; 4]),
    /// 32 bytes
    Block([u8; 32]),
}

impl WriteData {
    /// Payload as written to the packet.
    pub fn as_bytes(&self) -> &[u8] {
        match self {
            WriteData::Word(w) => w,
            WriteData::Block(b) => b,
        }
    }
}

/// High-level Command enum. Validation and raw parsing for each group of
/// commands lives in `protocol::commands::<group>.rs`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Compare a client MAC with one the device computes.
    CheckMac {
        /// Mode bits
        mode: u8,
        /// Slot holding the key
        key_id: u16,
        /// ClientChal; `None` when block 2 comes from TempKey
        challenge: Option<Digest>,
        /// ClientResp, the MAC to check
        response: Digest,
        /// Opcode, mode and key id bytes the client hashed
        other_data: [u8; CHECKMAC_OTHER_DATA_SIZE],
    },
    /// Derive a new value for `target` from its parent key and TempKey.
    DeriveKey {
        /// Random flag in param1
        random: u8,
        /// Slot to update
        target: u16,
        /// Authorizing MAC when the slot requires one
        mac: Option<Digest>,
    },
    /// DevRev on SHA204 is Info with mode 0.
    Info {
        /// Info mode
        mode: u8,
        /// Mode-specific parameter
        param: u16,
    },
    /// Fold a key, OTP or config value into TempKey.
    GenDig {
        /// Source zone
        zone: u8,
        /// Slot or block
        key_id: u16,
        /// OtherData for ECC108 shared-nonce digests
        other_data: Option<[u8; GENDIG_OTHER_DATA_SIZE]>,
    },
    /// HMAC over TempKey and a slot key.
    Hmac {
        /// Mode bits
        mode: u8,
        /// Slot holding the key
        key_id: u16,
    },
    /// Lock the config zone, or the data and OTP zones.
    Lock {
        /// Zone selector
        zone: u8,
        /// CRC over the zone, ignored with the no-CRC flag
        summary: u16,
    },
    /// MAC over a key and a challenge.
    Mac {
        /// Mode bits
        mode: u8,
        /// Slot holding the key
        key_id: u16,
        /// Challenge; `None` when block 2 comes from TempKey
        challenge: Option<Digest>,
    },
    /// Load TempKey with a random nonce or a pass-through value.
    Nonce {
        /// Nonce mode
        mode: u8,
        /// 20 bytes, or 32 in pass-through mode
        num_in: Vec<u8>,
    },
    /// Idle every device whose Selector byte differs.
    Pause {
        /// Selector to keep awake
        selector: u8,
    },
    /// 32 random bytes.
    Random {
        /// Seed-update mode
        mode: u8,
    },
    /// `address` is a byte address; the packet carries `address >> 2`.
    Read {
        /// Zone bits, bit 7 selects 32 bytes
        zone: u8,
        /// Byte address
        address: u16,
    },
    /// Write UserExtra or Selector once the config zone is locked.
    UpdateExtra {
        /// Which byte
        mode: u8,
        /// New value, low byte only
        value: u16,
    },
    /// `address` is a byte address; the packet carries `address >> 2`.
    Write {
        /// Zone bits
        zone: u8,
        /// Byte address
        address: u16,
        /// Word or block
        data: WriteData,
        /// MAC for an encrypted write
        mac: Option<Digest>,
    },
    /// ECC108 key generation.
    GenKey {
        /// Public, private or digest
        mode: u8,
        /// Slot holding the private key
        key_id: u16,
        /// OtherData for digest mode
        other_data: Option<[u8; GENKEY_OTHER_DATA_SIZE]>,
    },
    /// ECC108 signature.
    Sign {
        /// Internal or external message
        mode: u8,
        /// Slot holding the private key
        key_id: u16,
    },
    /// ECC108 signature check.
    Verify {
        /// Stored or external key
        mode: u8,
        /// Slot of the stored key, or the curve for an external one
        key_id: u16,
        /// R and S
        signature: [u8; VERIFY_SIGNATURE_SIZE],
        /// X and Y for external mode
        public_key: Option<[u8; VERIFY_PUBLIC_KEY_SIZE]>,
    },
    /// Write a private key into a slot.
    PrivWrite {
        /// Encryption flag
        mode: u8,
        /// Target slot
        key_id: u16,
        /// Padded private key, encrypted when the mode says so
        value: [u8; PRIVWRITE_VALUE_SIZE],
        /// Authorizing MAC
        mac: Digest,
    },
}

pub(crate) fn bad_param(msg: impl Into<String>) -> Error {
    Error::BadParam(msg.into())
}

impl Command {
    /// Opcode byte for this command.
    pub fn opcode(&self) -> Opcode {
        match self {
            Self::CheckMac { .. } => Opcode::CheckMac,
            Self::DeriveKey { .. } => Opcode::DeriveKey,
            Self::Info { .. } => Opcode::Info,
            Self::GenDig { .. } => Opcode::GenDig,
            Self::Hmac { .. } => Opcode::Hmac,
            Self::Lock { .. } => Opcode::Lock,
            Self::Mac { .. } => Opcode::Mac,
            Self::Nonce { .. } => Opcode::Nonce,
            Self::Pause { .. } => Opcode::Pause,
            Self::Random { .. } => Opcode::Random,
            Self::Read { .. } => Opcode::Read,
            Self::UpdateExtra { .. } => Opcode::UpdateExtra,
            Self::Write { .. } => Opcode::Write,
            Self::GenKey { .. } => Opcode::GenKey,
            Self::Sign { .. } => Opcode::Sign,
            Self::Verify { .. } => Opcode::Verify,
            Self::PrivWrite { .. } => Opcode::PrivWrite,
        }
    }

    /// Param1 as it goes on the wire.
    pub fn param1(&self) -> u8 {
        match self {
            Self::CheckMac { mode, .. }
            | Self::Info { mode, .. }
            | Self::Hmac { mode, .. }
            | Self::Mac { mode, .. }
            | Self::Nonce { mode, .. }
            | Self::Random { mode }
            | Self::UpdateExtra { mode, .. }
            | Self::GenKey { mode, .. }
            | Self::Sign { mode, .. }
            | Self::Verify { mode, .. }
            | Self::PrivWrite { mode, .. } => *mode,
            Self::DeriveKey { random, .. } => *random,
            Self::GenDig { zone, .. }
            | Self::Lock { zone, .. }
            | Self::Read { zone, .. }
            | Self::Write { zone, .. } => *zone,
            Self::Pause { selector } => *selector,
        }
    }

    /// Param2 as it goes on the wire. Byte addresses become word addresses.
    pub fn param2(&self) -> u16 {
        match self {
            Self::CheckMac { key_id, .. }
            | Self::GenDig { key_id, .. }
            | Self::Hmac { key_id, .. }
            | Self::Mac { key_id, .. }
            | Self::GenKey { key_id, .. }
            | Self::Sign { key_id, .. }
            | Self::Verify { key_id, .. }
            | Self::PrivWrite { key_id, .. } => *key_id,
            Self::DeriveKey { target, .. } => *target,
            Self::Info { param, .. } => *param,
            Self::Lock { summary, .. } => *summary,
            Self::UpdateExtra { value, .. } => *value,
            Self::Read { address, .. } | Self::Write { address, .. } => {
                word_address(*address)
            }
            Self::Nonce { .. } | Self::Pause { .. } | Self::Random { .. } => 0,
        }
    }

    /// Data section of the packet.
    pub fn data(&self) -> Vec<u8> {
        let mut out = Vec::new();
        match self {
            Self::CheckMac {
                challenge,
                response,
                other_data,
                ..
            } => {
                // チャレンジ省略時はゼロ埋め
                out.extend_from_slice(challenge.as_ref().unwrap_or(&[0u8; 32]));
                out.extend_from_slice(response);
                out.extend_from_slice(other_data);
            }
            Self::DeriveKey { mac, .. } => {
                if let Some(m) = mac {
                    out.extend_from_slice(m);
                }
            }
            Self::GenDig { other_data, .. } => {
                if let Some(d) = other_data {
                    out.extend_from_slice(d);
                }
            }
            Self::Mac { mode, challenge, .. } => {
                if mode & MAC_MODE_BLOCK2_TEMPKEY == 0 {
                    if let Some(c) = challenge {
                        out.extend_from_slice(c);
                    }
                }
            }
            Self::Nonce { num_in, .. } => out.extend_from_slice(num_in),
            Self::Write { data, mac, .. } => {
                out.extend_from_slice(data.as_bytes());
                if let Some(m) = mac {
                    out.extend_from_slice(m);
                }
            }
            Self::GenKey { other_data, .. } => {
                if let Some(d) = other_data {
                    out.extend_from_slice(d);
                }
            }
            Self::Verify {
                signature,
                public_key,
                ..
            } => {
                out.extend_from_slice(signature);
                if let Some(k) = public_key {
                    out.extend_from_slice(k);
                }
            }
            Self::PrivWrite { value, mac, .. } => {
                out.extend_from_slice(value);
                out.extend_from_slice(mac);
            }
            Self::Info { .. }
            | Self::Hmac { .. }
            | Self::Lock { .. }
            | Self::Pause { .. }
            | Self::Random { .. }
            | Self::Read { .. }
            | Self::UpdateExtra { .. }
            | Self::Sign { .. } => {}
        }
        out
    }

    /// Check parameter legality. No I/O happens for a rejected command.
    pub fn validate(&self) -> Result<()> {
        match self {
            Self::CheckMac { mode, key_id, .. } => auth::validate_check_mac(*mode, *key_id),
            Self::GenDig { zone, key_id, .. } => auth::validate_gen_dig(*zone, *key_id),
            Self::Hmac { mode, .. } => auth::validate_hmac(*mode),
            Self::Mac {
                mode,
                key_id,
                challenge,
            } => auth::validate_mac(*mode, *key_id, challenge.is_some()),
            Self::Nonce { mode, num_in } => auth::validate_nonce(*mode, num_in.len()),
            Self::DeriveKey { random, target, .. } => keys::validate_derive_key(*random, *target),
            Self::GenKey {
                mode,
                key_id,
                other_data,
            } => keys::validate_gen_key(*mode, *key_id, other_data.is_some()),
            Self::Sign { mode, key_id } => keys::validate_sign(*mode, *key_id),
            Self::Verify {
                mode,
                key_id,
                public_key,
                ..
            } => keys::validate_verify(*mode, *key_id, public_key.is_some()),
            Self::PrivWrite { mode, key_id, .. } => keys::validate_priv_write(*mode, *key_id),
            Self::Lock { zone, summary } => memory::validate_lock(*zone, *summary),
            Self::Read { zone, address } => memory::validate_read(*zone, *address),
            Self::Write {
                zone,
                address,
                data,
                ..
            } => memory::validate_write(*zone, *address, data),
            Self::Info { mode, param } => system::validate_info(*mode, *param),
            Self::Pause { .. } => Ok(()),
            Self::Random { mode } => system::validate_random(*mode),
            Self::UpdateExtra { mode, value } => system::validate_update_extra(*mode, *value),
        }
    }

    /// Validate and build the wire packet (CRC bytes left for the comm layer).
    pub fn encode(&self) -> Result<CommandPacket> {
        self.validate()?;
        CommandPacket::new(
            self.opcode().as_u8(),
            self.param1(),
            self.param2(),
            &self.data(),
        )
    }

    /// Expected response packet size.
    pub fn response_size(&self) -> usize {
        crate::protocol::opcode_table::response_size(self.opcode(), self.param1())
    }

    /// Parse a raw layout into a typed command. `param2` for Read/Write is
    /// the word address as it appears on the wire.
    pub fn from_raw(opcode: u8, param1: u8, param2: u16, data: &[u8]) -> Result<Self> {
        let op = Opcode::try_from(opcode)?;
        let cmd = match op {
            Opcode::CheckMac => auth::parse_check_mac(param1, param2, data)?,
            Opcode::GenDig => auth::parse_gen_dig(param1, param2, data)?,
            Opcode::Hmac => {
                expect_no_data(op, data)?;
                Self::Hmac {
                    mode: param1,
                    key_id: param2,
                }
            }
            Opcode::Mac => auth::parse_mac(param1, param2, data)?,
            Opcode::Nonce => {
                if param2 != 0 {
                    return Err(bad_param("nonce param2 must be 0"));
                }
                Self::Nonce {
                    mode: param1,
                    num_in: data.to_vec(),
                }
            }
            Opcode::DeriveKey => keys::parse_derive_key(param1, param2, data)?,
            Opcode::GenKey => keys::parse_gen_key(param1, param2, data)?,
            Opcode::Sign => {
                expect_no_data(op, data)?;
                Self::Sign {
                    mode: param1,
                    key_id: param2,
                }
            }
            Opcode::Verify => keys::parse_verify(param1, param2, data)?,
            Opcode::PrivWrite => keys::parse_priv_write(param1, param2, data)?,
            Opcode::Lock => {
                expect_no_data(op, data)?;
                Self::Lock {
                    zone: param1,
                    summary: param2,
                }
            }
            Opcode::Read => {
                expect_no_data(op, data)?;
                Self::Read {
                    zone: param1,
                    address: byte_address(param2)?,
                }
            }
            Opcode::Write => memory::parse_write(param1, param2, data)?,
            Opcode::Info => {
                expect_no_data(op, data)?;
                Self::Info {
                    mode: param1,
                    param: param2,
                }
            }
            Opcode::Pause => {
                expect_no_data(op, data)?;
                Self::Pause { selector: param1 }
            }
            Opcode::Random => {
                expect_no_data(op, data)?;
                Self::Random { mode: param1 }
            }
            Opcode::UpdateExtra => {
                expect_no_data(op, data)?;
                Self::UpdateExtra {
                    mode: param1,
                    value: param2,
                }
            }
        };
        cmd.validate()?;
        Ok(cmd)
    }
}

fn expect_no_data(op: Opcode, data: &[u8]) -> Result<()> {
    if !data.is_empty() {
        return Err(bad_param(format!(
            "{} takes no data, got {} bytes",
            op,
            data.len()
        )));
    }
    Ok(())
}

fn word_address(byte_address: u16) -> u16 {
    (byte_address >> 2) & crate::constants::ADDRESS_MASK
}

fn byte_address(word: u16) -> Result<u16> {
    if word > crate::constants::ADDRESS_MASK {
        return Err(bad_param(format!("word address {:#06x} out of range", word)));
    }
    Ok(word << 2)
}

pub(crate) fn array<const N: usize>(data: &[u8]) -> Result<[u8; N]> {
    crate::protocol::parser::array_at::<N>(data, 0).map_err(|_| {
        bad_param(format!("expected {} bytes, got {}", N, data.len()))
    })
}
