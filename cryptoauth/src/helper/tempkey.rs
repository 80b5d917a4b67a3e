// cryptoauth-rs/cryptoauth/src/helper/tempkey.rs

use crate::types::Digest;
use crate::{Error, Result};

/// Where the TempKey value came from. Mode bit 2 of MAC, HMAC and
/// DeriveKey states which one the caller expects.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Source {
    /// Nonce mixed with the device RNG
    Random,
    /// Loaded by the host (pass-through Nonce, CheckMac copy)
    Input,
}

impl Source {
    /// Source a mode bit asks for: set means input.
    pub fn from_flag(flag: bool) -> Self {
        if flag {
            Source::Input
        } else {
            Source::Random
        }
    }
}

/// What last loaded TempKey.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TempKeyState {
    /// Cleared, or never loaded
    Invalid,
    /// Random nonce
    ValidRandom,
    /// Pass-through nonce
    ValidPassthrough,
    /// GenDig over a data slot
    ValidDerived {
        /// Slot folded in
        key_id: u8,
        /// Source of the TempKey value before the GenDig
        source: Source,
    },
}

/// Host copy of the device's TempKey register.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TempKey {
    value: Digest,
    state: TempKeyState,
    check_flag: bool,
}

impl Default for TempKey {
    fn default() -> Self {
        Self::new()
    }
}

impl TempKey {
    /// Invalid, all zeros.
    pub fn new() -> Self {
        Self {
            value: [0u8; 32],
            state: TempKeyState::Invalid,
            check_flag: false,
        }
    }

    /// Current 32 bytes
    pub fn value(&self) -> &Digest {
        &self.value
    }

    /// Current state
    pub fn state(&self) -> TempKeyState {
        self.state
    }

    /// False after a failed command or [`TempKey::invalidate`].
    pub fn is_valid(&self) -> bool {
        self.state != TempKeyState::Invalid
    }

    /// `None` while invalid.
    pub fn source(&self) -> Option<Source> {
        match self.state {
            TempKeyState::Invalid => None,
            TempKeyState::ValidRandom => Some(Source::Random),
            TempKeyState::ValidPassthrough => Some(Source::Input),
            TempKeyState::ValidDerived { source, .. } => Some(source),
        }
    }

    /// Datasheet SourceFlag: 0 random, 1 input.
    pub fn source_flag(&self) -> bool {
        self.source() == Some(Source::Input)
    }

    /// Datasheet GenData: TempKey was produced by GenDig over a data slot.
    pub fn gen_data(&self) -> bool {
        matches!(self.state, TempKeyState::ValidDerived { .. })
    }

    /// Datasheet KeyID: the slot of the last data-slot GenDig, else 0.
    pub fn key_id(&self) -> u8 {
        match self.state {
            TempKeyState::ValidDerived { key_id, .. } => key_id,
            _ => 0,
        }
    }

    /// Datasheet CheckFlag.
    pub fn check_flag(&self) -> bool {
        self.check_flag
    }

    /// Override the check flag.
    pub fn set_check_flag(&mut self, flag: bool) {
        self.check_flag = flag;
    }

    /// The device does this whenever a command fails.
    pub fn invalidate(&mut self) {
        self.state = TempKeyState::Invalid;
    }

    /// Replace the value and state. Clears the check flag.
    pub(crate) fn load(&mut self, value: Digest, state: TempKeyState) {
        self.value = value;
        self.state = state;
        self.check_flag = false;
    }

    /// Check TempKey before it is consumed. On failure TempKey is
    /// invalidated and `CmdFail` returned, as the device would.
    pub(crate) fn require(&mut self, source: Option<Source>, gen_data: bool) -> Result<Digest> {
        let ok = self.is_valid()
            && !self.check_flag
            && source.map_or(true, |s| self.source() == Some(s))
            && (!gen_data || self.gen_data());
        if !ok {
            log::debug!("tempkey rejected in state {:?}", self.state);
            self.invalidate();
            return Err(Error::CmdFail);
        }
        Ok(self.value)
    }
}
