// cryptoauth-rs/cryptoauth/src/device/operations.rs

//! One wrapper per command. Each builds the typed [`Command`], runs it and
//! unpacks the response into what the caller needs.

use crate::constants::ZONE_COUNT_FLAG;
use crate::device::handle::{Awake, Device};
use crate::protocol::commands::{
    CHECKMAC_OTHER_DATA_SIZE, GENDIG_OTHER_DATA_SIZE, GENKEY_OTHER_DATA_SIZE,
    NONCE_MODE_PASSTHROUGH, PRIVWRITE_VALUE_SIZE, VERIFY_PUBLIC_KEY_SIZE, VERIFY_SIGNATURE_SIZE,
};
use crate::protocol::{Command, WriteData};
use crate::types::Digest;
use crate::Result;

impl Device<Awake> {
    fn execute_status(&mut self, cmd: Command) -> Result<()> {
        self.execute(&cmd)?.status().into_result()
    }

    /// Compare a client response against the device's own MAC.
    /// A miscompare is `Error::CheckMacFailed`.
    pub fn check_mac(
        &mut self,
        mode: u8,
        key_id: u16,
        challenge: Option<&Digest>,
        response: &Digest,
        other_data: &[u8; CHECKMAC_OTHER_DATA_SIZE],
    ) -> Result<()> {
        self.execute_status(Command::CheckMac {
            mode,
            key_id,
            challenge: challenge.copied(),
            response: *response,
            other_data: *other_data,
        })
    }

    /// Derive a slot key from its parent and TempKey.
    pub fn derive_key(&mut self, random: u8, target: u16, mac: Option<&Digest>) -> Result<()> {
        self.execute_status(Command::DeriveKey {
            random,
            target,
            mac: mac.copied(),
        })
    }

    /// Info command (ECC108) or DevRev.
    pub fn info(&mut self, mode: u8, param: u16) -> Result<[u8; 4]> {
        self.execute(&Command::Info { mode, param })?.into_word()
    }

    /// Device revision (SHA204 DevRev, ECC108 Info mode 0).
    pub fn dev_rev(&mut self) -> Result<[u8; 4]> {
        self.info(0, 0)
    }

    /// Fold a slot or OTP value into TempKey.
    pub fn gen_dig(
        &mut self,
        zone: u8,
        key_id: u16,
        other_data: Option<[u8; GENDIG_OTHER_DATA_SIZE]>,
    ) -> Result<()> {
        self.execute_status(Command::GenDig {
            zone,
            key_id,
            other_data,
        })
    }

    /// HMAC over TempKey and a slot key.
    pub fn hmac(&mut self, mode: u8, key_id: u16) -> Result<Digest> {
        self.execute(&Command::Hmac { mode, key_id })?.into_block()
    }

    /// Lock a zone. `summary` is the CRC over the zone contents.
    pub fn lock(&mut self, zone: u8, summary: u16) -> Result<()> {
        self.execute_status(Command::Lock { zone, summary })
    }

    /// MAC over a slot key and a challenge or TempKey.
    pub fn mac(&mut self, mode: u8, key_id: u16, challenge: Option<&Digest>) -> Result<Digest> {
        self.execute(&Command::Mac {
            mode,
            key_id,
            challenge: challenge.copied(),
        })?
        .into_block()
    }

    /// Returns RandOut for modes 0 and 1, `None` in pass-through mode.
    pub fn nonce(&mut self, mode: u8, num_in: &[u8]) -> Result<Option<Digest>> {
        let resp = self.execute(&Command::Nonce {
            mode,
            num_in: num_in.to_vec(),
        })?;
        if mode == NONCE_MODE_PASSTHROUGH {
            resp.status().into_result()?;
            return Ok(None);
        }
        resp.into_block().map(Some)
    }

    /// Send every device whose selector differs to idle.
    pub fn pause(&mut self, selector: u8) -> Result<()> {
        self.execute_status(Command::Pause { selector })
    }

    /// 32 random bytes.
    pub fn random(&mut self, mode: u8) -> Result<Digest> {
        self.execute(&Command::Random { mode })?.into_block()
    }

    /// Read four bytes at a byte address.
    pub fn read_word(&mut self, zone: u8, address: u16) -> Result<[u8; 4]> {
        self.execute(&Command::Read {
            zone: zone & !ZONE_COUNT_FLAG,
            address,
        })?
        .into_word()
    }

    /// Read 32 bytes at a byte address.
    pub fn read_block(&mut self, zone: u8, address: u16) -> Result<Digest> {
        self.execute(&Command::Read {
            zone: zone | ZONE_COUNT_FLAG,
            address,
        })?
        .into_block()
    }

    /// Write the UserExtra or Selector byte in the config zone.
    pub fn update_extra(&mut self, mode: u8, value: u16) -> Result<()> {
        self.execute_status(Command::UpdateExtra { mode, value })
    }

    /// Write a word or block. The zone count flag follows `data`.
    pub fn write(
        &mut self,
        zone: u8,
        address: u16,
        data: WriteData,
        mac: Option<&Digest>,
    ) -> Result<()> {
        let zone = match data {
            WriteData::Word(_) => zone & !ZONE_COUNT_FLAG,
            WriteData::Block(_) => zone | ZONE_COUNT_FLAG,
        };
        self.execute_status(Command::Write {
            zone,
            address,
            data,
            mac: mac.copied(),
        })
    }

    /// Public key for the public/private modes; empty in digest mode.
    pub fn gen_key(
        &mut self,
        mode: u8,
        key_id: u16,
        other_data: Option<[u8; GENKEY_OTHER_DATA_SIZE]>,
    ) -> Result<Vec<u8>> {
        self.execute(&Command::GenKey {
            mode,
            key_id,
            other_data,
        })?
        .into_key()
    }

    /// ECC108 signature over TempKey.
    pub fn sign(&mut self, mode: u8, key_id: u16) -> Result<Vec<u8>> {
        self.execute(&Command::Sign { mode, key_id })?.into_key()
    }

    /// ECC108 signature check against a stored or supplied key.
    pub fn verify(
        &mut self,
        mode: u8,
        key_id: u16,
        signature: &[u8; VERIFY_SIGNATURE_SIZE],
        public_key: Option<&[u8; VERIFY_PUBLIC_KEY_SIZE]>,
    ) -> Result<()> {
        self.execute_status(Command::Verify {
            mode,
            key_id,
            signature: *signature,
            public_key: public_key.copied(),
        })
    }

    /// Write an encrypted private key to a slot.
    pub fn priv_write(
        &mut self,
        mode: u8,
        key_id: u16,
        value: &[u8; PRIVWRITE_VALUE_SIZE],
        mac: &Digest,
    ) -> Result<()> {
        self.execute_status(Command::PrivWrite {
            mode,
            key_id,
            value: *value,
            mac: *mac,
        })
    }
}
