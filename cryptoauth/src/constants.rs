// cryptoauth-rs/cryptoauth/src/constants.rs
//! Common protocol constants used across the crate

/// Packet field positions
pub const COUNT_IDX: usize = 0;
/// Opcode byte
pub const OPCODE_IDX: usize = 1;
/// Param1 byte
pub const PARAM1_IDX: usize = 2;
/// Param2, little-endian word
pub const PARAM2_IDX: usize = 3;
/// First data byte
pub const DATA_IDX: usize = 5;

/// Response field positions
pub const RSP_COUNT_IDX: usize = 0;
/// Status byte of a status-only response
pub const RSP_STATUS_IDX: usize = 1;
/// First data byte of a data response
pub const RSP_DATA_IDX: usize = 1;

/// CRC-16 trailer length
pub const CRC_SIZE: usize = 2;

/// count + opcode + param1 + param2(2) + crc(2)
pub const CMD_SIZE_MIN: usize = 7;

/// Largest command packet: Verify with an external public key.
pub const CMD_SIZE_MAX: usize = 135;

/// Largest SHA204 command packet (CheckMac).
pub const SHA204_CMD_SIZE_MAX: usize = 84;

/// Status-only response: count + status + crc(2)
pub const RSP_SIZE_MIN: usize = 4;

/// Response carrying four data bytes
pub const RSP_SIZE_VAL: usize = 7;

/// Response carrying 32 data bytes
pub const RSP_SIZE_32: usize = 35;

/// Largest response: GenKey / Sign
pub const RSP_SIZE_MAX: usize = 75;

/// Device status bytes
pub const STATUS_BYTE_SUCCESS: u8 = 0x00;
/// CheckMac miscompare
pub const STATUS_BYTE_CHECKMAC: u8 = 0x01;
/// Parse error
pub const STATUS_BYTE_PARSE: u8 = 0x03;
/// ECC fault (ECC108)
pub const STATUS_BYTE_ECC_FAULT: u8 = 0x05;
/// Self-test error (ECC108)
pub const STATUS_BYTE_SELF_TEST: u8 = 0x07;
/// Execution error
pub const STATUS_BYTE_EXEC: u8 = 0x0F;
/// After wake, before the first command
pub const STATUS_BYTE_WAKEUP: u8 = 0x11;
/// Command received with a bad CRC
pub const STATUS_BYTE_COMM: u8 = 0xFF;

/// The packet a device answers a wake token with.
pub const WAKE_RESPONSE: [u8; 4] = [0x04, STATUS_BYTE_WAKEUP, 0x33, 0x43];

/// SWI flag bytes
pub const SWI_FLAG_CMD: u8 = 0x77;
/// Ask the device to transmit its response
pub const SWI_FLAG_TX: u8 = 0x88;
/// Enter idle
pub const SWI_FLAG_IDLE: u8 = 0xBB;
/// Enter sleep
pub const SWI_FLAG_SLEEP: u8 = 0xCC;

/// I2C word address values
pub const I2C_WORD_RESET: u8 = 0x00;
/// Enter sleep
pub const I2C_WORD_SLEEP: u8 = 0x01;
/// Enter idle
pub const I2C_WORD_IDLE: u8 = 0x02;
/// Command follows
pub const I2C_WORD_NORMAL: u8 = 0x03;

/// Factory I2C address, 8-bit write form
pub const I2C_DEFAULT_ADDRESS: u8 = 0xC8;

/// Fixed serial number bytes every device shares
pub const SN_8: u8 = 0xEE;
/// Serial number byte 0
pub const SN_0: u8 = 0x01;
/// Serial number byte 1
pub const SN_1: u8 = 0x23;

/// Zone encodings
pub const ZONE_CONFIG: u8 = 0x00;
/// OTP zone
pub const ZONE_OTP: u8 = 0x01;
/// Data zone
pub const ZONE_DATA: u8 = 0x02;
/// Bits of param1 that select the zone
pub const ZONE_MASK: u8 = 0x03;
/// Param1 bit for a 32-byte access
pub const ZONE_COUNT_FLAG: u8 = 0x80;
/// Short access length
pub const ZONE_ACCESS_4: usize = 4;
/// Long access length
pub const ZONE_ACCESS_32: usize = 32;

/// Highest word address per zone
pub const ADDRESS_MASK_CONFIG: u16 = 0x001F;
/// OTP zone
pub const ADDRESS_MASK_OTP: u16 = 0x000F;
/// Data zone
pub const ADDRESS_MASK: u16 = 0x007F;

/// Highest key slot
pub const KEY_ID_MAX: u16 = 15;
/// Highest OTP block
pub const OTP_BLOCK_MAX: u16 = 1;

/// Timing (SHA204/ECC108 datasheet values)
pub const WAKEUP_PULSE_WIDTH_US: u32 = 60;
/// Wake token to first command
pub const WAKEUP_DELAY_MS: u32 = 3;
/// Device drops a partial packet after this long
pub const SYNC_TIMEOUT_MS: u32 = 85;
/// Longest SHA204 execution time
pub const COMMAND_EXEC_MAX_MS: u32 = 69;
/// Default extra attempts per comm loop
pub const RETRY_COUNT: u8 = 1;
