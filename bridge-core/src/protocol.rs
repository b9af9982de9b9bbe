//! Wire format constants.
//!
//! All multi byte fields are big endian.

use byteorder::{BigEndian, ByteOrder};
use static_assertions::const_assert;

use crate::HeaderError;

/// First byte of every successful WRITE/READ/pin response and of INFO.
pub const OK_MARKER: u8 = b'K';

/// First byte of an error response, followed by one status code byte.
pub const ERROR_MARKER: u8 = b'E';

/// Identifies the adapter in the INFO response.
pub const INFO_MAGIC: [u8; 2] = [0x45, 0x67];

/// Number of INFO bytes after the length byte: api version + firmware version.
pub const INFO_PAYLOAD_LEN: u8 = 3;

/// `K`, magic, length, api, firmware version MSB, firmware version LSB.
pub const INFO_FRAME_LEN: usize = 1 + INFO_MAGIC.len() + 1 + INFO_PAYLOAD_LEN as usize;

pub const API_VERSION: u8 = 1;
pub const FIRMWARE_VERSION: u16 = 1;

/// Largest data block of a single WRITE or READ.
pub const MAX_PAYLOAD: usize = 256;

/// Highest 7 bit I2C device address.
pub const ADDRESS_MAX: u8 = 0x7F;

pub const AUX_PIN_COUNT: u8 = 8;

/// All command bytes must arrive within this time after the selector.
pub const COMMAND_TIMEOUT_MS: u64 = 250;

/// Capacity of the command buffer: largest payload plus the transfer header.
pub const BUFFER_CAPACITY: usize = MAX_PAYLOAD + TransferHeader::LEN;

/// `K`, 2 byte count, data.
pub const READ_FRAME_MAX: usize = 3 + MAX_PAYLOAD;

const_assert!(BUFFER_CAPACITY >= MAX_PAYLOAD + TransferHeader::LEN);
const_assert!(MAX_PAYLOAD <= u16::MAX as usize);

/// Address and byte count that open WRITE and READ requests.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TransferHeader {
    pub address: u8,
    pub count: u16,
}

impl TransferHeader {
    pub const LEN: usize = 3;

    /// `raw` must hold at least [`TransferHeader::LEN`] bytes.
    pub fn parse(raw: &[u8]) -> Self {
        Self {
            address: raw[0],
            count: BigEndian::read_u16(&raw[1..3]),
        }
    }

    /// Structural check done before the bus is touched. The address is
    /// checked first, so a request with both fields out of range reports the
    /// address.
    pub fn validate(&self) -> Result<(), HeaderError> {
        if self.address > ADDRESS_MAX {
            Err(HeaderError::AddressOutOfRange)
        } else if self.count as usize > MAX_PAYLOAD {
            Err(HeaderError::CountOutOfRange)
        } else {
            Ok(())
        }
    }
}

/// Builds the INFO response.
pub fn info_frame(api_version: u8, firmware_version: u16) -> [u8; INFO_FRAME_LEN] {
    let mut frame = [0u8; INFO_FRAME_LEN];
    frame[0] = OK_MARKER;
    frame[1..3].copy_from_slice(&INFO_MAGIC);
    frame[3] = INFO_PAYLOAD_LEN;
    frame[4] = api_version;
    BigEndian::write_u16(&mut frame[5..7], firmware_version);
    frame
}
