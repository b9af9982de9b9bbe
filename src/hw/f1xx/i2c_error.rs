use bridge_core::{BusFault, I2cFault};
use defmt::Format;
use stm32f1xx_hal::i2c::Error;

/// I2C peripheral error, detached from the HAL type so the engine traits can
/// be implemented for it.
#[derive(Format, Debug, Clone, Copy, PartialEq, Eq)]
pub enum HwError {
    /// Bus error
    Bus,
    /// Arbitration loss
    Arbitration,
    /// No ack received
    Acknowledge,
    /// Overrun/underrun
    Overrun,
    /// Timeout
    Timeout,
    /// unknown error
    Unknown,
}

impl From<Error> for HwError {
    fn from(e: Error) -> Self {
        #[allow(unreachable_patterns)]
        match e {
            Error::Bus => HwError::Bus,
            Error::Arbitration => HwError::Arbitration,
            Error::Acknowledge => HwError::Acknowledge,
            Error::Overrun => HwError::Overrun,
            Error::Timeout => HwError::Timeout,
            _ => HwError::Unknown,
        }
    }
}

impl I2cFault for HwError {
    fn fault(&self) -> BusFault {
        match self {
            // the F1 peripheral raises AF for the address and the data phase
            // alike, the address phase is by far the common case
            HwError::Acknowledge => BusFault::AddressNack,
            HwError::Timeout => BusFault::Timeout,
            HwError::Overrun => BusFault::Overrun,
            HwError::Bus | HwError::Arbitration | HwError::Unknown => BusFault::Other,
        }
    }
}
