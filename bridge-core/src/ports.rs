//! Collaborators of the engine. The board support code implements these on
//! top of the real peripherals.

use embedded_hal::blocking::i2c::{Read, Write};

/// Host link: the byte source commands come from and the sink responses go
/// to.
pub trait ByteStream {
    type Error;

    /// Reads up to `buf.len()` bytes that have already arrived.
    /// `WouldBlock` when nothing is pending. Never waits.
    fn read(&mut self, buf: &mut [u8]) -> nb::Result<usize, Self::Error>;

    /// True when a frame of `len` bytes would be accepted right now.
    /// Checked before any hardware access.
    fn can_write(&self, len: usize) -> bool;

    /// Queues a complete response frame. Either all of `bytes` are accepted
    /// or none of them.
    fn write_all(&mut self, bytes: &[u8]) -> Result<(), Self::Error>;
}

/// What went wrong on the bus, as far as the host needs to know.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BusFault {
    DataTooLong,
    AddressNack,
    DataNack,
    Timeout,
    Overrun,
    Other,
}

/// Implemented by the error type of the I2C port.
pub trait I2cFault {
    fn fault(&self) -> BusFault;
}

impl I2cFault for core::convert::Infallible {
    fn fault(&self) -> BusFault {
        match *self {}
    }
}

/// Re-initialization of a stuck bus peripheral.
pub trait BusReset {
    fn reset(&mut self);
}

/// The I2C port as seen by the command handlers. Implemented for every
/// blocking embedded-hal bus that can also be reset.
pub trait I2cBus {
    type Error: I2cFault;

    fn write(&mut self, address: u8, bytes: &[u8]) -> Result<(), Self::Error>;
    fn read(&mut self, address: u8, buffer: &mut [u8]) -> Result<(), Self::Error>;
    fn reset_bus(&mut self);
}

impl<I2C, E> I2cBus for I2C
where
    I2C: Read<Error = E> + Write<Error = E> + BusReset,
    E: I2cFault,
{
    type Error = E;

    fn write(&mut self, address: u8, bytes: &[u8]) -> Result<(), E> {
        Write::write(self, address, bytes)
    }

    fn read(&mut self, address: u8, buffer: &mut [u8]) -> Result<(), E> {
        Read::read(self, address, buffer)
    }

    fn reset_bus(&mut self) {
        BusReset::reset(self)
    }
}

/// Auxiliary pin modes. The numbers are part of the wire protocol.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u8)]
pub enum PinMode {
    InputPullDown = 1,
    InputPullUp = 2,
    Output = 3,
}

impl TryFrom<u8> for PinMode {
    type Error = u8;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        match value {
            1 => Ok(PinMode::InputPullDown),
            2 => Ok(PinMode::InputPullUp),
            3 => Ok(PinMode::Output),
            v => Err(v),
        }
    }
}

/// Eight general purpose pins next to the bus. Index and mode are validated
/// by the caller.
pub trait AuxPins {
    fn set_mode(&mut self, index: u8, mode: PinMode);

    /// Bit `i` is the level of pin `i`.
    fn read_all(&mut self) -> u8;

    /// Drives pins whose `mask` bit is set to the matching bit of `values`.
    fn write_masked(&mut self, values: u8, mask: u8);
}
