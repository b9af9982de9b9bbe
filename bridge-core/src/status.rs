use crate::BusFault;

/// Structural problem of a WRITE/READ header.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HeaderError {
    AddressOutOfRange,
    CountOutOfRange,
}

/// Error codes of the WRITE response. The numbers are part of the wire
/// protocol.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u8)]
pub enum WriteStatus {
    /// Data too long to fit the transmit buffer
    DataTooLong = 1,
    /// NACK on transmit of the address
    AddressNack = 2,
    /// NACK on transmit of data
    DataNack = 3,
    /// Other error
    Other = 4,
    /// Bus timeout
    Timeout = 5,
    AddressOutOfRange = 8,
    CountOutOfRange = 9,
}

/// Error codes of the READ response.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u8)]
pub enum ReadStatus {
    /// The device delivered fewer bytes than requested
    CountMismatch = 1,
    /// Bytes were lost before they could be taken from the bus
    Unavailable = 2,
    AddressOutOfRange = 8,
    CountOutOfRange = 9,
}

/// Error codes of the SET-PIN-MODE response.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u8)]
pub enum PinModeStatus {
    IndexOutOfRange = 1,
    ModeOutOfRange = 2,
}

impl From<WriteStatus> for u8 {
    fn from(status: WriteStatus) -> u8 {
        status as u8
    }
}

impl From<ReadStatus> for u8 {
    fn from(status: ReadStatus) -> u8 {
        status as u8
    }
}

impl From<PinModeStatus> for u8 {
    fn from(status: PinModeStatus) -> u8 {
        status as u8
    }
}

impl From<HeaderError> for WriteStatus {
    fn from(e: HeaderError) -> Self {
        match e {
            HeaderError::AddressOutOfRange => WriteStatus::AddressOutOfRange,
            HeaderError::CountOutOfRange => WriteStatus::CountOutOfRange,
        }
    }
}

impl From<HeaderError> for ReadStatus {
    fn from(e: HeaderError) -> Self {
        match e {
            HeaderError::AddressOutOfRange => ReadStatus::AddressOutOfRange,
            HeaderError::CountOutOfRange => ReadStatus::CountOutOfRange,
        }
    }
}

impl From<BusFault> for WriteStatus {
    fn from(fault: BusFault) -> Self {
        match fault {
            BusFault::DataTooLong => WriteStatus::DataTooLong,
            BusFault::AddressNack => WriteStatus::AddressNack,
            BusFault::DataNack => WriteStatus::DataNack,
            BusFault::Timeout => WriteStatus::Timeout,
            BusFault::Overrun | BusFault::Other => WriteStatus::Other,
        }
    }
}

impl From<BusFault> for ReadStatus {
    fn from(fault: BusFault) -> Self {
        match fault {
            BusFault::Overrun => ReadStatus::Unavailable,
            _ => ReadStatus::CountMismatch,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn wire_codes_are_stable() {
        assert_eq!(u8::from(WriteStatus::DataTooLong), 1);
        assert_eq!(u8::from(WriteStatus::Timeout), 5);
        assert_eq!(u8::from(WriteStatus::AddressOutOfRange), 8);
        assert_eq!(u8::from(WriteStatus::CountOutOfRange), 9);
        assert_eq!(u8::from(ReadStatus::CountMismatch), 1);
        assert_eq!(u8::from(ReadStatus::Unavailable), 2);
        assert_eq!(u8::from(ReadStatus::CountOutOfRange), 9);
        assert_eq!(u8::from(PinModeStatus::IndexOutOfRange), 1);
        assert_eq!(u8::from(PinModeStatus::ModeOutOfRange), 2);
    }

    #[test]
    fn bus_faults_map_per_command() {
        assert_eq!(WriteStatus::from(BusFault::AddressNack), WriteStatus::AddressNack);
        assert_eq!(WriteStatus::from(BusFault::DataNack), WriteStatus::DataNack);
        assert_eq!(WriteStatus::from(BusFault::Overrun), WriteStatus::Other);
        assert_eq!(ReadStatus::from(BusFault::AddressNack), ReadStatus::CountMismatch);
        assert_eq!(ReadStatus::from(BusFault::Timeout), ReadStatus::CountMismatch);
        assert_eq!(ReadStatus::from(BusFault::Overrun), ReadStatus::Unavailable);
    }
}
