//! Command protocol engine of the USB to I2C adapter.
//!
//! A host talks to the adapter over a byte stream: a one byte selector
//! followed by a fixed layout payload. The [`Dispatcher`] collects the bytes
//! across any number of non-blocking polls, runs the selected command against
//! the I2C bus or the auxiliary pins and writes exactly one response frame.
//!
//! Hardware is reached only through the traits in [`ports`], so the whole
//! engine runs on the host in tests.
#![cfg_attr(not(test), no_std)]

mod buffer;
pub use buffer::CommandBuffer;

mod command;
pub use command::{Command, CommandSet};

mod config;
pub use config::BridgeConfig;

mod dispatcher;
pub use dispatcher::{Dispatcher, Stats};

mod handler;

mod indicator;
pub use indicator::{IndicatorState, StatusIndicator};

pub mod ports;
pub use ports::{AuxPins, BusFault, BusReset, ByteStream, I2cBus, I2cFault, PinMode};

pub mod protocol;

mod status;
pub use status::{HeaderError, PinModeStatus, ReadStatus, WriteStatus};
