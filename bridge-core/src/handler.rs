use byteorder::{BigEndian, ByteOrder};
use log::{debug, trace, warn};

use crate::protocol::{
    TransferHeader, AUX_PIN_COUNT, ERROR_MARKER, OK_MARKER, READ_FRAME_MAX,
};
use crate::{
    AuxPins, ByteStream, Command, CommandBuffer, I2cBus, I2cFault, PinMode, PinModeStatus,
    ReadStatus, WriteStatus,
};

/// Everything a handler may touch while it runs.
pub(crate) struct Io<'a, L, B, P, const SIZE: usize> {
    pub buf: &'a mut CommandBuffer<SIZE>,
    pub link: &'a mut L,
    pub bus: &'a mut B,
    pub pins: &'a mut P,
    pub info: &'a [u8],
}

/// Running command with its per-invocation state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Handler {
    Echo,
    Info,
    /// The header is kept once parsed, the buffer then collects the data.
    Write { header: Option<TransferHeader> },
    Read,
    Reset,
    SetPinMode,
    ReadPins,
    WritePins,
}

impl Handler {
    /// Called once when the selector is accepted.
    pub fn enter(command: Command) -> Self {
        match command {
            Command::Echo => Handler::Echo,
            Command::Info => Handler::Info,
            Command::Write => Handler::Write { header: None },
            Command::Read => Handler::Read,
            Command::Reset => Handler::Reset,
            Command::SetPinMode => Handler::SetPinMode,
            Command::ReadPins => Handler::ReadPins,
            Command::WritePins => Handler::WritePins,
        }
    }

    pub fn command(&self) -> Command {
        match self {
            Handler::Echo => Command::Echo,
            Handler::Info => Command::Info,
            Handler::Write { .. } => Command::Write,
            Handler::Read => Command::Read,
            Handler::Reset => Command::Reset,
            Handler::SetPinMode => Command::SetPinMode,
            Handler::ReadPins => Command::ReadPins,
            Handler::WritePins => Command::WritePins,
        }
    }

    /// Called on timeout. Nothing is sent, the host sees silence.
    pub fn abort(&mut self) {
        if let Handler::Write { header } = self {
            *header = None;
        }
    }

    /// Advances the command with whatever bytes are available.
    ///
    /// `WouldBlock` until every payload byte is there and the link has room
    /// for the longest reply; no hardware access and no output happen before
    /// that. `Ok` once the single response frame has
    /// been written.
    pub fn poll<L, B, P, const SIZE: usize>(
        &mut self,
        io: &mut Io<'_, L, B, P, SIZE>,
    ) -> nb::Result<(), L::Error>
    where
        L: ByteStream,
        B: I2cBus,
        P: AuxPins,
    {
        match self {
            Handler::Echo => {
                let value = io.buf.try_fill(io.link, 1)?[0];
                reserve(io.link, 1)?;
                io.link.write_all(&[value])?;
            }
            Handler::Info => {
                reserve(io.link, io.info.len())?;
                io.link.write_all(io.info)?;
            }
            Handler::Write { header } => {
                let hdr = match *header {
                    Some(hdr) => hdr,
                    None => {
                        let hdr =
                            TransferHeader::parse(io.buf.try_fill(io.link, TransferHeader::LEN)?);
                        io.buf.reset();
                        *header = Some(hdr);
                        hdr
                    }
                };

                // `K` or `E code`
                reserve(io.link, 2)?;

                if let Err(e) = hdr.validate() {
                    debug!("WRITE 0x{:X} x {} rejected: {:?}", hdr.address, hdr.count, e);
                    return reply_error(io.link, WriteStatus::from(e));
                }

                let data = io.buf.try_fill(io.link, hdr.count as usize)?;
                match io.bus.write(hdr.address, data) {
                    Ok(()) => {
                        trace!("WRITE {} bytes to 0x{:X}", hdr.count, hdr.address);
                        io.link.write_all(&[OK_MARKER])?;
                    }
                    Err(e) => {
                        let status = WriteStatus::from(e.fault());
                        warn!("WRITE to 0x{:X} failed: {:?}", hdr.address, status);
                        return reply_error(io.link, status);
                    }
                }
            }
            Handler::Read => {
                let hdr = TransferHeader::parse(io.buf.try_fill(io.link, TransferHeader::LEN)?);
                if let Err(e) = hdr.validate() {
                    reserve(io.link, 2)?;
                    debug!("READ 0x{:X} x {} rejected: {:?}", hdr.address, hdr.count, e);
                    return reply_error(io.link, ReadStatus::from(e));
                }

                let count = hdr.count as usize;
                reserve(io.link, 3 + count)?;

                let mut frame = [0u8; READ_FRAME_MAX];
                frame[0] = OK_MARKER;
                BigEndian::write_u16(&mut frame[1..3], hdr.count);

                // a zero length read has nothing to fetch
                if count > 0 {
                    if let Err(e) = io.bus.read(hdr.address, &mut frame[3..3 + count]) {
                        let status = ReadStatus::from(e.fault());
                        warn!("READ from 0x{:X} failed: {:?}", hdr.address, status);
                        return reply_error(io.link, status);
                    }
                }

                trace!("READ {} bytes from 0x{:X}", count, hdr.address);
                io.link.write_all(&frame[..3 + count])?;
            }
            Handler::Reset => {
                reserve(io.link, 1)?;
                debug!("I2C reset");
                io.bus.reset_bus();
                io.link.write_all(&[OK_MARKER])?;
            }
            Handler::SetPinMode => {
                let raw = io.buf.try_fill(io.link, 2)?;
                let (index, mode) = (raw[0], raw[1]);
                reserve(io.link, 2)?;

                if index >= AUX_PIN_COUNT {
                    return reply_error(io.link, PinModeStatus::IndexOutOfRange);
                }
                match PinMode::try_from(mode) {
                    Ok(mode) => {
                        trace!("Aux pin {} -> {:?}", index, mode);
                        io.pins.set_mode(index, mode);
                        io.link.write_all(&[OK_MARKER])?;
                    }
                    Err(_) => return reply_error(io.link, PinModeStatus::ModeOutOfRange),
                }
            }
            Handler::ReadPins => {
                reserve(io.link, 2)?;
                let levels = io.pins.read_all();
                io.link.write_all(&[OK_MARKER, levels])?;
            }
            Handler::WritePins => {
                let raw = io.buf.try_fill(io.link, 2)?;
                let (values, mask) = (raw[0], raw[1]);
                reserve(io.link, 1)?;
                io.pins.write_masked(values, mask);
                io.link.write_all(&[OK_MARKER])?;
            }
        }

        Ok(())
    }
}

/// Waits for room for a `len` byte reply.
fn reserve<L: ByteStream>(link: &L, len: usize) -> nb::Result<(), L::Error> {
    if link.can_write(len) {
        Ok(())
    } else {
        Err(nb::Error::WouldBlock)
    }
}

fn reply_error<L: ByteStream>(link: &mut L, code: impl Into<u8>) -> nb::Result<(), L::Error> {
    link.write_all(&[ERROR_MARKER, code.into()])?;
    Ok(())
}
