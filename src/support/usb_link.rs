use bridge_core::ByteStream;
use heapless::Deque;
use usb_device::{bus::UsbBus, UsbError};
use usbd_serial::SerialPort;

#[derive(defmt::Format, Debug, Clone, Copy, PartialEq, Eq)]
pub enum LinkError {
    /// Response does not fit in the transmit queue
    TxOverflow,
}

/// Byte queues between the CDC port and the command engine.
///
/// The engine only ever touches the queues, the USB side is shuffled by
/// [`UsbLink::pull_from`]/[`UsbLink::push_to`] under the serial port lock.
pub struct UsbLink<const RX: usize, const TX: usize> {
    rx: Deque<u8, RX>,
    tx: Deque<u8, TX>,
}

impl<const RX: usize, const TX: usize> UsbLink<RX, TX> {
    pub const fn new() -> Self {
        Self {
            rx: Deque::new(),
            tx: Deque::new(),
        }
    }

    /// Moves as many received bytes as the rx queue can take.
    pub fn pull_from<B: UsbBus>(&mut self, serial: &mut SerialPort<'_, B>) {
        let mut chunk = [0u8; 64];

        loop {
            let free = (RX - self.rx.len()).min(chunk.len());
            if free == 0 {
                return;
            }

            match serial.read(&mut chunk[..free]) {
                Ok(0) | Err(UsbError::WouldBlock) => return,
                Ok(count) => {
                    for b in &chunk[..count] {
                        // capacity checked above
                        let _ = self.rx.push_back(*b);
                    }
                }
                Err(e) => {
                    defmt::error!("USB read: {}", e);
                    return;
                }
            }
        }
    }

    /// Hands queued response bytes to the serial port until it stops accepting.
    pub fn push_to<B: UsbBus>(&mut self, serial: &mut SerialPort<'_, B>) {
        while !self.tx.is_empty() {
            let (front, _) = self.tx.as_slices();

            match serial.write(front) {
                Ok(0) | Err(UsbError::WouldBlock) => return,
                Ok(count) => {
                    for _ in 0..count {
                        self.tx.pop_front();
                    }
                }
                Err(e) => {
                    defmt::error!("USB write: {}", e);
                    return;
                }
            }
        }
    }

    pub fn pending_tx(&self) -> usize {
        self.tx.len()
    }
}

impl<const RX: usize, const TX: usize> Default for UsbLink<RX, TX> {
    fn default() -> Self {
        Self::new()
    }
}

impl<const RX: usize, const TX: usize> ByteStream for UsbLink<RX, TX> {
    type Error = LinkError;

    fn read(&mut self, buf: &mut [u8]) -> nb::Result<usize, Self::Error> {
        if self.rx.is_empty() {
            return Err(nb::Error::WouldBlock);
        }

        let mut count = 0;
        for slot in buf.iter_mut() {
            match self.rx.pop_front() {
                Some(b) => {
                    *slot = b;
                    count += 1;
                }
                None => break,
            }
        }
        Ok(count)
    }

    fn can_write(&self, len: usize) -> bool {
        TX - self.tx.len() >= len
    }

    fn write_all(&mut self, bytes: &[u8]) -> Result<(), Self::Error> {
        if !self.can_write(bytes.len()) {
            return Err(LinkError::TxOverflow);
        }

        for b in bytes {
            let _ = self.tx.push_back(*b);
        }
        Ok(())
    }
}
