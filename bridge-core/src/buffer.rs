use crate::ByteStream;

/// Collects command bytes across polls.
///
/// `cursor` counts bytes gathered toward the current target since the last
/// [`CommandBuffer::reset`]. It never passes the target, so bytes of the next
/// command stay in the stream.
pub struct CommandBuffer<const SIZE: usize> {
    buffer: [u8; SIZE],
    cursor: usize,
}

impl<const SIZE: usize> Default for CommandBuffer<SIZE> {
    fn default() -> Self {
        Self {
            buffer: [0; SIZE],
            cursor: 0,
        }
    }
}

impl<const SIZE: usize> CommandBuffer<SIZE> {
    pub fn reset(&mut self) {
        self.cursor = 0;
    }

    pub fn len(&self) -> usize {
        self.cursor
    }

    pub fn is_empty(&self) -> bool {
        self.cursor == 0
    }

    /// Pulls whatever is available from `link`, up to `n` bytes in total.
    ///
    /// Returns the `n` collected bytes once complete, `WouldBlock` while
    /// partial progress is kept for the next poll.
    pub fn try_fill<L: ByteStream>(
        &mut self,
        link: &mut L,
        n: usize,
    ) -> nb::Result<&[u8], L::Error> {
        debug_assert!(n <= SIZE);
        debug_assert!(self.cursor <= n);

        // a target the buffer cannot hold never completes, the session
        // deadline then drops the command
        if n > SIZE {
            return Err(nb::Error::WouldBlock);
        }

        if self.cursor < n {
            match link.read(&mut self.buffer[self.cursor..n]) {
                Ok(count) => self.cursor = (self.cursor + count).min(n),
                Err(nb::Error::WouldBlock) => {}
                Err(e) => return Err(e),
            }
        }

        if self.cursor == n {
            Ok(&self.buffer[..n])
        } else {
            Err(nb::Error::WouldBlock)
        }
    }
}
