//! Byte stream abstraction
//!
//! A `ByteStream` is the receive side of a serial link as the packet reader
//! sees it: a FIFO of bytes that can be inspected without consuming, with a
//! known fill level, and a blocking read for an exact byte count.

/// Chunk size used when discarding bytes
const DISCARD_CHUNK: usize = 16;

/// FIFO byte source
///
/// Implementations own the receive buffer; consumers borrow the stream and
/// never retain bytes themselves.
pub trait ByteStream {
    /// Error type for read operations
    type Error;

    /// Return the next unread byte without consuming it
    ///
    /// Returns `None` when nothing is buffered. Never blocks.
    ///
    /// A byte returned here is buffered: reading it right after the peek
    /// must succeed without blocking.
    fn peek(&mut self) -> Option<u8>;

    /// Number of bytes buffered and not yet read
    ///
    /// Never blocks.
    fn available(&mut self) -> usize;

    /// Read exactly `buf.len()` bytes
    ///
    /// Blocks until the buffer is filled. Implementations that cannot block
    /// return an error when the bytes are not there.
    fn read_exact(&mut self, buf: &mut [u8]) -> Result<(), Self::Error>;

    /// Read a single byte
    fn read_byte(&mut self) -> Result<u8, Self::Error> {
        let mut buf = [0u8; 1];
        self.read_exact(&mut buf)?;
        Ok(buf[0])
    }

    /// Consume and drop `count` bytes
    fn discard(&mut self, count: usize) -> Result<(), Self::Error> {
        let mut scratch = [0u8; DISCARD_CHUNK];
        let mut remaining = count;
        while remaining > 0 {
            let n = remaining.min(DISCARD_CHUNK);
            self.read_exact(&mut scratch[..n])?;
            remaining -= n;
        }
        Ok(())
    }

    /// Drop every buffered byte
    ///
    /// Returns the number of bytes dropped.
    fn clear(&mut self) -> Result<usize, Self::Error> {
        let count = self.available();
        self.discard(count)?;
        Ok(count)
    }
}
