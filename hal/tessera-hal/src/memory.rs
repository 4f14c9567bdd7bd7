//! In-memory byte stream
//!
//! A fixed-capacity FIFO that implements [`ByteStream`] without any
//! hardware behind it. Reads never block: asking for more bytes than are
//! buffered is reported as [`MemoryError::Underrun`] and consumes nothing.
//! Used for host-side tests and for feeding recorded reader traffic.

use heapless::Deque;

use crate::stream::ByteStream;

/// Errors from the in-memory stream
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum MemoryError {
    /// Fewer bytes buffered than requested
    Underrun {
        /// Bytes requested
        requested: usize,
        /// Bytes buffered at the time of the request
        buffered: usize,
    },
    /// Not enough free space to push the bytes
    Full,
}

/// In-memory FIFO byte stream with capacity `N`
#[derive(Debug, Clone)]
pub struct MemoryStream<const N: usize> {
    buffer: Deque<u8, N>,
}

impl<const N: usize> Default for MemoryStream<N> {
    fn default() -> Self {
        Self::new()
    }
}

impl<const N: usize> MemoryStream<N> {
    /// Create an empty stream
    pub const fn new() -> Self {
        Self {
            buffer: Deque::new(),
        }
    }

    /// Create a stream pre-filled with `bytes`
    pub fn from_slice(bytes: &[u8]) -> Result<Self, MemoryError> {
        let mut stream = Self::new();
        stream.extend_from_slice(bytes)?;
        Ok(stream)
    }

    /// Append one byte, as if it had just arrived on the wire
    pub fn push(&mut self, byte: u8) -> Result<(), MemoryError> {
        self.buffer.push_back(byte).map_err(|_| MemoryError::Full)
    }

    /// Append a run of bytes
    ///
    /// Either all bytes are appended or none are.
    pub fn extend_from_slice(&mut self, bytes: &[u8]) -> Result<(), MemoryError> {
        if bytes.len() > self.free() {
            return Err(MemoryError::Full);
        }
        for &byte in bytes {
            self.push(byte)?;
        }
        Ok(())
    }

    /// Number of bytes that can still be pushed
    pub fn free(&self) -> usize {
        N - self.buffer.len()
    }

    /// Number of buffered bytes
    pub fn len(&self) -> usize {
        self.buffer.len()
    }

    /// Check if nothing is buffered
    pub fn is_empty(&self) -> bool {
        self.buffer.is_empty()
    }
}

impl<const N: usize> ByteStream for MemoryStream<N> {
    type Error = MemoryError;

    fn peek(&mut self) -> Option<u8> {
        self.buffer.front().copied()
    }

    fn available(&mut self) -> usize {
        self.buffer.len()
    }

    fn read_exact(&mut self, buf: &mut [u8]) -> Result<(), MemoryError> {
        if buf.len() > self.buffer.len() {
            return Err(MemoryError::Underrun {
                requested: buf.len(),
                buffered: self.buffer.len(),
            });
        }
        for slot in buf.iter_mut() {
            // Length checked above
            *slot = self.buffer.pop_front().unwrap_or_default();
        }
        Ok(())
    }

    fn clear(&mut self) -> Result<usize, MemoryError> {
        let count = self.buffer.len();
        self.buffer.clear();
        Ok(count)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fifo_order() {
        let mut stream = MemoryStream::<8>::from_slice(&[1, 2, 3]).unwrap();
        let mut buf = [0u8; 2];
        stream.read_exact(&mut buf).unwrap();
        assert_eq!(buf, [1, 2]);
        assert_eq!(stream.peek(), Some(3));
    }

    #[test]
    fn test_peek_does_not_consume() {
        let mut stream = MemoryStream::<4>::from_slice(&[0x02]).unwrap();
        assert_eq!(stream.peek(), Some(0x02));
        assert_eq!(stream.peek(), Some(0x02));
        assert_eq!(stream.available(), 1);
    }

    #[test]
    fn test_peeked_byte_is_readable() {
        let mut stream = MemoryStream::<4>::from_slice(&[0x41]).unwrap();
        assert_eq!(stream.peek(), Some(0x41));
        assert_eq!(stream.read_byte(), Ok(0x41));
        assert_eq!(stream.peek(), None);
    }

    #[test]
    fn test_peek_empty() {
        let mut stream = MemoryStream::<4>::new();
        assert_eq!(stream.peek(), None);
        assert_eq!(stream.available(), 0);
    }

    #[test]
    fn test_underrun_consumes_nothing() {
        let mut stream = MemoryStream::<8>::from_slice(&[1, 2, 3]).unwrap();
        let mut buf = [0u8; 5];
        assert_eq!(
            stream.read_exact(&mut buf),
            Err(MemoryError::Underrun {
                requested: 5,
                buffered: 3
            })
        );
        assert_eq!(stream.available(), 3);
    }

    #[test]
    fn test_extend_is_all_or_nothing() {
        let mut stream = MemoryStream::<4>::from_slice(&[1, 2]).unwrap();
        assert_eq!(stream.extend_from_slice(&[3, 4, 5]), Err(MemoryError::Full));
        assert_eq!(stream.len(), 2);
        assert_eq!(stream.free(), 2);
    }

    #[test]
    fn test_clear() {
        let mut stream = MemoryStream::<16>::from_slice(b"\x02junk").unwrap();
        assert_eq!(stream.clear(), Ok(5));
        assert!(stream.is_empty());
    }

    #[test]
    fn test_discard_uses_default_chunking() {
        let mut stream = MemoryStream::<64>::from_slice(&[0u8; 40]).unwrap();
        stream.discard(33).unwrap();
        assert_eq!(stream.len(), 7);
    }
}
