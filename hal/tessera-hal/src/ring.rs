//! Ring-buffered stream over an `embedded-io` receiver
//!
//! Most UART drivers can report whether bytes are ready but cannot peek at
//! the next byte or say how many are waiting. `RingStream` pulls ready
//! bytes into a fixed ring so that the packet reader can inspect the head
//! of the stream and the fill level before committing to a read.
//!
//! Bytes only enter the ring when [`RingStream::poll`] is called, which is
//! expected once per control loop iteration, before the reader is polled.

use embedded_io::{Read, ReadExactError, ReadReady};
use heapless::Deque;

use crate::stream::ByteStream;

/// Bytes moved from the receiver per read call during `poll`
const POLL_CHUNK: usize = 16;

/// Errors from the ring-buffered stream
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum RingError<E> {
    /// Error from the underlying receiver
    Io(E),
    /// Receiver reported end of stream
    Eof,
}

/// Byte stream backed by a ring of `N` bytes in front of receiver `R`
pub struct RingStream<R, const N: usize> {
    rx: R,
    ring: Deque<u8, N>,
}

impl<R, const N: usize> RingStream<R, N> {
    /// Wrap a receiver with an empty ring
    pub fn new(rx: R) -> Self {
        Self {
            rx,
            ring: Deque::new(),
        }
    }

    /// Free space left in the ring
    pub fn free(&self) -> usize {
        N - self.ring.len()
    }

    /// Give the receiver back, dropping any buffered bytes
    pub fn release(self) -> R {
        self.rx
    }
}

impl<R: Read + ReadReady, const N: usize> RingStream<R, N> {
    /// Move every ready byte from the receiver into the ring
    ///
    /// Stops when the receiver has nothing ready or the ring is full.
    /// Returns the number of bytes moved. Never blocks.
    pub fn poll(&mut self) -> Result<usize, RingError<R::Error>> {
        let mut chunk = [0u8; POLL_CHUNK];
        let mut moved = 0;

        while !self.ring.is_full() && self.rx.read_ready().map_err(RingError::Io)? {
            let want = self.free().min(POLL_CHUNK);
            let n = self.rx.read(&mut chunk[..want]).map_err(RingError::Io)?;
            if n == 0 {
                return Err(RingError::Eof);
            }
            for &byte in &chunk[..n] {
                // Cannot fail, `want` never exceeds free space
                let _ = self.ring.push_back(byte);
            }
            moved += n;
        }

        Ok(moved)
    }
}

impl<R: Read + ReadReady, const N: usize> ByteStream for RingStream<R, N> {
    type Error = RingError<R::Error>;

    fn peek(&mut self) -> Option<u8> {
        self.ring.front().copied()
    }

    fn available(&mut self) -> usize {
        self.ring.len()
    }

    fn read_exact(&mut self, buf: &mut [u8]) -> Result<(), Self::Error> {
        let from_ring = buf.len().min(self.ring.len());
        for slot in buf[..from_ring].iter_mut() {
            *slot = self.ring.pop_front().unwrap_or_default();
        }

        if from_ring < buf.len() {
            self.rx
                .read_exact(&mut buf[from_ring..])
                .map_err(|e| match e {
                    ReadExactError::UnexpectedEof => RingError::Eof,
                    ReadExactError::Other(e) => RingError::Io(e),
                })?;
        }

        Ok(())
    }

    /// Drops the ring and everything the receiver has ready
    fn clear(&mut self) -> Result<usize, Self::Error> {
        let mut dropped = 0;
        loop {
            dropped += self.ring.len();
            self.ring.clear();
            if self.poll()? == 0 {
                return Ok(dropped);
            }
        }
    }
}
