//! Polled packet reader for the RFID reader module
//!
//! # Frame
//!
//! ```text
//! 0x02 | HH | DDDDDDDD | CC | 0x03
//!  1      2      8        2     1    = 14 bytes
//! ```
//!
//! Only the DATA digits are interpreted. The header, checksum and end
//! flag are consumed without being looked at.
//!
//! # Usage
//!
//! Call [`PacketReader::has_packet_available`] once per loop iteration and
//! [`PacketReader::read_code`] only after it returned `true`. A `false`
//! result may have consumed one stray byte: this is how the reader
//! resynchronizes on a START flag after noise or a partial frame.
//!
//! ```
//! use tessera_drivers::PacketReader;
//! use tessera_hal::MemoryStream;
//! use tessera_protocol::Frame;
//!
//! let mut stream = MemoryStream::<32>::new();
//! stream.push(0x41).unwrap();
//! stream.extend_from_slice(&Frame::new(0xDEAD_BEEF).encode()).unwrap();
//!
//! let mut reader = PacketReader::new(&mut stream);
//! assert!(!reader.has_packet_available()); // stray 0x41 dropped
//! assert!(reader.has_packet_available());
//! assert_eq!(reader.read_code().unwrap(), 0xDEAD_BEEF);
//! ```

use tessera_hal::ByteStream;
use tessera_protocol::{
    decode_hex_lenient, decode_hex_strict, DecodeError, TagCode, CHECKSUM_LEN, DATA_LEN,
    FRAME_LEN, HEADER_LEN, START_FLAG,
};

/// Errors from reading a frame
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Error<E> {
    /// The byte stream failed or ran dry mid-frame
    Stream(E),
    /// DATA region is not eight hex digits (strict read only)
    InvalidData(DecodeError),
}

impl<E> From<DecodeError> for Error<E> {
    fn from(e: DecodeError) -> Self {
        Error::InvalidData(e)
    }
}

/// Where the head of the stream stands relative to the next frame
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ReaderState {
    /// Nothing buffered
    Empty,
    /// Head of the stream is a stray byte, not a START flag
    Scanning,
    /// START flag seen, frame still arriving
    Incomplete {
        /// Bytes buffered so far, START flag included
        buffered: usize,
    },
    /// A complete frame is buffered
    Ready,
}

/// RFID packet reader over a borrowed byte stream
///
/// Holds no state of its own, so it is cheap to construct per poll and
/// drop again when the stream is needed elsewhere.
pub struct PacketReader<'a, S: ByteStream> {
    stream: &'a mut S,
}

impl<'a, S: ByteStream> PacketReader<'a, S> {
    /// Create a reader over `stream`
    pub fn new(stream: &'a mut S) -> Self {
        Self { stream }
    }

    /// Check whether a complete frame is waiting
    ///
    /// - Head byte is not the START flag: that byte is consumed and `false`
    ///   is returned.
    /// - Head byte is the START flag: returns whether a full frame is
    ///   buffered. Nothing is consumed.
    /// - Stream empty: returns `false`.
    ///
    /// Never blocks.
    pub fn has_packet_available(&mut self) -> bool {
        match self.stream.peek() {
            None => false,
            Some(START_FLAG) => self.stream.available() >= FRAME_LEN,
            Some(_) => {
                let _ = self.stream.read_byte();
                false
            }
        }
    }

    /// Inspect the head of the stream without consuming anything
    pub fn state(&mut self) -> ReaderState {
        match self.stream.peek() {
            Some(START_FLAG) => {
                let buffered = self.stream.available();
                if buffered >= FRAME_LEN {
                    ReaderState::Ready
                } else {
                    ReaderState::Incomplete { buffered }
                }
            }
            Some(_) => ReaderState::Scanning,
            None => ReaderState::Empty,
        }
    }

    /// Consume one frame and return its DATA digits
    fn read_data(&mut self) -> Result<[u8; DATA_LEN], Error<S::Error>> {
        self.stream
            .discard(1 + HEADER_LEN)
            .map_err(Error::Stream)?;

        let mut data = [0u8; DATA_LEN];
        self.stream.read_exact(&mut data).map_err(Error::Stream)?;

        self.stream
            .discard(CHECKSUM_LEN + 1)
            .map_err(Error::Stream)?;

        Ok(data)
    }

    /// Consume one frame and decode its tag code
    ///
    /// Must only be called after [`has_packet_available`] returned `true`.
    /// The DATA region is decoded leniently: the longest valid hex prefix
    /// is used and garbage yields 0. Exactly [`FRAME_LEN`] bytes are
    /// consumed; the checksum and end flag are not checked.
    ///
    /// If the frame is not fully buffered this blocks on the stream, or
    /// returns [`Error::Stream`] for streams that cannot block.
    ///
    /// [`has_packet_available`]: Self::has_packet_available
    pub fn read_code(&mut self) -> Result<u32, Error<S::Error>> {
        let data = self.read_data()?;
        Ok(decode_hex_lenient(&data))
    }

    /// Consume one frame and decode its tag code, rejecting bad digits
    ///
    /// The whole frame is consumed even when the DATA region is rejected,
    /// so the stream stays aligned on the next frame.
    pub fn read_code_strict(&mut self) -> Result<TagCode, Error<S::Error>> {
        let data = self.read_data()?;
        Ok(TagCode(decode_hex_strict(&data)?))
    }

    /// Check for a frame and read it if one is ready
    pub fn poll(&mut self) -> Result<Option<u32>, Error<S::Error>> {
        if self.has_packet_available() {
            self.read_code().map(Some)
        } else {
            Ok(None)
        }
    }

    /// Read every complete frame currently buffered
    ///
    /// Stray bytes are dropped on the way. Stops on an empty stream or a
    /// frame that is still arriving, so it never blocks on a well-behaved
    /// stream. Returns the number of frames handed to `on_code`.
    pub fn drain<F: FnMut(u32)>(&mut self, mut on_code: F) -> Result<usize, Error<S::Error>> {
        let mut frames = 0;
        // Every step either drops a stray byte or consumes a whole frame
        while matches!(self.state(), ReaderState::Scanning | ReaderState::Ready) {
            if let Some(code) = self.poll()? {
                on_code(code);
                frames += 1;
            }
        }
        Ok(frames)
    }

    /// Drop every buffered byte
    ///
    /// Used to recover after a malformed frame or to ignore scans that
    /// arrived while the application was busy. Returns the number of bytes
    /// dropped.
    pub fn flush(&mut self) -> Result<usize, Error<S::Error>> {
        self.stream.clear().map_err(Error::Stream)
    }
}
